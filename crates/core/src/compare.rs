//! Field-by-field bike comparison with a fixed direction table deciding the
//! per-field winner.

use serde::{Deserialize, Serialize};

use crate::domain::bike::Bike;

/// Rendering order is fixed and part of the contract.
pub const COMPARED_FIELDS: &[SpecField] = &[
    SpecField::Brand,
    SpecField::Model,
    SpecField::Category,
    SpecField::Displacement,
    SpecField::Power,
    SpecField::Torque,
    SpecField::Weight,
    SpecField::TopSpeed,
    SpecField::Acceleration,
    SpecField::Price,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecField {
    Brand,
    Model,
    Category,
    Displacement,
    Power,
    Torque,
    Weight,
    TopSpeed,
    Acceleration,
    Price,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    HigherBetter,
    LowerBetter,
    Informational,
}

impl SpecField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Brand => "Brand",
            Self::Model => "Model",
            Self::Category => "Category",
            Self::Displacement => "Engine (cc)",
            Self::Power => "Horsepower (HP)",
            Self::Torque => "Torque (Nm)",
            Self::Weight => "Weight (kg)",
            Self::TopSpeed => "Top Speed (km/h)",
            Self::Acceleration => "0-100 km/h (s)",
            Self::Price => "Price ($)",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Self::Displacement | Self::Power | Self::Torque | Self::TopSpeed => {
                Direction::HigherBetter
            }
            Self::Weight | Self::Acceleration | Self::Price => Direction::LowerBetter,
            Self::Brand | Self::Model | Self::Category => Direction::Informational,
        }
    }

    pub fn value_of(self, bike: &Bike) -> FieldValue {
        match self {
            Self::Brand => FieldValue::Text(bike.brand.clone()),
            Self::Model => FieldValue::Text(bike.model.clone()),
            Self::Category => FieldValue::Text(bike.category.clone()),
            Self::Displacement => FieldValue::Integer(u64::from(bike.cc)),
            Self::Power => FieldValue::Decimal(bike.horsepower),
            Self::Torque => FieldValue::Decimal(bike.torque),
            Self::Weight => FieldValue::Integer(u64::from(bike.weight)),
            Self::TopSpeed => FieldValue::Integer(u64::from(bike.top_speed)),
            Self::Acceleration => FieldValue::Decimal(bike.zero_to_hundred),
            Self::Price => FieldValue::Integer(u64::from(bike.price)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(u64),
    Decimal(f64),
}

impl FieldValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Text(_) => None,
            Self::Integer(value) => Some(*value as f64),
            Self::Decimal(value) => Some(*value),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    #[default]
    None,
    First,
    Second,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub field: SpecField,
    pub label: &'static str,
    pub left: FieldValue,
    pub right: FieldValue,
    pub winner: Winner,
}

/// Multi-column comparison table; `best` is the winning column index for a
/// row, `None` on ties and informational fields. The pairwise [`compare`] is
/// the two-column special case.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableRow {
    pub field: SpecField,
    pub label: &'static str,
    pub values: Vec<FieldValue>,
    pub best: Option<usize>,
}

impl ComparisonTable {
    pub fn build(bikes: &[&Bike]) -> Self {
        let columns = bikes.iter().map(|bike| bike.full_name.clone()).collect();
        let rows = COMPARED_FIELDS
            .iter()
            .map(|&field| {
                let values: Vec<FieldValue> =
                    bikes.iter().map(|bike| field.value_of(bike)).collect();
                TableRow { field, label: field.label(), best: best_index(field, &values), values }
            })
            .collect();
        Self { columns, rows }
    }
}

fn best_index(field: SpecField, values: &[FieldValue]) -> Option<usize> {
    let direction = field.direction();
    if direction == Direction::Informational || values.len() < 2 {
        return None;
    }

    let numbers: Vec<f64> = values.iter().filter_map(FieldValue::as_number).collect();
    if numbers.len() != values.len() {
        return None;
    }

    let better = |a: f64, b: f64| match direction {
        Direction::HigherBetter => a > b,
        Direction::LowerBetter => a < b,
        Direction::Informational => false,
    };

    let mut best = 0usize;
    for (index, &value) in numbers.iter().enumerate().skip(1) {
        if better(value, numbers[best]) {
            best = index;
        }
    }

    // A tie on the best value means no winner for the field.
    let tied = numbers.iter().enumerate().any(|(index, &value)| {
        index != best && (value - numbers[best]).abs() < f64::EPSILON
    });
    if tied {
        None
    } else {
        Some(best)
    }
}

/// Pairwise comparison in declared field order.
pub fn compare(left: &Bike, right: &Bike) -> Vec<ComparisonRow> {
    ComparisonTable::build(&[left, right])
        .rows
        .into_iter()
        .map(|row| {
            let winner = match row.best {
                Some(0) => Winner::First,
                Some(1) => Winner::Second,
                _ => Winner::None,
            };
            let mut values = row.values.into_iter();
            let left = values.next().unwrap_or(FieldValue::Text(String::new()));
            let right = values.next().unwrap_or(FieldValue::Text(String::new()));
            ComparisonRow { field: row.field, label: row.label, left, right, winner }
        })
        .collect()
}
