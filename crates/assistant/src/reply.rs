//! Executes a classified intent against the catalog and renders the reply.

use serde::Serialize;

use bigbike_core::{Bike, Catalog, ComparisonTable};

use crate::intent::{classify, ChatIntent, SuperlativeKind};
use crate::keywords::KeywordTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatBranch {
    Compare,
    Superlative,
    PriceCeiling,
    PowerFloor,
    Lookup,
    Fallback,
}

/// The comparison-relevant fields inlined with ranked results.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecSummary {
    pub slug: String,
    pub full_name: String,
    pub horsepower: f64,
    pub top_speed: u32,
    pub price: u32,
}

impl SpecSummary {
    fn of(bike: &Bike) -> Self {
        Self {
            slug: bike.slug.as_str().to_string(),
            full_name: bike.full_name.clone(),
            horsepower: bike.horsepower,
            top_speed: bike.top_speed,
            price: bike.price,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ChatReply {
    pub branch: ChatBranch,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonTable>,
    pub results: Vec<SpecSummary>,
    pub suggestions: Vec<String>,
}

/// Stateless chat assistant: every call is a pure function of the input text
/// and the catalog.
#[derive(Debug, Clone)]
pub struct Assistant {
    catalog: Catalog,
    keywords: KeywordTable,
}

impl Assistant {
    pub fn new(catalog: Catalog, locale: &str) -> Self {
        Self { catalog, keywords: KeywordTable::for_locale(locale) }
    }

    pub fn answer(&self, text: &str) -> ChatReply {
        match classify(text, &self.catalog, &self.keywords) {
            ChatIntent::Compare { slugs } => self.compare_reply(&slugs),
            ChatIntent::Superlative { criteria } => self.superlative_reply(&criteria),
            ChatIntent::PriceCeiling { limit } => self.price_ceiling_reply(limit),
            ChatIntent::PowerFloor { limit } => self.power_floor_reply(limit),
            ChatIntent::Lookup { slug } => match self.catalog.find(&slug) {
                Some(bike) => self.lookup_reply(bike),
                None => fallback_reply(),
            },
            ChatIntent::Fallback => fallback_reply(),
        }
    }

    fn compare_reply(&self, slugs: &[bigbike_core::BikeId]) -> ChatReply {
        let bikes: Vec<&Bike> =
            slugs.iter().filter_map(|slug| self.catalog.find(slug)).collect();
        if bikes.len() < 2 {
            return fallback_reply();
        }

        let names: Vec<&str> = bikes.iter().map(|bike| bike.full_name.as_str()).collect();
        ChatReply {
            branch: ChatBranch::Compare,
            text: format!("Comparing {}.", names.join(" vs ")),
            comparison: Some(ComparisonTable::build(&bikes)),
            results: bikes.iter().map(|bike| SpecSummary::of(bike)).collect(),
            suggestions: vec![
                format!("Book a test ride for {}", bikes[0].full_name),
                "Show me the fastest bikes".to_string(),
            ],
        }
    }

    fn superlative_reply(&self, criteria: &[SuperlativeKind]) -> ChatReply {
        let mut ranked: Vec<&Bike> = self.catalog.iter().collect();
        // Sequential stable re-sorts: with several keywords the last applied
        // criterion dominates ties.
        for criterion in criteria {
            match criterion {
                SuperlativeKind::Speed => {
                    ranked.sort_by(|a, b| b.top_speed.cmp(&a.top_speed));
                }
                SuperlativeKind::Power => {
                    ranked.sort_by(|a, b| b.horsepower.total_cmp(&a.horsepower));
                }
                SuperlativeKind::Price => ranked.sort_by(|a, b| a.price.cmp(&b.price)),
            }
        }
        ranked.truncate(3);

        let text = match criteria.last() {
            Some(SuperlativeKind::Speed) => format!(
                "Fastest bikes: {}",
                join_with(&ranked, |bike| format!("{} ({}km/h)", bike.full_name, bike.top_speed))
            ),
            Some(SuperlativeKind::Power) => format!(
                "Most powerful bikes: {}",
                join_with(&ranked, |bike| format!("{} ({}HP)", bike.full_name, bike.horsepower))
            ),
            _ => format!(
                "Most affordable bikes: {}",
                join_with(&ranked, |bike| {
                    format!("{} (${})", bike.full_name, format_price(bike.price))
                })
            ),
        };

        let mut suggestions = Vec::new();
        if ranked.len() >= 2 {
            suggestions.push(format!("Compare {} and {}", ranked[0].model, ranked[1].model));
        }
        suggestions.push("Under $20,000".to_string());

        ChatReply {
            branch: ChatBranch::Superlative,
            text,
            comparison: None,
            results: ranked.iter().map(|bike| SpecSummary::of(bike)).collect(),
            suggestions,
        }
    }

    fn price_ceiling_reply(&self, limit: u64) -> ChatReply {
        let mut matches: Vec<&Bike> =
            self.catalog.iter().filter(|bike| u64::from(bike.price) <= limit).collect();
        matches.sort_by(|a, b| b.price.cmp(&a.price));

        let text = if matches.is_empty() {
            let cheapest = self.catalog.iter().min_by_key(|bike| bike.price);
            match cheapest {
                Some(bike) => format!(
                    "No bikes under ${}; the most affordable is {} at ${}.",
                    format_price_u64(limit),
                    bike.full_name,
                    format_price(bike.price)
                ),
                None => format!("No bikes under ${}.", format_price_u64(limit)),
            }
        } else {
            format!(
                "{} bike{} under ${}: {}",
                matches.len(),
                if matches.len() == 1 { "" } else { "s" },
                format_price_u64(limit),
                join_with(&matches, |bike| {
                    format!("{} (${})", bike.full_name, format_price(bike.price))
                })
            )
        };

        let suggestions = if matches.is_empty() {
            vec!["Cheapest bikes".to_string()]
        } else {
            vec![
                format!("Tell me about the {}", matches[0].model),
                "Most powerful bikes".to_string(),
            ]
        };

        ChatReply {
            branch: ChatBranch::PriceCeiling,
            text,
            comparison: None,
            results: matches.iter().map(|bike| SpecSummary::of(bike)).collect(),
            suggestions,
        }
    }

    fn power_floor_reply(&self, limit: f64) -> ChatReply {
        let mut matches: Vec<&Bike> =
            self.catalog.iter().filter(|bike| bike.horsepower >= limit).collect();
        matches.sort_by(|a, b| b.horsepower.total_cmp(&a.horsepower));

        let text = if matches.is_empty() {
            let strongest = self
                .catalog
                .iter()
                .max_by(|a, b| a.horsepower.total_cmp(&b.horsepower));
            match strongest {
                Some(bike) => format!(
                    "No bikes with more than {limit} HP; the strongest is {} ({}HP).",
                    bike.full_name, bike.horsepower
                ),
                None => format!("No bikes with more than {limit} HP."),
            }
        } else {
            format!(
                "{} bike{} with more than {limit} HP: {}",
                matches.len(),
                if matches.len() == 1 { "" } else { "s" },
                join_with(&matches, |bike| format!("{} ({}HP)", bike.full_name, bike.horsepower))
            )
        };

        let suggestions = if matches.len() >= 2 {
            vec![format!("Compare {} and {}", matches[0].model, matches[1].model)]
        } else {
            vec!["Most powerful bikes".to_string()]
        };

        ChatReply {
            branch: ChatBranch::PowerFloor,
            text,
            comparison: None,
            results: matches.iter().map(|bike| SpecSummary::of(bike)).collect(),
            suggestions,
        }
    }

    fn lookup_reply(&self, bike: &Bike) -> ChatReply {
        let other = self
            .catalog
            .iter()
            .find(|candidate| candidate.slug != bike.slug && candidate.category == bike.category)
            .or_else(|| self.catalog.iter().find(|candidate| candidate.slug != bike.slug));

        let mut suggestions = vec![format!("Book a test ride for {}", bike.full_name)];
        if let Some(other) = other {
            suggestions.push(format!("Compare {} and {}", bike.model, other.model));
        }

        ChatReply {
            branch: ChatBranch::Lookup,
            text: format!(
                "{}: {}HP, {}CC, ${}. {}",
                bike.full_name,
                bike.horsepower,
                bike.cc,
                format_price(bike.price),
                bike.description
            ),
            comparison: None,
            results: vec![SpecSummary::of(bike)],
            suggestions,
        }
    }
}

const FALLBACK_TEXT: &str =
    "I can help you with bike specifications. Try asking about HP, CC, price, or specific bike models!";

fn fallback_reply() -> ChatReply {
    ChatReply {
        branch: ChatBranch::Fallback,
        text: FALLBACK_TEXT.to_string(),
        comparison: None,
        results: Vec::new(),
        suggestions: vec![
            "Which bike has the most HP?".to_string(),
            "Tell me about the Yamaha R1".to_string(),
        ],
    }
}

fn join_with(bikes: &[&Bike], render: impl Fn(&Bike) -> String) -> String {
    bikes.iter().map(|bike| render(bike)).collect::<Vec<_>>().join(", ")
}

fn format_price(price: u32) -> String {
    format_price_u64(u64::from(price))
}

fn format_price_u64(price: u64) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, character) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(character);
    }
    grouped
}
