use serde::{Deserialize, Serialize};

/// Catalog slug, e.g. `yamaha-r1`. Unique across the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BikeId(pub String);

impl BikeId {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BikeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bike {
    pub slug: BikeId,
    pub brand: String,
    pub model: String,
    pub full_name: String,
    pub cc: u32,
    pub horsepower: f64,
    pub torque: f64,
    pub weight: u32,
    pub top_speed: u32,
    pub zero_to_hundred: f64,
    pub price: u32,
    pub image: String,
    pub image_lite: String,
    pub model_3d: String,
    pub category: String,
    pub description: String,
}
