//! Gamified viewing achievements: rules as data, a pure evaluator, and a
//! tracker that surfaces at most one newly unlocked badge per viewing event.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::bike::BikeId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum AchievementRule {
    ViewedAtLeast(usize),
    ViewedHalf,
    ViewedAll,
    BrandComplete(String),
}

impl AchievementRule {
    pub fn satisfied(&self, viewed: &BTreeSet<BikeId>, catalog: &Catalog) -> bool {
        match self {
            Self::ViewedAtLeast(count) => viewed.len() >= *count,
            Self::ViewedHalf => !catalog.is_empty() && viewed.len() * 2 >= catalog.len(),
            Self::ViewedAll => !catalog.is_empty() && viewed.len() == catalog.len(),
            Self::BrandComplete(brand) => {
                let brand_bikes = catalog.by_brand(brand);
                !brand_bikes.is_empty()
                    && brand_bikes.iter().all(|bike| viewed.contains(&bike.slug))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name_key: String,
    pub description_key: String,
    pub icon: String,
    pub rule: AchievementRule,
}

impl Achievement {
    fn milestone(id: &str, icon: &str, rule: AchievementRule) -> Self {
        Self {
            id: id.to_string(),
            name_key: format!("achievements.{id}.name"),
            description_key: format!("achievements.{id}.desc"),
            icon: icon.to_string(),
            rule,
        }
    }

    fn brand_fan(brand: &str) -> Self {
        Self {
            id: format!("{}Fan", brand.to_lowercase()),
            name_key: "achievements.brandFan.name".to_string(),
            description_key: "achievements.brandFan.desc".to_string(),
            icon: "rocket".to_string(),
            rule: AchievementRule::BrandComplete(brand.to_string()),
        }
    }
}

/// Fixed rule list: the four milestones plus one fan badge per catalog brand.
pub fn achievement_list(catalog: &Catalog) -> Vec<Achievement> {
    let mut list = vec![
        Achievement::milestone("firstLook", "star", AchievementRule::ViewedAtLeast(1)),
        Achievement::milestone("enthusiast", "trophy", AchievementRule::ViewedAtLeast(10)),
        Achievement::milestone("collector", "gem", AchievementRule::ViewedHalf),
        Achievement::milestone("masterExplorer", "crown", AchievementRule::ViewedAll),
    ];
    for brand in catalog.brands() {
        list.push(Achievement::brand_fan(&brand));
    }
    list
}

/// Pure "all satisfied now" computation. Idempotent and monotone in `viewed`.
pub fn satisfied<'a>(
    list: &'a [Achievement],
    viewed: &BTreeSet<BikeId>,
    catalog: &Catalog,
) -> Vec<&'a Achievement> {
    list.iter().filter(|achievement| achievement.rule.satisfied(viewed, catalog)).collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackerUpdate {
    /// At most one per viewing event; further unlocks queue for later events.
    pub newly_unlocked: Option<Achievement>,
    /// Always the complete cumulative satisfied set.
    pub satisfied: Vec<Achievement>,
}

/// Separates the pure satisfied-set computation from the one-at-a-time toast
/// notification queue.
#[derive(Clone, Debug, Default)]
pub struct AchievementTracker {
    seen_ids: BTreeSet<String>,
    pending: VecDeque<Achievement>,
}

impl AchievementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_viewed_change(
        &mut self,
        list: &[Achievement],
        viewed: &BTreeSet<BikeId>,
        catalog: &Catalog,
    ) -> TrackerUpdate {
        let current: Vec<Achievement> =
            satisfied(list, viewed, catalog).into_iter().cloned().collect();

        for achievement in &current {
            if self.seen_ids.insert(achievement.id.clone()) {
                self.pending.push_back(achievement.clone());
            }
        }

        TrackerUpdate { newly_unlocked: self.pending.pop_front(), satisfied: current }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
