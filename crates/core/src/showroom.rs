//! Filter and sort over the catalog, driving the collections listing.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::bike::Bike;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    PowerDesc,
    DisplacementDesc,
    PriceAsc,
    PriceDesc,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" | "name_asc" => Ok(Self::NameAsc),
            "name_desc" => Ok(Self::NameDesc),
            "hp" | "power" | "power_desc" => Ok(Self::PowerDesc),
            "cc" | "displacement" | "displacement_desc" => Ok(Self::DisplacementDesc),
            "price_asc" => Ok(Self::PriceAsc),
            "price" | "price_desc" => Ok(Self::PriceDesc),
            other => Err(format!(
                "unsupported sort key `{other}` (expected name|name_desc|power|displacement|price_asc|price_desc)"
            )),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BrandFilter {
    #[default]
    Any,
    Only(String),
}

impl BrandFilter {
    fn matches(&self, bike: &Bike) -> bool {
        match self {
            Self::Any => true,
            Self::Only(brand) => bike.brand.eq_ignore_ascii_case(brand),
        }
    }
}

/// Returns the subsequence of the catalog matching both predicates, sorted by
/// the chosen key. Sorts are stable, so numeric ties keep catalog order.
pub fn filter_sort<'a>(
    catalog: &'a Catalog,
    query: &str,
    brand: &BrandFilter,
    sort: SortKey,
) -> Vec<&'a Bike> {
    let needle = query.trim().to_lowercase();
    let mut matched: Vec<&Bike> = catalog
        .iter()
        .filter(|bike| {
            let text_hit = needle.is_empty()
                || bike.full_name.to_lowercase().contains(&needle)
                || bike.brand.to_lowercase().contains(&needle);
            text_hit && brand.matches(bike)
        })
        .collect();

    match sort {
        SortKey::NameAsc => matched.sort_by(|a, b| a.full_name.cmp(&b.full_name)),
        SortKey::NameDesc => matched.sort_by(|a, b| b.full_name.cmp(&a.full_name)),
        SortKey::PowerDesc => {
            matched.sort_by(|a, b| b.horsepower.total_cmp(&a.horsepower));
        }
        SortKey::DisplacementDesc => matched.sort_by(|a, b| b.cc.cmp(&a.cc)),
        SortKey::PriceAsc => matched.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => matched.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::{filter_sort, BrandFilter, SortKey};
    use crate::catalog::Catalog;

    #[test]
    fn text_query_matches_brand_or_full_name_case_insensitively() {
        let catalog = Catalog::builtin();
        let hits = filter_sort(&catalog, "DUCATI", &BrandFilter::Any, SortKey::NameAsc);
        assert_eq!(hits.len(), 2);

        let hits = filter_sort(&catalog, "fireblade", &BrandFilter::Any, SortKey::NameAsc);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug.as_str(), "honda-cbr1000rr");
    }

    #[test]
    fn brand_filter_and_query_are_a_conjunction() {
        let catalog = Catalog::builtin();
        let hits = filter_sort(
            &catalog,
            "ninja",
            &BrandFilter::Only("Kawasaki".to_string()),
            SortKey::NameAsc,
        );
        assert_eq!(hits.len(), 3);

        let hits =
            filter_sort(&catalog, "ninja", &BrandFilter::Only("Honda".to_string()), SortKey::NameAsc);
        assert!(hits.is_empty());
    }

    #[test]
    fn power_sort_is_descending_total_order() {
        let catalog = Catalog::builtin();
        let hits = filter_sort(&catalog, "", &BrandFilter::Any, SortKey::PowerDesc);
        assert_eq!(hits.first().map(|bike| bike.slug.as_str()), Some("kawasaki-h2"));
        for pair in hits.windows(2) {
            assert!(pair[0].horsepower >= pair[1].horsepower);
        }
    }

    #[test]
    fn displacement_ties_keep_catalog_order() {
        let catalog = Catalog::builtin();
        let hits = filter_sort(&catalog, "", &BrandFilter::Any, SortKey::DisplacementDesc);
        // yamaha-r1, kawasaki-zx10r, and kawasaki-h2 all displace 998cc; the
        // stable sort must keep their relative catalog order.
        let at_998: Vec<_> = hits
            .iter()
            .filter(|bike| bike.cc == 998)
            .map(|bike| bike.slug.as_str())
            .collect();
        assert_eq!(at_998, vec!["yamaha-r1", "kawasaki-zx10r", "kawasaki-h2"]);
    }

    #[test]
    fn result_is_a_subsequence_and_filtering_is_idempotent() {
        let catalog = Catalog::builtin();
        let once = filter_sort(&catalog, "kawasaki", &BrandFilter::Any, SortKey::PriceAsc);
        for bike in &once {
            assert!(catalog.find(&bike.slug).is_some());
        }

        let narrowed = Catalog::new(once.iter().map(|bike| (*bike).clone()).collect());
        let twice = filter_sort(&narrowed, "kawasaki", &BrandFilter::Any, SortKey::PriceAsc);
        assert_eq!(
            once.iter().map(|bike| bike.slug.clone()).collect::<Vec<_>>(),
            twice.iter().map(|bike| bike.slug.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn empty_result_is_valid() {
        let catalog = Catalog::builtin();
        let hits = filter_sort(&catalog, "harley", &BrandFilter::Any, SortKey::NameAsc);
        assert!(hits.is_empty());
    }
}
