//! Intent classification for the showroom chat assistant.
//!
//! A single pass over one input string, no memory of prior turns. The branch
//! precedence is a deliberate contract: compare, superlative, price ceiling,
//! power floor, single lookup, fallback; first match wins.

use bigbike_core::{BikeId, Catalog};

use crate::keywords::KeywordTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuperlativeKind {
    Speed,
    Power,
    Price,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChatIntent {
    Compare { slugs: Vec<BikeId> },
    /// Criteria in applied order; with several keywords the later sort
    /// dominates ties (speed, then power, then price).
    Superlative { criteria: Vec<SuperlativeKind> },
    PriceCeiling { limit: u64 },
    PowerFloor { limit: f64 },
    Lookup { slug: BikeId },
    Fallback,
}

pub fn classify(text: &str, catalog: &Catalog, keywords: &KeywordTable) -> ChatIntent {
    let normalized = text.to_lowercase();
    let tokens = tokenize(&normalized);
    let mentions = detect_mentions(&normalized, catalog);

    // 1. Comparison: an explicit keyword or two-plus mentioned bikes.
    if contains_any(&normalized, &keywords.compare) || mentions.len() >= 2 {
        if mentions.len() >= 2 {
            return ChatIntent::Compare { slugs: mentions };
        }
        // Keyword present but fewer than two bikes resolved: fall through.
    }

    // 2. Superlative ranking, only when nothing specific was mentioned.
    if mentions.is_empty() {
        let mut criteria = Vec::new();
        if contains_any(&normalized, &keywords.fastest) {
            criteria.push(SuperlativeKind::Speed);
        }
        if contains_any(&normalized, &keywords.most_powerful) {
            criteria.push(SuperlativeKind::Power);
        }
        if contains_any(&normalized, &keywords.cheapest) {
            criteria.push(SuperlativeKind::Price);
        }
        if !criteria.is_empty() {
            return ChatIntent::Superlative { criteria };
        }
    }

    // 3. Price ceiling: "under/below/cheaper than N".
    if let Some(marker_end) = find_any(&normalized, &keywords.price_ceiling) {
        match first_number_after(&normalized, marker_end) {
            Some(Ok(limit)) => return ChatIntent::PriceCeiling { limit },
            // A malformed numeric capture degrades to the help response.
            Some(Err(())) => return ChatIntent::Fallback,
            None => {}
        }
    }

    // 4. Power floor: "more than N hp".
    if let Some(marker_end) = find_any(&normalized, &keywords.power_floor) {
        if has_power_unit(&normalized, &tokens, &keywords.power_units) {
            match first_number_after(&normalized, marker_end) {
                Some(Ok(limit)) => return ChatIntent::PowerFloor { limit: limit as f64 },
                Some(Err(())) => return ChatIntent::Fallback,
                None => {}
            }
        }
    }

    // 5. Exactly one mentioned bike: spec-sheet lookup.
    if let [slug] = mentions.as_slice() {
        return ChatIntent::Lookup { slug: slug.clone() };
    }

    ChatIntent::Fallback
}

/// Substring containment, model names first; brand names only when no model
/// matched, so "yamaha r1" resolves to one bike instead of every Yamaha.
/// Deduped, catalog order.
fn detect_mentions(normalized: &str, catalog: &Catalog) -> Vec<BikeId> {
    let by_model: Vec<BikeId> = catalog
        .iter()
        .filter(|bike| normalized.contains(&bike.model.to_lowercase()))
        .map(|bike| bike.slug.clone())
        .collect();
    if !by_model.is_empty() {
        return by_model;
    }

    catalog
        .iter()
        .filter(|bike| normalized.contains(&bike.brand.to_lowercase()))
        .map(|bike| bike.slug.clone())
        .collect()
}

fn contains_any(normalized: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| normalized.contains(needle))
}

/// Byte offset just past the first matching marker, if any.
fn find_any(normalized: &str, needles: &[&str]) -> Option<usize> {
    needles
        .iter()
        .filter_map(|needle| normalized.find(needle).map(|start| start + needle.len()))
        .min()
}

fn tokenize(normalized: &str) -> Vec<String> {
    let mut sanitized = String::with_capacity(normalized.len());
    for character in normalized.chars() {
        if character.is_alphanumeric() || matches!(character, ',' | '.' | '$') {
            sanitized.push(character);
        } else {
            sanitized.push(' ');
        }
    }
    sanitized.split_whitespace().map(str::to_string).collect()
}

fn has_power_unit(normalized: &str, tokens: &[String], units: &[&str]) -> bool {
    units.iter().any(|unit| {
        if unit.len() <= 2 {
            // Short units match as whole tokens or glued to a number ("200hp").
            tokens.iter().any(|token| token == unit || token_number_with_unit(token, unit))
        } else {
            normalized.contains(unit)
        }
    })
}

fn token_number_with_unit(token: &str, unit: &str) -> bool {
    token
        .strip_suffix(unit)
        .is_some_and(|prefix| !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()))
}

/// First numeric token at or after `from`: `Ok(value)` when it parses after
/// stripping currency signs and thousands separators, `Err(())` when a
/// numeric-looking capture cannot be parsed, `None` when there is no number.
fn first_number_after(normalized: &str, from: usize) -> Option<Result<u64, ()>> {
    let tail = normalized.get(from..)?;
    let token = tokenize(tail).into_iter().find(|t| t.chars().any(|c| c.is_ascii_digit()))?;

    let mut cleaned = token.trim_start_matches('$').replace(',', "");
    for unit in ["hp", "km", "cc"] {
        if let Some(prefix) = cleaned.strip_suffix(unit) {
            cleaned = prefix.to_string();
        }
    }
    Some(cleaned.parse::<u64>().map_err(|_| ()))
}

#[cfg(test)]
mod tests {
    use bigbike_core::Catalog;

    use super::{classify, ChatIntent, SuperlativeKind};
    use crate::keywords::KeywordTable;

    fn classify_en(text: &str) -> ChatIntent {
        classify(text, &Catalog::builtin(), &KeywordTable::for_locale("en"))
    }

    #[test]
    fn compare_query_resolves_exactly_the_mentioned_bikes() {
        let intent = classify_en("compare Yamaha R1 and Honda CBR1000RR");
        let ChatIntent::Compare { slugs } = intent else {
            panic!("expected compare intent, got {intent:?}");
        };
        let names: Vec<_> = slugs.iter().map(|slug| slug.as_str()).collect();
        assert_eq!(names, vec!["yamaha-r1", "honda-cbr1000rr"]);
    }

    #[test]
    fn two_mentions_without_a_keyword_still_compare() {
        let intent = classify_en("R1 or ZX-10R?");
        assert!(matches!(intent, ChatIntent::Compare { ref slugs } if slugs.len() == 2));
    }

    #[test]
    fn compare_keyword_without_two_resolved_bikes_falls_through() {
        assert_eq!(classify_en("compare prices"), ChatIntent::Fallback);
    }

    #[test]
    fn cheapest_without_mentions_is_a_superlative() {
        let intent = classify_en("cheapest bikes");
        assert_eq!(
            intent,
            ChatIntent::Superlative { criteria: vec![SuperlativeKind::Price] }
        );
    }

    #[test]
    fn superlative_is_suppressed_when_a_bike_is_mentioned() {
        // "fastest" with a named bike resolves as a lookup of that bike.
        let intent = classify_en("is the H2 the fastest?");
        assert!(matches!(intent, ChatIntent::Lookup { .. }));
    }

    #[test]
    fn co_occurring_superlatives_keep_the_fixed_apply_order() {
        let intent = classify_en("fastest and cheapest bikes");
        assert_eq!(
            intent,
            ChatIntent::Superlative {
                criteria: vec![SuperlativeKind::Speed, SuperlativeKind::Price]
            }
        );
    }

    #[test]
    fn price_ceiling_parses_thousands_separators() {
        assert_eq!(classify_en("under 500000"), ChatIntent::PriceCeiling { limit: 500_000 });
        assert_eq!(
            classify_en("anything cheaper than $20,000?"),
            ChatIntent::PriceCeiling { limit: 20_000 }
        );
    }

    #[test]
    fn power_floor_requires_the_unit() {
        assert_eq!(classify_en("more than 200 hp"), ChatIntent::PowerFloor { limit: 200.0 });
        assert_eq!(classify_en("more than 200hp"), ChatIntent::PowerFloor { limit: 200.0 });
        // Without a power unit the number is not a horsepower floor.
        assert_eq!(classify_en("more than 200"), ChatIntent::Fallback);
    }

    #[test]
    fn malformed_number_degrades_to_fallback() {
        assert_eq!(classify_en("under 99999999999999999999999"), ChatIntent::Fallback);
    }

    #[test]
    fn single_mention_is_a_lookup() {
        let intent = classify_en("Yamaha R1");
        let ChatIntent::Lookup { slug } = intent else {
            panic!("expected lookup, got {intent:?}");
        };
        assert_eq!(slug.as_str(), "yamaha-r1");
    }

    #[test]
    fn brand_only_mention_fans_out_to_a_comparison() {
        let intent = classify_en("tell me about Ducati");
        assert!(matches!(intent, ChatIntent::Compare { ref slugs } if slugs.len() == 2));
    }

    #[test]
    fn gibberish_is_fallback() {
        assert_eq!(classify_en("asdkjasd"), ChatIntent::Fallback);
    }

    #[test]
    fn thai_keywords_route_to_the_same_branches() {
        let catalog = Catalog::builtin();
        let table = KeywordTable::for_locale("th");
        assert_eq!(
            classify("\u{e16}\u{e39}\u{e01}\u{e17}\u{e35}\u{e48}\u{e2a}\u{e38}\u{e14}", &catalog, &table),
            ChatIntent::Superlative { criteria: vec![SuperlativeKind::Price] }
        );
        assert_eq!(
            classify("\u{e44}\u{e21}\u{e48}\u{e40}\u{e01}\u{e34}\u{e19} 500,000", &catalog, &table),
            ChatIntent::PriceCeiling { limit: 500_000 }
        );
    }
}
