//! Locale-specific trigger keyword tables. Additional languages extend the
//! English base table, so new locales are additive data, not new branches.

#[derive(Clone, Debug)]
pub struct KeywordTable {
    pub compare: Vec<&'static str>,
    pub fastest: Vec<&'static str>,
    pub most_powerful: Vec<&'static str>,
    pub cheapest: Vec<&'static str>,
    /// Markers introducing a price ceiling, e.g. "under 500000".
    pub price_ceiling: Vec<&'static str>,
    /// Markers introducing a power floor, e.g. "more than 200 hp".
    pub power_floor: Vec<&'static str>,
    /// Unit words that qualify a number as horsepower.
    pub power_units: Vec<&'static str>,
}

impl KeywordTable {
    fn english() -> Self {
        Self {
            compare: vec!["compare", " vs ", " vs.", "versus"],
            fastest: vec!["fastest", "top speed", "quickest"],
            most_powerful: vec!["most powerful", "most hp", "powerful", "strongest"],
            cheapest: vec!["cheapest", "most affordable", "lowest price"],
            price_ceiling: vec!["under", "below", "cheaper than", "less than"],
            power_floor: vec!["more than", "over", "at least"],
            power_units: vec!["hp", "horsepower"],
        }
    }

    fn thai() -> Self {
        let mut table = Self::english();
        table.compare.push("\u{e40}\u{e1b}\u{e23}\u{e35}\u{e22}\u{e1a}\u{e40}\u{e17}\u{e35}\u{e22}\u{e1a}"); // เปรียบเทียบ
        table.fastest.push("\u{e40}\u{e23}\u{e47}\u{e27}\u{e17}\u{e35}\u{e48}\u{e2a}\u{e38}\u{e14}"); // เร็วที่สุด
        table.most_powerful.push("\u{e41}\u{e23}\u{e07}\u{e17}\u{e35}\u{e48}\u{e2a}\u{e38}\u{e14}"); // แรงที่สุด
        table.cheapest.push("\u{e16}\u{e39}\u{e01}\u{e17}\u{e35}\u{e48}\u{e2a}\u{e38}\u{e14}"); // ถูกที่สุด
        table.price_ceiling.push("\u{e44}\u{e21}\u{e48}\u{e40}\u{e01}\u{e34}\u{e19}"); // ไม่เกิน
        table.power_units.push("\u{e41}\u{e23}\u{e07}\u{e21}\u{e49}\u{e32}"); // แรงม้า
        table
    }

    /// Unknown locales fall back to English.
    pub fn for_locale(locale: &str) -> Self {
        match locale {
            "th" => Self::thai(),
            _ => Self::english(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::KeywordTable;

    #[test]
    fn thai_table_contains_the_english_base() {
        let en = KeywordTable::for_locale("en");
        let th = KeywordTable::for_locale("th");
        for keyword in &en.compare {
            assert!(th.compare.contains(keyword));
        }
        assert!(th.compare.len() > en.compare.len());
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let table = KeywordTable::for_locale("de");
        assert!(table.compare.contains(&"compare"));
    }
}
