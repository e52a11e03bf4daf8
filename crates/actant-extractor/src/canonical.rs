//! Canonicalization table mapping surface variants to one normalized form

use crate::text::collapse_whitespace;
use std::collections::BTreeMap;

/// Built-in variant -> canonical pairs
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("PRC", "China"),
    ("P.R.C.", "China"),
    ("People's Republic of China", "China"),
    ("Chinese", "China"),
    ("中国", "China"),
    ("中华人民共和国", "China"),
    ("Russian Federation", "Russia"),
    ("俄罗斯", "Russia"),
    ("US", "United States"),
    ("U.S.", "United States"),
    ("USA", "United States"),
    ("United States of America", "United States"),
    ("美国", "United States"),
    ("UK", "United Kingdom"),
    ("英国", "United Kingdom"),
    ("哈萨克斯坦", "Kazakhstan"),
    ("印度尼西亚", "Indonesia"),
    ("印尼", "Indonesia"),
    ("埃及", "Egypt"),
    ("埃塞俄比亚", "Ethiopia"),
    ("尼日利亚", "Nigeria"),
    ("蒙古", "Mongolia"),
    ("塞尔维亚", "Serbia"),
    ("乌兹别克斯坦", "Uzbekistan"),
    ("摩洛哥", "Morocco"),
    ("坦桑尼亚", "Tanzania"),
    ("乌干达", "Uganda"),
    ("南非", "South Africa"),
    ("肯尼亚", "Kenya"),
    ("尼泊尔", "Nepal"),
    ("希腊", "Greece"),
    ("巴基斯坦", "Pakistan"),
    ("孟加拉国", "Bangladesh"),
    ("缅甸", "Myanmar"),
    ("老挝", "Laos"),
    ("柬埔寨", "Cambodia"),
    ("泰国", "Thailand"),
    ("马来西亚", "Malaysia"),
    ("新加坡", "Singapore"),
    ("菲律宾", "Philippines"),
    ("越南", "Vietnam"),
    ("Viet Nam", "Vietnam"),
    ("UN", "United Nations"),
    ("联合国", "United Nations"),
    ("EU", "European Union"),
    ("欧盟", "European Union"),
    ("AU", "African Union"),
    ("非盟", "African Union"),
    ("东盟", "ASEAN"),
    ("AIIB", "Asian Infrastructure Investment Bank"),
    ("亚投行", "Asian Infrastructure Investment Bank"),
    ("亚洲基础设施投资银行", "Asian Infrastructure Investment Bank"),
    ("丝路基金", "Silk Road Fund"),
    ("世界银行", "World Bank"),
    ("国际货币基金组织", "IMF"),
    ("International Monetary Fund", "IMF"),
    ("世界贸易组织", "WTO"),
    ("World Trade Organization", "WTO"),
    ("金砖国家", "BRICS"),
    ("上海合作组织", "Shanghai Cooperation Organisation"),
    ("上合组织", "Shanghai Cooperation Organisation"),
    ("Shanghai Cooperation Organization", "Shanghai Cooperation Organisation"),
    ("SCO", "Shanghai Cooperation Organisation"),
    ("BRI", "Belt and Road Initiative"),
    ("Belt and Road", "Belt and Road Initiative"),
    ("One Belt One Road", "Belt and Road Initiative"),
    ("One Belt, One Road", "Belt and Road Initiative"),
    ("OBOR", "Belt and Road Initiative"),
    ("一带一路", "Belt and Road Initiative"),
    ("一带一路倡议", "Belt and Road Initiative"),
    ("丝绸之路经济带", "Silk Road Economic Belt"),
    ("21世纪海上丝绸之路", "21st Century Maritime Silk Road"),
    ("Maritime Silk Road", "21st Century Maritime Silk Road"),
    ("CPEC", "China-Pakistan Economic Corridor"),
    ("中巴经济走廊", "China-Pakistan Economic Corridor"),
    ("习近平", "Xi Jinping"),
    ("李克强", "Li Keqiang"),
    ("王毅", "Wang Yi"),
];

/// Lookup key: lowercase, punctuation-insensitive, whitespace collapsed
fn key_of(surface: &str) -> String {
    let stripped: String = surface
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '\'' | '’' | '"' | '“' | '”'))
        .collect();
    collapse_whitespace(&stripped).to_lowercase()
}

/// Case- and punctuation-insensitive alias table
///
/// A surface form with no alias normalizes to itself (whitespace collapsed,
/// trailing punctuation removed).
#[derive(Debug, Clone, Default)]
pub struct CanonicalTable {
    aliases: BTreeMap<String, String>,
}

impl CanonicalTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table preloaded with the built-in aliases
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (variant, canonical) in BUILTIN_ALIASES {
            table.insert(variant, canonical);
        }
        table
    }

    /// Map `variant` to `canonical` (later inserts win)
    pub fn insert(&mut self, variant: &str, canonical: &str) {
        let key = key_of(variant);
        if key.is_empty() {
            return;
        }
        self.aliases.insert(key, collapse_whitespace(canonical));
    }

    /// Register a term as its own canonical form unless it already has one
    ///
    /// Keeps case-insensitive matches ("belt and road initiative") pointing
    /// at the gazetteer's spelling.
    pub fn register(&mut self, term: &str) {
        let key = key_of(term);
        if key.is_empty() {
            return;
        }
        self.aliases
            .entry(key)
            .or_insert_with(|| collapse_whitespace(term));
    }

    /// Normalized form of a surface string
    pub fn normalize(&self, surface: &str) -> String {
        if let Some(canonical) = self.aliases.get(&key_of(surface)) {
            return canonical.clone();
        }
        collapse_whitespace(surface)
            .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':'))
            .to_string()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_aliases() {
        let table = CanonicalTable::builtin();
        assert_eq!(table.normalize("PRC"), "China");
        assert_eq!(table.normalize("中国"), "China");
        assert_eq!(table.normalize("BRI"), "Belt and Road Initiative");
        assert_eq!(table.normalize("one belt one road"), "Belt and Road Initiative");
        assert_eq!(table.normalize("一带一路"), "Belt and Road Initiative");
        assert_eq!(table.normalize("U.S."), "United States");
    }

    #[test]
    fn test_unknown_surface_normalizes_to_itself() {
        let table = CanonicalTable::builtin();
        assert_eq!(table.normalize("Mombasa  Port."), "Mombasa Port");
    }

    #[test]
    fn test_register_keeps_existing_alias() {
        let mut table = CanonicalTable::builtin();
        table.register("Belt and Road");
        table.register("Gwadar Port");
        assert_eq!(table.normalize("belt and road"), "Belt and Road Initiative");
        assert_eq!(table.normalize("GWADAR PORT"), "Gwadar Port");
    }

    #[test]
    fn test_insert_overrides() {
        let mut table = CanonicalTable::builtin();
        table.insert("BRI", "Belt & Road");
        assert_eq!(table.normalize("bri"), "Belt & Road");
    }
}
