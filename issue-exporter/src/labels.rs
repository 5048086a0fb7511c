//! Label mapping between the source and destination trackers.

use std::collections::HashMap;

/// Default label translations applied before configured overrides.
const DEFAULT_LABELS: [(&str, &str); 2] = [
    ("Type-Defect", "bug"),
    ("Type-Enhancement", "enhancement"),
];

/// Translates source labels into destination labels.
///
/// Labels without a mapping are passed through unchanged.
#[derive(Debug, Clone)]
pub struct LabelMapper {
    mapping: HashMap<String, String>,
}

impl Default for LabelMapper {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl LabelMapper {
    /// Creates a mapper from configured overrides layered on the defaults.
    pub fn new(overrides: HashMap<String, String>) -> Self {
        let mut mapping: HashMap<String, String> = DEFAULT_LABELS
            .iter()
            .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
            .collect();
        mapping.extend(overrides);
        Self { mapping }
    }

    /// Maps a single label.
    pub fn map<'a>(&'a self, label: &'a str) -> &'a str {
        self.mapping.get(label).map_or(label, String::as_str)
    }

    /// Maps a list of labels, dropping duplicates while keeping order.
    pub fn map_all<'a, I>(&self, labels: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut mapped: Vec<String> = Vec::new();
        for label in labels {
            let label = self.map(label);
            if !mapped.iter().any(|existing| existing == label) {
                mapped.push(label.to_string());
            }
        }
        mapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_default_mapping() {
        let mapper = LabelMapper::default();

        assert_eq!(mapper.map("Type-Defect"), "bug");
        assert_eq!(mapper.map("Priority-High"), "Priority-High");
    }

    #[test]
    fn overrides_take_precedence() {
        let mapper = LabelMapper::new(HashMap::from([
            ("Type-Defect".to_string(), "defect".to_string()),
            ("Priority-High".to_string(), "priority: high".to_string()),
        ]));

        assert_eq!(mapper.map("Type-Defect"), "defect");
        assert_eq!(mapper.map("Priority-High"), "priority: high");
        assert_eq!(mapper.map("Type-Enhancement"), "enhancement");
    }

    #[test]
    fn map_all_deduplicates() {
        let mapper = LabelMapper::new(HashMap::from([(
            "Type-Bug".to_string(),
            "bug".to_string(),
        )]));

        let labels = mapper.map_all(["Type-Defect", "Type-Bug", "OpSys-All"]);
        assert_eq!(labels, ["bug", "OpSys-All"]);
    }
}
