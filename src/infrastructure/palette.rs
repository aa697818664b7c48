// Theme palette - Named visualization colors
use crate::application::color_resolver::ColorResolver;
use std::collections::HashMap;

const BASE_COLORS: [(&str, &str); 10] = [
    ("green", "#73BF69"),
    ("red", "#F2495C"),
    ("orange", "#FF9830"),
    ("yellow", "#FADE2A"),
    ("blue", "#5794F2"),
    ("purple", "#B877D9"),
    ("dark-green", "#37872D"),
    ("dark-red", "#C4162A"),
    ("dark-orange", "#FA6400"),
    ("dark-blue", "#1F60C4"),
];

#[derive(Debug, Clone)]
pub struct ThemePalette {
    colors: HashMap<String, String>,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl ThemePalette {
    /// Base palette with `overrides` applied on top
    pub fn new(overrides: HashMap<String, String>) -> Self {
        let mut colors: HashMap<String, String> = BASE_COLORS
            .iter()
            .map(|(name, hex)| (name.to_string(), hex.to_string()))
            .collect();
        colors.extend(
            overrides
                .into_iter()
                .map(|(name, color)| (name.to_ascii_lowercase(), color)),
        );
        Self { colors }
    }
}

impl ColorResolver for ThemePalette {
    fn resolve(&self, name: &str) -> String {
        self.colors
            .get(&name.trim().to_ascii_lowercase())
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}
