use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

pub const DEFAULT_HEADING_LENGTH_THRESHOLD: usize = 120;
pub const DEFAULT_FONT_SIZE_RATIO: f64 = 1.15;

/// Settings consumed by the classification engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Known paragraph style names and the heading level they stand for.
    pub style_to_level: BTreeMap<String, u8>,
    /// Texts at or above this many characters are never heuristic headings.
    pub heading_length_threshold: usize,
    /// How much larger than the body font a run must be to look like a heading.
    pub font_size_ratio: f64,
    /// Number of the chapter being converted. 0 means unnumbered.
    pub chapter_seed: u32,
    /// Paragraphs starting with one of these words followed by a number are captions.
    pub caption_prefixes: Vec<String>,
    /// Paragraphs starting with one of these words are rendered as notes.
    pub note_prefixes: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let mut style_to_level = BTreeMap::new();
        style_to_level.insert("Title".to_string(), 1);
        for level in 1..=6u8 {
            style_to_level.insert(format!("Heading {level}"), level);
            style_to_level.insert(format!("Заголовок {level}"), level);
        }

        Self {
            style_to_level,
            heading_length_threshold: DEFAULT_HEADING_LENGTH_THRESHOLD,
            font_size_ratio: DEFAULT_FONT_SIZE_RATIO,
            chapter_seed: 0,
            caption_prefixes: vec!["Table".to_string(), "Таблица".to_string()],
            note_prefixes: vec!["Note".to_string(), "Примечание".to_string()],
        }
    }
}

impl EngineConfig {
    /// Rejects settings that would make classification meaningless.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (style, &level) in &self.style_to_level {
            if normalize_style_name(style).is_empty() {
                return Err(ConfigurationError::EmptyStyleName);
            }
            if !(1..=6).contains(&level) {
                return Err(ConfigurationError::StyleLevelOutOfRange {
                    style: style.clone(),
                    level,
                });
            }
        }
        if self.heading_length_threshold == 0 {
            return Err(ConfigurationError::ZeroLengthThreshold);
        }
        if !self.font_size_ratio.is_finite() || self.font_size_ratio <= 0.0 {
            return Err(ConfigurationError::InvalidFontSizeRatio(self.font_size_ratio));
        }
        Ok(())
    }

    /// Style lookup table keyed by normalized style name.
    pub(crate) fn normalized_styles(&self) -> BTreeMap<String, u8> {
        self.style_to_level
            .iter()
            .map(|(name, level)| (normalize_style_name(name), *level))
            .collect()
    }
}

/// Lowercases and drops separators so `Heading1`, `heading 1` and `Heading_1` compare equal.
pub fn normalize_style_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    fn rejects_out_of_range_style_level(#[case] level: u8) {
        let mut config = EngineConfig::default();
        config.style_to_level.insert("Custom".into(), level);
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::StyleLevelOutOfRange {
                style: "Custom".into(),
                level
            })
        );
    }

    #[test]
    fn rejects_blank_style_name() {
        let mut config = EngineConfig::default();
        config.style_to_level.insert("  ".into(), 2);
        assert_eq!(config.validate(), Err(ConfigurationError::EmptyStyleName));
    }

    #[test]
    fn rejects_zero_threshold() {
        let config = EngineConfig {
            heading_length_threshold: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigurationError::ZeroLengthThreshold));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.2)]
    #[case(f64::NAN)]
    fn rejects_non_positive_ratio(#[case] ratio: f64) {
        let config = EngineConfig {
            font_size_ratio: ratio,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidFontSizeRatio(_))
        ));
    }

    #[rstest]
    #[case("Heading 1", "heading1")]
    #[case("Heading_2", "heading2")]
    #[case("Заголовок 3", "заголовок3")]
    fn normalizes_style_names(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_style_name(raw), expected);
    }
}
