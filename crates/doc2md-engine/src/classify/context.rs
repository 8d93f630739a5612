use std::collections::BTreeMap;

use crate::{config::EngineConfig, models::ClassifiedBlock};

/// Classification settings prepared once from an [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct ClassifierRules {
    styles: BTreeMap<String, u8>,
    pub heading_length_threshold: usize,
    pub font_size_ratio: f64,
    pub caption_prefixes: Vec<String>,
    pub note_prefixes: Vec<String>,
}

impl ClassifierRules {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            styles: config.normalized_styles(),
            heading_length_threshold: config.heading_length_threshold,
            font_size_ratio: config.font_size_ratio,
            caption_prefixes: config.caption_prefixes.clone(),
            note_prefixes: config.note_prefixes.clone(),
        }
    }

    /// Level for an already normalized style name.
    pub fn style_level(&self, normalized: &str) -> Option<u8> {
        self.styles.get(normalized).copied()
    }
}

/// Everything the classifier may look at besides the block itself.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationContext<'a> {
    pub rules: &'a ClassifierRules,
    /// Median dominant font size of the surrounding chapter.
    pub body_font_size: Option<f64>,
    /// Classification of the block just before this one.
    pub previous: Option<&'a ClassifiedBlock>,
}
