//! The classify → number → group → render pipeline.

use std::{collections::HashSet, num::NonZeroUsize, thread};

use serde::Serialize;

use crate::{
    chapters::{Chapter, split_chapters},
    classify::{ClassifierRules, classify_all_with_body_size, signals::body_font_size},
    config::EngineConfig,
    error::{ConfigurationError, ConvertError, InputContractViolation},
    group::group,
    models::{RawBlock, TableId},
    numbering::{HeadingCounters, number},
    render::render,
    warnings::StructuralWarning,
};

/// Highest list nesting level a source document can express.
pub const MAX_LIST_LEVEL: u8 = 8;

/// Result of converting one chapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterOutput {
    pub title: Option<String>,
    pub markdown: String,
    /// Counters after the last heading, for seeding the chapter that follows.
    pub counters: HeadingCounters,
    pub warnings: Vec<StructuralWarning>,
}

/// Validated engine settings, ready to convert any number of chapters.
#[derive(Debug, Clone)]
pub struct Converter {
    config: EngineConfig,
    rules: ClassifierRules,
}

impl Converter {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let rules = ClassifierRules::new(&config);
        Ok(Self { config, rules })
    }

    /// Converts `blocks` as a single chapter seeded from the configuration.
    pub fn convert(&self, blocks: &[RawBlock]) -> Result<ChapterOutput, InputContractViolation> {
        self.convert_chapter(blocks, self.config.chapter_seed)
    }

    pub fn convert_chapter(
        &self,
        blocks: &[RawBlock],
        chapter_seed: u32,
    ) -> Result<ChapterOutput, InputContractViolation> {
        self.convert_measured(blocks, chapter_seed, body_font_size(blocks))
    }

    fn convert_measured(
        &self,
        blocks: &[RawBlock],
        chapter_seed: u32,
        body_font_size: Option<f64>,
    ) -> Result<ChapterOutput, InputContractViolation> {
        validate_input(blocks)?;

        let mut warnings = vec![];
        let mut classified = classify_all_with_body_size(blocks, &self.rules, body_font_size);
        let counters = number(&mut classified, chapter_seed, &mut warnings);
        let nodes = group(classified, &mut warnings);
        let markdown = render(&nodes);

        log::debug!(
            "converted chapter seeded {chapter_seed}: {} block(s) -> {} node(s), {} warning(s)",
            blocks.len(),
            nodes.len(),
            warnings.len()
        );

        Ok(ChapterOutput {
            title: None,
            markdown,
            counters,
            warnings,
        })
    }

    /// Splits a whole document at its level-1 headings.
    pub fn split_chapters<'a>(&self, blocks: &'a [RawBlock]) -> Vec<Chapter<'a>> {
        split_chapters(blocks, &self.rules, self.config.chapter_seed)
    }

    /// Converts independent chapters concurrently. Results keep chapter order, and a chapter
    /// that violates the input contract fails alone.
    pub fn convert_chapters(
        &self,
        chapters: &[Chapter<'_>],
    ) -> Vec<Result<ChapterOutput, ConvertError>> {
        if chapters.is_empty() {
            return vec![];
        }
        let workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        let per_worker = chapters.len().div_ceil(workers);

        thread::scope(|scope| {
            let handles: Vec<_> = chapters
                .chunks(per_worker)
                .enumerate()
                .map(|(chunk, batch)| {
                    scope.spawn(move || {
                        batch
                            .iter()
                            .enumerate()
                            .map(|(offset, chapter)| {
                                self.convert_one(chunk * per_worker + offset, chapter)
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(results) => results,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }

    /// Splits `blocks` into chapters and converts them all.
    pub fn convert_document(
        &self,
        blocks: &[RawBlock],
    ) -> Vec<Result<ChapterOutput, ConvertError>> {
        self.convert_chapters(&self.split_chapters(blocks))
    }

    fn convert_one(
        &self,
        index: usize,
        chapter: &Chapter<'_>,
    ) -> Result<ChapterOutput, ConvertError> {
        let mut output = self
            .convert_measured(chapter.blocks, chapter.seed, chapter.body_font_size)
            .map_err(|source| ConvertError::Input {
                chapter: index,
                source,
            })?;
        output.title = chapter.title.clone();
        Ok(output)
    }
}

/// Checks the extractor's guarantees: each table's rows are contiguous and list levels are
/// within range.
pub fn validate_input(blocks: &[RawBlock]) -> Result<(), InputContractViolation> {
    let mut finished: HashSet<TableId> = HashSet::new();
    let mut open: Option<TableId> = None;

    for (index, block) in blocks.iter().enumerate() {
        if let Some(list) = &block.list_info
            && list.level > MAX_LIST_LEVEL
        {
            return Err(InputContractViolation::ListLevelOutOfRange {
                index,
                level: list.level,
            });
        }

        let table = if block.is_table_row {
            block.table_id
        } else {
            None
        };
        if table == open {
            continue;
        }
        if let Some(closed) = open.take() {
            finished.insert(closed);
        }
        if let Some(id) = table {
            if finished.contains(&id) {
                return Err(InputContractViolation::NonContiguousTable { table: id, index });
            }
            open = Some(id);
        }
    }

    Ok(())
}
