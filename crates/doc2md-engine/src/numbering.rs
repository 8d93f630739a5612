//! Chapter-relative heading numbers.
//!
//! Numbering is a left fold over the headings in document order. The state is an explicit
//! [`HeadingCounters`] value, so every chapter owns its own counters and chapters can be
//! numbered independently once seeded.
//!
//! The seed is the chapter's own number: the first heading of the chapter claims it, so with
//! seed 2 a leading level-1 heading is numbered `2` and its sections `2.1`, `2.2`, ... A seed
//! of 0 leaves the first level-1 heading to be counted as 1.

use serde::Serialize;

use crate::{
    models::{ClassifiedBlock, DottedNumber},
    warnings::StructuralWarning,
};

pub const MAX_LEVEL: usize = 6;

/// Per-level counters for levels 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeadingCounters {
    counters: [u32; MAX_LEVEL],
    seed_pending: bool,
    last_level: Option<u8>,
}

impl HeadingCounters {
    pub fn seeded(chapter_seed: u32) -> Self {
        Self {
            counters: [chapter_seed, 0, 0, 0, 0, 0],
            seed_pending: chapter_seed > 0,
            last_level: None,
        }
    }

    /// Current counter values, index 0 being level 1.
    pub fn values(&self) -> [u32; MAX_LEVEL] {
        self.counters
    }

    /// Seed for the chapter that follows this one.
    pub fn next_chapter_seed(&self) -> u32 {
        self.counters[0] + 1
    }

    /// Advances the counters for a heading at `level` and returns its number.
    ///
    /// Levels outside 1..=6 are clamped. Skipped intermediate levels are numbered from 1
    /// instead of being left at 0.
    pub fn advance(&mut self, level: u8) -> DottedNumber {
        let level = usize::from(level.clamp(1, MAX_LEVEL as u8));
        let idx = level - 1;

        if !(idx == 0 && self.seed_pending) {
            self.counters[idx] += 1;
        }
        self.seed_pending = false;

        for counter in &mut self.counters[..idx] {
            if *counter == 0 {
                *counter = 1;
            }
        }
        for counter in &mut self.counters[level..] {
            *counter = 0;
        }

        self.last_level = Some(level as u8);
        DottedNumber::new(self.counters[..level].to_vec())
    }

    /// Level of the most recent heading, if any.
    pub fn last_level(&self) -> Option<u8> {
        self.last_level
    }
}

/// Attaches numbers to every heading in `blocks`, leaving other blocks untouched.
///
/// Returns the final counters so the caller can seed the following chapter.
pub fn number(
    blocks: &mut [ClassifiedBlock],
    chapter_seed: u32,
    warnings: &mut Vec<StructuralWarning>,
) -> HeadingCounters {
    let mut counters = HeadingCounters::seeded(chapter_seed);

    for block in blocks.iter_mut() {
        let ClassifiedBlock::Heading {
            level,
            text,
            number,
        } = block
        else {
            continue;
        };

        if let Some(previous) = counters.last_level()
            && *level > previous + 1
        {
            warnings.push(StructuralWarning::HeadingLevelJump {
                heading: text.clone(),
                from: previous,
                to: *level,
            });
        }

        *number = Some(counters.advance(*level));
    }

    counters
}
