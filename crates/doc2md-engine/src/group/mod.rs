//! Grouping stages over classified blocks.
//!
//! Each stage is one forward pass that keeps the group under construction and flushes it when
//! a block of another kind arrives. The stages run in a fixed order: code first (it consumes
//! classified blocks), then lists, tables and finally caption attachment.

pub mod captions;
pub mod code;
pub mod lists;
pub mod tables;

pub use captions::attach_captions;
pub use code::{assemble, infer_language};
pub use lists::group_lists;
pub use tables::group_tables;

use crate::{
    models::{ClassifiedBlock, DocumentNode},
    warnings::StructuralWarning,
};

/// Runs every grouping stage and returns the document tree ready for rendering.
pub fn group(
    blocks: Vec<ClassifiedBlock>,
    warnings: &mut Vec<StructuralWarning>,
) -> Vec<DocumentNode> {
    let nodes = assemble(blocks, warnings);
    let nodes = group_lists(nodes, warnings);
    let nodes = group_tables(nodes, warnings);
    attach_captions(nodes)
}
