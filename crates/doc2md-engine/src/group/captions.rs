use crate::models::{ClassifiedBlock, DocumentNode};

/// Moves captions onto the table they describe.
///
/// A caption right after a table belongs to it. Otherwise a caption right before a table
/// belongs to the table that follows. Captions next to no table stay where they are.
pub fn attach_captions(nodes: Vec<DocumentNode>) -> Vec<DocumentNode> {
    let mut out: Vec<DocumentNode> = Vec::with_capacity(nodes.len());
    let mut pending: Option<String> = None;
    let mut iter = nodes.into_iter().peekable();

    while let Some(node) = iter.next() {
        match node {
            DocumentNode::Block(ClassifiedBlock::Caption { text }) => {
                if let Some(DocumentNode::Table(grid)) = out.last_mut()
                    && grid.caption.is_none()
                {
                    grid.caption = Some(text);
                } else if matches!(iter.peek(), Some(DocumentNode::Table(_))) {
                    pending = Some(text);
                } else {
                    out.push(DocumentNode::Block(ClassifiedBlock::Caption { text }));
                }
            }
            DocumentNode::Table(mut grid) => {
                if let Some(text) = pending.take() {
                    grid.caption = Some(text);
                }
                out.push(DocumentNode::Table(grid));
            }
            other => out.push(other),
        }
    }

    out
}
