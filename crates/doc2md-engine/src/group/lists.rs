use crate::{
    models::{ClassifiedBlock, DocumentNode, ListGroup, ListNode, Run},
    warnings::StructuralWarning,
};

/// Nodes still open for children, outermost first. `open[i]` sits at depth `i`.
#[derive(Debug, Default)]
struct ListBuilder {
    roots: Vec<ListNode>,
    open: Vec<ListNode>,
}

impl ListBuilder {
    fn push(
        &mut self,
        ordered: bool,
        level: u8,
        runs: Vec<Run>,
        warnings: &mut Vec<StructuralWarning>,
    ) {
        // An item may sit at most one level below the previous one.
        let max_depth = self.open.len();
        let depth = usize::from(level).min(max_depth);
        if depth < usize::from(level) {
            warnings.push(StructuralWarning::ListLevelClamped {
                from: level,
                to: depth as u8,
            });
        }

        self.close_to(depth);
        self.open.push(ListNode {
            ordered,
            runs,
            children: vec![],
        });
    }

    fn close_to(&mut self, depth: usize) {
        while self.open.len() > depth {
            let Some(node) = self.open.pop() else {
                break;
            };
            match self.open.last_mut() {
                Some(parent) => parent.children.push(node),
                None => self.roots.push(node),
            }
        }
    }

    fn finish(mut self) -> ListGroup {
        self.close_to(0);
        ListGroup { items: self.roots }
    }
}

/// Folds every run of consecutive list items into one [`DocumentNode::List`].
///
/// Nesting follows the item levels, except that an item is never more than one level deeper
/// than the item before it; deeper items are pulled up and reported.
pub fn group_lists(
    nodes: Vec<DocumentNode>,
    warnings: &mut Vec<StructuralWarning>,
) -> Vec<DocumentNode> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut current: Option<ListBuilder> = None;

    for node in nodes {
        match node {
            DocumentNode::Block(ClassifiedBlock::ListItem {
                ordered,
                level,
                runs,
            }) => {
                current
                    .get_or_insert_with(ListBuilder::default)
                    .push(ordered, level, runs, warnings);
            }
            other => {
                if let Some(list) = current.take() {
                    out.push(DocumentNode::List(list.finish()));
                }
                out.push(other);
            }
        }
    }
    if let Some(list) = current.take() {
        out.push(DocumentNode::List(list.finish()));
    }

    out
}
