pub mod classified;
pub mod raw;
pub mod tree;

pub use classified::{ClassifiedBlock, DottedNumber};
pub use raw::{ListInfo, RawBlock, Run, TableId};
pub use tree::{Alignment, CodeBlock, DocumentNode, ListGroup, ListNode, TableCell, TableGrid};
