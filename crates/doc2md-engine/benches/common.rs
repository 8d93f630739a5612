use doc2md_engine::{RawBlock, Run};

// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_chapter(sections: usize) -> Vec<RawBlock> {
    let mut blocks = vec![RawBlock::styled("Heading 1", vec![Run::plain("Overview")])];

    for section in 0..sections {
        blocks.push(RawBlock::paragraph(vec![
            Run::bold(format!("Section {section}")).with_size(16.0),
        ]));
        blocks.push(RawBlock::paragraph(vec![
            Run::plain("Some paragraph content with ").with_size(11.0),
            Run::italic("several").with_size(11.0),
            Run::plain(" runs. This helps create realistic structure.").with_size(11.0),
        ]));
        blocks.push(RawBlock::list_item(0, false, vec![Run::plain("First point")]));
        blocks.push(RawBlock::list_item(1, false, vec![Run::plain("Nested point")]));
        blocks.push(RawBlock::paragraph(vec![Run::mono("$ systemctl status app")]));
        blocks.push(RawBlock::paragraph(vec![Run::mono("$ journalctl -u app")]));
        for row in 0..4 {
            blocks.push(RawBlock::table_row(
                section as u32,
                vec![vec![Run::plain(format!("key{row}"))], vec![Run::plain("42")]],
            ));
        }
    }

    blocks
}

#[allow(dead_code)]
pub fn generate_document(chapters: usize, sections: usize) -> Vec<RawBlock> {
    (0..chapters).flat_map(|_| generate_chapter(sections)).collect()
}
