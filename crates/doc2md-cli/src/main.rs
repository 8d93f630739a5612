use anyhow::{Context, Result, bail};
use clap::Parser;
use doc2md_config::Config;
use doc2md_engine::{ChapterOutput, ConvertError, Converter, RawBlock};
use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(name = "doc2md", version, about = "Convert extracted document blocks to Markdown")]
struct Cli {
    /// JSON file holding the extracted blocks, or `-` for stdin
    input: PathBuf,

    /// Config file to use instead of ~/.config/doc2md/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of the (first) chapter, overriding the config file
    #[arg(short, long)]
    seed: Option<u32>,

    /// Split the document into one file per level-1 heading
    #[arg(long)]
    split_chapters: bool,

    /// Output file, or directory when splitting. Defaults to stdout / the configured output_dir
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the default configuration to the config path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    if cli.init_config {
        Config::default()
            .save_to_path(&config_path)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
        log::info!("Wrote default config to {}", config_path.display());
        return Ok(());
    }

    let mut config = Config::load_from_path(&config_path)?.unwrap_or_default();
    if let Some(seed) = cli.seed {
        config.conversion.chapter_seed = seed;
    }

    let blocks = read_blocks(&cli.input)?;
    log::info!("Read {} block(s) from {}", blocks.len(), cli.input.display());

    let converter = Converter::new(config.conversion.clone())?;

    if cli.split_chapters {
        let Some(dir) = cli.output.or(config.output_dir) else {
            bail!("--split-chapters needs --output <dir> or output_dir in the config file");
        };
        write_chapters(&dir, converter.convert_document(&blocks))
    } else {
        let output = converter
            .convert(&blocks)
            .context("Input violates the extractor contract")?;
        report_warnings(&output);
        match cli.output {
            Some(path) => fs::write(&path, &output.markdown)
                .with_context(|| format!("Failed to write {}", path.display())),
            None => io::stdout()
                .write_all(output.markdown.as_bytes())
                .context("Failed to write to stdout"),
        }
    }
}

fn read_blocks(input: &Path) -> Result<Vec<RawBlock>> {
    let json = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))?
    };
    serde_json::from_str(&json).with_context(|| format!("Invalid block JSON in {}", input.display()))
}

fn write_chapters(dir: &Path, results: Vec<Result<ChapterOutput, ConvertError>>) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut failed = 0;
    for (index, result) in results.into_iter().enumerate() {
        let output = match result {
            Ok(output) => output,
            Err(e) => {
                log::error!("{e}");
                failed += 1;
                continue;
            }
        };
        report_warnings(&output);

        let path = dir.join(chapter_file_name(index, &output));
        fs::write(&path, &output.markdown)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote {}", path.display());
    }

    if failed > 0 {
        bail!("{failed} chapter(s) could not be converted");
    }
    Ok(())
}

fn report_warnings(output: &ChapterOutput) {
    let chapter = output.title.as_deref().unwrap_or("document");
    for warning in &output.warnings {
        log::warn!("{chapter}: {warning}");
    }
}

/// `<number>.<slug>.md`, numbered by position since the preamble shares its seed.
fn chapter_file_name(index: usize, output: &ChapterOutput) -> String {
    let slug = output.title.as_deref().map(slugify).unwrap_or_default();
    let slug = if slug.is_empty() {
        if output.title.is_none() { "preamble" } else { "chapter" }.to_string()
    } else {
        slug
    };
    format!("{index:02}.{slug}.md")
}

fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc2md_engine::{EngineConfig, Run};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn slugs_keep_ascii_words() {
        assert_eq!(slugify("Installation & Setup"), "installation-setup");
        assert_eq!(slugify("Общие сведения"), "");
    }

    #[test]
    fn chapters_are_written_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let blocks = vec![
            RawBlock::paragraph(vec![Run::plain("Front matter.")]),
            RawBlock::styled("Heading 1", vec![Run::plain("Getting Started")]),
            RawBlock::styled("Heading 1", vec![Run::plain("Общие сведения")]),
        ];
        let converter = Converter::new(EngineConfig::default()).unwrap();

        write_chapters(temp_dir.path(), converter.convert_document(&blocks)).unwrap();

        let mut names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["00.preamble.md", "01.getting-started.md", "02.chapter.md"]
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("01.getting-started.md")).unwrap(),
            "# 1 Getting Started\n"
        );
    }

    #[test]
    fn reads_blocks_from_json() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("blocks.json");
        fs::write(
            &input,
            r#"[{"style_name": "Heading 2", "runs": [{"text": "Intro"}]}, {"runs": [{"text": "Body.", "italic": true}]}]"#,
        )
        .unwrap();

        let blocks = read_blocks(&input).unwrap();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].runs, vec![Run::italic("Body.")]);
    }
}
