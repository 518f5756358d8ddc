use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use abcpack::{emit, translate_with_config, DedupTable, TranslatorConfig};

/// Compile an ABC tune into a compact note table.
///
/// Logging is controlled with RUST_LOG; see docs for the env_logger crate.
/// If RUST_LOG is not set, the level defaults to Warn, or Info/Debug with -v/-vv.
#[derive(Parser)]
#[command(version, about, long_about = None, verbatim_doc_comment)]
struct Cli {
    /// Input ABC file path
    input: PathBuf,

    /// Output file path (standard output if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output file format
    #[arg(value_enum, short, long, default_value_t = Format::Header)]
    format: Format,

    /// YAML file with translator settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail if any token had to be dropped
    #[arg(long)]
    strict: bool,

    /// Print more information (-v info, -vv debug)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy)]
enum Format {
    /// C header with lookup table and index list
    Header,
    /// YAML document
    Yaml,
    /// One note per line
    Notes,
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut log_builder = env_logger::builder();
    if std::env::var("RUST_LOG").is_err() {
        log_builder.filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        });
    }
    log_builder.init();

    let config = match &cli.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading config '{}'", path.display()))?;
            TranslatorConfig::from_yaml(&content)?
        }
        None => TranslatorConfig::default(),
    };

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading '{}'", cli.input.display()))?;

    let translation = translate_with_config(&source, &config)?;
    for diagnostic in &translation.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }
    if cli.strict && !translation.diagnostics.is_empty() {
        bail!(
            "{} token(s) could not be translated",
            translation.diagnostics.len()
        );
    }

    let song = &translation.song;
    let table = DedupTable::build(song);
    log::info!(
        "{} notes, {} distinct",
        table.indices.len(),
        table.distinct()
    );

    let text = match cli.format {
        Format::Header => emit::c_header(&table),
        Format::Yaml => emit::yaml(song, &table)?,
        Format::Notes => song
            .notes
            .iter()
            .enumerate()
            .map(|(i, note)| format!("note {}: t: {}, l: {}\n", i, note.pitch, note.length))
            .collect(),
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("writing '{}'", path.display()))?;
            eprintln!("Wrote {} to {}", describe(cli.format), path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}

fn describe(format: Format) -> &'static str {
    match format {
        Format::Header => "C header",
        Format::Yaml => "YAML",
        Format::Notes => "note listing",
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
