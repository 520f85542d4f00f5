use anyhow::{Context, Result};
use clap::Parser;
use file2txt::{archive, config::Config, Converter, ExtractorRegistry};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "file2txt")]
#[command(about = "Convert a tree of documents into sanitized plain-text files")]
#[command(version)]
struct Cli {
    /// Directory to convert
    #[arg(value_name = "INPUT_DIR")]
    input: PathBuf,

    /// Directory receiving the mirrored .txt files
    #[arg(value_name = "OUTPUT_DIR")]
    output: PathBuf,

    /// Bundle the converted files into a zip archive next to OUTPUT_DIR
    #[arg(long, value_name = "ARCHIVE", num_args = 0..=1)]
    zip: Option<Option<String>>,

    /// Skip files larger than this many bytes (overrides config)
    #[arg(long, value_name = "BYTES")]
    max_file_size: Option<u64>,

    /// Also convert hidden files and directories (overrides config)
    #[arg(long)]
    include_hidden: bool,

    /// Configuration file (defaults to file2txt.toml lookup)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "file2txt=info",
        1 => "file2txt=debug",
        _ => "file2txt=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load().context("Failed to load configuration")?,
    };
    if let Some(max_file_size) = cli.max_file_size {
        config.conversion.max_file_size = max_file_size;
    }
    if cli.include_hidden {
        config.conversion.skip_hidden = false;
    }

    let registry = ExtractorRegistry::detect(&config);
    let converter = Converter::new(config.conversion.clone(), registry);
    let summary = converter.convert_tree(&cli.input, &cli.output)?;

    println!(
        "Converted {} files ({} skipped, {} failed) into {}",
        summary.written.len(),
        summary.skipped.len(),
        summary.failed.len(),
        cli.output.display()
    );

    if let Some(name) = cli.zip {
        let name = name.unwrap_or_else(|| config.archive.name.clone());
        let archive_path =
            archive::zip_output_dir(&cli.output, &name, &config.conversion.output_extension)?;
        println!("Archive written to {}", archive_path.display());
    }

    Ok(())
}
