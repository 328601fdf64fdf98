//! docsplit CLI - Split markdown documents into overlapping chunks.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use docsplit_chunk::RecursiveChunker;
use docsplit_core::{Acquirer, Chunk, DocsplitConfig, Metadata, SeparatorPreset};
use docsplit_service::{LoadRequest, LoadService};
use docsplit_source::{CommandAcquirer, FsDocumentSource, NoopAcquirer};

/// docsplit - Recursive, boundary-aware document chunking
#[derive(Parser)]
#[command(name = "docsplit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/docsplit/config.toml, then ./docsplit.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a local file into chunks
    Split {
        /// File to split, or `-` for stdin
        path: PathBuf,

        /// Maximum chunk size in characters
        #[arg(short, long)]
        max_size: Option<usize>,

        /// Characters shared between adjacent chunks
        #[arg(short, long)]
        overlap: Option<usize>,

        /// Separator hierarchy
        #[arg(short, long, value_enum)]
        preset: Option<PresetArg>,

        /// Metadata attached to every chunk
        #[arg(long = "meta", value_name = "KEY=VALUE", value_parser = parse_meta)]
        meta: Vec<(String, String)>,

        /// Print chunks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Acquire, fetch and chunk a document by URL
    Load {
        /// Document identifier
        url: String,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Markdown,
    Text,
}

impl From<PresetArg> for SeparatorPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Markdown => SeparatorPreset::Markdown,
            PresetArg::Text => SeparatorPreset::Text,
        }
    }
}

fn parse_meta(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

fn load_config(path: Option<&Path>) -> docsplit_core::Result<DocsplitConfig> {
    match path {
        Some(path) => DocsplitConfig::load(path),
        None => DocsplitConfig::load_default(),
    }
}

fn setup_logging(verbose: bool, level: &str) {
    let level = if verbose {
        Level::DEBUG
    } else {
        level.parse().unwrap_or(Level::WARN)
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    setup_logging(cli.verbose, &config.logging.level);

    match cli.command {
        Commands::Split {
            path,
            max_size,
            overlap,
            preset,
            meta,
            json,
        } => {
            if let Some(max_size) = max_size {
                config.chunking.max_size = max_size;
            }
            if let Some(overlap) = overlap {
                config.chunking.overlap = overlap;
            }
            if let Some(preset) = preset {
                config.chunking.preset = preset.into();
                config.chunking.separators = None;
            }
            split(&config, &path, meta, json)?;
        }
        Commands::Load { url } => {
            load(&config, url).await?;
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> std::io::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
    }
}

fn split(
    config: &DocsplitConfig,
    path: &Path,
    meta: Vec<(String, String)>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let chunker = match RecursiveChunker::from_config(&config.chunking) {
        Ok(chunker) => chunker,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let text = read_input(path)?;
    debug!("Read {} bytes from {}", text.len(), path.display());

    let metadata: Metadata = meta
        .into_iter()
        .map(|(key, value)| (key, serde_json::Value::String(value)))
        .collect();

    let chunks = chunker.chunk_text(&text, &metadata);

    if json {
        println!("{}", serde_json::to_string_pretty(&chunks)?);
    } else {
        print_chunks(&chunks);
    }

    Ok(())
}

fn print_chunks(chunks: &[Chunk]) {
    if chunks.is_empty() {
        println!("No chunks produced.");
        return;
    }

    for (i, chunk) in chunks.iter().enumerate() {
        println!(
            "--- chunk {} (offset {}, {} chars, overlap {}) ---",
            i + 1,
            chunk.start,
            chunk.content.chars().count(),
            chunk.overlap
        );
        println!("{}", chunk.content);
    }

    println!("\n{} chunks", chunks.len());
}

async fn load(config: &DocsplitConfig, url: String) -> Result<(), Box<dyn std::error::Error>> {
    let source = Arc::new(FsDocumentSource::from_config(&config.source));
    let acquirer: Arc<dyn Acquirer> = match CommandAcquirer::from_config(&config.acquisition)? {
        Some(command) => Arc::new(command),
        None => Arc::new(NoopAcquirer),
    };

    let service = LoadService::from_config(config, source, acquirer)?;
    let response = service.handle(LoadRequest::new(url)).await;

    println!("{}", serde_json::to_string_pretty(&response)?);
    if !response.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meta() {
        assert_eq!(
            parse_meta("source=guide.md").unwrap(),
            ("source".to_string(), "guide.md".to_string())
        );
        assert_eq!(
            parse_meta("query=a=b").unwrap(),
            ("query".to_string(), "a=b".to_string())
        );
        assert!(parse_meta("novalue").is_err());
        assert!(parse_meta("=x").is_err());
    }

    #[test]
    fn test_cli_parses_split() {
        let cli = Cli::try_parse_from([
            "docsplit",
            "split",
            "notes.md",
            "--max-size",
            "200",
            "--overlap",
            "20",
            "--preset",
            "text",
            "--meta",
            "source=notes",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Split {
                max_size,
                overlap,
                preset,
                meta,
                json,
                ..
            } => {
                assert_eq!(max_size, Some(200));
                assert_eq!(overlap, Some(20));
                assert!(matches!(preset, Some(PresetArg::Text)));
                assert_eq!(meta.len(), 1);
                assert!(json);
            }
            _ => panic!("expected split"),
        }
    }

    #[test]
    fn test_cli_requires_load_url() {
        assert!(Cli::try_parse_from(["docsplit", "load"]).is_err());
    }
}
