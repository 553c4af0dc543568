//! bbmark CLI - forum post to Markdown converter.

use bbmark::bbcode::{BbcodeReader, ReaderOptions};
use bbmark::markdown::{self, Rule};
use bbmark::xml::XmlReader;
use bbmark::{ConversionResult, ConvertOptions, Element, LookupTables, ParseError, Reader};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bbmark")]
#[command(author, version, about = "Convert forum posts to Markdown", long_about = None)]
struct Cli {
    /// Log conversion decisions (overrides BBMARK_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a post to Markdown
    Convert {
        /// Input file (use - for stdin)
        input: PathBuf,

        /// Output file (omit or use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input format (detected from the extension or content if not specified)
        #[arg(short, long)]
        format: Option<Format>,

        /// TOML or JSON file with [convert] options and [lookup] tables
        #[arg(long)]
        config: Option<PathBuf>,

        /// Render single-line code as inline code
        #[arg(long)]
        inline_code: bool,

        /// Spell every inserted line break as a backslash break
        #[arg(long)]
        traditional_linebreaks: bool,
    },

    /// List the tags the converter handles
    Tags,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum Format {
    Xml,
    Bbcode,
}

impl Format {
    fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "xml" => Some(Format::Xml),
            "bbcode" | "bb" | "txt" => Some(Format::Bbcode),
            _ => None,
        }
    }

    /// Stored posts always start with their root element.
    fn sniff(input: &str) -> Self {
        let start = input.trim_start();
        let stored = ["<?xml", "<r>", "<r ", "<t>", "<t ", "<t/>"]
            .iter()
            .any(|p| start.starts_with(p));
        if stored { Format::Xml } else { Format::Bbcode }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Contents of a `--config` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    convert: ConvertOptions,
    lookup: LookupTables,
}

impl Config {
    fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&text).map_err(|source| CliError::Json {
                path: path.to_path_buf(),
                source,
            })
        } else {
            toml::from_str(&text).map_err(|source| CliError::Toml {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("BBMARK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Convert {
            input,
            output,
            format,
            config,
            inline_code,
            traditional_linebreaks,
        } => {
            let mut config = match config {
                Some(path) => Config::load(&path)?,
                None => Config::default(),
            };
            if inline_code {
                config.convert.allow_inline_code = true;
            }
            if traditional_linebreaks {
                config.convert.traditional_linebreaks = true;
            }
            convert(&input, output.as_deref(), format, &config)?;
        }
        Commands::Tags => list_tags(),
    }

    Ok(())
}

fn convert(
    input: &Path,
    output: Option<&Path>,
    format: Option<Format>,
    config: &Config,
) -> Result<(), CliError> {
    let text = read_input(input)?;

    let format = format
        .or_else(|| {
            input
                .extension()
                .and_then(|e| e.to_str())
                .and_then(Format::from_extension)
        })
        .unwrap_or_else(|| Format::sniff(&text));
    tracing::debug!(?format, "reading input");

    let root = parse(&text, format, &config.lookup)?;
    let markdown = match markdown::convert(&root, &config.lookup, &config.convert) {
        Ok(markdown) => markdown,
        Err(never) => match never {},
    };

    match output {
        Some(path) if path.as_os_str() != "-" => {
            fs::write(path, markdown + "\n").map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        _ => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{markdown}")?;
        }
    }

    Ok(())
}

fn read_input(input: &Path) -> Result<String, CliError> {
    if input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    fs::read_to_string(input).map_err(|source| CliError::Read {
        path: input.to_path_buf(),
        source,
    })
}

fn parse(input: &str, format: Format, lookup: &LookupTables) -> Result<Element, CliError> {
    let result: ConversionResult<Element> = match format {
        Format::Xml => XmlReader.parse(input)?,
        Format::Bbcode => {
            // Smilie codes with a configured replacement are the ones worth tagging.
            let options = ReaderOptions::default().with_smilies(lookup.smilies.keys().cloned());
            BbcodeReader::new(options).parse(input)?
        }
    };

    for warning in &result.warnings {
        tracing::warn!(
            severity = ?warning.severity,
            offset = ?warning.offset,
            "{}",
            warning.message
        );
    }

    Ok(result.value)
}

fn list_tags() {
    println!("  {:12} OUTPUT", "TAG");
    println!("  {:12} ------", "---");

    for rule in Rule::ALL {
        println!("  {:12} {}", rule.tag_name(), rule.description());
    }
}
