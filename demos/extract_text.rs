//! Command-line tool printing the exam-paper text of Word files.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example extract_text -- paper.docx
//! RUST_LOG=debug cargo run --example extract_text -- paper.doc -o paper.txt
//! ```
//!
//! Layout settings can be read from a YAML file:
//!
//! ```sh
//! cargo run --example extract_text -- paper.docx --config layout.yaml
//! ```

use clap::Parser;
use longan::{Extractor, LayoutConfig};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Extract structure-preserving text from Word exam papers
#[derive(Parser, Debug)]
#[command(name = "extract_text", version)]
struct Args {
    /// Input .doc or .docx file(s)
    #[arg(value_name = "INPUT", required = true)]
    input: Vec<PathBuf>,

    /// Write the text here instead of stdout (single input only)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// YAML file with layout settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Width of underscore lines for blank paragraphs
    #[arg(long)]
    blank_width: Option<usize>,

    /// Put an empty line before and after every table
    #[arg(long)]
    separate_tables: bool,

    /// Print which strategy produced the text
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<LayoutConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => serde_saphyr::from_str(&fs::read_to_string(path)?)?,
        None => LayoutConfig::default(),
    };
    if let Some(width) = args.blank_width {
        config = config.with_blank_line_width(width);
    }
    if args.separate_tables {
        config = config.with_separate_tables(true);
    }
    Ok(config)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if args.output.is_some() && args.input.len() > 1 {
        eprintln!("--output takes a single input file");
        return ExitCode::FAILURE;
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        },
    };
    let extractor = Extractor::with_config(config);

    let mut failed = false;
    for path in &args.input {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let result = fs::read(path)
            .map_err(longan::Error::from)
            .and_then(|bytes| extractor.extract_detailed(&bytes, &name));

        match result {
            Ok(extraction) => {
                if args.verbose {
                    eprintln!("{}: extracted with {}", path.display(), extraction.strategy);
                }
                match &args.output {
                    Some(out) => {
                        if let Err(e) = fs::write(out, &extraction.text) {
                            eprintln!("Failed to write {}: {}", out.display(), e);
                            failed = true;
                        }
                    },
                    None => print!("{}", extraction.text),
                }
            },
            Err(e) => {
                eprintln!("{}: [{}] {}", path.display(), e.kind(), e);
                failed = true;
            },
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
