//! refdocs - render API reference pages from extracted doc-entry JSON
//!
//! ```text
//! refdocs [--standalone] [--stylesheet <href>] <param-file>
//! ```
//!
//! The parameter file names the input JSON files (line 1, comma
//! separated) and the output directory (line 2).

mod render;

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
refdocs - render API reference pages from doc-entry JSON

USAGE:
    refdocs [OPTIONS] <param-file>

ARGS:
    <param-file>    Line 1: comma-separated input JSON files
                    Line 2: output directory

OPTIONS:
    --standalone           Wrap each page in a complete HTML document
    --stylesheet <href>    Stylesheet linked from standalone pages
    -h, --help             Print this help

ENVIRONMENT:
    REFDOCS_LOG            Log filter (default: info)";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match RenderCommand::parse(&args) {
        Ok(Some(cmd)) => cmd,
        Ok(None) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_env("REFDOCS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match run(&cmd) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cmd: &RenderCommand) -> Result<bool> {
    // Only the highlighter setup is async, a single thread is enough
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;
    let _guard = rt.enter();

    render::run(cmd, &rt)
}

/// Parsed command line
pub(crate) struct RenderCommand {
    /// Parameter file path
    pub param_file: PathBuf,
    /// Emit complete HTML documents instead of fragments
    pub standalone: bool,
    /// Stylesheet href for standalone pages
    pub stylesheet: Option<String>,
}

impl RenderCommand {
    /// Parse arguments. `None` means help was requested.
    fn parse(args: &[String]) -> Result<Option<Self>> {
        let mut param_file = None;
        let mut standalone = false;
        let mut stylesheet = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--help" | "-h" => return Ok(None),
                "--standalone" => {
                    standalone = true;
                    i += 1;
                }
                "--stylesheet" => {
                    if i + 1 < args.len() {
                        stylesheet = Some(args[i + 1].clone());
                        i += 2;
                    } else {
                        bail!("--stylesheet requires a value");
                    }
                }
                arg if !arg.starts_with('-') => {
                    if param_file.is_some() {
                        bail!("Unexpected argument: {}", arg);
                    }
                    param_file = Some(PathBuf::from(arg));
                    i += 1;
                }
                _ => {
                    bail!("Unknown flag: {}", args[i]);
                }
            }
        }

        let Some(param_file) = param_file else {
            bail!("missing <param-file> argument");
        };

        Ok(Some(Self {
            param_file,
            standalone,
            stylesheet,
        }))
    }
}
