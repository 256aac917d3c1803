use std::env;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, bail};
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use amis_dict::report::{self, OutputFormat};
use amis_dict::source::{self, LineSource, LoadMode};
use amis_parser::LineParser;

const DEFAULT_INPUT: &str = "dictionary.txt";

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config()?;
    info!("reading {} (mode: {:?})", config.input.display(), config.mode);

    let start = Instant::now();
    let source = LineSource::load(&config.input, config.mode)?;
    let parser = LineParser::new();

    let stdout = std::io::stdout().lock();
    let mut out = BufWriter::new(stdout);

    let mut lines = 0usize;
    let mut entries = 0usize;
    let mut failures = 0usize;

    for (lineno, line) in source.lines().enumerate() {
        lines += 1;
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                if config.strict {
                    bail!("line {}: invalid UTF-8: {err}", lineno + 1);
                }
                warn!("line {}: skipping invalid UTF-8 ({err})", lineno + 1);
                failures += 1;
                continue;
            }
        };
        match parser.parse_line(line) {
            Ok(parsed) => {
                entries += parsed.len();
                report::write_entries(&mut out, &parsed, config.format)
                    .context("write entries")?;
            }
            Err(err) => {
                if config.strict {
                    return Err(err).with_context(|| format!("line {}", lineno + 1));
                }
                warn!("line {}: {err}", lineno + 1);
                failures += 1;
            }
        }
    }
    out.flush()?;

    info!(
        "parsed {} lines into {} entries ({} failures) in {} ms",
        lines,
        entries,
        failures,
        start.elapsed().as_millis()
    );
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    input: PathBuf,
    format: OutputFormat,
    mode: LoadMode,
    strict: bool,
}

fn load_config() -> anyhow::Result<Config> {
    let mut cli_input: Option<PathBuf> = None;
    let mut cli_format: Option<OutputFormat> = None;
    let mut cli_mode: Option<LoadMode> = None;
    let mut strict = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--strict" => strict = true,
            "--input" => cli_input = args.next().map(PathBuf::from),
            _ => {
                if let Some(path) = arg.strip_prefix("--input=") {
                    cli_input = Some(PathBuf::from(path));
                } else if let Some(format) = arg.strip_prefix("--format=") {
                    cli_format = Some(
                        report::parse_format(format)
                            .with_context(|| format!("unknown format {format:?}"))?,
                    );
                } else if let Some(mode) = arg.strip_prefix("--mode=") {
                    cli_mode = Some(
                        source::parse_load_mode(mode)
                            .with_context(|| format!("unknown load mode {mode:?}"))?,
                    );
                } else if arg.starts_with("--") {
                    bail!("unknown flag {arg:?}");
                } else {
                    cli_input = Some(PathBuf::from(arg));
                }
            }
        }
    }

    let input = cli_input
        .or_else(|| env::var("AMIS_INPUT").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    let format = cli_format
        .or_else(|| {
            env::var("AMIS_FORMAT")
                .ok()
                .as_deref()
                .and_then(report::parse_format)
        })
        .unwrap_or(OutputFormat::Text);
    let mode = cli_mode
        .or_else(|| {
            env::var("AMIS_LOAD_MODE")
                .ok()
                .as_deref()
                .and_then(source::parse_load_mode)
        })
        .unwrap_or(LoadMode::Mmap);

    Ok(Config {
        input,
        format,
        mode,
        strict,
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();
}
