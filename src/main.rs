//! # Quill - Highlighted, Virtualized Code Rendering
//!
//! Renders a source file to the HTML fragment the editor would place in the
//! page, for inspection and benchmarking.
//!
//! ## Quick Start
//!
//! ```bash
//! # Render a file
//! cargo run -- path/to/app.js
//!
//! # Render the window around line 5000, highlighting "fetch"
//! cargo run -- big.js --line 5000 --search fetch --current 2
//!
//! # Show cache and viewport statistics
//! cargo run -- big.js --stats -v
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quill_buffer::TextBuffer;
use quill_render::{Fragment, Overlay, RenderConfig, RenderCoordinator, SearchMatch};
use quill_syntax::LanguageKind;

/// Quill - render a source file as highlighted HTML
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to render
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Language identifier (detected from the extension if omitted)
    #[arg(short, long, value_name = "ID")]
    language: Option<String>,

    /// Scroll offset in pixels
    #[arg(long, value_name = "PX", allow_negative_numbers = true)]
    scroll: Option<f64>,

    /// Viewport height in pixels
    #[arg(long, value_name = "PX", allow_negative_numbers = true)]
    height: Option<f64>,

    /// Highlight occurrences of TEXT
    #[arg(short, long, value_name = "TEXT")]
    search: Option<String>,

    /// Index of the current search match
    #[arg(long, value_name = "N", default_value_t = 0)]
    current: usize,

    /// Centre the viewport on line N (0-based)
    #[arg(long, value_name = "N")]
    line: Option<usize>,

    /// Print cache and viewport statistics as JSON to stderr
    #[arg(long)]
    stats: bool,

    /// Render config file (defaults to the user config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Everything one invocation produces.
struct Output {
    fragment: Fragment,
    stats: serde_json::Value,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Quill v{}", env!("CARGO_PKG_VERSION"));

    let output = run(&args)?;

    println!("{}", output.fragment.html);
    if args.stats {
        eprintln!("{}", serde_json::to_string_pretty(&output.stats)?);
    }

    Ok(())
}

fn run(args: &Args) -> anyhow::Result<Output> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => RenderConfig::load(),
    };
    if let Some(height) = args.height {
        config.container_height = height;
    }

    let buffer = TextBuffer::from_file(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let language = match args.language.as_deref() {
        Some(id) => LanguageKind::from_id(Some(id)),
        None => LanguageKind::detect(&args.file),
    };
    tracing::info!(%language, lines = buffer.len_lines(), "Rendering {}", args.file.display());

    let coordinator = RenderCoordinator::new(&config)?;
    coordinator.attach(&buffer, language);

    if let Some(scroll) = args.scroll {
        coordinator.set_scroll_offset(scroll)?;
    }
    if let Some(line) = args.line {
        coordinator.scroll_to_line(line);
    }

    let overlay = args.search.as_deref().map(|pattern| {
        let matches: Vec<SearchMatch> = buffer
            .find_matches(pattern)
            .into_iter()
            .map(SearchMatch::from)
            .collect();
        tracing::info!(count = matches.len(), "Search matches for {:?}", pattern);
        Overlay::new(matches, Some(args.current))
    });

    let fragment = coordinator
        .render(&buffer, overlay.as_ref())?
        .into_fragment()
        .context("Render was skipped")?;

    let stats = serde_json::json!({
        "language": language,
        "mode": fragment.mode,
        "window": fragment.window,
        "cache": coordinator.cache_stats(),
        "viewport": coordinator.viewport_stats(),
    });

    Ok(Output { fragment, stats })
}
