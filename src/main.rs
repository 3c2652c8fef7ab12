//! styledown-decor - preview Styledown documents and transcripts in a terminal

use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use styledown_decor::error::{DecorError, Result};
use styledown_decor::{
    preview, render, scan, Config, DocumentId, DocumentKind, EditorId, EditorView, Orchestrator,
    StyleRegistry, TerminalPreview, TextDocument,
};

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    kind: Option<DocumentKind>,
    config: Option<PathBuf>,
    strict: bool,
    folds: bool,
    file: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut opts = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            "--kind" => {
                let name = iter
                    .next()
                    .ok_or_else(|| DecorError::Message("--kind needs a value".to_string()))?;
                let kind = DocumentKind::parse(name)
                    .ok_or_else(|| DecorError::Message(format!("unknown kind: {}", name)))?;
                opts.kind = Some(kind);
            }
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| DecorError::Message("--config needs a path".to_string()))?;
                opts.config = Some(PathBuf::from(path));
            }
            "--render" => opts.strict = true,
            "--folds" => opts.folds = true,
            _ if arg.starts_with('-') => {
                return Err(DecorError::Message(format!("unknown option: {}", arg)));
            }
            _ => opts.file = Some(PathBuf::from(arg)),
        }
    }

    let Some(path) = opts.file.clone() else {
        print_usage();
        return Err(DecorError::Message("no file given".to_string()));
    };

    let config = match &opts.config {
        Some(config_path) => Config::load_from(config_path)?,
        None => Config::load(),
    };

    if opts.strict {
        let source = std::fs::read_to_string(&path)?;
        let mut registry = StyleRegistry::new(config.theme.clone());
        let text = render::render(&source, &mut registry)?;
        return preview::write_styled_text(&mut io::stdout(), &text);
    }

    let doc = TextDocument::from_file(&path)?;
    let kind = opts.kind.or_else(|| config.kind_for_path(&path));
    if kind.is_none() {
        tracing::info!(path = %path.display(), "unknown document kind, showing undecorated");
    }

    if opts.folds {
        for (start, end) in scan::folding_ranges_for(kind, &doc) {
            println!("{}-{}", start + 1, end + 1);
        }
        return Ok(());
    }

    let editor = EditorId(1);
    let mut orchestrator = Orchestrator::new(config, TerminalPreview::new());
    orchestrator.active_editor_changed(Some(EditorView {
        editor,
        document: DocumentId(1),
        kind,
        text: &doc,
    }));
    orchestrator
        .host()
        .write_document(&mut io::stdout(), editor, &doc)?;
    orchestrator.shutdown();

    Ok(())
}

fn print_usage() {
    println!(
        "styledown-decor {} - preview Styledown documents and transcripts",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage: styledown-decor [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!("  --kind KIND        Treat FILE as 'plain' or 'transcript'");
    println!("  --config PATH      Read configuration from PATH");
    println!("  --render           Render strictly, reporting markup errors");
    println!("  --folds            Print the folding ranges of a plain FILE (1-based)");
    println!();
    println!("The document kind is taken from the file extension unless --kind");
    println!("is given. Set RUST_LOG=debug to trace render passes.");
}

fn print_version() {
    println!("styledown-decor {}", env!("CARGO_PKG_VERSION"));
}
