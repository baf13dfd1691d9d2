//! TAS CLI
//!
//! Usage:
//!   tas --text "your text here"                 # Single analysis
//!   tas --interactive                           # One message per line
//!   tas --serve                                 # HTTP API server
//!   tas --text "text" --json                    # JSON output
//!   tas --text "text" --history '{"gym":["T1","T4"]}'

use clap::Parser;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use tas::core::{run_server, Analyzer};
use tas::types::AnalysisOutput;
use tas::{TasConfig, TasError, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "tas",
    version = VERSION,
    about = "Tense-as-Signal Analyzer - psychological tense, hedging and temporal profile",
    long_about = "TAS reads a message sentence by sentence and reports, for each one,\n\
                  which of 12 psychological tense classes fits best, how hedged the\n\
                  claim is, and how it shifts the speaker's Zimbardo time perspective.\n\
                  Given per-topic tense histories it also reports migration events.\n\n\
                  Modes:\n  \
                  --text         Analyze one message\n  \
                  --interactive  Analyze one message per stdin line\n  \
                  --serve        HTTP API server mode\n\n\
                  Logging goes to stderr and follows RUST_LOG."
)]
struct Args {
    /// Message to analyze (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - read messages from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Topic histories: inline JSON object or path to a JSON file
    #[arg(long)]
    history: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show the score breakdown of every sentence
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = run(&args).await {
        eprintln!("{} [{}] {}", "error:".red().bold(), err.code(), err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "tas=debug" } else { "tas=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

async fn run(args: &Args) -> Result<(), TasError> {
    let config = match &args.config {
        Some(path) => TasConfig::load(path)?,
        None => TasConfig::default(),
    };
    let history = load_history(args.history.as_deref())?;
    let analyzer = Analyzer::new(config)?;

    if args.serve {
        if let Err(err) = run_server(&args.addr, Arc::new(analyzer)).await {
            eprintln!("{} {}", "server error:".red().bold(), err);
            std::process::exit(1);
        }
        Ok(())
    } else if args.interactive {
        run_interactive(&analyzer, &history, args)
    } else if let Some(ref text) = args.text {
        run_single(&analyzer, text, &history, args)
    } else {
        // Default to interactive if no mode specified
        run_interactive(&analyzer, &history, args)
    }
}

/// Inline JSON if it starts with '{', otherwise a file path
fn load_history(arg: Option<&str>) -> Result<BTreeMap<String, Vec<String>>, TasError> {
    let Some(arg) = arg else {
        return Ok(BTreeMap::new());
    };
    let raw = if arg.trim_start().starts_with('{') {
        arg.to_string()
    } else {
        std::fs::read_to_string(arg)?
    };
    serde_json::from_str(&raw).map_err(|e| TasError::InvalidConfig {
        message: format!("history must be a JSON object of label lists: {}", e),
    })
}

/// Analyze one message
fn run_single(
    analyzer: &Analyzer,
    text: &str,
    history: &BTreeMap<String, Vec<String>>,
    args: &Args,
) -> Result<(), TasError> {
    let output = analyzer.analyze(text, history)?;
    print_output(analyzer, &output, args);
    Ok(())
}

/// Analyze stdin line by line
fn run_interactive(
    analyzer: &Analyzer,
    history: &BTreeMap<String, Vec<String>>,
    args: &Args,
) -> Result<(), TasError> {
    print_header("Interactive", args.no_color);
    println!("Type a message and press Enter. Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut analyzed = 0usize;

    loop {
        print!("{} ", ">".bold());
        stdout.flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Messages analyzed: {}", analyzed);
            break;
        }
        if line.is_empty() {
            continue;
        }

        if analyze_line(analyzer, line, history, args) {
            analyzed += 1;
        }
        println!();
    }
    Ok(())
}

/// One interactive message; a failure is reported and the session goes on
fn analyze_line(
    analyzer: &Analyzer,
    line: &str,
    history: &BTreeMap<String, Vec<String>>,
    args: &Args,
) -> bool {
    match analyzer.analyze(line, history) {
        Ok(output) => {
            print_output(analyzer, &output, args);
            true
        }
        Err(err) => {
            eprintln!("{} [{}] {}", "error:".red().bold(), err.code(), err);
            false
        }
    }
}

fn print_output(analyzer: &Analyzer, output: &AnalysisOutput, args: &Args) {
    if args.json {
        match serde_json::to_string_pretty(output) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
        }
        return;
    }

    if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }

    if args.verbose {
        println!();
        for sentence in &output.sentences {
            let run = analyzer.run_sentence(&sentence.text);
            println!("{}", analyzer.classifier().explain(&run.classification));
            if !run.hedge.multipliers.is_empty() {
                println!(
                    "Hedge chain: {:?} boosters={:?}",
                    run.hedge.multipliers, run.hedge.boosters
                );
            }
        }
    }
}

fn print_header(mode: &str, no_color: bool) {
    let title = format!("  TAS v{} - {}", VERSION, mode);
    if no_color {
        println!("========================================");
        println!("{}", title);
        println!("========================================");
    } else {
        println!("{}", "========================================".bold());
        println!("{}", title.bold());
        println!("{}", "========================================".bold());
    }
    println!();
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;
    use tas::core::{Annotator, RuleAnnotator};
    use tas::types::Annotation;
    use tas::TasResult;

    struct SlowAnnotator;

    impl Annotator for SlowAnnotator {
        fn annotate(&self, sentence: &str) -> TasResult<Annotation> {
            sleep(Duration::from_millis(20));
            RuleAnnotator::new().annotate(sentence)
        }
    }

    #[test]
    fn test_interactive_line_survives_timeout() {
        let args = Args::parse_from(["tas", "--no-color"]);
        let mut config = TasConfig::default();
        config.analyzer.message_timeout_ms = Some(1);
        let slow = Analyzer::with_annotator(config, Arc::new(SlowAnnotator)).unwrap();
        assert!(!analyze_line(&slow, "I run. I swim.", &BTreeMap::new(), &args));

        let analyzer = Analyzer::new(TasConfig::default()).unwrap();
        assert!(analyze_line(&analyzer, "I run.", &BTreeMap::new(), &args));
    }
}
