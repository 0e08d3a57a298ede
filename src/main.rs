//! MELVA CLI
//!
//! Usage:
//!   melva --text "how do I voice a seventh chord?"   # Single turn
//!   melva --interactive                               # Chat in the terminal
//!   melva --serve                                     # HTTP API server
//!   melva --text "text" --json                        # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use melva::core::{run_server, GeneratorKind, ResponseGenerator};
use melva::types::{Context, Intent, TurnOutput};
use melva::{ConfigSource, TutorConfig, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "melva",
    version = VERSION,
    about = "MELVA - rule-based music tutor with per-session memory",
    long_about = "MELVA answers music practice questions with structured coaching.\n\n\
                  Each conversation keeps its own memory: topic depth, repetition,\n\
                  emotional state and any open diagnostic question.\n\n\
                  Modes:\n  \
                  --text         Answer one message\n  \
                  --interactive  Chat session (default)\n  \
                  --serve        HTTP API server mode\n\n\
                  Generators:\n  \
                  tutor      - Rule-based coaching engine (default)\n  \
                  knowledge  - Static music FAQ with topic templates"
)]
struct Args {
    /// Message to answer (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive chat - read lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (overrides [server] addr)
    #[arg(long)]
    addr: Option<String>,

    /// Learner genre (overrides [context] genre)
    #[arg(long)]
    genre: Option<String>,

    /// Learner level (overrides [context] level)
    #[arg(long)]
    level: Option<String>,

    /// Response generator: tutor or knowledge
    #[arg(long)]
    generator: Option<String>,

    /// Config file
    #[arg(long, default_value = "melva.toml")]
    config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show turn diagnostics
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let (mut config, source) = match TutorConfig::load_or_default(&args.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    init_tracing(&config.general.log_level);
    if source == ConfigSource::Defaults {
        tracing::warn!(path = %args.config.display(), "config file not found, using defaults");
    }

    if args.no_color {
        colored::control::set_override(false);
    }
    if let Err(e) = apply_overrides(&mut config, &args) {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }

    if args.serve {
        run_serve(&config).await;
    } else if args.interactive {
        run_interactive(&config, &args);
    } else if let Some(ref text) = args.text {
        run_single(text, &config, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&config, &args);
    }
}

/// RUST_LOG wins; otherwise the configured level
fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Fold CLI flags into the loaded config
fn apply_overrides(config: &mut TutorConfig, args: &Args) -> melva::Result<()> {
    if let Some(ref genre) = args.genre {
        config.context.genre = genre.clone();
    }
    if let Some(ref level) = args.level {
        config.context.level = level.clone();
    }
    if let Some(ref addr) = args.addr {
        config.server.addr = addr.clone();
    }
    if let Some(ref name) = args.generator {
        config.engine.generator = name.parse::<GeneratorKind>()?;
    }
    Ok(())
}

/// Answer a single message
fn run_single(text: &str, config: &TutorConfig, args: &Args) {
    let context = config.default_context();
    let mut generator = config.engine.generator.build();
    let reply = generator.generate_turn(text, &context);
    print_reply(&reply.text, reply.turn.as_ref(), args);
}

/// Run interactive chat
fn run_interactive(config: &TutorConfig, args: &Args) {
    let context = config.default_context();
    let mut generator = config.engine.generator.build();

    print_header(generator.as_ref(), &context);
    println!("Type a message and press Enter. Commands: /reset, /memory, quit");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", format_prompt(generator.as_ref()));
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            let turns = generator.memory().map(|m| m.turn).unwrap_or_default();
            println!("\nSession ended. Turns: {}", turns);
            break;
        }
        if line.is_empty() {
            continue;
        }
        if line == "/reset" {
            generator.reset();
            println!("{}", "Started a fresh session.".bright_black());
            continue;
        }
        if line == "/memory" {
            print_memory(generator.as_ref());
            continue;
        }

        let reply = generator.generate_turn(line, &context);
        print_reply(&reply.text, reply.turn.as_ref(), args);
        println!();
    }
}

/// Print one reply in the selected format
fn print_reply(text: &str, turn: Option<&TurnOutput>, args: &Args) {
    if args.json {
        let json = match turn {
            Some(turn) => serde_json::to_string_pretty(turn),
            None => serde_json::to_string_pretty(&serde_json::json!({ "response": text })),
        };
        match json {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {}", e),
        }
        return;
    }

    println!("{}", text);
    if let Some(turn) = turn {
        println!();
        if args.verbose {
            print_verbose(turn);
        } else {
            println!("{}", turn.to_terminal_string());
        }
    }
}

/// Print turn diagnostics
fn print_verbose(turn: &TurnOutput) {
    let rule = "\u{2500}".repeat(44);
    println!("{}", rule.bright_black());
    println!("Turn {} | {}", turn.turn, turn.branch);
    println!(
        "Topic: {} (detected {}) | progress: {}",
        turn.topic, turn.detected_topic, turn.counted_as_progress
    );
    println!("Emotion: {}", turn.emotion);
    println!(
        "Intent: {} ({:.0}% confidence)",
        turn.intent.intent,
        turn.intent.confidence * 100.0
    );
    for intent in Intent::ALL {
        let score = turn.intent.score(intent);
        if score > 0.0 {
            println!("  {:<14} {:.2}", intent.as_str(), score);
        }
    }
    if let Some(mode) = turn.depth_mode {
        println!("Depth Mode: {}", mode);
    }
    println!("{}", rule.bright_black());
}

/// Print session memory as JSON
fn print_memory(generator: &dyn ResponseGenerator) {
    match generator.memory() {
        Some(memory) => match memory.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {}", e),
        },
        None => println!("(the {} generator keeps no memory)", generator.name()),
    }
}

/// Print header
fn print_header(generator: &dyn ResponseGenerator, context: &Context) {
    let title = format!("MELVA v{} - {} generator", VERSION, generator.name());
    println!("{}", title.bold());
    println!(
        "{}",
        format!("Genre: {} | Level: {}", context.genre, context.level).bright_black()
    );
    println!();
}

/// Prompt showing the current turn and topic
fn format_prompt(generator: &dyn ResponseGenerator) -> String {
    match generator.memory() {
        Some(memory) => format!(
            "{} > ",
            format!("[turn {} | {}]", memory.turn, memory.last_topic).cyan()
        ),
        None => "> ".to_string(),
    }
}

/// Run HTTP API server
async fn run_serve(config: &TutorConfig) {
    println!();
    println!("{}", format!("\u{1f3b5} MELVA API Server v{}", VERSION).bold());
    println!(
        "Default generator: {} | Context: {} / {}",
        config.engine.generator, config.context.genre, config.context.level
    );
    println!();

    if let Err(e) = run_server(config).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
