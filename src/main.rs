//! # Reckon CLI
//!
//! Terminal front end for the calculator. Keys are typed as text
//! (`12 + 3 =`, `5 ÷ 0 =`, `17 mod 5 =`, `AC`, `DEL`, `+/-`, `%`) and history and the
//! theme persist between runs.

use clap::{Parser, Subcommand};
use reckon::{CalculatorApp, CalculatorConfig, DisplayState, FileStore, History, Key};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reckon")]
#[command(about = "Keypad calculator with persisted history", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to reckon.toml in the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for persisted history and theme
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session reading keys from stdin (default)
    Repl,

    /// Press a sequence of keys and print the display
    Eval {
        /// Keys, for example: 72 + 18 =
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        keys: Vec<String>,

        /// Print the display as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored history, newest first
    History,

    /// Remove all stored history
    ClearHistory,
}

const HELP: &str = "\
keys:      0-9 . + - × ÷ mod = AC DEL +/- %  (separate with spaces or not)
           % (or pct) is percent; mod is the remainder operation
commands:  :history  :recall N  :clear-history  :theme  :help  :quit";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match CalculatorConfig::load(cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            eprintln!("reckon: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }

    let store = match FileStore::open(config.data_dir()) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("reckon: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = CalculatorApp::start(&config, store).await;

    let code = match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => repl(&mut app).await,
        Commands::Eval { keys, json } => eval(&mut app, &keys.join(" "), json),
        Commands::History => {
            print_history(app.history());
            ExitCode::SUCCESS
        }
        Commands::ClearHistory => {
            let count = app.history().len();
            app.clear_history().await;
            println!("Cleared {count} entries");
            ExitCode::SUCCESS
        }
    };

    app.shutdown().await;
    code
}

fn eval(app: &mut CalculatorApp<FileStore>, input: &str, json: bool) -> ExitCode {
    let keys = match Key::sequence(input) {
        Ok(keys) => keys,
        Err(e) => {
            eprintln!("reckon: {e}");
            return ExitCode::FAILURE;
        }
    };
    app.press_all(keys);

    let display = app.display();
    if json {
        match serde_json::to_string_pretty(&display) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("reckon: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_display(&display);
    }
    ExitCode::SUCCESS
}

async fn repl(app: &mut CalculatorApp<FileStore>) -> ExitCode {
    println!("reckon ({} theme). :help for keys and commands.", app.theme());
    print_display(&app.display());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Failed to read input");
                return ExitCode::FAILURE;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix(':') {
            let mut parts = command.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some("q" | "quit" | "exit"), _) => break,
                (Some("h" | "help"), _) => println!("{HELP}"),
                (Some("history"), _) => print_history(app.history()),
                (Some("recall"), index) => {
                    match index.unwrap_or("0").parse::<usize>() {
                        Ok(index) => match app.recall(index) {
                            Some(entry) => {
                                println!("recalled {} {}", entry.expression, entry.result)
                            }
                            None => println!("no history entry {index}"),
                        },
                        Err(_) => println!("usage: :recall N"),
                    }
                    print_display(&app.display());
                }
                (Some("clear-history"), _) => {
                    app.clear_history().await;
                    println!("history cleared");
                }
                (Some("theme"), _) => println!("theme: {}", app.toggle_theme()),
                _ => println!("unknown command :{command}\n{HELP}"),
            }
            continue;
        }

        match Key::sequence(line) {
            Ok(keys) => {
                app.press_all(keys);
                print_display(&app.display());
            }
            Err(e) => println!("{e}"),
        }
    }
    ExitCode::SUCCESS
}

fn print_display(display: &DisplayState) {
    if !display.expression_text.is_empty() {
        println!("{:>24}", display.expression_text);
    }
    let marker = display.pending_symbol().unwrap_or(" ");
    println!("{marker} {:>22}", display.current_value);
}

fn print_history(history: &History) {
    if history.is_empty() {
        println!("No history yet");
        return;
    }
    for (index, entry) in history.entries().iter().enumerate() {
        println!(
            "{index:>3}  {}  {} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.expression,
            entry.result
        );
    }
}
