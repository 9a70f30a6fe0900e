// objcdecl: Objective-C declaration parser and round-trip inspector

use std::fs;
use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use objcdecl::entries::{load_entries, Entry, RoundTrip, Summary};
use objcdecl::ui::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Inspect,
    Check,
    Json,
    Tokens,
}

fn usage(program_name: &str) {
    eprintln!("Usage: {} <file> [--check | --json | --tokens]", program_name);
    eprintln!();
    eprintln!("The file holds one declaration per line, optionally prefixed by a");
    eprintln!("topic label and a tab, or a JSON array of documentation topics.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} demos/appkit.txt            # Browse in the inspector", program_name);
    eprintln!("  {} demos/appkit.txt --check    # Round-trip report", program_name);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("objcdecl");

    let mut file = None;
    let mut mode = Mode::Inspect;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--check" => mode = Mode::Check,
            "--json" => mode = Mode::Json,
            "--tokens" => mode = Mode::Tokens,
            flag if flag.starts_with("--") => {
                eprintln!("Error: Unknown option '{}'", flag);
                usage(program_name);
                std::process::exit(1);
            }
            path => file = Some(path),
        }
    }

    let Some(file) = file else {
        eprintln!("Error: No input file provided");
        eprintln!();
        usage(program_name);
        std::process::exit(1);
    };

    if !Path::new(file).exists() {
        eprintln!("Error: File '{}' not found", file);
        std::process::exit(1);
    }

    let text = fs::read_to_string(file)?;

    eprintln!("Parsing {}...", file);
    let entries = match load_entries(&text) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Topic file error: {}", e);
            std::process::exit(1);
        }
    };
    let summary = Summary::of(&entries);
    eprintln!(
        "Parsed {} declarations: {} exact, {} equivalent, {} skipped, {} failed.",
        summary.total, summary.exact, summary.equivalent, summary.skipped, summary.failed
    );

    match mode {
        Mode::Inspect => run_inspector(entries),
        Mode::Check => {
            print_check(&entries);
            if summary.failed > 0 {
                std::process::exit(1);
            }
            Ok(())
        }
        Mode::Json => {
            let values: Vec<serde_json::Value> = entries.iter().map(entry_json).collect();
            println!("{}", serde_json::to_string_pretty(&values)?);
            Ok(())
        }
        Mode::Tokens => {
            for entry in &entries {
                println!("# line {}: {}", entry.line, entry.source);
                for token in &entry.tokens {
                    println!("{}", token.dump());
                }
            }
            Ok(())
        }
    }
}

fn print_check(entries: &[Entry]) {
    for entry in entries {
        match (&entry.result, entry.round_trip) {
            (Err(err), _) if entry.is_skipped() => {
                println!("SKIP  {:4} {}\n      {}", entry.line, entry.source, err);
            }
            (Err(err), _) => {
                println!("FAIL  {:4} {}\n      {}", entry.line, entry.source, err);
            }
            (Ok(_), RoundTrip::Unstable) => {
                println!(
                    "FAIL  {:4} {}\n      unstable canonical text: {}",
                    entry.line,
                    entry.source,
                    entry.canonical.as_deref().unwrap_or_default()
                );
            }
            (Ok(_), RoundTrip::Equivalent) => {
                println!(
                    "NORM  {:4} {}\n      {}",
                    entry.line,
                    entry.source,
                    entry.canonical.as_deref().unwrap_or_default()
                );
            }
            (Ok(_), _) => {}
        }
    }
}

fn entry_json(entry: &Entry) -> serde_json::Value {
    let (statement, error) = match &entry.result {
        Ok(stmt) => (serde_json::to_value(stmt).unwrap_or_default(), None),
        Err(err) => (serde_json::Value::Null, Some(err.to_string())),
    };
    serde_json::json!({
        "line": entry.line,
        "type": entry.kind.map(|k| k.label()),
        "declaration": entry.source,
        "statement": statement,
        "error": error,
        "canonical": entry.canonical,
        "round_trip": entry.round_trip.as_str(),
    })
}

fn run_inspector(entries: Vec<Entry>) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(entries);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
