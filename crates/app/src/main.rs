use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use services::{UiEvent, WorksheetService};
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;
use worksheet_core::WorksheetPath;

mod terminal;

use terminal::TerminalView;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

struct Args {
    db_url: String,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("WORKSHEET_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://worksheet.sqlite3".into(), normalize_sqlite_url);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = args.next().ok_or(ArgsError::MissingValue { flag: "--db" })?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:worksheet.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  WORKSHEET_DB_URL, RUST_LOG");
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

//
// ─── COMMANDS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, PartialEq)]
enum Command {
    Event(UiEvent),
    Shapes,
    Help,
    Quit,
    Nothing,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Command::Nothing;
    };
    let rest: Vec<&str> = words.collect();

    match (verb, rest.as_slice()) {
        ("color", [shape, fraction]) => Command::Event(UiEvent::ApplyFraction {
            input: (*fraction).to_owned(),
            shape: (*shape).to_owned(),
        }),
        ("clear", [shape]) => Command::Event(UiEvent::ClearShape {
            shape: (*shape).to_owned(),
        }),
        ("pick", [shape]) => Command::Event(UiEvent::SelectMostColored {
            shape: (*shape).to_owned(),
        }),
        ("compare", []) => Command::Event(UiEvent::CheckComparison { selection: None }),
        ("compare", [fraction]) => Command::Event(UiEvent::CheckComparison {
            selection: Some((*fraction).to_owned()),
        }),
        ("match", [fraction, shape]) => Command::Event(UiEvent::ConnectFraction {
            fraction: (*fraction).to_owned(),
            shape: (*shape).to_owned(),
        }),
        ("add", []) => Command::Event(UiEvent::AddPerson),
        ("remove", []) => Command::Event(UiEvent::RemovePerson),
        ("check", [fraction]) => Command::Event(UiEvent::CheckGameFraction {
            input: (*fraction).to_owned(),
        }),
        ("assess", [key, state]) if matches!(*state, "on" | "off") => {
            Command::Event(UiEvent::SetAssessment {
                key: (*key).to_owned(),
                checked: *state == "on",
            })
        }
        ("show", [path]) => match path.parse::<WorksheetPath>() {
            Ok(path) => Command::Event(UiEvent::ShowWorksheet { path }),
            Err(_) => Command::Unknown(line.to_owned()),
        },
        ("transfer", [path]) => match path.parse::<WorksheetPath>() {
            Ok(path) => Command::Event(UiEvent::TransferToPath { path }),
            Err(_) => Command::Unknown(line.to_owned()),
        },
        ("save", []) => Command::Event(UiEvent::RequestSave),
        ("reset", []) => Command::Event(UiEvent::ResetAll),
        ("shapes", []) => Command::Shapes,
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => Command::Unknown(line.to_owned()),
    }
}

fn print_help() {
    println!("commands:");
    println!("  color <shape> <fraction>   color a shape, e.g. color circle-1 1/2");
    println!("  clear <shape>              wipe a shape's coloring");
    println!("  pick <shape>               choose the most colored shape");
    println!("  compare [fraction]         answer: which of 1/4 and 1/2 is smaller?");
    println!("  match <fraction> <shape>   connect a fraction card to a shape");
    println!("  add | remove               move people to/from the front of the class");
    println!("  check <fraction>           check the people fraction you read off");
    println!("  assess <key> <on|off>      tick a self-assessment box");
    println!("  show <a|b|c>               switch worksheet path");
    println!("  transfer <a|b>             transfer paths (asks first, then saves)");
    println!("  save                       save progress now");
    println!("  reset                      erase all progress (asks first)");
    println!("  shapes | help | quit");
}

//
// ─── MAIN LOOP ─────────────────────────────────────────────────────────────────
//

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    prepare_sqlite_file(&args.db_url)?;
    let storage = Storage::sqlite(&args.db_url).await?;
    tracing::info!(db = %args.db_url, "storage ready");

    let mut service = WorksheetService::new(Arc::clone(&storage.progress));
    let mut view = TerminalView::new();
    let mut state = service.startup(&mut view).await;

    view.print_shapes();
    print_help();

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        service.tick(&mut view);

        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Command::Event(event) => {
                service.dispatch(&mut state, &mut view, event).await;
                // The reset flow asks the host to reload the page; here
                // that means restarting from the (now empty) store.
                if view.take_reload_request() {
                    state = service.startup(&mut view).await;
                }
            }
            Command::Shapes => view.print_shapes(),
            Command::Help => print_help(),
            Command::Quit => break,
            Command::Nothing => {}
            Command::Unknown(input) => {
                println!("unrecognized command: {}", input.trim());
                println!("type 'help' for the command list");
            }
        }
    }

    service.shutdown(&state).await;
    println!("progress saved, goodbye");
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
