use buckshot::build_info;
use buckshot::core::{GameError, Result, Rules};
use buckshot::save_manager::{SaveManager, SaveStore, Snapshot};
use buckshot::stage::Session;
use buckshot::ui::{ConsolePresenter, StartChoice};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Default)]
struct Options {
    new_game: bool,
    load: bool,
    seed: Option<u64>,
    doubled_saw: bool,
    save_file: Option<PathBuf>,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(options) {
        eprintln!("buckshot: {}", e);
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--new" => options.new_game = true,
            "--load" => options.load = true,
            "--doubled-saw" => options.doubled_saw = true,
            "--seed" => {
                match args.get(i + 1).and_then(|s| s.parse().ok()) {
                    Some(seed) => options.seed = Some(seed),
                    None => usage_error("--seed needs a number"),
                }
                i += 1;
            }
            "--save-file" => {
                match args.get(i + 1) {
                    Some(path) => options.save_file = Some(PathBuf::from(path)),
                    None => usage_error("--save-file needs a path"),
                }
                i += 1;
            }
            other => usage_error(&format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    options
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'buckshot --help' for usage.");
    std::process::exit(1);
}

fn print_help() {
    println!("Buckshot - shotgun roulette against the dealer\n");
    println!("Usage: buckshot [options]\n");
    println!("Options:");
    println!("  --new              Start a new game without asking");
    println!("  --load             Continue the saved game without asking");
    println!("  --seed <N>         Seed the shotgun for a reproducible game");
    println!("  --doubled-saw      The saw doubles your next hit instead of ending your turn");
    println!("  --save-file <PATH> Save somewhere other than the config directory");
    println!("  --version          Show version information");
    println!("  --help             Show this help message");
    println!("\nSet RUST_LOG=debug to see engine logs on stderr.");
}

/// Decide between a fresh game and the saved one.
fn starting_snapshot<I: BufRead, W: Write>(
    options: &Options,
    store: &SaveManager,
    console: &mut ConsolePresenter<I, W>,
) -> Result<Option<Snapshot>> {
    if options.new_game || (!options.load && !store.save_exists()) {
        return Ok(None);
    }

    if !options.load {
        loop {
            match console.choose_start() {
                Ok(StartChoice::NewGame) => return Ok(None),
                Ok(StartChoice::Load) => break,
                Err(e) if e.is_rejected_input() => console.say(&format!("{}. Try again.", e))?,
                Err(e) => return Err(e),
            }
        }
    }

    match store.load() {
        Ok(Some(snapshot)) => {
            console.say("Progress loaded.")?;
            Ok(Some(snapshot))
        }
        Ok(None) => {
            console.say("No saved game found. Starting a new game.")?;
            Ok(None)
        }
        Err(GameError::CorruptSave(reason)) => {
            tracing::warn!(%reason, "ignoring unreadable save");
            console.say(&format!("The save file is unreadable ({}). Starting a new game.", reason))?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn run(options: Options) -> Result<()> {
    let store = match &options.save_file {
        Some(path) => SaveManager::with_path(path),
        None => SaveManager::new()?,
    };
    let rules = if options.doubled_saw {
        Rules::doubled_saw()
    } else {
        Rules::legacy()
    };
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut console = ConsolePresenter::stdio();
    let snapshot = starting_snapshot(&options, &store, &mut console)?;

    let mut session = Session::new(rules, console, store, rng);
    if let Some(snapshot) = snapshot {
        session.restore(&snapshot);
    }
    session.run()?;
    Ok(())
}
