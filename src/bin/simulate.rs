//! Game balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                        # 1000 counting runs
//!   cargo run --bin simulate -- -n 100 --random    # 100 coin-flip runs
//!   cargo run --bin simulate -- --seed 42          # Reproducible run

use buckshot::core::Rules;
use buckshot::simulator::{run_simulation, PlayerStrategy, SimConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              BUCKSHOT BALANCE SIMULATOR                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Strategy:       {}", config.strategy);
    println!("  Saw rule:       {:?}", config.rules.damage_rule);
    if config.play_infinite {
        println!(
            "  Infinite mode:  on ({})",
            if config.double_down { "always double" } else { "cash out" }
        );
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--strategy" => {
                if i + 1 < args.len() {
                    if let Some(strategy) = PlayerStrategy::parse(&args[i + 1]) {
                        config.strategy = strategy;
                    }
                    i += 1;
                }
            }
            "--random" => {
                config.strategy = PlayerStrategy::Random;
            }
            "--doubled-saw" => {
                config.rules = Rules::doubled_saw();
            }
            "--infinite" => {
                config.play_infinite = true;
            }
            "--double-down" => {
                config.play_infinite = true;
                config.double_down = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--quick" => {
                config = SimConfig::quick();
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Buckshot Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of games (default: 1000)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    --strategy <NAME>     counting (default) or random");
    println!("    --random              Same as --strategy random");
    println!("    --doubled-saw         Saw doubles the next hit instead of ending the turn");
    println!("    --infinite            Enter infinite mode after stage 3, cash out at the first offer");
    println!("    --double-down         Enter infinite mode and take every double-or-quit");
    println!("    -v, --verbose         Print every run");
    println!("    --json                Save JSON report");
    println!("    --quick               Quick look (100 runs)");
    println!("    -h, --help            Show this help");
}
