//! Battle balance simulator CLI.
//!
//! Runs many headless battles between two species and reports how they went.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                                   # 1000 battles, Squirtle vs Pidgey
//!   cargo run --bin simulate -- -n 200 --opponent Rattata      # 200 battles against Rattata
//!   cargo run --bin simulate -- --level 8 --seed 42            # Reproducible run

use std::env;
use std::path::PathBuf;
use tallgrass::creature::SpeciesTable;
use tallgrass::simulator::{run_simulation, SimConfig};

struct Args {
    config: SimConfig,
    species_file: Option<PathBuf>,
    json: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let Args {
        config,
        species_file,
        json,
    } = parse_args(&args);

    let verbose = config.verbosity >= 2;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if verbose {
                tracing::Level::INFO.into()
            } else {
                tracing::Level::WARN.into()
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let species = match species_file {
        Some(path) => SpeciesTable::load(&path),
        None => SpeciesTable::bundled(),
    };
    let species = match species {
        Ok(species) => species,
        Err(e) => {
            eprintln!("Could not load species: {}", e);
            std::process::exit(1);
        }
    };

    if !json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              TALLGRASS BATTLE SIMULATOR                       ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Battles:        {}", config.num_runs);
        println!("  Player:         {} Lv{}", config.player, config.player_level);
        println!("  Opponent:       {} Lv{}", config.opponent, config.opponent_level);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    match run_simulation(&config, &species) {
        Ok(report) if json => println!("{}", report.to_json()),
        Ok(report) => println!("{}", report.to_text()),
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args {
        config: SimConfig::default(),
        species_file: None,
        json: false,
    };
    let config = &mut parsed.config;

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "-n" | "--runs" => {
                if let Some(value) = value {
                    config.num_runs = value.parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "--player" => {
                if let Some(value) = value {
                    config.player = value.clone();
                    i += 1;
                }
            }
            "--opponent" => {
                if let Some(value) = value {
                    config.opponent = value.clone();
                    i += 1;
                }
            }
            "--level" => {
                if let Some(value) = value {
                    config.player_level = value.parse().unwrap_or(config.player_level);
                    i += 1;
                }
            }
            "--opponent-level" => {
                if let Some(value) = value {
                    config.opponent_level = value.parse().unwrap_or(config.opponent_level);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if let Some(value) = value {
                    config.seed = value.parse().ok();
                    i += 1;
                }
            }
            "--species" => {
                if let Some(value) = value {
                    parsed.species_file = Some(PathBuf::from(value));
                    i += 1;
                }
            }
            "--json" => parsed.json = true,
            "-v" | "--verbose" => config.verbosity = 2,
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    parsed
}

fn print_help() {
    println!("Tallgrass Battle Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>            Number of battles (default: 1000)");
    println!("    --player <SPECIES>        Player's species (default: Squirtle)");
    println!("    --opponent <SPECIES>      Opponent's species (default: Pidgey)");
    println!("    --level <L>               Player's level (default: 5)");
    println!("    --opponent-level <L>      Opponent's level (default: 5)");
    println!("    -s, --seed <S>            Random seed for reproducibility");
    println!("    --species <FILE>          Species table overriding the bundled one");
    println!("    --json                    Print the report as JSON");
    println!("    -v, --verbose             Log every battle to stderr");
    println!("    -h, --help                Show this help");
}
