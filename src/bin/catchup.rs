//! Offline catch-up runner.
//!
//! Builds a starter party, simulates an absence and prints the report.
//!
//! Usage:
//!   cargo run --bin catchup -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin catchup                         # 8 hours in zone 1
//!   cargo run --bin catchup -- --hours 100          # Clamped to 72 hours
//!   cargo run --bin catchup -- --zone 2 --level 25 --seed 42

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::env;
use tamer::creature::{Combatant, Party};
use tamer::data::{BallKind, GameData, StaticBonuses};
use tamer::zones::ZoneProgress;
use tamer::{CatchupReport, CombatConfig, CombatEngine};

struct Options {
    hours: f64,
    seed: Option<u64>,
    level: u32,
    zone: u32,
    auto_capture: bool,
    data_path: Option<String>,
    verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            hours: 8.0,
            seed: None,
            level: 10,
            zone: 1,
            auto_capture: false,
            data_path: None,
            verbose: false,
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);

    let default_level = if options.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let data = match &options.data_path {
        Some(path) => match GameData::from_path(path) {
            Ok(data) => data,
            Err(err) => {
                eprintln!("Failed to load game data: {}", err);
                std::process::exit(1);
            }
        },
        None => GameData::builtin(),
    };

    let mut rng = match options.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut party = Party::new(
        [4, 2, 3]
            .into_iter()
            .map(|species| Combatant::wild(&data, species, options.level, &mut rng))
            .collect(),
    );
    party.add_capture_items(BallKind::Basic, 20);
    party.add_capture_items(BallKind::Great, 5);

    let bonuses = StaticBonuses {
        auto_capture: options.auto_capture,
        ..Default::default()
    };
    let mut engine = CombatEngine::new(
        party,
        ZoneProgress::new(options.zone),
        Box::new(data),
        Box::new(bonuses),
        CombatConfig::default(),
    );

    let elapsed_ms = (options.hours.max(0.0) * 3_600_000.0) as u64;
    println!("Simulating {:.1} hours in zone {}...", options.hours, options.zone);
    println!();
    let report = engine.catch_up(elapsed_ms, &mut rng);
    print_report(&report);

    println!();
    println!("Party:");
    for member in &engine.party().team {
        println!(
            "  {:<12} Lv {:>3}  HP {}/{}",
            member.name,
            member.level,
            member.current_hp,
            member.max_hp()
        );
    }
}

fn print_report(report: &CatchupReport) {
    let hours = report.elapsed_ms as f64 / 3_600_000.0;
    println!("═══ Catch-up report ═══");
    print!("  Elapsed:     {:.2} h", hours);
    if report.elapsed_clamped {
        print!(" (clamped)");
    }
    println!();
    print!(
        "  Encounters:  {} of {} planned",
        report.encounters_simulated, report.encounters_planned
    );
    if report.encounter_cap_hit {
        print!(" (capped)");
    }
    if report.stopped_early {
        print!(" (stopped early)");
    }
    println!();
    println!(
        "  Won / lost:  {} / {}  ({} stalemates)",
        report.won, report.lost, report.stalemates
    );
    println!("  Exp:         {}", report.exp);
    println!("  Currency:    {}", report.currency);
    println!("  Levels:      +{}", report.levels_gained);
    println!("  Tier ups:    {}", report.tiers_advanced);
    if report.shards > 0 {
        println!("  Shards:      {}", report.shards);
    }
    for (tier, count) in &report.performance {
        println!("  {:<11?}  {}", tier, count);
    }
    if !report.items.is_empty() {
        println!("  Items:");
        for (item, count) in &report.items {
            println!("    {:<20} x{}", item, count);
        }
    }
    if !report.captures.is_empty() {
        println!("  Captures:");
        for capture in &report.captures {
            println!(
                "    {:<12} Lv {:>3}{}{}",
                capture.name,
                capture.level,
                if capture.shiny { " ✦" } else { "" },
                if capture.fused { " (fused)" } else { "" }
            );
        }
        if report.captures_not_listed > 0 {
            println!("    ... and {} more", report.captures_not_listed);
        }
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--hours" => {
                if i + 1 < args.len() {
                    options.hours = args[i + 1].parse().unwrap_or(8.0);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    options.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-l" | "--level" => {
                if i + 1 < args.len() {
                    options.level = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "-z" | "--zone" => {
                if i + 1 < args.len() {
                    options.zone = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "--data" => {
                if i + 1 < args.len() {
                    options.data_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--auto-capture" => {
                options.auto_capture = true;
            }
            "-v" | "--verbose" => {
                options.verbose = true;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    options
}

fn print_help() {
    println!("Tamer offline catch-up runner");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin catchup -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --hours <H>         Hours away (default: 8, clamped to 72)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -l, --level <L>     Starter party level (default: 10)");
    println!("    -z, --zone <Z>      Zone to fight in (default: 1)");
    println!("    --auto-capture      Throw capture items after every win");
    println!("    --data <FILE>       Load game data from a JSON file");
    println!("    -v, --verbose       Debug logging");
    println!("    -h, --help          Show this help");
}
