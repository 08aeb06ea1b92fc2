use anyhow::bail;
use arena_cli::load_roster;
use arena_engine::api::{simulate_with_roster, BattleConfig};
use arena_engine::log::format_stat_sheet;
use arena_engine::stats::derive;
use arena_engine::{Side, TeamSlot};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Subcommand)]
enum Cmd {
    /// List the warriors in the roster
    Warriors,
    /// List the items in the roster
    Items,
    /// Show a warrior's derived combat stats, optionally with an item
    Stats {
        /// Warrior name
        warrior: String,
        /// Item to equip
        #[arg(long)]
        item: Option<String>,
    },
    /// Run one battle and print the report
    Battle {
        /// Team 1 slot as NAME or NAME:ITEM (repeat for 3v3)
        #[arg(long = "team1")]
        team1: Vec<TeamSlot>,
        /// Team 2 slot as NAME or NAME:ITEM (repeat for 3v3)
        #[arg(long = "team2")]
        team2: Vec<TeamSlot>,
        /// Battle config (YAML or JSON); team flags are ignored when given
        #[arg(long)]
        config: Option<PathBuf>,
        /// RNG seed for a reproducible battle
        #[arg(long)]
        seed: Option<u64>,
        /// Simulated seconds before the battle is a draw
        #[arg(long)]
        time_limit: Option<u32>,
        /// Disable type advantages
        #[arg(long, default_value_t = false)]
        no_effects: bool,
        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Parser)]
#[command(name = "arena")]
#[command(about = "Battle arena CLI harness")]
struct Cli {
    /// Warriors CSV (defaults to the built-in roster)
    #[arg(long, global = true)]
    warriors: Option<PathBuf>,
    /// Items CSV (defaults to the built-in items)
    #[arg(long, global = true)]
    items: Option<PathBuf>,
    /// Log more (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Cmd::Warriors => {
            let roster = load_roster(cli.warriors.as_deref(), cli.items.as_deref())?;
            for w in roster.warriors() {
                if w.title.is_empty() {
                    println!("{} ({})", w.name, w.kind);
                } else {
                    println!("{} {} ({})", w.name, w.title, w.kind);
                }
            }
        }
        Cmd::Items => {
            let roster = load_roster(cli.warriors.as_deref(), cli.items.as_deref())?;
            for i in roster.items() {
                println!("{}", i.name);
            }
        }
        Cmd::Stats { warrior, item } => {
            let roster = load_roster(cli.warriors.as_deref(), cli.items.as_deref())?;
            let loadout = roster.resolve_slot(&TeamSlot::new(warrior, item.as_deref()))?;
            let state = derive(&loadout.warrior, loadout.item.as_ref());
            println!("{}", format_stat_sheet(&state.sheet(Side::Team1)));
        }
        Cmd::Battle {
            team1,
            team2,
            config,
            seed,
            time_limit,
            no_effects,
            json,
        } => {
            let mut cfg = match config {
                Some(path) => BattleConfig::from_path(&path)?,
                None => {
                    if team1.is_empty() || team2.is_empty() {
                        bail!("both --team1 and --team2 are required without --config");
                    }
                    BattleConfig {
                        team1,
                        team2,
                        ..BattleConfig::default()
                    }
                }
            };
            if seed.is_some() {
                cfg.seed = seed;
            }
            if let Some(limit) = time_limit {
                cfg.rules.time_limit_secs = limit;
            }
            if no_effects {
                cfg.rules.effect_chance = 0.0;
            }

            // command-line paths win over the config's
            let warriors = cli.warriors.or(cfg.warriors_path.as_ref().map(PathBuf::from));
            let items = cli.items.or(cfg.items_path.as_ref().map(PathBuf::from));
            let roster = load_roster(warriors.as_deref(), items.as_deref())?;

            let report = simulate_with_roster(&roster, &cfg)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render());
            }
        }
    }
    Ok(())
}
