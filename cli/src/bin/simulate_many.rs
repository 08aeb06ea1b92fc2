use arena_cli::load_roster;
use arena_engine::api::{simulate_many_with_roster, BattleConfig};
use arena_engine::{BattleRules, Outcome, TeamSlot};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arena-sim")]
#[command(about = "Monte Carlo sim: many seeded battles between two teams")]
struct Args {
    /// Team 1 slot as NAME or NAME:ITEM (repeat for 3v3)
    #[arg(long = "team1", required = true)]
    team1: Vec<TeamSlot>,

    /// Team 2 slot as NAME or NAME:ITEM (repeat for 3v3)
    #[arg(long = "team2", required = true)]
    team2: Vec<TeamSlot>,

    /// Number of battles
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// RNG base seed (battle i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Simulated seconds before a battle is a draw
    #[arg(long, default_value_t = 300)]
    time_limit: u32,

    /// Chance that a type advantage triggers
    #[arg(long, default_value_t = 0.2)]
    effect_chance: f64,

    /// Optional warriors CSV (falls back to the built-in roster)
    #[arg(long)]
    warriors: Option<PathBuf>,

    /// Optional items CSV (falls back to the built-in items)
    #[arg(long)]
    items: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn describe(team: &[TeamSlot]) -> String {
    team.iter()
        .map(|s| match &s.item {
            Some(item) => format!("{} [{}]", s.warrior, item),
            None => s.warrior.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if !(0.0..=1.0).contains(&args.effect_chance) {
        anyhow::bail!("effect chance must be within 0..=1, got {}", args.effect_chance);
    }

    let roster = load_roster(args.warriors.as_deref(), args.items.as_deref())?;
    let cfg = BattleConfig {
        team1: args.team1.clone(),
        team2: args.team2.clone(),
        seed: Some(args.seed),
        rules: BattleRules {
            time_limit_secs: args.time_limit,
            effect_chance: args.effect_chance,
            ..BattleRules::default()
        },
        ..BattleConfig::default()
    };
    let stats = simulate_many_with_roster(&roster, &cfg, args.trials)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("arena-sim results");
    println!("-----------------");
    println!("trials:             {}", stats.samples);
    println!("team 1:             {}", describe(&args.team1));
    println!("team 2:             {}", describe(&args.team2));
    println!();
    println!("team 1 win rate:    {:.1}%", stats.win_rate(Outcome::Team1Victory) * 100.0);
    println!("team 2 win rate:    {:.1}%", stats.win_rate(Outcome::Team2Victory) * 100.0);
    println!("draw rate:          {:.1}%", stats.win_rate(Outcome::Draw) * 100.0);
    println!("avg battle length:  {:.1}s", stats.mean_elapsed);

    Ok(())
}
