use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nashboard::models::{SlateFetchResult, Sport};
use nashboard::player::resolve_player;
use nashboard::projection::sample_projection;
use nashboard::utils::data::{load_from_json, save_slate_to_csv, save_to_json};
use nashboard::widgets::{widgets_for, WIDGET_DEFINITIONS};
use nashboard::{SlateService, SportsConfig};
use reqwest::Client;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "NashBoard data tools", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print tonight's slate for a sport
    Slate {
        #[arg(short, long, default_value = "NFL")]
        sport: String,

        /// Also write the games to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// JSON cache file for the slate
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Read the slate from --cache instead of fetching when the file exists
        #[arg(long)]
        use_cache: bool,
    },
    /// Look up a player card
    Player {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "NBA")]
        sport: String,
    },
    /// List the widget registry
    Widgets {
        #[arg(short, long)]
        sport: Option<String>,
    },
    /// Print the sample RB vs. defense projection
    Projection,
}

async fn slate(
    sport: &str,
    csv: Option<PathBuf>,
    cache: Option<PathBuf>,
    use_cache: bool,
) -> Result<()> {
    let sport = Sport::parse(sport).with_context(|| format!("Unknown sport: {}", sport))?;

    let result: SlateFetchResult = match &cache {
        Some(path) if use_cache && path.exists() => {
            println!("Loading slate from cache file: {}\n", path.display());
            load_from_json(path)?
        }
        _ => {
            let service = SlateService::new(Client::new(), SportsConfig::from_env());
            let result = service.tonight(sport).await.into_fetch_result();
            if let Some(path) = &cache {
                save_to_json(&result, path)?;
                println!("Saved slate to cache file: {}\n", path.display());
            }
            result
        }
    };

    println!("{} SLATE (source: {})\n", sport, result.source.as_str());
    if let Some(message) = &result.message {
        println!("{}\n", message);
    }
    if result.games.is_empty() {
        println!("No games scheduled.");
    }
    for (i, game) in result.games.iter().enumerate() {
        println!(
            "{}. {} @ {}  {}  {}",
            i + 1,
            game.away_team,
            game.home_team,
            game.start_time,
            game.venue.as_deref().unwrap_or("TBD")
        );
    }

    if let Some(path) = csv {
        save_slate_to_csv(&result.games, &path)?;
        println!("\nSaved slate to {}", path.display());
    }
    Ok(())
}

async fn player(name: &str, sport: &str) -> Result<()> {
    let config = SportsConfig::from_env();
    let client = Client::new();
    let player = resolve_player(&client, &config.espn_base_url, Sport::parse(sport), name).await;

    println!("{} ({})", player.display_name, player.source_label);
    println!("  Team:     {}", player.team.as_deref().unwrap_or("N/A"));
    println!("  Position: {}", player.position.as_deref().unwrap_or("N/A"));
    Ok(())
}

fn widgets(sport: Option<&str>) -> Result<()> {
    let definitions = match sport {
        Some(raw) => {
            let sport = Sport::parse(raw).with_context(|| format!("Unknown sport: {}", raw))?;
            widgets_for(sport)
        }
        None => WIDGET_DEFINITIONS.iter().collect(),
    };

    for widget in definitions {
        let sports: Vec<_> = widget.supported_sports.iter().map(Sport::as_str).collect();
        println!(
            "{:<16} {:<22} {}x{}  [{}]",
            widget.key,
            widget.name,
            widget.default_size.w,
            widget.default_size.h,
            sports.join(", ")
        );
    }
    Ok(())
}

fn projection() -> Result<()> {
    let projection = sample_projection();
    println!(
        "{} ({}) vs {}",
        projection.player_name, projection.team, projection.opponent
    );
    println!(
        "  Projected rushing yards: {}-{}",
        projection.projected_range[0], projection.projected_range[1]
    );
    println!("  {}", projection.explanation);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args = Args::parse();
    match args.command {
        Command::Slate {
            sport,
            csv,
            cache,
            use_cache,
        } => slate(&sport, csv, cache, use_cache).await,
        Command::Player { name, sport } => player(&name, &sport).await,
        Command::Widgets { sport } => widgets(sport.as_deref()),
        Command::Projection => projection(),
    }
}
