use anyhow::{Context, Result};
use catalog::MovieId;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use comparison::{CollectionVerdict, ComparisonResult, Status, Verdict};
use selection::DEFAULT_LOOKBACK_DAYS;
use server::{GuessService, ServerConfig};
use std::fmt::Display;
use std::path::PathBuf;
use std::time::Instant;

/// Movie Guess - daily movie guessing game
#[derive(Parser)]
#[command(name = "movie-guess")]
#[command(about = "Operate the daily movie guessing game from the terminal", long_about = None)]
struct Cli {
    /// Path to the catalog export
    #[arg(short, long, env = "CATALOG_PATH", default_value = "data/movies.json")]
    catalog: PathBuf,

    /// Target store URL, or `memory` for a throwaway store
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:data/daily_targets.db")]
    database: String,

    /// Days a selected movie stays ineligible
    #[arg(long, env = "LOOKBACK_DAYS", default_value_t = DEFAULT_LOOKBACK_DAYS)]
    lookback_days: u32,

    /// Fixed RNG seed for reproducible draws
    #[arg(long, env = "SELECTION_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog movies by id and title
    Movies,

    /// Select (or show) the target for a day
    Select {
        /// Day to select for, YYYY-MM-DD; defaults to today (UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Compare a guess against a day's target
    Guess {
        /// Id of the guessed movie
        #[arg(long)]
        movie_id: MovieId,

        /// Day to guess for, YYYY-MM-DD; defaults to today (UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show recent daily targets
    History {
        /// Number of days to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = ServerConfig {
        catalog_path: cli.catalog,
        database_url: cli.database,
        lookback_days: cli.lookback_days,
        selection_seed: cli.seed,
        ..ServerConfig::default()
    };

    let start = Instant::now();
    let service = server::build_service(&config)
        .await
        .context("Failed to start the game service")?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        service.catalog().len(),
        start.elapsed()
    );

    let today = Utc::now().date_naive();
    match cli.command {
        Commands::Movies => handle_movies(&service),
        Commands::Select { date } => handle_select(&service, date.unwrap_or(today)).await?,
        Commands::Guess { movie_id, date } => {
            handle_guess(&service, movie_id, date.unwrap_or(today)).await?
        }
        Commands::History { limit } => handle_history(&service, limit).await?,
    }

    Ok(())
}

/// Handle the 'movies' command
fn handle_movies(service: &GuessService) {
    let movies = service.list_movies();

    println!("{}", format!("Movies ({}):", movies.len()).bold().blue());
    for movie in movies {
        println!("{:>8}  {}", movie.movie_id.to_string().green(), movie.title);
    }
}

/// Handle the 'select' command
async fn handle_select(service: &GuessService, date: NaiveDate) -> Result<()> {
    let target = service.trigger_daily_selection(date).await?;
    let title = service
        .catalog()
        .get_by_id(target.movie_id)
        .map(|m| m.title.clone())
        .unwrap_or_else(|_| "<not in catalog>".to_string());

    println!(
        "{} Target for {}: {} ({})",
        "✓".green(),
        target.date.to_string().bold(),
        title.bold(),
        target.movie_id
    );
    Ok(())
}

/// Handle the 'guess' command
async fn handle_guess(service: &GuessService, movie_id: MovieId, date: NaiveDate) -> Result<()> {
    let result = service.evaluate_guess(date, movie_id).await?;
    print_comparison(&result);
    Ok(())
}

/// Handle the 'history' command
async fn handle_history(service: &GuessService, limit: usize) -> Result<()> {
    let history = service.history(limit).await?;

    println!("{}", "Recent daily targets:".bold().blue());
    if history.is_empty() {
        println!("  (none yet)");
    }
    for target in history {
        let title = service
            .catalog()
            .get_by_id(target.movie_id)
            .map(|m| m.title.as_str())
            .unwrap_or("<not in catalog>");
        println!("  {}  {} ({})", target.date, title, target.movie_id);
    }
    Ok(())
}

/// Render a comparison as one row per attribute
fn print_comparison(result: &ComparisonResult) {
    if result.is_solved() {
        println!("{}", "Solved! That's today's movie.".bold().green());
    } else {
        println!("{}", "Not quite. Clues:".bold().blue());
    }

    print_row("Id", &result.movie_id);
    print_row("Title", &result.title);
    print_row("Released", &result.release_date);
    print_row("Duration", &result.duration_minutes);
    print_row("Rating", &result.rating);
    print_row("Budget", &result.budget);
    print_row("Revenue", &result.revenue);
    print_collection("Genres", &result.genres);
    print_collection("Directors", &result.director_names);
    print_collection("Actors", &result.main_actors);
    print_collection("Writers", &result.writers);
    print_row("Company", &result.producer_company);
    print_row("Country", &result.producer_country);
}

fn print_row<T: Display, S: Status>(name: &str, verdict: &Verdict<T, S>) {
    println!(
        "  {:<10} {:<30} {}",
        name,
        verdict.value.to_string(),
        paint(&verdict.status)
    );
}

fn print_collection(name: &str, verdicts: &CollectionVerdict) {
    if verdicts.is_empty() {
        println!("  {:<10} -", name);
        return;
    }
    let items = verdicts
        .iter()
        .map(|v| {
            let painted = if v.status.is_hit() {
                v.value.green()
            } else {
                v.value.red()
            };
            painted.to_string()
        })
        .collect::<Vec<_>>()
        .join(", ");
    println!("  {:<10} {}", name, items);
}

fn paint<S: Status>(status: &S) -> ColoredString {
    let label = status.label();
    if status.is_hit() {
        label.green()
    } else if matches!(label, "higher" | "lower" | "earlier" | "later") {
        label.yellow()
    } else {
        label.red()
    }
}
