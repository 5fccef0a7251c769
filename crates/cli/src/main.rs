use anyhow::{Context, Result};
use chatbot::Responder;
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::MovieCatalog;
use game::{GameState, Player, Verdict};
use recommender::{Recommendation, RecommendationEngine};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// CineBot - movie chat and tic-tac-toe demos
#[derive(Parser)]
#[command(name = "cinebot")]
#[command(about = "Movie-recommending chatbot with a perfect-play tic-tac-toe opponent", long_about = None)]
struct Cli {
    /// Path to the dataset directory (movies.dat + ratings.dat)
    #[arg(short, long, default_value = "data/ml-1m")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the movie recommendation bot
    Chat,

    /// Play tic-tac-toe against the engine (no dataset needed)
    Play,

    /// Get recommendations for a movie title
    Recommend {
        /// Movie title (case-insensitive substring match)
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // The game runs entirely without the dataset; everything else needs it
    if let Commands::Play = cli.command {
        return handle_play();
    }

    println!("Loading movie dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let catalog = Arc::new(
        MovieCatalog::load_from_files(&cli.data_dir)
            .context("Failed to load the movie dataset")?,
    );
    println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());

    match cli.command {
        Commands::Chat => {
            let engine = build_engine(catalog);
            handle_chat(engine)
        }
        Commands::Recommend { title, limit } => {
            let engine = build_engine(catalog);
            handle_recommend(&engine, &title, limit)
        }
        Commands::Search { title } => handle_search(&catalog, &title),
        Commands::Play => unreachable!("handled before loading the dataset"),
    }
}

/// Build the similarity matrices up front, with a visible timer
fn build_engine(catalog: Arc<MovieCatalog>) -> Arc<RecommendationEngine> {
    let start = Instant::now();
    let engine = Arc::new(RecommendationEngine::new(catalog));
    println!(
        "{} Built similarity matrix in {:?}",
        "✓".green(),
        start.elapsed()
    );
    engine
}

/// Handle the 'chat' command: a read-respond loop on stdin
fn handle_chat(engine: Arc<RecommendationEngine>) -> Result<()> {
    let responder = Responder::new(engine);

    println!();
    println!(
        "{}",
        "Hello! I am a simple chatbot. You can ask me for movie recommendations \
         by telling me a movie you like. For example, \"I like Titanic\"."
            .bold()
    );

    let stdin = io::stdin();
    loop {
        print!("{} ", "You:".blue().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        println!("{} {}", "Chatbot:".green().bold(), responder.respond(line));

        if responder.is_farewell(line) {
            break;
        }
    }
    Ok(())
}

/// Handle the 'play' command: render, read "row col", repeat
fn handle_play() -> Result<()> {
    let mut state = GameState::new();

    println!("{}", "Tic-Tac-Toe with AI".bold().blue());
    println!("You are {}. Enter moves as \"row col\" (1-3 each).", "X".bold());
    println!("Commands: reset, quit\n");
    print_board(&state);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        match line.trim() {
            "quit" | "q" => break,
            "reset" => {
                state.reset();
                print_board(&state);
                continue;
            }
            input => {
                let Some((row, col)) = parse_move(input) else {
                    println!("Enter a move as \"row col\", e.g. \"2 2\".");
                    continue;
                };
                if !state.apply_move(row - 1, col - 1) {
                    // The engine silently ignores illegal moves; tell the
                    // human why the board didn't change
                    println!("That move isn't available.");
                    continue;
                }
                print_board(&state);
            }
        }

        if state.is_over() {
            print_banner(&state);
            println!("Type \"reset\" to play again or \"quit\" to exit.");
        }
    }
    Ok(())
}

/// Parse "row col" with 1-based coordinates
fn parse_move(input: &str) -> Option<(usize, usize)> {
    let mut parts = input.split_whitespace();
    let row: usize = parts.next()?.parse().ok()?;
    let col: usize = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !(1..=3).contains(&row) || !(1..=3).contains(&col) {
        return None;
    }
    Some((row, col))
}

fn print_board(state: &GameState) {
    println!("\n{}", state.board());
    if !state.is_over() {
        println!("Turn: {}", state.turn());
    }
}

fn print_banner(state: &GameState) {
    match state.verdict() {
        Some(Verdict::Draw) => println!("{}", "It's a draw!".bold().yellow()),
        Some(Verdict::Winner(player)) => {
            let banner = format!("The winner is {}!", player);
            if player == Player::X {
                println!("{}", banner.bold().green());
            } else {
                println!("{}", banner.bold().red());
            }
        }
        None => {}
    }
}

/// Handle the 'recommend' command
fn handle_recommend(engine: &RecommendationEngine, title: &str, limit: usize) -> Result<()> {
    match engine.recommend(title, limit) {
        Recommendation::Similar { titles, .. } if titles.is_empty() => {
            println!("No recommendations found for '{}'.", title);
        }
        Recommendation::Similar { titles, .. } => {
            println!("{}", format!("If you like '{}':", title).bold().blue());
            for (rank, movie_title) in titles.iter().enumerate() {
                println!("{}. {}", (rank + 1).to_string().green(), movie_title);
            }
        }
        Recommendation::Fallback(picks) => {
            println!("{}", picks.message());
        }
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: &MovieCatalog, title: &str) -> Result<()> {
    let needle = title.to_lowercase();

    // (movie, exact-match rank, avg rating, rating count)
    let mut matches: Vec<(&data_loader::Movie, usize, f32, u32)> = Vec::new();
    for movie in catalog.movies() {
        let movie_title = movie.title.to_lowercase();
        if !movie_title.contains(&needle) {
            continue;
        }

        let stats = catalog.get_movie_stats(movie.id);
        let avg_rating = stats.map(|s| s.avg_rating).unwrap_or(0.0);
        let rating_count = stats.map(|s| s.rating_count).unwrap_or(0);
        let rank = if movie_title == needle { 0 } else { 1 };
        matches.push((movie, rank, avg_rating, rating_count));
    }

    // Sort by relevance (exact match first, then by average rating)
    matches.sort_by(|a, b| {
        a.1.cmp(&b.1)
            .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal))
    });

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    for (movie, _, avg_rating, rating_count) in matches.iter().take(20) {
        let genres = movie
            .genres
            .iter()
            .map(|g| format!("{:?}", g))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{}: {} [{}] avg {:.2} ({} ratings)",
            movie.id, movie.title, genres, avg_rating, rating_count
        );
    }
    if matches.is_empty() {
        println!("No movies matched.");
    }
    Ok(())
}
