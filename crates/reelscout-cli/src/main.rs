//! reelscout - terminal movie discovery CLI.

/// Application configuration (TOML).
mod config;
/// Tracing subscriber setup.
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use reelscout_api::tmdb::{MovieSummary, TmdbClient};
use reelscout_db::{SqliteTrendingStore, TrendingStore, resolve_data_dir};
use reelscout_tui::detail::error_text;
use reelscout_tui::format::{DetailView, MovieCard};
use reelscout_tui::{DetailController, FetchState, SearchController, run_browser};
use tracing::instrument;

use crate::config::{AppConfig, resolve_config_path};
use crate::logging::{LogTarget, init_logging, log_dir};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse, search and open movies in the terminal UI.
    Browse,
    /// Search movies by title and count the search as trending.
    Search(SearchArgs),
    /// List popular movies.
    Discover,
    /// Show the details of one movie.
    Movie(MovieArgs),
    /// Show the most searched terms.
    Trending(TrendingArgs),
    /// Inspect or create the config file.
    Config(ConfigCommand),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "dune").
    #[arg(long, required = true)]
    query: String,
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `trending` subcommand.
#[derive(clap::Args)]
struct TrendingArgs {
    /// Number of records (default: `trending.limit` from config).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    limit: Option<u32>,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the effective configuration.
    Show,
    /// Write a config file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Loads the config file for `dir`.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Builds a `TmdbClient` from the config and the `TMDB_API_TOKEN` environment variable.
///
/// A missing token is not fatal: requests go out unauthenticated and the
/// catalog rejects them, which the views report as fetch errors.
///
/// # Errors
///
/// Returns an error if the base URL override is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN").unwrap_or_else(|_| {
        tracing::warn!("TMDB_API_TOKEN is not set; catalog requests will be rejected");
        String::new()
    });

    let mut builder = TmdbClient::builder()
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .min_interval(config.min_interval());
    if let Some(base_url) = config.base_url()? {
        builder = builder.base_url(base_url);
    }
    builder.build().context("failed to build TMDB client")
}

/// Opens the trending counter store.
fn open_store(dir: Option<&PathBuf>) -> Result<SqliteTrendingStore> {
    SqliteTrendingStore::open(dir).context("failed to open trending store")
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client, store or terminal setup fails.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let settings = config.settings()?;
    let api = Arc::new(build_tmdb_client(&config)?);
    let store = Arc::new(open_store(dir)?);

    tracing::info!(
        debounce_ms = settings.debounce.as_millis(),
        trending_limit = settings.trending_limit,
        "Launching browser"
    );
    run_browser(api, store, &settings)
        .await
        .context("movie browser TUI failed")
}

/// Runs one committed query (`search`, or `discover` with an empty query).
///
/// # Errors
///
/// Returns an error if the client or store cannot be built, or the listing
/// ends in an error state.
#[instrument(skip_all, fields(query = query))]
async fn run_listing(query: &str, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let api = Arc::new(build_tmdb_client(&config)?);
    let store = Arc::new(open_store(dir)?);

    let mut search = SearchController::new(api, store);
    search.on_query_committed(query).await;

    match search.state() {
        FetchState::Success(movies) => {
            log_listing(movies);
            Ok(())
        }
        FetchState::Error(message) => bail!("{message}"),
        FetchState::Idle | FetchState::Loading => bail!("listing was not loaded"),
    }
}

/// Logs a listing as a table.
fn log_listing(movies: &[MovieSummary]) {
    if movies.is_empty() {
        tracing::info!("No movies found.");
        return;
    }

    tracing::info!("ID\tRating\tLang\tYear\tTitle");
    for card in movies.iter().map(MovieCard::from) {
        tracing::info!(
            "{}\t{}\t{}\t{}\t{}",
            card.id,
            card.rating,
            card.language,
            card.year,
            card.title
        );
    }
    tracing::info!("Total: {} movies", movies.len());
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the detail fetch fails.
#[instrument(skip_all, fields(movie_id = args.id))]
async fn run_movie(args: &MovieArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let api = Arc::new(build_tmdb_client(&config)?);

    let mut detail = DetailController::new(api);
    detail.show(args.id).await;

    match detail.state() {
        FetchState::Success(movie) => {
            let view = DetailView::from(movie);
            tracing::info!("{} ({})", view.title, view.year);
            tracing::info!("Runtime:   {}", view.runtime);
            tracing::info!("Rating:    {} {}", view.rating, view.votes);
            tracing::info!("Genres:    {}", view.genres);
            tracing::info!("Budget:    {}", view.budget);
            tracing::info!("Revenue:   {}", view.revenue);
            tracing::info!("Companies: {}", view.companies);
            tracing::info!("Overview:  {}", view.overview);
            if let Some(poster) = &view.poster_url {
                tracing::info!("Poster:    {poster}");
            }
            tracing::info!("Page:      {}", view.page_url);
            Ok(())
        }
        FetchState::Error(message) => bail!("{}", error_text(message)),
        FetchState::Idle | FetchState::Loading => bail!("movie {} was not loaded", args.id),
    }
}

/// Runs the `trending` subcommand.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or queried.
#[instrument(skip_all)]
async fn run_trending(args: &TrendingArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let limit = match args.limit {
        Some(limit) => limit,
        None => config.settings()?.trending_limit,
    };
    let store = open_store(dir)?;

    let records = store
        .top_trending(limit)
        .await
        .context("failed to load trending searches")?;

    if records.is_empty() {
        tracing::info!("No trending searches yet. Run `search` to record some.");
        return Ok(());
    }

    tracing::info!("#\tCount\tSearch\tMovie");
    for (rank, record) in records.iter().enumerate() {
        tracing::info!(
            "{}\t{}\t{}\t{} ({})",
            rank.saturating_add(1),
            record.count,
            record.search_term,
            record.movie_title,
            record.movie_id
        );
    }

    Ok(())
}

/// Runs the `config` subcommands.
///
/// # Errors
///
/// Returns an error if the config cannot be read or written, or `init`
/// would overwrite an existing file without `--force`.
#[instrument(skip_all)]
fn run_config(cmd: &ConfigCommand, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    match cmd.command {
        ConfigSubcommands::Show => {
            let config = AppConfig::load(&config_path).context("failed to load config")?;
            tracing::info!("# {}", config_path.display());
            tracing::info!("\n{}", config.to_toml()?);
        }
        ConfigSubcommands::Init { force } => {
            if config_path.exists() && !force {
                bail!(
                    "config file already exists: {} (use --force to overwrite)",
                    config_path.display()
                );
            }
            AppConfig::default()
                .save(&config_path)
                .context("failed to save config")?;
            tracing::info!("Wrote default config to {}", config_path.display());
        }
    }
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = cli.dir.as_ref();

    let target = match cli.command {
        Commands::Browse => LogTarget::File(log_dir(
            &resolve_data_dir(dir).context("failed to resolve data directory")?,
        )),
        _ => LogTarget::Terminal,
    };
    let _guard = init_logging(&target)?;

    match &cli.command {
        Commands::Browse => run_browse(dir).await,
        Commands::Search(args) => run_listing(&args.query, dir).await,
        Commands::Discover => run_listing("", dir).await,
        Commands::Movie(args) => run_movie(args, dir).await,
        Commands::Trending(args) => run_trending(args, dir).await,
        Commands::Config(cmd) => run_config(cmd, dir),
    }
}
