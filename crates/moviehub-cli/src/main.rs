//! moviehub - browse, filter, favorite, and rate movies from OMDB.

/// Application configuration (TOML).
mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{API_KEY_ENV, AppConfig, resolve_config_path};
use moviehub_api::omdb::OmdbClient;
use moviehub_catalog::fetch::FALLBACK_TERM;
use moviehub_catalog::genre::genre_names;
use moviehub_catalog::{
    Category, FilterSpec, MovieDetails, MovieId, MovieRecord, apply_filters, fetch_featured,
    fetch_movie_details, fetch_movies,
};
use moviehub_store::{
    FavoritesChanged, FavoritesStore, Rating, RatingsStore, SqliteStorage, open_store,
};

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
    /// List movies by category or search term.
    Movies(MoviesArgs),
    /// Show the featured movies.
    Featured,
    /// Show full details for one movie.
    Details(DetailsArgs),
    /// Manage favorites.
    Favorites(FavoritesCommand),
    /// Rate a movie from 1 to 5.
    Rate(RateArgs),
    /// Inspect saved ratings.
    Ratings(RatingsCommand),
    /// Manage configuration.
    Config(ConfigCommand),
}

/// Arguments for the `movies` subcommand.
#[derive(clap::Args)]
struct MoviesArgs {
    /// Category: popular, top, or new.
    #[arg(long, default_value = "popular")]
    category: String,

    /// Search term. Takes precedence over --category.
    #[arg(long)]
    search: Option<String>,

    /// Genre (Action, Comedy, Drama, Horror, Romance, Sci-Fi, Thriller).
    #[arg(long)]
    genre: Option<String>,

    /// Release year, matched exactly (e.g. "2010").
    #[arg(long)]
    year: Option<String>,

    /// Minimum rating on a 0-10 scale (e.g. "7").
    #[arg(long)]
    min_rating: Option<String>,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// IMDb ID (e.g. "tt0372784").
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `favorites` subcommand.
#[derive(clap::Args)]
struct FavoritesCommand {
    /// Favorites subcommand to run.
    #[command(subcommand)]
    command: FavoritesSubcommands,
}

/// Available favorites subcommands.
#[derive(Subcommand)]
enum FavoritesSubcommands {
    /// List favorite movies.
    List,
    /// Add a movie to favorites, or remove it if already there.
    Toggle(ToggleArgs),
}

/// Arguments for the `favorites toggle` subcommand.
#[derive(clap::Args)]
struct ToggleArgs {
    /// IMDb ID (e.g. "tt0372784").
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `rate` subcommand.
#[derive(clap::Args)]
struct RateArgs {
    /// IMDb ID (e.g. "tt0372784").
    #[arg(long, required = true)]
    id: String,

    /// Rating from 1 to 5.
    #[arg(
        long,
        required = true,
        value_parser = clap::value_parser!(u8).range(i64::from(Rating::MIN)..=i64::from(Rating::MAX)),
    )]
    value: u8,
}

/// Arguments for the `ratings` subcommand.
#[derive(clap::Args)]
struct RatingsCommand {
    /// Ratings subcommand to run.
    #[command(subcommand)]
    command: RatingsSubcommands,
}

/// Available ratings subcommands.
#[derive(Subcommand)]
enum RatingsSubcommands {
    /// List saved ratings.
    List,
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
    /// Show the effective configuration.
    Show,
    /// Save the OMDB API key.
    SetApiKey(SetApiKeyArgs),
}

/// Arguments for the `config set-api-key` subcommand.
#[derive(clap::Args)]
struct SetApiKeyArgs {
    /// OMDB API key.
    key: String,
}

/// Builds an `OmdbClient` from config, with `OMDB_API_KEY` taking precedence.
///
/// # Errors
///
/// Returns an error if no API key is available, the config cannot be read,
/// or the client fails to build.
fn build_omdb_client(dir: Option<&Path>) -> Result<OmdbClient> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    let api_key = config
        .api_key(std::env::var(API_KEY_ENV).ok())
        .with_context(|| {
            format!(
                "OMDB API key is not configured (run `moviehub config set-api-key <KEY>` or set {API_KEY_ENV})"
            )
        })?;

    OmdbClient::builder()
        .base_url(config.base_url()?)
        .api_key(api_key)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build OMDB client")
}

/// Opens the favorites store in the data directory.
fn open_favorites(dir: Option<&Path>) -> Result<FavoritesStore<SqliteStorage>> {
    let storage = open_store(dir).context("failed to open store")?;
    Ok(FavoritesStore::new(storage))
}

/// Logs the header line with the favorites badge.
fn render_header(favorites: &FavoritesStore<SqliteStorage>) {
    tracing::info!("MovieHub | Favorites: {}", favorites.count());
}

/// Logs one line per movie, marking favorites with a star.
fn render_listing(movies: &[MovieRecord], favorites: &FavoritesStore<SqliteStorage>) {
    let favorite_ids: Vec<MovieId> = favorites
        .list_favorites()
        .into_iter()
        .map(|m| m.id)
        .collect();

    tracing::info!("  ID\t\tYear\tTitle");
    for movie in movies {
        let marker = if favorite_ids.contains(&movie.id) {
            "★"
        } else {
            " "
        };
        tracing::info!(
            "{} {}\t{}\t{}",
            marker,
            movie.id,
            movie.year.as_deref().unwrap_or("-"),
            movie.title,
        );
    }
}

/// Runs the `movies` subcommand.
///
/// # Errors
///
/// Returns an error if the client or the store cannot be set up.
#[instrument(skip_all)]
async fn run_movies(args: &MoviesArgs, dir: Option<&Path>) -> Result<()> {
    let client = build_omdb_client(dir)?;
    let favorites = open_favorites(dir)?;

    let category = match args.category.parse::<Category>() {
        Ok(category) => Some(category),
        Err(e) => {
            tracing::warn!("{}; listing \"{}\" instead", e, FALLBACK_TERM);
            None
        }
    };
    let selector = category.map_or(args.category.as_str(), |c| c.selector());
    let search = args
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    render_header(&favorites);
    match (search, category) {
        (Some(term), _) => tracing::info!("Search results for \"{}\"", term),
        (None, Some(c)) => tracing::info!("{}", c.title()),
        (None, None) => tracing::info!("Movies"),
    }

    let fetched = fetch_movies(&client, selector, search).await;
    if fetched.data.is_empty() {
        let state = if search.is_some() {
            "No Movies Found"
        } else {
            "No Results"
        };
        render_empty(state, fetched.error.as_deref());
        return Ok(());
    }

    if let Some(genre) = args.genre.as_deref().map(str::trim).filter(|g| !g.is_empty())
        && !genre_names().any(|name| name.eq_ignore_ascii_case(genre))
    {
        tracing::warn!(
            "Unknown genre \"{}\"; matching it against titles. Known genres: {}",
            genre,
            genre_names().collect::<Vec<_>>().join(", "),
        );
    }

    let filter = FilterSpec {
        genre: args.genre.clone(),
        year: args.year.clone(),
        min_rating: args.min_rating.clone(),
    };
    let movies = apply_filters(&fetched.data, &filter);
    if movies.is_empty() {
        tracing::info!("No Results");
        tracing::info!("Try adjusting your filters.");
        return Ok(());
    }

    render_listing(&movies, &favorites);
    if filter.is_active() {
        tracing::info!("Total: {} of {} movies", movies.len(), fetched.data.len());
    } else {
        tracing::info!("Total: {} movies", movies.len());
    }

    Ok(())
}

/// Logs an empty state with the provider's reason, if any.
fn render_empty(state: &str, reason: Option<&str>) {
    tracing::info!("{}", state);
    if let Some(reason) = reason {
        tracing::info!("Reason: {}", reason);
    }
}

/// Runs the `featured` subcommand.
///
/// # Errors
///
/// Returns an error if the client or the store cannot be set up.
#[instrument(skip_all)]
async fn run_featured(dir: Option<&Path>) -> Result<()> {
    let client = build_omdb_client(dir)?;
    let favorites = open_favorites(dir)?;

    render_header(&favorites);
    tracing::info!("Featured");

    let fetched = fetch_featured(&client).await;
    if fetched.data.is_empty() {
        render_empty("No Results", fetched.error.as_deref());
        return Ok(());
    }

    render_listing(&fetched.data, &favorites);
    Ok(())
}

/// Logs the detail view for one movie.
fn render_details(details: &MovieDetails, is_favorite: bool) {
    let record = &details.record;
    let na = |v: Option<&str>| v.unwrap_or("N/A").to_owned();

    tracing::info!(
        "{} ({})",
        record.title,
        record.year.as_deref().unwrap_or("-")
    );
    tracing::info!("ID: {}", record.id);
    tracing::info!("Rated: {}", na(details.rated.as_deref()));
    tracing::info!("Released: {}", na(details.released.as_deref()));
    tracing::info!("Runtime: {}", na(details.runtime.as_deref()));
    tracing::info!(
        "Genre: {}",
        if record.genres.is_empty() {
            String::from("N/A")
        } else {
            record.genres.join(", ")
        }
    );
    tracing::info!("Director: {}", na(details.director.as_deref()));
    tracing::info!("Writer: {}", na(details.writer.as_deref()));
    tracing::info!("Actors: {}", na(details.actors.as_deref()));
    tracing::info!("Language: {}", na(details.language.as_deref()));
    tracing::info!("Country: {}", na(details.country.as_deref()));
    tracing::info!("Awards: {}", na(details.awards.as_deref()));
    tracing::info!(
        "IMDb Rating: {} ({} votes)",
        record
            .rating
            .map_or_else(|| String::from("N/A"), |r| format!("{r:.1}/10")),
        na(details.imdb_votes.as_deref()),
    );
    tracing::info!("Box Office: {}", na(details.box_office.as_deref()));
    tracing::info!("Poster: {}", na(record.poster.as_deref()));
    tracing::info!("Plot: {}", na(record.plot.as_deref()));
    tracing::info!("Favorite: {}", if is_favorite { "yes" } else { "no" });
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the client or the store cannot be set up.
#[instrument(skip_all)]
async fn run_details(args: &DetailsArgs, dir: Option<&Path>) -> Result<()> {
    let client = build_omdb_client(dir)?;
    let favorites = open_favorites(dir)?;

    let fetched = fetch_movie_details(&client, &args.id).await;
    let Some(details) = fetched.data else {
        render_empty("Movie not found", fetched.error.as_deref());
        return Ok(());
    };

    render_details(&details, favorites.is_favorite(&details.record.id));
    Ok(())
}

/// Runs the `favorites list` subcommand.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
#[instrument(skip_all)]
fn run_favorites_list(dir: Option<&Path>) -> Result<()> {
    let favorites = open_favorites(dir)?;

    render_header(&favorites);
    tracing::info!("My Favorites");

    let movies = favorites.list_favorites();
    if movies.is_empty() {
        tracing::info!("No Favorites Yet");
        tracing::info!("Run `moviehub favorites toggle --id <ID>` to add movies here.");
        return Ok(());
    }

    render_listing(&movies, &favorites);
    tracing::info!("Total: {} favorites", movies.len());
    Ok(())
}

/// Runs the `favorites toggle` subcommand.
///
/// Removing a favorite needs no network access; adding one fetches the
/// movie's details first.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or written, or the client
/// cannot be set up when the movie must be fetched.
#[instrument(skip_all)]
async fn run_favorites_toggle(args: &ToggleArgs, dir: Option<&Path>) -> Result<()> {
    let favorites = open_favorites(dir)?;
    let id = MovieId::from(args.id.trim());

    let existing = favorites
        .list_favorites()
        .into_iter()
        .find(|m| m.id == id);
    let record = if let Some(record) = existing {
        record
    } else {
        let client = build_omdb_client(dir)?;
        let fetched = fetch_movie_details(&client, id.as_str()).await;
        let Some(details) = fetched.data else {
            render_empty("Movie not found", fetched.error.as_deref());
            return Ok(());
        };
        details.record
    };

    let mut changes = favorites.subscribe();
    let is_favorite = favorites
        .toggle_favorite(&record)
        .context("failed to update favorites")?;

    if is_favorite {
        tracing::info!("Added \"{}\" to favorites", record.title);
    } else {
        tracing::info!("Removed \"{}\" from favorites", record.title);
    }
    if let Ok(FavoritesChanged { count }) = changes.try_recv() {
        tracing::info!("Favorites: {}", count);
    }

    Ok(())
}

/// Runs the `rate` subcommand.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or written.
#[instrument(skip_all)]
fn run_rate(args: &RateArgs, dir: Option<&Path>) -> Result<()> {
    let rating = Rating::new(args.value)?;
    let id = MovieId::from(args.id.trim());

    let storage = open_store(dir).context("failed to open store")?;
    RatingsStore::new(storage)
        .submit_rating(&id, rating)
        .context("failed to save rating")?;

    tracing::info!("Rated {}: {}/{}", id, rating, Rating::MAX);
    Ok(())
}

/// Formats a rating as filled and empty stars.
fn stars(value: u8) -> String {
    let filled = value.min(Rating::MAX);
    format!(
        "{}{}",
        "★".repeat(usize::from(filled)),
        "☆".repeat(usize::from(Rating::MAX.saturating_sub(filled)))
    )
}

/// Runs the `ratings list` subcommand.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
#[instrument(skip_all)]
fn run_ratings_list(dir: Option<&Path>) -> Result<()> {
    let storage = open_store(dir).context("failed to open store")?;
    let ratings = RatingsStore::new(storage).ratings();

    if ratings.is_empty() {
        tracing::info!("No Ratings Yet");
        return Ok(());
    }

    tracing::info!("ID\t\tRating");
    for (id, value) in &ratings {
        tracing::info!("{}\t{} ({}/{})", id, stars(*value), value, Rating::MAX);
    }
    tracing::info!("Total: {} ratings", ratings.len());
    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be read.
#[instrument(skip_all)]
fn run_config_show(dir: Option<&Path>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    tracing::info!("Config file: {}", config_path.display());
    tracing::info!(
        "API key: {}",
        config
            .masked_api_key()
            .unwrap_or_else(|| String::from("(not set)"))
    );
    if std::env::var(API_KEY_ENV).is_ok_and(|v| !v.trim().is_empty()) {
        tracing::info!("API key override: {} is set", API_KEY_ENV);
    }
    tracing::info!("Base URL: {}", config.base_url()?);
    Ok(())
}

/// Runs the `config set-api-key` subcommand.
///
/// # Errors
///
/// Returns an error if the key is blank or the config cannot be written.
#[instrument(skip_all)]
fn run_config_set_api_key(args: &SetApiKeyArgs, dir: Option<&Path>) -> Result<()> {
    let key = args.key.trim();
    anyhow::ensure!(!key.is_empty(), "API key must not be empty");

    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;
    config.omdb.api_key = Some(String::from(key));
    config.save(&config_path).context("failed to save config")?;

    tracing::info!("Saved API key to {}", config_path.display());
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_deref();
    match cli.command {
        Commands::Movies(args) => run_movies(&args, dir).await,
        Commands::Featured => run_featured(dir).await,
        Commands::Details(args) => run_details(&args, dir).await,
        Commands::Favorites(fav) => match fav.command {
            FavoritesSubcommands::List => run_favorites_list(dir),
            FavoritesSubcommands::Toggle(args) => run_favorites_toggle(&args, dir).await,
        },
        Commands::Rate(args) => run_rate(&args, dir),
        Commands::Ratings(ratings) => match ratings.command {
            RatingsSubcommands::List => run_ratings_list(dir),
        },
        Commands::Config(cfg) => match cfg.command {
            ConfigSubcommands::Show => run_config_show(dir),
            ConfigSubcommands::SetApiKey(args) => run_config_set_api_key(&args, dir),
        },
    }
}
