//! moviesearch - search The Movie Database from the terminal.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use moviesearch_api::tmdb::{
    ImageSize, LocalMovieCatalog, SearchMovieParams, TmdbClient, poster_url,
};
use moviesearch_tui::run_search_browser;

/// Environment variable holding the TMDB API read access token.
const TOKEN_ENV: &str = "TMDB_API_TOKEN";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse search results interactively via TUI.
    Browse,
    /// Run a single movie search and print the results.
    Search(SearchArgs),
    /// Resolve an image path to its asset URL.
    ImageUrl(ImageUrlArgs),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "batman").
    #[arg(long, required = true)]
    query: String,
    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `image-url` subcommand.
#[derive(clap::Args)]
struct ImageUrlArgs {
    /// Relative image path as returned by TMDB (e.g. "/abc.jpg").
    #[arg(long)]
    path: String,
    /// Image size: "w500" or "original".
    #[arg(long, default_value = "w500")]
    size: ImageSize,
}

/// Returns `false` for commands that own the terminal, whose screen the
/// fmt layer would otherwise write over.
const fn logs_to_terminal(command: &Commands) -> bool {
    !matches!(command, Commands::Browse)
}

/// Builds a `TmdbClient` from `TMDB_API_TOKEN` and the config file.
///
/// A missing token is not an error here; searches report it instead.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(dir: Option<&PathBuf>) -> Result<TmdbClient> {
    let config_path = resolve_config_path(dir)?;
    let config = AppConfig::load(&config_path)?;

    let mut builder = TmdbClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(token) = config.resolve_api_token(std::env::var(TOKEN_ENV).ok()) {
        builder = builder.api_token(token);
    } else {
        tracing::debug!(path = %config_path.display(), "no TMDB API token configured");
    }
    if let Some(base_url) = config.base_url()? {
        builder = builder.base_url(base_url);
    }

    builder.build().context("failed to build TMDB client")
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the TUI fails.
async fn run_browse(dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(dir)?;
    run_search_browser(client)
        .await
        .context("search browser TUI failed")
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the search fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(dir)?;

    let params = SearchMovieParams::new(args.query.trim()).page(args.page);
    if params.is_blank() {
        anyhow::bail!("--query must not be blank");
    }

    let response = client
        .search_movie(&params)
        .await
        .context("TMDB search/movie request failed")?;

    tracing::info!(
        "Page {}/{} ({} results)",
        response.page,
        response.total_pages,
        response.total_results
    );
    tracing::info!("ID\tTitle\t\t\tReleaseDate\tPoster");
    for movie in &response.results {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            movie.id,
            movie.title,
            movie.release_date.as_deref().unwrap_or("-"),
            poster_url(movie.poster_path.as_deref(), ImageSize::W500)
                .as_deref()
                .unwrap_or("-"),
        );
    }

    Ok(())
}

/// Runs the `image-url` subcommand.
fn run_image_url(args: &ImageUrlArgs) {
    match poster_url(Some(args.path.trim()), args.size) {
        Some(url) => tracing::info!("{url}"),
        None => tracing::info!("No image available"),
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let writer = if logs_to_terminal(&cli.command) {
        BoxMakeWriter::new(std::io::stdout)
    } else {
        BoxMakeWriter::new(std::io::sink)
    };

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(writer);

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

    match cli.command {
        Commands::Browse => run_browse(cli.dir.as_ref()).await,
        Commands::Search(args) => run_search(&args, cli.dir.as_ref()).await,
        Commands::ImageUrl(args) => {
            run_image_url(&args);
            Ok(())
        }
    }
}
