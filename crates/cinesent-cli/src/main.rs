mod catalog;
mod predict;
mod session;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cinesent_core::AppConfig;
use cinesent_pipeline::{ArtifactPaths, SentimentPipeline};

#[derive(Debug, Parser)]
#[command(name = "cinesent")]
#[command(about = "Classify movie reviews as positive or negative")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// List the movie catalog
    Movies {
        /// Only list titles in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Classify a single review, read from the argument or stdin
    Predict {
        /// Movie the review is for
        #[arg(long)]
        movie: String,

        /// Category to look the movie up in (defaults to all categories)
        #[arg(long)]
        category: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Review text; read from stdin when omitted
        text: Option<String>,
    },
    /// Interactive session with prediction history and feedback (default)
    Session {
        /// Category to pick movies from
        #[arg(long)]
        category: Option<String>,

        /// Movie to start reviewing
        #[arg(long)]
        movie: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let config = cinesent_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = cinesent_core::load_catalog(&config.movies_path)?;

    match cli.command {
        Some(Commands::Movies { category }) => {
            catalog::print_catalog(&catalog, category.as_deref(), &mut std::io::stdout().lock())
        }
        Some(Commands::Predict {
            movie,
            category,
            json,
            text,
        }) => {
            let pipeline = load_pipeline(&config)?;
            let movie = catalog::resolve_movie(&catalog, category.as_deref(), &movie)?;
            predict::run_predict(&pipeline, &movie.title, text, json)
        }
        Some(Commands::Session { category, movie }) => {
            let pipeline = load_pipeline(&config)?;
            session::run_interactive(&pipeline, &catalog, &config, category, movie)
        }
        None => {
            let pipeline = load_pipeline(&config)?;
            session::run_interactive(&pipeline, &catalog, &config, None, None)
        }
    }
}

/// Load artifacts once; any failure aborts startup.
fn load_pipeline(config: &AppConfig) -> anyhow::Result<SentimentPipeline> {
    let paths = ArtifactPaths::from_config(config);
    let pipeline = SentimentPipeline::load(&paths)?;
    tracing::info!(?pipeline, "sentiment pipeline ready");
    Ok(pipeline)
}
