use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tmdb-provider")]
#[command(author, version, about = "Read-only TMDB data sources for declarative configuration")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print provider metadata and every schema as JSON
    Schema,

    /// Configure the provider and read one data source
    Read {
        /// Data source type name, e.g. tmdb_movie or movie
        #[arg(required = true)]
        data_source: String,

        /// Path to client settings file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// TMDB API key (falls back to TMDB_KEY)
        #[arg(long)]
        key: Option<String>,

        /// Movie ID for the movie data source
        #[arg(long)]
        id: Option<i64>,

        /// Search text for the search data source
        #[arg(long)]
        query: Option<String>,

        /// Raw data source configuration as a JSON object
        #[arg(long)]
        input: Option<String>,
    },

    /// Validate a client settings file
    Validate {
        /// Settings file to validate
        config: PathBuf,
    },
}
