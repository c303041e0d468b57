//! Terravec CLI - run the embedding toolkit demos from the terminal.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::DatasetArgs;

#[derive(Parser)]
#[command(name = "terravec")]
#[command(author, version, about = "Terravec - geospatial embedding model demos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the synthetic dataset and summarize it per class
    Dataset {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Emit the raw points as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Project the dataset to 2D with power-iteration PCA
    Project {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Number of principal components to extract
        #[arg(short, long, default_value = "2")]
        components: usize,

        /// Emit the projection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Cluster the dataset with spherical k-means
    Cluster {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Number of clusters
        #[arg(short, long, default_value = "6")]
        k: usize,

        /// Iteration cap
        #[arg(short, long, default_value = "30")]
        max_iterations: usize,

        /// Clustering seed (independent of the dataset seed)
        #[arg(long, default_value = "7")]
        cluster_seed: u64,

        /// Emit the assignment as JSON
        #[arg(long)]
        json: bool,
    },

    /// Train and evaluate the nearest-centroid classifier
    Classify {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Fraction of points used for training
        #[arg(short, long, default_value = "0.3")]
        train_ratio: f64,

        /// Split seed (independent of the dataset seed)
        #[arg(long, default_value = "99")]
        split_seed: u64,

        /// Emit the evaluation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the points most similar to a chosen point
    Similar {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Id of the query point
        #[arg(short, long, default_value = "0")]
        point: usize,

        /// Number of neighbors to return
        #[arg(short, long, default_value = "5")]
        k: usize,

        /// Emit the matches as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Dataset { dataset, json } => commands::dataset::run(&dataset, json),
        Commands::Project {
            dataset,
            components,
            json,
        } => commands::project::run(&dataset, components, json),
        Commands::Cluster {
            dataset,
            k,
            max_iterations,
            cluster_seed,
            json,
        } => commands::cluster::run(&dataset, k, max_iterations, cluster_seed, json),
        Commands::Classify {
            dataset,
            train_ratio,
            split_seed,
            json,
        } => commands::classify::run(&dataset, train_ratio, split_seed, json),
        Commands::Similar {
            dataset,
            point,
            k,
            json,
        } => commands::similar::run(&dataset, point, k, json),
    }
}
