//! Zeta CLI: set-array inspection, mesh topology, and neighbour queries.

use clap::{Parser, Subcommand};
use glam::Vec3;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "zeta")]
#[command(version, about = "Zeta: packed set arrays, spatial hashing, and mesh adjacency")]
struct Cli {
    /// Log at debug level (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a binary set-array file.
    Inspect {
        /// Path to the set-array file.
        path: String,

        /// Element type stored in the file (int, float, double, vector).
        #[arg(short, long, default_value = "int")]
        kind: String,
    },

    /// Compute and summarize the adjacency of a JSON mesh.
    Topology {
        /// Path to mesh (JSON).
        path: String,
    },

    /// Find mesh vertices within a radius of a point.
    Query {
        /// Path to mesh (JSON).
        path: String,

        /// Query point as `x,y,z`.
        #[arg(short, long, value_parser = parse_point, allow_hyphen_values = true)]
        point: Vec3,

        /// Search radius (exclusive).
        #[arg(short, long)]
        radius: f32,

        /// Hash grid config (TOML). Defaults are used when absent.
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Validate a mesh or hash grid config.
    Validate {
        /// Path to mesh (.json) or config (.toml) file.
        path: String,
    },

    /// Write a procedural mesh as JSON.
    Generate {
        /// Which mesh to generate (grid, octahedron, two-triangles).
        kind: String,

        /// Output JSON file path.
        output: String,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Inspect { .. } => "inspect",
            Commands::Topology { .. } => "topology",
            Commands::Query { .. } => "query",
            Commands::Validate { .. } => "validate",
            Commands::Generate { .. } => "generate",
        }
    }
}

fn parse_point(s: &str) -> Result<Vec3, String> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f32>().map_err(|e| format!("'{c}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match coords.as_slice() {
        &[x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!("expected three comma-separated values, got {}", coords.len())),
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(command = cli.command.name(), "running subcommand");

    let result = match cli.command {
        Commands::Inspect { path, kind } => commands::inspect(&path, &kind),
        Commands::Topology { path } => commands::topology(&path),
        Commands::Query {
            path,
            point,
            radius,
            config,
        } => commands::query(&path, point, radius, config.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Generate { kind, output } => commands::generate(&kind, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
