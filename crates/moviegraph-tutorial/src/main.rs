//! CLI entry point for the moviegraph tutorial.
//!
//! Step reports go to stdout; logs go to stderr.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use moviegraph_graph::GraphClient;
use moviegraph_tutorial::{load_settings, Tutorial};

#[derive(Parser)]
#[command(name = "moviegraph")]
#[command(about = "Walk through creating and querying nodes and relationships in Neo4j")]
struct Cli {
    /// Config file prefix (default: moviegraph).
    #[arg(short, long, default_value = "moviegraph")]
    config: String,

    /// Keep existing data instead of clearing the database first.
    #[arg(long)]
    no_reset: bool,

    /// Print the run summary as JSON instead of one line per step.
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if cli.log_json {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }

    let mut settings = load_settings(&cli.config)?;
    if cli.no_reset {
        settings.tutorial.reset_on_start = false;
    }

    // Connect to Neo4j.
    let graph = GraphClient::connect(&settings.neo4j).await?;
    let tutorial = Tutorial::new(graph, settings.tutorial);

    let text = !cli.json;
    let summary = tutorial
        .run(|outcome| {
            if text {
                println!("{outcome}");
            }
        })
        .await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
