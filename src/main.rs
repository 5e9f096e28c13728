use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paperquery::Compiler;

#[derive(Parser)]
#[command(name = "paperquery")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiles the preprint search DSL into the archive's query grammar")]
#[command(long_about = None)]
struct Cli {
    /// Query string to compile. Reads a single line from stdin when omitted.
    query: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    /// Print the intermediate tokens and AST alongside the compiled query.
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("paperquery={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let query = match cli.query {
        Some(query) => query,
        None => {
            let mut line = String::new();
            io::stdin().read_to_string(&mut line)?;
            line.trim().to_string()
        }
    };

    info!(%query, "compiling");

    let compiler = Compiler::new().with_debug(cli.debug);
    match compiler.parse(&query) {
        Ok(outcome) => {
            if let (Some(tokens), Some(expr)) = (&outcome.tokens, &outcome.expr) {
                println!("tokens: {}", serde_json::to_string_pretty(tokens)?);
                println!("ast: {}", serde_json::to_string_pretty(expr)?);
            }
            println!("{}", outcome.query.echo);
        }
        Err(err) => {
            println!("Couldn't understand that search: {} ({} error)", err.message, err.stage);
        }
    }

    Ok(())
}
