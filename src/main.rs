// src/main.rs
// =============================================================================
// Entry point.
//
// What happens here:
// 1. Initialise logging (tracing -> stderr, filtered by RUST_LOG)
// 2. Load configuration from the environment
// 3. Parse the command line and dispatch to the matching tool
// 4. Print the tool's text to stdout and exit (0 = success, 2 = error)
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod extract;
mod fetch;
mod search;
mod tools;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::Config;
use search::SearchParams;
use tools::{CrawlArgs, Toolbox};

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so stdout only carries tool output
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = Config::from_env();
    let toolbox = Toolbox::new(&config)?;

    match cli.command {
        Commands::Search {
            query,
            limit,
            category,
            engines,
            language,
            time_range,
            safesearch,
            pageno,
        } => {
            let params = SearchParams {
                query,
                limit,
                category,
                engines,
                language,
                time_range,
                safesearch,
                pageno,
            };
            let text = toolbox.search(&params).await?;
            print!("{}", text);
        }
        Commands::Fetch { url } => {
            let text = toolbox.fetch(&url).await?;
            println!("{}", text);
        }
        Commands::Crawl {
            url,
            max_depth,
            max_pages,
            all_domains,
            json,
        } => {
            let args = CrawlArgs {
                url,
                max_depth,
                max_pages,
                same_domain: !all_domains,
            };
            let report = toolbox.crawl_report(&args).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
        }
        Commands::Tools => {
            println!("{}", serde_json::to_string_pretty(&tools::list_tools())?);
        }
        Commands::Call { name, args } => {
            let args: serde_json::Value =
                serde_json::from_str(&args).context("--args must be a JSON object")?;
            let output = toolbox.call(&name, args).await;
            if output.is_error {
                eprintln!("{}", output.text);
                return Ok(2);
            }
            print!("{}", output.text);
        }
    }

    Ok(0)
}
