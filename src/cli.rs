// src/cli.rs
// =============================================================================
// Command-line interface, built with clap's derive API.
//
// Each subcommand maps onto one tool:
//   search  -> SearXNG query
//   fetch   -> single page text
//   crawl   -> breadth-first crawl report
//   tools   -> the tool catalog as JSON
//   call    -> any tool by name with JSON arguments
// =============================================================================

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "searxng-crawl",
    version,
    about = "Search the web through SearXNG, fetch pages and crawl sites as readable text",
    long_about = "searxng-crawl forwards queries to a SearXNG instance (SEARXNG_URL), extracts the \
                  readable text of single pages, and crawls sites breadth-first within a depth \
                  and page budget."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the web through the configured SearXNG instance
    ///
    /// Example: searxng-crawl search "site:github.com scraper" --limit 5
    Search {
        /// The search query (supports engine syntax such as site:)
        query: String,

        /// Maximum number of results to print
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Category: general, images, videos, news, science, files, music, social
        #[arg(long)]
        category: Option<String>,

        /// Comma-separated list of engines
        #[arg(long)]
        engines: Option<String>,

        /// Language code (en, fr, de, auto, ...)
        #[arg(long)]
        language: Option<String>,

        /// Time range: day, month or year
        #[arg(long, value_parser = ["day", "month", "year"])]
        time_range: Option<String>,

        /// Safe search level: 0 (none), 1 (moderate), 2 (strict)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=2))]
        safesearch: Option<u8>,

        /// Result page number
        #[arg(long, default_value_t = 1)]
        pageno: u32,
    },

    /// Fetch one page and print its title and main text
    ///
    /// Example: searxng-crawl fetch https://www.rust-lang.org
    Fetch {
        /// URL to fetch
        url: String,
    },

    /// Crawl a website breadth-first and print each page's text
    ///
    /// Example: searxng-crawl crawl https://example.com --max-depth 1 --max-pages 5
    Crawl {
        /// Starting URL (depth 0)
        url: String,

        /// Maximum link depth to follow (capped at 5)
        #[arg(long, default_value_t = 2)]
        max_depth: usize,

        /// Maximum number of pages to record (capped at 50)
        #[arg(long, default_value_t = 10)]
        max_pages: usize,

        /// Follow links to other hosts too
        #[arg(long)]
        all_domains: bool,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the tool catalog (names, descriptions, input schemas) as JSON
    Tools,

    /// Call a tool by name with JSON arguments
    ///
    /// Example: searxng-crawl call web_fetch --args '{"url":"https://example.com"}'
    Call {
        /// Tool name: search, web_fetch or web_crawl
        name: String,

        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
}
