//! Command-line entry point for the crawler.

use anyhow::Result;
use clap::Parser;
use sitecrawl::CrawlerBuilder;
use tracing_subscriber::EnvFilter;

/// Breadth-first web crawler with per-domain politeness and domain
/// scoping.
#[derive(Debug, Parser)]
#[command(name = "sitecrawl", version, about)]
struct Cli {
    /// Comma-separated list of seed domains to crawl
    #[arg(long)]
    domains: String,

    /// Maximum crawl depth (seeds are depth 0); omit for unlimited
    #[arg(long)]
    depth: Option<u32>,

    /// Delay in milliseconds between requests to the same domain
    #[arg(long, default_value_t = 1000)]
    delay: u64,

    /// Number of concurrent crawl workers
    #[arg(long, default_value_t = 1)]
    workers: usize,

    /// Crawl only the seed domains and their subdomains
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    limit_crawling: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = CrawlerBuilder::new()
        .seed_domains(&cli.domains)
        .delay_ms(cli.delay)
        .workers(cli.workers)
        .limit_to_seeds(cli.limit_crawling);
    if let Some(depth) = cli.depth {
        builder = builder.max_depth(depth);
    }

    let crawler = builder.build()?;
    let stats = crawler.stats();
    crawler.start_crawl().await?;

    eprintln!("{stats}");
    Ok(())
}
