//! sanbi - eBay market lookups, sold-price scraping and Messenger replies.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sanbi::commands::{Button, MessageCommand, SearchCommand, SoldCommand};
use sanbi::config::{Config, OutputFormat};
use sanbi::ebay::models::DEFAULT_LIMIT;
use sanbi::ebay::{EbayClient, KeywordSearch};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sanbi",
    version,
    about = "eBay market lookups, sold-price scraping and Messenger replies",
    long_about = "Searches the eBay Browse API by keyword or image, scrapes sold-listing prices \
                  through ScrapeOps, and sends Messenger replies. Credentials come from the \
                  config file or EBAY_PROD_APP_ID, EBAY_PROD_CERT_ID, FB_PAGE_ACCESS_TOKEN and \
                  SCRAPEOPS_API_KEY (a .env file is loaded first)."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the eBay credentials yield an application token
    Token,

    /// Search eBay listings by keyword
    #[command(alias = "s")]
    Search {
        /// Search query
        query: String,

        /// Page size
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,

        /// Result offset
        #[arg(short, long, default_value_t = 0)]
        offset: u32,

        /// Minimum price (USD)
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum price (USD)
        #[arg(long)]
        max_price: Option<f64>,
    },

    /// Search eBay listings with an image file
    #[command(alias = "i")]
    Image {
        /// Path to the image
        path: PathBuf,

        /// Page size
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,

        /// Result offset
        #[arg(short, long, default_value_t = 0)]
        offset: u32,
    },

    /// Scrape recent sold prices for a search term
    Sold {
        /// Search term
        term: String,
    },

    /// Send a Messenger reply
    Send {
        /// Page-scoped id of the recipient
        recipient: String,

        /// Message text
        text: String,

        /// Title of a call-to-action button
        #[arg(long, requires = "button_url")]
        button_title: Option<String>,

        /// URL the button opens
        #[arg(long, requires = "button_title")]
        button_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // A missing .env is fine; the environment may already be set
    dotenv::dotenv().ok();

    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::Token => {
            let client = EbayClient::new(&config.ebay);
            let token = client.get_token().await.context("Failed to obtain eBay token")?;
            println!("Obtained eBay application token ({} chars)", token.len());
        }

        Commands::Search { query, limit, offset, min_price, max_price } => {
            let search = KeywordSearch::new(query).page(limit, offset).price_range(min_price, max_price);
            let output = SearchCommand::new(config).execute(&search).await?;
            println!("{}", output);
        }

        Commands::Image { path, limit, offset } => {
            let output = SearchCommand::new(config).execute_image(&path, limit, offset).await?;
            println!("{}", output);
        }

        Commands::Sold { term } => {
            let (_, output) = SoldCommand::new(config).execute(&term).await;
            println!("{}", output);
        }

        Commands::Send { recipient, text, button_title, button_url } => {
            let button = match (button_title, button_url) {
                (Some(title), Some(url)) => Some(Button { title, url }),
                _ => None,
            };

            let (_, output) = MessageCommand::new(config).execute(&recipient, &text, button.as_ref()).await;
            println!("{}", output);
        }
    }

    Ok(())
}
