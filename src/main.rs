//! TCG card resolver CLI
//!
//! Resolves the best card artwork for a Pokedex number or range and prints
//! one line per number. Results persist in the card cache, so repeated
//! invocations skip the network.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tcg_resolver::{CacheStore, CardResolver, TcgCard, TcgClient, TcgConfig};

/// Pokemon TCG card lookup with rarity ranking and a persistent cache
#[derive(Parser, Debug)]
#[command(name = "tcg_resolver")]
#[command(version, about, long_about = None)]
#[command(group = ArgGroup::new("action")
    .required(true)
    .multiple(true)
    .args(["card", "start", "invalidate"]))]
struct Args {
    /// Resolve a single card by national Pokedex number
    #[arg(short, long)]
    card: Option<u32>,

    /// Start of a Pokedex number range to resolve
    #[arg(long, requires = "end")]
    start: Option<u32>,

    /// End of a Pokedex number range to resolve
    #[arg(long, requires = "start")]
    end: Option<u32>,

    /// Clear the card cache (memory and disk) before resolving
    #[arg(long, default_value_t = false)]
    invalidate: bool,

    /// Card catalog API base URL
    #[arg(long, default_value_t = tcg_resolver::DEFAULT_BASE_URL.to_string())]
    base_url: String,

    /// Catalog API key (falls back to the POKEMON_TCG_API_KEY environment
    /// variable)
    #[arg(long)]
    api_key: Option<String>,

    /// Directory for the cache blob (default: platform cache directory)
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let api_key = args
        .api_key
        .or_else(|| std::env::var("POKEMON_TCG_API_KEY").ok());
    if api_key.is_none() {
        log::warn!("No API key configured, range queries will resolve to no cards");
    }

    let config = TcgConfig {
        base_url: args.base_url,
        api_key,
        ..TcgConfig::default()
    };

    let client = match TcgClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let store = match args.cache_dir {
        Some(ref dir) => CacheStore::in_dir(dir),
        None => CacheStore::new(),
    };

    let resolver = CardResolver::new(client, store);

    if args.invalidate {
        resolver.invalidate_all();
    }

    if let Some(number) = args.card {
        let card = resolver.resolve_card(number).await;
        print_card(number, card.as_ref());
    }

    if let (Some(start), Some(end)) = (args.start, args.end) {
        if start > end {
            log::error!("--start must not exceed --end");
            std::process::exit(1);
        }
        let results = resolver.resolve_card_range(start, end).await;
        let mut numbers: Vec<u32> = results.keys().copied().collect();
        numbers.sort_unstable();
        for number in numbers {
            print_card(number, results.get(&number).and_then(|card| card.as_ref()));
        }
    }

    resolver.flush();
}

fn print_card(number: u32, card: Option<&TcgCard>) {
    match card {
        Some(card) => println!(
            "#{}: {} [{} / {}] {}",
            number,
            card.name,
            card.set.name,
            card.rarity.as_deref().unwrap_or("unknown rarity"),
            card.images.large
        ),
        None => println!("#{}: no card found", number),
    }
}
