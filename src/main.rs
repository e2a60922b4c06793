//! Lambda Cache demo host
//!
//! Builds one cache at startup, the way a serverless function would in its
//! global context, then serves a series of lookups from the handler path.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lambda_cache::{Cache, CacheOptions, Config};

/// Per-key TTL handed out by the demo retrieval.
const VALUE_TTL: Duration = Duration::from_secs(2);

/// Main entry point for the demo.
///
/// # Startup Sequence
/// 1. Load configuration from environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Create the cache once
/// 4. Run the lookups and print final statistics
fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // Defaults to "info", or "debug" when DEBUG is set; RUST_LOG overrides
    let default_filter = if config.debug_logging {
        "lambda_cache=debug,lambda_cache_demo=debug"
    } else {
        "lambda_cache=info,lambda_cache_demo=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Configuration loaded: cleanup_interval={:?}, debug_logging={}, iterations={}",
        config.cleanup_interval, config.debug_logging, config.iterations
    );

    let options = CacheOptions::from_config(&config).retrieve(get_info);
    let mut cache = Cache::new(options).context("failed to build cache")?;

    let failures = serve_lookups(&mut cache, config.iterations);
    if failures > 0 {
        warn!("{} of {} lookups failed", failures, config.iterations);
    }

    let stats = serde_json::to_string(&cache.stats()).context("failed to encode stats")?;
    println!("{stats}");

    Ok(())
}

/// Looks up `key1`/`key2` alternately, the way repeated handler invocations
/// would. A failed lookup is logged and the loop moves on.
///
/// Returns the number of failed lookups.
fn serve_lookups<E: fmt::Display>(cache: &mut Cache<String, E>, iterations: usize) -> usize {
    let mut failures = 0;

    for i in 0..iterations {
        let key = format!("key{}", i % 2 + 1);
        let begin = Instant::now();

        match cache.fetch(&key) {
            Ok(fetched) => info!(
                key = %key,
                value = %fetched.value,
                elapsed = ?begin.elapsed(),
                cached = fetched.cache_hit,
                "lookup"
            ),
            Err(err) => {
                failures += 1;
                warn!(key = %key, elapsed = ?begin.elapsed(), error = %err, "lookup failed");
            }
        }
    }

    failures
}

/// Stand-in for a slow remote lookup.
fn get_info(key: &str) -> anyhow::Result<(String, Duration)> {
    thread::sleep(Duration::from_millis(100));
    Ok((format!("{key}:value"), VALUE_TTL))
}
