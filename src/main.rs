//! Demo harness for the lazykv overlay.
//!
//! Runs a small end-to-end scenario against an in-memory store: buffer
//! mutations through the cache directory, synchronize, and print the
//! observable remote state after each synchronization point. The overlay
//! core lives in `lazykv-cache`; this binary only drives it.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lazykv_cache::{CacheDirectory, ListOverlay, Representative};
use lazykv_store::{MemoryStore, StoreClient};
use lazykv_types::Value;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Emit remote state as JSON lines instead of plain text.
    #[arg(long)]
    json: bool,

    /// Key to run the scenario under.
    #[arg(long, default_value = "foo")]
    key: String,
}

fn report(args: &Args, store: &MemoryStore, stage: &str) -> Result<()> {
    let tag = store.type_of(&args.key)?;
    let contents = store.list_contents(&args.key);
    info!(stage, key = args.key.as_str(), tag = %tag, "synchronization point reached");
    if args.json {
        println!(
            "{}",
            json!({ "stage": stage, "key": args.key, "type": tag, "contents": contents })
        );
    } else {
        println!("{}: type={} contents={:?}", stage, tag, contents);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let store = Arc::new(MemoryStore::new());
    let mut dir = CacheDirectory::new(store.clone());
    let key = args.key.clone();

    // An absent value synchronizes to a deleted remote key.
    dir.set(key.clone(), Value::Absent)?;
    dir.synchronize_all()?;
    report(&args, &store, "after absent sync")?;

    // Replace with an unseeded list. The removal is buffered before the
    // push but replays after it, so the pushed value is removed again.
    dir.insert(
        key.clone(),
        Representative::List(ListOverlay::new(dir.store(), key.clone())),
    );
    {
        let list = dir
            .get(&key)?
            .as_list_mut()
            .ok_or_else(|| anyhow!("{} is not a list", key))?;
        list.remove_value("bar", 1);
        list.push_right("bar");
    }
    dir.synchronize_all()?;
    report(&args, &store, "after removal-then-push sync")?;

    // Buffer more edits; the pop resolves locally, then everything flushes.
    {
        let list = dir
            .get(&key)?
            .as_list_mut()
            .ok_or_else(|| anyhow!("{} is not a list", key))?;
        list.push_right("baz");
        list.push_left("foo");
        println!("popped: {:?}", list.pop_right()?);
        list.push_right("bar");
        list.push_right("baz");
    }
    dir.synchronize_all()?;
    report(&args, &store, "after final sync")?;

    Ok(())
}
