//! # flagstash demo application
//!
//! A sample CLI tool that showcases how to integrate
//! [flagstash](https://docs.rs/flagstash) into a real application. This is
//! **not** a real app; it exists purely to demonstrate and manually verify
//! flagstash's behavior.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example flagstash_demo
//! cargo run --example flagstash_demo -- --greeting hello
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature               | How to exercise it                                              |
//! |-----------------------|-----------------------------------------------------------------|
//! | Compiled defaults     | `cargo run --example flagstash_demo` on a fresh machine         |
//! | Persistence           | Pass `--greeting hi` once, then run again with no flags         |
//! | Explicit-wins         | Stash one value, pass a different one on the command line       |
//! | Filtered flags        | `--token` is filtered and never lands in the stash file         |
//! | Custom stash location | `--config /tmp/demo.json`                                       |
//! | Deferred apply        | `--remember greeting=hey` updates the file, not this run        |
//! | Hand-editing          | Edit the printed stash file, run again                          |

use std::path::PathBuf;
use std::process::ExitCode;

use flagstash::{ConfigStore, FlagRegistry, FlagstashError, default_stash_path};

const APP_NAME: &str = "flagstash-demo";

/// Flags whose values should not be written to the stash file.
const FILTERED: &[&str] = &["token", "remember"];

fn run() -> Result<(), FlagstashError> {
    let mut registry = FlagRegistry::new(APP_NAME);
    registry.define("greeting", "hello", "greeting to print")?;
    registry.define("name", "world", "who to greet")?;
    registry.define("token", "", "API token (never persisted)")?;
    registry.define(
        "remember",
        "",
        "key=value to stash for the next run without applying it now",
    )?;

    let default_path = default_stash_path(APP_NAME)
        .unwrap_or_else(|| PathBuf::from(format!("{APP_NAME}.json")));

    let mut store = ConfigStore::new(&mut registry, Some(default_path), FILTERED)?;

    // Deferred apply: the stash file changes, this run's flags do not.
    let remember = registry.lookup("remember").map(|f| f.value().to_string());
    if let Some(pair) = remember.filter(|v| !v.is_empty()) {
        match pair.split_once('=') {
            Some((key, value)) => {
                store.update_persisted(key, value)?;
                println!("stashed {key} = {value} for the next run");
            }
            None => eprintln!("--remember expects key=value, got '{pair}'"),
        }
    }

    let greeting = registry.lookup("greeting").map(|f| f.value()).unwrap_or("");
    let name = registry.lookup("name").map(|f| f.value()).unwrap_or("");
    println!("{greeting}, {name}!");
    println!();

    println!("resolved flags:");
    for flag in registry.iter() {
        let origin = if flag.is_explicit() { "command line" } else { "stash or default" };
        println!("  --{:<10} {:<20} ({origin})", flag.name(), flag.value());
    }

    match store.path() {
        Some(path) => println!("\nstash file: {}", path.display()),
        None => println!("\npersistence disabled (empty --config)"),
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        // let clap render --help / usage errors its own way
        Err(FlagstashError::InvalidArgs(e)) => e.exit(),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
