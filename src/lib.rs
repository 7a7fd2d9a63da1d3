//! Persist command-line flag values to a JSON config file and reload them on
//! the next run. Define your flags, construct a store, and go.
//!
//! ```ignore
//! let mut registry = FlagRegistry::new("myapp");
//! registry.define("host", "localhost", "server host")?;
//! registry.define("token", "", "API token")?;
//!
//! let store = ConfigStore::new(
//!     &mut registry,
//!     flagstash::default_stash_path("myapp"),
//!     &[],
//! )?;
//! ```
//!
//! That single call parses the process arguments, merges in whatever the
//! stash file recorded on previous runs, and rewrites the file with the full
//! resolved state — so the program's effective configuration comes from
//! whichever source was most recently set.
//!
//! # Why flagstash
//!
//! CLI tools accumulate flags, and users tire of repeating them. The usual
//! fix is a config file, but then two sources of truth drift: the file says
//! one thing, the flags another, and every tool reinvents the merge. Flagstash
//! makes the merge the whole point. Flags stay the interface; the file is
//! just memory.
//!
//! # Layer precedence
//!
//! ```text
//! Compiled defaults      FlagRegistry::define(name, default, ...)
//!        ↑ overridden by
//! Stash file             JSON object from the previous run
//!        ↑ overridden by
//! Explicit flags         --name value on this invocation
//! ```
//!
//! Every layer is sparse: a flag missing from the file falls through to its
//! default, and only flags actually passed on the command line occupy the top
//! layer. After reconciliation the file is rewritten with the full resolved
//! state, so it self-heals to include flags introduced since it was written.
//!
//! # The stash file
//!
//! A single flat JSON object mapping flag name to flag value:
//!
//! ```json
//! {
//!   "host": "example.com",
//!   "token": "abc123"
//! }
//! ```
//!
//! Human-editable and forward compatible: keys that match no known flag are
//! ignored when values are applied and ride along until overwritten. The
//! `config` flag (the one naming the file itself) is never written to it,
//! and callers can filter further names, such as secrets, at construction.
//!
//! # Explicit registry, no globals
//!
//! There is no process-wide flag table. A [`FlagRegistry`] is an ordinary
//! value, passed by reference into [`ConfigStore::new`] and
//! [`ConfigStore::parse`], so multiple independent registries and stores can
//! coexist in one process. Argument parsing is built on
//! [clap](https://docs.rs/clap)'s builder API and happens exactly once; the
//! store's constructor triggers it if the caller hasn't already.
//!
//! # Deferred apply
//!
//! [`ConfigStore::update_persisted`] writes a key to the stash (and the file)
//! **without** touching the live flag; the flag picks the value up on the
//! next [`parse`](ConfigStore::parse), typically the next run. The name is
//! deliberately blunt about this: a plain "update" that silently skipped the
//! live flag would be a bug magnet.
//!
//! # Error handling
//!
//! All fallible operations return [`FlagstashError`]. A missing stash file is
//! not an error (first runs are normal), but any other I/O or JSON failure
//! is surfaced with the offending path. Writes are synchronous and not
//! atomic; there is no retry policy. See [`error`] for the full set.

pub mod error;

mod paths;
mod persist;
mod registry;
mod store;

pub use error::FlagstashError;
pub use paths::default_stash_path;
pub use registry::{Flag, FlagRegistry};
pub use store::ConfigStore;
