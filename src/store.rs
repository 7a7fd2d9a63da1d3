//! The reconciliation core: merge persisted values, explicit command-line
//! values, and compiled-in defaults into one authoritative state.
//!
//! A [`ConfigStore`] owns the stash file path, the in-memory key/value
//! mapping, and the filter set of names that must never reach the file.
//! The flags themselves live in a [`FlagRegistry`] passed by reference into
//! the constructor and [`parse`](ConfigStore::parse); the store mutates
//! them but does not own them.
//!
//! # Reconciliation
//!
//! [`parse`](ConfigStore::parse) runs in two phases:
//!
//! 1. **Reload** — read the stash file (a missing file means "no prior
//!    config"), drop every entry for a flag that was explicitly supplied on
//!    this invocation (an explicit flag always wins over a stale persisted
//!    value), then apply each remaining entry to its flag's current value.
//!    This is what lets a previously-persisted value resurrect a flag that
//!    was not passed this run.
//! 2. **Save** — copy every non-filtered flag's current value into the
//!    mapping and rewrite the file. The file always holds the full resolved
//!    state, so it self-heals to include newly-introduced flags.
//!
//! Net precedence: **explicit command-line value > persisted file value >
//! compiled-in default**.

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::FlagstashError;
use crate::persist;
use crate::registry::FlagRegistry;

/// Name of the flag holding the stash file path. Always filtered: persisting
/// it would make the file point at itself.
const CONFIG_FLAG: &str = "config";

/// Persisted flag values plus the reconciliation that keeps them, the stash
/// file, and the live flags in agreement.
#[derive(Debug)]
pub struct ConfigStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
    filter: BTreeSet<String>,
}

impl ConfigStore {
    /// Construct a store and run the initial reconciliation, parsing the
    /// real process argument list.
    ///
    /// Defines a `--config` flag on `registry` (defaulting to
    /// `default_path`) unless the caller already defined one, parses
    /// arguments unless the caller already parsed them, and reconciles
    /// against the file the resolved `--config` value names. `filtered`
    /// lists additional flag names to keep out of the stash file; `"config"`
    /// is always filtered.
    ///
    /// All other flags must be defined on `registry` before this call.
    pub fn new(
        registry: &mut FlagRegistry,
        default_path: Option<PathBuf>,
        filtered: &[&str],
    ) -> Result<Self, FlagstashError> {
        Self::from_args(registry, default_path, filtered, std::env::args_os())
    }

    /// Like [`new`](Self::new), but parsing the given argument list instead
    /// of `std::env::args_os()`. The first element is the program name.
    pub fn from_args<I, T>(
        registry: &mut FlagRegistry,
        default_path: Option<PathBuf>,
        filtered: &[&str],
        args: I,
    ) -> Result<Self, FlagstashError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if registry.lookup(CONFIG_FLAG).is_none() {
            let default = default_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            registry.define(CONFIG_FLAG, &default, "configuration file path")?;
        }
        if !registry.is_parsed() {
            registry.parse_args(args)?;
        }

        let mut filter = BTreeSet::new();
        filter.insert(CONFIG_FLAG.to_string());
        filter.extend(filtered.iter().map(|name| (*name).to_string()));

        let mut store = Self {
            path: None,
            values: BTreeMap::new(),
            filter,
        };

        let effective = registry
            .lookup(CONFIG_FLAG)
            .map(|f| f.value().to_string())
            .unwrap_or_default();
        let path = (!effective.is_empty()).then(|| PathBuf::from(effective));

        store.parse(registry, path)?;
        Ok(store)
    }

    /// Reconcile against the stash file at `path` and rewrite it.
    ///
    /// `None` means no persistence: flags keep their current values and
    /// nothing is written. See the module docs for the two phases and the
    /// resulting precedence order.
    pub fn parse(
        &mut self,
        registry: &mut FlagRegistry,
        path: Option<PathBuf>,
    ) -> Result<(), FlagstashError> {
        self.reload(registry, path)?;
        self.save(registry)
    }

    /// Phase one: load the file and apply persisted values to the flags.
    fn reload(
        &mut self,
        registry: &mut FlagRegistry,
        path: Option<PathBuf>,
    ) -> Result<(), FlagstashError> {
        self.path = path;
        self.values = match &self.path {
            // A missing file is "no prior config", not an error.
            Some(p) => persist::load(p)?.unwrap_or_default(),
            None => BTreeMap::new(),
        };

        // An explicit flag must not be overwritten from the file, nor
        // re-merged onto itself.
        for flag in registry.explicit() {
            self.values.remove(flag.name());
        }

        // Resurrect persisted values onto the remaining known flags. Keys
        // that match no flag are left alone until overwritten.
        for (name, value) in &self.values {
            if let Some(flag) = registry.lookup_mut(name) {
                flag.set_value(value.clone());
            }
        }
        Ok(())
    }

    /// Phase two: fold every non-filtered flag's current value into the
    /// mapping and rewrite the file, if there is one.
    fn save(&mut self, registry: &FlagRegistry) -> Result<(), FlagstashError> {
        for flag in registry.iter() {
            if !self.filter.contains(flag.name()) {
                self.values
                    .insert(flag.name().to_string(), flag.value().to_string());
            }
        }
        if let Some(path) = &self.path {
            persist::save(path, &self.values)?;
        }
        Ok(())
    }

    /// Set `key` in the persisted mapping and flush it to disk, **without**
    /// touching the live flag.
    ///
    /// This is a raw map write, not a reconciliation: the corresponding flag
    /// keeps its current value until the next [`parse`](Self::parse) applies
    /// the stashed one. Deferred apply is deliberate: it lets a process
    /// record a value for its next run without changing behavior mid-run.
    pub fn update_persisted(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<(), FlagstashError> {
        self.values.insert(key.to_string(), value.to_string());
        if let Some(path) = &self.path {
            persist::save(path, &self.values)?;
        }
        Ok(())
    }

    /// The stored value for `key`, or `""` if absent. Never errors.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// The stash file path, if persistence is active.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The stored key/value pairs, in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
