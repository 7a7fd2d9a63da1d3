//! Flag definitions and argument parsing.
//!
//! A [`FlagRegistry`] is an explicitly constructed table of named string
//! flags; there is deliberately no process-global registry. Each store (and
//! each test) builds its own, so multiple independent registries can coexist
//! in one process.
//!
//! Parsing is delegated to [clap](https://docs.rs/clap)'s builder API: the
//! registry turns its definitions into a `clap::Command`, parses the given
//! argument list once, and records for every flag both its resolved value and
//! whether it was explicitly supplied on the command line (via
//! [`ArgMatches::value_source`](clap::ArgMatches::value_source)). That
//! explicit-set distinction is what the reconciliation in
//! [`ConfigStore`](crate::ConfigStore) is built on.
//!
//! Ordering rules are strict: all flags must be defined before
//! [`parse_args`](FlagRegistry::parse_args), and parsing happens exactly
//! once. Violations are hard errors rather than silent misbehavior.

use std::collections::BTreeMap;
use std::ffi::OsString;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, Command};

use crate::error::FlagstashError;

/// A named string flag with a compiled-in default and a current value.
#[derive(Debug, Clone, PartialEq)]
pub struct Flag {
    name: String,
    description: String,
    default: String,
    value: String,
    explicit: bool,
}

impl Flag {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn default_value(&self) -> &str {
        &self.default
    }

    /// The flag's current value: the explicit command-line value, a value
    /// applied from the stash file, or the default.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the flag was supplied on this invocation's command line,
    /// as opposed to left at its default.
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Overwrite the current value. Does not change explicit-set status.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

/// An explicit table of flag definitions plus one-shot argument parsing.
#[derive(Debug)]
pub struct FlagRegistry {
    app_name: String,
    flags: BTreeMap<String, Flag>,
    parsed: bool,
}

impl FlagRegistry {
    /// Create an empty, unparsed registry. `app_name` is used as the command
    /// name in generated `--help` output.
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            flags: BTreeMap::new(),
            parsed: false,
        }
    }

    /// Register a string flag.
    ///
    /// Errors if a flag of that name already exists or if arguments were
    /// already parsed: late definitions would never receive a command-line
    /// value, so they are rejected instead of silently defaulting.
    pub fn define(
        &mut self,
        name: &str,
        default: &str,
        description: &str,
    ) -> Result<(), FlagstashError> {
        if self.parsed {
            return Err(FlagstashError::DefinedAfterParse(name.to_string()));
        }
        if self.flags.contains_key(name) {
            return Err(FlagstashError::DuplicateFlag(name.to_string()));
        }
        self.flags.insert(
            name.to_string(),
            Flag {
                name: name.to_string(),
                description: description.to_string(),
                default: default.to_string(),
                value: default.to_string(),
                explicit: false,
            },
        );
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Flag> {
        self.flags.get_mut(name)
    }

    /// All registered flags, in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    /// Only the flags explicitly supplied on this invocation.
    pub fn explicit(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values().filter(|f| f.explicit)
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Parse an argument list against the registered definitions.
    ///
    /// The first element of `args` is the program name, as with clap. Each
    /// flag becomes a `--{name} <VALUE>` option defaulting to its compiled-in
    /// default. After a successful parse every flag holds its resolved value,
    /// and flags whose value came from the command line are marked explicit.
    ///
    /// Must be called exactly once; a second call errors. Unknown arguments
    /// are an [`InvalidArgs`](FlagstashError::InvalidArgs) error.
    pub fn parse_args<I, T>(&mut self, args: I) -> Result<(), FlagstashError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if self.parsed {
            return Err(FlagstashError::AlreadyParsed);
        }

        let mut cmd = Command::new(self.app_name.clone());
        for flag in self.flags.values() {
            cmd = cmd.arg(
                Arg::new(flag.name.clone())
                    .long(flag.name.clone())
                    .value_name("VALUE")
                    .help(flag.description.clone())
                    .default_value(flag.default.clone())
                    .action(ArgAction::Set),
            );
        }

        let matches = cmd.try_get_matches_from(args)?;

        for flag in self.flags.values_mut() {
            if let Some(value) = matches.get_one::<String>(&flag.name) {
                flag.value = value.clone();
            }
            flag.explicit = matches.value_source(&flag.name) == Some(ValueSource::CommandLine);
        }

        self.parsed = true;
        Ok(())
    }
}
