use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlagstashError {
    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid arguments: {0}")]
    InvalidArgs(#[from] clap::Error),

    #[error("Flag '{0}' is already defined")]
    DuplicateFlag(String),

    #[error("Flag '{0}' cannot be defined after arguments were parsed")]
    DefinedAfterParse(String),

    #[error("Arguments were already parsed")]
    AlreadyParsed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_formats_correctly() {
        let err = FlagstashError::ReadError {
            path: "/home/user/.config/myapp/myapp.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("myapp.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn duplicate_flag_formats() {
        let err = FlagstashError::DuplicateFlag("verbose".into());
        assert!(err.to_string().contains("verbose"));
    }

    #[test]
    fn defined_after_parse_formats() {
        let err = FlagstashError::DefinedAfterParse("host".into());
        let msg = err.to_string();
        assert!(msg.contains("host"));
        assert!(msg.contains("parsed"));
    }
}
