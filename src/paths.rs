//! Default stash file location.
//!
//! The store itself only ever sees the path it is given; this helper exists
//! so applications don't each invent their own convention for where the
//! stash lives. It resolves to the platform config directory (XDG on Linux,
//! `~/Library/Application Support` on macOS) via the `directories` crate.

use std::path::PathBuf;

/// The conventional per-user stash path for `app_name`:
/// `{platform config dir}/{app_name}/{app_name}.json`.
///
/// Returns `None` if no home directory can be determined.
pub fn default_stash_path(app_name: &str) -> Option<PathBuf> {
    let proj = directories::ProjectDirs::from("", "", app_name)?;
    Some(proj.config_dir().join(format!("{app_name}.json")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_ends_with_app_json() {
        // resolution is platform- and environment-dependent; only the shape
        // is ours to check
        if let Some(path) = default_stash_path("myapp") {
            assert!(path.ends_with("myapp.json"));
            assert_eq!(path.extension().unwrap(), "json");
        }
    }
}
