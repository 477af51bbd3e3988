// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware configuration directory resolution.

use std::path::PathBuf;

pub const CONFIG_FILE: &str = "config.json";

/// Where `printroute` looks for `config.json` when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    config_base(
        std::env::var("XDG_CONFIG_HOME").ok(),
        std::env::var("HOME").ok(),
    )
    .join("printroute")
    .join(CONFIG_FILE)
}

fn config_base(xdg: Option<String>, home: Option<String>) -> PathBuf {
    if let Some(xdg) = xdg.filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg);
    }
    if let Some(home) = home.filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".config");
    }
    // Last resort
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_wins_over_home() {
        let base = config_base(Some("/xdg".into()), Some("/home/ana".into()));
        assert_eq!(base, PathBuf::from("/xdg"));
    }

    #[test]
    fn home_config_when_xdg_unset_or_empty() {
        let base = config_base(Some(String::new()), Some("/home/ana".into()));
        assert_eq!(base, PathBuf::from("/home/ana/.config"));
    }

    #[test]
    fn current_dir_as_last_resort() {
        assert_eq!(config_base(None, None), PathBuf::from("."));
    }
}
