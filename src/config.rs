//! Runtime settings, read from the environment at startup.
//!
//! The editor needs no config file: the dictionary directory is discovered
//! from where the core was launched. These variables only override that.

use std::path::PathBuf;

use log::LevelFilter;

use crate::model::profile::{self, LanguageProfile};

pub const ENV_DIR: &str = "DKST_DICT_DIR";
pub const ENV_PROFILE: &str = "DKST_DICT_PROFILE";
pub const ENV_LOG: &str = "DKST_DICT_LOG";

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub base_dir: Option<PathBuf>,
    pub initial_profile: &'static LanguageProfile,
    pub log_level: LevelFilter,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            base_dir: None,
            initial_profile: profile::default_profile(),
            log_level: LevelFilter::Info,
        }
    }
}

impl CoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. Bad values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = CoreConfig::default();
        let mut warnings = Vec::new();

        if let Some(dir) = lookup(ENV_DIR).filter(|d| !d.trim().is_empty()) {
            cfg.base_dir = Some(PathBuf::from(dir.trim()));
        }

        if let Some(code) = lookup(ENV_PROFILE) {
            match profile::find(&code) {
                Some(p) => cfg.initial_profile = p,
                None => warnings.push(format!("{ENV_PROFILE}: unknown profile '{code}', using en")),
            }
        }

        if let Some(level) = lookup(ENV_LOG) {
            match level.trim().parse::<LevelFilter>() {
                Ok(l) => cfg.log_level = l,
                Err(_) => warnings.push(format!("{ENV_LOG}: invalid level '{level}', using info")),
            }
        }

        // the logger is not up yet when this runs
        for w in warnings {
            eprintln!("[config] {w}");
        }

        cfg
    }
}
