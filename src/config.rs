// src/config.rs

use crate::locale::Locale;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

/// Published results sheet, exported as CSV.
pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vSH8BKMxMzdrskmVU2Ce4cr1vEH9RSxDhuppGKKPFR_ZlVMcsgf_jSX3EJGWukqODXzAW_noA6_eopA/pub?output=csv";

/// CORS forwarding service; the encoded source URL is appended verbatim.
pub const DEFAULT_PROXY_URL: &str = "https://corsproxy.io/?";

/// Maximum attainable subtotal, shown as the fraction denominator.
pub const DEFAULT_MAX_SUBTOTAL: u32 = 280;

pub const DEFAULT_PREFS_FILE: &str = "seatlookup-prefs.json";

pub const ENV_SOURCE_URL: &str = "SEATLOOKUP_SOURCE_URL";
pub const ENV_PROXY_URL: &str = "SEATLOOKUP_PROXY_URL";
pub const ENV_TIMEOUT_SECS: &str = "SEATLOOKUP_TIMEOUT_SECS";
pub const ENV_LOCALE: &str = "SEATLOOKUP_LOCALE";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source_url: String,
    /// `None` fetches the source directly.
    pub proxy_url: Option<String>,
    /// No timeout when unset; a stalled transport then waits indefinitely.
    pub timeout_secs: Option<u64>,
    pub locale: Locale,
    pub max_subtotal: u32,
    pub prefs_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            proxy_url: Some(DEFAULT_PROXY_URL.to_string()),
            timeout_secs: None,
            locale: Locale::default(),
            max_subtotal: DEFAULT_MAX_SUBTOTAL,
            prefs_path: PathBuf::from(DEFAULT_PREFS_FILE),
        }
    }
}

impl Config {
    /// Read a YAML config file; absent keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
        let cfg: Config =
            serde_yaml::from_str(&text).with_context(|| format!("parsing config {:?}", path))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(cfg)
    }

    /// Defaults, then the optional file, then `SEATLOOKUP_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        cfg.apply_env(|key| env::var(key).ok())?;
        Ok(cfg)
    }

    /// `lookup` stands in for `std::env::var` so tests need not touch the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_SOURCE_URL) {
            self.source_url = v;
        }
        if let Some(v) = lookup(ENV_PROXY_URL) {
            // an empty value disables the proxy
            self.proxy_url = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Some(v) = lookup(ENV_TIMEOUT_SECS) {
            let secs = v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be whole seconds, got {:?}", ENV_TIMEOUT_SECS, v))?;
            self.timeout_secs = Some(secs);
        }
        if let Some(v) = lookup(ENV_LOCALE) {
            self.locale = Locale::from_str(&v)
                .ok_or_else(|| anyhow::anyhow!("unknown locale {:?} in {}", v, ENV_LOCALE))?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
