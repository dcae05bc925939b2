// src/prefs.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{error, info};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    theme: Theme,
}

/// Single key/value theme preference persisted as JSON.
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved theme, or light when nothing usable is stored.
    pub fn load(&self) -> Theme {
        match fs::File::open(&self.path).and_then(|f| {
            serde_json::from_reader::<_, PrefsFile>(f)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        }) {
            Ok(prefs) => prefs.theme,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Theme::default(),
            Err(e) => {
                error!("Skipping corrupt {:?}: {}", self.path, e);
                Theme::default()
            }
        }
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating prefs directory {:?}", parent))?;
            }
        }
        let json = serde_json::to_string(&PrefsFile { theme })?;
        fs::write(&self.path, json).with_context(|| format!("writing prefs {:?}", self.path))?;
        info!(theme = theme.as_str(), "theme saved");
        Ok(())
    }

    /// Flip the stored theme and persist it.
    pub fn toggle(&self) -> Result<Theme> {
        let next = self.load().toggled();
        self.save(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_is_light() {
        let tmp = tempdir().unwrap();
        let store = PrefsStore::new(tmp.path().join("prefs.json"));
        assert_eq!(store.load(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("prefs.json");
        let store = PrefsStore::new(&path);

        assert_eq!(store.toggle().unwrap(), Theme::Dark);
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"theme":"dark"}"#);
        assert_eq!(PrefsStore::new(&path).load(), Theme::Dark);

        assert_eq!(store.toggle().unwrap(), Theme::Light);
        assert_eq!(store.load(), Theme::Light);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(PrefsStore::new(&path).load(), Theme::Light);

        fs::write(&path, r#"{"theme":"sepia"}"#).unwrap();
        assert_eq!(PrefsStore::new(&path).load(), Theme::Light);
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!(Theme::from_str("Dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_str("blue"), None);
    }
}
