//! User-facing settings of the tracker
//!
//! The presentation layer owns *when* these change (e.g. a theme toggle on the settings
//! screen); this module owns what they look like and how they persist. Settings are an
//! explicit value handed to whoever needs them, not process-wide mutable state.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::traits::Storage;

/// The key the settings are stored under
pub const SETTINGS_KEY: &str = "settings";

/// The color scheme of the (out-of-crate) presentation layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
}

impl Settings {
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Loads the stored settings, or the defaults in case nothing (or something
    /// unreadable) is stored. Only a substrate failure is an error.
    pub async fn load<S: Storage>(storage: &S) -> Result<Self, StoreError> {
        match storage.get(SETTINGS_KEY).await? {
            None => Ok(Self::default()),
            Some(blob) => match serde_json::from_str(&blob) {
                Ok(settings) => Ok(settings),
                Err(err) => {
                    log::warn!("Unable to parse the stored settings, falling back to defaults: {}", err);
                    Ok(Self::default())
                },
            },
        }
    }

    /// Persists these settings
    pub async fn store<S: Storage>(&self, storage: &S) -> Result<(), StoreError> {
        let blob = serde_json::to_string(self)?;
        storage.set(SETTINGS_KEY, &blob).await?;
        Ok(())
    }
}
