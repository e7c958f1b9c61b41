use std::{
    path::Path,
    time::Duration,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    catalog::{
        SortDirection,
        SortField,
        SortState,
    },
    core::CardexError,
    persistence,
};

pub const SETTINGS_FILE: &str = "settings.json";

pub const DEFAULT_DATA_URL: &str = "http://localhost:8080/malifaux_data.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub data_url: String,
    pub request_timeout_secs: u64,
    pub default_sort: String,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_sort: SortField::Name.as_key().to_string(),
        }
    }
}

impl SettingsData {
    pub fn load() -> Self {
        persistence::load_json_or_default(SETTINGS_FILE)
    }

    pub fn load_from(path: &Path) -> Self {
        persistence::load_json_or_default_from(path)
    }

    pub fn save(&self) -> Result<(), CardexError> {
        persistence::save_json(self, SETTINGS_FILE)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), CardexError> {
        persistence::save_json_to(self, path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn initial_sort(&self) -> SortState {
        SortState::new(SortField::from_key(&self.default_sort), SortDirection::Ascending)
    }
}
