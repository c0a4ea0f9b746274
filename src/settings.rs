use crate::i18n::Language;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "settings.toml";
pub const DEFAULT_LOG_FILE_NAME: &str = "recipe_book.log";

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "recipe_app";
pub const DEFAULT_COLLECTION: &str = "recipes";

pub const ENV_MONGO_URI: &str = "RECIPE_BOOK_MONGO_URI";
pub const ENV_MONGO_DATABASE: &str = "RECIPE_BOOK_MONGO_DATABASE";
pub const ENV_MONGO_COLLECTION: &str = "RECIPE_BOOK_MONGO_COLLECTION";
pub const ENV_MOCK_DB: &str = "MOCK_DB";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

/// Where the recipe collection lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoSettings {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            uri: DEFAULT_MONGO_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub language: Language,
    pub logging_enabled: bool,
    pub logging_level: LogLevel,
    pub logging_path: String,
    pub mongo: MongoSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: Language::English,
            logging_enabled: false,
            logging_level: LogLevel::Info,
            logging_path: DEFAULT_LOG_FILE_NAME.to_string(),
            mongo: MongoSettings::default(),
        }
    }
}

#[derive(Debug)]
pub enum SettingsLoadError {
    Io(io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for SettingsLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsLoadError::Io(error) => write!(f, "I/O error: {}", error),
            SettingsLoadError::Parse(error) => write!(f, "Parse error: {}", error),
        }
    }
}

impl std::error::Error for SettingsLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsLoadError::Io(error) => Some(error),
            SettingsLoadError::Parse(error) => Some(error),
        }
    }
}

#[derive(Debug)]
pub enum SettingsSaveError {
    Io(io::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for SettingsSaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsSaveError::Io(error) => write!(f, "I/O error: {}", error),
            SettingsSaveError::Serialize(error) => write!(f, "Serialize error: {}", error),
        }
    }
}

impl std::error::Error for SettingsSaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsSaveError::Io(error) => Some(error),
            SettingsSaveError::Serialize(error) => Some(error),
        }
    }
}

pub fn settings_path() -> PathBuf {
    PathBuf::from(SETTINGS_FILE_NAME)
}

pub fn load_from_disk() -> Result<AppSettings, SettingsLoadError> {
    load_from_path(&settings_path())
}

pub fn load_from_path(path: &Path) -> Result<AppSettings, SettingsLoadError> {
    match fs::read_to_string(path) {
        Ok(contents) => parse(&contents),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            let mut settings = AppSettings::default();
            settings.normalize();
            Ok(settings)
        }
        Err(error) => Err(SettingsLoadError::Io(error)),
    }
}

pub fn parse(contents: &str) -> Result<AppSettings, SettingsLoadError> {
    toml::from_str::<AppSettings>(contents)
        .map(|mut settings| {
            settings.normalize();
            settings
        })
        .map_err(SettingsLoadError::Parse)
}

pub fn save_to_disk(settings: &AppSettings) -> Result<(), SettingsSaveError> {
    save_to_path(settings, &settings_path())
}

pub fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), SettingsSaveError> {
    let rendered = toml::to_string_pretty(settings).map_err(SettingsSaveError::Serialize)?;
    fs::write(path, rendered).map_err(SettingsSaveError::Io)
}

/// `MOCK_DB=1` swaps MongoDB for the in-memory store.
pub fn use_mock_backend() -> bool {
    mock_requested(env::var(ENV_MOCK_DB).ok().as_deref())
}

fn mock_requested(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("1"))
}

impl AppSettings {
    pub fn normalize(&mut self) {
        self.normalize_logging();
        self.mongo.normalize();
    }

    pub fn normalize_logging(&mut self) {
        if self.logging_path.trim().is_empty() {
            self.logging_path = DEFAULT_LOG_FILE_NAME.to_string();
        }
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Non-blank values returned by `lookup` replace the configured connection target.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let pick = |key: &str| {
            lookup(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
        };

        if let Some(uri) = pick(ENV_MONGO_URI) {
            self.mongo.uri = uri;
        }
        if let Some(database) = pick(ENV_MONGO_DATABASE) {
            self.mongo.database = database;
        }
        if let Some(collection) = pick(ENV_MONGO_COLLECTION) {
            self.mongo.collection = collection;
        }
    }
}

impl MongoSettings {
    fn normalize(&mut self) {
        let defaults = MongoSettings::default();
        if self.uri.trim().is_empty() {
            self.uri = defaults.uri;
        }
        if self.database.trim().is_empty() {
            self.database = defaults.database;
        }
        if self.collection.trim().is_empty() {
            self.collection = defaults.collection;
        }
    }
}
