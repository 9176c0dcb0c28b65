use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::CategoryWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            idle_timeout_secs: default_idle_timeout_secs(),
        }
    }
}

fn default_max_sessions() -> u64 { 10_000 }
fn default_idle_timeout_secs() -> u64 { 3600 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    #[serde(default)]
    pub min_score: u8,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            min_score: 0,
        }
    }
}

fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_cleanliness_weight")]
    pub cleanliness: f64,
    #[serde(default = "default_noise_weight")]
    pub noise: f64,
    #[serde(default = "default_social_level_weight")]
    pub social_level: f64,
    #[serde(default = "default_sleep_schedule_weight")]
    pub sleep_schedule: f64,
    #[serde(default = "default_study_habits_weight")]
    pub study_habits: f64,
    #[serde(default = "default_guests_weight")]
    pub guests: f64,
    #[serde(default = "default_smoking_weight")]
    pub smoking: f64,
    #[serde(default = "default_drinking_weight")]
    pub drinking: f64,
    #[serde(default = "default_pets_weight")]
    pub pets: f64,
    #[serde(default = "default_cooking_weight")]
    pub cooking: f64,
    #[serde(default = "default_shared_items_weight")]
    pub shared_items: f64,
    #[serde(default = "default_personality_weight")]
    pub personality: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            cleanliness: default_cleanliness_weight(),
            noise: default_noise_weight(),
            social_level: default_social_level_weight(),
            sleep_schedule: default_sleep_schedule_weight(),
            study_habits: default_study_habits_weight(),
            guests: default_guests_weight(),
            smoking: default_smoking_weight(),
            drinking: default_drinking_weight(),
            pets: default_pets_weight(),
            cooking: default_cooking_weight(),
            shared_items: default_shared_items_weight(),
            personality: default_personality_weight(),
        }
    }
}

fn default_cleanliness_weight() -> f64 { 1.5 }
fn default_noise_weight() -> f64 { 1.2 }
fn default_social_level_weight() -> f64 { 1.0 }
fn default_sleep_schedule_weight() -> f64 { 1.3 }
fn default_study_habits_weight() -> f64 { 1.0 }
fn default_guests_weight() -> f64 { 0.8 }
fn default_smoking_weight() -> f64 { 1.5 }
fn default_drinking_weight() -> f64 { 0.7 }
fn default_pets_weight() -> f64 { 1.0 }
fn default_cooking_weight() -> f64 { 0.6 }
fn default_shared_items_weight() -> f64 { 0.5 }
fn default_personality_weight() -> f64 { 0.8 }

impl From<&WeightsConfig> for CategoryWeights {
    fn from(w: &WeightsConfig) -> Self {
        CategoryWeights {
            cleanliness: w.cleanliness,
            noise: w.noise,
            social_level: w.social_level,
            sleep_schedule: w.sleep_schedule,
            study_habits: w.study_habits,
            guests: w.guests,
            smoking: w.smoking,
            drinking: w.drinking,
            pets: w.pets,
            cooking: w.cooking,
            shared_items: w.shared_items,
            personality: w.personality,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ROOMIE__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ROOMIE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("ROOMIE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ROOMIE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Weight table for the preference engine
    pub fn category_weights(&self) -> CategoryWeights {
        CategoryWeights::from(&self.scoring.weights)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(category) = self.category_weights().first_invalid() {
            return Err(ConfigError::Message(format!(
                "scoring.weights.{} must be a finite positive number",
                category
            )));
        }

        if self.matching.default_limit == 0 || self.matching.default_limit > self.matching.max_limit {
            return Err(ConfigError::Message(
                "matching.default_limit must be between 1 and matching.max_limit".to_string(),
            ));
        }

        if self.matching.min_score > 100 {
            return Err(ConfigError::Message(
                "matching.min_score must be within 0..=100".to_string(),
            ));
        }

        Ok(())
    }
}

/// Apply platform-style overrides that do not follow the ROOMIE__ prefix
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    // Hosting platforms commonly inject a bare PORT
    if let Ok(port) = env::var("PORT") {
        builder = builder.set_override("server.port", port)?;
    }

    builder.build()
}
