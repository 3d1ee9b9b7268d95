//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Labels printed on generated reports.
    #[serde(default)]
    pub branding: BrandingConfig,
    /// Report generation settings.
    #[serde(default)]
    pub reports: ReportsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Branding printed on cover pages, headers, and cover sheets.
#[derive(Debug, Clone, Deserialize)]
pub struct BrandingConfig {
    /// Engine name shown in every content page header.
    #[serde(default = "default_engine_name")]
    pub engine_name: String,
    /// Platform name shown on workbook cover sheets.
    #[serde(default = "default_platform_name")]
    pub platform_name: String,
    /// Classification label for footers and cover sheets.
    #[serde(default = "default_classification")]
    pub classification: String,
    /// Notice printed at the bottom of document cover pages.
    #[serde(default = "default_cover_notice")]
    pub cover_notice: String,
    /// Short mark drawn inside the cover page logo.
    #[serde(default = "default_logo_mark")]
    pub logo_mark: String,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            engine_name: default_engine_name(),
            platform_name: default_platform_name(),
            classification: default_classification(),
            cover_notice: default_cover_notice(),
            logo_mark: default_logo_mark(),
        }
    }
}

fn default_engine_name() -> String {
    "OmniNexus Intelligence".to_string()
}

fn default_platform_name() -> String {
    "OmniNexus Enterprise Intelligence Suite".to_string()
}

fn default_classification() -> String {
    "Confidential".to_string()
}

fn default_cover_notice() -> String {
    "STRICTLY PRIVATE & CONFIDENTIAL".to_string()
}

fn default_logo_mark() -> String {
    "ON".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    /// Character that replaces whitespace runs in suggested file names.
    #[serde(default = "default_file_name_separator")]
    pub file_name_separator: char,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            file_name_separator: default_file_name_separator(),
        }
    }
}

fn default_file_name_separator() -> char {
    '_'
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("NEXUS").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
