use crate::browser::BrowserConfig;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default location of the configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment variable overriding [`DEFAULT_CONFIG_PATH`]
pub const CONFIG_PATH_ENV: &str = "MENU_SCRAPER_CONFIG";

pub const DEFAULT_TARGET_URL: &str = "https://clients.eurest.ch/reishauer/de/Zahnr%C3%A4dli";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub browser: BrowserSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MenuConfig {
    /// Seconds to wait for the active menu tab to become visible
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout: u64,

    /// Page to scrape
    #[serde(default = "default_target_url", alias = "reishauer_url")]
    pub target_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserSettings {
    /// Browser headless mode
    #[serde(default = "default_true")]
    pub headless: bool,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Chrome's sandbox usually cannot start inside containers
    #[serde(default = "default_false")]
    pub sandbox: bool,

    #[serde(default = "default_true")]
    pub disable_gpu: bool,

    /// Page load timeout in seconds
    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_secs: u64,

    /// Extra Chrome command-line flags
    #[serde(default)]
    pub extra_flags: Vec<String>,
}

fn default_true() -> bool { true }
fn default_false() -> bool { false }
fn default_wait_timeout() -> u64 { 10 }
fn default_target_url() -> String { DEFAULT_TARGET_URL.to_string() }
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5001 }
fn default_window_width() -> u32 { 1920 }
fn default_window_height() -> u32 { 1080 }
fn default_navigation_timeout() -> u64 { 30 }

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            wait_timeout: default_wait_timeout(),
            target_url: default_target_url(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            sandbox: false,
            disable_gpu: true,
            navigation_timeout_secs: 30,
            extra_flags: Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Config {
    /// Load from `$MENU_SCRAPER_CONFIG`, or `config.toml` when unset
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(path)
    }

    /// Load configuration from `path`.
    ///
    /// A missing file is not an error: the defaults are used and a warning is
    /// logged. A file that exists but cannot be read or parsed is.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("{} not found. Using default values.", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl BrowserSettings {
    /// Create the browser session configuration from these settings
    pub fn browser_config(&self) -> BrowserConfig {
        let mut chrome_flags = vec!["--disable-dev-shm-usage".to_string()];
        if self.disable_gpu {
            chrome_flags.push("--disable-gpu".to_string());
        }
        chrome_flags.extend(self.extra_flags.iter().cloned());

        BrowserConfig {
            headless: self.headless,
            window_size: (self.window_width, self.window_height),
            sandbox: self.sandbox,
            timeout_seconds: self.navigation_timeout_secs,
            chrome_flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fallback_table() {
        let config = Config::default();
        assert_eq!(config.menu.wait_timeout, 10);
        assert_eq!(config.menu.target_url, DEFAULT_TARGET_URL);
        assert_eq!(config.bind_addr(), "0.0.0.0:5001");
    }

    #[test]
    fn test_legacy_url_key() {
        let config: Config = toml::from_str(
            r#"
            [menu]
            wait_timeout = 5
            reishauer_url = "https://example.com/menu"
            "#,
        )
        .unwrap();
        assert_eq!(config.menu.wait_timeout, 5);
        assert_eq!(config.menu.target_url, "https://example.com/menu");
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: Config = toml::from_str("[server]\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.menu.wait_timeout, 10);
        assert!(config.browser.headless);
    }

    #[test]
    fn test_browser_config_flags() {
        let settings = BrowserSettings {
            disable_gpu: false,
            extra_flags: vec!["--lang=de-CH".to_string()],
            ..BrowserSettings::default()
        };
        let browser = settings.browser_config();
        assert!(!browser.chrome_flags.iter().any(|f| f == "--disable-gpu"));
        assert!(browser.chrome_flags.iter().any(|f| f == "--lang=de-CH"));
        assert!(browser.chrome_flags.iter().any(|f| f == "--disable-dev-shm-usage"));
        assert_eq!(browser.window_size, (1920, 1080));
        assert!(!browser.sandbox);
    }
}
