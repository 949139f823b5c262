//! Loader for workspace configuration with YAML + environment overlays.
//!
//! `saflix.yaml` is optional: every section carries serde defaults that
//! reproduce the stock deployment (target site, Chromedriver on localhost,
//! 30-second navigation bound), so a missing file or a bare environment
//! deployment still produces a usable config. `SAFLIX_`-prefixed environment
//! variables override file values, and `${VAR}` placeholders inside values
//! are expanded recursively with a depth cap.
use config::{Config, ConfigError, Environment, File};
use saflix_common::{BrowserConfig, StealthLevel, MOBILE_USER_AGENT};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct SaflixConfig {
    pub version: Option<String>,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub browser: BrowserSection,
}

/// The one site this backend fronts. There is no multi-site support; the
/// selector rules are tuned against this site's mobile markup.
#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
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

/// Browser knobs as they appear on disk; [`BrowserSection::to_browser_config`]
/// materialises the immutable value the session manager takes.
#[derive(Debug, Deserialize)]
pub struct BrowserSection {
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    #[serde(default = "default_headless")]
    pub headless: bool,
    #[serde(default = "default_stealth")]
    pub stealth: StealthLevel,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_navigation_timeout_secs")]
    pub navigation_timeout_secs: u64,
}

impl Default for BrowserSection {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            stealth: default_stealth(),
            user_agent: default_user_agent(),
            navigation_timeout_secs: default_navigation_timeout_secs(),
        }
    }
}

impl BrowserSection {
    pub fn to_browser_config(&self) -> BrowserConfig {
        BrowserConfig {
            webdriver_url: self.webdriver_url.clone(),
            headless: self.headless,
            stealth: self.stealth.clone(),
            user_agent: self.user_agent.clone(),
            navigation_timeout_secs: self.navigation_timeout_secs,
            ..BrowserConfig::default()
        }
    }
}

fn default_base_url() -> String {
    "https://www.4khotvideo.com".into()
}
fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}
fn default_webdriver_url() -> String {
    "http://localhost:9515".into()
}
fn default_headless() -> bool {
    true
}
fn default_stealth() -> StealthLevel {
    StealthLevel::Balanced
}
fn default_user_agent() -> String {
    MOBILE_USER_AGENT.into()
}
fn default_navigation_timeout_secs() -> u64 {
    30
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct SaflixConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for SaflixConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SaflixConfigLoader {
    /// Start with sensible defaults: YAML file + `SAFLIX_` env overrides.
    ///
    /// ```
    /// use saflix_config::SaflixConfigLoader;
    ///
    /// let config = SaflixConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.server.port, 8080);
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("SAFLIX").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by
    /// suffix. The file is optional so pure-environment deployments work.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use saflix_config::SaflixConfigLoader;
    ///
    /// let cfg = SaflixConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// site:
    ///   base_url: "https://movies.example"
    /// browser:
    ///   headless: false
    ///   navigation_timeout_secs: 10
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.site.base_url, "https://movies.example");
    /// assert!(!cfg.browser.headless);
    /// assert_eq!(cfg.browser.navigation_timeout_secs, 10);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// Sources combine in order (later wins): serde defaults, attached files,
    /// `SAFLIX_`-prefixed environment variables. `${VAR}` placeholders are
    /// expanded before materialising the strongly typed struct.
    pub fn load(self) -> Result<SaflixConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Convert to serde_json::Value first so env expansion sees every
        // string, then deserialize into the typed config.
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: SaflixConfig =
            serde_json::from_value(v).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
