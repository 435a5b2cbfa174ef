use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use regex::Regex;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub nlp: NlpConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default = "default_template_path")]
    pub template_path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_template_path() -> String {
    "templates/index.html".to_string()
}

/// Response caching strategy applied to the page, assets and `/generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    NoStore,
    Revalidate,
    Immutable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_policy")]
    pub policy: CachePolicy,
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
    /// When set, asset links on the index page get a `?v=` query.
    #[serde(default)]
    pub asset_version: Option<String>,
}

fn default_cache_policy() -> CachePolicy {
    CachePolicy::Revalidate
}

fn default_max_age_secs() -> u64 {
    180
}

impl CacheConfig {
    pub fn cache_control(&self) -> String {
        match self.policy {
            CachePolicy::NoStore => "no-store, no-cache, must-revalidate".to_string(),
            CachePolicy::Revalidate => format!("max-age={}, must-revalidate", self.max_age_secs),
            CachePolicy::Immutable => format!("public, max-age={}, immutable", self.max_age_secs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NlpBackend {
    Builtin,
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NlpConfig {
    #[serde(default = "default_nlp_backend")]
    pub backend: NlpBackend,
    #[serde(default = "default_service_url")]
    pub service_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_nlp_backend() -> NlpBackend {
    NlpBackend::Builtin
}

fn default_service_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_model() -> String {
    "es_core_news_sm".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_true")]
    pub compact: bool,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_true")]
    pub collapse_punct: bool,
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_true() -> bool {
    true
}

fn default_bg() -> String {
    "#ffffff".to_string()
}

fn default_color() -> String {
    "#000000".to_string()
}

fn default_font() -> String {
    "Arial".to_string()
}

fn default_lang() -> String {
    "es".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            template_path: default_template_path(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            policy: default_cache_policy(),
            max_age_secs: default_max_age_secs(),
            asset_version: None,
        }
    }
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            backend: default_nlp_backend(),
            service_url: default_service_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            compact: true,
            bg: default_bg(),
            color: default_color(),
            font: default_font(),
            collapse_punct: true,
            lang: default_lang(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let content = substitute_env_vars(&load_text_file(path)?);

        // Determine file type by extension
        let path_lower = path.to_lowercase();
        let mut config: Config = if path_lower.ends_with(".jsonld") || path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("NLP_SERVICE_URL") {
            self.nlp.service_url = url;
        }
    }

    /// Candidate config locations, most specific first.
    pub fn search_paths() -> Vec<String> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));

        vec![
            std::env::var("CONFIG_PATH").ok(),
            Some("conf.yaml".to_string()),
            Some("conf.json".to_string()),
            exe_dir.join("conf.yaml").to_str().map(|s| s.to_string()),
            exe_dir.join("conf.json").to_str().map(|s| s.to_string()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load the first config that parses; `None` if nothing usable was found.
    pub fn discover() -> Option<(Self, String)> {
        for path in Self::search_paths() {
            match Config::load(&path) {
                Ok(cfg) => return Some((cfg, path)),
                Err(e) => {
                    debug!("Failed to load config from {}: {}", path, e);
                    continue;
                }
            }
        }
        None
    }
}

/// Replace `${VAR_NAME}` with the environment value, leaving unknown vars as-is.
pub fn substitute_env_vars(content: &str) -> String {
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("static regex");
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Read a text file as UTF-8, dropping a leading BOM.
fn load_text_file(file_path: &str) -> Result<String> {
    let bytes = fs::read(file_path)?;
    let (cow, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        debug!("Replaced invalid UTF-8 sequences while reading {}", file_path);
    }
    Ok(cow.into_owned())
}
