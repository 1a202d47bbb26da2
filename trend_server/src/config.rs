use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use trend_forecast::PredictionStrategy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
    #[serde(default)]
    pub static_dir: Option<String>,
    #[serde(default)]
    pub default_keyword: Option<String>,
}

/// Which historical-data source to use. Mock and real fetch are independent
/// strategies selected here, never interleaved fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "mock")]
    Mock,
    #[serde(rename = "serpapi")]
    SerpApi,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub kind: Option<ProviderKind>,
    /// Env var name holding the SerpAPI key (default SERPAPI_KEY)
    #[serde(default)]
    pub api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    #[serde(default)]
    pub strategy: Option<PredictionStrategy>,
    #[serde(default)]
    pub ai_growth_scale: Option<f64>,
    #[serde(default)]
    pub connect_to_history: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub server: Option<ServerConfig>,
    pub provider: Option<ProviderConfig>,
    pub projection: Option<ProjectionConfig>,
}

impl Config {
    pub fn load() -> anyhow::Result<(Self, PathBuf)> {
        let cfg_path = env::var("TRENDSCOPE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/trendscope.toml"));

        if !cfg_path.exists() {
            return Ok((Config::default(), cfg_path));
        }

        let text = fs::read_to_string(&cfg_path)?;
        let cfg: Config = toml::from_str(&text)?;

        Ok((cfg, cfg_path))
    }

    pub fn bind(&self) -> String {
        env::var("TRENDSCOPE_BIND")
            .ok()
            .or_else(|| self.server.as_ref().and_then(|s| s.bind.clone()))
            .unwrap_or_else(|| "127.0.0.1:5000".to_string())
    }

    pub fn static_dir(&self) -> PathBuf {
        self.server
            .as_ref()
            .and_then(|s| s.static_dir.as_ref())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("static"))
    }

    pub fn default_keyword(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.default_keyword.clone())
            .unwrap_or_else(|| "Python programming".to_string())
    }

    pub fn provider_kind(&self) -> ProviderKind {
        self.provider
            .as_ref()
            .and_then(|p| p.kind)
            .unwrap_or(ProviderKind::Mock)
    }

    pub fn api_key_env(&self) -> String {
        self.provider
            .as_ref()
            .and_then(|p| p.api_key_env.clone())
            .unwrap_or_else(|| "SERPAPI_KEY".to_string())
    }
}
