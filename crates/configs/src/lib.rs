use std::time::Duration;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

/// Default provider endpoint; override via `upstream.base_url` or `LAZACK_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = "https://boostapi.lazackorganisation.my.id/api/v1";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 3000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_connect_timeout() -> u64 { 5 }
fn default_request_timeout() -> u64 { 30 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl AppConfig {
    /// Load from `CONFIG_PATH`/`config.toml`. Only a missing file falls back
    /// to built-in defaults; an unreadable or malformed file is a hard error,
    /// so a typo cannot silently retarget the relay. Gaps are then filled
    /// from the environment and the result validated.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        // 归一化 upstream（允许从环境变量补齐 base_url / api_key）
        self.upstream.normalize_from_env();
        self.upstream.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must not be 0"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl UpstreamConfig {
    pub fn normalize_from_env(&mut self) {
        // 若 TOML 中未提供，则尝试从环境变量填充
        if self.base_url.trim().is_empty() {
            self.base_url = std::env::var("LAZACK_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        }
        if self.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var("LAZACK_API_KEY") {
                self.api_key = key;
            }
        }
        // trailing slash makes path joining produce `//order`
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(anyhow!(
                "upstream.base_url is empty; set it in config.toml or LAZACK_BASE_URL"
            ));
        }
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("upstream.base_url must start with http:// or https://"));
        }
        if self.api_key.trim().is_empty() {
            return Err(anyhow!(
                "upstream.api_key is empty; set it in config.toml or LAZACK_API_KEY"
            ));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(anyhow!("upstream timeouts must be positive integer seconds"));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
