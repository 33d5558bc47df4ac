use std::{env, fs};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub watch: Watch,
    #[serde(default)]
    pub log: Log,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Server {
    #[serde(default = "default_server_url")]
    pub url: String,
    #[serde(default = "default_server_secret")]
    pub secret: String,
    /// Milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Milliseconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Watch {
    #[serde(default)]
    pub sessions: Vec<String>,
    #[serde(default)]
    pub tick_time: TickTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickTime(pub u64);

impl Default for TickTime {
    fn default() -> Self {
        TickTime(5000)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            secret: default_server_secret(),
            connect_timeout: default_connect_timeout(),
            timeout: default_timeout(),
        }
    }
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_server_url() -> String {
    env::var("OPENVIDU_URL").unwrap_or(String::from("http://localhost:4443"))
}

fn default_server_secret() -> String {
    env::var("OPENVIDU_SECRET").unwrap_or_default()
}

fn default_connect_timeout() -> u64 {
    500
}

fn default_timeout() -> u64 {
    1000
}

fn default_log_level() -> String {
    env::var("LOG_LEVEL").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "debug".to_string()
        } else {
            "info".to_string()
        }
    })
}

impl Config {
    pub fn parse(path: Option<String>) -> anyhow::Result<Self> {
        let result = match path {
            Some(path) => fs::read_to_string(&path).with_context(|| format!("read {}", path))?,
            None => fs::read_to_string("livemirror.toml")
                .or(fs::read_to_string("/etc/livemirror/livemirror.toml"))
                .unwrap_or_default(),
        };
        let cfg: Self = toml::from_str(result.as_str()).context("config parse error")?;
        cfg.validate().context("config validate")?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.server.url.is_empty() {
            return Err(anyhow!("server url is empty"));
        }
        if self.watch.tick_time.0 == 0 {
            return Err(anyhow!("watch tick_time must be greater than zero"));
        }
        Ok(())
    }
}
