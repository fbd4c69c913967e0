use std::io;

use anyhow::anyhow;
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    /// PostgreSQL schema holding `file_ledger`; plays the role of a keyspace.
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default = "default_bootstrap_schema")]
    pub bootstrap_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            namespace: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            bootstrap_schema: default_bootstrap_schema(),
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_bootstrap_schema() -> bool { true }

fn default_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&default_path())
}

/// Read `path`, or build from the environment when the file does not exist.
/// A file that exists but cannot be read or parsed is an error.
pub fn load_or_env(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content).with_context(|| format!("invalid config file {path}")),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(AppConfig::from_env()),
        Err(e) => Err(e).with_context(|| format!("cannot read config file {path}")),
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to environment
    /// variables when the file is missing, then normalize and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_or_env(&default_path())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Build a config purely from `SERVER_HOST`, `SERVER_PORT` and `DATABASE_URL`.
    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.database.normalize_from_env();
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // url from the file wins over DATABASE_URL
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
        if let Some(ns) = &self.namespace {
            if ns.trim().is_empty() {
                self.namespace = None;
            }
        }
    }

    /// Single-connection in-memory SQLite; every pooled connection would
    /// otherwise see its own empty database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.to_lowercase().starts_with("sqlite:")
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || self.is_sqlite()) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if let Some(ns) = &self.namespace {
            if !ns.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(anyhow!("database.namespace may only contain [A-Za-z0-9_]"));
            }
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let cfg = parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9090
            worker_threads = 2

            [database]
            url = "postgres://ledger:secret@db:5432/phylactery"
            namespace = "phylactery"
            max_connections = 20
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:9090");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.database.namespace.as_deref(), Some("phylactery"));
        assert_eq!(cfg.database.max_connections, 20);
        assert_eq!(cfg.database.min_connections, 2);
        assert!(cfg.database.bootstrap_schema);
        cfg.database.validate().unwrap();
    }

    #[test]
    fn empty_file_gets_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.database.acquire_timeout_secs, 30);
    }

    #[test]
    fn rejects_unknown_scheme_and_bad_pool() {
        let mut db = DatabaseConfig { url: "mysql://x".into(), ..Default::default() };
        assert!(db.validate().is_err());

        db.url = "sqlite::memory:".into();
        db.validate().unwrap();

        db.min_connections = 5;
        db.max_connections = 1;
        assert!(db.validate().is_err());
    }

    #[test]
    fn rejects_namespace_with_quotes() {
        let db = DatabaseConfig {
            url: "postgres://localhost/ledger".into(),
            namespace: Some("ledger\"; drop".into()),
            ..Default::default()
        };
        assert!(db.validate().is_err());
    }

    fn scratch_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("phylactery-{}-{name}.toml", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn malformed_file_is_an_error_not_env_fallback() {
        let path = scratch_file(
            "malformed",
            r#"
            [server]
            port = "9090"

            [database]
            url = "postgres://prod/ledger"
            "#,
        );
        let res = load_or_env(path.to_str().unwrap());
        std::fs::remove_file(&path).unwrap();
        let err = res.unwrap_err();
        assert!(format!("{err:#}").contains("invalid config file"));
    }

    #[test]
    fn existing_file_is_used() {
        let path = scratch_file(
            "valid",
            r#"
            [server]
            port = 9091

            [database]
            url = "postgres://prod/ledger"
            "#,
        );
        let res = load_or_env(path.to_str().unwrap());
        std::fs::remove_file(&path).unwrap();
        let cfg = res.unwrap();
        assert_eq!(cfg.server.port, 9091);
        assert_eq!(cfg.database.url, "postgres://prod/ledger");
    }

    #[test]
    fn missing_file_falls_back_to_env() {
        let path = std::env::temp_dir().join("phylactery-does-not-exist.toml");
        let cfg = load_or_env(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.host, std::env::var("SERVER_HOST").unwrap_or_else(|_| default_host()));
    }

    #[test]
    fn zero_port_is_invalid() {
        let mut s = ServerConfig { port: 0, ..Default::default() };
        assert!(s.normalize().is_err());
        s.port = 8080;
        s.worker_threads = Some(0);
        s.normalize().unwrap();
        assert_eq!(s.worker_threads, Some(4));
    }
}
