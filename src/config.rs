//! Service Configuration
//!
//! Settings come from environment variables and can be overridden on the
//! command line:
//!
//! | Env var                     | Flag                   | Default           |
//! |-----------------------------|------------------------|-------------------|
//! | `BIND_HOST`                 | `--host`               | `0.0.0.0`         |
//! | `PORT`                      | `--port`               | `8080`            |
//! | `DATA_FILE_PATH`            | `--data`               | `data/books.json` |
//! | `SEARCH_PARALLEL_THRESHOLD` | `--parallel-threshold` | `20`              |
//! | `LOG_LEVEL`                 | `--log-level`          | `info`            |

use crate::search::engine::SearchConfig;
use crate::search::strategy::DEFAULT_PARALLEL_THRESHOLD;

use anyhow::{Context, Result, anyhow, bail};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: IpAddr,
    pub port: u16,
    pub data_file: PathBuf,
    pub parallel_threshold: usize,
    pub log_level: tracing::Level,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            data_file: PathBuf::from("data/books.json"),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            log_level: tracing::Level::INFO,
        }
    }
}

impl ServiceConfig {
    /// Loads the configuration from the process environment and arguments.
    pub fn load() -> Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_sources(|key| std::env::var(key).ok(), &args)
    }

    /// Builds the configuration from an env lookup and the argument list
    /// (without the program name). Arguments win over the environment.
    pub fn from_sources<F>(env: F, args: &[String]) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = env("BIND_HOST") {
            config.host = parse_host(&v)?;
        }
        if let Some(v) = env("PORT") {
            config.port = parse_port(&v)?;
        }
        if let Some(v) = env("DATA_FILE_PATH") {
            config.data_file = PathBuf::from(v);
        }
        if let Some(v) = env("SEARCH_PARALLEL_THRESHOLD") {
            config.parallel_threshold = parse_threshold(&v)?;
        }
        if let Some(v) = env("LOG_LEVEL") {
            config.log_level = parse_level(&v)?;
        }

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = || {
                args.get(i + 1)
                    .ok_or_else(|| anyhow!("{} requires a value", flag))
            };
            match flag {
                "--host" => config.host = parse_host(value()?)?,
                "--port" => config.port = parse_port(value()?)?,
                "--data" => config.data_file = PathBuf::from(value()?),
                "--parallel-threshold" => config.parallel_threshold = parse_threshold(value()?)?,
                "--log-level" => config.log_level = parse_level(value()?)?,
                other => bail!("unknown argument: {}", other),
            }
            i += 2;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn search(&self) -> SearchConfig {
        SearchConfig {
            parallel_threshold: self.parallel_threshold,
        }
    }
}

fn parse_host(v: &str) -> Result<IpAddr> {
    v.parse().with_context(|| format!("invalid host {:?}", v))
}

fn parse_port(v: &str) -> Result<u16> {
    v.parse().with_context(|| format!("invalid port {:?}", v))
}

fn parse_threshold(v: &str) -> Result<usize> {
    let threshold: usize = v
        .parse()
        .with_context(|| format!("invalid parallel threshold {:?}", v))?;
    if threshold == 0 {
        bail!("parallel threshold must be positive");
    }
    Ok(threshold)
}

fn parse_level(v: &str) -> Result<tracing::Level> {
    v.parse()
        .map_err(|_| anyhow!("invalid log level {:?}", v))
}
