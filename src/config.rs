use std::{net::IpAddr, path::PathBuf, str::FromStr};

use anyhow::Context;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DIST_PATH: &str = "client/dist";

/// Server settings, read from the environment (and `.env`, when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Directory holding the built client bundle.
    pub dist_path: PathBuf,
    /// Open the chat with a welcome message. Off unless `SEED_WELCOME` says otherwise.
    pub seed_welcome: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            dist_path: PathBuf::from(DEFAULT_DIST_PATH),
            seed_welcome: false,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenv::dotenv();
        let defaults = Self::default();

        Ok(Self {
            host: var_or("HOST", defaults.host)?,
            port: var_or("PORT", defaults.port)?,
            dist_path: dotenv::var("CLIENT_DIST_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dist_path),
            seed_welcome: var_or("SEED_WELCOME", defaults.seed_welcome)?,
        })
    }
}

fn var_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match dotenv::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_5000_without_seed() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.dist_path, PathBuf::from("client/dist"));
        assert!(!config.seed_welcome);
    }
}
