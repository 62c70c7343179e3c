use std::{env, path::PathBuf, time::Duration};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub autosave_delay: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: parse_var("PORT").unwrap_or(DEFAULT_PORT),
            data_dir: env::var("APP_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            autosave_delay: Duration::from_millis(
                parse_var("AUTOSAVE_DELAY_MS").unwrap_or(DEFAULT_AUTOSAVE_DELAY_MS),
            ),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = env::var(name).ok()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("ignoring invalid {name}={value:?}, using default");
            None
        }
    }
}
