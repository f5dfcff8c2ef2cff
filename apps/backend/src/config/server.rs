//! HTTP server and game settings read from the environment.

use std::env;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seed for the computer's hand source; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            rng_seed: None,
        }
    }
}

impl ServerConfig {
    /// `BACKEND_HOST`, `BACKEND_PORT` and `ROSHAMBO_RNG_SEED`; unset values keep defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let host = env::var("BACKEND_HOST").unwrap_or(defaults.host);
        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::config(format!("BACKEND_PORT '{raw}' is invalid: {e}")))?,
            Err(_) => defaults.port,
        };
        let rng_seed = match env::var("ROSHAMBO_RNG_SEED") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<u64>().map_err(|e| {
                AppError::config(format!("ROSHAMBO_RNG_SEED '{raw}' is invalid: {e}"))
            })?),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            rng_seed,
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
