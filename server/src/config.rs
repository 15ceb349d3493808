//! Server configuration parsed from environment variables.

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
pub const DEFAULT_CLIENT_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var} value {value:?}: {reason}")]
    Invalid { var: &'static str, value: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Messages kept for replay to newly connected clients.
    pub history_limit: usize,
    /// Per-client outbound queue depth.
    pub client_queue_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            history_limit: DEFAULT_HISTORY_LIMIT,
            client_queue_capacity: DEFAULT_CLIENT_QUEUE_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Build typed server config from environment variables. Empty values
    /// count as unset.
    ///
    /// Optional:
    /// - `PORT`: default 8080
    /// - `HISTORY_LIMIT`: default 50, `0` disables replay
    /// - `CLIENT_QUEUE_CAPACITY`: default 256, must be positive
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_var(&lookup, "PORT", DEFAULT_PORT)?;
        let history_limit = parse_var(&lookup, "HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT)?;
        let client_queue_capacity = parse_var(&lookup, "CLIENT_QUEUE_CAPACITY", DEFAULT_CLIENT_QUEUE_CAPACITY)?;
        if client_queue_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "CLIENT_QUEUE_CAPACITY",
                value: "0".into(),
                reason: "must be greater than zero".into(),
            });
        }

        Ok(Self { port, history_limit, client_queue_capacity })
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid { var, value: raw.clone(), reason: e.to_string() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
