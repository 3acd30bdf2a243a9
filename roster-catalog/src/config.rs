use std::env;

pub const DATABASE_URL_VAR: &str = "ROSTER_DATABASE_URL";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://:memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
}

impl Config {
    /// Reads the configuration from the environment, falling back to an in-memory database.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: lookup(DATABASE_URL_VAR)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
        }
    }
}
