use anyhow::{Context, Result, anyhow};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub seed_data: bool,
    pub dev_mode: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .context("Missing environment variable: PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let store_backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("memory") => StoreBackend::Memory,
            Some("postgres") => StoreBackend::Postgres,
            Some(other) => {
                return Err(anyhow!(
                    "STORE_BACKEND must be 'memory' or 'postgres', got '{}'",
                    other
                ));
            }
        };

        let database_url = lookup("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(anyhow!(
                "Missing environment variable: DATABASE_URL (required when STORE_BACKEND=postgres)"
            ));
        }

        let db_min_conn = match lookup("DB_MIN_CONN") {
            Some(v) => v
                .parse::<u32>()
                .context("DB_MIN_CONN must be a valid u32 integer")?,
            None => 1,
        };

        let db_max_conn = match lookup("DB_MAX_CONN") {
            Some(v) => v
                .parse::<u32>()
                .context("DB_MAX_CONN must be a valid u32 integer")?,
            None => 5,
        };

        if db_min_conn > db_max_conn {
            return Err(anyhow!(
                "DB_MIN_CONN ({}) must not exceed DB_MAX_CONN ({})",
                db_min_conn,
                db_max_conn
            ));
        }

        Ok(Self {
            port,
            store_backend,
            database_url,
            db_min_conn,
            db_max_conn,
            seed_data: parse_flag(lookup("SEED_DATA"), "SEED_DATA")?,
            dev_mode: parse_flag(lookup("DEV_MODE"), "DEV_MODE")?,
            enable_file_log: parse_flag(lookup("ENABLE_FILE_LOG"), "ENABLE_FILE_LOG")?,
        })
    }
}

fn parse_flag(value: Option<String>, name: &str) -> Result<bool> {
    match value.as_deref() {
        None => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(anyhow!("{} must be 'true' or 'false', got '{}'", name, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_memory_backend() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "8000")])).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.db_min_conn, 1);
        assert_eq!(config.db_max_conn, 5);
        assert!(!config.seed_data);
        assert!(!config.dev_mode);
    }

    #[test]
    fn port_is_required() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let err = Config::from_lookup(lookup_from(&[
            ("PORT", "8000"),
            ("STORE_BACKEND", "postgres"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8000"),
            ("STORE_BACKEND", "postgres"),
            ("DATABASE_URL", "postgres://localhost/catalog"),
            ("SEED_DATA", "1"),
        ]))
        .unwrap();
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert!(config.seed_data);
    }

    #[test]
    fn rejects_unknown_backend_and_bad_flags() {
        assert!(
            Config::from_lookup(lookup_from(&[("PORT", "8000"), ("STORE_BACKEND", "redis")]))
                .is_err()
        );
        assert!(
            Config::from_lookup(lookup_from(&[("PORT", "8000"), ("SEED_DATA", "yes")])).is_err()
        );
    }

    #[test]
    fn pool_bounds_must_be_ordered() {
        let err = Config::from_lookup(lookup_from(&[
            ("PORT", "8000"),
            ("DB_MIN_CONN", "10"),
            ("DB_MAX_CONN", "2"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DB_MIN_CONN"));
    }
}
