use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::models::Role;

/// Where the session's records come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSettings {
    Embedded,
    File {
        jobs_path: PathBuf,
        candidates_path: PathBuf,
    },
    Http {
        jobs_url: String,
        candidates_url: String,
    },
}

/// Application configuration loaded from environment variables.
/// Startup fails if a variable required by the chosen record source is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub source: SourceSettings,
    pub default_role: Role,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let source = match lookup("RECORDS_SOURCE").as_deref().unwrap_or("embedded") {
            "embedded" => SourceSettings::Embedded,
            "file" => SourceSettings::File {
                jobs_path: require("JOBS_PATH")?.into(),
                candidates_path: require("CANDIDATES_PATH")?.into(),
            },
            "http" => SourceSettings::Http {
                jobs_url: require("JOBS_URL")?,
                candidates_url: require("CANDIDATES_URL")?,
            },
            other => bail!("RECORDS_SOURCE must be one of embedded, file, http (got '{other}')"),
        };

        let default_role = match lookup("DEFAULT_ROLE") {
            Some(raw) => raw
                .parse::<Role>()
                .map_err(anyhow::Error::msg)
                .context("DEFAULT_ROLE must be jobseeker, recruiter or admin")?,
            None => Role::default(),
        };

        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            source,
            default_role,
        })
    }
}
