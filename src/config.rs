use std::{fmt, net::SocketAddr, str::FromStr};

use anyhow::Context;

/// What happens to movies that reference a director or genre being deleted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrphanPolicy {
    /// Delete anyway and leave the dangling id on the movie rows.
    #[default]
    Ignore,
    /// Refuse the delete while any movie still references the row.
    Restrict,
    /// Clear the reference on every affected movie, then delete.
    SetNull,
}

impl FromStr for OrphanPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(OrphanPolicy::Ignore),
            "restrict" => Ok(OrphanPolicy::Restrict),
            "set-null" | "set_null" => Ok(OrphanPolicy::SetNull),
            other => anyhow::bail!(
                "unknown orphan policy {other:?} (expected ignore, restrict or set-null)"
            ),
        }
    }
}

impl fmt::Display for OrphanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrphanPolicy::Ignore => "ignore",
            OrphanPolicy::Restrict => "restrict",
            OrphanPolicy::SetNull => "set-null",
        })
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub orphan_policy: OrphanPolicy,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string());

        let orphan_policy = match std::env::var("ORPHAN_POLICY") {
            Ok(raw) => raw.parse().context("ORPHAN_POLICY")?,
            Err(_) => OrphanPolicy::default(),
        };

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            orphan_policy,
        })
    }

    /// In-memory database, used by the test suites.
    pub fn in_memory(orphan_policy: OrphanPolicy) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            database_url: "sqlite::memory:".to_string(),
            orphan_policy,
        }
    }
}
