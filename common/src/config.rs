//! Application configuration and database credential profiles.
//!
//! Everything is sourced from the environment with local-development
//! defaults. Credential profiles are assembled exactly once, here, so no
//! other component can reach the wrong privilege tier.

use std::env;
use std::fmt;

use crate::errors::{AppError, AppResult};

/// Service configuration loaded at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen host.
    pub host: String,

    /// Listen port.
    pub port: u16,

    /// CORS allow-list: `*` or a comma-separated list of origins.
    pub allowed_origin: String,

    /// Database endpoint shared by both credential profiles.
    pub database: DatabaseConfig,
}

/// Database endpoint settings (credentials live in [`Credentials`]).
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Whether to require TLS on the database connection.
    pub tls: bool,
}

impl AppConfig {
    /// Loads the configuration from the environment.
    ///
    /// Defaults are suitable for local development only.
    pub fn load(default_port: u16) -> Self {
        Self {
            host: env_or("SERVER_HOST", "0.0.0.0"),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default_port),
            allowed_origin: env_or("ALLOWED_ORIGIN", "*"),
            database: DatabaseConfig {
                host: env_or("DB_HOST", "localhost"),
                port: env::var("DB_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5432),
                name: env_or("DB_NAME", "patientdb"),
                tls: env_flag("DB_TLS"),
            },
        }
    }
}

/// A single database credential tier.
///
/// Immutable for the process lifetime. The password never appears in
/// `Debug` output.
#[derive(Clone)]
pub struct ConnectionProfile {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub tls: bool,
}

impl ConnectionProfile {
    fn validate(&self, role: &str) -> AppResult<()> {
        for (field, value) in [
            ("host", &self.host),
            ("database", &self.database),
            ("username", &self.username),
            ("password", &self.password),
        ] {
            if value.is_empty() {
                return Err(AppError::Config(format!(
                    "{} profile is missing required field `{}`",
                    role, field
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProfile")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("tls", &self.tls)
            .finish()
    }
}

/// The kind of database work a request was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Seeding the fixed row set. Requires schema and insert privileges.
    Seed,
    /// Running a guarded read-only query.
    Query,
}

/// The two credential tiers, writer and reader.
///
/// Fields are private: the only way to obtain a profile is through
/// [`Credentials::profile_for`], which keeps the tiers from crossing role
/// boundaries.
#[derive(Debug, Clone)]
pub struct Credentials {
    writer: ConnectionProfile,
    reader: ConnectionProfile,
}

impl Credentials {
    /// Builds the credential pair, validating both profiles.
    ///
    /// # Errors
    /// Returns `AppError::Config` if either profile is missing a required
    /// field. Callers treat this as fatal at startup.
    pub fn new(writer: ConnectionProfile, reader: ConnectionProfile) -> AppResult<Self> {
        writer.validate("writer")?;
        reader.validate("reader")?;
        Ok(Self { writer, reader })
    }

    /// Assembles both profiles from the environment.
    ///
    /// The reader account is expected to be restricted to SELECT at the
    /// database level; the split here is the application-side half of that
    /// contract.
    pub fn from_env(database: &DatabaseConfig) -> AppResult<Self> {
        let writer = ConnectionProfile {
            host: database.host.clone(),
            port: database.port,
            database: database.name.clone(),
            username: env_or("DB_WRITER_USER", "patient_admin"),
            password: env_or("DB_WRITER_PASSWORD", "admin"),
            tls: database.tls,
        };
        let reader = ConnectionProfile {
            host: database.host.clone(),
            port: database.port,
            database: database.name.clone(),
            username: env_or("DB_READER_USER", "patient_reader"),
            password: env_or("DB_READER_PASSWORD", "reader"),
            tls: database.tls,
        };
        Self::new(writer, reader)
    }

    /// Returns the profile allowed to service the given operation.
    pub fn profile_for(&self, kind: OperationKind) -> &ConnectionProfile {
        match kind {
            OperationKind::Seed => &self.writer,
            OperationKind::Query => &self.reader,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(username: &str, password: &str) -> ConnectionProfile {
        ConnectionProfile {
            host: "localhost".into(),
            port: 5432,
            database: "patientdb".into(),
            username: username.into(),
            password: password.into(),
            tls: false,
        }
    }

    #[test]
    fn test_profile_selection_never_crosses_tiers() {
        let creds = Credentials::new(profile("admin", "a"), profile("reader", "r")).unwrap();
        assert_eq!(creds.profile_for(OperationKind::Seed).username, "admin");
        assert_eq!(creds.profile_for(OperationKind::Query).username, "reader");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let result = Credentials::new(profile("", "a"), profile("reader", "r"));
        assert!(result.is_err());

        let result = Credentials::new(profile("admin", "a"), profile("reader", ""));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", profile("admin", "s3cret"));
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
