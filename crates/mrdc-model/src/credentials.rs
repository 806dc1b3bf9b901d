//! Database credentials loaded from YAML key-value documents.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ModelError, Result};

const PASSWORD_MASK: &str = "****";

/// Connection parameters shared by the source and warehouse databases.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl ConnectionParams {
    /// Key-value connection string accepted by the `postgres` client.
    pub fn connection_string(&self) -> String {
        self.render(&self.password)
    }

    /// Connection string with the password masked, for logs.
    pub fn connection_string_masked(&self) -> String {
        self.render(PASSWORD_MASK)
    }

    fn render(&self, password: &str) -> String {
        format!(
            "host={} port={} user={} password={} dbname={}",
            quote(&self.host),
            self.port,
            quote(&self.user),
            quote(password),
            quote(&self.database)
        )
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &PASSWORD_MASK)
            .field("database", &self.database)
            .finish()
    }
}

fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Source database credentials (`RDS_*` keys).
#[derive(Clone, Deserialize)]
pub struct SourceCredentials {
    #[serde(rename = "RDS_HOST")]
    pub host: String,
    #[serde(rename = "RDS_USER")]
    pub user: String,
    #[serde(rename = "RDS_PASSWORD")]
    pub password: String,
    #[serde(rename = "RDS_DATABASE")]
    pub database: String,
    #[serde(rename = "RDS_PORT")]
    pub port: u16,
}

/// Warehouse credentials.
#[derive(Clone, Deserialize)]
pub struct WarehouseCredentials {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

impl SourceCredentials {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_yaml_str(&read_document(path)?)
    }

    pub fn connection_params(&self) -> ConnectionParams {
        ConnectionParams {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
        }
    }
}

impl WarehouseCredentials {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_yaml_str(&read_document(path)?)
    }

    pub fn connection_params(&self) -> ConnectionParams {
        ConnectionParams {
            host: self.host.clone(),
            port: self.port,
            user: self.username.clone(),
            password: self.password.clone(),
            database: self.name.clone(),
        }
    }
}

impl fmt::Debug for SourceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.connection_params(), f)
    }
}

impl fmt::Debug for WarehouseCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.connection_params(), f)
    }
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ModelError::CredentialsRead {
        path: path.to_path_buf(),
        source,
    })
}
