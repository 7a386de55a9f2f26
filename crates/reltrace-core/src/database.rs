use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ReltraceError, ReltraceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseType {
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "postgresql")]
    PostgreSql,
    #[serde(rename = "sqlite3")]
    Sqlite,
}

impl DatabaseType {
    /// Selection order shown to the user.
    pub const ALL: [DatabaseType; 3] = [Self::MySql, Self::PostgreSql, Self::Sqlite];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::PostgreSql => "postgresql",
            Self::Sqlite => "sqlite3",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::MySql => "MySQL Database",
            Self::PostgreSql => "PostgreSQL Database",
            Self::Sqlite => "SQLite3 Database",
        }
    }

    pub fn profile(&self) -> &'static dyn ConnectionProfile {
        match self {
            Self::MySql => &MYSQL_PROFILE,
            Self::PostgreSql => &POSTGRES_PROFILE,
            Self::Sqlite => &SQLITE_PROFILE,
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A connection attribute of a [`DatabaseConfig`].
///
/// `Database` is the database name for server engines and the file path for
/// SQLite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConnectionField {
    Host,
    Port,
    User,
    Password,
    Database,
}

impl ConnectionField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Port => "port",
            Self::User => "user",
            Self::Password => "password",
            Self::Database => "database",
        }
    }
}

/// Per-engine rules for collecting and checking a connection.
pub trait ConnectionProfile: Send + Sync {
    fn database_type(&self) -> DatabaseType;

    /// Fields this engine uses, in form order.
    fn fields(&self) -> &'static [ConnectionField];

    /// Fields that must be non-empty before the connection is accepted.
    fn required_fields(&self) -> &'static [ConnectionField];

    /// Port substituted when the port field is left empty.
    fn default_port(&self) -> Option<&'static str>;

    fn placeholder(&self, field: ConnectionField) -> &'static str;

    fn database_label(&self) -> &'static str;
}

struct ServerProfile {
    db_type: DatabaseType,
    default_port: &'static str,
    port_placeholder: &'static str,
}

static MYSQL_PROFILE: ServerProfile = ServerProfile {
    db_type: DatabaseType::MySql,
    default_port: "3306",
    port_placeholder: "Port (default: 3306)",
};

static POSTGRES_PROFILE: ServerProfile = ServerProfile {
    db_type: DatabaseType::PostgreSql,
    default_port: "5432",
    port_placeholder: "Port (default: 5432)",
};

impl ConnectionProfile for ServerProfile {
    fn database_type(&self) -> DatabaseType {
        self.db_type
    }

    fn fields(&self) -> &'static [ConnectionField] {
        &[
            ConnectionField::Host,
            ConnectionField::Port,
            ConnectionField::User,
            ConnectionField::Password,
            ConnectionField::Database,
        ]
    }

    fn required_fields(&self) -> &'static [ConnectionField] {
        &[
            ConnectionField::Host,
            ConnectionField::User,
            ConnectionField::Database,
        ]
    }

    fn default_port(&self) -> Option<&'static str> {
        Some(self.default_port)
    }

    fn placeholder(&self, field: ConnectionField) -> &'static str {
        match field {
            ConnectionField::Host => "Host (e.g., localhost)",
            ConnectionField::Port => self.port_placeholder,
            ConnectionField::User => "Username",
            ConnectionField::Password => "Password",
            ConnectionField::Database => "Database Name",
        }
    }

    fn database_label(&self) -> &'static str {
        "Database"
    }
}

struct FileProfile;

static SQLITE_PROFILE: FileProfile = FileProfile;

impl ConnectionProfile for FileProfile {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::Sqlite
    }

    fn fields(&self) -> &'static [ConnectionField] {
        &[ConnectionField::Database]
    }

    fn required_fields(&self) -> &'static [ConnectionField] {
        &[ConnectionField::Database]
    }

    fn default_port(&self) -> Option<&'static str> {
        None
    }

    fn placeholder(&self, field: ConnectionField) -> &'static str {
        match field {
            ConnectionField::Database => "SQLite File Path (e.g., ./database.db)",
            _ => "Not needed for SQLite",
        }
    }

    fn database_label(&self) -> &'static str {
        "File Path"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(rename = "type")]
    pub db_type: DatabaseType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub port: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub database: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file_path: String,
}

impl DatabaseConfig {
    pub fn new(db_type: DatabaseType) -> Self {
        Self {
            db_type,
            host: String::new(),
            port: String::new(),
            user: String::new(),
            password: String::new(),
            database: String::new(),
            file_path: String::new(),
        }
    }

    pub fn profile(&self) -> &'static dyn ConnectionProfile {
        self.db_type.profile()
    }

    pub fn value(&self, field: ConnectionField) -> &str {
        match field {
            ConnectionField::Host => &self.host,
            ConnectionField::Port => &self.port,
            ConnectionField::User => &self.user,
            ConnectionField::Password => &self.password,
            ConnectionField::Database if self.db_type == DatabaseType::Sqlite => &self.file_path,
            ConnectionField::Database => &self.database,
        }
    }

    /// Check the fields the profile requires and, when present, the port.
    pub fn validate(&self) -> ReltraceResult<()> {
        let profile = self.profile();
        for field in profile.required_fields() {
            if self.value(*field).trim().is_empty() {
                return Err(ReltraceError::validation(field.name(), "must not be empty"));
            }
        }
        if profile.fields().contains(&ConnectionField::Port) {
            validate_port(&self.port)?;
        }
        Ok(())
    }

    /// Connection summary without the password, e.g. `mysql://root@localhost:3306/shop`.
    pub fn describe(&self) -> String {
        match self.db_type {
            DatabaseType::Sqlite => format!("sqlite3:{}", self.file_path),
            db_type => {
                let user = if self.user.is_empty() {
                    String::new()
                } else {
                    format!("{}@", self.user)
                };
                let port = if self.port.is_empty() {
                    String::new()
                } else {
                    format!(":{}", self.port)
                };
                format!("{db_type}://{user}{}{port}/{}", self.host, self.database)
            }
        }
    }
}

/// An empty port is accepted; anything else must be a TCP port number.
pub fn validate_port(port: &str) -> ReltraceResult<()> {
    let port = port.trim();
    if port.is_empty() {
        return Ok(());
    }
    match port.parse::<u16>() {
        Ok(p) if p > 0 => Ok(()),
        _ => Err(ReltraceError::validation(
            "port",
            format!("'{port}' is not a port number"),
        )),
    }
}
