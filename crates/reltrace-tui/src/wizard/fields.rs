use reltrace_core::database::{ConnectionField, ConnectionProfile, DatabaseConfig, DatabaseType};

use crate::widgets::input::TextInput;

/// Every input the form can show, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    Host,
    Port,
    User,
    Password,
    Database,
    RootTable,
    RootPrimaryKey,
    OutputPath,
}

impl FieldId {
    pub const ALL: [FieldId; 8] = [
        Self::Host,
        Self::Port,
        Self::User,
        Self::Password,
        Self::Database,
        Self::RootTable,
        Self::RootPrimaryKey,
        Self::OutputPath,
    ];

    /// Fields that describe how the dump runs rather than where the data lives.
    pub const DUMP_OPTIONS: [FieldId; 3] = [Self::RootTable, Self::RootPrimaryKey, Self::OutputPath];

    pub fn connection(&self) -> Option<ConnectionField> {
        match self {
            Self::Host => Some(ConnectionField::Host),
            Self::Port => Some(ConnectionField::Port),
            Self::User => Some(ConnectionField::User),
            Self::Password => Some(ConnectionField::Password),
            Self::Database => Some(ConnectionField::Database),
            _ => None,
        }
    }

    pub fn label(&self, profile: &dyn ConnectionProfile) -> &'static str {
        match self {
            Self::Host => "Host",
            Self::Port => "Port",
            Self::User => "Username",
            Self::Password => "Password",
            Self::Database => profile.database_label(),
            Self::RootTable => "Root Table",
            Self::RootPrimaryKey => "Primary Key",
            Self::OutputPath => "Output Path",
        }
    }
}

impl From<ConnectionField> for FieldId {
    fn from(field: ConnectionField) -> Self {
        match field {
            ConnectionField::Host => Self::Host,
            ConnectionField::Port => Self::Port,
            ConnectionField::User => Self::User,
            ConnectionField::Password => Self::Password,
            ConnectionField::Database => Self::Database,
        }
    }
}

/// The form's inputs as a named record.
#[derive(Debug, Clone)]
pub struct FormFields {
    pub host: TextInput,
    pub port: TextInput,
    pub user: TextInput,
    pub password: TextInput,
    pub database: TextInput,
    pub root_table: TextInput,
    pub root_primary_key: TextInput,
    pub output_path: TextInput,
}

impl FormFields {
    pub fn new() -> Self {
        Self {
            host: TextInput::new("Host").with_placeholder("Database Host (e.g., localhost)"),
            port: TextInput::new("Port").with_placeholder("Port (e.g., 3306, 5432)"),
            user: TextInput::new("Username").with_placeholder("Username"),
            password: TextInput::new("Password")
                .with_placeholder("Password")
                .with_masked(),
            database: TextInput::new("Database").with_placeholder("Database Name"),
            root_table: TextInput::new("Root Table").with_placeholder("Root Table Name"),
            root_primary_key: TextInput::new("Primary Key").with_placeholder("Primary Key Value"),
            output_path: TextInput::new("Output Path").with_placeholder("Output Path (optional)"),
        }
    }

    pub fn get(&self, id: FieldId) -> &TextInput {
        match id {
            FieldId::Host => &self.host,
            FieldId::Port => &self.port,
            FieldId::User => &self.user,
            FieldId::Password => &self.password,
            FieldId::Database => &self.database,
            FieldId::RootTable => &self.root_table,
            FieldId::RootPrimaryKey => &self.root_primary_key,
            FieldId::OutputPath => &self.output_path,
        }
    }

    pub fn get_mut(&mut self, id: FieldId) -> &mut TextInput {
        match id {
            FieldId::Host => &mut self.host,
            FieldId::Port => &mut self.port,
            FieldId::User => &mut self.user,
            FieldId::Password => &mut self.password,
            FieldId::Database => &mut self.database,
            FieldId::RootTable => &mut self.root_table,
            FieldId::RootPrimaryKey => &mut self.root_primary_key,
            FieldId::OutputPath => &mut self.output_path,
        }
    }

    pub fn value(&self, id: FieldId) -> &str {
        self.get(id).value()
    }

    /// Relabel and re-placeholder the connection inputs for `profile`.
    pub fn apply_profile(&mut self, profile: &dyn ConnectionProfile) {
        for field in [
            ConnectionField::Host,
            ConnectionField::Port,
            ConnectionField::User,
            ConnectionField::Password,
            ConnectionField::Database,
        ] {
            let id = FieldId::from(field);
            let input = self.get_mut(id);
            input.label = id.label(profile).to_string();
            input.set_placeholder(profile.placeholder(field));
        }
    }

    /// Focus `target` and blur every other input. `None` blurs them all.
    pub fn set_focus(&mut self, target: Option<FieldId>) {
        for id in FieldId::ALL {
            let input = self.get_mut(id);
            if Some(id) == target {
                input.focus();
            } else {
                input.blur();
            }
        }
    }

    pub fn focused(&self) -> Vec<FieldId> {
        FieldId::ALL
            .into_iter()
            .filter(|id| self.get(*id).focused)
            .collect()
    }

    /// Connection settings as entered. Only the fields the engine uses are
    /// read, and an empty port falls back to the engine default.
    pub fn connection_config(&self, db_type: DatabaseType) -> DatabaseConfig {
        let profile = db_type.profile();
        let mut config = DatabaseConfig::new(db_type);
        for field in profile.fields() {
            let value = self.value(FieldId::from(*field)).to_string();
            match field {
                ConnectionField::Host => config.host = value,
                ConnectionField::Port => config.port = value,
                ConnectionField::User => config.user = value,
                ConnectionField::Password => config.password = value,
                ConnectionField::Database if db_type == DatabaseType::Sqlite => {
                    config.file_path = value
                }
                ConnectionField::Database => config.database = value,
            }
        }
        if config.port.is_empty() {
            if let Some(port) = profile.default_port() {
                config.port = port.to_string();
            }
        }
        config
    }
}

impl Default for FormFields {
    fn default() -> Self {
        Self::new()
    }
}
