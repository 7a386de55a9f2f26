use reltrace_core::database::{validate_port, ConnectionField, ConnectionProfile};
use reltrace_core::dump::DumpMode;

use super::fields::{FieldId, FormFields};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FieldId,
    pub message: String,
}

impl FieldError {
    fn new(field: FieldId, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Problems with the connection inputs for `profile`. Hidden inputs are
/// never inspected.
pub fn connection_errors(fields: &FormFields, profile: &dyn ConnectionProfile) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for field in profile.required_fields() {
        let id = FieldId::from(*field);
        if fields.value(id).trim().is_empty() {
            errors.push(FieldError::new(id, format!("{} is required", id.label(profile))));
        }
    }
    if profile.fields().contains(&ConnectionField::Port) {
        if let Err(e) = validate_port(fields.value(FieldId::Port)) {
            errors.push(FieldError::new(FieldId::Port, e.to_string()));
        }
    }
    errors.sort_by_key(|e| e.field);
    errors
}

/// Root table and key are checked only for modes that filter by a root record.
pub fn root_errors(fields: &FormFields, mode: DumpMode) -> Vec<FieldError> {
    if !mode.requires_root() {
        return Vec::new();
    }
    [FieldId::RootTable, FieldId::RootPrimaryKey]
        .into_iter()
        .filter(|id| fields.value(*id).trim().is_empty())
        .map(|id| FieldError::new(id, format!("{} is required for {}", root_label(id), mode.title())))
        .collect()
}

fn root_label(id: FieldId) -> &'static str {
    match id {
        FieldId::RootTable => "Root table",
        _ => "Root primary key",
    }
}
