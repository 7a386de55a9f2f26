pub mod connection;
pub mod fields;
pub mod mode;
pub mod target;
pub mod validation;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;

use reltrace_core::config::OutputConfig;
use reltrace_core::database::{ConnectionProfile, DatabaseType};
use reltrace_core::dump::{DumpConfig, DumpMode, DumpTarget};

use crate::theme::Theme;
use fields::{FieldId, FormFields};
use validation::{connection_errors, root_errors, FieldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Connection,
    ModeSelect,
    TargetSelect,
    /// Second connection, only reached when exporting to a database.
    TargetConnection,
}

impl WizardStep {
    pub fn number(&self) -> usize {
        match self {
            Self::Connection => 1,
            Self::ModeSelect => 2,
            Self::TargetSelect => 3,
            Self::TargetConnection => 4,
        }
    }

    /// Steps where the user types into fields.
    pub fn is_entry(&self) -> bool {
        matches!(self, Self::Connection | Self::TargetConnection)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardTransition {
    Stay,
    Next(WizardStep),
    Back(WizardStep),
    /// Validation failed; the step and focus are unchanged.
    Blocked,
    Completed(Box<DumpConfig>),
}

pub struct WizardState {
    pub step: WizardStep,
    pub db_type: DatabaseType,
    pub mode: DumpMode,
    pub target: DumpTarget,
    pub fields: FormFields,
    pub focus_index: usize,
    pub target_fields: FormFields,
    pub target_focus_index: usize,
    /// Fields flagged by the last blocked transition.
    pub errors: Vec<FieldError>,
    pub notice: Option<String>,
    /// Root-filtered mode picked before its root record was entered. It
    /// becomes `mode` once the connection step is submitted with the root.
    pub pending_mode: Option<DumpMode>,
    output: OutputConfig,
}

impl WizardState {
    pub fn new(db_type: DatabaseType, output: OutputConfig) -> Self {
        let mut state = Self {
            step: WizardStep::Connection,
            db_type,
            mode: DumpMode::default(),
            target: DumpTarget::default(),
            fields: FormFields::new(),
            focus_index: 0,
            target_fields: FormFields::new(),
            target_focus_index: 0,
            errors: Vec::new(),
            notice: None,
            pending_mode: None,
            output,
        };
        state.set_database_type(db_type);
        state
    }

    pub fn profile(&self) -> &'static dyn ConnectionProfile {
        self.db_type.profile()
    }

    /// Switch engines: relabel the inputs and recompute which are shown.
    /// Values already typed are kept.
    pub fn set_database_type(&mut self, db_type: DatabaseType) {
        self.db_type = db_type;
        let profile = db_type.profile();
        self.fields.apply_profile(profile);
        self.target_fields.apply_profile(profile);

        let suggested = self.output.suggested_path(db_type, Local::now());
        self.fields
            .output_path
            .set_placeholder(&format!("Output Path (optional, default: {suggested})"));

        self.errors.clear();
        self.notice = None;
        let max = self.visible_fields().len();
        if self.focus_index() > max {
            self.set_focus_index(max);
        }
        self.sync_focus();
    }

    /// Inputs shown on `step`, in focus order. Choice steps show none.
    pub fn fields_for(&self, step: WizardStep) -> Vec<FieldId> {
        let connection = self.profile().fields().iter().map(|f| FieldId::from(*f));
        match step {
            WizardStep::Connection => connection.chain(FieldId::DUMP_OPTIONS).collect(),
            WizardStep::TargetConnection => connection.collect(),
            WizardStep::ModeSelect | WizardStep::TargetSelect => Vec::new(),
        }
    }

    pub fn visible_fields(&self) -> Vec<FieldId> {
        self.fields_for(self.step)
    }

    pub fn active_fields(&self) -> &FormFields {
        match self.step {
            WizardStep::TargetConnection => &self.target_fields,
            _ => &self.fields,
        }
    }

    pub fn active_fields_mut(&mut self) -> &mut FormFields {
        match self.step {
            WizardStep::TargetConnection => &mut self.target_fields,
            _ => &mut self.fields,
        }
    }

    pub fn focus_index(&self) -> usize {
        match self.step {
            WizardStep::TargetConnection => self.target_focus_index,
            _ => self.focus_index,
        }
    }

    fn set_focus_index(&mut self, index: usize) {
        match self.step {
            WizardStep::TargetConnection => self.target_focus_index = index,
            _ => self.focus_index = index,
        }
    }

    /// The focused input, or `None` when focus is on the Next action.
    pub fn focused_field(&self) -> Option<FieldId> {
        self.visible_fields().get(self.focus_index()).copied()
    }

    pub fn on_next(&self) -> bool {
        self.step.is_entry() && self.focus_index() == self.visible_fields().len()
    }

    fn sync_focus(&mut self) {
        let target = self.focused_field();
        self.active_fields_mut().set_focus(target);
    }

    /// Put focus on the first visible input of the current step.
    pub fn focus(&mut self) {
        self.set_focus_index(0);
        self.sync_focus();
    }

    pub fn focus_field(&mut self, id: FieldId) {
        if let Some(pos) = self.visible_fields().iter().position(|f| *f == id) {
            self.set_focus_index(pos);
            self.sync_focus();
        }
    }

    pub fn focus_next(&mut self) {
        let last = self.visible_fields().len();
        let i = self.focus_index();
        self.set_focus_index(if i >= last { 0 } else { i + 1 });
        self.sync_focus();
    }

    pub fn focus_prev(&mut self) {
        let last = self.visible_fields().len();
        let i = self.focus_index();
        self.set_focus_index(if i == 0 { last } else { i - 1 });
        self.sync_focus();
    }

    pub fn is_invalid(&self, id: FieldId) -> bool {
        self.errors.iter().any(|e| e.field == id)
    }

    pub fn clear_error(&mut self, id: FieldId) {
        self.errors.retain(|e| e.field != id);
    }

    pub fn total_steps(&self) -> usize {
        match self.target {
            DumpTarget::ToDatabase => 4,
            DumpTarget::ToFile => 3,
        }
    }

    pub fn back(&mut self) -> WizardTransition {
        let previous = match self.step {
            // Back out of a pending root-filtered mode to choose another one.
            WizardStep::Connection if self.pending_mode.is_some() => WizardStep::ModeSelect,
            WizardStep::Connection => return WizardTransition::Stay,
            WizardStep::ModeSelect => WizardStep::Connection,
            WizardStep::TargetSelect => WizardStep::ModeSelect,
            WizardStep::TargetConnection => WizardStep::TargetSelect,
        };
        tracing::debug!(from = ?self.step, to = ?previous, "Wizard step back");
        self.errors.clear();
        self.notice = None;
        self.pending_mode = None;
        self.step = previous;
        if previous.is_entry() {
            self.sync_focus();
        }
        WizardTransition::Back(previous)
    }

    /// Leave the current entry step if its inputs pass validation.
    pub fn submit(&mut self) -> WizardTransition {
        match self.step {
            WizardStep::Connection => self.submit_connection(),
            WizardStep::TargetConnection => self.submit_target_connection(),
            _ => WizardTransition::Stay,
        }
    }

    fn submit_connection(&mut self) -> WizardTransition {
        let mode = self.pending_mode.unwrap_or(self.mode);
        let mut errors = connection_errors(&self.fields, self.profile());
        errors.extend(root_errors(&self.fields, mode));
        if !errors.is_empty() {
            return self.block(errors);
        }
        self.errors.clear();
        self.notice = None;
        self.pending_mode = None;
        self.mode = mode;
        self.step = WizardStep::ModeSelect;
        tracing::debug!(db_type = %self.db_type, "Connection step accepted");
        WizardTransition::Next(WizardStep::ModeSelect)
    }

    fn submit_target_connection(&mut self) -> WizardTransition {
        let errors = connection_errors(&self.target_fields, self.profile());
        if !errors.is_empty() {
            return self.block(errors);
        }
        self.errors.clear();
        self.complete()
    }

    fn block(&mut self, errors: Vec<FieldError>) -> WizardTransition {
        tracing::debug!(
            step = ?self.step,
            fields = ?errors.iter().map(|e| e.field).collect::<Vec<_>>(),
            "Wizard transition blocked"
        );
        self.errors = errors;
        WizardTransition::Blocked
    }

    /// Store the mode. A root-filtered mode with an incomplete root pair
    /// sends the user back to fill it in; the stored mode is left as it was
    /// until that step is submitted.
    pub fn select_mode(&mut self, mode: DumpMode) -> WizardTransition {
        if self.step != WizardStep::ModeSelect {
            return WizardTransition::Stay;
        }
        let missing = root_errors(&self.fields, mode);
        if let Some(first) = missing.first().map(|e| e.field) {
            tracing::debug!(%mode, "Root record missing, returning to connection step");
            self.pending_mode = Some(mode);
            self.step = WizardStep::Connection;
            self.errors = missing;
            self.focus_field(first);
            return WizardTransition::Back(WizardStep::Connection);
        }
        self.mode = mode;
        self.step = WizardStep::TargetSelect;
        WizardTransition::Next(WizardStep::TargetSelect)
    }

    pub fn select_target(&mut self, target: DumpTarget) -> WizardTransition {
        if self.step != WizardStep::TargetSelect {
            return WizardTransition::Stay;
        }
        self.target = target;
        match target {
            DumpTarget::ToFile => self.complete(),
            DumpTarget::ToDatabase => {
                self.step = WizardStep::TargetConnection;
                self.errors.clear();
                self.sync_focus();
                WizardTransition::Next(WizardStep::TargetConnection)
            }
        }
    }

    fn complete(&mut self) -> WizardTransition {
        let config = self.build_config();
        if let Err(e) = config.validate() {
            tracing::warn!("Wizard produced an invalid dump config: {e}");
            self.notice = Some(e.to_string());
            return WizardTransition::Blocked;
        }
        tracing::info!(
            db_type = %self.db_type,
            mode = %self.mode,
            target = %self.target,
            "Dump configuration completed"
        );
        WizardTransition::Completed(Box::new(config))
    }

    /// The dump configuration described by the current inputs.
    pub fn build_config(&self) -> DumpConfig {
        let mut config = DumpConfig::new(
            self.fields.connection_config(self.db_type),
            self.mode,
            self.target,
        );
        config.output_path = self.fields.value(FieldId::OutputPath).to_string();
        if self.mode.requires_root() {
            config.root_table = Some(self.fields.value(FieldId::RootTable).to_string());
            config.root_primary_key = Some(self.fields.value(FieldId::RootPrimaryKey).to_string());
        }
        if self.target == DumpTarget::ToDatabase {
            config.target_config = Some(self.target_fields.connection_config(self.db_type));
        }
        config
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> WizardTransition {
        match key.code {
            KeyCode::Esc => return self.back(),
            KeyCode::Backspace if !self.step.is_entry() => return self.back(),
            _ => {}
        }

        match self.step {
            WizardStep::Connection | WizardStep::TargetConnection => {
                connection::handle_key(self, key)
            }
            WizardStep::ModeSelect => mode::handle_key(self, key),
            WizardStep::TargetSelect => target::handle_key(self, key),
        }
    }
}

pub fn render(state: &WizardState, frame: &mut Frame, area: Rect, theme: &Theme) {
    match state.step {
        WizardStep::Connection | WizardStep::TargetConnection => {
            connection::render(state, frame, area, theme)
        }
        WizardStep::ModeSelect => mode::render(state, frame, area, theme),
        WizardStep::TargetSelect => target::render(state, frame, area, theme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_str(state: &mut WizardState, s: &str) {
        for c in s.chars() {
            state.handle_key(press(KeyCode::Char(c)));
        }
    }

    fn wizard(db_type: DatabaseType) -> WizardState {
        let mut state = WizardState::new(db_type, OutputConfig::default());
        state.focus();
        state
    }

    fn fill(state: &mut WizardState, id: FieldId, value: &str) {
        state.focus_field(id);
        type_str(state, value);
    }

    fn go_to_next_action(state: &mut WizardState) {
        while !state.on_next() {
            state.handle_key(press(KeyCode::Tab));
        }
    }

    fn mysql_ready() -> WizardState {
        let mut state = wizard(DatabaseType::MySql);
        fill(&mut state, FieldId::Host, "localhost");
        fill(&mut state, FieldId::User, "root");
        fill(&mut state, FieldId::Database, "shop");
        state
    }

    fn assert_single_focus(state: &WizardState) {
        let focused = state.active_fields().focused();
        match state.focused_field() {
            Some(id) => assert_eq!(focused, vec![id]),
            None => assert!(focused.is_empty(), "Next focused but inputs {focused:?} are too"),
        }
    }

    #[test]
    fn sqlite_hides_server_fields() {
        let state = wizard(DatabaseType::Sqlite);
        assert_eq!(
            state.visible_fields(),
            vec![
                FieldId::Database,
                FieldId::RootTable,
                FieldId::RootPrimaryKey,
                FieldId::OutputPath
            ]
        );
    }

    #[test]
    fn server_engines_show_all_fields() {
        for db_type in [DatabaseType::MySql, DatabaseType::PostgreSql] {
            let state = wizard(db_type);
            assert_eq!(state.visible_fields(), FieldId::ALL.to_vec());
        }
    }

    #[test]
    fn focus_starts_on_first_visible_field() {
        let state = wizard(DatabaseType::Sqlite);
        assert_eq!(state.focused_field(), Some(FieldId::Database));
        assert_single_focus(&state);
    }

    #[test]
    fn tab_cycles_through_fields_and_next() {
        let mut state = wizard(DatabaseType::Sqlite);
        let count = state.visible_fields().len();
        for _ in 0..count {
            state.handle_key(press(KeyCode::Tab));
            assert_single_focus(&state);
        }
        assert!(state.on_next());
        state.handle_key(press(KeyCode::Tab));
        assert_eq!(state.focus_index(), 0);
        state.handle_key(press(KeyCode::BackTab));
        assert!(state.on_next());
        state.handle_key(press(KeyCode::Up));
        assert_eq!(state.focused_field(), Some(FieldId::OutputPath));
        assert_single_focus(&state);
    }

    #[test]
    fn typing_goes_to_focused_field_only() {
        let mut state = wizard(DatabaseType::PostgreSql);
        type_str(&mut state, "db.local");
        state.handle_key(press(KeyCode::Down));
        type_str(&mut state, "6543");
        assert_eq!(state.fields.host.value(), "db.local");
        assert_eq!(state.fields.port.value(), "6543");
        assert!(state.fields.user.value().is_empty());
    }

    #[test]
    fn enter_on_field_moves_focus_without_submitting() {
        let mut state = mysql_ready();
        state.focus();
        assert_eq!(state.handle_key(press(KeyCode::Enter)), WizardTransition::Stay);
        assert_eq!(state.step, WizardStep::Connection);
        assert_eq!(state.focused_field(), Some(FieldId::Port));
    }

    #[test]
    fn empty_form_blocks_and_flags_fields() {
        let mut state = wizard(DatabaseType::MySql);
        go_to_next_action(&mut state);
        let index = state.focus_index();

        assert_eq!(state.handle_key(press(KeyCode::Enter)), WizardTransition::Blocked);
        assert_eq!(state.step, WizardStep::Connection);
        assert_eq!(state.focus_index(), index);
        assert!(state.is_invalid(FieldId::Host));
        assert!(state.is_invalid(FieldId::User));
        assert!(state.is_invalid(FieldId::Database));
        assert!(!state.is_invalid(FieldId::Port));
    }

    #[test]
    fn editing_a_flagged_field_clears_its_flag() {
        let mut state = wizard(DatabaseType::Sqlite);
        go_to_next_action(&mut state);
        state.handle_key(press(KeyCode::Enter));
        assert!(state.is_invalid(FieldId::Database));

        state.focus_field(FieldId::Database);
        type_str(&mut state, "x");
        assert!(!state.is_invalid(FieldId::Database));
    }

    #[test]
    fn back_on_first_step_is_a_no_op() {
        let mut state = mysql_ready();
        let index = state.focus_index();
        assert_eq!(state.handle_key(press(KeyCode::Esc)), WizardTransition::Stay);
        assert_eq!(state.step, WizardStep::Connection);
        assert_eq!(state.focus_index(), index);
    }

    #[test]
    fn backspace_on_connection_step_edits() {
        let mut state = wizard(DatabaseType::Sqlite);
        type_str(&mut state, "./db.sqlitee");
        state.handle_key(press(KeyCode::Backspace));
        assert_eq!(state.step, WizardStep::Connection);
        assert_eq!(state.fields.database.value(), "./db.sqlite");
    }

    #[test]
    fn digits_are_typed_on_connection_step() {
        let mut state = wizard(DatabaseType::MySql);
        state.focus_field(FieldId::Port);
        type_str(&mut state, "3307");
        assert_eq!(state.step, WizardStep::Connection);
        assert_eq!(state.fields.port.value(), "3307");
    }

    #[test]
    fn structure_only_never_needs_root() {
        let mut state = mysql_ready();
        go_to_next_action(&mut state);
        assert_eq!(
            state.handle_key(press(KeyCode::Enter)),
            WizardTransition::Next(WizardStep::ModeSelect)
        );
        assert_eq!(
            state.handle_key(press(KeyCode::Char('1'))),
            WizardTransition::Next(WizardStep::TargetSelect)
        );
        state.handle_key(press(KeyCode::Esc));
        state.handle_key(press(KeyCode::Esc));
        assert_eq!(state.step, WizardStep::Connection);
        assert_eq!(
            state.handle_key(press(KeyCode::Enter)),
            WizardTransition::Next(WizardStep::ModeSelect)
        );
    }

    #[test]
    fn root_mode_with_empty_root_returns_to_connection() {
        let mut state = mysql_ready();
        go_to_next_action(&mut state);
        state.handle_key(press(KeyCode::Enter));

        assert_eq!(
            state.handle_key(press(KeyCode::Char('3'))),
            WizardTransition::Back(WizardStep::Connection)
        );
        assert_eq!(state.mode, DumpMode::StructureAndData);
        assert_eq!(state.pending_mode, Some(DumpMode::StructureAndDataExcluding));
        assert_eq!(state.focused_field(), Some(FieldId::RootTable));
        assert!(state.is_invalid(FieldId::RootTable));
        assert!(state.is_invalid(FieldId::RootPrimaryKey));
        assert_single_focus(&state);

        // With the mode known, submitting the step still requires both values.
        type_str(&mut state, "customers");
        go_to_next_action(&mut state);
        assert_eq!(state.handle_key(press(KeyCode::Enter)), WizardTransition::Blocked);
        assert!(state.is_invalid(FieldId::RootPrimaryKey));

        fill(&mut state, FieldId::RootPrimaryKey, "42");
        go_to_next_action(&mut state);
        assert_eq!(
            state.handle_key(press(KeyCode::Enter)),
            WizardTransition::Next(WizardStep::ModeSelect)
        );
        assert_eq!(state.mode, DumpMode::StructureAndDataExcluding);
        assert!(state.pending_mode.is_none());
        assert_eq!(
            state.handle_key(press(KeyCode::Enter)),
            WizardTransition::Next(WizardStep::TargetSelect)
        );
    }

    #[test]
    fn wrong_root_mode_can_be_changed_without_a_root() {
        let mut state = mysql_ready();
        go_to_next_action(&mut state);
        state.handle_key(press(KeyCode::Enter));
        assert_eq!(
            state.handle_key(press(KeyCode::Char('3'))),
            WizardTransition::Back(WizardStep::Connection)
        );

        assert_eq!(
            state.handle_key(press(KeyCode::Esc)),
            WizardTransition::Back(WizardStep::ModeSelect)
        );
        assert!(state.pending_mode.is_none());
        assert!(state.errors.is_empty());
        assert_eq!(state.mode, DumpMode::StructureAndData);

        assert_eq!(
            state.handle_key(press(KeyCode::Char('2'))),
            WizardTransition::Next(WizardStep::TargetSelect)
        );
        let WizardTransition::Completed(config) = state.handle_key(press(KeyCode::Char('1')))
        else {
            panic!("expected completion");
        };
        assert_eq!(config.mode, DumpMode::StructureAndData);
        assert!(config.root_table.is_none());
    }

    #[test]
    fn back_after_a_pending_mode_is_cleared_is_a_no_op_again() {
        let mut state = mysql_ready();
        go_to_next_action(&mut state);
        state.handle_key(press(KeyCode::Enter));
        state.handle_key(press(KeyCode::Char('4')));
        state.handle_key(press(KeyCode::Esc));
        state.handle_key(press(KeyCode::Esc));
        assert_eq!(state.step, WizardStep::Connection);
        assert_eq!(state.handle_key(press(KeyCode::Esc)), WizardTransition::Stay);
    }

    #[test]
    fn back_and_forward_keeps_values_focus_and_mode() {
        let mut state = mysql_ready();
        go_to_next_action(&mut state);
        state.handle_key(press(KeyCode::Enter));
        state.handle_key(press(KeyCode::Char('1')));
        state.handle_key(press(KeyCode::Backspace));
        assert_eq!(state.step, WizardStep::ModeSelect);

        let values: Vec<String> = FieldId::ALL
            .iter()
            .map(|id| state.fields.value(*id).to_string())
            .collect();
        let focus = state.focus_index;
        let mode = state.mode;

        assert_eq!(
            state.handle_key(press(KeyCode::Backspace)),
            WizardTransition::Back(WizardStep::Connection)
        );
        assert_single_focus(&state);
        assert_eq!(
            state.handle_key(press(KeyCode::Enter)),
            WizardTransition::Next(WizardStep::ModeSelect)
        );

        let after: Vec<String> = FieldId::ALL
            .iter()
            .map(|id| state.fields.value(*id).to_string())
            .collect();
        assert_eq!(after, values);
        assert_eq!(state.focus_index, focus);
        assert_eq!(state.mode, mode);
    }

    #[test]
    fn out_of_range_digits_are_ignored() {
        let mut state = mysql_ready();
        go_to_next_action(&mut state);
        state.handle_key(press(KeyCode::Enter));
        assert_eq!(state.handle_key(press(KeyCode::Char('5'))), WizardTransition::Stay);
        assert_eq!(state.handle_key(press(KeyCode::Char('0'))), WizardTransition::Stay);
        assert_eq!(state.step, WizardStep::ModeSelect);

        state.handle_key(press(KeyCode::Char('2')));
        assert_eq!(state.handle_key(press(KeyCode::Char('3'))), WizardTransition::Stay);
        assert_eq!(state.step, WizardStep::TargetSelect);
    }

    #[test]
    fn file_target_completes_with_default_port() {
        let mut state = mysql_ready();
        go_to_next_action(&mut state);
        state.handle_key(press(KeyCode::Enter));
        state.handle_key(press(KeyCode::Char('2')));

        let WizardTransition::Completed(config) = state.handle_key(press(KeyCode::Char('1')))
        else {
            panic!("expected completion");
        };
        assert_eq!(config.source_config.port, "3306");
        assert_eq!(config.source_config.host, "localhost");
        assert_eq!(config.source_config.user, "root");
        assert_eq!(config.source_config.database, "shop");
        assert_eq!(config.mode, DumpMode::StructureAndData);
        assert_eq!(config.target, DumpTarget::ToFile);
        assert!(config.root_table.is_none());
        assert!(config.target_config.is_none());
    }

    #[test]
    fn database_target_collects_second_connection() {
        let mut state = wizard(DatabaseType::PostgreSql);
        fill(&mut state, FieldId::Host, "src");
        fill(&mut state, FieldId::User, "postgres");
        fill(&mut state, FieldId::Database, "app");
        go_to_next_action(&mut state);
        state.handle_key(press(KeyCode::Enter));
        state.handle_key(press(KeyCode::Char('1')));

        assert_eq!(
            state.handle_key(press(KeyCode::Char('2'))),
            WizardTransition::Next(WizardStep::TargetConnection)
        );
        assert_eq!(state.target, DumpTarget::ToDatabase);
        assert_eq!(
            state.visible_fields(),
            vec![
                FieldId::Host,
                FieldId::Port,
                FieldId::User,
                FieldId::Password,
                FieldId::Database
            ]
        );
        assert_eq!(state.focused_field(), Some(FieldId::Host));
        assert_single_focus(&state);

        go_to_next_action(&mut state);
        assert_eq!(state.handle_key(press(KeyCode::Enter)), WizardTransition::Blocked);

        fill(&mut state, FieldId::Host, "dst");
        fill(&mut state, FieldId::User, "restore");
        fill(&mut state, FieldId::Database, "app_copy");
        go_to_next_action(&mut state);
        let WizardTransition::Completed(config) = state.handle_key(press(KeyCode::Enter)) else {
            panic!("expected completion");
        };
        let target = config.target_config.clone().expect("target config");
        assert_eq!(target.host, "dst");
        assert_eq!(target.port, "5432");
        assert_eq!(target.database, "app_copy");
        assert_eq!(config.source_config.host, "src");
    }

    #[test]
    fn back_from_target_connection_returns_to_target_select() {
        let mut state = mysql_ready();
        go_to_next_action(&mut state);
        state.handle_key(press(KeyCode::Enter));
        state.handle_key(press(KeyCode::Char('2')));
        state.handle_key(press(KeyCode::Char('2')));
        assert_eq!(state.step, WizardStep::TargetConnection);

        type_str(&mut state, "replica");
        assert_eq!(
            state.handle_key(press(KeyCode::Esc)),
            WizardTransition::Back(WizardStep::TargetSelect)
        );
        assert_eq!(state.target_fields.host.value(), "replica");
        assert_eq!(state.fields.host.value(), "localhost");
    }

    #[test]
    fn selection_outside_its_step_is_ignored() {
        let mut state = mysql_ready();
        assert_eq!(
            state.select_mode(DumpMode::StructureOnly),
            WizardTransition::Stay
        );
        assert_eq!(state.select_target(DumpTarget::ToFile), WizardTransition::Stay);
        assert_eq!(state.step, WizardStep::Connection);
    }

    #[test]
    fn set_database_type_keeps_values_and_relabels() {
        let mut state = wizard(DatabaseType::MySql);
        fill(&mut state, FieldId::Database, "shop");
        state.focus_field(FieldId::OutputPath);

        state.set_database_type(DatabaseType::Sqlite);
        assert_eq!(state.fields.database.value(), "shop");
        assert_eq!(state.fields.database.label, "File Path");
        assert!(state.focus_index() <= state.visible_fields().len());
        assert_single_focus(&state);
        assert!(state
            .fields
            .output_path
            .placeholder
            .starts_with("Output Path (optional, default: ./sqlite3_"));
    }
}
