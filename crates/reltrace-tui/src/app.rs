use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use reltrace_core::config::AppConfig;
use reltrace_core::dump::DumpConfig;
use reltrace_core::engine::DumpReport;
use reltrace_core::error::ReltraceResult;

use crate::database::{DatabaseAction, DatabaseSelector};
use crate::event::TuiEvent;
use crate::progress::{self, CompletionState, ProcessingState};
use crate::theme::Theme;
use crate::wizard::{self, WizardState, WizardTransition};

pub enum ViewState {
    DatabaseSelection,
    Configuration(WizardState),
    Processing(ProcessingState),
    Completion(CompletionState),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DatabaseSelection => "database-selection",
            Self::Configuration(_) => "configuration",
            Self::Processing(_) => "processing",
            Self::Completion(_) => "completion",
        }
    }
}

/// What the event loop has to do after an event was applied.
#[derive(Debug, PartialEq)]
pub enum AppCommand {
    None,
    Quit,
    Execute(Box<DumpConfig>),
}

pub struct App {
    pub view: ViewState,
    pub selector: DatabaseSelector,
    pub theme: Theme,
    pub should_quit: bool,
    pub size: Option<(u16, u16)>,
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            view: ViewState::DatabaseSelection,
            selector: DatabaseSelector::new(),
            theme: Theme::from_config(&config.ui),
            should_quit: false,
            size: None,
            config,
        }
    }

    pub fn handle_event(&mut self, event: TuiEvent) -> AppCommand {
        match event {
            TuiEvent::Key(key) => self.handle_key(key),
            TuiEvent::Resize(w, h) => {
                self.size = Some((w, h));
                AppCommand::None
            }
            TuiEvent::Tick => {
                if let ViewState::Processing(state) = &mut self.view {
                    state.spinner.tick();
                }
                AppCommand::None
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> AppCommand {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return self.quit();
        }

        match &mut self.view {
            ViewState::DatabaseSelection => {
                if let DatabaseAction::Selected(db_type) = self.selector.handle_key(key) {
                    tracing::debug!(%db_type, "Database type selected");
                    let mut state = WizardState::new(db_type, self.config.output.clone());
                    state.focus();
                    self.view = ViewState::Configuration(state);
                }
                AppCommand::None
            }
            ViewState::Configuration(state) => match state.handle_key(key) {
                WizardTransition::Completed(config) => {
                    self.view = ViewState::Processing(ProcessingState::new(
                        (*config).clone(),
                        self.config.ui.animate_progress,
                    ));
                    AppCommand::Execute(config)
                }
                _ => AppCommand::None,
            },
            ViewState::Processing(_) => AppCommand::None,
            ViewState::Completion(_) => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => self.quit(),
                _ => AppCommand::None,
            },
        }
    }

    fn quit(&mut self) -> AppCommand {
        tracing::debug!(view = self.view.name(), "Quit requested");
        self.should_quit = true;
        AppCommand::Quit
    }

    /// Record the engine's outcome. Ignored unless a dump is in progress.
    pub fn finish_execution(&mut self, result: ReltraceResult<DumpReport>) {
        let ViewState::Processing(state) = &self.view else {
            return;
        };
        let config = state.config.clone();
        let outcome = result.map_err(|e| e.to_string());
        self.view = ViewState::Completion(CompletionState { config, outcome });
    }

    /// The configuration the engine accepted, once the run has completed.
    pub fn accepted_config(&self) -> Option<&DumpConfig> {
        match &self.view {
            ViewState::Completion(state) if state.succeeded() => Some(&state.config),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match &self.view {
            ViewState::DatabaseSelection => self.selector.render(frame, area, &self.theme),
            ViewState::Configuration(state) => wizard::render(state, frame, area, &self.theme),
            ViewState::Processing(state) => {
                progress::render_processing(state, frame, area, &self.theme)
            }
            ViewState::Completion(state) => {
                progress::render_completion(state, frame, area, &self.theme)
            }
        }
    }
}
