use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use reltrace_core::database::DatabaseType;

use crate::theme::Theme;
use crate::widgets::selector::{Selector, SelectorAction, SelectorItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseAction {
    None,
    Selected(DatabaseType),
}

/// First screen: pick the source database engine.
pub struct DatabaseSelector {
    choices: Vec<DatabaseType>,
    selector: Selector,
}

impl DatabaseSelector {
    pub fn new() -> Self {
        let choices = DatabaseType::ALL.to_vec();
        let items = choices
            .iter()
            .map(|db_type| SelectorItem {
                label: db_type.as_str().to_string(),
                description: db_type.description().to_string(),
                hint: db_type
                    .profile()
                    .default_port()
                    .map(|port| format!("default port {port}")),
            })
            .collect();
        Self {
            choices,
            selector: Selector::new(" Database Type ", items),
        }
    }

    pub fn highlighted(&self) -> DatabaseType {
        self.choices[self.selector.selected_index()]
    }

    pub fn move_up(&mut self) {
        self.selector.move_up();
    }

    pub fn move_down(&mut self) {
        self.selector.move_down();
    }

    /// Report the highlighted engine. The cursor is left where it is.
    pub fn confirm(&self) -> DatabaseAction {
        DatabaseAction::Selected(self.highlighted())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DatabaseAction {
        match self.selector.handle_key(key) {
            SelectorAction::Selected(i) => match self.choices.get(i) {
                Some(db_type) => DatabaseAction::Selected(*db_type),
                None => DatabaseAction::None,
            },
            SelectorAction::None => DatabaseAction::None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(2 * self.choices.len() as u16 + 2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(area);

        let title = Paragraph::new(" Reltrace - Multi-Database Recursive Backup")
            .style(theme.title)
            .block(Block::default().borders(Borders::NONE));
        frame.render_widget(title, chunks[0]);

        let subtitle = Paragraph::new(" Select your database type").style(theme.dim);
        frame.render_widget(subtitle, chunks[1]);

        self.selector.render(chunks[2], frame.buffer_mut(), theme);

        let help = Paragraph::new(" [Up/Down or j/k] Navigate  [Enter] Select  [Ctrl+C] Quit")
            .style(theme.dim);
        frame.render_widget(help, chunks[4]);
    }
}

impl Default for DatabaseSelector {
    fn default() -> Self {
        Self::new()
    }
}
