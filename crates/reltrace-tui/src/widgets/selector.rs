use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::theme::Theme;

#[derive(Debug, Clone)]
pub struct SelectorItem {
    pub label: String,
    pub description: String,
    pub hint: Option<String>,
}

/// Cursor over a fixed list of choices. The cursor wraps at both ends and
/// always points at an existing item.
#[derive(Debug, Clone)]
pub struct Selector {
    pub items: Vec<SelectorItem>,
    pub state: ListState,
    pub label: String,
}

impl Selector {
    pub fn new(label: &str, items: Vec<SelectorItem>) -> Self {
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            items,
            state,
            label: label.to_string(),
        }
    }

    pub fn selected_index(&self) -> usize {
        self.state.selected().unwrap_or(0)
    }

    pub fn move_up(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let i = self.selected_index();
        let next = if i == 0 { len - 1 } else { i - 1 };
        self.state.select(Some(next));
    }

    pub fn move_down(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let next = (self.selected_index() + 1) % len;
        self.state.select(Some(next));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SelectorAction {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_up();
                SelectorAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_down();
                SelectorAction::None
            }
            KeyCode::Enter if !self.items.is_empty() => {
                SelectorAction::Selected(self.selected_index())
            }
            _ => SelectorAction::None,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let selected = self.selected_index() == i;
                let prefix = if selected { ">" } else { " " };
                let hint = item
                    .hint
                    .as_ref()
                    .map(|h| format!(" ({h})"))
                    .unwrap_or_default();
                let line = Line::from(vec![
                    Span::styled(
                        format!("{prefix} {}", item.label),
                        if selected { theme.selected } else { theme.normal },
                    ),
                    Span::styled(hint, theme.dim),
                ]);
                ListItem::new(vec![
                    line,
                    Line::from(Span::styled(
                        format!("    {}", item.description),
                        theme.dim,
                    )),
                ])
            })
            .collect();

        let block = Block::default()
            .title(self.label.as_str())
            .borders(Borders::ALL)
            .border_style(theme.focused_border);

        // Rendering must not move the cursor, so draw from a copy of the state.
        let mut state = self.state.clone();
        let list = List::new(items).block(block);
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorAction {
    None,
    Selected(usize),
}
