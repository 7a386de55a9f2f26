use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

pub const DEFAULT_CHAR_LIMIT: usize = 255;

const MASK_CHAR: char = '•';

/// Single-line text field. `cursor_pos` counts characters, not bytes.
#[derive(Debug, Clone)]
pub struct TextInput {
    pub content: String,
    pub cursor_pos: usize,
    pub label: String,
    pub placeholder: String,
    pub focused: bool,
    pub masked: bool,
    pub char_limit: usize,
}

impl TextInput {
    pub fn new(label: &str) -> Self {
        Self {
            content: String::new(),
            cursor_pos: 0,
            label: label.to_string(),
            placeholder: String::new(),
            focused: false,
            masked: false,
            char_limit: DEFAULT_CHAR_LIMIT,
        }
    }

    pub fn with_masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = limit;
        self
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.set_content(content);
        self
    }

    pub fn set_content(&mut self, content: &str) {
        self.content = content.chars().take(self.char_limit).collect();
        self.cursor_pos = self.content.chars().count();
    }

    pub fn set_placeholder(&mut self, placeholder: &str) {
        self.placeholder = placeholder.to_string();
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Enter => InputAction::Submit,
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::None,
            KeyCode::Char(c) => {
                if self.char_count() >= self.char_limit {
                    return InputAction::None;
                }
                let at = self.byte_index(self.cursor_pos);
                self.content.insert(at, c);
                self.cursor_pos += 1;
                InputAction::Changed
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    self.cursor_pos -= 1;
                    let at = self.byte_index(self.cursor_pos);
                    self.content.remove(at);
                    InputAction::Changed
                } else {
                    InputAction::None
                }
            }
            KeyCode::Delete => {
                if self.cursor_pos < self.char_count() {
                    let at = self.byte_index(self.cursor_pos);
                    self.content.remove(at);
                    InputAction::Changed
                } else {
                    InputAction::None
                }
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                InputAction::None
            }
            KeyCode::Right => {
                if self.cursor_pos < self.char_count() {
                    self.cursor_pos += 1;
                }
                InputAction::None
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                InputAction::None
            }
            KeyCode::End => {
                self.cursor_pos = self.char_count();
                InputAction::None
            }
            _ => InputAction::None,
        }
    }

    /// Text as it appears on screen: masked fields echo one mark per character.
    pub fn display_text(&self) -> String {
        if self.masked {
            MASK_CHAR.to_string().repeat(self.char_count())
        } else {
            self.content.clone()
        }
    }

    fn cursor_column(&self) -> u16 {
        let shown = self.display_text();
        let prefix: String = shown.chars().take(self.cursor_pos).collect();
        prefix.width() as u16
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme, invalid: bool) {
        let title = if invalid {
            format!(" {} (required) ", self.label)
        } else {
            format!(" {} ", self.label)
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(theme.border(self.focused, invalid));

        let paragraph = if self.content.is_empty() {
            Paragraph::new(self.placeholder.as_str()).style(theme.placeholder)
        } else {
            Paragraph::new(self.display_text()).style(theme.normal)
        };
        paragraph.block(block).render(area, buf);

        if self.focused && area.width > 2 && area.height > 2 {
            let cursor_x = area.x + 1 + self.cursor_column().min(area.width.saturating_sub(3));
            let cursor_y = area.y + 1;
            if let Some(cell) = buf.cell_mut(Position::new(cursor_x, cursor_y)) {
                cell.set_style(theme.cursor);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Changed,
    Submit,
}
