use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::fields::FieldId;
use super::{WizardState, WizardStep, WizardTransition};
use crate::theme::Theme;
use crate::widgets::input::InputAction;

const FIELD_HEIGHT: u16 = 3;

pub fn render(state: &WizardState, frame: &mut Frame, area: Rect, theme: &Theme) {
    let is_target = state.step == WizardStep::TargetConnection;
    let (connection, options): (Vec<FieldId>, Vec<FieldId>) = state
        .visible_fields()
        .into_iter()
        .partition(|id| id.connection().is_some());

    let rows = connection.len().max(options.len()) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // 0: title
            Constraint::Length(1),               // 1: subtitle
            Constraint::Min(rows * FIELD_HEIGHT), // 2: fields
            Constraint::Length(3),               // 3: next
            Constraint::Length(2),               // 4: errors
            Constraint::Length(2),               // 5: help
        ])
        .split(area);

    let heading = if is_target {
        "Configure Target "
    } else {
        "Configure "
    };
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" Step {}/{}: {heading}", state.step.number(), state.total_steps()),
            theme.title,
        ),
        Span::styled(
            state.db_type.as_str().to_uppercase(),
            theme.database_style(state.db_type),
        ),
        Span::styled(" Connection", theme.title),
    ]))
    .block(Block::default().borders(Borders::NONE));
    frame.render_widget(title, chunks[0]);

    let subtitle = if is_target {
        " Where the dump is imported. Same engine as the source."
    } else {
        " Source connection and dump options"
    };
    frame.render_widget(Paragraph::new(subtitle).style(theme.dim), chunks[1]);

    let columns = if options.is_empty() {
        vec![chunks[2]]
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2])
            .to_vec()
    };
    render_column(state, &connection, columns[0], frame.buffer_mut(), theme);
    if let Some(area) = columns.get(1) {
        render_column(state, &options, *area, frame.buffer_mut(), theme);
    }

    render_next_button(state.on_next(), chunks[3], frame, theme);

    let message = if !state.errors.is_empty() {
        let text = state
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Some(format!(" {text}"))
    } else {
        state.notice.as_ref().map(|n| format!(" Error: {n}"))
    };
    if let Some(message) = message {
        let errors = Paragraph::new(message)
            .style(theme.error)
            .wrap(Wrap { trim: true });
        frame.render_widget(errors, chunks[4]);
    }

    let help = if is_target || state.pending_mode.is_some() {
        " [Tab/Down] Next field  [Shift+Tab/Up] Previous  [Enter] Continue  [Esc] Back  [Ctrl+C] Quit"
    } else {
        " [Tab/Down] Next field  [Shift+Tab/Up] Previous  [Enter] Continue  [Ctrl+C] Quit"
    };
    frame.render_widget(Paragraph::new(help).style(theme.dim), chunks[5]);
}

fn render_column(
    state: &WizardState,
    ids: &[FieldId],
    area: Rect,
    buf: &mut Buffer,
    theme: &Theme,
) {
    let mut constraints: Vec<Constraint> = ids
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let fields = state.active_fields();
    for (id, slot) in ids.iter().zip(slots.iter()) {
        fields
            .get(*id)
            .render(*slot, buf, theme, state.is_invalid(*id));
    }
}

fn render_next_button(focused: bool, area: Rect, frame: &mut Frame, theme: &Theme) {
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(area);

    let button = Paragraph::new("Next")
        .alignment(Alignment::Center)
        .style(if focused { theme.selected } else { theme.dim })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border(focused, false)),
        );
    frame.render_widget(button, row[1]);
}

pub fn handle_key(state: &mut WizardState, key: KeyEvent) -> WizardTransition {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            state.focus_next();
            WizardTransition::Stay
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus_prev();
            WizardTransition::Stay
        }
        KeyCode::Enter if state.on_next() => state.submit(),
        _ => {
            // Route to the focused input
            let Some(id) = state.focused_field() else {
                return WizardTransition::Stay;
            };
            match state.active_fields_mut().get_mut(id).handle_key(key) {
                InputAction::Submit => state.focus_next(),
                InputAction::Changed => state.clear_error(id),
                InputAction::None => {}
            }
            WizardTransition::Stay
        }
    }
}
