use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use reltrace_core::dump::DumpMode;

use super::fields::FieldId;
use super::{WizardState, WizardTransition};
use crate::theme::Theme;

pub fn render(state: &WizardState, frame: &mut Frame, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(DumpMode::ALL.len() as u16 + 2),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    let title = Paragraph::new(format!(
        " Step {}/{}: Select Export Mode",
        state.step.number(),
        state.total_steps()
    ))
    .style(theme.title)
    .block(Block::default().borders(Borders::NONE));
    frame.render_widget(title, chunks[0]);

    let subtitle = Paragraph::new(" Choose which rows go into the dump").style(theme.dim);
    frame.render_widget(subtitle, chunks[1]);

    let lines: Vec<Line> = DumpMode::ALL
        .iter()
        .map(|mode| {
            let style = if *mode == state.mode {
                theme.selected
            } else {
                theme.normal
            };
            Line::from(vec![
                Span::styled(format!(" {}. {}", mode.ordinal(), mode.title()), style),
                Span::styled(format!(" - {}", mode.description()), theme.dim),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Export Mode ")
        .borders(Borders::ALL)
        .border_style(theme.focused_border);
    frame.render_widget(Paragraph::new(lines).block(block), chunks[2]);

    // Root record entered on the connection step, if any.
    let root_table = state.fields.value(FieldId::RootTable);
    let root_key = state.fields.value(FieldId::RootPrimaryKey);
    let root = if root_table.is_empty() && root_key.is_empty() {
        Line::from(Span::styled(
            " No root record entered; modes 3 and 4 will ask for one",
            theme.dim,
        ))
    } else {
        Line::from(vec![
            Span::styled(" Root record: ", theme.dim),
            Span::styled(format!("{root_table} = {root_key}"), theme.info),
        ])
    };
    frame.render_widget(Paragraph::new(root), chunks[3]);

    let help = Paragraph::new(
        " [1-4] Select mode  [Enter] Keep highlighted  [Backspace/Esc] Back  [Ctrl+C] Quit",
    )
    .style(theme.dim);
    frame.render_widget(help, chunks[5]);
}

pub fn handle_key(state: &mut WizardState, key: KeyEvent) -> WizardTransition {
    match key.code {
        KeyCode::Char(c) => match c.to_digit(10).and_then(DumpMode::from_ordinal) {
            Some(mode) => state.select_mode(mode),
            None => WizardTransition::Stay,
        },
        KeyCode::Enter => state.select_mode(state.mode),
        _ => WizardTransition::Stay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::WizardStep;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use reltrace_core::config::OutputConfig;
    use reltrace_core::database::DatabaseType;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn at_mode_step() -> WizardState {
        let mut state = WizardState::new(DatabaseType::Sqlite, OutputConfig::default());
        state.fields.database.set_content("./db.sqlite");
        state.step = WizardStep::ModeSelect;
        state
    }

    #[test]
    fn lists_all_modes_with_descriptions() {
        let state = at_mode_step();
        let mut terminal = Terminal::new(TestBackend::new(110, 20)).unwrap();
        terminal
            .draw(|frame| render(&state, frame, frame.area(), &Theme::default()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Step 2/3: Select Export Mode"));
        for mode in DumpMode::ALL {
            assert!(text.contains(&format!("{}. {}", mode.ordinal(), mode.title())));
        }
        assert!(text.contains("No root record entered"));
    }

    #[test]
    fn digit_selects_mode() {
        let mut state = at_mode_step();
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('1'))),
            WizardTransition::Next(WizardStep::TargetSelect)
        );
        assert_eq!(state.mode, DumpMode::StructureOnly);
    }

    #[test]
    fn enter_keeps_highlighted_mode() {
        let mut state = at_mode_step();
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Enter)),
            WizardTransition::Next(WizardStep::TargetSelect)
        );
        assert_eq!(state.mode, DumpMode::StructureAndData);
    }

    #[test]
    fn letters_are_ignored() {
        let mut state = at_mode_step();
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('x'))),
            WizardTransition::Stay
        );
        assert_eq!(state.step, WizardStep::ModeSelect);
    }
}
