use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use reltrace_core::dump::DumpTarget;

use super::{WizardState, WizardTransition};
use crate::theme::Theme;

pub fn render(state: &WizardState, frame: &mut Frame, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(DumpTarget::ALL.len() as u16 + 2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    let title = Paragraph::new(format!(
        " Step {}/{}: Select Export Target",
        state.step.number(),
        state.total_steps()
    ))
    .style(theme.title)
    .block(Block::default().borders(Borders::NONE));
    frame.render_widget(title, chunks[0]);

    let selected_mode = Line::from(vec![
        Span::styled(" Selected Mode: ", theme.normal),
        Span::styled(state.mode.as_str(), theme.info),
    ]);
    frame.render_widget(Paragraph::new(selected_mode), chunks[1]);

    let lines: Vec<Line> = DumpTarget::ALL
        .iter()
        .map(|target| {
            let style = if *target == state.target {
                theme.selected
            } else {
                theme.normal
            };
            Line::from(vec![
                Span::styled(format!(" {}. {}", target.ordinal(), target.title()), style),
                Span::styled(format!(" - {}", target.description()), theme.dim),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Export Target ")
        .borders(Borders::ALL)
        .border_style(theme.focused_border);
    frame.render_widget(Paragraph::new(lines).block(block), chunks[2]);

    let help = Paragraph::new(
        " [1-2] Select target  [Enter] Keep highlighted  [Backspace/Esc] Back  [Ctrl+C] Quit",
    )
    .style(theme.dim);
    frame.render_widget(help, chunks[4]);
}

pub fn handle_key(state: &mut WizardState, key: KeyEvent) -> WizardTransition {
    match key.code {
        KeyCode::Char(c) => match c.to_digit(10).and_then(DumpTarget::from_ordinal) {
            Some(target) => state.select_target(target),
            None => WizardTransition::Stay,
        },
        KeyCode::Enter => state.select_target(state.target),
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
    use reltrace_core::dump::DumpMode;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn at_target_step() -> WizardState {
        let mut state = WizardState::new(DatabaseType::Sqlite, OutputConfig::default());
        state.fields.database.set_content("./db.sqlite");
        state.mode = DumpMode::StructureOnly;
        state.step = WizardStep::TargetSelect;
        state
    }

    #[test]
    fn shows_selected_mode_and_targets() {
        let state = at_target_step();
        let mut terminal = Terminal::new(TestBackend::new(100, 16)).unwrap();
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
        assert!(text.contains("Step 3/3: Select Export Target"));
        assert!(text.contains("Selected Mode: structure-only"));
        assert!(text.contains("1. "));
        assert!(text.contains("2. "));
    }

    #[test]
    fn file_target_completes() {
        let mut state = at_target_step();
        let WizardTransition::Completed(config) = handle_key(&mut state, press(KeyCode::Char('1')))
        else {
            panic!("expected completion");
        };
        assert_eq!(config.mode, DumpMode::StructureOnly);
        assert_eq!(config.target, DumpTarget::ToFile);
        assert_eq!(config.source_config.file_path, "./db.sqlite");
    }

    #[test]
    fn database_target_moves_to_target_connection() {
        let mut state = at_target_step();
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('2'))),
            WizardTransition::Next(WizardStep::TargetConnection)
        );
        assert_eq!(state.total_steps(), 4);
    }

    #[test]
    fn unknown_digit_is_ignored() {
        let mut state = at_target_step();
        assert_eq!(
            handle_key(&mut state, press(KeyCode::Char('9'))),
            WizardTransition::Stay
        );
        assert_eq!(state.target, DumpTarget::ToFile);
    }
}
