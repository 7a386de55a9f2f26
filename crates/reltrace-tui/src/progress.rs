use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use reltrace_core::dump::{DumpConfig, DumpTarget};
use reltrace_core::engine::DumpReport;

use crate::theme::Theme;
use crate::widgets::spinner::Spinner;

/// The engine is working on a handed-off configuration.
pub struct ProcessingState {
    pub config: DumpConfig,
    pub spinner: Spinner,
}

impl ProcessingState {
    pub fn new(config: DumpConfig, animated: bool) -> Self {
        Self {
            config,
            spinner: Spinner::new(animated),
        }
    }
}

pub struct CompletionState {
    pub config: DumpConfig,
    pub outcome: Result<DumpReport, String>,
}

impl CompletionState {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

fn summary_lines<'a>(config: &DumpConfig, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = vec![
        field_line("Source", config.source_config.describe(), theme),
        field_line("Mode", config.mode.title().to_string(), theme),
        field_line("Target", config.target.title().to_string(), theme),
    ];
    if let (Some(table), Some(key)) = (&config.root_table, &config.root_primary_key) {
        lines.push(field_line("Root", format!("{table} = {key}"), theme));
    }
    match (config.target, &config.target_config) {
        (DumpTarget::ToDatabase, Some(target)) => {
            lines.push(field_line("Import into", target.describe(), theme));
        }
        _ if !config.output_path.is_empty() => {
            lines.push(field_line("Output", config.output_path.clone(), theme));
        }
        _ => {}
    }
    lines
}

fn field_line<'a>(label: &str, value: String, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {label:<12}"), theme.dim),
        Span::styled(value, theme.normal),
    ])
}

pub fn render_processing(state: &ProcessingState, frame: &mut Frame, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    let status = Line::from(vec![
        Span::styled(format!(" {} ", state.spinner.frame()), theme.info),
        Span::styled("Handing off dump configuration...", theme.title),
    ]);
    frame.render_widget(Paragraph::new(status), chunks[0]);

    let block = Block::default()
        .title(" Dump Configuration ")
        .borders(Borders::ALL)
        .border_style(theme.blurred_border);
    frame.render_widget(
        Paragraph::new(summary_lines(&state.config, theme)).block(block),
        chunks[1],
    );

    frame.render_widget(Paragraph::new(" [Ctrl+C] Cancel").style(theme.dim), chunks[2]);
}

pub fn render_completion(state: &CompletionState, frame: &mut Frame, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    let mut lines = summary_lines(&state.config, theme);
    lines.push(Line::raw(""));

    let (heading, style) = match &state.outcome {
        Ok(report) => {
            lines.push(field_line("Engine", report.engine.clone(), theme));
            lines.push(field_line("Report", report.id.to_string(), theme));
            lines.push(field_line(
                "Accepted",
                report.accepted_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                theme,
            ));
            lines.push(field_line("Summary", report.summary.clone(), theme));
            (" Dump configuration accepted", theme.success)
        }
        Err(e) => {
            lines.push(Line::from(Span::styled(format!(" Error: {e}"), theme.error)));
            (" Dump configuration rejected", theme.error)
        }
    };
    frame.render_widget(Paragraph::new(heading).style(style), chunks[0]);

    let block = Block::default()
        .title(" Result ")
        .borders(Borders::ALL)
        .border_style(style);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(" [Enter/q/Esc] Exit").style(theme.dim),
        chunks[2],
    );
}
