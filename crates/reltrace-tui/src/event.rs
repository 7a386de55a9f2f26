use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Polls the terminal on a dedicated thread and forwards events to the
/// async loop. A tick is sent whenever nothing arrives within `tick_rate`.
pub struct EventHandler {
    rx: tokio::sync::mpsc::UnboundedReceiver<TuiEvent>,
    _thread: std::thread::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let thread = std::thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    // Release and repeat events would double every keystroke on Windows.
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx.send(TuiEvent::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(CrosstermEvent::Resize(w, h)) => {
                        if tx.send(TuiEvent::Resize(w, h)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!("Failed to read terminal event: {e}");
                    }
                }
            } else if tx.send(TuiEvent::Tick).is_err() {
                break;
            }
        });
        Self {
            rx,
            _thread: thread,
        }
    }

    pub async fn next(&mut self) -> Option<TuiEvent> {
        self.rx.recv().await
    }
}
