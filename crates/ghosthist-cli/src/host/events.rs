//! Terminal input on a background thread

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self as crossterm_event, KeyEvent};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::debug;

const POLL_TIMEOUT: Duration = Duration::from_millis(10);

#[derive(Debug, Clone)]
pub enum TermEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
}

/// Reads terminal events into a channel
///
/// While paused the thread leaves stdin alone so a foreground command can
/// read it.
pub struct EventSource {
    rx: UnboundedReceiver<TermEvent>,
    paused: Arc<AtomicBool>,
}

impl EventSource {
    pub fn spawn() -> Self {
        let (tx, rx) = unbounded_channel();
        let paused = Arc::new(AtomicBool::new(false));
        let reader_paused = paused.clone();

        thread::spawn(move || loop {
            if reader_paused.load(Ordering::Acquire) {
                thread::sleep(POLL_TIMEOUT);
                if tx.is_closed() {
                    break;
                }
                continue;
            }
            if !crossterm_event::poll(POLL_TIMEOUT).unwrap_or(false) {
                if tx.is_closed() {
                    break;
                }
                continue;
            }
            if reader_paused.load(Ordering::Acquire) {
                continue;
            }

            let event = match crossterm_event::read() {
                Ok(event) => event,
                Err(e) => {
                    debug!(error = %e, "Terminal read failed, stopping input");
                    break;
                }
            };
            if let Some(event) = convert(event) {
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx, paused }
    }

    pub async fn next(&mut self) -> Option<TermEvent> {
        self.rx.recv().await
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
    }
}

fn convert(event: crossterm_event::Event) -> Option<TermEvent> {
    match event {
        crossterm_event::Event::Key(key) => Some(TermEvent::Key(key)),
        crossterm_event::Event::Resize(width, height) => Some(TermEvent::Resize { width, height }),
        _ => None,
    }
}
