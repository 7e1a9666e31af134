//! Prompt input on a dedicated thread.

use super::AppEvent;
use std::io::BufRead;
use std::thread::JoinHandle;
use tokio::sync::mpsc;

/// Forward lines from `input` as events until EOF or the receiver goes away.
///
/// EOF sends a final [`AppEvent::Quit`]. Runs on a plain thread so a
/// pending read never holds up runtime shutdown.
pub fn spawn_line_reader<R>(input: R, events: mpsc::Sender<AppEvent>) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    std::thread::spawn(move || {
        for line in input.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read input");
                    break;
                }
            };
            for event in AppEvent::from_line(&line) {
                if events.blocking_send(event).is_err() {
                    return;
                }
            }
        }
        let _ = events.blocking_send(AppEvent::Quit);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_lines_become_events_then_quit() {
        let (tx, mut rx) = mpsc::channel(16);
        let handle = spawn_line_reader(Cursor::new("/stats\noi\n"), tx);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        handle.join().unwrap();

        assert_eq!(
            events,
            vec![
                AppEvent::ShowStats,
                AppEvent::InputChanged("oi".to_string()),
                AppEvent::SendRequested("oi".to_string()),
                AppEvent::Quit,
            ]
        );
    }

    #[tokio::test]
    async fn test_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let handle = spawn_line_reader(Cursor::new("a\nb\nc\n"), tx);
        handle.join().unwrap();
    }
}
