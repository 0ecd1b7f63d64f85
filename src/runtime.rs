use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

/// How long the loop waits for input before redrawing anyway
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// No input arrived within the frame interval
    Tick,
    /// The input side went away, nothing more will arrive
    Closed,
}

/// Input queue feeding the game loop. Whatever produces the events runs on
/// another thread and hands them over through a channel.
pub struct Events {
    rx: Receiver<GameEvent>,
    frame: Duration,
}

impl Events {
    /// Reads key and resize events from the terminal on a background thread.
    pub fn terminal(frame: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || loop {
            let forwarded = match event::read() {
                Ok(Event::Key(key)) => GameEvent::Key(key),
                Ok(Event::Resize(width, height)) => GameEvent::Resize(width, height),
                Ok(_) => continue,
                Err(err) => {
                    tracing::error!(%err, "terminal input failed");
                    return;
                }
            };
            if tx.send(forwarded).is_err() {
                return;
            }
        });
        Self::from_channel(rx, frame)
    }

    pub fn from_channel(rx: Receiver<GameEvent>, frame: Duration) -> Self {
        Self { rx, frame }
    }

    /// Waits at most one frame for the next event.
    pub fn next(&self) -> GameEvent {
        match self.rx.recv_timeout(self.frame) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => GameEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => GameEvent::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn quiet_input_yields_tick_after_one_frame() {
        let (_tx, rx) = mpsc::channel();
        let events = Events::from_channel(rx, Duration::from_millis(20));
        let started = Instant::now();
        assert_eq!(events.next(), GameEvent::Tick);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn queued_events_come_out_in_order() {
        let (tx, rx) = mpsc::channel();
        tx.send(GameEvent::Resize(120, 40)).unwrap();
        tx.send(GameEvent::Tick).unwrap();
        let events = Events::from_channel(rx, Duration::from_secs(5));
        assert_eq!(events.next(), GameEvent::Resize(120, 40));
        assert_eq!(events.next(), GameEvent::Tick);
    }

    #[test]
    fn dropped_sender_closes_after_draining() {
        let (tx, rx) = mpsc::channel();
        tx.send(GameEvent::Resize(80, 24)).unwrap();
        drop(tx);
        let events = Events::from_channel(rx, Duration::from_secs(5));
        assert_eq!(events.next(), GameEvent::Resize(80, 24));
        assert_eq!(events.next(), GameEvent::Closed);
    }
}
