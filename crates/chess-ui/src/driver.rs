//! Async driver that owns a session and schedules computer replies.
//!
//! Front ends call the async actions and draw the [`BoardView`] each one
//! returns. When a computer reply is due, the driver spawns a task that
//! sleeps for the visible delay, plays the reply and pushes the new frame on
//! the channel returned by [`GameDriver::new`]. Nothing awaits that task.

use std::sync::Arc;
use std::time::Duration;

use chess_core::Square;
use chess_rules::RulesEngine;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use crate::config::GameMode;
use crate::orientation::ScreenPos;
use crate::session::{ClickOutcome, ComputerOutcome, ComputerTicket, Session};
use crate::view::BoardView;

/// Frames pushed after a computer reply.
pub type FrameReceiver = mpsc::Receiver<BoardView>;

/// Shared handle to a session. Cloning shares the same board.
pub struct GameDriver<R> {
    session: Arc<Mutex<Session<R>>>,
    delay: Duration,
    frames: mpsc::Sender<BoardView>,
}

impl<R> Clone for GameDriver<R> {
    fn clone(&self) -> Self {
        GameDriver {
            session: Arc::clone(&self.session),
            delay: self.delay,
            frames: self.frames.clone(),
        }
    }
}

impl<R: RulesEngine + Send + 'static> GameDriver<R> {
    /// Wraps `session`; computer replies wait `delay` before playing.
    pub fn new(session: Session<R>, delay: Duration) -> (Self, FrameReceiver) {
        let (frames, rx) = mpsc::channel(16);
        let driver = GameDriver {
            session: Arc::new(Mutex::new(session)),
            delay,
            frames,
        };
        (driver, rx)
    }

    pub async fn view(&self) -> BoardView {
        self.session.lock().await.view()
    }

    pub async fn click(&self, square: Square) -> BoardView {
        let mut session = self.session.lock().await;
        let outcome = session.on_square_clicked(square);
        self.after_click(outcome);
        session.view()
    }

    pub async fn click_screen(&self, pos: ScreenPos) -> BoardView {
        let mut session = self.session.lock().await;
        let outcome = session.on_screen_clicked(pos);
        self.after_click(outcome);
        session.view()
    }

    pub async fn reset(&self) -> BoardView {
        let mut session = self.session.lock().await;
        session.on_reset();
        session.view()
    }

    pub async fn flip(&self) -> BoardView {
        let mut session = self.session.lock().await;
        session.on_flip();
        session.view()
    }

    pub async fn toggle_hints(&self) -> BoardView {
        let mut session = self.session.lock().await;
        session.on_hints_toggled();
        session.view()
    }

    pub async fn set_hints(&self, enabled: bool) -> BoardView {
        let mut session = self.session.lock().await;
        session.set_hints_enabled(enabled);
        session.view()
    }

    pub async fn set_mode(&self, mode: GameMode) -> BoardView {
        let mut session = self.session.lock().await;
        if let Some(ticket) = session.set_mode(mode) {
            self.schedule(ticket);
        }
        session.view()
    }

    fn after_click(&self, outcome: ClickOutcome) {
        if let ClickOutcome::Moved {
            computer: Some(ticket),
            ..
        } = outcome
        {
            self.schedule(ticket);
        }
    }

    /// Plays `ticket` after the visible delay on a background task.
    fn schedule(&self, ticket: ComputerTicket) {
        let session = Arc::clone(&self.session);
        let frames = self.frames.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let view = {
                let mut session = session.lock().await;
                if session.play_computer_turn(ticket) == ComputerOutcome::Stale {
                    return;
                }
                session.view()
            };
            if frames.send(view).await.is_err() {
                debug!("frame receiver dropped; computer frame discarded");
            }
        });
    }
}
