use crate::command::Command;
use crate::engine::{Scheduler, Session, SessionState};
use crate::store::KeyValueStore;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

/// The terminal front end: feeds wall-clock time and key presses to a
/// [`Session`] and draws the result
#[derive(Debug)]
pub(crate) struct App<S, K, R = rand::rngs::ThreadRng> {
    session: Session<S, K, R>,
    epoch: Instant,
    quitting: bool,
}

impl<S: Scheduler, K: KeyValueStore, R: Rng> App<S, K, R> {
    pub(crate) fn new(session: Session<S, K, R>) -> App<S, K, R> {
        App {
            session,
            epoch: Instant::now(),
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        self.session.initialize_game();
        while !self.quitting {
            self.session.advance_to(self.epoch.elapsed());
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let snapshot = self.session.snapshot();
        terminal.draw(|frame| frame.render_widget(&snapshot, frame.area()))?;
        Ok(())
    }

    /// Wait for an input event until the next clock deadline, blocking
    /// indefinitely if no timers are armed.  Clock events that fell due while
    /// waiting are dispatched before the input is applied.
    fn process_input(&mut self) -> io::Result<()> {
        let event = match self.session.next_deadline() {
            Some(deadline) => {
                let wait = deadline.saturating_sub(self.epoch.elapsed());
                if wait.is_zero() || !poll(wait)? {
                    return Ok(());
                }
                read()?
            }
            None => read()?,
        };
        self.session.advance_to(self.epoch.elapsed());
        self.handle_event(event);
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if event == Event::FocusLost {
            if self.session.state() == SessionState::Running {
                self.session.toggle_pause();
            }
            return;
        }
        let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) else {
            return;
        };
        match cmd {
            Command::Quit => self.quitting = true,
            Command::Steer(direction) => self.session.set_direction(direction),
            Command::Pause => self.session.toggle_pause(),
            Command::Restart => self.session.initialize_game(),
            Command::SetDifficulty(difficulty) => self.session.change_difficulty(difficulty),
        }
    }
}
