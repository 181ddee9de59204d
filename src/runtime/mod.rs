//! Runtime module - drives a resolver from an event source
//!
//! - `input` - line-oriented key event scripts
//! - `idle` - auto-close timer for open menus
//!
//! Script lines are read on a separate thread so that an open menu can time
//! out while the source is silent.

pub mod idle;
pub mod input;

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::keymap::{KeyEvent, Resolver, Signal};

pub use idle::IdleTimer;
pub use input::{parse_event_line, InputError};

/// What the reader thread produced next
enum ReaderMsg {
    Line(io::Result<String>),
    /// The menu stayed open past the idle timeout with no input
    Idle,
    Eof,
}

/// Feeds events into a resolver, closing idle menus on the way
#[derive(Debug)]
pub struct Driver {
    resolver: Resolver,
    idle: Option<IdleTimer>,
}

impl Driver {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            idle: None,
        }
    }

    /// Close the menu when no key arrives for `timer.timeout()`
    pub fn with_idle_timer(mut self, timer: IdleTimer) -> Self {
        self.idle = Some(timer);
        self
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Close the menu if it has been idle past the timeout at `now`
    ///
    /// Returns whether the menu was closed.
    pub fn poll_idle(&mut self, now: Instant) -> bool {
        let Some(idle) = &self.idle else {
            return false;
        };
        if !self.resolver.is_active() || !idle.is_expired(now) {
            return false;
        }

        tracing::debug!("Menu idle for over {:?}, closing", idle.timeout());
        let quit = self.resolver.config().quit;
        self.resolver.on_event(KeyEvent::press(quit));
        true
    }

    /// Deliver one event that arrived at `now`
    ///
    /// A menu whose timeout passed before `now` is closed first, so the event
    /// lands on an inactive resolver.
    pub fn feed(&mut self, event: KeyEvent, now: Instant) -> Signal {
        self.poll_idle(now);
        if let Some(idle) = &mut self.idle {
            idle.touch(now);
        }
        self.resolver.on_event(event)
    }

    /// Read an event script until it ends or the stop combo fires
    ///
    /// Returns the number of events delivered.
    pub fn run<R: BufRead + Send + 'static>(&mut self, input: R) -> Result<usize> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("whichkey-input".to_string())
            .spawn(move || {
                for line in input.lines() {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            })
            .context("Failed to start input reader")?;

        let mut delivered = 0;
        let mut line_number = 0;
        loop {
            let line = match self.next_message(&rx) {
                ReaderMsg::Line(line) => line.context("Failed to read key events")?,
                ReaderMsg::Idle => {
                    self.poll_idle(Instant::now());
                    continue;
                }
                ReaderMsg::Eof => return Ok(delivered),
            };
            line_number += 1;

            let events = parse_event_line(&line)
                .with_context(|| format!("Invalid key event on line {}", line_number))?;
            for event in events {
                delivered += 1;
                if self.feed(event, Instant::now()) == Signal::Terminate {
                    tracing::info!("Stopping after {} events", delivered);
                    return Ok(delivered);
                }
            }
        }
    }

    /// Wait for the next line, but no longer than an open menu may stay idle
    fn next_message(&self, rx: &Receiver<io::Result<String>>) -> ReaderMsg {
        let idle = self.idle.filter(|_| self.resolver.is_active());
        let Some(idle) = idle else {
            return rx.recv().map_or(ReaderMsg::Eof, ReaderMsg::Line);
        };

        let now = Instant::now();
        if idle.is_expired(now) {
            return ReaderMsg::Idle;
        }
        // Wake just past the deadline; expiry is strictly greater than the timeout
        let wait = idle.remaining(now) + Duration::from_millis(1);
        match rx.recv_timeout(wait) {
            Ok(line) => ReaderMsg::Line(line),
            Err(RecvTimeoutError::Timeout) => ReaderMsg::Idle,
            Err(RecvTimeoutError::Disconnected) => ReaderMsg::Eof,
        }
    }

    pub fn into_resolver(self) -> Resolver {
        self.resolver
    }
}
