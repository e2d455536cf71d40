//! Tick scheduler: fires the controller on a fixed interval and forwards frames to a sink.

use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use kepler_core::time::TICK_INTERVAL_MS;
use thiserror::Error;
use tracing::{debug, warn};

use crate::controller::{Command, Controller, ControllerError};
use crate::session::Frame;

/// Wall-clock interval between ticks in real-time playback.
pub const TICK_INTERVAL: Duration = Duration::from_millis(TICK_INTERVAL_MS);

/// Destination for emitted frames (canvas, CSV writer, test buffer).
pub trait FrameSink {
    fn render(&mut self, frame: &Frame) -> io::Result<()>;
}

impl FrameSink for Vec<Frame> {
    fn render(&mut self, frame: &Frame) -> io::Result<()> {
        self.push(*frame);
        Ok(())
    }
}

impl<T: FrameSink + ?Sized> FrameSink for &mut T {
    fn render(&mut self, frame: &Frame) -> io::Result<()> {
        (**self).render(frame)
    }
}

/// How ticks are spaced in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep so ticks fire every interval.
    Realtime(Duration),
    /// Fire ticks back to back (headless export, tests).
    Unpaced,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::Realtime(TICK_INTERVAL)
    }
}

/// Errors that end a driver run.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("frame sink failed: {0}")]
    Sink(#[from] io::Error),
    #[error(transparent)]
    Controller(#[from] ControllerError),
    #[error("unpaced run needs a tick limit or a command channel")]
    Unbounded,
}

/// Counters reported once a run ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub ticks: u64,
    pub frames: u64,
    pub commands: u64,
}

/// Owns the controller and a sink, and runs the timer loop.
pub struct Driver<K: FrameSink> {
    controller: Controller,
    sink: K,
    pacing: Pacing,
    commands: Option<Receiver<Command>>,
    max_ticks: Option<u64>,
}

impl<K: FrameSink> Driver<K> {
    pub fn new(controller: Controller, sink: K) -> Self {
        Driver {
            controller,
            sink,
            pacing: Pacing::default(),
            commands: None,
            max_ticks: None,
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_commands(mut self, commands: Receiver<Command>) -> Self {
        self.commands = Some(commands);
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Apply a command directly and render the frame it yields.
    pub fn send(&mut self, command: Command) -> Result<(), DriverError> {
        if let Some(frame) = self.controller.handle(command)? {
            self.sink.render(&frame)?;
        }
        Ok(())
    }

    /// Run until `Stop`, the tick limit, or a disconnected channel with no limit set.
    ///
    /// Commands are drained between ticks, never during one.
    pub fn run(&mut self) -> Result<RunReport, DriverError> {
        if self.pacing == Pacing::Unpaced && self.max_ticks.is_none() && self.commands.is_none() {
            return Err(DriverError::Unbounded);
        }

        let mut report = RunReport::default();
        let mut next_deadline = Instant::now();

        loop {
            let (handled, rendered, disconnected) = self.drain_commands()?;
            report.commands += handled;
            report.frames += rendered;

            if self.controller.is_stopped() {
                debug!(?report, "driver stopped by command");
                break;
            }
            if disconnected && self.max_ticks.is_none() {
                debug!(?report, "command channel closed");
                break;
            }
            if self.max_ticks.is_some_and(|max| report.ticks >= max) {
                break;
            }

            if let Some(frame) = self.controller.tick() {
                self.sink.render(&frame)?;
                report.frames += 1;
            }
            report.ticks += 1;

            if let Pacing::Realtime(interval) = self.pacing {
                next_deadline += interval;
                let now = Instant::now();
                if next_deadline > now {
                    thread::sleep(next_deadline - now);
                } else {
                    next_deadline = now;
                }
            }
        }

        Ok(report)
    }

    fn drain_commands(&mut self) -> Result<(u64, u64, bool), DriverError> {
        let Some(receiver) = self.commands.as_ref() else {
            return Ok((0, 0, false));
        };

        let mut pending = Vec::new();
        let disconnected = loop {
            match receiver.try_recv() {
                Ok(command) => pending.push(command),
                Err(TryRecvError::Empty) => break false,
                Err(TryRecvError::Disconnected) => break true,
            }
        };

        let mut handled = 0;
        let mut rendered = 0;
        for command in pending {
            handled += 1;
            match self.controller.handle(command) {
                Ok(Some(frame)) => {
                    self.sink.render(&frame)?;
                    rendered += 1;
                }
                Ok(None) => {}
                Err(err @ ControllerError::NoSession) => warn!(%err, "command ignored"),
                // the controller keeps its previous settings, so playback carries on
                Err(err @ ControllerError::Session(_)) => warn!(%err, "command rejected"),
            }
        }
        Ok((handled, rendered, disconnected))
    }
}
