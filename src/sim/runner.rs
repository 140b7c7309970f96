//! Simulation thread and input channel
//!
//! One thread owns the [`World`] and ticks it on a fixed cadence. Input
//! arrives from other threads through a bounded command channel and is
//! applied at the start of the next tick.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError, bounded};

use super::events::EventSink;
use super::input::{Command, apply_command};
use super::state::World;
use super::tick::{TickInput, TickSummary, tick};
use crate::consts::ANIMATION_DELAY_MS;
use crate::error::{Error, Result};

/// Commands buffered between ticks before senders start dropping
pub const COMMAND_CAPACITY: usize = 64;

/// Sending side of the command channel; cheap to clone
#[derive(Debug, Clone)]
pub struct Controller {
    tx: Sender<Command>,
}

impl Controller {
    /// Queue a command for the next tick without blocking
    ///
    /// Returns false if the command was dropped.
    pub fn send(&self, command: Command) -> bool {
        match self.tx.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(command)) => {
                log::warn!("Command buffer full; dropping {:?}", command);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Create a bounded command channel
pub fn command_channel() -> (Controller, Receiver<Command>) {
    let (tx, rx) = bounded(COMMAND_CAPACITY);
    (Controller { tx }, rx)
}

/// Fixed-interval schedule
///
/// Deadlines advance by the interval no matter how long a tick took. A late
/// tick waits zero and the schedule never tries to catch up.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    interval: Duration,
    next: Instant,
}

impl Cadence {
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next: start,
        }
    }

    /// Move to the next deadline and return how long to wait for it
    pub fn advance(&mut self, now: Instant) -> Duration {
        self.next += self.interval;
        self.next.saturating_duration_since(now)
    }
}

/// Receives each finished frame (renderer, HUD, logger)
pub trait FrameSink {
    fn on_frame(&mut self, world: &World, summary: &TickSummary);
}

impl FrameSink for () {
    fn on_frame(&mut self, _world: &World, _summary: &TickSummary) {}
}

/// Owns the world and drives it tick by tick
pub struct Runner<E, F> {
    world: World,
    commands: Receiver<Command>,
    events: E,
    frames: F,
    interval: Duration,
    input: TickInput,
}

impl<E: EventSink, F: FrameSink> Runner<E, F> {
    pub fn new(world: World, commands: Receiver<Command>, events: E, frames: F) -> Self {
        Self {
            world,
            commands,
            events,
            frames,
            interval: Duration::from_millis(ANIMATION_DELAY_MS),
            input: TickInput::default(),
        }
    }

    /// Override the tick interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    /// Collect pending commands and run one tick
    ///
    /// Returns false, without ticking, once `Quit` arrives or every
    /// controller is gone. Commands received before that are still applied.
    pub fn step(&mut self) -> bool {
        self.input.commands.clear();
        loop {
            match self.commands.try_recv() {
                Ok(Command::Quit) => {
                    log::info!("Quit received at frame {}", self.world.frame);
                    self.apply_pending();
                    return false;
                }
                Ok(command) => self.input.commands.push(command),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::info!("All controllers dropped; stopping");
                    self.apply_pending();
                    return false;
                }
            }
        }

        let summary = tick(&mut self.world, &self.input, &mut self.events);
        self.frames.on_frame(&self.world, &summary);
        true
    }

    fn apply_pending(&mut self) {
        for command in self.input.commands.drain(..) {
            apply_command(&mut self.world, command, &mut self.events);
        }
    }

    /// Tick on the fixed cadence until told to stop; returns the final world
    pub fn run(mut self) -> World {
        let mut cadence = Cadence::new(self.interval, Instant::now());
        while self.step() {
            let wait = cadence.advance(Instant::now());
            if !wait.is_zero() {
                thread::sleep(wait);
            }
        }
        self.world
    }
}

impl<E, F> Runner<E, F>
where
    E: EventSink + Send + 'static,
    F: FrameSink + Send + 'static,
{
    /// Run on a dedicated "simulation" thread
    pub fn spawn(self) -> Result<SimulationThread> {
        let handle = thread::Builder::new()
            .name("simulation".to_string())
            .spawn(move || self.run())?;
        Ok(SimulationThread { handle })
    }
}

/// Handle to a running simulation thread
#[derive(Debug)]
pub struct SimulationThread {
    handle: JoinHandle<World>,
}

impl SimulationThread {
    /// Wait for the loop to stop and take back the world
    pub fn join(self) -> Result<World> {
        self.handle.join().map_err(|_| Error::ThreadPanicked)
    }
}
