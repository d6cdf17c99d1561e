//! Single-threaded event loop around the timer engine.
//!
//! `TimerService::run` owns the engine and processes one message at a time,
//! either a command from a `TimerHandle` or a tick from the tick source.
//! After each message the current state is published on a watch channel.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Duration;
use tracing::{debug, info};

use super::engine::{CompletionPolicy, TimerEngine, TimerEvent};
use super::error::TimerError;
use super::tick::{IntervalTicker, Tick, TICK_PERIOD};
use crate::sound::AlertPlayer;
use crate::types::{SettingsUpdate, TimerMode, TimerSettings, TimerState};

/// Commands accepted by the service loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerCommand {
    Start,
    Pause,
    Reset,
    ChangeMode(TimerMode),
    UpdateSettings(SettingsUpdate),
    AcknowledgeCompletion,
    Shutdown,
}

/// Messages on the service channel: commands plus state queries.
#[derive(Debug)]
enum Message {
    Command(TimerCommand),
    Snapshot(oneshot::Sender<TimerState>),
}

/// Runtime options for the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Interval between ticks; one second outside of tests and demos
    pub tick_period: Duration,
    pub completion_policy: CompletionPolicy,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            tick_period: TICK_PERIOD,
            completion_policy: CompletionPolicy::default(),
        }
    }
}

// ============================================================================
// TimerService
// ============================================================================

/// Owns the engine and serializes every command and tick.
#[derive(Debug)]
pub struct TimerService {
    engine: TimerEngine,
    messages: mpsc::UnboundedReceiver<Message>,
    ticks: mpsc::UnboundedReceiver<Tick>,
    state_tx: watch::Sender<TimerState>,
}

impl TimerService {
    /// Creates the service, a handle to control it, and the event receiver.
    pub fn new(
        settings: TimerSettings,
        alert: Arc<dyn AlertPlayer>,
        options: ServiceOptions,
    ) -> (Self, TimerHandle, mpsc::UnboundedReceiver<TimerEvent>) {
        let (message_tx, messages) = mpsc::unbounded_channel();
        let (tick_tx, ticks) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let ticker = IntervalTicker::with_period(tick_tx, options.tick_period);
        let engine = TimerEngine::new(settings, Box::new(ticker), alert, event_tx)
            .with_policy(options.completion_policy);
        let (state_tx, state_rx) = watch::channel(engine.state().clone());

        let service = Self {
            engine,
            messages,
            ticks,
            state_tx,
        };
        let handle = TimerHandle {
            messages: message_tx,
            state: state_rx,
        };
        (service, handle, event_rx)
    }

    /// Runs until `Shutdown` is received or every handle is dropped.
    pub async fn run(mut self) {
        info!(
            settings = ?self.engine.settings(),
            policy = ?self.engine.policy(),
            "timer service started"
        );

        loop {
            tokio::select! {
                biased;

                message = self.messages.recv() => match message {
                    Some(Message::Command(TimerCommand::Shutdown)) | None => break,
                    Some(Message::Command(command)) => self.dispatch(command),
                    Some(Message::Snapshot(reply)) => {
                        // The caller may have given up waiting.
                        let _ = reply.send(self.engine.state().clone());
                    }
                },
                Some(tick) = self.ticks.recv() => self.engine.handle_tick(tick),
            }
            self.publish();
        }

        self.engine.reset();
        self.publish();
        info!("timer service stopped");
    }

    fn dispatch(&mut self, command: TimerCommand) {
        debug!(?command, "command received");
        match command {
            TimerCommand::Start => self.engine.start(),
            TimerCommand::Pause => self.engine.pause(),
            TimerCommand::Reset => self.engine.reset(),
            TimerCommand::ChangeMode(mode) => self.engine.change_mode(mode),
            TimerCommand::UpdateSettings(update) => self.engine.update_settings(&update),
            TimerCommand::AcknowledgeCompletion => self.engine.acknowledge_completion(),
            TimerCommand::Shutdown => {}
        }
    }

    fn publish(&self) {
        let state = self.engine.state();
        self.state_tx.send_if_modified(|current| {
            if current == state {
                return false;
            }
            *current = state.clone();
            true
        });
    }
}

// ============================================================================
// TimerHandle
// ============================================================================

/// Cloneable control surface for presentation layers.
///
/// Commands are queued and return immediately.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    messages: mpsc::UnboundedSender<Message>,
    state: watch::Receiver<TimerState>,
}

impl TimerHandle {
    /// Queues a command.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::ServiceStopped` if the service loop has exited.
    pub fn send(&self, command: TimerCommand) -> Result<(), TimerError> {
        self.messages
            .send(Message::Command(command))
            .map_err(|_| TimerError::ServiceStopped)
    }

    /// Returns the state after every command queued before this call.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::ServiceStopped` if the service loop has exited.
    pub async fn snapshot(&self) -> Result<TimerState, TimerError> {
        let (reply, response) = oneshot::channel();
        self.messages
            .send(Message::Snapshot(reply))
            .map_err(|_| TimerError::ServiceStopped)?;
        response.await.map_err(|_| TimerError::ServiceStopped)
    }

    pub fn start(&self) -> Result<(), TimerError> {
        self.send(TimerCommand::Start)
    }

    pub fn pause(&self) -> Result<(), TimerError> {
        self.send(TimerCommand::Pause)
    }

    pub fn reset(&self) -> Result<(), TimerError> {
        self.send(TimerCommand::Reset)
    }

    pub fn change_mode(&self, mode: TimerMode) -> Result<(), TimerError> {
        self.send(TimerCommand::ChangeMode(mode))
    }

    pub fn update_settings(&self, update: SettingsUpdate) -> Result<(), TimerError> {
        self.send(TimerCommand::UpdateSettings(update))
    }

    pub fn acknowledge_completion(&self) -> Result<(), TimerError> {
        self.send(TimerCommand::AcknowledgeCompletion)
    }

    pub fn shutdown(&self) -> Result<(), TimerError> {
        self.send(TimerCommand::Shutdown)
    }

    /// Returns the most recently published state without waiting for
    /// queued commands.
    pub fn state(&self) -> TimerState {
        self.state.borrow().clone()
    }

    /// Returns the most recently published remaining time as `MM:SS`.
    pub fn formatted_remaining(&self) -> String {
        self.state.borrow().formatted_remaining()
    }

    /// Returns a receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.state.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================
