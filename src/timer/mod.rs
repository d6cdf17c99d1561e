//! Study timer core.
//!
//! - `store`: the authoritative timer state and its transition rules
//! - `tick`: armable periodic tick sources
//! - `engine`: drives the store in real time and handles completion
//! - `service`: the single event loop and the handle used by front ends

pub mod engine;
pub mod error;
pub mod service;
pub mod store;
pub mod tick;

pub use engine::{CompletionPolicy, TimerEngine, TimerEvent};
pub use error::TimerError;
pub use service::{ServiceOptions, TimerCommand, TimerHandle, TimerService};
pub use store::TimerStore;
pub use tick::{IntervalTicker, ManualTickSource, Tick, TickSource, TICK_PERIOD};
