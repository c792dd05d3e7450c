//! External player control
//!
//! Commands understood by rhythmbox-client, a trait for whatever carries
//! them out, and the play queue builder.

mod client;
mod command;
mod queue;

pub use client::{Player, RhythmboxClient, RHYTHMBOX_CLIENT};
pub use command::PlayerCommand;
pub use queue::{shuffle, QueueOutcome, QueuePlan, QueueRunner, QueueState};
