//! Fan-in of followed files and interactive triggers into one output stream.

mod error;
mod events;
mod follower;
mod run;
mod shutdown;
mod trigger;

pub use error::MuxError;
pub use events::{LineEvent, SeparatorEvent};
pub use follower::{FollowContext, Follower};
pub use run::run;
pub use shutdown::{Shutdown, ShutdownListener, install_signal_handlers};
pub use trigger::{InputModeGuard, Trigger, TriggerDecoder, TriggerListener, decode_trigger};
