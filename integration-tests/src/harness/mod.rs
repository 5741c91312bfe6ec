mod output;
pub mod tracing;
mod workspace;

pub use output::{ChannelWriter, OutputLines};
pub use tracing::{CapturedEvent, init_test_tracing};
pub use workspace::TestWorkspace;
