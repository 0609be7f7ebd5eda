//! Execute-and-relay stage.

mod relay;
mod run;
mod spawn;
pub mod types;

pub use relay::relay;
pub use run::run_and_relay;
pub use spawn::{spawn_payload, PayloadProcess};
pub use types::{ChildExit, RunOutcome, RunSummary};
