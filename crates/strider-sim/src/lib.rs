//! Headless host for the locomotion core.
//!
//! Replays a scripted input timeline against one technique on a fixed-step
//! clock and reports how far the actor travelled. Used to try techniques and
//! settings without a headset.

pub mod clock;
pub mod error;
pub mod script;
pub mod session;

pub use clock::{DEFAULT_TICK_RATE_HZ, FixedStepClock, MAX_FRAME_TIME};
pub use error::SimError;
pub use script::{InputScript, PoseDriver};
pub use session::{Session, SessionReport};
