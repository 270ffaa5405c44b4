//! Input collaborator for locomotion: controller buttons, tracked poses, and
//! keyboard simulator bindings, all exposed as per-frame snapshots.

pub mod buttons;
pub mod control;
pub mod frame;
pub mod simulator;
pub mod tracking;

pub use buttons::{ButtonState, RawButtonEvent};
pub use control::{Button, Control, Hand};
pub use frame::{InputFrame, InputSource};
pub use simulator::{KeyBinding, RawKeyEvent, SimulatorBindings, keycode_from_name};
pub use tracking::{Axis, PoseTable, TrackedObject, TrackedPose};
