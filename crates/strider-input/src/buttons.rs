//! Frame-coherent controller button state.
//!
//! [`ButtonState`] accumulates button events delivered during a frame and
//! answers three questions for any [`Control`]: is it held, was it pressed
//! this frame, and was it released this frame. The release edge is what
//! toggle-style locomotion triggers consume, so it must survive until the
//! end of the frame even if the button is pressed again afterwards.

use std::collections::HashSet;
use winit::event::ElementState;

use crate::control::Control;

/// Minimal description of a button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawButtonEvent {
    /// The control that changed.
    pub control: Control,
    /// Whether the control went down or up.
    pub state: ElementState,
}

impl RawButtonEvent {
    /// Shorthand for a press of `control`.
    #[must_use]
    pub fn pressed(control: Control) -> Self {
        Self {
            control,
            state: ElementState::Pressed,
        }
    }

    /// Shorthand for a release of `control`.
    #[must_use]
    pub fn released(control: Control) -> Self {
        Self {
            control,
            state: ElementState::Released,
        }
    }
}

/// Tracks per-frame controller button state.
///
/// # Usage
///
/// 1. Forward every button transition to [`process`](Self::process).
/// 2. Query with [`is_pressed`](Self::is_pressed),
///    [`just_pressed`](Self::just_pressed), [`just_released`](Self::just_released).
/// 3. Call [`clear_transients`](Self::clear_transients) at the end of each frame.
#[derive(Debug, Clone, Default)]
pub struct ButtonState {
    pressed: HashSet<Control>,
    just_pressed: HashSet<Control>,
    just_released: HashSet<Control>,
}

impl ButtonState {
    /// Creates a state with no buttons held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one button transition.
    ///
    /// A press of an already-held control is treated as a repeat and ignored,
    /// as is a release of a control that is not held.
    pub fn process(&mut self, event: RawButtonEvent) {
        match event.state {
            ElementState::Pressed => {
                if self.pressed.insert(event.control) {
                    self.just_pressed.insert(event.control);
                }
            }
            ElementState::Released => {
                if self.pressed.remove(&event.control) {
                    self.just_released.insert(event.control);
                }
            }
        }
    }

    /// Returns `true` while the control is held down.
    #[must_use]
    pub fn is_pressed(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }

    /// Returns `true` only during the frame the control went down.
    #[must_use]
    pub fn just_pressed(&self, control: Control) -> bool {
        self.just_pressed.contains(&control)
    }

    /// Returns `true` only during the frame the control went up.
    #[must_use]
    pub fn just_released(&self, control: Control) -> bool {
        self.just_released.contains(&control)
    }

    /// Clears the pressed/released edges. Call at end of frame.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
