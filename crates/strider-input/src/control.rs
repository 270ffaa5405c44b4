//! Tracked-controller buttons addressed by hand.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which tracked hand a control belongs to.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Hand {
    /// Left-hand controller.
    Left,
    /// Right-hand controller.
    Right,
}

/// Digital buttons found on common tracked controllers.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Button {
    /// Index-finger trigger, read as fully pressed.
    Trigger,
    /// Grip / squeeze button.
    Grip,
    /// Application menu button.
    Menu,
    /// Touchpad or thumbstick click.
    PadClick,
    /// Upper half of the touchpad, pressed.
    PadUp,
    /// Lower half of the touchpad, pressed.
    PadDown,
}

/// A single bindable control: one button on one hand.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Control {
    /// The hand holding the controller.
    pub hand: Hand,
    /// The button on that controller.
    pub button: Button,
}

impl Control {
    /// Creates a control for `button` on `hand`.
    #[must_use]
    pub const fn new(hand: Hand, button: Button) -> Self {
        Self { hand, button }
    }

    /// Right-hand trigger, the default movement button.
    pub const RIGHT_TRIGGER: Self = Self::new(Hand::Right, Button::Trigger);
    /// Left-hand trigger.
    pub const LEFT_TRIGGER: Self = Self::new(Hand::Left, Button::Trigger);
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}", self.hand, self.button)
    }
}
