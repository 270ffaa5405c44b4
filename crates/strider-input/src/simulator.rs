//! Desktop simulator bindings: drive controller buttons from the keyboard.
//!
//! Lets locomotion techniques be exercised without a headset. Each binding
//! maps one physical key to one [`Control`]; key events are translated into
//! [`RawButtonEvent`]s and fed into the same [`ButtonState`](crate::ButtonState)
//! a real device backend would use.

use serde::{Deserialize, Serialize};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::buttons::RawButtonEvent;
use crate::control::{Button, Control, Hand};

/// Serde helper for [`KeyCode`], which has no serde support of its own.
mod keycode_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use winit::keyboard::KeyCode;

    /// Serialize a [`KeyCode`] as its debug name (e.g. `"Space"`).
    pub fn serialize<S: Serializer>(code: &KeyCode, s: S) -> Result<S::Ok, S::Error> {
        format!("{code:?}").serialize(s)
    }

    /// Deserialize a [`KeyCode`] from its debug name.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<KeyCode, D::Error> {
        let name = String::deserialize(d)?;
        super::keycode_from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown key: {name}")))
    }
}

/// Parses the subset of key names the simulator accepts.
#[must_use]
pub fn keycode_from_name(name: &str) -> Option<KeyCode> {
    Some(match name {
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyM" => KeyCode::KeyM,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyT" => KeyCode::KeyT,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Tab" => KeyCode::Tab,
        "Equal" => KeyCode::Equal,
        "Minus" => KeyCode::Minus,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "Digit1" => KeyCode::Digit1,
        "Digit2" => KeyCode::Digit2,
        _ => return None,
    })
}

/// Minimal description of a key event, independent of a live window.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is an auto-repeat event.
    pub repeat: bool,
}

impl From<&KeyEvent> for RawKeyEvent {
    fn from(event: &KeyEvent) -> Self {
        Self {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        }
    }
}

/// One key → control binding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// The keyboard key.
    #[serde(with = "keycode_serde")]
    pub key: KeyCode,
    /// The controller button it stands in for.
    pub control: Control,
}

/// Keyboard stand-ins for controller buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorBindings {
    /// Binding table. The first entry for a key wins.
    pub bindings: Vec<KeyBinding>,
}

impl Default for SimulatorBindings {
    fn default() -> Self {
        Self {
            bindings: vec![
                KeyBinding {
                    key: KeyCode::Space,
                    control: Control::RIGHT_TRIGGER,
                },
                KeyBinding {
                    key: KeyCode::Equal,
                    control: Control::new(Hand::Right, Button::PadUp),
                },
                KeyBinding {
                    key: KeyCode::Minus,
                    control: Control::new(Hand::Right, Button::PadDown),
                },
                KeyBinding {
                    key: KeyCode::KeyG,
                    control: Control::new(Hand::Left, Button::Grip),
                },
            ],
        }
    }
}

impl SimulatorBindings {
    /// The control bound to `key`, if any.
    #[must_use]
    pub fn control_for(&self, key: KeyCode) -> Option<Control> {
        self.bindings
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.control)
    }

    /// Translates a key event into a button event.
    ///
    /// Repeats, unidentified keys and unbound keys produce `None`.
    #[must_use]
    pub fn translate(&self, event: RawKeyEvent) -> Option<RawButtonEvent> {
        if event.repeat {
            return None;
        }
        let PhysicalKey::Code(code) = event.key else {
            return None;
        };
        let control = self.control_for(code)?;
        tracing::trace!(?code, %control, state = ?event.state, "simulated button");
        Some(RawButtonEvent {
            control,
            state: event.state,
        })
    }
}
