// SPDX-License-Identifier: MIT OR Apache-2.0
//! Key gestures: a key plus a modifier set.
//!
//! Gestures serialize as strings like `"Ctrl+H"` or `"ArrowRight"` so that
//! binding tables survive a trip through a config file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Modifier keys held as part of a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Ctrl (Cmd on macOS is mapped to this by the host)
    pub ctrl: bool,
    /// Shift
    pub shift: bool,
    /// Alt
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Ctrl only
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
        alt: false,
    };
}

impl From<egui::Modifiers> for Modifiers {
    fn from(m: egui::Modifiers) -> Self {
        Self {
            ctrl: m.ctrl || m.command,
            shift: m.shift,
            alt: m.alt,
        }
    }
}

/// A key combined with modifiers, mapped to a semantic action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyGesture {
    /// The non-modifier key
    pub key: egui::Key,
    /// Modifiers that must be held
    pub modifiers: Modifiers,
}

impl KeyGesture {
    /// Gesture with no modifiers
    pub fn plain(key: egui::Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Gesture with Ctrl held
    pub fn ctrl(key: egui::Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::CTRL,
        }
    }
}

/// Error parsing a gesture string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GestureParseError {
    /// The string contained no key part
    #[error("gesture string is empty")]
    Empty,
    /// The key name was not recognized
    #[error("unknown key name: {0}")]
    UnknownKey(String),
}

impl fmt::Display for KeyGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.shift {
            write!(f, "Shift+")?;
        }
        if self.modifiers.alt {
            write!(f, "Alt+")?;
        }
        write!(f, "{}", self.key.name())
    }
}

impl FromStr for KeyGesture {
    type Err = GestureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(GestureParseError::Empty);
        }

        let mut modifiers = Modifiers::NONE;
        let mut key = None;

        for part in s.split('+') {
            let part = part.trim();
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "cmd" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" => modifiers.alt = true,
                "" => return Err(GestureParseError::Empty),
                _ => {
                    let parsed = egui::Key::from_name(part)
                        .ok_or_else(|| GestureParseError::UnknownKey(part.to_string()))?;
                    key = Some(parsed);
                }
            }
        }

        let key = key.ok_or(GestureParseError::Empty)?;
        Ok(Self { key, modifiers })
    }
}

impl Serialize for KeyGesture {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KeyGesture {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip() {
        let gesture = KeyGesture::ctrl(egui::Key::H);
        let text = gesture.to_string();
        assert_eq!(text, "Ctrl+H");
        assert_eq!(text.parse::<KeyGesture>().unwrap(), gesture);
    }

    #[test]
    fn test_plain_key_round_trip() {
        let gesture = KeyGesture::plain(egui::Key::ArrowRight);
        assert_eq!(gesture.to_string().parse::<KeyGesture>().unwrap(), gesture);
    }

    #[test]
    fn test_modifier_order_insensitive() {
        let a: KeyGesture = "Ctrl+Shift+S".parse().unwrap();
        let b: KeyGesture = "Shift+Ctrl+S".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_empty_and_unknown() {
        assert_eq!("".parse::<KeyGesture>(), Err(GestureParseError::Empty));
        assert_eq!(
            "Ctrl+".parse::<KeyGesture>(),
            Err(GestureParseError::Empty)
        );
        assert!(matches!(
            "Ctrl+Bogus".parse::<KeyGesture>(),
            Err(GestureParseError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let gesture = KeyGesture::ctrl(egui::Key::Num0);
        let text = ron::to_string(&gesture).unwrap();
        let back: KeyGesture = ron::from_str(&text).unwrap();
        assert_eq!(back, gesture);
    }
}
