// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rebindable key bindings.
//!
//! The table is keyed by gesture, so binding the same gesture twice makes
//! the most recent binding win. An action owns at most one gesture;
//! rebinding it releases the previous one.

use crate::context::InputContext;
use crate::gesture::KeyGesture;
use crate::intent::InputIntent;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A bindable semantic action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewerAction {
    /// Toggle play/pause
    PlayPause,
    /// Advance one frame
    NextFrame,
    /// Go back one frame
    PreviousFrame,
    /// Jump to the first frame
    FirstFrame,
    /// Jump to the last frame
    LastFrame,
    /// Select the next image
    NextImage,
    /// Select the previous image
    PreviousImage,
    /// Select the next series
    NextSeries,
    /// Select the previous series
    PreviousSeries,
    /// Mirror horizontally
    HorizontalFlip,
    /// Mirror vertically
    VerticalFlip,
    /// Invert the lookup table
    InvertImage,
    /// Reset transforms, zoom and window/level
    ResetAll,
    /// Zoom in one step
    ZoomIn,
    /// Zoom out one step
    ZoomOut,
    /// Fit the image to the viewport
    FitToWindow,
    /// Reset window/level
    ResetWindowing,
}

impl ViewerAction {
    /// The intent this action emits when triggered
    pub fn intent(self) -> InputIntent {
        match self {
            Self::PlayPause => InputIntent::PlayPause,
            Self::NextFrame => InputIntent::NextFrame,
            Self::PreviousFrame => InputIntent::PreviousFrame,
            Self::FirstFrame => InputIntent::FirstFrame,
            Self::LastFrame => InputIntent::LastFrame,
            Self::NextImage => InputIntent::NextImage,
            Self::PreviousImage => InputIntent::PreviousImage,
            Self::NextSeries => InputIntent::NextSeries,
            Self::PreviousSeries => InputIntent::PreviousSeries,
            Self::HorizontalFlip => InputIntent::HorizontalFlip,
            Self::VerticalFlip => InputIntent::VerticalFlip,
            Self::InvertImage => InputIntent::InvertImage,
            Self::ResetAll => InputIntent::ResetAll,
            Self::ZoomIn => InputIntent::ZoomIn,
            Self::ZoomOut => InputIntent::ZoomOut,
            Self::FitToWindow => InputIntent::FitToWindow,
            Self::ResetWindowing => InputIntent::ResetWindowing,
        }
    }
}

/// One entry in the binding table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// The action the gesture triggers
    pub action: ViewerAction,
    /// Context the binding requires; `None` fires in any context
    pub context: Option<InputContext>,
}

/// Gesture-to-action binding table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingTable {
    bindings: IndexMap<KeyGesture, Binding>,
}

impl BindingTable {
    /// Create a table with the default viewer bindings
    pub fn with_defaults() -> Self {
        let mut table = Self {
            bindings: IndexMap::new(),
        };
        table.install_defaults();
        table
    }

    /// Create an empty table
    pub fn empty() -> Self {
        Self {
            bindings: IndexMap::new(),
        }
    }

    /// Bind an action to a gesture, firing in any context
    ///
    /// The action's previous gesture (if any) is released; if the gesture
    /// was bound to another action, that action loses it.
    pub fn bind(&mut self, action: ViewerAction, gesture: KeyGesture) {
        self.bind_in_context(action, gesture, None);
    }

    /// Bind an action to a gesture that only fires while `context` is active
    pub fn bind_in_context(
        &mut self,
        action: ViewerAction,
        gesture: KeyGesture,
        context: Option<InputContext>,
    ) {
        self.bindings.retain(|_, b| b.action != action);
        self.bindings.insert(gesture, Binding { action, context });
    }

    /// The gesture currently bound to an action
    pub fn gesture_for(&self, action: ViewerAction) -> Option<KeyGesture> {
        self.bindings
            .iter()
            .find(|(_, b)| b.action == action)
            .map(|(g, _)| *g)
    }

    /// Look up the binding for a gesture
    pub fn binding(&self, gesture: &KeyGesture) -> Option<Binding> {
        self.bindings.get(gesture).copied()
    }

    /// Remove the binding for an action
    pub fn unbind(&mut self, action: ViewerAction) {
        self.bindings.retain(|_, b| b.action != action);
    }

    /// Restore the fixed default table
    pub fn reset_to_defaults(&mut self) {
        self.bindings.clear();
        self.install_defaults();
    }

    /// Number of bound gestures
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&KeyGesture, &Binding)> {
        self.bindings.iter()
    }

    fn install_defaults(&mut self) {
        use egui::Key;

        // Playback transport
        self.bind(ViewerAction::PlayPause, KeyGesture::plain(Key::Enter));
        self.bind(ViewerAction::NextFrame, KeyGesture::plain(Key::ArrowRight));
        self.bind(
            ViewerAction::PreviousFrame,
            KeyGesture::plain(Key::ArrowLeft),
        );
        self.bind(ViewerAction::FirstFrame, KeyGesture::plain(Key::Home));
        self.bind(ViewerAction::LastFrame, KeyGesture::plain(Key::End));

        // Series/image navigation
        self.bind(ViewerAction::NextImage, KeyGesture::plain(Key::ArrowDown));
        self.bind(ViewerAction::PreviousImage, KeyGesture::plain(Key::ArrowUp));
        self.bind(ViewerAction::NextSeries, KeyGesture::ctrl(Key::ArrowDown));
        self.bind(ViewerAction::PreviousSeries, KeyGesture::ctrl(Key::ArrowUp));

        // Transforms
        self.bind(ViewerAction::HorizontalFlip, KeyGesture::ctrl(Key::H));
        self.bind(ViewerAction::VerticalFlip, KeyGesture::ctrl(Key::V));
        self.bind(ViewerAction::InvertImage, KeyGesture::ctrl(Key::I));
        self.bind(ViewerAction::ResetAll, KeyGesture::plain(Key::Escape));

        // Zoom and windowing
        self.bind(ViewerAction::ZoomIn, KeyGesture::plain(Key::Plus));
        self.bind(ViewerAction::ZoomOut, KeyGesture::plain(Key::Minus));
        self.bind(ViewerAction::FitToWindow, KeyGesture::ctrl(Key::Num0));
        self.bind(ViewerAction::ResetWindowing, KeyGesture::ctrl(Key::W));
    }
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Key;

    #[test]
    fn test_last_write_wins_for_gesture() {
        let mut table = BindingTable::empty();
        let gesture = KeyGesture::plain(Key::F);

        table.bind(ViewerAction::FitToWindow, gesture);
        table.bind(ViewerAction::HorizontalFlip, gesture);

        assert_eq!(
            table.binding(&gesture).unwrap().action,
            ViewerAction::HorizontalFlip
        );
        assert_eq!(table.gesture_for(ViewerAction::FitToWindow), None);
    }

    #[test]
    fn test_rebinding_releases_old_gesture() {
        let mut table = BindingTable::empty();
        table.bind(ViewerAction::ZoomIn, KeyGesture::plain(Key::Plus));
        table.bind(ViewerAction::ZoomIn, KeyGesture::plain(Key::Equals));

        assert_eq!(
            table.gesture_for(ViewerAction::ZoomIn),
            Some(KeyGesture::plain(Key::Equals))
        );
        assert!(table.binding(&KeyGesture::plain(Key::Plus)).is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut table = BindingTable::with_defaults();
        table.bind(ViewerAction::PlayPause, KeyGesture::plain(Key::P));
        table.reset_to_defaults();

        assert_eq!(
            table.gesture_for(ViewerAction::PlayPause),
            Some(KeyGesture::plain(Key::Enter))
        );
    }

    #[test]
    fn test_defaults_cover_all_actions() {
        let table = BindingTable::with_defaults();
        assert_eq!(table.len(), 17);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut table = BindingTable::with_defaults();
        table.bind_in_context(
            ViewerAction::NextImage,
            KeyGesture::plain(Key::PageDown),
            Some(crate::context::InputContext::Tree),
        );

        let text = ron::to_string(&table).unwrap();
        let back: BindingTable = ron::from_str(&text).unwrap();

        assert_eq!(back.len(), table.len());
        assert_eq!(
            back.gesture_for(ViewerAction::NextImage),
            Some(KeyGesture::plain(Key::PageDown))
        );
        assert_eq!(
            back.binding(&KeyGesture::plain(Key::PageDown)).unwrap().context,
            Some(crate::context::InputContext::Tree)
        );
    }
}
