// SPDX-License-Identifier: MIT OR Apache-2.0
//! The input dispatcher.
//!
//! Routes raw key/pointer/wheel events to semantic intents:
//! - Bound gestures are checked first (optionally context-gated)
//! - Hard-coded convenience keys fire only in specific contexts
//! - Pointer drags drive windowing and panning, one at a time

use crate::bindings::BindingTable;
use crate::context::{ContextSet, InputContext};
use crate::gesture::{KeyGesture, Modifiers};
use crate::intent::InputIntent;
use egui::Pos2;

/// A raw key press
#[derive(Debug, Clone, Copy)]
pub struct KeyInput {
    /// The pressed key
    pub key: egui::Key,
    /// Modifiers held at press time
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// Key press without modifiers
    pub fn plain(key: egui::Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }
}

/// Pointer button identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button
    Primary,
    /// Right button
    Secondary,
    /// Middle button / wheel press
    Middle,
}

/// What the pointer did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// A button went down
    Pressed,
    /// The pointer moved
    Moved,
    /// A button went up
    Released,
    /// A button was double-clicked
    DoubleClicked,
}

/// A raw pointer event
#[derive(Debug, Clone, Copy)]
pub struct PointerInput {
    /// Event phase
    pub phase: PointerPhase,
    /// Button involved; `None` for plain moves
    pub button: Option<PointerButton>,
    /// Pointer position in viewport coordinates
    pub pos: Pos2,
}

/// Active pointer interaction
///
/// Windowing and panning are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PointerInteraction {
    #[default]
    Idle,
    Windowing,
    Panning,
}

/// Maps raw input events to semantic viewer intents
///
/// Intents accumulate internally; drain them once per frame with
/// [`take_intents`](Self::take_intents).
pub struct InputDispatcher {
    contexts: ContextSet,
    bindings: BindingTable,
    interaction: PointerInteraction,
    last_pointer_pos: Pos2,
    pending: Vec<InputIntent>,
}

impl InputDispatcher {
    /// Create a dispatcher with the default bindings and only the global
    /// context active
    pub fn new() -> Self {
        Self {
            contexts: ContextSet::new(),
            bindings: BindingTable::with_defaults(),
            interaction: PointerInteraction::Idle,
            last_pointer_pos: Pos2::ZERO,
            pending: Vec::new(),
        }
    }

    /// The active-context set
    pub fn contexts(&self) -> &ContextSet {
        &self.contexts
    }

    /// Mutable access to the active-context set
    pub fn contexts_mut(&mut self) -> &mut ContextSet {
        &mut self.contexts
    }

    /// The binding table
    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Mutable access to the binding table
    pub fn bindings_mut(&mut self) -> &mut BindingTable {
        &mut self.bindings
    }

    /// Drain all intents produced since the last call
    pub fn take_intents(&mut self) -> Vec<InputIntent> {
        std::mem::take(&mut self.pending)
    }

    /// Position of the most recent pointer press or drag move
    pub fn last_pointer_pos(&self) -> Pos2 {
        self.last_pointer_pos
    }

    /// Process a key press; returns whether it was handled
    pub fn process_key(&mut self, input: &KeyInput) -> bool {
        let gesture = KeyGesture {
            key: input.key,
            modifiers: input.modifiers,
        };

        if let Some(binding) = self.bindings.binding(&gesture) {
            let context_ok = match binding.context {
                None => true,
                Some(ctx) => self.contexts.contains(ctx),
            };
            if context_ok {
                self.pending.push(binding.action.intent());
                return true;
            }
            tracing::trace!(?gesture, "bound gesture ignored: required context inactive");
        }

        // Convenience keys: modifier-free, context-gated
        if input.modifiers != Modifiers::NONE {
            return false;
        }

        let playback_or_image = self
            .contexts
            .contains_any(&[InputContext::Playback, InputContext::Image]);

        match input.key {
            egui::Key::Space if playback_or_image => {
                self.pending.push(InputIntent::PlayPause);
                true
            }
            egui::Key::ArrowLeft if playback_or_image => {
                self.pending.push(InputIntent::PreviousFrame);
                true
            }
            egui::Key::ArrowRight if playback_or_image => {
                self.pending.push(InputIntent::NextFrame);
                true
            }
            egui::Key::ArrowUp if self.contexts.contains(InputContext::Tree) => {
                self.pending.push(InputIntent::PreviousImage);
                true
            }
            egui::Key::ArrowDown if self.contexts.contains(InputContext::Tree) => {
                self.pending.push(InputIntent::NextImage);
                true
            }
            _ => false,
        }
    }

    /// Process a pointer event; returns whether it was handled
    pub fn process_pointer(&mut self, input: &PointerInput) -> bool {
        match input.phase {
            PointerPhase::Pressed => self.on_press(input),
            PointerPhase::Moved => self.on_move(input),
            PointerPhase::Released => self.on_release(input),
            PointerPhase::DoubleClicked => self.on_double_click(input),
        }
    }

    /// Process a wheel event; positive delta zooms in
    pub fn process_wheel(&mut self, delta: f32) -> bool {
        if delta > 0.0 {
            self.pending.push(InputIntent::ZoomIn);
        } else {
            self.pending.push(InputIntent::ZoomOut);
        }
        true
    }

    fn on_press(&mut self, input: &PointerInput) -> bool {
        if self.interaction != PointerInteraction::Idle {
            tracing::trace!("pointer press ignored: interaction already active");
            return false;
        }

        match input.button {
            Some(PointerButton::Secondary) => {
                self.interaction = PointerInteraction::Windowing;
                self.last_pointer_pos = input.pos;
                self.pending.push(InputIntent::WindowingStart(input.pos));
                true
            }
            Some(PointerButton::Middle) => {
                self.interaction = PointerInteraction::Panning;
                self.last_pointer_pos = input.pos;
                self.pending.push(InputIntent::PanStart(input.pos));
                true
            }
            _ => false,
        }
    }

    fn on_move(&mut self, input: &PointerInput) -> bool {
        match self.interaction {
            PointerInteraction::Windowing => {
                self.pending.push(InputIntent::WindowingUpdate(input.pos));
                self.last_pointer_pos = input.pos;
                true
            }
            PointerInteraction::Panning => {
                self.pending.push(InputIntent::PanUpdate(input.pos));
                self.last_pointer_pos = input.pos;
                true
            }
            PointerInteraction::Idle => false,
        }
    }

    fn on_release(&mut self, input: &PointerInput) -> bool {
        match (self.interaction, input.button) {
            (PointerInteraction::Windowing, Some(PointerButton::Secondary)) => {
                self.interaction = PointerInteraction::Idle;
                self.pending.push(InputIntent::WindowingEnd);
                true
            }
            (PointerInteraction::Panning, Some(PointerButton::Middle)) => {
                self.interaction = PointerInteraction::Idle;
                self.pending.push(InputIntent::PanEnd);
                true
            }
            _ => false,
        }
    }

    fn on_double_click(&mut self, input: &PointerInput) -> bool {
        match input.button {
            Some(PointerButton::Primary) => {
                self.pending.push(InputIntent::FitToWindow);
                true
            }
            Some(PointerButton::Secondary) => {
                self.pending.push(InputIntent::ResetWindowing);
                true
            }
            _ => false,
        }
    }
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::ViewerAction;
    use egui::Key;

    fn press(button: PointerButton, pos: Pos2) -> PointerInput {
        PointerInput {
            phase: PointerPhase::Pressed,
            button: Some(button),
            pos,
        }
    }

    fn release(button: PointerButton, pos: Pos2) -> PointerInput {
        PointerInput {
            phase: PointerPhase::Released,
            button: Some(button),
            pos,
        }
    }

    fn moved(pos: Pos2) -> PointerInput {
        PointerInput {
            phase: PointerPhase::Moved,
            button: None,
            pos,
        }
    }

    #[test]
    fn test_bound_gesture_fires_in_any_context() {
        let mut dispatcher = InputDispatcher::new();
        // Ctrl+H is bound context-free by default; no Image context active.
        let handled = dispatcher.process_key(&KeyInput {
            key: Key::H,
            modifiers: Modifiers::CTRL,
        });
        assert!(handled);
        assert_eq!(
            dispatcher.take_intents(),
            vec![InputIntent::HorizontalFlip]
        );
    }

    #[test]
    fn test_context_gated_binding_requires_context() {
        let mut dispatcher = InputDispatcher::new();
        dispatcher.bindings_mut().bind_in_context(
            ViewerAction::NextSeries,
            KeyGesture::plain(Key::N),
            Some(InputContext::Tree),
        );

        assert!(!dispatcher.process_key(&KeyInput::plain(Key::N)));

        dispatcher.contexts_mut().add(InputContext::Tree);
        assert!(dispatcher.process_key(&KeyInput::plain(Key::N)));
        assert_eq!(dispatcher.take_intents(), vec![InputIntent::NextSeries]);
    }

    #[test]
    fn test_space_requires_playback_or_image_context() {
        let mut dispatcher = InputDispatcher::new();
        assert!(!dispatcher.process_key(&KeyInput::plain(Key::Space)));

        dispatcher.contexts_mut().add(InputContext::Image);
        assert!(dispatcher.process_key(&KeyInput::plain(Key::Space)));
        assert_eq!(dispatcher.take_intents(), vec![InputIntent::PlayPause]);
    }

    #[test]
    fn test_tree_context_arrow_keys() {
        let mut dispatcher = InputDispatcher::new();
        // Default table binds ArrowUp to PreviousImage context-free, so
        // unbind it to exercise the convenience path.
        dispatcher.bindings_mut().unbind(ViewerAction::PreviousImage);

        assert!(!dispatcher.process_key(&KeyInput::plain(Key::ArrowUp)));

        dispatcher.contexts_mut().add(InputContext::Tree);
        assert!(dispatcher.process_key(&KeyInput::plain(Key::ArrowUp)));
        assert_eq!(dispatcher.take_intents(), vec![InputIntent::PreviousImage]);
    }

    #[test]
    fn test_windowing_drag_lifecycle() {
        let mut dispatcher = InputDispatcher::new();
        let start = Pos2::new(10.0, 10.0);
        let mid = Pos2::new(20.0, 15.0);

        assert!(dispatcher.process_pointer(&press(PointerButton::Secondary, start)));
        assert!(dispatcher.process_pointer(&moved(mid)));
        assert!(dispatcher.process_pointer(&release(PointerButton::Secondary, mid)));

        assert_eq!(
            dispatcher.take_intents(),
            vec![
                InputIntent::WindowingStart(start),
                InputIntent::WindowingUpdate(mid),
                InputIntent::WindowingEnd,
            ]
        );
    }

    #[test]
    fn test_windowing_and_panning_exclusive() {
        let mut dispatcher = InputDispatcher::new();
        let pos = Pos2::new(5.0, 5.0);

        assert!(dispatcher.process_pointer(&press(PointerButton::Secondary, pos)));
        // Middle press while windowing is active must be ignored.
        assert!(!dispatcher.process_pointer(&press(PointerButton::Middle, pos)));

        dispatcher.take_intents();
        assert!(dispatcher.process_pointer(&moved(pos)));
        assert_eq!(
            dispatcher.take_intents(),
            vec![InputIntent::WindowingUpdate(pos)]
        );
    }

    #[test]
    fn test_move_without_drag_unhandled() {
        let mut dispatcher = InputDispatcher::new();
        assert!(!dispatcher.process_pointer(&moved(Pos2::new(1.0, 1.0))));
        assert!(dispatcher.take_intents().is_empty());
    }

    #[test]
    fn test_double_click_shortcuts() {
        let mut dispatcher = InputDispatcher::new();
        let pos = Pos2::ZERO;

        assert!(dispatcher.process_pointer(&PointerInput {
            phase: PointerPhase::DoubleClicked,
            button: Some(PointerButton::Primary),
            pos,
        }));
        assert!(dispatcher.process_pointer(&PointerInput {
            phase: PointerPhase::DoubleClicked,
            button: Some(PointerButton::Secondary),
            pos,
        }));
        assert_eq!(
            dispatcher.take_intents(),
            vec![InputIntent::FitToWindow, InputIntent::ResetWindowing]
        );
    }

    #[test]
    fn test_wheel_always_handled() {
        let mut dispatcher = InputDispatcher::new();
        assert!(dispatcher.process_wheel(1.5));
        assert!(dispatcher.process_wheel(-0.5));
        assert_eq!(
            dispatcher.take_intents(),
            vec![InputIntent::ZoomIn, InputIntent::ZoomOut]
        );
    }
}
