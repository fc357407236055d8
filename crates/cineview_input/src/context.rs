// SPDX-License-Identifier: MIT OR Apache-2.0
//! Input contexts and the active-context set.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A region of the viewer UI that input can be scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputContext {
    /// Always active, cannot be removed
    Global,
    /// The image viewport has focus
    Image,
    /// The study/series tree has focus
    Tree,
    /// The playback transport has focus
    Playback,
}

/// Set of currently active input contexts
///
/// [`InputContext::Global`] is always a member; attempts to remove it are
/// ignored.
#[derive(Debug, Clone)]
pub struct ContextSet {
    active: HashSet<InputContext>,
}

impl ContextSet {
    /// Create a set containing only the global context
    pub fn new() -> Self {
        let mut active = HashSet::new();
        active.insert(InputContext::Global);
        Self { active }
    }

    /// Replace the focused context, keeping only it and `Global` active
    pub fn set_focus(&mut self, context: InputContext) {
        self.active.clear();
        self.active.insert(InputContext::Global);
        self.active.insert(context);
    }

    /// Activate an additional context
    pub fn add(&mut self, context: InputContext) {
        self.active.insert(context);
    }

    /// Deactivate a context (no-op for `Global`)
    pub fn remove(&mut self, context: InputContext) {
        if context != InputContext::Global {
            self.active.remove(&context);
        }
    }

    /// Is the context currently active?
    pub fn contains(&self, context: InputContext) -> bool {
        self.active.contains(&context)
    }

    /// Are any of the given contexts active?
    pub fn contains_any(&self, contexts: &[InputContext]) -> bool {
        contexts.iter().any(|c| self.active.contains(c))
    }
}

impl Default for ContextSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_always_active() {
        let mut set = ContextSet::new();
        assert!(set.contains(InputContext::Global));
        set.remove(InputContext::Global);
        assert!(set.contains(InputContext::Global));
    }

    #[test]
    fn test_set_focus_replaces_previous() {
        let mut set = ContextSet::new();
        set.set_focus(InputContext::Tree);
        assert!(set.contains(InputContext::Tree));

        set.set_focus(InputContext::Image);
        assert!(set.contains(InputContext::Image));
        assert!(!set.contains(InputContext::Tree));
        assert!(set.contains(InputContext::Global));
    }

    #[test]
    fn test_add_and_remove() {
        let mut set = ContextSet::new();
        set.add(InputContext::Playback);
        set.add(InputContext::Image);
        assert!(set.contains_any(&[InputContext::Playback, InputContext::Tree]));

        set.remove(InputContext::Playback);
        assert!(!set.contains(InputContext::Playback));
        assert!(set.contains(InputContext::Image));
    }
}
