// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback state enums.

use serde::{Deserialize, Serialize};

/// Transport state of the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No playback; cursor at rest
    #[default]
    Stopped,
    /// Frames are still being decoded
    Loading,
    /// All navigable frames are available
    Ready,
    /// Timer-driven advancement is active
    Playing,
    /// Playback interrupted, cursor keeps its position
    Paused,
}

/// How the frame cursor is currently being driven
///
/// Derived from transport transitions; not independently settable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationMode {
    /// User-driven stepping and seeking
    #[default]
    Manual,
    /// Timer-driven playback
    Automatic,
}

/// When playback should start on its own as frames become available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AutoPlayPolicy {
    /// Never start automatically
    #[default]
    Never,
    /// Start as soon as the first frame is decoded
    OnFirstFrame,
    /// Start once the whole sequence is decoded
    OnAllFramesLoaded,
}
