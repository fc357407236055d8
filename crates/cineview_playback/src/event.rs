// SPDX-License-Identifier: MIT OR Apache-2.0
//! Events emitted by the sequencer.

use crate::state::PlaybackState;

/// A semantic playback event for the loading/rendering subsystem
///
/// Drained from the sequencer with
/// [`take_events`](crate::PlaybackSequencer::take_events).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    /// The transport state changed
    StateChanged {
        /// Previous state
        old: PlaybackState,
        /// New state
        new: PlaybackState,
    },
    /// The frame cursor moved
    FrameChanged {
        /// New cursor position
        frame: usize,
        /// Total frames in the sequence
        total: usize,
    },
    /// The frame at `frame` should be displayed
    FrameRequested {
        /// Frame to display
        frame: usize,
    },
    /// The effective playback speed changed
    SpeedChanged {
        /// New speed in frames per second
        fps: f32,
    },
    /// Decode progress advanced
    LoadingProgress {
        /// Frames confirmed available from the start of the sequence
        loaded: usize,
        /// Total frames in the sequence
        total: usize,
    },
    /// The whole sequence is decoded
    AllFramesReady,
    /// Playback was started
    StartRequested,
    /// Playback was stopped
    StopRequested,
}
