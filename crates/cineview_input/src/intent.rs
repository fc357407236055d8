// SPDX-License-Identifier: MIT OR Apache-2.0
//! Semantic intents emitted by the dispatcher.

use egui::Pos2;

/// A semantic viewer command produced from raw input
///
/// Consumed by the viewer/renderer layer; the dispatcher never interprets
/// these itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputIntent {
    // Playback transport
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

    // Study navigation
    /// Select the next image in the series
    NextImage,
    /// Select the previous image in the series
    PreviousImage,
    /// Select the next series
    NextSeries,
    /// Select the previous series
    PreviousSeries,

    // Image transforms
    /// Mirror the image horizontally
    HorizontalFlip,
    /// Mirror the image vertically
    VerticalFlip,
    /// Invert the image lookup table
    InvertImage,
    /// Reset all transforms, zoom and window/level
    ResetAll,

    // Zoom and windowing
    /// Zoom in one step
    ZoomIn,
    /// Zoom out one step
    ZoomOut,
    /// Fit the image to the viewport
    FitToWindow,
    /// Reset window/level to the image defaults
    ResetWindowing,

    // Pointer drags
    /// Begin a window/level drag at the given position
    WindowingStart(Pos2),
    /// Window/level drag moved
    WindowingUpdate(Pos2),
    /// Window/level drag finished
    WindowingEnd,
    /// Begin a pan drag at the given position
    PanStart(Pos2),
    /// Pan drag moved
    PanUpdate(Pos2),
    /// Pan drag finished
    PanEnd,
}
