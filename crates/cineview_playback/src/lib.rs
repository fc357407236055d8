// SPDX-License-Identifier: MIT OR Apache-2.0
//! Multiframe (cine) playback for CineView.
//!
//! This crate sequences multiframe image series for timed playback:
//! - Finite-state transport (play/pause/stop/seek) with loop control
//! - Tick-driven frame advancement with stall-on-underrun
//! - Auto-play policies for progressively loaded series
//! - Frame-count-derived default frame rates
//! - A transport-bar widget
//!
//! ## Architecture
//!
//! The sequencer is a plain value mutated on the UI thread. The host calls
//! [`PlaybackSequencer::tick`] once per UI frame with the current instant;
//! semantic events accumulate in an internal queue drained with
//! [`PlaybackSequencer::take_events`].

pub mod event;
pub mod sequencer;
pub mod state;
pub mod timer;
pub mod ui;

pub use event::PlaybackEvent;
pub use sequencer::{PlaybackSequencer, DEFAULT_FPS, MAX_FPS, MIN_FPS};
pub use state::{AutoPlayPolicy, NavigationMode, PlaybackState};
pub use timer::CineTimer;
pub use ui::TransportPanel;
