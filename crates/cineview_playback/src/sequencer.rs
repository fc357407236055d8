// SPDX-License-Identifier: MIT OR Apache-2.0
//! The playback sequencer.
//!
//! A finite-state transport over a multiframe series. Invalid runtime
//! inputs (out-of-range indices, empty sequences, non-finite speeds) are
//! silently ignored; every such rejection is visible at `trace` level for
//! hosts that install a tracing subscriber.

use crate::event::PlaybackEvent;
use crate::state::{AutoPlayPolicy, NavigationMode, PlaybackState};
use crate::timer::CineTimer;
use std::time::{Duration, Instant};

/// Library default playback speed in frames per second
pub const DEFAULT_FPS: f32 = 15.0;
/// Lowest accepted playback speed
pub const MIN_FPS: f32 = 0.5;
/// Highest accepted playback speed
pub const MAX_FPS: f32 = 60.0;

/// Speed changes smaller than this are ignored
const FPS_EPSILON: f32 = 0.01;

/// Drives frame advancement for a multiframe (cine) series
///
/// All mutation happens through `&mut self` on the UI thread. The host
/// calls [`tick`](Self::tick) once per UI frame and drains
/// [`take_events`](Self::take_events) afterwards.
pub struct PlaybackSequencer {
    state: PlaybackState,
    navigation_mode: NavigationMode,
    auto_play_policy: AutoPlayPolicy,
    current_frame: usize,
    total_frames: usize,
    loaded_frames: usize,
    loop_playback: bool,
    speed_fps: f32,
    default_fps: Option<f32>,
    timer: CineTimer,
    pending: Vec<PlaybackEvent>,
}

impl PlaybackSequencer {
    /// Create a sequencer with no frames, stopped, at the default speed
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Stopped,
            navigation_mode: NavigationMode::Manual,
            auto_play_policy: AutoPlayPolicy::default(),
            current_frame: 0,
            total_frames: 0,
            loaded_frames: 0,
            loop_playback: true,
            speed_fps: DEFAULT_FPS,
            default_fps: None,
            timer: CineTimer::new(interval_for_fps(DEFAULT_FPS)),
            pending: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Transport

    /// Start timer-driven playback
    ///
    /// No-op on single-frame sequences and while already playing. From
    /// `Loading`, requires at least one decoded frame.
    pub fn play(&mut self) {
        if self.total_frames <= 1 {
            tracing::trace!(total = self.total_frames, "play ignored: not multiframe");
            return;
        }
        if self.state == PlaybackState::Playing {
            return;
        }
        if self.state == PlaybackState::Loading && self.loaded_frames == 0 {
            tracing::trace!("play ignored: no frames decoded yet");
            return;
        }

        self.timer.start();
        self.change_state(PlaybackState::Playing);
        self.navigation_mode = NavigationMode::Automatic;
        self.pending.push(PlaybackEvent::StartRequested);
        // Sync the display to the cursor at start.
        self.pending.push(PlaybackEvent::FrameRequested {
            frame: self.current_frame,
        });
    }

    /// Pause playback, keeping the cursor position
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.timer.stop();
        self.change_state(PlaybackState::Paused);
        self.navigation_mode = NavigationMode::Manual;
    }

    /// Stop playback and rewind to the first frame
    pub fn stop(&mut self) {
        self.timer.stop();
        self.change_state(PlaybackState::Stopped);
        self.navigation_mode = NavigationMode::Manual;

        if self.current_frame != 0 {
            self.current_frame = 0;
            self.emit_frame_changed();
            self.pending.push(PlaybackEvent::FrameRequested { frame: 0 });
        }

        self.pending.push(PlaybackEvent::StopRequested);
    }

    /// Toggle between playing and paused
    pub fn toggle_playback(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused | PlaybackState::Ready | PlaybackState::Stopped => self.play(),
            PlaybackState::Loading => {}
        }
    }

    // ------------------------------------------------------------------
    // Manual navigation

    /// Step to the next frame, wrapping at the end
    pub fn next_frame(&mut self) {
        if self.total_frames <= 1 {
            return;
        }
        // Manual navigation always interrupts automatic playback.
        self.interrupt_playback();

        let target = (self.current_frame + 1) % self.total_frames;
        self.navigate_to(target);
    }

    /// Step to the previous frame, wrapping at the start
    pub fn previous_frame(&mut self) {
        if self.total_frames <= 1 {
            return;
        }
        self.interrupt_playback();

        let target = (self.current_frame + self.total_frames - 1) % self.total_frames;
        self.navigate_to(target);
    }

    /// Jump to an arbitrary frame
    pub fn seek_to_frame(&mut self, frame: usize) {
        if frame >= self.total_frames {
            tracing::trace!(frame, total = self.total_frames, "seek ignored: out of range");
            return;
        }
        self.interrupt_playback();
        self.navigate_to(frame);
    }

    /// Jump to the first frame
    pub fn go_to_first_frame(&mut self) {
        self.seek_to_frame(0);
    }

    /// Jump to the last frame
    pub fn go_to_last_frame(&mut self) {
        if self.total_frames > 0 {
            self.seek_to_frame(self.total_frames - 1);
        }
    }

    /// Sync the cursor from an external source without touching playback
    pub fn set_current_frame(&mut self, frame: usize) {
        if frame >= self.total_frames {
            tracing::trace!(frame, "set_current_frame ignored: out of range");
            return;
        }
        self.current_frame = frame;
        self.emit_frame_changed();
        self.pending.push(PlaybackEvent::FrameRequested { frame });
    }

    // ------------------------------------------------------------------
    // Loading intake

    /// Declare a new sequence length, resetting the cursor and progress
    pub fn set_total_frames(&mut self, total: usize) {
        self.total_frames = total;
        self.current_frame = 0;
        self.loaded_frames = 0;

        self.apply_optimal_frame_rate();

        if total <= 1 {
            self.change_state(PlaybackState::Ready);
        } else {
            self.change_state(PlaybackState::Loading);
        }

        self.pending.push(PlaybackEvent::FrameChanged {
            frame: 0,
            total,
        });
    }

    /// A frame finished decoding
    ///
    /// Raises the loaded high-water mark and, under
    /// [`AutoPlayPolicy::OnFirstFrame`], starts playback as soon as frame 0
    /// of a multiframe sequence arrives.
    pub fn on_frame_ready(&mut self, frame: usize) {
        if frame >= self.total_frames {
            tracing::trace!(frame, "frame-ready ignored: out of range");
            return;
        }
        self.loaded_frames = self.loaded_frames.max(frame + 1);

        if frame == 0
            && self.auto_play_policy == AutoPlayPolicy::OnFirstFrame
            && self.total_frames > 1
            && self.state == PlaybackState::Loading
        {
            self.play();
        }

        self.pending.push(PlaybackEvent::LoadingProgress {
            loaded: self.loaded_frames,
            total: self.total_frames,
        });
    }

    /// The whole sequence finished decoding
    pub fn on_all_frames_loaded(&mut self) {
        self.loaded_frames = self.total_frames;

        if self.total_frames <= 1 {
            self.change_state(PlaybackState::Ready);
        } else if self.state == PlaybackState::Loading {
            self.change_state(PlaybackState::Ready);
            if self.auto_play_policy == AutoPlayPolicy::OnAllFramesLoaded {
                self.play();
            }
        }

        self.pending.push(PlaybackEvent::AllFramesReady);
    }

    /// Progressive decoding of a new sequence began
    pub fn on_loading_started(&mut self, total: usize) {
        self.set_total_frames(total);
        self.change_state(PlaybackState::Loading);
    }

    /// Drop the current sequence entirely (new series selected)
    pub fn clear_frames(&mut self) {
        self.timer.stop();
        self.change_state(PlaybackState::Stopped);
        self.navigation_mode = NavigationMode::Manual;
        self.current_frame = 0;
        self.total_frames = 0;
        self.loaded_frames = 0;
    }

    // ------------------------------------------------------------------
    // Timing

    /// Advance playback if the frame interval has elapsed
    ///
    /// Call once per UI frame. Reaching the end with looping disabled
    /// pauses; reaching a frame the loader has not produced yet pauses
    /// without moving the cursor (stall-on-underrun).
    pub fn tick(&mut self, now: Instant) {
        if self.state != PlaybackState::Playing || self.total_frames <= 1 {
            return;
        }
        if !self.timer.fire(now) {
            return;
        }

        let mut next = self.current_frame + 1;
        if next >= self.total_frames {
            if self.loop_playback {
                next = 0;
            } else {
                // End of sequence.
                self.timer.stop();
                self.change_state(PlaybackState::Paused);
                self.navigation_mode = NavigationMode::Manual;
                return;
            }
        }

        if self.can_navigate_to_frame(next) {
            self.current_frame = next;
            self.emit_frame_changed();
            self.pending.push(PlaybackEvent::FrameRequested { frame: next });
        } else {
            // Underrun: the decoder has not caught up. Stall rather than skip.
            tracing::trace!(next, loaded = self.loaded_frames, "playback stalled on underrun");
            self.timer.stop();
            self.change_state(PlaybackState::Paused);
            self.navigation_mode = NavigationMode::Manual;
        }
    }

    /// Set the playback speed in frames per second
    ///
    /// Clamped to `[MIN_FPS, MAX_FPS]`; sub-epsilon changes are ignored. A
    /// running timer picks up the new interval immediately.
    pub fn set_playback_speed(&mut self, fps: f32) {
        if !fps.is_finite() {
            tracing::trace!(fps, "speed ignored: not finite");
            return;
        }
        let fps = fps.clamp(MIN_FPS, MAX_FPS);
        if (fps - self.speed_fps).abs() < FPS_EPSILON {
            return;
        }

        self.speed_fps = fps;
        self.timer.set_interval(interval_for_fps(fps));
        tracing::debug!(fps, "playback speed changed");
        self.pending.push(PlaybackEvent::SpeedChanged { fps });
    }

    /// Set the speed via a frame interval in milliseconds
    pub fn set_frame_interval(&mut self, millis: u64) {
        if millis > 0 {
            self.set_playback_speed(1000.0 / millis as f32);
        }
    }

    /// Record a metadata-recommended speed (e.g. DICOM Frame Time)
    pub fn set_default_speed(&mut self, fps: f32) {
        if fps.is_finite() && fps > 0.0 {
            self.default_fps = Some(fps);
        }
    }

    /// Return to the metadata-recommended speed, or the library default
    pub fn reset_to_default_speed(&mut self) {
        self.set_playback_speed(self.default_fps.unwrap_or(DEFAULT_FPS));
    }

    // ------------------------------------------------------------------
    // Queries

    /// Can the cursor move to `frame` right now?
    ///
    /// Once the sequence is fully decoded every in-range frame is
    /// reachable; while frames are still arriving, only frames up to the
    /// loaded high-water mark (inclusive) are.
    pub fn can_navigate_to_frame(&self, frame: usize) -> bool {
        frame < self.total_frames
            && (self.loaded_frames >= self.total_frames || frame <= self.loaded_frames)
    }

    /// Current transport state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current navigation mode
    pub fn navigation_mode(&self) -> NavigationMode {
        self.navigation_mode
    }

    /// Cursor position (0-indexed)
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Total frames in the sequence
    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    /// Loaded high-water mark
    pub fn loaded_frames(&self) -> usize {
        self.loaded_frames
    }

    /// Effective playback speed in frames per second
    pub fn playback_speed(&self) -> f32 {
        self.speed_fps
    }

    /// Interval between frame advances
    pub fn frame_interval(&self) -> Duration {
        self.timer.interval()
    }

    /// Is the transport playing?
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Is the transport paused?
    pub fn is_paused(&self) -> bool {
        self.state == PlaybackState::Paused
    }

    /// Does the sequencer hold any frames?
    pub fn has_frames(&self) -> bool {
        self.total_frames > 0
    }

    /// Is this a playable multiframe sequence?
    pub fn is_multiframe(&self) -> bool {
        self.total_frames > 1
    }

    /// Is loop playback enabled?
    pub fn loop_enabled(&self) -> bool {
        self.loop_playback
    }

    /// Enable or disable wrapping at the end of the sequence
    pub fn set_loop_playback(&mut self, enabled: bool) {
        self.loop_playback = enabled;
    }

    /// Current auto-play policy
    pub fn auto_play_policy(&self) -> AutoPlayPolicy {
        self.auto_play_policy
    }

    /// Set the auto-play policy
    pub fn set_auto_play_policy(&mut self, policy: AutoPlayPolicy) {
        self.auto_play_policy = policy;
    }

    /// Drain all events produced since the last call
    pub fn take_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending)
    }

    // ------------------------------------------------------------------
    // Internal

    fn change_state(&mut self, new: PlaybackState) {
        if new != self.state {
            let old = self.state;
            self.state = new;
            tracing::debug!(?old, ?new, "playback state changed");
            self.pending.push(PlaybackEvent::StateChanged { old, new });
        }
    }

    /// Pause if playing; used before any manual navigation
    fn interrupt_playback(&mut self) {
        if self.state == PlaybackState::Playing {
            self.timer.stop();
            self.change_state(PlaybackState::Paused);
            self.navigation_mode = NavigationMode::Manual;
        }
    }

    fn navigate_to(&mut self, frame: usize) {
        if self.can_navigate_to_frame(frame) {
            self.current_frame = frame;
            self.emit_frame_changed();
            self.pending.push(PlaybackEvent::FrameRequested { frame });
        } else {
            tracing::trace!(frame, loaded = self.loaded_frames, "navigation ignored: frame not available");
        }
    }

    fn emit_frame_changed(&mut self) {
        self.pending.push(PlaybackEvent::FrameChanged {
            frame: self.current_frame,
            total: self.total_frames,
        });
    }

    /// Pick a sensible frame rate from the sequence length
    ///
    /// Never overrides a speed the user changed away from the library
    /// default.
    fn apply_optimal_frame_rate(&mut self) {
        let optimal = if self.total_frames > 100 {
            30.0
        } else if self.total_frames > 50 {
            25.0
        } else {
            15.0
        };

        if (self.speed_fps - DEFAULT_FPS).abs() < FPS_EPSILON {
            self.set_playback_speed(optimal);
        }
    }
}

impl Default for PlaybackSequencer {
    fn default() -> Self {
        Self::new()
    }
}

fn interval_for_fps(fps: f32) -> Duration {
    Duration::from_millis((1000.0 / fps).round() as u64)
}
