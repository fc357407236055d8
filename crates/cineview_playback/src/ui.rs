// SPDX-License-Identifier: MIT OR Apache-2.0
//! Transport-bar widget.
//!
//! Features:
//! - Play/pause toggle, stop, frame stepping, first/last
//! - Frame scrubber
//! - Speed control and loop toggle
//! - Loading progress readout
//!
//! A pure view over [`PlaybackSequencer`]: every control routes through
//! the public transport operations, so host-side event handling stays
//! identical whether a command came from a key, a menu or this bar.

use crate::sequencer::{PlaybackSequencer, MAX_FPS, MIN_FPS};
use crate::state::PlaybackState;

/// The playback transport bar
pub struct TransportPanel {
    /// Show the loading progress readout while frames stream in
    pub show_progress: bool,
}

impl TransportPanel {
    /// Create a transport bar with default options
    pub fn new() -> Self {
        Self {
            show_progress: true,
        }
    }

    /// Render the transport bar
    pub fn ui(&mut self, ui: &mut egui::Ui, sequencer: &mut PlaybackSequencer) {
        ui.horizontal(|ui| {
            let multiframe = sequencer.is_multiframe();

            if ui
                .add_enabled(multiframe, egui::Button::new("⏮"))
                .on_hover_text("First frame (Home)")
                .clicked()
            {
                sequencer.go_to_first_frame();
            }

            if ui
                .add_enabled(multiframe, egui::Button::new("◀"))
                .on_hover_text("Previous frame (Left)")
                .clicked()
            {
                sequencer.previous_frame();
            }

            let play_icon = if sequencer.is_playing() { "⏸" } else { "▶" };
            if ui
                .add_enabled(multiframe, egui::Button::new(play_icon))
                .on_hover_text("Play/Pause (Space)")
                .clicked()
            {
                sequencer.toggle_playback();
            }

            if ui
                .add_enabled(multiframe, egui::Button::new("⏹"))
                .on_hover_text("Stop")
                .clicked()
            {
                sequencer.stop();
            }

            if ui
                .add_enabled(multiframe, egui::Button::new("▶|"))
                .on_hover_text("Next frame (Right)")
                .clicked()
            {
                sequencer.next_frame();
            }

            if ui
                .add_enabled(multiframe, egui::Button::new("⏭"))
                .on_hover_text("Last frame (End)")
                .clicked()
            {
                sequencer.go_to_last_frame();
            }

            ui.separator();

            // Scrubber
            if multiframe {
                let total = sequencer.total_frames();
                let mut frame = sequencer.current_frame();
                let slider = egui::Slider::new(&mut frame, 0..=total - 1)
                    .show_value(false)
                    .text("");
                if ui.add(slider).changed() {
                    sequencer.seek_to_frame(frame);
                }
                ui.monospace(format!("{}/{}", sequencer.current_frame() + 1, total));
            } else {
                ui.monospace("1/1");
            }

            ui.separator();

            // Speed
            let mut fps = sequencer.playback_speed();
            let drag = egui::DragValue::new(&mut fps)
                .range(MIN_FPS..=MAX_FPS)
                .speed(0.5)
                .suffix(" fps");
            if ui.add(drag).on_hover_text("Playback speed").changed() {
                sequencer.set_playback_speed(fps);
            }

            let mut looping = sequencer.loop_enabled();
            if ui.checkbox(&mut looping, "Loop").changed() {
                sequencer.set_loop_playback(looping);
            }

            // Progress readout while the loader is still working
            if self.show_progress && sequencer.state() == PlaybackState::Loading {
                ui.separator();
                ui.weak(format!(
                    "loading {}/{}",
                    sequencer.loaded_frames(),
                    sequencer.total_frames()
                ));
            }
        });
    }
}

impl Default for TransportPanel {
    fn default() -> Self {
        Self::new()
    }
}
