// SPDX-License-Identifier: MIT OR Apache-2.0
//! Progressive background loading.
//!
//! A [`ProgressiveLoader`] owns one worker thread that decodes frames in
//! sequence order and streams progress over a channel. The host drains
//! events with [`ProgressiveLoader::poll`] on the UI thread and fans them
//! out to the frame cache and the playback sequencer. Stopping is a
//! synchronous flag-set plus join; dropping the loader stops it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;
use thiserror::Error;

/// Error decoding a single frame
#[derive(Debug, Error)]
pub enum FrameDecodeError {
    /// The frame index is outside the sequence
    #[error("frame {index} out of range (sequence has {total} frames)")]
    OutOfRange {
        /// Requested frame
        index: usize,
        /// Frames in the sequence
        total: usize,
    },
    /// The pixel data could not be decoded
    #[error("failed to decode frame {index}: {reason}")]
    Decode {
        /// Frame that failed
        index: usize,
        /// Decoder-specific description
        reason: String,
    },
}

/// Contract with the external pixel decoder
///
/// Implementations decode one frame at a time; the loader never asks for
/// indices at or beyond [`frame_count`](Self::frame_count).
pub trait FrameDecoder: Send + 'static {
    /// Decoded frame payload
    type Frame: Send + 'static;

    /// Number of frames in the sequence
    fn frame_count(&self) -> usize;

    /// Decode a single frame
    fn decode_frame(&mut self, index: usize) -> Result<Self::Frame, FrameDecodeError>;
}

/// Progress streamed from the loader thread
#[derive(Debug)]
pub enum LoadEvent<T> {
    /// Decoding began
    Started {
        /// Frames the sequence holds
        total: usize,
    },
    /// A frame was decoded
    FrameReady {
        /// Frame index
        index: usize,
        /// The decoded payload
        frame: T,
    },
    /// A frame failed to decode; the sequence is aborted
    Failed {
        /// Frame that failed
        index: usize,
        /// Error description
        message: String,
    },
    /// The whole sequence was decoded
    Finished {
        /// Frames decoded
        total: usize,
    },
}

/// Background decoder for a multiframe sequence
pub struct ProgressiveLoader<D: FrameDecoder> {
    events: Receiver<LoadEvent<D::Frame>>,
    stop_flag: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl<D: FrameDecoder> ProgressiveLoader<D> {
    /// Start decoding the sequence on a background thread
    pub fn start(mut decoder: D) -> Self {
        let (tx, rx) = mpsc::channel();
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stop = Arc::clone(&stop_flag);

        let worker = std::thread::spawn(move || {
            let total = decoder.frame_count();
            tracing::debug!(total, "progressive load started");
            if tx.send(LoadEvent::Started { total }).is_err() {
                return;
            }

            for index in 0..total {
                if stop.load(Ordering::Relaxed) {
                    tracing::debug!(index, "progressive load stopped");
                    return;
                }

                match decoder.decode_frame(index) {
                    Ok(frame) => {
                        if tx.send(LoadEvent::FrameReady { index, frame }).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(index, %err, "frame decode failed, aborting sequence");
                        let _ = tx.send(LoadEvent::Failed {
                            index,
                            message: err.to_string(),
                        });
                        return;
                    }
                }
            }

            if !stop.load(Ordering::Relaxed) {
                let _ = tx.send(LoadEvent::Finished { total });
            }
        });

        Self {
            events: rx,
            stop_flag,
            worker: Some(worker),
        }
    }

    /// Drain all events produced so far without blocking
    pub fn poll(&mut self) -> Vec<LoadEvent<D::Frame>> {
        let mut events = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        events
    }

    /// Stop decoding and wait for the worker to exit
    ///
    /// Events already produced remain pollable.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }

    /// Has the worker thread exited?
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl<D: FrameDecoder> Drop for ProgressiveLoader<D> {
    fn drop(&mut self) {
        self.stop();
    }
}
