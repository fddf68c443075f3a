//! Capability seams around the drawing core and the frame loop that ties
//! them together. The camera, the landmark detector and the display are
//! swappable, so the gesture/canvas logic runs against scripted inputs in
//! tests exactly as it runs against hardware.

#[cfg(feature = "camera-nokhwa")]
pub mod camera;
pub mod detector;
#[cfg(feature = "camera-nokhwa")]
pub mod rgba;
#[cfg(feature = "display-minifb")]
pub mod window;

use std::time::Instant;

use crate::error::PaintError;
use crate::session::PaintSession;
use crate::types::{Frame, HandLandmarks};

/// Supplies mirrored RGBA frames. `Ok(None)` means the source is cleanly
/// exhausted; an error means acquisition failed and the loop must stop.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, PaintError>;
}

/// The external hand-landmark detector. `Ok(None)` — no hand this frame —
/// is the common case, not an error.
pub trait HandTracker {
    fn detect(&mut self, frame: &Frame) -> Result<Option<HandLandmarks>, PaintError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkStatus {
    Continue,
    /// The user asked to quit (key press or window close).
    Stop,
}

/// Receives composited frames and reports the quit signal.
pub trait FrameSink {
    fn present(&mut self, frame: &Frame) -> Result<SinkStatus, PaintError>;
}

/// The synchronous frame loop: acquire, detect, dispatch, composite,
/// present, repeat. One frame is the unit of work; nothing suspends
/// mid-tick.
pub fn run(
    source: &mut dyn FrameSource,
    tracker: &mut dyn HandTracker,
    sink: &mut dyn FrameSink,
    session: &mut PaintSession,
) -> Result<(), PaintError> {
    loop {
        let mut frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                log::info!("frame source exhausted, stopping");
                return Ok(());
            }
            Err(err) => {
                log::error!("frame acquisition failed: {err}");
                return Err(err);
            }
        };

        // A detector failure costs this frame its gesture logic, nothing
        // more; the canvas still composites.
        let hand = match tracker.detect(&frame) {
            Ok(hand) => hand,
            Err(err) => {
                log::warn!("hand detection failed: {err}");
                None
            }
        };

        let report = session.process(&mut frame, hand.as_ref(), Instant::now())?;
        if let Some(mode) = report.mode {
            log::trace!("dispatched mode: {}", mode.label());
        }

        if sink.present(&frame)? == SinkStatus::Stop {
            log::info!("quit requested, stopping");
            return Ok(());
        }
    }
}
