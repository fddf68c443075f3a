use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Instant,
};

use crossbeam_channel::{Receiver, Sender, bounded};
use nokhwa::{
    Camera,
    utils::{CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution},
};

use super::{FrameSource, rgba};
use crate::error::PaintError;
use crate::types::Frame;

// Prefer pixel formats that are widely supported; built-in cameras often
// reject YUYV even though the backend reports it.
const PREFERRED_PIXEL_FORMATS: &[FrameFormat] = &[
    FrameFormat::RAWRGB,
    FrameFormat::RAWBGR,
    FrameFormat::YUYV,
    FrameFormat::NV12,
    FrameFormat::MJPEG,
];

fn requested_formats(width: u32, height: u32) -> [RequestedFormat<'static>; 3] {
    let wanted = CameraFormat::new(Resolution::new(width, height), FrameFormat::MJPEG, 30);
    [
        RequestedFormat::with_formats(RequestedFormatType::Closest(wanted), PREFERRED_PIXEL_FORMATS),
        RequestedFormat::with_formats(
            RequestedFormatType::AbsoluteHighestFrameRate,
            PREFERRED_PIXEL_FORMATS,
        ),
        RequestedFormat::with_formats(RequestedFormatType::None, PREFERRED_PIXEL_FORMATS),
    ]
}

#[derive(Debug)]
struct CameraStream {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Live camera as a `FrameSource`: a capture thread owns the device and
/// hands mirrored RGBA frames over a bounded(1) channel, dropping frames
/// while the paint loop is busy. The loop side stays synchronous.
pub struct CameraSource {
    frame_rx: Receiver<Frame>,
    _stream: CameraStream,
}

impl CameraSource {
    pub fn open(index: u32, width: u32, height: u32) -> Result<Self, PaintError> {
        // Fail fast before spawning the capture thread.
        build_camera(CameraIndex::Index(index), width, height)?;

        let (frame_tx, frame_rx) = bounded(1);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let handle = thread::spawn(move || {
            capture_loop(CameraIndex::Index(index), width, height, stop_flag, frame_tx);
        });

        Ok(CameraSource {
            frame_rx,
            _stream: CameraStream {
                stop,
                handle: Some(handle),
            },
        })
    }
}

impl FrameSource for CameraSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, PaintError> {
        self.frame_rx
            .recv()
            .map(Some)
            .map_err(|_| PaintError::Acquisition("camera capture thread stopped".into()))
    }
}

fn build_camera(index: CameraIndex, width: u32, height: u32) -> Result<Camera, PaintError> {
    let mut last_err = None;

    for requested in requested_formats(width, height) {
        match Camera::new(index.clone(), requested) {
            Ok(mut camera) => match camera.open_stream() {
                Ok(()) => {
                    let format = camera.camera_format();
                    log::info!("camera opened at {format}");
                    return Ok(camera);
                }
                Err(err) => last_err = Some(err.to_string()),
            },
            Err(err) => last_err = Some(err.to_string()),
        }
    }

    Err(PaintError::Acquisition(last_err.unwrap_or_else(|| {
        "failed to open camera with any supported format".into()
    })))
}

fn capture_loop(
    index: CameraIndex,
    width: u32,
    height: u32,
    stop: Arc<AtomicBool>,
    frame_tx: Sender<Frame>,
) {
    let mut camera = match build_camera(index, width, height) {
        Ok(cam) => cam,
        Err(err) => {
            log::error!("failed to open camera: {err}");
            return;
        }
    };

    while !stop.load(Ordering::Relaxed) {
        let frame_start = Instant::now();
        let buffer = match camera.frame() {
            Ok(buffer) => buffer,
            Err(err) => {
                log::warn!(
                    "camera frame read failed (after {:?}): {err}",
                    frame_start.elapsed()
                );
                continue;
            }
        };

        let converted = match rgba::convert_camera_frame(&buffer) {
            Ok(rgba) => rgba,
            Err(err) => {
                log::warn!("failed to decode camera frame: {err}");
                continue;
            }
        };

        let mut frame = Frame {
            rgba: converted.rgba,
            width: converted.width,
            height: converted.height,
            timestamp: Instant::now(),
        };
        // Selfie view: gesture orientation assumes a mirrored frame.
        frame.mirror_horizontal();

        // Drop the frame if the paint loop is still busy with the last one.
        let _ = frame_tx.try_send(frame);
    }
}
