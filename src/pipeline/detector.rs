//! Hand-landmark detection via a MediaPipe helper process. The helper
//! receives raw frames on stdin (12-byte header: width, height, channels,
//! little endian, then the pixel data) and answers one JSON line per frame:
//!
//! `{"hands": [{"handedness": "Right", "score": 0.97,
//!              "landmarks": [{"x": 0.41, "y": 0.33, "z": -0.01}, ...]}]}`
//!
//! Landmark coordinates arrive normalized to [0, 1]; they are denormalized
//! to frame pixel space here, which is the contract the gesture core
//! relies on.

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use serde::Deserialize;

use super::HandTracker;
use crate::error::PaintError;
use crate::types::{Frame, HandLandmarks, NUM_LANDMARKS};

const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
    #[allow(dead_code)]
    z: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[allow(dead_code)]
    handedness: String,
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionResult {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Single-hand tracker backed by a MediaPipe subprocess.
pub struct MediaPipeTracker {
    process: Child,
    stdout_reader: BufReader<ChildStdout>,
    confidence_threshold: f32,
}

impl MediaPipeTracker {
    /// Start the helper script and wait for its READY handshake.
    pub fn spawn(script: &Path) -> Result<Self, PaintError> {
        if !script.exists() {
            return Err(PaintError::Tracker(format!(
                "detector script not found at {}",
                script.display()
            )));
        }

        log::info!("starting hand detector: {}", script.display());

        let mut process = Command::new(python_interpreter())
            .arg(script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|err| PaintError::Tracker(format!("failed to start detector: {err}")))?;

        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| PaintError::Tracker("detector stdout unavailable".into()))?;
        let mut stdout_reader = BufReader::new(stdout);

        let mut ready_line = String::new();
        stdout_reader.read_line(&mut ready_line)?;
        if ready_line.trim() != "READY" {
            return Err(PaintError::Tracker(format!(
                "detector did not signal ready, got: {ready_line:?}"
            )));
        }

        log::info!("hand detector ready");

        Ok(MediaPipeTracker {
            process,
            stdout_reader,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        })
    }

    pub fn set_confidence_threshold(&mut self, threshold: f32) {
        self.confidence_threshold = threshold.clamp(0.0, 1.0);
    }

    fn write_frame(&mut self, frame: &Frame) -> Result<(), PaintError> {
        let stdin = self
            .process
            .stdin
            .as_mut()
            .ok_or_else(|| PaintError::Tracker("detector stdin unavailable".into()))?;

        stdin.write_all(&frame.width.to_le_bytes())?;
        stdin.write_all(&frame.height.to_le_bytes())?;
        stdin.write_all(&4u32.to_le_bytes())?;
        stdin.write_all(&frame.rgba)?;
        stdin.flush()?;
        Ok(())
    }
}

impl HandTracker for MediaPipeTracker {
    fn detect(&mut self, frame: &Frame) -> Result<Option<HandLandmarks>, PaintError> {
        self.write_frame(frame)?;

        let mut response = String::new();
        self.stdout_reader.read_line(&mut response)?;

        let result: DetectionResult = serde_json::from_str(&response)
            .map_err(|err| PaintError::Tracker(format!("bad detector response: {err}")))?;

        if let Some(error) = result.error {
            log::warn!("detector error: {error}");
            return Ok(None);
        }

        // Single-hand tracking: first hand above the confidence threshold.
        for hand in result.hands {
            if hand.score < self.confidence_threshold {
                continue;
            }
            if hand.landmarks.len() != NUM_LANDMARKS {
                log::warn!(
                    "expected {NUM_LANDMARKS} landmarks, got {}",
                    hand.landmarks.len()
                );
                continue;
            }

            let mut points = [(0.0f32, 0.0f32); NUM_LANDMARKS];
            for (point, lm) in points.iter_mut().zip(&hand.landmarks) {
                *point = (lm.x * frame.width as f32, lm.y * frame.height as f32);
            }
            return Ok(Some(HandLandmarks { points }));
        }

        Ok(None)
    }
}

impl Drop for MediaPipeTracker {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

fn python_interpreter() -> PathBuf {
    // A project-local venv wins over whatever python3 is on PATH.
    let venv = Path::new(".venv/bin/python");
    if venv.exists() {
        venv.to_path_buf()
    } else {
        PathBuf::from("python3")
    }
}
