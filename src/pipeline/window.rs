use minifb::{Key, Window, WindowOptions};

use super::{FrameSink, SinkStatus};
use crate::error::PaintError;
use crate::types::Frame;

/// Window sink displaying composited frames; quits on Q, Escape or window
/// close.
pub struct WindowSink {
    window: Window,
    buffer: Vec<u32>,
}

impl WindowSink {
    pub fn open(title: &str, width: u32, height: u32) -> Result<Self, PaintError> {
        let window = Window::new(
            title,
            width as usize,
            height as usize,
            WindowOptions::default(),
        )
        .map_err(|err| PaintError::Sink(format!("window init failed: {err}")))?;

        Ok(WindowSink {
            window,
            buffer: vec![0u32; (width as usize) * (height as usize)],
        })
    }
}

impl FrameSink for WindowSink {
    fn present(&mut self, frame: &Frame) -> Result<SinkStatus, PaintError> {
        if !self.window.is_open()
            || self.window.is_key_down(Key::Q)
            || self.window.is_key_down(Key::Escape)
        {
            return Ok(SinkStatus::Stop);
        }

        // minifb wants packed 0RGB.
        for (dst, px) in self.buffer.iter_mut().zip(frame.rgba.chunks_exact(4)) {
            *dst = (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32;
        }

        self.window
            .update_with_buffer(&self.buffer, frame.width as usize, frame.height as usize)
            .map_err(|err| PaintError::Sink(format!("window update failed: {err}")))?;

        Ok(SinkStatus::Continue)
    }
}
