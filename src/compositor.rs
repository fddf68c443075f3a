//! Merges the live frame, the header strip and the stroke canvas into the
//! displayed image. Strokes opaquely occlude the video underneath; black
//! (eraser) canvas pixels fall below the mask threshold and let the live
//! image through again.

use rayon::prelude::*;

use crate::canvas::StrokeCanvas;
use crate::error::PaintError;
use crate::palette::{HEADER_HEIGHT, HeaderOverlay};
use crate::types::Frame;

/// Canvas pixels with integer luma above this count as painted.
const MASK_THRESHOLD: u32 = 5;

pub fn compose(
    frame: &mut Frame,
    header: &HeaderOverlay,
    canvas: &StrokeCanvas,
) -> Result<(), PaintError> {
    if header.width != frame.width {
        return Err(PaintError::Geometry(format!(
            "header width {} does not match frame width {}",
            header.width, frame.width
        )));
    }
    if canvas.width() != frame.width || canvas.height() != frame.height {
        return Err(PaintError::Geometry(format!(
            "canvas {}x{} does not match frame {}x{}",
            canvas.width(),
            canvas.height(),
            frame.width,
            frame.height
        )));
    }

    blit_header(frame, header);

    frame
        .rgba
        .par_chunks_exact_mut(4)
        .zip(canvas.pixels().par_chunks_exact(4))
        .for_each(|(live, stroke)| {
            if luma(stroke) > MASK_THRESHOLD {
                live.copy_from_slice(stroke);
            }
        });

    Ok(())
}

fn blit_header(frame: &mut Frame, header: &HeaderOverlay) {
    let rows = HEADER_HEIGHT.min(frame.height) as usize;
    let stride = frame.width as usize * 4;
    frame.rgba[..rows * stride].copy_from_slice(&header.rgba[..rows * stride]);
}

fn luma(px: &[u8]) -> u32 {
    (299 * px[0] as u32 + 587 * px[1] as u32 + 114 * px[2] as u32) / 1000
}
