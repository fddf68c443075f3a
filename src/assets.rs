//! Header/palette overlay loading. Overlays come from an asset directory
//! (one image per palette state, resized to the frame width) or, when no
//! directory is available, are synthesized from the swatch geometry so the
//! binary runs without shipped artwork.

use std::fs;
use std::path::{Path, PathBuf};

use fast_image_resize as fir;

use crate::error::PaintError;
use crate::palette::{HEADER_HEIGHT, HeaderOverlay, SWATCH_BANDS, SWATCH_COLORS};
use crate::types::Color;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Load the four header overlays from `dir`, in file-name order, resizing
/// each to `frame_width` x HEADER_HEIGHT.
pub fn load_header_overlays(dir: &Path, frame_width: u32) -> Result<Vec<HeaderOverlay>, PaintError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        })
        .collect();
    paths.sort();

    if paths.len() < SWATCH_BANDS.len() {
        return Err(PaintError::Assets(format!(
            "header directory {} holds {} images, need {}",
            dir.display(),
            paths.len(),
            SWATCH_BANDS.len()
        )));
    }
    if paths.len() > SWATCH_BANDS.len() {
        log::warn!(
            "header directory {} holds {} images, using the first {}",
            dir.display(),
            paths.len(),
            SWATCH_BANDS.len()
        );
        paths.truncate(SWATCH_BANDS.len());
    }

    paths
        .iter()
        .map(|path| {
            let image = image::open(path)?.to_rgba8();
            let (w, h) = image.dimensions();
            let resized = resize_rgba(image.into_raw(), w, h, frame_width, HEADER_HEIGHT)?;
            HeaderOverlay::new(resized, frame_width)
        })
        .collect()
}

fn resize_rgba(
    rgba: Vec<u8>,
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
) -> Result<Vec<u8>, PaintError> {
    if src_w == dst_w && src_h == dst_h {
        return Ok(rgba);
    }

    let src_image = fir::images::Image::from_vec_u8(src_w, src_h, rgba, fir::PixelType::U8x4)
        .map_err(|err| PaintError::Assets(format!("bad overlay buffer: {err}")))?;
    let mut dst_image = fir::images::Image::new(dst_w, dst_h, fir::PixelType::U8x4);
    let mut resizer = fir::Resizer::new();
    let resize_options = fir::ResizeOptions::new()
        .resize_alg(fir::ResizeAlg::Interpolation(fir::FilterType::Bilinear));
    resizer
        .resize(&src_image, &mut dst_image, Some(&resize_options))
        .map_err(|err| PaintError::Assets(format!("overlay resize failed: {err}")))?;
    Ok(dst_image.into_vec())
}

/// Build the four overlays from the swatch geometry alone: every strip
/// shows all swatches at their hit bands, with the active one framed.
pub fn synthesized_overlays(frame_width: u32) -> Vec<HeaderOverlay> {
    (0..SWATCH_BANDS.len())
        .map(|selected| synthesize_strip(frame_width, selected))
        .collect()
}

fn synthesize_strip(frame_width: u32, selected: usize) -> HeaderOverlay {
    const BACKGROUND: Color = [32, 32, 32, 255];
    const OUTLINE: Color = [96, 96, 96, 255];
    const HIGHLIGHT: Color = [255, 255, 255, 255];

    let mut rgba = Vec::with_capacity((frame_width as usize) * (HEADER_HEIGHT as usize) * 4);
    for _ in 0..(frame_width as usize) * (HEADER_HEIGHT as usize) {
        rgba.extend_from_slice(&BACKGROUND);
    }

    let mut fill = |x0: u32, x1: u32, y0: u32, y1: u32, color: Color| {
        for y in y0..y1.min(HEADER_HEIGHT) {
            for x in x0..x1.min(frame_width) {
                let idx = ((y * frame_width + x) as usize) * 4;
                rgba[idx..idx + 4].copy_from_slice(&color);
            }
        }
    };

    for (i, &(lo, hi)) in SWATCH_BANDS.iter().enumerate() {
        let (x0, x1) = (lo as u32 + 1, hi as u32);
        let frame_color = if i == selected { HIGHLIGHT } else { OUTLINE };
        let border = if i == selected { 5 } else { 2 };
        fill(
            x0.saturating_sub(border),
            x1 + border,
            20u32.saturating_sub(border),
            105 + border,
            frame_color,
        );
        fill(x0, x1, 20, 105, SWATCH_COLORS[i]);
    }

    HeaderOverlay {
        rgba,
        width: frame_width,
    }
}
