use crate::error::PaintError;
use crate::types::{Color, ERASER, GREEN, MAGENTA, YELLOW};

/// Height of the palette strip overlaid on top of the frame, in pixels.
/// Fingertips above this line interact with the swatches.
pub const HEADER_HEIGHT: u32 = 125;

/// Horizontal hit bands for the four swatches, exclusive bounds.
pub const SWATCH_BANDS: [(f32, f32); 4] = [
    (170.0, 295.0),
    (436.0, 561.0),
    (700.0, 825.0),
    (980.0, 1105.0),
];

pub const SWATCH_COLORS: [Color; 4] = [MAGENTA, YELLOW, GREEN, ERASER];

/// One pre-rendered header strip, frame width x HEADER_HEIGHT.
#[derive(Clone, Debug)]
pub struct HeaderOverlay {
    pub rgba: Vec<u8>,
    pub width: u32,
}

impl HeaderOverlay {
    pub fn new(rgba: Vec<u8>, width: u32) -> Result<Self, PaintError> {
        let expected = (width as usize) * (HEADER_HEIGHT as usize) * 4;
        if rgba.len() != expected {
            return Err(PaintError::Geometry(format!(
                "header overlay buffer is {} bytes, expected {}",
                rgba.len(),
                expected
            )));
        }
        Ok(HeaderOverlay { rgba, width })
    }
}

/// Current draw color plus the header strip that advertises it. Mutated
/// only from Selection mode while the fingertip is inside the strip.
#[derive(Debug)]
pub struct Palette {
    overlays: Vec<HeaderOverlay>,
    selected: usize,
}

impl Palette {
    /// One overlay per swatch, in band order.
    pub fn new(overlays: Vec<HeaderOverlay>) -> Result<Self, PaintError> {
        if overlays.len() != SWATCH_BANDS.len() {
            return Err(PaintError::Assets(format!(
                "expected {} header overlays, got {}",
                SWATCH_BANDS.len(),
                overlays.len()
            )));
        }
        Ok(Palette {
            overlays,
            selected: 0,
        })
    }

    pub fn color(&self) -> Color {
        SWATCH_COLORS[self.selected]
    }

    pub fn header(&self) -> &HeaderOverlay {
        &self.overlays[self.selected]
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Hit-test a fingertip x position against the swatch bands and switch
    /// the selection on a hit. The caller checks the header-strip y bound.
    pub fn select_at(&mut self, x: f32) -> Option<usize> {
        let hit = SWATCH_BANDS
            .iter()
            .position(|&(lo, hi)| x > lo && x < hi)?;
        self.selected = hit;
        Some(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_palette;

    #[test]
    fn hits_switch_color_and_header() {
        let mut palette = test_palette(1280);
        assert_eq!(palette.color(), MAGENTA);

        assert_eq!(palette.select_at(500.0), Some(1));
        assert_eq!(palette.color(), YELLOW);
        assert_eq!(palette.selected(), 1);

        assert_eq!(palette.select_at(1000.0), Some(3));
        assert_eq!(palette.color(), ERASER);
    }

    #[test]
    fn band_bounds_are_exclusive() {
        let mut palette = test_palette(1280);
        assert_eq!(palette.select_at(170.0), None);
        assert_eq!(palette.select_at(295.0), None);
        assert_eq!(palette.select_at(171.0), Some(0));
        assert_eq!(palette.select_at(294.0), Some(0));
    }

    #[test]
    fn misses_between_bands_keep_the_selection() {
        let mut palette = test_palette(1280);
        palette.select_at(750.0);
        assert_eq!(palette.select_at(350.0), None);
        assert_eq!(palette.color(), GREEN);
    }

    #[test]
    fn palette_requires_one_overlay_per_band() {
        let overlays = vec![
            HeaderOverlay::new(vec![0; 1280 * HEADER_HEIGHT as usize * 4], 1280).unwrap(),
        ];
        assert!(Palette::new(overlays).is_err());
    }

    #[test]
    fn overlay_buffer_size_is_checked() {
        assert!(HeaderOverlay::new(vec![0; 16], 1280).is_err());
    }
}
