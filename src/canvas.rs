use crate::types::Color;

/// Persistent raster layer holding all drawn strokes, independent of the
/// live video frame. Zero-initialized (unpainted black); only `clear`
/// resets it, and it never resizes.
#[derive(Clone, Debug)]
pub struct StrokeCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl StrokeCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        StrokeCanvas {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Reset every pixel to the unpainted state.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Rasterize a stroke segment between two fingertip positions.
    ///
    /// Walks the segment with Bresenham and stamps a circular brush of
    /// radius thickness/2 at every step, so a fast finger motion reads as
    /// one continuous stroke instead of disconnected dots.
    pub fn draw_segment(&mut self, from: (f32, f32), to: (f32, f32), color: Color, thickness: u32) {
        let (mut x0, mut y0) = (from.0 as i32, from.1 as i32);
        let (x1, y1) = (to.0 as i32, to.1 as i32);
        let radius = (thickness.max(1) as i32) / 2;

        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.stamp_brush(x0, y0, radius, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn stamp_brush(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        for oy in -radius..=radius {
            for ox in -radius..=radius {
                if ox * ox + oy * oy <= radius * radius {
                    self.put_pixel(cx + ox, cy + oy, color);
                }
            }
        }
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (ux, uy) = (x as u32, y as u32);
        if ux >= self.width || uy >= self.height {
            return;
        }
        let idx = ((uy * self.width + ux) as usize) * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&color);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let idx = ((y * self.width + x) as usize) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAGENTA;

    #[test]
    fn segment_covers_both_endpoints_and_the_path_between() {
        let mut canvas = StrokeCanvas::new(320, 240);
        canvas.draw_segment((100.0, 100.0), (150.0, 140.0), MAGENTA, 20);

        assert_eq!(canvas.pixel(100, 100), MAGENTA);
        assert_eq!(canvas.pixel(150, 140), MAGENTA);
        // Midpoint of the segment sits on the stroke.
        assert_eq!(canvas.pixel(125, 120), MAGENTA);
    }

    #[test]
    fn stroke_width_matches_thickness() {
        let mut canvas = StrokeCanvas::new(200, 200);
        canvas.draw_segment((50.0, 100.0), (150.0, 100.0), MAGENTA, 20);

        // Brush radius 10: painted up to 10 px off the centerline, blank at 11.
        assert_eq!(canvas.pixel(100, 91), MAGENTA);
        assert_eq!(canvas.pixel(100, 110), MAGENTA);
        assert_eq!(canvas.pixel(100, 111), [0, 0, 0, 0]);
    }

    #[test]
    fn zero_length_segment_stamps_a_dot() {
        let mut canvas = StrokeCanvas::new(100, 100);
        canvas.draw_segment((50.0, 50.0), (50.0, 50.0), MAGENTA, 6);
        assert_eq!(canvas.pixel(50, 50), MAGENTA);
        assert_eq!(canvas.pixel(60, 50), [0, 0, 0, 0]);
    }

    #[test]
    fn out_of_bounds_strokes_are_clipped() {
        let mut canvas = StrokeCanvas::new(64, 64);
        canvas.draw_segment((-40.0, 10.0), (120.0, 10.0), MAGENTA, 8);
        assert_eq!(canvas.pixel(0, 10), MAGENTA);
        assert_eq!(canvas.pixel(63, 10), MAGENTA);
    }

    #[test]
    fn clear_restores_the_initial_blank_state() {
        let blank = StrokeCanvas::new(128, 96);
        let mut canvas = blank.clone();
        canvas.draw_segment((10.0, 10.0), (90.0, 80.0), MAGENTA, 15);
        assert_ne!(canvas.pixels(), blank.pixels());

        canvas.clear();
        assert_eq!(canvas.pixels(), blank.pixels());
    }
}
