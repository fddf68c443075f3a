//! Visual feedback drawn onto the live frame each tick: the selection
//! cursor, the pen-tip circle and HUD text. Everything here writes into
//! the frame only; persistent strokes live on the canvas.

use crate::types::{Color, Frame};

pub fn draw_filled_circle(frame: &mut Frame, center: (f32, f32), radius: i32, color: Color) {
    let (cx, cy) = (center.0 as i32, center.1 as i32);
    for oy in -radius..=radius {
        for ox in -radius..=radius {
            if ox * ox + oy * oy <= radius * radius {
                put_pixel_safe(frame, cx + ox, cy + oy, color);
            }
        }
    }
}

pub fn draw_filled_rect(frame: &mut Frame, corner_a: (f32, f32), corner_b: (f32, f32), color: Color) {
    let x0 = corner_a.0.min(corner_b.0) as i32;
    let x1 = corner_a.0.max(corner_b.0) as i32;
    let y0 = corner_a.1.min(corner_b.1) as i32;
    let y1 = corner_a.1.max(corner_b.1) as i32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            put_pixel_safe(frame, x, y, color);
        }
    }
}

/// Draw a string with the 5x7 bitmap font, `scale` screen pixels per font
/// pixel. Unknown characters advance the cursor without drawing.
pub fn draw_text(frame: &mut Frame, x: i32, y: i32, scale: i32, text: &str, color: Color) {
    let mut cursor = x;
    for ch in text.chars() {
        if let Some(rows) = glyph5x7(ch.to_ascii_uppercase()) {
            for (ry, bits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if bits & (1 << (4 - rx)) != 0 {
                        fill_block(
                            frame,
                            cursor + rx as i32 * scale,
                            y + ry as i32 * scale,
                            scale,
                            color,
                        );
                    }
                }
            }
        }
        cursor += 6 * scale;
    }
}

fn fill_block(frame: &mut Frame, x: i32, y: i32, scale: i32, color: Color) {
    for oy in 0..scale {
        for ox in 0..scale {
            put_pixel_safe(frame, x + ox, y + oy, color);
        }
    }
}

fn put_pixel_safe(frame: &mut Frame, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 {
        return;
    }
    let (ux, uy) = (x as u32, y as u32);
    if ux >= frame.width || uy >= frame.height {
        return;
    }
    let idx = ((uy * frame.width + ux) as usize) * 4;
    frame.rgba[idx..idx + 4].copy_from_slice(&color);
}

/// 5x7 glyph bitmaps; each u8 is a row, low 5 bits are pixels (bit 4
/// leftmost). Covers the HUD character set.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g {
        ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
            Some([$a, $b, $c, $d, $e, $f, $g])
        };
    }

    match ch {
        '0' => g!(0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110),
        '1' => g!(0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110),
        '2' => g!(0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111),
        '3' => g!(0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110),
        '4' => g!(0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010),
        '5' => g!(0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110),
        '6' => g!(0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110),
        '7' => g!(0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000),
        '8' => g!(0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110),
        '9' => g!(0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100),
        'A' => g!(0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001),
        'B' => g!(0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110),
        'C' => g!(0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110),
        'D' => g!(0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100),
        'E' => g!(0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111),
        'F' => g!(0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000),
        'G' => g!(0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111),
        'H' => g!(0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001),
        'I' => g!(0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110),
        'J' => g!(0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100),
        'K' => g!(0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001),
        'L' => g!(0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111),
        'M' => g!(0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001),
        'N' => g!(0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001),
        'O' => g!(0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110),
        'P' => g!(0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000),
        'Q' => g!(0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101),
        'R' => g!(0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001),
        'S' => g!(0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110),
        'T' => g!(0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100),
        'U' => g!(0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110),
        'V' => g!(0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100),
        'W' => g!(0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010),
        'X' => g!(0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001),
        'Y' => g!(0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100),
        'Z' => g!(0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111),
        ' ' => g!(0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000),
        ':' => g!(0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000),
        '.' => g!(0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00000),
        '!' => g!(0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RED;

    #[test]
    fn circle_fills_center_and_respects_radius() {
        let mut frame = Frame::new(64, 64);
        draw_filled_circle(&mut frame, (32.0, 32.0), 5, RED);

        let px = |f: &Frame, x: u32, y: u32| {
            let i = ((y * f.width + x) as usize) * 4;
            [f.rgba[i], f.rgba[i + 1], f.rgba[i + 2], f.rgba[i + 3]]
        };
        assert_eq!(px(&frame, 32, 32), RED);
        assert_eq!(px(&frame, 37, 32), RED);
        assert_eq!(px(&frame, 38, 32), [0, 0, 0, 0]);
    }

    #[test]
    fn rect_accepts_corners_in_any_order() {
        let mut frame = Frame::new(32, 32);
        draw_filled_rect(&mut frame, (10.0, 12.0), (4.0, 6.0), RED);

        let i = ((8 * frame.width + 7) as usize) * 4;
        assert_eq!(&frame.rgba[i..i + 4], &RED);
    }

    #[test]
    fn text_marks_pixels_and_clips_at_edges() {
        let mut frame = Frame::new(64, 16);
        draw_text(&mut frame, 2, 2, 1, "LOCKED", RED);
        assert!(frame.rgba.chunks_exact(4).any(|px| px == RED));

        // Off-screen text must not panic.
        draw_text(&mut frame, 60, 12, 2, "SCREEN UNLOCKED", RED);
    }
}
