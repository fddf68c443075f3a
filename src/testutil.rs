//! Synthetic hands and palettes for unit tests: the gesture and session
//! logic runs against scripted landmark sets, no camera or detector.

use crate::assets::synthesized_overlays;
use crate::palette::Palette;
use crate::types::{HandLandmarks, NUM_LANDMARKS, landmarks};

/// Build a hand showing the given finger vector, index tip at `index_tip`.
///
/// Geometry follows the extractor's comparisons: a digit reads as up when
/// its tip sits above the PIP joint two landmarks below, the thumb when
/// its tip sits left of the IP joint (mirrored view).
pub fn hand_at(fingers: [bool; 5], index_tip: (f32, f32)) -> HandLandmarks {
    let (x, y) = index_tip;
    let mut points = [(0.0f32, 0.0f32); NUM_LANDMARKS];

    points[landmarks::WRIST] = (x, y + 260.0);

    // Thumb chain: CMC, MCP, IP, tip.
    points[1] = (x - 30.0, y + 200.0);
    points[2] = (x - 45.0, y + 160.0);
    points[landmarks::THUMB_IP] = (x - 60.0, y + 120.0);
    points[landmarks::THUMB_TIP] = if fingers[0] {
        (x - 90.0, y + 110.0)
    } else {
        (x - 30.0, y + 110.0)
    };

    // Index, middle, ring, pinky: MCP, PIP, DIP, tip columns.
    let columns = [0.0f32, 35.0, 70.0, 105.0];
    for (slot, offset) in columns.into_iter().enumerate() {
        let base = 5 + slot * 4;
        points[base] = (x + offset, y + 160.0); // MCP
        points[base + 1] = (x + offset, y + 100.0); // PIP
        points[base + 2] = (x + offset, y + 50.0); // DIP
        points[base + 3] = if fingers[slot + 1] {
            (x + offset, y)
        } else {
            (x + offset, y + 160.0)
        };
    }

    HandLandmarks { points }
}

/// Hand at a neutral position, for tests that only care about the vector.
pub fn hand_with_fingers(fingers: [bool; 5]) -> HandLandmarks {
    hand_at(fingers, (640.0, 360.0))
}

/// Thumb-and-index pinch with an exact fingertip distance.
pub fn pinch_hand(index_tip: (f32, f32), distance: f32) -> HandLandmarks {
    let mut hand = hand_at([true, true, false, false, false], index_tip);
    // Keep the thumb reading as up regardless of how tight the pinch is.
    hand.points[landmarks::THUMB_IP] = (index_tip.0 + distance + 50.0, index_tip.1 + 120.0);
    hand.points[landmarks::THUMB_TIP] = (index_tip.0 + distance, index_tip.1);
    hand
}

pub fn test_palette(frame_width: u32) -> Palette {
    Palette::new(synthesized_overlays(frame_width)).expect("synthesized palette")
}
