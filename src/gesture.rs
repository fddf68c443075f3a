use std::time::{Duration, Instant};

use crate::types::{HandLandmarks, landmarks};

const LOCK_DEBOUNCE: Duration = Duration::from_secs(1);

/// Finger pose that engages the lock: index, middle and ring up.
const LOCK_POSE: [bool; 5] = [false, true, true, true, false];
/// Finger pose that releases it: index through pinky up.
const UNLOCK_POSE: [bool; 5] = [false, true, true, true, true];

/// Pinch distance range (px) mapped onto the stroke thickness range.
const PINCH_RANGE: (f32, f32) = (30.0, 200.0);
const THICKNESS_RANGE: (f32, f32) = (5.0, 50.0);

/// Per-digit up/down states, ordered thumb → pinky.
///
/// The thumb reads as up when its tip sits on the hand's outer side
/// (tip.x < IP.x). This assumes a mirrored selfie-view frame; sources
/// mirror captured frames before detection, so do not flip the comparison.
/// Every other digit is up when its tip is above the PIP joint two below it.
pub fn finger_states(hand: &HandLandmarks) -> [bool; 5] {
    let tip_above = |tip: usize, pip: usize| hand.point(tip).1 < hand.point(pip).1;

    [
        hand.point(landmarks::THUMB_TIP).0 < hand.point(landmarks::THUMB_IP).0,
        tip_above(landmarks::INDEX_TIP, landmarks::INDEX_PIP),
        tip_above(landmarks::MIDDLE_TIP, landmarks::MIDDLE_PIP),
        tip_above(landmarks::RING_TIP, landmarks::RING_PIP),
        tip_above(landmarks::PINKY_TIP, landmarks::PINKY_PIP),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintMode {
    Selection,
    Standby,
    Draw,
    ThicknessAdjust,
    Clear,
    Idle,
}

impl PaintMode {
    pub fn label(&self) -> &'static str {
        match self {
            PaintMode::Selection => "selection",
            PaintMode::Standby => "standby",
            PaintMode::Draw => "draw",
            PaintMode::ThicknessAdjust => "thickness",
            PaintMode::Clear => "clear",
            PaintMode::Idle => "idle",
        }
    }
}

/// Map a finger vector to its interaction mode.
///
/// A single ordered match guarantees exactly one mode per frame; the Draw
/// pattern requires the pinky down, so Standby and Draw can never both
/// apply to the same vector.
pub fn classify_mode(fingers: [bool; 5]) -> PaintMode {
    match fingers {
        [false, true, true, false, false] => PaintMode::Selection,
        [false, true, false, false, true] => PaintMode::Standby,
        [false, true, false, false, false] => PaintMode::Draw,
        [true, true, false, false, false] => PaintMode::ThicknessAdjust,
        [false, false, false, false, false] => PaintMode::Clear,
        _ => PaintMode::Idle,
    }
}

/// Linear pinch-distance → thickness map, clamped at both ends.
pub fn thickness_from_pinch(distance: f32) -> u32 {
    let (lo, hi) = PINCH_RANGE;
    let (min_t, max_t) = THICKNESS_RANGE;
    let t = ((distance - lo) / (hi - lo)).clamp(0.0, 1.0);
    (min_t + t * (max_t - min_t)) as u32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockTransition {
    Engaged,
    Released,
}

/// Latch gating all drawing-affecting actions, toggled by dedicated hand
/// poses with a debounce so a pose held across frames fires once.
#[derive(Debug, Default)]
pub struct LockController {
    locked: bool,
    last_toggle: Option<Instant>,
}

impl LockController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Feed one frame's finger vector. Returns the transition when the
    /// lock state actually changed. An accepted pose refreshes the
    /// debounce timestamp even without a state change, so holding the
    /// pose keeps yielding a single transition.
    pub fn update(&mut self, fingers: [bool; 5], now: Instant) -> Option<LockTransition> {
        let target = match fingers {
            LOCK_POSE => true,
            UNLOCK_POSE => false,
            _ => return None,
        };

        if let Some(last) = self.last_toggle {
            if now.duration_since(last) <= LOCK_DEBOUNCE {
                return None;
            }
        }

        self.last_toggle = Some(now);
        if self.locked == target {
            return None;
        }
        self.locked = target;
        Some(if target {
            LockTransition::Engaged
        } else {
            LockTransition::Released
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::hand_with_fingers;

    #[test]
    fn extracts_each_digit_independently() {
        for i in 0..5 {
            let mut fingers = [false; 5];
            fingers[i] = true;
            let hand = hand_with_fingers(fingers);
            assert_eq!(finger_states(&hand), fingers, "digit {i}");
        }
    }

    #[test]
    fn extracts_mixed_vectors() {
        for fingers in [
            [false, true, true, false, false],
            [true, true, false, false, true],
            [true, true, true, true, true],
            [false, false, false, false, false],
        ] {
            let hand = hand_with_fingers(fingers);
            assert_eq!(finger_states(&hand), fingers);
        }
    }

    #[test]
    fn classifies_the_five_patterns() {
        assert_eq!(
            classify_mode([false, true, true, false, false]),
            PaintMode::Selection
        );
        assert_eq!(
            classify_mode([false, true, false, false, true]),
            PaintMode::Standby
        );
        assert_eq!(
            classify_mode([false, true, false, false, false]),
            PaintMode::Draw
        );
        assert_eq!(
            classify_mode([true, true, false, false, false]),
            PaintMode::ThicknessAdjust
        );
        assert_eq!(
            classify_mode([false, false, false, false, false]),
            PaintMode::Clear
        );
    }

    #[test]
    fn unmatched_vectors_are_idle() {
        assert_eq!(classify_mode([true, false, true, false, true]), PaintMode::Idle);
        assert_eq!(classify_mode([false, true, true, true, false]), PaintMode::Idle);
        assert_eq!(classify_mode([true, true, true, true, true]), PaintMode::Idle);
    }

    #[test]
    fn classification_is_pure() {
        let v = [false, true, false, false, false];
        assert_eq!(classify_mode(v), classify_mode(v));
    }

    #[test]
    fn thickness_mapping_is_clamped_and_monotonic() {
        assert_eq!(thickness_from_pinch(10.0), 5);
        assert_eq!(thickness_from_pinch(30.0), 5);
        assert_eq!(thickness_from_pinch(200.0), 50);
        assert_eq!(thickness_from_pinch(500.0), 50);
        assert_eq!(thickness_from_pinch(115.0), 27);

        let mut previous = 0;
        for d in (0..=220).step_by(5) {
            let t = thickness_from_pinch(d as f32);
            assert!(t >= previous);
            previous = t;
        }
    }

    #[test]
    fn lock_pose_held_toggles_once() {
        let mut lock = LockController::new();
        let start = Instant::now();

        assert_eq!(
            lock.update(super::LOCK_POSE, start),
            Some(LockTransition::Engaged)
        );
        assert!(lock.locked());

        // Same pose re-sent inside the debounce window: no further change.
        for ms in [100, 300, 900] {
            assert_eq!(
                lock.update(super::LOCK_POSE, start + Duration::from_millis(ms)),
                None
            );
        }
        assert!(lock.locked());
    }

    #[test]
    fn unlock_after_debounce_expires() {
        let mut lock = LockController::new();
        let start = Instant::now();

        lock.update(super::LOCK_POSE, start);
        assert_eq!(
            lock.update(super::UNLOCK_POSE, start + Duration::from_millis(1200)),
            Some(LockTransition::Released)
        );
        assert!(!lock.locked());
    }

    #[test]
    fn unlock_within_debounce_is_ignored() {
        let mut lock = LockController::new();
        let start = Instant::now();

        lock.update(super::LOCK_POSE, start);
        assert_eq!(
            lock.update(super::UNLOCK_POSE, start + Duration::from_millis(300)),
            None
        );
        assert!(lock.locked());
    }

    #[test]
    fn unrelated_vectors_leave_the_latch_alone() {
        let mut lock = LockController::new();
        let start = Instant::now();

        assert_eq!(lock.update([false, true, false, false, false], start), None);
        assert!(!lock.locked());

        lock.update(super::LOCK_POSE, start);
        assert_eq!(
            lock.update(
                [false, false, false, false, false],
                start + Duration::from_secs(5)
            ),
            None
        );
        assert!(lock.locked());
    }

    #[test]
    fn held_pose_refreshes_the_debounce_timestamp() {
        let mut lock = LockController::new();
        let start = Instant::now();

        lock.update(super::LOCK_POSE, start);
        // Re-accepted (no-op) at 1.2s, refreshing the timestamp...
        assert_eq!(
            lock.update(super::LOCK_POSE, start + Duration::from_millis(1200)),
            None
        );
        // ...so an unlock 0.5s later is still inside the window.
        assert_eq!(
            lock.update(super::UNLOCK_POSE, start + Duration::from_millis(1700)),
            None
        );
        assert!(lock.locked());
    }
}
