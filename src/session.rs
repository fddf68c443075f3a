use std::time::Instant;

use crate::canvas::StrokeCanvas;
use crate::compositor;
use crate::error::PaintError;
use crate::gesture::{self, LockController, LockTransition, PaintMode};
use crate::overlay;
use crate::palette::{HEADER_HEIGHT, Palette};
use crate::types::{Frame, HandLandmarks, RED};

pub const DEFAULT_THICKNESS: u32 = 20;

/// Offsets of the selection cursor rectangle around the index and middle
/// fingertips.
const SELECT_RECT_PAD: (f32, f32, f32, f32) = (10.0, 15.0, 10.0, 23.0);

/// What one frame did, for logging and tests.
#[derive(Clone, Copy, Debug)]
pub struct TickReport {
    /// Mode dispatched this frame; `None` when no hand was seen or the
    /// screen was locked.
    pub mode: Option<PaintMode>,
    pub locked: bool,
}

/// All mutable drawing state for one run: stroke canvas, palette, pen
/// context, thickness and the lock latch. One `process` call per frame is
/// the only entry point, so nothing here needs synchronization.
pub struct PaintSession {
    canvas: StrokeCanvas,
    palette: Palette,
    lock: LockController,
    thickness: u32,
    pen: Option<(f32, f32)>,
}

impl PaintSession {
    pub fn new(palette: Palette, width: u32, height: u32) -> Self {
        PaintSession {
            canvas: StrokeCanvas::new(width, height),
            palette,
            lock: LockController::new(),
            thickness: DEFAULT_THICKNESS,
            pen: None,
        }
    }

    pub fn canvas(&self) -> &StrokeCanvas {
        &self.canvas
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    pub fn locked(&self) -> bool {
        self.lock.locked()
    }

    /// Run one frame through the pipeline: classify the hand pose, apply
    /// the resulting mode, then composite header and canvas into `frame`.
    pub fn process(
        &mut self,
        frame: &mut Frame,
        hand: Option<&HandLandmarks>,
        now: Instant,
    ) -> Result<TickReport, PaintError> {
        let mut dispatched = None;
        let mut show_status = false;

        match hand {
            None => {
                // Stroke interrupted; a stale pen position must not seed
                // the next stroke.
                self.pen = None;
            }
            Some(hand) => {
                show_status = true;
                let fingers = gesture::finger_states(hand);

                match self.lock.update(fingers, now) {
                    Some(LockTransition::Engaged) => log::info!("screen locked"),
                    Some(LockTransition::Released) => log::info!("screen unlocked"),
                    None => {}
                }

                if self.lock.locked() {
                    self.pen = None;
                } else {
                    let mode = gesture::classify_mode(fingers);
                    self.dispatch(mode, hand, frame);
                    dispatched = Some(mode);
                }
            }
        }

        compositor::compose(frame, self.palette.header(), &self.canvas)?;

        // Status text goes on top of the composited image so neither the
        // header strip nor the strokes can hide it.
        if show_status {
            let status = if self.lock.locked() {
                "SCREEN LOCKED"
            } else {
                "SCREEN UNLOCKED"
            };
            overlay::draw_text(frame, 10, 70, 3, status, RED);
            if self.lock.locked() {
                overlay::draw_text(
                    frame,
                    100,
                    150,
                    2,
                    "SHOW FOUR FINGERS TO UNLOCK",
                    RED,
                );
            }
        }

        Ok(TickReport {
            mode: dispatched,
            locked: self.lock.locked(),
        })
    }

    fn dispatch(&mut self, mode: PaintMode, hand: &HandLandmarks, frame: &mut Frame) {
        let tip = hand.index_tip();

        match mode {
            PaintMode::Selection => {
                self.pen = Some(tip);
                if tip.1 < HEADER_HEIGHT as f32 {
                    if let Some(swatch) = self.palette.select_at(tip.0) {
                        log::debug!("palette swatch {swatch} selected");
                    }
                }
                let middle = hand.middle_tip();
                let (left, top, right, bottom) = SELECT_RECT_PAD;
                overlay::draw_filled_rect(
                    frame,
                    (tip.0 - left, tip.1 - top),
                    (middle.0 + right, middle.1 + bottom),
                    self.palette.color(),
                );
            }
            PaintMode::Standby => {
                self.pen = None;
            }
            PaintMode::Draw => {
                overlay::draw_filled_circle(
                    frame,
                    tip,
                    (self.thickness / 2) as i32,
                    self.palette.color(),
                );
                let from = self.pen.unwrap_or(tip);
                self.canvas
                    .draw_segment(from, tip, self.palette.color(), self.thickness);
                self.pen = Some(tip);
            }
            PaintMode::ThicknessAdjust => {
                let thumb = hand.thumb_tip();
                let distance = (thumb.0 - tip.0).hypot(thumb.1 - tip.1);
                self.thickness = gesture::thickness_from_pinch(distance);
                overlay::draw_text(
                    frame,
                    tip.0 as i32 - 50,
                    tip.1 as i32 - 50,
                    2,
                    &format!("THICKNESS: {}", self.thickness),
                    RED,
                );
                self.pen = None;
            }
            PaintMode::Clear => {
                self.canvas.clear();
                self.pen = None;
            }
            PaintMode::Idle => {
                self.pen = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{hand_at, hand_with_fingers, pinch_hand, test_palette};
    use crate::types::{MAGENTA, YELLOW};
    use std::time::Duration;

    const DRAW: [bool; 5] = [false, true, false, false, false];
    const SELECT: [bool; 5] = [false, true, true, false, false];
    const LOCK: [bool; 5] = [false, true, true, true, false];
    const UNLOCK: [bool; 5] = [false, true, true, true, true];
    const FIST: [bool; 5] = [false, false, false, false, false];

    fn session() -> PaintSession {
        PaintSession::new(test_palette(1280), 1280, 720)
    }

    fn tick(
        session: &mut PaintSession,
        hand: Option<&HandLandmarks>,
        now: Instant,
    ) -> TickReport {
        let mut frame = Frame::new(1280, 720);
        session.process(&mut frame, hand, now).unwrap()
    }

    #[test]
    fn consecutive_draw_frames_connect_into_a_stroke() {
        let mut session = session();
        let now = Instant::now();

        tick(&mut session, Some(&hand_at(DRAW, (100.0, 300.0))), now);
        tick(&mut session, Some(&hand_at(DRAW, (150.0, 340.0))), now);

        // Both endpoints and the midpoint of the connecting segment are
        // painted in the default magenta at thickness 20.
        assert_eq!(session.canvas().pixel(100, 300), MAGENTA);
        assert_eq!(session.canvas().pixel(150, 340), MAGENTA);
        assert_eq!(session.canvas().pixel(125, 320), MAGENTA);
    }

    #[test]
    fn interrupted_strokes_do_not_bridge_the_gap() {
        let mut session = session();
        let now = Instant::now();

        tick(&mut session, Some(&hand_at(DRAW, (100.0, 300.0))), now);
        // Hand disappears for a frame, then reappears far away.
        tick(&mut session, None, now);
        tick(&mut session, Some(&hand_at(DRAW, (600.0, 300.0))), now);

        assert_eq!(session.canvas().pixel(100, 300), MAGENTA);
        assert_eq!(session.canvas().pixel(600, 300), MAGENTA);
        // No segment across the gap.
        assert_eq!(session.canvas().pixel(350, 300), [0, 0, 0, 0]);
    }

    #[test]
    fn standby_frames_also_break_stroke_continuity() {
        let mut session = session();
        let now = Instant::now();

        tick(&mut session, Some(&hand_at(DRAW, (100.0, 300.0))), now);
        tick(
            &mut session,
            Some(&hand_at([false, true, false, false, true], (350.0, 300.0))),
            now,
        );
        tick(&mut session, Some(&hand_at(DRAW, (600.0, 300.0))), now);

        assert_eq!(session.canvas().pixel(350, 300), [0, 0, 0, 0]);
    }

    #[test]
    fn selection_in_a_band_switches_the_draw_color() {
        let mut session = session();
        let now = Instant::now();

        // Band (436, 561) is the yellow swatch.
        tick(&mut session, Some(&hand_at(SELECT, (500.0, 60.0))), now);
        assert_eq!(session.palette().selected(), 1);

        tick(&mut session, Some(&hand_at(DRAW, (400.0, 400.0))), now);
        assert_eq!(session.canvas().pixel(400, 400), YELLOW);

        // Band (170, 295) switches back to the first swatch.
        tick(&mut session, Some(&hand_at(SELECT, (200.0, 60.0))), now);
        assert_eq!(session.palette().selected(), 0);
    }

    #[test]
    fn selection_below_the_header_leaves_the_palette_alone() {
        let mut session = session();
        let now = Instant::now();

        tick(&mut session, Some(&hand_at(SELECT, (500.0, 400.0))), now);
        assert_eq!(session.palette().selected(), 0);
    }

    #[test]
    fn pinch_adjusts_thickness() {
        let mut session = session();
        let now = Instant::now();

        tick(&mut session, Some(&pinch_hand((500.0, 400.0), 115.0)), now);
        assert_eq!(session.thickness(), 27);

        tick(&mut session, Some(&pinch_hand((500.0, 400.0), 20.0)), now);
        assert_eq!(session.thickness(), 5);

        tick(&mut session, Some(&pinch_hand((500.0, 400.0), 400.0)), now);
        assert_eq!(session.thickness(), 50);
    }

    #[test]
    fn fist_clears_the_canvas() {
        let mut session = session();
        let now = Instant::now();
        let blank = session.canvas().pixels().to_vec();

        tick(&mut session, Some(&hand_at(DRAW, (100.0, 300.0))), now);
        tick(&mut session, Some(&hand_at(DRAW, (300.0, 500.0))), now);
        assert_ne!(session.canvas().pixels(), blank.as_slice());

        tick(&mut session, Some(&hand_with_fingers(FIST)), now);
        assert_eq!(session.canvas().pixels(), blank.as_slice());
    }

    #[test]
    fn locked_screen_ignores_drawing_and_clearing() {
        let mut session = session();
        let start = Instant::now();

        let report = tick(&mut session, Some(&hand_with_fingers(LOCK)), start);
        assert!(report.locked);
        assert!(report.mode.is_none());

        // Any trajectory while locked leaves the canvas untouched.
        let blank = session.canvas().pixels().to_vec();
        for x in [100.0, 300.0, 500.0] {
            tick(&mut session, Some(&hand_at(DRAW, (x, 300.0))), start);
        }
        tick(&mut session, Some(&hand_with_fingers(FIST)), start);
        assert_eq!(session.canvas().pixels(), blank.as_slice());

        // Unlock after the debounce window; drawing works again.
        let later = start + Duration::from_millis(1500);
        tick(&mut session, Some(&hand_with_fingers(UNLOCK)), later);
        assert!(!session.locked());
        tick(&mut session, Some(&hand_at(DRAW, (200.0, 300.0))), later);
        assert_eq!(session.canvas().pixel(200, 300), MAGENTA);
    }

    #[test]
    fn clear_resets_the_pen_as_well() {
        let mut session = session();
        let now = Instant::now();

        tick(&mut session, Some(&hand_at(DRAW, (100.0, 300.0))), now);
        tick(&mut session, Some(&hand_with_fingers(FIST)), now);
        tick(&mut session, Some(&hand_at(DRAW, (600.0, 300.0))), now);

        // The stroke after the clear starts fresh at its own position.
        assert_eq!(session.canvas().pixel(600, 300), MAGENTA);
        assert_eq!(session.canvas().pixel(350, 300), [0, 0, 0, 0]);
    }

    #[test]
    fn reports_the_dispatched_mode() {
        let mut session = session();
        let now = Instant::now();

        let report = tick(&mut session, Some(&hand_at(DRAW, (100.0, 300.0))), now);
        assert_eq!(report.mode, Some(PaintMode::Draw));

        let report = tick(&mut session, None, now);
        assert!(report.mode.is_none());
        assert!(!report.locked);
    }
}
