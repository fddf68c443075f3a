use anyhow::Result;

#[cfg(all(feature = "camera-nokhwa", feature = "display-minifb"))]
fn main() -> Result<()> {
    use std::path::PathBuf;

    use anyhow::Context;
    use fingerpaint::{
        assets,
        palette::Palette,
        pipeline::{self, camera::CameraSource, detector::MediaPipeTracker, window::WindowSink},
        session::PaintSession,
    };

    env_logger::init();

    let camera_index = env_u32("FINGERPAINT_CAMERA", 0)?;
    let width = env_u32("FINGERPAINT_WIDTH", 1280)?;
    let height = env_u32("FINGERPAINT_HEIGHT", 720)?;
    let header_dir = PathBuf::from(env_or("FINGERPAINT_HEADER_DIR", "header"));
    let detector_script = PathBuf::from(env_or("FINGERPAINT_DETECTOR", "hand_detect.py"));

    let overlays = if header_dir.is_dir() {
        assets::load_header_overlays(&header_dir, width)
            .with_context(|| format!("loading header overlays from {}", header_dir.display()))?
    } else {
        log::warn!(
            "header directory {} not found, using synthesized palette strips",
            header_dir.display()
        );
        assets::synthesized_overlays(width)
    };

    let mut session = PaintSession::new(Palette::new(overlays)?, width, height);
    let mut source =
        CameraSource::open(camera_index, width, height).context("opening camera")?;
    let mut tracker =
        MediaPipeTracker::spawn(&detector_script).context("starting hand detector")?;
    tracker.set_confidence_threshold(env_f32("FINGERPAINT_MIN_CONFIDENCE", 0.85)?);
    let mut sink = WindowSink::open("fingerpaint", width, height).context("opening window")?;

    pipeline::run(&mut source, &mut tracker, &mut sink, &mut session)?;
    Ok(())
}

#[cfg(all(feature = "camera-nokhwa", feature = "display-minifb"))]
fn env_u32(name: &str, default: u32) -> Result<u32> {
    use anyhow::Context;

    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{name} must be an integer, got {value:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(all(feature = "camera-nokhwa", feature = "display-minifb"))]
fn env_f32(name: &str, default: f32) -> Result<f32> {
    use anyhow::Context;

    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{name} must be a number, got {value:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(all(feature = "camera-nokhwa", feature = "display-minifb"))]
fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(not(all(feature = "camera-nokhwa", feature = "display-minifb")))]
fn main() -> Result<()> {
    anyhow::bail!(
        "fingerpaint was built without camera/display support; \
         enable the `camera-nokhwa` and `display-minifb` features"
    )
}
