//! Onroad HUD - Main Entry Point

use std::path::PathBuf;

use anyhow::{bail, Context};
use onroad::{init_logging, Driver, ReplaySource, Settings};
use render::{AssetStore, RasterSurface, VideoFrame};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    info!("=== Onroad HUD v{} ===", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref()).context("loading settings")?;

    let Some(replay_path) = settings.replay_path.as_deref() else {
        bail!("no replay_path configured (set it in the settings file or ONROAD__REPLAY_PATH)");
    };
    let source = ReplaySource::open(replay_path)
        .with_context(|| format!("opening replay {}", replay_path.display()))?;

    let assets = AssetStore::load(&settings.assets_dir);
    info!(
        "Loaded {} icons and {} fonts from {}",
        assets.icon_count(),
        assets.font_count(),
        settings.assets_dir.display()
    );
    let surface = RasterSurface::new(assets, settings.camera);

    let background = match settings.background_path.as_deref() {
        Some(path) => match VideoFrame::open(path) {
            Ok(frame) => Some(frame),
            Err(e) => {
                warn!("Failed to load background {}: {}", path.display(), e);
                None
            }
        },
        None => None,
    };

    // Commands arrive from the gesture shell of an interactive front end
    let (_commands, rx) = mpsc::channel(16);
    let mut driver = Driver::new(&settings, source, surface, rx)?.with_background(background);
    let stats = driver.run().await?;

    info!("Driver stopped: {}", serde_json::to_string(&stats)?);

    if let Some(path) = settings.snapshot_path.as_deref() {
        driver
            .backend()
            .save_png(path)
            .with_context(|| format!("saving snapshot {}", path.display()))?;
        info!("Saved last frame to {}", path.display());
    }

    Ok(())
}
