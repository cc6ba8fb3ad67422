use anyhow::{anyhow, Context, Result};
use eframe::NativeOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use video_menu::{load_entries, MenuConfig, VideoMenuApp};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("video_menu=info")),
        )
        .init();

    ffmpeg_next::init().context("Failed to initialize FFmpeg")?;
    ffmpeg_next::util::log::set_level(ffmpeg_next::util::log::Level::Error);

    let config = MenuConfig::default();
    let dir = std::env::current_dir().context("Cannot determine working directory")?;
    let entries = load_entries(&dir, &config.extensions);
    info!("Found {} videos in {}", entries.len(), dir.display());

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.as_str())
            .with_inner_size(config.window_size)
            .with_resizable(false),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(VideoMenuApp::new(cc, config, entries)))),
    )
    .map_err(|e| anyhow!("Menu window failed: {e}"))
}
