//! Render a neon overlay onto a clip.
//!
//! ```text
//! cargo run --example apply_neon -- input.mp4 output.mp4
//! ```

use anyhow::Result;

use overlay_compositor::{
    composition::OverlayEngine,
    config::Config,
    styles::{bundle, StyleRegistry},
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = std::env::args().skip(1);
    let source = args.next().unwrap_or_else(|| "input.mp4".to_string());
    let dest = args.next().unwrap_or_else(|| "output.mp4".to_string());

    let registry = StyleRegistry::new();
    let engine = OverlayEngine::new(Config::default(), registry.get_style("neon").unwrap());

    for info in registry.style_catalog() {
        tracing::info!(family = %info.family, presets = ?info.presets, "available");
    }

    engine
        .apply_to_video(
            &source,
            &dest,
            &bundle(&[
                ("text", "LATE NIGHT".into()),
                ("glow_intensity", 8.into()),
                ("pulse", true.into()),
            ]),
        )
        .await?;
    Ok(())
}
