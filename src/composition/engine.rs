use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::{Result, StyleError},
    pipeline::Pipeline,
    render::{serialize, FfmpegRenderer, FilterGraph, ProgressCallback},
    styles::{OverrideBundle, Style, StyleConfig},
};

/// One entry in a batch variation run
#[derive(Debug, Clone)]
pub struct Variation {
    /// Used for the output file name and the per-item report
    pub label: String,
    pub overrides: OverrideBundle,
}

/// Per-item batch result; failures never abort the batch
#[derive(Debug)]
pub struct VariationOutcome {
    pub label: String,
    pub result: Result<PathBuf>,
}

/// Everything derived from one apply-call before the renderer is involved
#[derive(Debug)]
struct BuiltOverlay {
    config: StyleConfig,
    pipeline: Pipeline,
    graph: FilterGraph,
}

/// Main engine applying one style family to videos and images
///
/// Each apply-call is an independent unit of work: the style configuration
/// is resolved fresh, the pipeline is built pure, and only then is the
/// external renderer dispatched. Calls share no mutable state, so callers
/// may issue them concurrently without engine-side coordination.
pub struct OverlayEngine {
    style: Box<dyn Style>,
    renderer: FfmpegRenderer,
}

impl OverlayEngine {
    /// Create a new engine with the given configuration and style
    pub fn new(config: Config, style: Box<dyn Style>) -> Self {
        let renderer = FfmpegRenderer::new(config.render.clone());
        Self { style, renderer }
    }

    /// The style family this engine applies
    pub fn style(&self) -> &dyn Style {
        self.style.as_ref()
    }

    /// Apply the style to a video file
    pub async fn apply_to_video<P: AsRef<Path>>(
        &self,
        source: P,
        dest: P,
        overrides: &OverrideBundle,
    ) -> Result<PathBuf> {
        let built = self.build(overrides)?;
        self.dispatch_video(source.as_ref(), dest.as_ref(), &built, None).await
    }

    /// Apply the style to a video file, reporting advisory progress
    pub async fn apply_to_video_with_progress<P: AsRef<Path>>(
        &self,
        source: P,
        dest: P,
        overrides: &OverrideBundle,
        progress: ProgressCallback,
    ) -> Result<PathBuf> {
        let built = self.build(overrides)?;
        self.dispatch_video(source.as_ref(), dest.as_ref(), &built, Some(progress)).await
    }

    /// Apply the style to a still image
    pub async fn apply_to_image<P: AsRef<Path>>(
        &self,
        source: P,
        dest: P,
        overrides: &OverrideBundle,
    ) -> Result<PathBuf> {
        let built = self.build(overrides)?;

        info!("🖼  Applying {} overlay to image {:?}", self.style.name(), source.as_ref());
        self.renderer
            .render_image(source.as_ref(), dest.as_ref(), &built.graph)
            .await?;
        Ok(dest.as_ref().to_path_buf())
    }

    /// Apply a named preset to a video
    ///
    /// Presets are pre-baked override bundles layered onto the standard
    /// build; unknown names fail before any render dispatch.
    pub async fn apply_preset_to_video<P: AsRef<Path>>(
        &self,
        source: P,
        dest: P,
        preset: &str,
    ) -> Result<PathBuf> {
        let overrides = self.preset_overrides(preset)?;
        self.apply_to_video(source.as_ref(), dest.as_ref(), &overrides).await
    }

    /// Apply a named preset to a still image
    pub async fn apply_preset_to_image<P: AsRef<Path>>(
        &self,
        source: P,
        dest: P,
        preset: &str,
    ) -> Result<PathBuf> {
        let overrides = self.preset_overrides(preset)?;
        self.apply_to_image(source.as_ref(), dest.as_ref(), &overrides).await
    }

    /// Render several styled variations of one source video
    ///
    /// Failures are isolated per variation: the batch always runs to the
    /// end and reports an outcome for every entry.
    pub async fn apply_variations<P: AsRef<Path>>(
        &self,
        source: P,
        out_dir: P,
        variations: &[Variation],
    ) -> Vec<VariationOutcome> {
        let source = source.as_ref();
        let out_dir = out_dir.as_ref();
        info!("🎬 Rendering {} variations of {:?}", variations.len(), source);

        let mut outcomes = Vec::with_capacity(variations.len());
        for variation in variations {
            let dest = out_dir.join(format!("{}_{}.mp4", self.style.name(), variation.label));
            let result = self
                .apply_to_video(source, dest.as_path(), &variation.overrides)
                .await;
            if let Err(err) = &result {
                warn!(label = %variation.label, %err, "variation failed, continuing batch");
            }
            outcomes.push(VariationOutcome {
                label: variation.label.clone(),
                result,
            });
        }

        let succeeded = outcomes.iter().filter(|o| o.result.is_ok()).count();
        info!("   ✅ Batch complete: {}/{} variations rendered", succeeded, outcomes.len());
        outcomes
    }

    // Resolve + build + serialize; every configuration and lookup error
    // surfaces here, before the renderer is touched
    fn build(&self, overrides: &OverrideBundle) -> Result<BuiltOverlay> {
        let defaults = self.style.default_config();
        let config = StyleConfig::resolve(&defaults, overrides)?;
        let pipeline = self.style.build_pipeline(&config)?;
        let graph = serialize(&pipeline);

        debug!(style = self.style.name(), labeled = graph.labeled, "pipeline built");

        Ok(BuiltOverlay { config, pipeline, graph })
    }

    fn preset_overrides(&self, preset: &str) -> Result<OverrideBundle> {
        self.style
            .presets()
            .into_iter()
            .find(|p| p.name == preset)
            .map(|p| p.overrides)
            .ok_or_else(|| {
                StyleError::PresetNotFound {
                    family: self.style.name().to_string(),
                    name: preset.to_string(),
                }
                .into()
            })
    }

    async fn dispatch_video(
        &self,
        source: &Path,
        dest: &Path,
        built: &BuiltOverlay,
        progress: Option<ProgressCallback>,
    ) -> Result<PathBuf> {
        info!(
            "🎬 Applying {} overlay \"{}\" to {:?}",
            self.style.name(),
            built.config.text,
            source
        );
        debug!(ops = built.pipeline.ops().count(), "dispatching to renderer");

        self.renderer
            .render_video(source, dest, &built.graph, progress)
            .await?;

        info!("   ✅ Rendered to {:?}", dest);
        Ok(dest.to_path_buf())
    }
}
