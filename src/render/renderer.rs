//! External FFmpeg invocation
//!
//! The engine's only suspension point: a serialized filter graph plus source
//! and destination paths are handed to the `ffmpeg` binary. Failures carry
//! the renderer's stderr verbatim; progress lines are parsed and reported
//! but never drive control flow.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};

use tokio::task;
use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::render::filter::FilterGraph;

/// Advisory progress sample parsed from the renderer's key=value stream
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderProgress {
    pub out_time_secs: f64,
    pub frame: u64,
}

/// Callback receiving advisory progress samples
pub type ProgressCallback = Box<dyn Fn(RenderProgress) + Send + 'static>;

/// Runs the external FFmpeg process for video and still-image targets
pub struct FfmpegRenderer {
    config: RenderConfig,
}

impl FfmpegRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Probe for the configured binary
    pub fn check_available(&self) -> bool {
        Command::new(&self.config.binary)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Apply a filter graph to a video file
    pub async fn render_video<P: AsRef<Path>>(
        &self,
        source: P,
        dest: P,
        graph: &FilterGraph,
        progress: Option<ProgressCallback>,
    ) -> Result<()> {
        let mut args = self.common_args(source.as_ref(), graph, progress.is_some());
        args.extend([
            "-c:v".to_string(),
            self.config.codec.clone(),
            "-crf".to_string(),
            self.config.crf().to_string(),
            "-pix_fmt".to_string(),
            self.config.pixel_format.clone(),
        ]);
        if graph.labeled {
            // keep any audio stream alongside the filtered video
            args.extend(["-map".to_string(), "0:a?".to_string()]);
        }
        args.extend(["-c:a".to_string(), "copy".to_string()]);
        args.push(dest.as_ref().display().to_string());

        self.run(args, progress).await
    }

    /// Apply a filter graph to a single image
    pub async fn render_image<P: AsRef<Path>>(
        &self,
        source: P,
        dest: P,
        graph: &FilterGraph,
    ) -> Result<()> {
        let mut args = self.common_args(source.as_ref(), graph, false);
        args.extend(["-frames:v".to_string(), "1".to_string()]);
        args.push(dest.as_ref().display().to_string());

        self.run(args, None).await
    }

    fn common_args(&self, source: &Path, graph: &FilterGraph, with_progress: bool) -> Vec<String> {
        let mut args = Vec::new();
        if self.config.overwrite {
            args.push("-y".to_string());
        }
        if with_progress {
            args.extend([
                "-progress".to_string(),
                "pipe:1".to_string(),
                "-nostats".to_string(),
            ]);
        }
        args.extend(["-i".to_string(), source.display().to_string()]);
        if graph.labeled {
            args.extend([
                "-filter_complex".to_string(),
                graph.graph.clone(),
                "-map".to_string(),
                "[out]".to_string(),
            ]);
        } else {
            args.extend(["-vf".to_string(), graph.graph.clone()]);
        }
        args
    }

    async fn run(&self, args: Vec<String>, progress: Option<ProgressCallback>) -> Result<()> {
        if !self.check_available() {
            return Err(RenderError::Unavailable {
                binary: self.config.binary.clone(),
            }
            .into());
        }

        debug!(?args, "running renderer");
        let binary = self.config.binary.clone();

        task::spawn_blocking(move || run_blocking(&binary, &args, progress))
            .await
            .map_err(|e| RenderError::Failure {
                reason: format!("Failed to join renderer task: {e}"),
            })?
    }
}

fn run_blocking(binary: &str, args: &[String], progress: Option<ProgressCallback>) -> Result<()> {
    let mut child = Command::new(binary)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| RenderError::Failure {
            reason: format!("Failed to start renderer: {e}"),
        })?;

    let stderr = child.stderr.take().ok_or_else(|| RenderError::Failure {
        reason: "Failed to capture renderer stderr".to_string(),
    })?;
    // drain stderr concurrently so the renderer never blocks on a full pipe
    let stderr_task = std::thread::spawn(move || -> String {
        let mut reader = BufReader::new(stderr);
        let mut output = String::new();
        match reader.read_to_string(&mut output) {
            Ok(_) => output,
            Err(err) => format!("<failed to read renderer stderr: {err}>"),
        }
    });

    if let Some(stdout) = child.stdout.take() {
        let mut latest = RenderProgress::default();
        let reader = BufReader::new(stdout);
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => break,
            };
            if let Some((key, value)) = line.trim().split_once('=') {
                match key {
                    "out_time_us" => {
                        if let Ok(us) = value.parse::<i64>() {
                            latest.out_time_secs = us as f64 / 1_000_000.0;
                        }
                    }
                    "frame" => {
                        latest.frame = value.parse().unwrap_or(latest.frame);
                    }
                    "progress" => {
                        if let Some(cb) = &progress {
                            cb(latest);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    let status = child.wait().map_err(|e| RenderError::Failure {
        reason: format!("Failed to wait on renderer: {e}"),
    })?;
    let stderr_output = stderr_task
        .join()
        .unwrap_or_else(|_| "<failed to join stderr reader>".to_string());

    if !status.success() {
        warn!(?status, "renderer exited with failure");
        return Err(RenderError::Failure {
            reason: stderr_output.trim().to_string(),
        }
        .into());
    }

    Ok(())
}
