//! Capture, download, and print.
//!
//! A capture paints the composed clipping at a pixel ratio and flattens it
//! onto an opaque background. A download encodes that raster as PNG and
//! writes it to the output directory; a print hands a 1x raster to the
//! host spooler. [`ExportSession`] guards against overlapping downloads.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Command;

use image::{ImageFormat, RgbaImage};
use varta_clipping_model::masthead;
use varta_clipping_model::Color;
use varta_common::clock::Stopwatch;
use varta_common::config::ExportDefaults;
use varta_common::error::{VartaError, VartaResult};

use crate::compositor::ClippingScene;
use crate::painter::{RasterSurface, RenderSurface};
use crate::raster::flatten_onto;

/// Pixel ratio range accepted for captures.
pub const MIN_CAPTURE_RATIO: u32 = 1;
pub const MAX_CAPTURE_RATIO: u32 = 4;

/// Lifecycle of the download action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExportState {
    #[default]
    Idle,
    Exporting,
    /// The PNG was written to `path`.
    Succeeded { path: PathBuf },
    /// The capture, encode, or write failed; the user may retry.
    Failed { reason: String },
}

impl ExportState {
    pub fn is_busy(&self) -> bool {
        matches!(self, ExportState::Exporting)
    }
}

/// Capture parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Output pixels per frame pixel, within `MIN_CAPTURE_RATIO..=MAX_CAPTURE_RATIO`.
    pub pixel_ratio: u32,
    /// Painted under any transparent pixel.
    pub background: Color,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            pixel_ratio: MAX_CAPTURE_RATIO,
            background: Color::WHITE,
        }
    }
}

impl CaptureOptions {
    pub fn from_config(defaults: &ExportDefaults) -> Self {
        let background = Color::parse_hex(&defaults.background).unwrap_or_else(|| {
            tracing::warn!(
                value = %defaults.background,
                "Invalid export background colour, using white"
            );
            Color::WHITE
        });
        Self::default()
            .with_pixel_ratio(defaults.pixel_ratio)
            .with_background(background)
    }

    /// Set the pixel ratio, clamped into the supported range.
    pub fn with_pixel_ratio(mut self, pixel_ratio: u32) -> Self {
        self.pixel_ratio = pixel_ratio.clamp(MIN_CAPTURE_RATIO, MAX_CAPTURE_RATIO);
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

/// Turns a scene into an opaque raster.
pub trait CaptureBackend: Send + Sync {
    fn capture(&self, scene: &ClippingScene<'_>, options: &CaptureOptions) -> VartaResult<RgbaImage>;

    /// Backend name for logs.
    fn name(&self) -> &str;
}

/// Capture through a [`RenderSurface`].
#[derive(Debug, Clone, Default)]
pub struct RasterCapture<S = RasterSurface> {
    surface: S,
}

impl<S: RenderSurface> RasterCapture<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }
}

impl<S: RenderSurface> CaptureBackend for RasterCapture<S> {
    fn capture(&self, scene: &ClippingScene<'_>, options: &CaptureOptions) -> VartaResult<RgbaImage> {
        let painted = self.surface.paint(scene, options.pixel_ratio)?;
        Ok(flatten_onto(&painted, options.background))
    }

    fn name(&self) -> &str {
        self.surface.name()
    }
}

/// `<prefix>-<millis>.png`
pub fn download_file_name(prefix: &str, unix_millis: i64) -> String {
    format!("{prefix}-{unix_millis}.png")
}

pub fn encode_png(image: &RgbaImage) -> VartaResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| VartaError::export(format!("PNG encode failed: {e}")))?;
    Ok(bytes)
}

/// Tracks the download action across attempts.
#[derive(Debug, Default)]
pub struct ExportSession {
    state: ExportState,
}

impl ExportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ExportState {
        &self.state
    }

    /// Enter `Exporting`. Fails while another export is running.
    pub fn begin(&mut self) -> VartaResult<()> {
        if self.state.is_busy() {
            return Err(VartaError::ExportInProgress);
        }
        self.state = ExportState::Exporting;
        Ok(())
    }

    /// Record the outcome of the running export.
    pub fn finish(&mut self, result: &VartaResult<PathBuf>) {
        self.state = match result {
            Ok(path) => ExportState::Succeeded { path: path.clone() },
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                ExportState::Failed {
                    reason: e.to_string(),
                }
            }
        };
    }

    /// Dismiss a finished export's banner.
    pub fn acknowledge(&mut self) {
        if !self.state.is_busy() {
            self.state = ExportState::Idle;
        }
    }

    /// Message shown to the user for the current state, if any.
    pub fn user_message(&self) -> Option<&'static str> {
        match self.state {
            ExportState::Succeeded { .. } => Some(masthead::EXPORT_DONE_MESSAGE),
            ExportState::Failed { .. } => Some(masthead::EXPORT_FAILED_MESSAGE),
            ExportState::Idle | ExportState::Exporting => None,
        }
    }

    /// Capture `scene` and write it as `output_dir/file_name`.
    ///
    /// Encoding and the file write run on the blocking pool.
    pub async fn download(
        &mut self,
        backend: &dyn CaptureBackend,
        scene: &ClippingScene<'_>,
        options: &CaptureOptions,
        output_dir: &Path,
        file_name: &str,
    ) -> VartaResult<PathBuf> {
        self.begin()?;
        let in_flight = InFlight { session: self };
        tracing::info!(
            backend = backend.name(),
            pixel_ratio = options.pixel_ratio,
            output = %output_dir.display(),
            "Starting download"
        );

        let result = write_capture(backend, scene, options, output_dir.join(file_name)).await;
        in_flight.session.finish(&result);
        result
    }
}

/// Returns the session to `Idle` when a download future is dropped
/// before it finishes.
struct InFlight<'a> {
    session: &'a mut ExportSession,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.session.state.is_busy() {
            tracing::warn!("Download cancelled before completion");
            self.session.state = ExportState::Idle;
        }
    }
}

async fn write_capture(
    backend: &dyn CaptureBackend,
    scene: &ClippingScene<'_>,
    options: &CaptureOptions,
    path: PathBuf,
) -> VartaResult<PathBuf> {
    let stopwatch = Stopwatch::start();
    let image = backend.capture(scene, options)?;
    let (width, height) = image.dimensions();

    let target = path.clone();
    tokio::task::spawn_blocking(move || -> VartaResult<()> {
        let bytes = encode_png(&image)?;
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, bytes)?;
        Ok(())
    })
    .await
    .map_err(|e| VartaError::export(format!("export task failed: {e}")))??;

    tracing::info!(
        path = %path.display(),
        width,
        height,
        elapsed_ms = stopwatch.elapsed_ms(),
        "Clipping written"
    );
    Ok(path)
}

/// Hands a finished PNG to a printer queue.
pub trait PrintSpooler: Send + Sync {
    fn submit(&self, png: &Path) -> VartaResult<()>;

    fn name(&self) -> &str;
}

/// Prints through a host command (`lp` or `lpr`).
#[derive(Debug, Clone)]
pub struct CommandSpooler {
    program: String,
}

impl CommandSpooler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// First available of `lp`, `lpr`.
    pub fn detect() -> VartaResult<Self> {
        ["lp", "lpr"]
            .into_iter()
            .find(|program| command_exists(program))
            .map(Self::new)
            .ok_or_else(|| {
                VartaError::unsupported("No print spooler found (expected lp or lpr in PATH)")
            })
    }
}

impl PrintSpooler for CommandSpooler {
    fn submit(&self, png: &Path) -> VartaResult<()> {
        tracing::debug!(program = %self.program, file = %png.display(), "Submitting print job");
        let status = Command::new(&self.program).arg(png).status()?;
        if !status.success() {
            return Err(VartaError::export(format!(
                "{} exited with {status}",
                self.program
            )));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Capture the clipping at 1x and send it to `spooler`.
pub fn print_clipping(
    backend: &dyn CaptureBackend,
    scene: &ClippingScene<'_>,
    spooler: &dyn PrintSpooler,
    background: Color,
) -> VartaResult<()> {
    let options = CaptureOptions::default()
        .with_pixel_ratio(MIN_CAPTURE_RATIO)
        .with_background(background);
    let image = backend.capture(scene, &options)?;
    let bytes = encode_png(&image)?;

    let path = std::env::temp_dir().join(format!("varta-print-{}.png", std::process::id()));
    std::fs::write(&path, bytes)?;
    let submitted = spooler.submit(&path);
    if let Err(e) = std::fs::remove_file(&path) {
        tracing::warn!(error = %e, path = %path.display(), "Failed to remove print file");
    }
    submitted?;

    tracing::info!(spooler = spooler.name(), "Clipping sent to printer");
    Ok(())
}

fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use image::Rgba;
    use varta_clipping_model::ContentRecord;
    use varta_common::clock::FixedClock;

    use super::*;

    fn clock() -> FixedClock {
        FixedClock::ist(2025, 1, 26, 9, 30).unwrap()
    }

    struct FailingCapture;

    impl CaptureBackend for FailingCapture {
        fn capture(&self, _: &ClippingScene<'_>, _: &CaptureOptions) -> VartaResult<RgbaImage> {
            Err(VartaError::render("surface lost"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    /// Paints a transparent canvas of the requested size.
    struct ClearCapture;

    impl CaptureBackend for ClearCapture {
        fn capture(&self, _: &ClippingScene<'_>, options: &CaptureOptions) -> VartaResult<RgbaImage> {
            let img = RgbaImage::from_pixel(6 * options.pixel_ratio, 8 * options.pixel_ratio, Rgba([0, 0, 0, 0]));
            Ok(flatten_onto(&img, options.background))
        }

        fn name(&self) -> &str {
            "clear"
        }
    }

    #[derive(Default)]
    struct RecordingSpooler {
        seen: Mutex<Vec<(u32, u32)>>,
    }

    impl PrintSpooler for RecordingSpooler {
        fn submit(&self, png: &Path) -> VartaResult<()> {
            let img = image::open(png).map_err(|e| VartaError::image(e.to_string()))?;
            self.seen.lock().unwrap().push((img.width(), img.height()));
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            download_file_name("KustiVarta-HD", 1_737_864_000_000),
            "KustiVarta-HD-1737864000000.png"
        );
    }

    #[test]
    fn test_capture_options_clamp_and_parse() {
        let mut defaults = ExportDefaults::default();
        defaults.pixel_ratio = 9;
        defaults.background = "#102030".to_string();
        let opts = CaptureOptions::from_config(&defaults);
        assert_eq!(opts.pixel_ratio, 4);
        assert_eq!(opts.background, Color::rgb(0x10, 0x20, 0x30));

        defaults.pixel_ratio = 0;
        defaults.background = "teal".to_string();
        let opts = CaptureOptions::from_config(&defaults);
        assert_eq!(opts.pixel_ratio, 1);
        assert_eq!(opts.background, Color::WHITE);
    }

    #[test]
    fn test_session_state_machine() {
        let mut session = ExportSession::new();
        assert_eq!(session.state(), &ExportState::Idle);
        session.begin().unwrap();
        assert!(matches!(session.begin(), Err(VartaError::ExportInProgress)));

        session.acknowledge();
        assert!(session.state().is_busy());

        session.finish(&Err(VartaError::export("disk full")));
        assert!(matches!(session.state(), ExportState::Failed { .. }));
        assert_eq!(session.user_message(), Some(masthead::EXPORT_FAILED_MESSAGE));

        session.acknowledge();
        assert_eq!(session.state(), &ExportState::Idle);
        assert_eq!(session.user_message(), None);
    }

    #[tokio::test]
    async fn test_download_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let record = ContentRecord::default();
        let scene = ClippingScene::new(&record, &clock());
        let mut session = ExportSession::new();
        let options = CaptureOptions::default().with_pixel_ratio(1);

        let path = session
            .download(
                &RasterCapture::new(RasterSurface),
                &scene,
                &options,
                dir.path(),
                "clip.png",
            )
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("clip.png"));
        let written = image::open(&path).unwrap();
        assert_eq!((written.width(), written.height()), (600, 800));
        assert_eq!(session.state(), &ExportState::Succeeded { path });
        assert_eq!(session.user_message(), Some(masthead::EXPORT_DONE_MESSAGE));
    }

    #[tokio::test]
    async fn test_cancelled_download_releases_session() {
        let dir = tempfile::tempdir().unwrap();
        let record = ContentRecord::default();
        let scene = ClippingScene::new(&record, &clock());
        let mut session = ExportSession::new();
        let backend = RasterCapture::new(RasterSurface);
        let options = CaptureOptions::default();

        // The full-size encode is still on the blocking pool when the
        // ready branch wins, so the download future is dropped mid-flight.
        tokio::select! {
            biased;
            _ = session.download(&backend, &scene, &options, dir.path(), "first.png") => {
                panic!("download finished on its first poll");
            }
            _ = std::future::ready(()) => {}
        }
        assert_eq!(session.state(), &ExportState::Idle);
        assert_eq!(session.user_message(), None);

        let path = session
            .download(&backend, &scene, &options.with_pixel_ratio(1), dir.path(), "second.png")
            .await
            .unwrap();
        assert_eq!(session.state(), &ExportState::Succeeded { path });
    }

    #[tokio::test]
    async fn test_download_rejected_while_exporting() {
        let dir = tempfile::tempdir().unwrap();
        let record = ContentRecord::default();
        let scene = ClippingScene::new(&record, &clock());
        let mut session = ExportSession::new();
        session.begin().unwrap();

        let result = session
            .download(&ClearCapture, &scene, &CaptureOptions::default(), dir.path(), "x.png")
            .await;
        assert!(matches!(result, Err(VartaError::ExportInProgress)));
        assert!(session.state().is_busy());
        assert!(!dir.path().join("x.png").exists());
    }

    #[tokio::test]
    async fn test_failed_capture_marks_failed_and_allows_retry() {
        let dir = tempfile::tempdir().unwrap();
        let record = ContentRecord::default();
        let scene = ClippingScene::new(&record, &clock());
        let mut session = ExportSession::new();

        let result = session
            .download(&FailingCapture, &scene, &CaptureOptions::default(), dir.path(), "x.png")
            .await;
        assert!(result.is_err());
        assert!(matches!(session.state(), ExportState::Failed { .. }));

        let retry = session
            .download(&ClearCapture, &scene, &CaptureOptions::default(), dir.path(), "x.png")
            .await;
        assert!(retry.is_ok());
    }

    #[tokio::test]
    async fn test_unwritable_output_dir_marks_failed() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();
        let record = ContentRecord::default();
        let scene = ClippingScene::new(&record, &clock());
        let mut session = ExportSession::new();

        let result = session
            .download(&ClearCapture, &scene, &CaptureOptions::default(), &blocker.join("out"), "x.png")
            .await;
        assert!(result.is_err());
        assert!(matches!(session.state(), ExportState::Failed { .. }));
    }

    #[test]
    fn test_capture_is_opaque() {
        let record = ContentRecord::default();
        let scene = ClippingScene::new(&record, &clock());
        let img = ClearCapture
            .capture(&scene, &CaptureOptions::default().with_pixel_ratio(2))
            .unwrap();
        assert_eq!(img.dimensions(), (12, 16));
        assert!(img.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_print_uses_single_scale() {
        let record = ContentRecord::default();
        let scene = ClippingScene::new(&record, &clock());
        let spooler = RecordingSpooler::default();
        print_clipping(&RasterCapture::new(RasterSurface), &scene, &spooler, Color::WHITE).unwrap();
        assert_eq!(*spooler.seen.lock().unwrap(), vec![(600, 800)]);
    }
}
