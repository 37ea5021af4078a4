//! Editing session for a single clipping.
//!
//! [`Studio`] owns the active content record together with everything that
//! derives from it: the preview scale, an open crop tool, and the export
//! lifecycle. Fitting and composition are recomputed from the record on
//! demand and never stored.

use std::path::PathBuf;
use std::sync::Arc;

use varta_clipping_model::{ContentError, ContentRecord, ContentUpdate, ImageRef, ImageSlot};
use varta_common::clock::{Clock, SystemClock};
use varta_common::config::AppConfig;
use varta_common::error::{VartaError, VartaResult};
use varta_layout_core::{fit_record, PresentationParams, PreviewScaler};

use crate::compositor::ClippingScene;
use crate::crop::{CropConfig, CropTool};
use crate::export::{
    download_file_name, encode_png, print_clipping, CaptureBackend, CaptureOptions, ExportSession,
    ExportState, PrintSpooler, RasterCapture,
};
use crate::painter::RasterSurface;

/// What happened to an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Stored directly in its slot.
    Applied,
    /// Held back until the crop tool commits.
    CropOpened,
}

pub struct Studio {
    content: ContentRecord,
    config: AppConfig,
    scaler: PreviewScaler,
    crop: Option<CropTool>,
    export: ExportSession,
    capture: Box<dyn CaptureBackend>,
    clock: Arc<dyn Clock>,
}

impl Studio {
    pub fn new(content: ContentRecord, config: AppConfig) -> Self {
        Self::with_clock(content, config, Arc::new(SystemClock))
    }

    pub fn with_clock(content: ContentRecord, config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            content,
            config,
            scaler: PreviewScaler::with_defaults(),
            crop: None,
            export: ExportSession::new(),
            capture: Box::new(RasterCapture::new(RasterSurface)),
            clock,
        }
    }

    /// Replace the capture backend.
    pub fn with_capture(mut self, capture: Box<dyn CaptureBackend>) -> Self {
        self.capture = capture;
        self
    }

    pub fn content(&self) -> &ContentRecord {
        &self.content
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Merge an edit into the record and return the refitted parameters.
    pub fn apply(&mut self, update: ContentUpdate) -> PresentationParams {
        self.content.apply(update);
        let scene = self.scene();
        let estimate = scene.overflow();
        if estimate.overflows() {
            tracing::warn!(
                lines_needed = estimate.lines_needed,
                lines_available = estimate.lines_available,
                "Body text likely overflows its area"
            );
        }
        scene.params
    }

    pub fn params(&self) -> PresentationParams {
        fit_record(&self.content)
    }

    /// The current record laid out for painting.
    pub fn scene(&self) -> ClippingScene<'_> {
        ClippingScene::new(&self.content, self.clock.as_ref())
    }

    /// Route an uploaded image to its slot.
    ///
    /// Reporter photos open the crop tool instead of reaching the record;
    /// only a committed crop is stored.
    pub fn upload(&mut self, slot: ImageSlot, image: ImageRef) -> VartaResult<UploadOutcome> {
        if !slot.requires_crop() {
            self.content.apply(ContentUpdate::image(slot, Some(image)));
            tracing::info!(slot = slot.label(), "Image applied");
            return Ok(UploadOutcome::Applied);
        }

        let decoded = image.decode().map_err(content_error)?;
        let config = CropConfig::from(&self.config.crop);
        if let Some(previous) = self.crop.replace(CropTool::with_image(config, &decoded)) {
            previous.cancel();
        }
        tracing::info!(slot = slot.label(), "Crop tool opened");
        Ok(UploadOutcome::CropOpened)
    }

    pub fn crop_tool(&self) -> Option<&CropTool> {
        self.crop.as_ref()
    }

    pub fn crop_tool_mut(&mut self) -> Option<&mut CropTool> {
        self.crop.as_mut()
    }

    /// Bake the open crop into the reporter photo and close the tool.
    ///
    /// Returns `false` when no tool is open or its source is not ready; a
    /// not-ready tool stays open.
    pub fn commit_crop(&mut self) -> VartaResult<bool> {
        let Some(tool) = self.crop.as_mut() else {
            return Ok(false);
        };
        let Some(raster) = tool.commit() else {
            return Ok(false);
        };
        let png = encode_png(&raster)?;
        let image = ImageRef::from_bytes(&png).map_err(content_error)?;
        self.content
            .apply(ContentUpdate::image(ImageSlot::ReporterPhoto, Some(image)));
        self.crop = None;
        Ok(true)
    }

    /// Close the crop tool without touching the record.
    pub fn cancel_crop(&mut self) {
        if let Some(tool) = self.crop.take() {
            tool.cancel();
        }
    }

    pub fn remove_image(&mut self, slot: ImageSlot) {
        self.content.apply(ContentUpdate::image(slot, None));
    }

    /// Recompute the preview scale after a layout change.
    pub fn resize(&mut self, container_width: f64, window_width: f64) -> Option<f64> {
        self.scaler.on_resize(container_width, window_width)
    }

    pub fn preview_scale(&self) -> f64 {
        self.scaler.scale()
    }

    /// Capture the clipping at the configured pixel ratio and write it to
    /// the output directory.
    pub async fn download(&mut self) -> VartaResult<PathBuf> {
        let options = CaptureOptions::from_config(&self.config.export);
        let file_name = download_file_name(&self.config.export.file_prefix, self.clock.unix_millis());
        let scene = ClippingScene::new(&self.content, self.clock.as_ref());
        self.export
            .download(
                self.capture.as_ref(),
                &scene,
                &options,
                &self.config.output_dir,
                &file_name,
            )
            .await
    }

    pub fn print(&self, spooler: &dyn PrintSpooler) -> VartaResult<()> {
        let background = CaptureOptions::from_config(&self.config.export).background;
        print_clipping(self.capture.as_ref(), &self.scene(), spooler, background)
    }

    pub fn export_state(&self) -> &ExportState {
        self.export.state()
    }

    pub fn export_message(&self) -> Option<&'static str> {
        self.export.user_message()
    }

    /// Dismiss the success or failure banner.
    pub fn acknowledge(&mut self) {
        self.export.acknowledge();
    }
}

fn content_error(e: ContentError) -> VartaError {
    match e {
        ContentError::IoError { path, source } if source.kind() == std::io::ErrorKind::NotFound => {
            VartaError::FileNotFound { path }
        }
        other => VartaError::image(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use varta_clipping_model::{Point2D, Theme};
    use varta_common::clock::FixedClock;
    use varta_layout_core::HeadlineTier;

    use super::*;

    fn png(w: u32, h: u32) -> ImageRef {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([200, 30, 30, 255])));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        ImageRef::from_bytes(&bytes).unwrap()
    }

    fn studio() -> Studio {
        let clock = FixedClock::ist(2025, 1, 26, 9, 30).unwrap();
        Studio::with_clock(ContentRecord::default(), AppConfig::default(), Arc::new(clock))
    }

    #[test]
    fn test_apply_refits() {
        let mut studio = studio();
        let params = studio.apply(ContentUpdate::headline("x".repeat(45)));
        assert_eq!(params.headline_tier, HeadlineTier::Medium);
        let params = studio.apply(ContentUpdate::theme(Theme::ModernBlue));
        assert_eq!(params.headline_tier, HeadlineTier::Medium);
        assert_eq!(studio.content().theme, Theme::ModernBlue);
    }

    #[test]
    fn test_photo_upload_applies_directly() {
        let mut studio = studio();
        let outcome = studio.upload(ImageSlot::Photo, png(8, 8)).unwrap();
        assert_eq!(outcome, UploadOutcome::Applied);
        assert!(studio.content().has_photo());
        assert_eq!(studio.params().photo_height_px, 300);

        studio.remove_image(ImageSlot::Photo);
        assert!(!studio.content().has_photo());
        assert_eq!(studio.params().photo_height_px, 0);
    }

    #[test]
    fn test_reporter_photo_goes_through_crop() {
        let mut studio = studio();
        let outcome = studio.upload(ImageSlot::ReporterPhoto, png(80, 40)).unwrap();
        assert_eq!(outcome, UploadOutcome::CropOpened);
        assert!(studio.content().reporter_photo.is_none());

        let tool = studio.crop_tool_mut().unwrap();
        tool.set_zoom(2.0);
        tool.drag_by(Point2D::new(10.0, -5.0));

        assert!(studio.commit_crop().unwrap());
        assert!(studio.crop_tool().is_none());
        let stored = studio.content().reporter_photo.as_ref().unwrap();
        let decoded = stored.decode().unwrap();
        assert_eq!((decoded.width(), decoded.height()), (300, 300));
    }

    #[test]
    fn test_cancel_crop_leaves_slot_unset() {
        let mut studio = studio();
        studio.upload(ImageSlot::ReporterPhoto, png(10, 10)).unwrap();
        studio.cancel_crop();
        assert!(studio.crop_tool().is_none());
        assert!(studio.content().reporter_photo.is_none());
        assert!(!studio.commit_crop().unwrap());
    }

    #[test]
    fn test_undecodable_reporter_photo_is_an_error() {
        let mut studio = studio();
        let bad = ImageRef::parse("data:image/png;base64,AAAA").unwrap();
        assert!(matches!(
            studio.upload(ImageSlot::ReporterPhoto, bad),
            Err(VartaError::Image { .. })
        ));
        assert!(studio.crop_tool().is_none());
    }

    #[test]
    fn test_resize_updates_preview_scale() {
        let mut studio = studio();
        assert_eq!(studio.preview_scale(), 0.8);
        assert_eq!(studio.resize(0.0, 1280.0), Some(1.0));
        assert_eq!(studio.resize(0.0, 1280.0), None);
        let narrow = studio.resize(0.0, 400.0).unwrap();
        assert!((narrow - (400.0 - 32.0) / 600.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_download_names_file_from_clock() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.output_dir = dir.path().to_path_buf();
        config.export.pixel_ratio = 1;
        let clock = FixedClock::ist(2025, 1, 26, 9, 30).unwrap();
        let mut studio = Studio::with_clock(ContentRecord::default(), config, Arc::new(clock));

        let path = studio.download().await.unwrap();
        assert_eq!(path, dir.path().join("KustiVarta-HD-1737864000000.png"));
        assert!(path.exists());
        assert!(matches!(studio.export_state(), ExportState::Succeeded { .. }));

        studio.acknowledge();
        assert_eq!(studio.export_state(), &ExportState::Idle);
        assert!(studio.export_message().is_none());
    }
}
