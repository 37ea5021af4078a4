//! Circular crop tool.
//!
//! Lets the user pan and zoom a source image inside a fixed circular
//! viewport, then bakes the visible region into a fixed-size square.
//!
//! # Coordinate spaces
//!
//! Pan offsets are recorded in *viewport* pixels (the on-screen preview).
//! On commit they are converted to *output* pixels by the constant factor
//! `output_size / viewport_size`.
//!
//! The preview is clipped to a circle; the committed output is a full
//! opaque square. Any circular presentation happens wherever the output
//! is displayed.

use image::{DynamicImage, RgbaImage};
use varta_clipping_model::{Circle, Color, Point2D, Rect};
use varta_common::config::CropDefaults;

use crate::raster::{cover_placement, draw_image, rgba, stroke_ring, Clip};

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 3.0;

/// Geometry and colours of the crop tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropConfig {
    /// Side of the square preview viewport.
    pub viewport_size: u32,
    /// Side of the square committed raster.
    pub output_size: u32,
    /// Gap between the viewport edge and the circular clip.
    pub inset: f64,
    /// Affordance ring thickness.
    pub ring_width: f64,
    pub ring_color: Color,
    /// Preview fill outside the image.
    pub background: Color,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self::from(&CropDefaults::default())
    }
}

impl From<&CropDefaults> for CropConfig {
    fn from(defaults: &CropDefaults) -> Self {
        Self {
            viewport_size: defaults.viewport_size.max(1),
            output_size: defaults.output_size.max(1),
            inset: defaults.inset,
            ring_width: 4.0,
            ring_color: Color::rgb(0xea, 0x58, 0x0c),
            background: Color::rgb(0xf3, 0xf4, 0xf6),
        }
    }
}

impl CropConfig {
    /// Factor converting viewport-space pan into output space.
    pub fn output_factor(&self) -> f64 {
        f64::from(self.output_size) / f64::from(self.viewport_size)
    }

    fn viewport_rect(&self) -> Rect {
        let side = f64::from(self.viewport_size);
        Rect::new(0.0, 0.0, side, side)
    }

    fn output_rect(&self) -> Rect {
        let side = f64::from(self.output_size);
        Rect::new(0.0, 0.0, side, side)
    }

    /// The circular clip applied to the preview.
    pub fn clip_circle(&self) -> Circle {
        Circle::inscribed(&self.viewport_rect(), self.inset)
    }
}

/// Pan and zoom of one crop interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropState {
    /// Zoom on top of the cover scale, always in `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom: f64,
    /// Offset from the centred position, in viewport pixels.
    pub pan: Point2D,
}

impl Default for CropState {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            pan: Point2D::ORIGIN,
        }
    }
}

impl CropState {
    /// Build a state with the zoom clamped into range.
    pub fn new(zoom: f64, pan: Point2D) -> Self {
        let zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            MIN_ZOOM
        };
        Self { zoom, pan }
    }
}

/// Whether a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropPhase {
    Idle,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Idle,
    /// `anchor = pointer_at_down - pan_at_down`.
    Dragging { anchor: Point2D },
}

/// Interactive crop of one source image.
#[derive(Debug, Clone)]
pub struct CropTool {
    config: CropConfig,
    source: Option<RgbaImage>,
    state: CropState,
    drag: Drag,
}

impl CropTool {
    /// A tool whose source image has not loaded yet.
    pub fn new(config: CropConfig) -> Self {
        Self {
            config,
            source: None,
            state: CropState::default(),
            drag: Drag::Idle,
        }
    }

    /// A tool with its source image already loaded.
    pub fn with_image(config: CropConfig, image: &DynamicImage) -> Self {
        let mut tool = Self::new(config);
        tool.load(image);
        tool
    }

    /// Provide the decoded source image.
    pub fn load(&mut self, image: &DynamicImage) {
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            "Crop source loaded"
        );
        self.source = Some(image.to_rgba8());
    }

    pub fn is_ready(&self) -> bool {
        self.source.is_some()
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn state(&self) -> CropState {
        self.state
    }

    pub fn phase(&self) -> CropPhase {
        match self.drag {
            Drag::Idle => CropPhase::Idle,
            Drag::Dragging { .. } => CropPhase::Dragging,
        }
    }

    /// Begin a drag. Ignored outside the viewport.
    ///
    /// Returns whether a drag started.
    pub fn pointer_down(&mut self, pointer: Point2D) -> bool {
        if !self.config.viewport_rect().contains(pointer) {
            return false;
        }
        self.drag = Drag::Dragging {
            anchor: pointer - self.state.pan,
        };
        true
    }

    /// Move the image with the pointer while dragging.
    ///
    /// Returns whether the pan changed.
    pub fn pointer_move(&mut self, pointer: Point2D) -> bool {
        match self.drag {
            Drag::Dragging { anchor } => {
                let pan = pointer - anchor;
                let changed = pan != self.state.pan;
                self.state.pan = pan;
                changed
            }
            Drag::Idle => false,
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = Drag::Idle;
    }

    /// The pointer left the viewport; ends any drag.
    pub fn pointer_leave(&mut self) {
        self.drag = Drag::Idle;
    }

    /// One complete drag from the viewport centre, shifting the pan by
    /// `delta`.
    pub fn drag_by(&mut self, delta: Point2D) {
        let start = self.config.viewport_rect().center();
        if self.pointer_down(start) {
            self.pointer_move(start + delta);
            self.pointer_up();
        }
    }

    /// Set the zoom from the slider, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    ///
    /// Non-finite values and changes during a drag are ignored. Returns
    /// the zoom now in effect.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        if zoom.is_finite() && self.phase() == CropPhase::Idle {
            self.state.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
        self.state.zoom
    }

    /// Where the source image lands in the preview viewport.
    pub fn preview_placement(&self) -> Option<Rect> {
        let source = self.source.as_ref()?;
        Some(cover_placement(
            source.width(),
            source.height(),
            &self.config.viewport_rect(),
            self.state.zoom,
            self.state.pan,
        ))
    }

    /// Where the source image lands in the output square.
    pub fn output_placement(&self) -> Option<Rect> {
        let source = self.source.as_ref()?;
        Some(cover_placement(
            source.width(),
            source.height(),
            &self.config.output_rect(),
            self.state.zoom,
            self.state.pan.scaled(self.config.output_factor()),
        ))
    }

    /// Draw the preview: background, circularly clipped image, ring.
    ///
    /// `None` while the source image is not loaded.
    pub fn render_preview(&self) -> Option<RgbaImage> {
        let source = self.source.as_ref()?;
        let placement = self.preview_placement()?;
        let side = self.config.viewport_size;

        let mut canvas = RgbaImage::from_pixel(side, side, rgba(self.config.background));
        let circle = self.config.clip_circle();
        draw_image(&mut canvas, source, &placement, Some(&Clip::Circle(circle)));
        stroke_ring(
            &mut canvas,
            &circle,
            self.config.ring_width,
            rgba(self.config.ring_color),
        );
        Some(canvas)
    }

    /// Bake the current pan and zoom into an opaque square raster.
    ///
    /// Ends any drag in progress. `None` while the source image is not
    /// loaded; the tool stays open in that case.
    pub fn commit(&mut self) -> Option<RgbaImage> {
        self.pointer_up();
        let source = self.source.as_ref()?;
        let placement = self.output_placement()?;
        let side = self.config.output_size;

        let mut canvas = RgbaImage::from_pixel(side, side, rgba(Color::WHITE));
        draw_image(&mut canvas, source, &placement, None);

        tracing::info!(
            zoom = self.state.zoom,
            pan_x = self.state.pan.x,
            pan_y = self.state.pan.y,
            size = side,
            "Crop committed"
        );
        Some(canvas)
    }

    /// Discard the interaction without producing anything.
    pub fn cancel(self) {
        tracing::debug!("Crop cancelled");
    }
}
