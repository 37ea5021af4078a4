//! Responsive preview scale.
//!
//! The frame is always laid out at 600x800; on screen it is shown scaled
//! so it fits the available width. The scale is recomputed only when the
//! measured width changes.

use crate::FRAME_WIDTH;

/// Parameters of the responsive scale computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewScaleConfig {
    /// Smallest scale ever returned.
    pub min_scale: f64,
    /// Largest scale ever returned (never upscale past 1:1).
    pub max_scale: f64,
    /// Windows narrower than this use `narrow_padding`.
    pub narrow_breakpoint: f64,
    pub narrow_padding: f64,
    pub wide_padding: f64,
    /// Scale used before the first measurement arrives.
    pub initial_scale: f64,
}

impl Default for PreviewScaleConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.2,
            max_scale: 1.0,
            narrow_breakpoint: 768.0,
            narrow_padding: 32.0,
            wide_padding: 80.0,
            initial_scale: 0.8,
        }
    }
}

impl PreviewScaleConfig {
    /// Scale that fits the frame into the container.
    ///
    /// A container that has not been laid out yet (width 0) falls back to
    /// the window width.
    pub fn compute(&self, container_width: f64, window_width: f64) -> f64 {
        let base = if container_width > 0.0 {
            container_width
        } else {
            window_width
        };
        let padding = if window_width < self.narrow_breakpoint {
            self.narrow_padding
        } else {
            self.wide_padding
        };
        let scale = (base - padding) / FRAME_WIDTH as f64;
        if scale.is_nan() {
            return self.min_scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }
}

/// Tracks the current preview scale across resize notifications.
#[derive(Debug, Clone)]
pub struct PreviewScaler {
    config: PreviewScaleConfig,
    last_widths: Option<(f64, f64)>,
    scale: f64,
}

impl PreviewScaler {
    pub fn new(config: PreviewScaleConfig) -> Self {
        Self {
            scale: config.initial_scale,
            config,
            last_widths: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(PreviewScaleConfig::default())
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Feed a resize notification.
    ///
    /// Returns the new scale when the widths changed, `None` otherwise.
    pub fn on_resize(&mut self, container_width: f64, window_width: f64) -> Option<f64> {
        let widths = (container_width, window_width);
        if self.last_widths == Some(widths) {
            return None;
        }
        self.last_widths = Some(widths);
        let scale = self.config.compute(container_width, window_width);
        tracing::trace!(container_width, window_width, scale, "Preview scale updated");
        self.scale = scale;
        Some(scale)
    }
}

impl Default for PreviewScaler {
    fn default() -> Self {
        Self::with_defaults()
    }
}
