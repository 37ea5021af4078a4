//! Raster painter for composed clippings.

use image::RgbaImage;
use varta_clipping_model::masthead;
use varta_clipping_model::{Circle, Color, ImageRef, Point2D, Rect, ThemePalette};
use varta_common::error::{VartaError, VartaResult};
use varta_layout_core::overflow::{chars_per_line, AVERAGE_ADVANCE};

use crate::compositor::ClippingScene;
use crate::raster::{
    cover_placement, draw_image, draw_text, draw_text_centered, fill_disc, fill_rect, hline, rgba,
    stroke_rect, stroke_ring, wrap_text, Clip,
};

/// Largest pixel ratio a surface will paint at.
pub const MAX_PIXEL_RATIO: u32 = 16;

/// Something that can turn a composed clipping into pixels.
pub trait RenderSurface: Send + Sync {
    /// Paint the clipping at `pixel_ratio` output pixels per frame pixel.
    fn paint(&self, scene: &ClippingScene<'_>, pixel_ratio: u32) -> VartaResult<RgbaImage>;

    /// Surface name for logs.
    fn name(&self) -> &str;
}

/// Software painter using bitmap glyphs.
///
/// Text is drawn with the 8x8 face scaled so its advance is exactly the
/// average advance the fitter assumes, and each block is clipped to its
/// box.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterSurface;

impl RenderSurface for RasterSurface {
    fn paint(&self, scene: &ClippingScene<'_>, pixel_ratio: u32) -> VartaResult<RgbaImage> {
        if pixel_ratio == 0 || pixel_ratio > MAX_PIXEL_RATIO {
            return Err(VartaError::render(format!(
                "pixel ratio {pixel_ratio} outside 1..={MAX_PIXEL_RATIO}"
            )));
        }
        let mut painter = Painter::new(scene, pixel_ratio);
        painter.frame();
        painter.header();
        painter.dateline();
        painter.headline();
        painter.photo();
        painter.body();
        painter.footer();
        Ok(painter.canvas)
    }

    fn name(&self) -> &str {
        "raster"
    }
}

struct Painter<'s, 'a> {
    scene: &'s ClippingScene<'a>,
    palette: &'static ThemePalette,
    ratio: f64,
    canvas: RgbaImage,
}

impl<'s, 'a> Painter<'s, 'a> {
    fn new(scene: &'s ClippingScene<'a>, pixel_ratio: u32) -> Self {
        let palette = scene.content.theme.palette();
        let frame = scene.composition.frame.scaled(f64::from(pixel_ratio));
        let canvas = RgbaImage::from_pixel(
            frame.w.round() as u32,
            frame.h.round() as u32,
            rgba(palette.background),
        );
        Self {
            scene,
            palette,
            ratio: f64::from(pixel_ratio),
            canvas,
        }
    }

    fn px(&self, rect: &Rect) -> Rect {
        rect.scaled(self.ratio)
    }

    fn px_circle(&self, circle: &Circle) -> Circle {
        circle.scaled(self.ratio)
    }

    /// Output-pixel advance of one glyph at `font_px`.
    fn advance(&self, font_px: f64) -> f64 {
        font_px * AVERAGE_ADVANCE * self.ratio
    }

    fn fill(&mut self, rect: &Rect, color: Color) {
        let rect = self.px(rect);
        fill_rect(&mut self.canvas, &rect, rgba(color));
    }

    fn label(&mut self, rect: &Rect, text: &str, font_px: f64, color: Color) {
        let rect = self.px(rect);
        let advance = self.advance(font_px);
        let line = Rect::new(rect.x, rect.y + ((rect.h - advance) / 2.0).max(0.0), rect.w, advance);
        draw_text_centered(&mut self.canvas, &line, text, rgba(color), advance);
    }

    /// Draw `image` covering `bounds`, clipped to `clip`. Returns whether
    /// anything was drawn.
    fn image(&mut self, image: Option<&ImageRef>, bounds: &Rect, clip: Clip) -> bool {
        let Some(image) = image else {
            return false;
        };
        let decoded = match image.decode() {
            Ok(decoded) => decoded.to_rgba8(),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping undecodable image");
                return false;
            }
        };
        let bounds = self.px(bounds);
        let placement = cover_placement(
            decoded.width(),
            decoded.height(),
            &bounds,
            1.0,
            Point2D::ORIGIN,
        );
        draw_image(&mut self.canvas, &decoded, &placement, Some(&clip));
        true
    }

    fn frame(&mut self) {
        let c = &self.scene.composition;
        let frame = self.px(&c.frame);
        stroke_rect(
            &mut self.canvas,
            &frame,
            c.border_width * self.ratio,
            rgba(self.palette.border),
        );
    }

    fn header(&mut self) {
        let scene = self.scene;
        let header = &scene.composition.header;
        let p = self.palette;

        self.fill(&header.band, p.header_background);
        let band = self.px(&header.band);
        hline(
            &mut self.canvas,
            band.x,
            band.right(),
            band.bottom() - 2.0 * self.ratio,
            2.0 * self.ratio,
            rgba(p.border),
        );

        let logo = self.px_circle(&header.logo);
        if !self.image(scene.content.logo.as_ref(), &header.logo.bounds(), Clip::Circle(logo)) {
            fill_disc(&mut self.canvas, &logo, rgba(p.strip_background));
            self.label(&header.logo.bounds(), masthead::LOGO_PLACEHOLDER, 12.0, p.strip_text);
        }
        stroke_ring(&mut self.canvas, &logo, 2.0 * self.ratio, rgba(p.border));

        self.label(&header.title, masthead::TITLE, 32.0, p.header_text);
        self.fill(&header.tagline, p.strip_background);
        self.label(&header.tagline, masthead::TAGLINE, 12.0, p.strip_text);
    }

    fn dateline(&mut self) {
        let scene = self.scene;
        let bar = scene.composition.dateline;
        let p = self.palette;
        let px = self.px(&bar);
        let rule = self.ratio;
        hline(&mut self.canvas, px.x, px.right(), px.y, rule, rgba(p.border));
        hline(&mut self.canvas, px.x, px.right(), px.bottom() - rule, rule, rgba(p.border));

        let third = bar.w / 3.0;
        let cells = [
            (Rect::new(bar.x, bar.y, third, bar.h), masthead::REGISTRATION),
            (Rect::new(bar.x + third, bar.y, third, bar.h), scene.dateline.as_str()),
            (Rect::new(bar.x + 2.0 * third, bar.y, third, bar.h), masthead::EDITOR_CREDIT),
        ];
        for (cell, text) in cells {
            self.label(&cell, text, 11.0, p.text);
        }
    }

    /// Draw wrapped lines top-down into `rect`, dropping whatever does not fit.
    fn paragraph(&mut self, rect: &Rect, lines: &[String], font_px: f64, line_height: f64, color: Color) {
        let rect = self.px(rect);
        let advance = self.advance(font_px);
        let pitch = font_px * line_height * self.ratio;
        let offset = ((pitch - advance) / 2.0).max(0.0);
        for (i, line) in lines.iter().enumerate() {
            let top = rect.y + i as f64 * pitch;
            if top + pitch > rect.bottom() + 0.5 {
                break;
            }
            draw_text(
                &mut self.canvas,
                rect.x,
                top + offset,
                line,
                rgba(color),
                advance,
                Some(&rect),
            );
        }
    }

    fn headline(&mut self) {
        let scene = self.scene;
        let headline = &scene.composition.headline;
        let p = self.palette;
        let lines = wrap_text(scene.content.display_headline(), headline.chars_per_line);
        self.paragraph(
            &headline.text,
            &lines,
            f64::from(headline.font_px),
            headline.line_height,
            p.text,
        );
        self.fill(&headline.rule, p.accent);
    }

    fn photo(&mut self) {
        let scene = self.scene;
        let Some(photo) = &scene.composition.photo else {
            return;
        };
        let p = self.palette;
        let frame_px = self.px(&photo.frame);
        if !self.image(scene.content.photo.as_ref(), &photo.frame, Clip::Rect(frame_px)) {
            self.fill(&photo.frame, p.strip_background);
        }
        stroke_rect(&mut self.canvas, &frame_px, self.ratio, rgba(p.border));
        self.fill(&photo.caption, p.strip_background);
        self.label(&photo.caption, masthead::PHOTO_CAPTION, 10.0, p.strip_text);
    }

    fn body(&mut self) {
        let scene = self.scene;
        let params = scene.params;
        let columns = &scene.composition.columns;
        let Some(first) = columns.first() else {
            return;
        };
        let font_px = f64::from(params.body_font_px);
        let per_line = chars_per_line(first.w, params.body_font_px);
        let line_px = font_px * params.line_height;
        let per_column = (first.h / line_px).floor().max(0.0) as usize;
        if per_column == 0 {
            return;
        }

        let lines = wrap_text(scene.content.display_body(), per_line);
        for (column, chunk) in columns.iter().zip(lines.chunks(per_column)) {
            self.paragraph(column, chunk, font_px, params.line_height, self.palette.text);
        }
    }

    fn footer(&mut self) {
        let scene = self.scene;
        let footer = &scene.composition.footer;
        let p = self.palette;

        self.fill(&footer.rule, p.border);

        let disc = self.px_circle(&footer.reporter_photo);
        let reporter = scene.content.reporter_photo.as_ref();
        if !self.image(reporter, &footer.reporter_photo.bounds(), Clip::Circle(disc)) {
            fill_disc(&mut self.canvas, &disc, rgba(p.strip_background));
            self.label(
                &footer.reporter_photo.bounds(),
                masthead::REPORTER_PHOTO_PLACEHOLDER,
                12.0,
                p.strip_text,
            );
        }
        stroke_ring(&mut self.canvas, &disc, 2.0 * self.ratio, rgba(p.accent));

        self.left_label(&footer.label, masthead::REPORTER_LABEL, 10.0, p.accent);
        self.left_label(&footer.name, scene.content.display_reporter_name(), 20.0, p.text);
        self.left_label(&footer.designation, scene.content.display_designation(), 12.0, p.text);

        self.fill(&footer.badge, p.strip_background);
        let badge_px = self.px(&footer.badge);
        stroke_rect(&mut self.canvas, &badge_px, self.ratio, rgba(p.border));
        let half = footer.badge.h / 2.0;
        let top = Rect::new(footer.badge.x, footer.badge.y + 4.0, footer.badge.w, half - 4.0);
        let bottom = Rect::new(footer.badge.x, footer.badge.y + half, footer.badge.w, half - 4.0);
        self.label(&top, masthead::BADGE_TITLE, 11.0, p.strip_text);
        self.label(&bottom, masthead::BADGE_SUBTITLE, 16.0, p.strip_text);
    }

    fn left_label(&mut self, rect: &Rect, text: &str, font_px: f64, color: Color) {
        let rect = self.px(rect);
        let advance = self.advance(font_px);
        let max_chars = (rect.w / advance).floor().max(0.0) as usize;
        let line: String = text.chars().take(max_chars).collect();
        let y = rect.y + ((rect.h - advance) / 2.0).max(0.0);
        draw_text(&mut self.canvas, rect.x, y, &line, rgba(color), advance, Some(&rect));
    }
}
