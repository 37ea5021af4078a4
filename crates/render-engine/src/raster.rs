//! Raster drawing primitives.
//!
//! All coordinates here are in output pixels. Callers scale frame-space
//! geometry by the pixel ratio before drawing.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};
use varta_clipping_model::{Circle, Color, Point2D, Rect};

/// Side of one bitmap glyph cell at scale 1.
pub const GLYPH_CELL: u32 = 8;

/// Clip region applied while drawing an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clip {
    Rect(Rect),
    Circle(Circle),
}

impl Clip {
    fn contains(&self, p: Point2D) -> bool {
        match self {
            Clip::Rect(r) => r.contains(p),
            Clip::Circle(c) => c.contains(p),
        }
    }

    fn bounds(&self) -> Rect {
        match self {
            Clip::Rect(r) => *r,
            Clip::Circle(c) => c.bounds(),
        }
    }
}

pub fn rgba(color: Color) -> Rgba<u8> {
    let [r, g, b] = color.0;
    Rgba([r, g, b, 255])
}

/// Source-over blend of `src` onto `dst`.
pub fn blend_pixel(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let a = f64::from(src[3]) / 255.0;
    if a <= 0.0 {
        return dst;
    }
    let inv = 1.0 - a;
    let mix = |d: u8, s: u8| {
        (f64::from(d) * inv + f64::from(s) * a)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    let out_a = (f64::from(src[3]) + f64::from(dst[3]) * inv)
        .round()
        .clamp(0.0, 255.0) as u8;
    Rgba([
        mix(dst[0], src[0]),
        mix(dst[1], src[1]),
        mix(dst[2], src[2]),
        out_a,
    ])
}

/// Integer pixel span `[start, end)` covered by `rect`, clamped to the image.
fn pixel_span(img: &RgbaImage, rect: &Rect) -> (u32, u32, u32, u32) {
    let clamp_x = |v: f64| v.round().clamp(0.0, f64::from(img.width())) as u32;
    let clamp_y = |v: f64| v.round().clamp(0.0, f64::from(img.height())) as u32;
    (
        clamp_x(rect.x),
        clamp_y(rect.y),
        clamp_x(rect.right()),
        clamp_y(rect.bottom()),
    )
}

fn put_blended(img: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>) {
    let dst = *img.get_pixel(x, y);
    img.put_pixel(x, y, blend_pixel(dst, color));
}

pub fn fill_rect(img: &mut RgbaImage, rect: &Rect, color: Rgba<u8>) {
    let (x0, y0, x1, y1) = pixel_span(img, rect);
    for y in y0..y1 {
        for x in x0..x1 {
            put_blended(img, x, y, color);
        }
    }
}

/// Outline drawn inside `rect`, `width` pixels thick.
pub fn stroke_rect(img: &mut RgbaImage, rect: &Rect, width: f64, color: Rgba<u8>) {
    let w = width.min(rect.w / 2.0).min(rect.h / 2.0).max(0.0);
    fill_rect(img, &Rect::new(rect.x, rect.y, rect.w, w), color);
    fill_rect(img, &Rect::new(rect.x, rect.bottom() - w, rect.w, w), color);
    fill_rect(img, &Rect::new(rect.x, rect.y + w, w, rect.h - 2.0 * w), color);
    fill_rect(
        img,
        &Rect::new(rect.right() - w, rect.y + w, w, rect.h - 2.0 * w),
        color,
    );
}

/// Horizontal rule of `thickness` pixels starting at `y`.
pub fn hline(img: &mut RgbaImage, x0: f64, x1: f64, y: f64, thickness: f64, color: Rgba<u8>) {
    fill_rect(img, &Rect::from_edges(x0, y, x1, y + thickness), color);
}

pub fn fill_disc(img: &mut RgbaImage, circle: &Circle, color: Rgba<u8>) {
    let (x0, y0, x1, y1) = pixel_span(img, &circle.bounds());
    for y in y0..y1 {
        for x in x0..x1 {
            let p = Point2D::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if circle.contains(p) {
                put_blended(img, x, y, color);
            }
        }
    }
}

/// Ring centred on the circle's edge, `width` pixels thick.
pub fn stroke_ring(img: &mut RgbaImage, circle: &Circle, width: f64, color: Rgba<u8>) {
    let half = width / 2.0;
    let outer = Circle::new(circle.center, circle.radius + half);
    let (x0, y0, x1, y1) = pixel_span(img, &outer.bounds());
    for y in y0..y1 {
        for x in x0..x1 {
            let p = Point2D::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let d = circle.center.distance_to(&p);
            if (d - circle.radius).abs() <= half {
                put_blended(img, x, y, color);
            }
        }
    }
}

/// Placement of an image scaled to cover `target`, zoomed and then shifted
/// by `pan`.
///
/// The cover scale is the smallest scale at which the image fills the
/// target on both axes.
pub fn cover_placement(src_w: u32, src_h: u32, target: &Rect, zoom: f64, pan: Point2D) -> Rect {
    let src_w = f64::from(src_w.max(1));
    let src_h = f64::from(src_h.max(1));
    let scale = (target.w / src_w).max(target.h / src_h) * zoom;
    let w = src_w * scale;
    let h = src_h * scale;
    Rect::new(
        target.x + (target.w - w) / 2.0 + pan.x,
        target.y + (target.h - h) / 2.0 + pan.y,
        w,
        h,
    )
}

/// Draw `src` stretched into `dest`, sampling nearest-neighbour and
/// blending by the source alpha. Pixels outside `clip` are left untouched.
pub fn draw_image(img: &mut RgbaImage, src: &RgbaImage, dest: &Rect, clip: Option<&Clip>) {
    if dest.w <= 0.0 || dest.h <= 0.0 || src.width() == 0 || src.height() == 0 {
        return;
    }
    let area = match clip {
        Some(c) => {
            let b = c.bounds();
            Rect::from_edges(
                b.x.max(dest.x),
                b.y.max(dest.y),
                b.right().min(dest.right()),
                b.bottom().min(dest.bottom()),
            )
        }
        None => *dest,
    };
    let (x0, y0, x1, y1) = pixel_span(img, &area);
    let sx_ratio = f64::from(src.width()) / dest.w;
    let sy_ratio = f64::from(src.height()) / dest.h;
    for y in y0..y1 {
        for x in x0..x1 {
            let p = Point2D::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if let Some(c) = clip {
                if !c.contains(p) {
                    continue;
                }
            }
            let sx = ((p.x - dest.x) * sx_ratio).floor();
            let sy = ((p.y - dest.y) * sy_ratio).floor();
            if sx < 0.0 || sy < 0.0 {
                continue;
            }
            let (sx, sy) = (sx as u32, sy as u32);
            if sx >= src.width() || sy >= src.height() {
                continue;
            }
            put_blended(img, x, y, *src.get_pixel(sx, sy));
        }
    }
}

/// Composite the image over an opaque background colour.
pub fn flatten_onto(img: &RgbaImage, background: Color) -> RgbaImage {
    let bg = rgba(background);
    let mut out = RgbaImage::from_pixel(img.width(), img.height(), bg);
    for (x, y, px) in img.enumerate_pixels() {
        out.put_pixel(x, y, blend_pixel(bg, *px));
    }
    out
}

/// Width of `text` when every glyph advances by `advance` pixels.
pub fn text_width(text: &str, advance: f64) -> f64 {
    text.chars().count() as f64 * advance
}

/// Draw a single line of bitmap text with its top-left at `(x, y)`.
///
/// Each glyph occupies a square cell `advance` pixels wide, so a line of
/// `n` characters spans exactly `n * advance`. Ink outside `clip` is
/// dropped. Characters without a bitmap glyph are drawn as a hollow box
/// so the line keeps its shape.
pub fn draw_text(
    img: &mut RgbaImage,
    x: f64,
    y: f64,
    text: &str,
    color: Rgba<u8>,
    advance: f64,
    clip: Option<&Rect>,
) {
    if advance <= 0.0 {
        return;
    }
    let dot = advance / f64::from(GLYPH_CELL);
    let ink = |img: &mut RgbaImage, cell: Rect| {
        let cell = match clip {
            Some(c) => Rect::from_edges(
                cell.x.max(c.x),
                cell.y.max(c.y),
                cell.right().min(c.right()),
                cell.bottom().min(c.bottom()),
            ),
            None => cell,
        };
        if cell.w > 0.0 && cell.h > 0.0 {
            fill_rect(img, &cell, color);
        }
    };
    let mut cursor_x = x;
    for ch in text.chars() {
        if ch == ' ' {
            cursor_x += advance;
            continue;
        }
        match BASIC_FONTS.get(ch) {
            Some(glyph) => {
                for (row_idx, row) in glyph.iter().enumerate() {
                    let bits = *row;
                    for col_idx in 0..GLYPH_CELL {
                        if (bits >> col_idx) & 1 == 0 {
                            continue;
                        }
                        let cell = Rect::from_edges(
                            cursor_x + f64::from(col_idx) * dot,
                            y + row_idx as f64 * dot,
                            cursor_x + f64::from(col_idx + 1) * dot,
                            y + (row_idx + 1) as f64 * dot,
                        );
                        ink(img, cell);
                    }
                }
            }
            None => {
                let w = dot.max(1.0);
                let bx = Rect::new(cursor_x + dot, y + dot, 6.0 * dot, 6.0 * dot);
                ink(img, Rect::new(bx.x, bx.y, bx.w, w));
                ink(img, Rect::new(bx.x, bx.bottom() - w, bx.w, w));
                ink(img, Rect::new(bx.x, bx.y, w, bx.h));
                ink(img, Rect::new(bx.right() - w, bx.y, w, bx.h));
            }
        }
        cursor_x += advance;
    }
}

/// Draw one line centred horizontally in `rect`, top-aligned at `rect.y`.
///
/// Characters that do not fit the width are dropped.
pub fn draw_text_centered(
    img: &mut RgbaImage,
    rect: &Rect,
    text: &str,
    color: Rgba<u8>,
    advance: f64,
) {
    if advance <= 0.0 {
        return;
    }
    let max_chars = (rect.w / advance).floor().max(0.0) as usize;
    let line: String = text.chars().take(max_chars).collect();
    let x = rect.x + (rect.w - text_width(&line, advance)) / 2.0;
    let clip = Rect::new(rect.x, rect.y, rect.w, advance);
    draw_text(img, x, rect.y, &line, color, advance, Some(&clip));
}

/// Greedy word wrap to at most `max_chars` characters per line.
///
/// Words longer than a line are hard-broken; explicit newlines are kept.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0usize;
        for word in paragraph.split_whitespace() {
            let mut rest: Vec<char> = word.chars().collect();
            loop {
                let sep = usize::from(line_len > 0);
                if line_len + sep + rest.len() <= max_chars {
                    if sep == 1 {
                        line.push(' ');
                    }
                    line_len += sep + rest.len();
                    line.extend(rest.drain(..));
                    break;
                } else if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                } else {
                    line.extend(rest.drain(..max_chars));
                    lines.push(std::mem::take(&mut line));
                }
            }
        }
        lines.push(line);
    }
    lines
}
