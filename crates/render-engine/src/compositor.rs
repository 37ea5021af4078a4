//! Clipping compositor: lays out every region of the frame.
//!
//! Produces boxes in 600x800 frame space from the content record and the
//! fitter's parameters. Painting happens elsewhere; nothing here touches
//! pixels.

use varta_clipping_model::dateline::marathi_dateline;
use varta_clipping_model::{Circle, ContentRecord, Point2D, Rect};
use varta_common::clock::Clock;
use varta_layout_core::overflow::{chars_per_line, COLUMN_GAP_PX};
use varta_layout_core::{
    estimate_overflow, fit_record, OverflowEstimate, PresentationParams, FRAME_HEIGHT, FRAME_WIDTH,
};

/// Outer border thickness.
pub const BORDER_PX: f64 = 12.0;
/// Space between the border and the content.
pub const PADDING_PX: f64 = 24.0;

const HEADER_HEIGHT: f64 = 88.0;
const LOGO_RADIUS: f64 = 32.0;
const TAGLINE_SIZE: (f64, f64) = (220.0, 14.0);
const DATELINE_TOP: f64 = 132.0;
const DATELINE_HEIGHT: f64 = 22.0;
const MAIN_TOP: f64 = 166.0;
const MAIN_BOTTOM: f64 = 672.0;
/// Horizontal inset of headline and body text within the content box.
const TEXT_INSET: f64 = 12.0;
const RULE_PX: f64 = 2.0;
const HEADLINE_GAP: f64 = 12.0;
const PHOTO_WIDTH_FRACTION: f64 = 0.9;
const CAPTION_HEIGHT: f64 = 14.0;
const PHOTO_GAP: f64 = 16.0;
const FOOTER_RULE_Y: f64 = 684.0;
const REPORTER_RADIUS: f64 = 28.0;
const BADGE_SIZE: (f64, f64) = (110.0, 48.0);

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLayout {
    pub band: Rect,
    pub logo: Circle,
    pub title: Rect,
    pub tagline: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlineLayout {
    pub text: Rect,
    pub font_px: u32,
    pub line_height: f64,
    /// Wrap width used for the headline, in characters.
    pub chars_per_line: usize,
    pub rule: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoLayout {
    pub frame: Rect,
    pub caption: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterLayout {
    pub rule: Rect,
    pub card: Rect,
    pub reporter_photo: Circle,
    pub label: Rect,
    pub name: Rect,
    pub designation: Rect,
    pub badge: Rect,
}

/// Every region of one clipping, in frame pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ClippingComposition {
    pub frame: Rect,
    pub border_width: f64,
    /// Frame minus border and padding.
    pub content: Rect,
    pub header: HeaderLayout,
    pub dateline: Rect,
    pub headline: HeadlineLayout,
    /// Present only when the record carries a news photo.
    pub photo: Option<PhotoLayout>,
    /// Area the body text may occupy.
    pub body: Rect,
    pub columns: Vec<Rect>,
    pub footer: FooterLayout,
}

impl ClippingComposition {
    /// All boxes that must stay inside the frame.
    pub fn regions(&self) -> Vec<Rect> {
        let mut regions = vec![
            self.content,
            self.header.band,
            self.header.logo.bounds(),
            self.header.title,
            self.header.tagline,
            self.dateline,
            self.headline.text,
            self.headline.rule,
            self.body,
            self.footer.rule,
            self.footer.card,
            self.footer.reporter_photo.bounds(),
            self.footer.badge,
        ];
        if let Some(photo) = &self.photo {
            regions.push(photo.frame);
            regions.push(photo.caption);
        }
        regions.extend(self.columns.iter().copied());
        regions
    }
}

/// Lay out a clipping for `record` under `params`.
pub fn compose(record: &ContentRecord, params: &PresentationParams) -> ClippingComposition {
    let frame = Rect::new(0.0, 0.0, f64::from(FRAME_WIDTH), f64::from(FRAME_HEIGHT));
    let content = frame.inset(BORDER_PX + PADDING_PX);

    let header = header_layout(&content);
    let dateline = Rect::new(content.x, DATELINE_TOP, content.w, DATELINE_HEIGHT);

    let text_left = content.x + TEXT_INSET;
    let text_right = content.right() - TEXT_INSET;
    let text_width = text_right - text_left;

    let headline = headline_layout(record, params, text_left, text_width);
    let mut next_y = headline.rule.bottom() + HEADLINE_GAP;

    let photo = if record.has_photo() && params.photo_height_px > 0 {
        let w = text_width * PHOTO_WIDTH_FRACTION;
        // Photo and caption are cut off at the bottom of the main area.
        let top = next_y.min(MAIN_BOTTOM - CAPTION_HEIGHT);
        let wanted = f64::from(params.photo_height_px);
        let h = wanted.min(MAIN_BOTTOM - CAPTION_HEIGHT - top);
        if h < wanted {
            tracing::debug!(wanted, height = h, "Photo shortened to fit the main area");
        }
        let frame = Rect::new(text_left + (text_width - w) / 2.0, top, w, h);
        let caption = Rect::new(frame.x, frame.bottom(), frame.w, CAPTION_HEIGHT);
        next_y = caption.bottom() + PHOTO_GAP;
        Some(PhotoLayout { frame, caption })
    } else {
        None
    };

    let body = Rect::from_edges(text_left, next_y.min(MAIN_BOTTOM), text_right, MAIN_BOTTOM);
    let columns = body.split_columns(params.column_count, COLUMN_GAP_PX);

    ClippingComposition {
        frame,
        border_width: BORDER_PX,
        content,
        header,
        dateline,
        headline,
        photo,
        body,
        columns,
        footer: footer_layout(&content),
    }
}

fn header_layout(content: &Rect) -> HeaderLayout {
    let band = Rect::new(content.x, content.y, content.w, HEADER_HEIGHT);
    let logo = Circle::new(
        Point2D::new(band.x + 16.0 + LOGO_RADIUS, band.y + 12.0 + LOGO_RADIUS),
        LOGO_RADIUS,
    );
    let title_left = logo.center.x + LOGO_RADIUS + 16.0;
    let title = Rect::from_edges(title_left, band.y + 12.0, band.right() - 16.0, band.y + 56.0);
    let (tag_w, tag_h) = TAGLINE_SIZE;
    let tagline = Rect::new(
        title.x + (title.w - tag_w) / 2.0,
        band.y + 64.0,
        tag_w,
        tag_h,
    );
    HeaderLayout {
        band,
        logo,
        title,
        tagline,
    }
}

fn headline_layout(
    record: &ContentRecord,
    params: &PresentationParams,
    left: f64,
    width: f64,
) -> HeadlineLayout {
    let tier = params.headline_tier;
    let font_px = tier.font_px();
    let per_line = chars_per_line(width, font_px);
    let chars = record.display_headline().chars().count();
    let lines = chars.div_ceil(per_line).max(1);

    let line_px = f64::from(font_px) * tier.line_height();
    let text_h = (lines as f64 * line_px).min(MAIN_BOTTOM - MAIN_TOP);
    let text = Rect::new(left, MAIN_TOP, width, text_h);
    let rule_y = (text.bottom() + f64::from(tier.margin_px())).min(MAIN_BOTTOM - RULE_PX);
    let rule = Rect::new(left, rule_y, width, RULE_PX);

    HeadlineLayout {
        text,
        font_px,
        line_height: tier.line_height(),
        chars_per_line: per_line,
        rule,
    }
}

fn footer_layout(content: &Rect) -> FooterLayout {
    let rule = Rect::new(content.x, FOOTER_RULE_Y, content.w, RULE_PX);
    let card = Rect::from_edges(content.x, FOOTER_RULE_Y + 12.0, content.x + 300.0, content.bottom());
    let reporter_photo = Circle::new(
        Point2D::new(card.x + 8.0 + REPORTER_RADIUS, card.y + card.h / 2.0),
        REPORTER_RADIUS,
    );
    let text_left = reporter_photo.center.x + REPORTER_RADIUS + 8.0;
    let label = Rect::from_edges(text_left, card.y + 4.0, card.right(), card.y + 16.0);
    let name = Rect::from_edges(text_left, label.bottom() + 2.0, card.right(), label.bottom() + 26.0);
    let designation = Rect::from_edges(text_left, name.bottom() + 4.0, card.right(), name.bottom() + 20.0);

    let (badge_w, badge_h) = BADGE_SIZE;
    let badge = Rect::new(
        content.right() - badge_w,
        card.y + (card.h - badge_h) / 2.0,
        badge_w,
        badge_h,
    );

    FooterLayout {
        rule,
        card,
        reporter_photo,
        label,
        name,
        designation,
        badge,
    }
}

/// Everything the painter needs for one clipping.
#[derive(Debug, Clone)]
pub struct ClippingScene<'a> {
    pub content: &'a ContentRecord,
    pub params: PresentationParams,
    pub composition: ClippingComposition,
    /// Marathi date shown in the dateline bar.
    pub dateline: String,
}

impl<'a> ClippingScene<'a> {
    pub fn new(content: &'a ContentRecord, clock: &dyn Clock) -> Self {
        let params = fit_record(content);
        Self::with_params(content, params, clock)
    }

    pub fn with_params(
        content: &'a ContentRecord,
        params: PresentationParams,
        clock: &dyn Clock,
    ) -> Self {
        let composition = compose(content, &params);
        Self {
            content,
            params,
            composition,
            dateline: marathi_dateline(&clock.now()),
        }
    }

    /// Advisory estimate of whether the body spills out of its box.
    pub fn overflow(&self) -> OverflowEstimate {
        estimate_overflow(self.content.display_body(), &self.params, &self.composition.body)
    }
}

#[cfg(test)]
mod tests {
    use varta_clipping_model::ImageRef;
    use varta_common::clock::FixedClock;
    use varta_layout_core::{fit, FitInput};

    use super::*;

    fn record(headline_len: usize, body_len: usize, photo: bool) -> ContentRecord {
        ContentRecord {
            headline: "h".repeat(headline_len),
            body: "b".repeat(body_len),
            photo: photo.then(|| ImageRef::parse("data:image/png;base64,AAAA").unwrap()),
            ..ContentRecord::default()
        }
    }

    fn composed(headline_len: usize, body_len: usize, photo: bool) -> ClippingComposition {
        let rec = record(headline_len, body_len, photo);
        let params = fit(FitInput::from_record(&rec));
        compose(&rec, &params)
    }

    #[test]
    fn test_content_box_is_inside_border_and_padding() {
        let c = composed(10, 10, false);
        assert_eq!(c.content, Rect::new(36.0, 36.0, 528.0, 728.0));
        assert_eq!(c.dateline.y, 132.0);
        assert_eq!(c.footer.rule.y, 684.0);
    }

    #[test]
    fn test_every_region_stays_in_frame() {
        let cases = [
            (5, 100, false),
            (120, 3000, true),
            (45, 700, true),
            (0, 0, false),
            (600, 0, true),
            (1000, 0, true),
            (1000, 3000, true),
        ];
        for (h, b, p) in cases {
            let c = composed(h, b, p);
            for region in c.regions() {
                assert!(c.frame.contains_rect(&region), "{region:?} escapes frame");
            }
        }
    }

    #[test]
    fn test_body_ends_above_footer() {
        let c = composed(20, 600, true);
        assert!(c.body.bottom() <= c.footer.rule.y);
        assert!(c.body.y >= c.headline.rule.bottom());
    }

    #[test]
    fn test_long_headline_shortens_photo_above_footer() {
        let c = composed(600, 0, true);
        let photo = c.photo.expect("photo layout");
        assert!(photo.frame.h < 300.0);
        assert!(photo.caption.bottom() <= MAIN_BOTTOM);
        assert!(photo.caption.bottom() < c.footer.rule.y);
        assert!(photo.frame.y >= c.headline.rule.bottom());

        let c = composed(1000, 0, true);
        let photo = c.photo.expect("photo layout");
        assert!(photo.frame.h >= 0.0);
        assert!(photo.caption.bottom() <= MAIN_BOTTOM);
        assert!(c.body.y <= MAIN_BOTTOM);
    }

    #[test]
    fn test_photo_box_follows_fitter_height() {
        let c = composed(10, 400, true);
        let photo = c.photo.expect("photo layout");
        assert_eq!(photo.frame.h, 300.0);
        assert!((photo.frame.w - 504.0 * 0.9).abs() < 1e-9);
        assert!((photo.frame.center().x - 300.0).abs() < 1e-9);
        assert!(c.body.y > photo.caption.bottom());
        assert!(composed(10, 400, false).photo.is_none());
    }

    #[test]
    fn test_columns_match_params() {
        assert_eq!(composed(10, 100, false).columns.len(), 1);
        assert_eq!(composed(10, 1200, false).columns.len(), 2);
        assert_eq!(composed(10, 2600, false).columns.len(), 3);
    }

    #[test]
    fn test_longer_headline_takes_more_lines() {
        let short = composed(10, 10, false);
        let long = composed(99, 10, false);
        assert!(long.headline.text.h > short.headline.text.h);
    }

    #[test]
    fn test_empty_headline_is_laid_out_as_placeholder() {
        let c = composed(0, 0, false);
        assert!(c.headline.text.h > 0.0);
    }

    #[test]
    fn test_scene_carries_dateline() {
        let rec = record(10, 10, false);
        let clock = FixedClock::ist(2025, 1, 26, 9, 30).unwrap();
        let scene = ClippingScene::new(&rec, &clock);
        assert!(scene.dateline.starts_with("२६ जानेवारी २०२५"));
        assert!(!scene.overflow().overflows());
    }
}
