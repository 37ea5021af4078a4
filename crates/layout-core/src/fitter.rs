//! The Layout Fitter.
//!
//! Maps content length to discrete presentation parameters. Nothing is
//! measured: character counts stand in for rendered text size, and the
//! breakpoints are hand-tuned for the 600x800 frame.
//!
//! # Boundary convention
//!
//! - Body ladders: a tier applies while `body_len <= up_to`; the first
//!   matching tier wins. A body of exactly 500 characters therefore stays
//!   on the largest tier and 501 moves down one.
//! - Headline ladder: a tier applies while `headline_len < below`.

use serde::Serialize;
use varta_clipping_model::ContentRecord;

/// Discrete headline size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HeadlineTier {
    Large,
    Medium,
    Small,
    Compact,
}

impl HeadlineTier {
    /// Font size in frame pixels.
    pub fn font_px(&self) -> u32 {
        match self {
            HeadlineTier::Large => 42,
            HeadlineTier::Medium => 32,
            HeadlineTier::Small => 24,
            HeadlineTier::Compact => 19,
        }
    }

    /// Space below the headline text, above its rule.
    pub fn margin_px(&self) -> u32 {
        match self {
            HeadlineTier::Large | HeadlineTier::Medium => 8,
            HeadlineTier::Small => 6,
            HeadlineTier::Compact => 4,
        }
    }

    /// Line height multiplier; identical for every tier.
    pub fn line_height(&self) -> f64 {
        1.1
    }
}

/// Inputs to the fitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FitInput {
    /// Headline length in characters.
    pub headline_len: usize,
    /// Body length in characters.
    pub body_len: usize,
    /// Whether a news photo is attached.
    pub has_photo: bool,
}

impl FitInput {
    pub fn new(headline_len: usize, body_len: usize, has_photo: bool) -> Self {
        Self {
            headline_len,
            body_len,
            has_photo,
        }
    }

    pub fn from_record(record: &ContentRecord) -> Self {
        Self::new(record.headline_len(), record.body_len(), record.has_photo())
    }
}

/// Presentation parameters derived from content length. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PresentationParams {
    pub headline_tier: HeadlineTier,
    /// Body font size in frame pixels.
    pub body_font_px: u32,
    /// Number of body text columns (1..=3).
    pub column_count: u32,
    /// Body line height multiplier.
    pub line_height: f64,
    /// Height reserved for the news photo; 0 without a photo.
    pub photo_height_px: u32,
}

#[derive(Debug, Clone, Copy)]
struct BodyTier {
    up_to: usize,
    font_px: u32,
    columns: u32,
    line_height: f64,
    photo_height_px: u32,
}

const fn tier(
    up_to: usize,
    font_px: u32,
    columns: u32,
    line_height: f64,
    photo_height_px: u32,
) -> BodyTier {
    BodyTier {
        up_to,
        font_px,
        columns,
        line_height,
        photo_height_px,
    }
}

const TEXT_ONLY_LADDER: [BodyTier; 5] = [
    tier(500, 24, 1, 1.6, 0),
    tier(1000, 19, 1, 1.5, 0),
    tier(1800, 15, 2, 1.4, 0),
    tier(2500, 12, 2, 1.3, 0),
    tier(usize::MAX, 10, 3, 1.2, 0),
];

// Breakpoints sit lower than the text-only ladder to leave room for the photo.
const WITH_PHOTO_LADDER: [BodyTier; 5] = [
    tier(500, 20, 1, 1.6, 300),
    tier(900, 16, 1, 1.5, 200),
    tier(1500, 13, 2, 1.4, 160),
    tier(2200, 11, 2, 1.3, 120),
    tier(usize::MAX, 9, 3, 1.2, 100),
];

const HEADLINE_LADDER: [(usize, HeadlineTier); 3] = [
    (30, HeadlineTier::Large),
    (60, HeadlineTier::Medium),
    (100, HeadlineTier::Small),
];

/// Select the headline tier from headline length alone.
pub fn headline_tier(headline_len: usize) -> HeadlineTier {
    HEADLINE_LADDER
        .iter()
        .find(|(below, _)| headline_len < *below)
        .map(|(_, tier)| *tier)
        .unwrap_or(HeadlineTier::Compact)
}

fn body_tier(body_len: usize, has_photo: bool) -> BodyTier {
    let ladder = if has_photo {
        &WITH_PHOTO_LADDER
    } else {
        &TEXT_ONLY_LADDER
    };
    // The last rung is unbounded, so a match always exists.
    *ladder
        .iter()
        .find(|t| body_len <= t.up_to)
        .unwrap_or(&ladder[ladder.len() - 1])
}

/// Derive presentation parameters. Total and deterministic.
pub fn fit(input: FitInput) -> PresentationParams {
    let body = body_tier(input.body_len, input.has_photo);
    PresentationParams {
        headline_tier: headline_tier(input.headline_len),
        body_font_px: body.font_px,
        column_count: body.columns,
        line_height: body.line_height,
        photo_height_px: body.photo_height_px,
    }
}

/// Derive presentation parameters for a content record.
pub fn fit_record(record: &ContentRecord) -> PresentationParams {
    let params = fit(FitInput::from_record(record));
    tracing::debug!(
        headline_len = record.headline_len(),
        body_len = record.body_len(),
        has_photo = record.has_photo(),
        headline_tier = ?params.headline_tier,
        body_font_px = params.body_font_px,
        columns = params.column_count,
        "Fitted layout"
    );
    params
}

/// Body-length breakpoints for a photo flag, in ascending order.
pub fn body_breakpoints(has_photo: bool) -> Vec<usize> {
    let ladder = if has_photo {
        &WITH_PHOTO_LADDER
    } else {
        &TEXT_ONLY_LADDER
    };
    ladder
        .iter()
        .map(|t| t.up_to)
        .filter(|up_to| *up_to != usize::MAX)
        .collect()
}
