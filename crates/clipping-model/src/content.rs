//! The editable content record behind a clipping.
//!
//! There is exactly one active record per editing session. It is changed
//! only through [`ContentUpdate`] and is never versioned.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::image_ref::ImageRef;
use crate::masthead;
use crate::theme::Theme;

/// Everything the user types or uploads for one clipping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentRecord {
    /// Main headline.
    pub headline: String,

    /// Article body.
    pub body: String,

    /// Reporter credit in the footer.
    pub reporter_name: String,

    /// Reporter designation or district.
    pub designation: String,

    /// News photo shown between headline and body.
    pub photo: Option<ImageRef>,

    /// Masthead logo.
    pub logo: Option<ImageRef>,

    /// Reporter portrait (always a committed crop).
    pub reporter_photo: Option<ImageRef>,

    /// Visual style.
    pub theme: Theme,
}

/// One of the three image slots of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    Photo,
    Logo,
    ReporterPhoto,
}

impl ImageSlot {
    pub fn label(&self) -> &'static str {
        match self {
            ImageSlot::Photo => "photo",
            ImageSlot::Logo => "logo",
            ImageSlot::ReporterPhoto => "reporter photo",
        }
    }

    /// Whether uploads into this slot go through the circular crop tool.
    pub fn requires_crop(&self) -> bool {
        matches!(self, ImageSlot::ReporterPhoto)
    }
}

/// A partial update. `None` leaves a field untouched.
///
/// Image slots use a nested option: `Some(None)` clears the slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentUpdate {
    pub headline: Option<String>,
    pub body: Option<String>,
    pub reporter_name: Option<String>,
    pub designation: Option<String>,
    pub photo: Option<Option<ImageRef>>,
    pub logo: Option<Option<ImageRef>>,
    pub reporter_photo: Option<Option<ImageRef>>,
    pub theme: Option<Theme>,
}

impl ContentUpdate {
    pub fn headline(text: impl Into<String>) -> Self {
        Self {
            headline: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn body(text: impl Into<String>) -> Self {
        Self {
            body: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn theme(theme: Theme) -> Self {
        Self {
            theme: Some(theme),
            ..Self::default()
        }
    }

    /// Set (`Some`) or clear (`None`) one image slot.
    pub fn image(slot: ImageSlot, image: Option<ImageRef>) -> Self {
        let mut update = Self::default();
        match slot {
            ImageSlot::Photo => update.photo = Some(image),
            ImageSlot::Logo => update.logo = Some(image),
            ImageSlot::ReporterPhoto => update.reporter_photo = Some(image),
        }
        update
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ContentRecord {
    /// Merge a partial update into the record.
    pub fn apply(&mut self, update: ContentUpdate) {
        if let Some(headline) = update.headline {
            self.headline = headline;
        }
        if let Some(body) = update.body {
            self.body = body;
        }
        if let Some(name) = update.reporter_name {
            self.reporter_name = name;
        }
        if let Some(designation) = update.designation {
            self.designation = designation;
        }
        if let Some(photo) = update.photo {
            self.photo = photo;
        }
        if let Some(logo) = update.logo {
            self.logo = logo;
        }
        if let Some(reporter_photo) = update.reporter_photo {
            self.reporter_photo = reporter_photo;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
    }

    /// Headline length in characters.
    pub fn headline_len(&self) -> usize {
        self.headline.chars().count()
    }

    /// Body length in characters.
    pub fn body_len(&self) -> usize {
        self.body.chars().count()
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&ImageRef> {
        match slot {
            ImageSlot::Photo => self.photo.as_ref(),
            ImageSlot::Logo => self.logo.as_ref(),
            ImageSlot::ReporterPhoto => self.reporter_photo.as_ref(),
        }
    }

    /// Headline text to paint, falling back to the placeholder.
    pub fn display_headline(&self) -> &str {
        non_empty_or(&self.headline, masthead::HEADLINE_PLACEHOLDER)
    }

    /// Body text to paint, falling back to the placeholder.
    pub fn display_body(&self) -> &str {
        non_empty_or(&self.body, masthead::BODY_PLACEHOLDER)
    }

    pub fn display_reporter_name(&self) -> &str {
        non_empty_or(&self.reporter_name, masthead::REPORTER_NAME_PLACEHOLDER)
    }

    pub fn display_designation(&self) -> &str {
        non_empty_or(&self.designation, masthead::DESIGNATION_PLACEHOLDER)
    }

    /// Load a record from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ContentError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| ContentError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write the record as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ContentError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ContentError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ContentError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| ContentError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn non_empty_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

/// Errors that can occur when reading content or images.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid image: {message}")]
    InvalidImage { message: String },
}
