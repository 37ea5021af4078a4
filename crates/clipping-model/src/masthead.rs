//! Fixed masthead copy and placeholder text.
//!
//! Placeholders are shown whenever the matching field is empty; they are
//! never written back into the content record.

/// Newspaper title in the masthead band.
pub const TITLE: &str = "कुस्ती मल्लविद्या वार्ता";

/// Tagline in the strip under the title.
pub const TAGLINE: &str = "महाराष्ट्राचा अस्सल देशी आवाज!";

/// Registration number shown at the left of the dateline bar.
pub const REGISTRATION: &str = "RNI: MAH/2०२५";

/// Editor credit shown at the right of the dateline bar.
pub const EDITOR_CREDIT: &str = "संपादक: गणेश मानुगडे";

/// Caption strip across the bottom of the news photo.
pub const PHOTO_CAPTION: &str = "विशेष बातमी छायाचित्र";

/// Label above the reporter's name.
pub const REPORTER_LABEL: &str = "बातमीदार";

/// Footer badge lines.
pub const BADGE_TITLE: &str = "कुस्ती मल्लविद्या";
pub const BADGE_SUBTITLE: &str = "वार्ता";

pub const HEADLINE_PLACEHOLDER: &str = "येथे हेडलाईन लिहा";
pub const BODY_PLACEHOLDER: &str =
    "येथे मजकूर लिहा. मजकूर जेवढा जास्त असेल तेवढी मांडणी (कॉलम आणि फॉन्ट) आपोआप बदलली जाईल.";
pub const REPORTER_NAME_PLACEHOLDER: &str = "नाव लिहा";
pub const DESIGNATION_PLACEHOLDER: &str = "प्रतिनिधी";
pub const LOGO_PLACEHOLDER: &str = "कुस्ती";
pub const REPORTER_PHOTO_PLACEHOLDER: &str = "PHOTO";

/// Shown when capturing the clipping to an image fails.
pub const EXPORT_FAILED_MESSAGE: &str = "फोटो तयार करताना अडचण आली. कृपया पुन्हा प्रयत्न करा.";

/// Shown after a successful download.
pub const EXPORT_DONE_MESSAGE: &str = "पूर्ण झाले";
