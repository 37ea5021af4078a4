//! Inline images.
//!
//! Images enter a clipping the way a browser file picker would hand them
//! over: the whole file is read and stored as a `data:<mime>;base64,...`
//! URL. Nothing refers back to the file system after that.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::content::ContentError;

/// An image embedded as a base64 `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageRef {
    data_url: String,
}

impl ImageRef {
    /// Embed raw encoded image bytes; the MIME type is sniffed from the bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContentError> {
        let format = image::guess_format(bytes).map_err(|e| ContentError::InvalidImage {
            message: format!("unrecognised image data: {e}"),
        })?;
        Ok(Self {
            data_url: format!(
                "data:{};base64,{}",
                format.to_mime_type(),
                STANDARD.encode(bytes)
            ),
        })
    }

    /// Read a local file into an inline image.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| ContentError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_bytes(&bytes).map_err(|e| match e {
            ContentError::InvalidImage { message } => ContentError::InvalidImage {
                message: format!("{}: {message}", path.display()),
            },
            other => other,
        })
    }

    /// Parse an existing `data:` URL.
    pub fn parse(data_url: &str) -> Result<Self, ContentError> {
        let (mime, _) = split_data_url(data_url)?;
        if !mime.starts_with("image/") {
            return Err(ContentError::InvalidImage {
                message: format!("expected an image MIME type, got '{mime}'"),
            });
        }
        Ok(Self {
            data_url: data_url.to_string(),
        })
    }

    /// The MIME type declared by the URL.
    pub fn mime_type(&self) -> &str {
        split_data_url(&self.data_url)
            .map(|(mime, _)| mime)
            .unwrap_or("application/octet-stream")
    }

    pub fn as_data_url(&self) -> &str {
        &self.data_url
    }

    /// Decode the base64 payload back into the original file bytes.
    pub fn bytes(&self) -> Result<Vec<u8>, ContentError> {
        let (_, payload) = split_data_url(&self.data_url)?;
        STANDARD
            .decode(payload)
            .map_err(|e| ContentError::InvalidImage {
                message: format!("invalid base64 payload: {e}"),
            })
    }

    /// Decode into pixels.
    pub fn decode(&self) -> Result<DynamicImage, ContentError> {
        let bytes = self.bytes()?;
        image::load_from_memory(&bytes).map_err(|e| ContentError::InvalidImage {
            message: format!("failed to decode {}: {e}", self.mime_type()),
        })
    }
}

impl TryFrom<String> for ImageRef {
    type Error = ContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ImageRef> for String {
    fn from(value: ImageRef) -> Self {
        value.data_url
    }
}

fn split_data_url(url: &str) -> Result<(&str, &str), ContentError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| ContentError::InvalidImage {
            message: "not a data: URL".to_string(),
        })?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ContentError::InvalidImage {
            message: "data: URL has no payload".to_string(),
        })?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| ContentError::InvalidImage {
            message: "only base64 data: URLs are supported".to_string(),
        })?;
    Ok((mime, payload))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn tiny_png() -> Vec<u8> {
        let img = RgbaImage::from_pixel(3, 2, Rgba([200, 10, 10, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_from_bytes_sniffs_png() {
        let image = ImageRef::from_bytes(&tiny_png()).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert!(image.as_data_url().starts_with("data:image/png;base64,"));

        let decoded = image.decode().unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
    }

    #[test]
    fn test_from_file_reads_and_embeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::write(&path, tiny_png()).unwrap();

        let image = ImageRef::from_file(&path).unwrap();
        assert_eq!(image.bytes().unwrap(), tiny_png());
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let err = ImageRef::from_file("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, ContentError::IoError { .. }));
    }

    #[test]
    fn test_rejects_non_image_payloads() {
        assert!(ImageRef::from_bytes(b"plain text, not pixels").is_err());
        assert!(ImageRef::parse("data:text/plain;base64,aGk=").is_err());
        assert!(ImageRef::parse("https://example.com/a.png").is_err());
        assert!(ImageRef::parse("data:image/png,rawbytes").is_err());
    }

    #[test]
    fn test_serde_uses_data_url_string() {
        let image = ImageRef::from_bytes(&tiny_png()).unwrap();
        let json = serde_json::to_string(&image).unwrap();
        assert!(json.starts_with("\"data:image/png;base64,"));
        let back: ImageRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, image);

        assert!(serde_json::from_str::<ImageRef>("\"not-a-url\"").is_err());
    }
}
