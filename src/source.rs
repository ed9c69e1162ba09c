//! Turning image sources into raw RGBA pixel memory.

use std::path::Path;

use image::{DynamicImage, RgbaImage};
use reqwest::Url;

use crate::error::DecodeError;

/// Decoded image as row-major RGBA bytes
///
/// Every call that decodes an image gets its own buffer; nothing is cached
/// or shared between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes, checking that they describe `width * height` pixels
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::EmptyImage { width, height });
        }
        let len = data.len();
        if len as u64 != u64::from(width) * u64::from(height) * 4 {
            return Err(DecodeError::BufferSize { width, height, len });
        }
        RgbaImage::from_raw(width, height, data)
            .map(|image| Self { image })
            .ok_or(DecodeError::BufferSize { width, height, len })
    }

    /// Convert an already decoded image, whatever its pixel layout
    pub fn from_image(image: &DynamicImage) -> Result<Self, DecodeError> {
        Self::from_rgba(image.to_rgba8())
    }

    fn from_rgba(image: RgbaImage) -> Result<Self, DecodeError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(DecodeError::EmptyImage { width, height });
        }
        Ok(Self { image })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Number of pixels, `width * height`
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// The RGBA bytes, four per pixel
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }
}

impl TryFrom<DynamicImage> for PixelBuffer {
    type Error = DecodeError;

    fn try_from(image: DynamicImage) -> Result<Self, Self::Error> {
        Self::from_rgba(image.into_rgba8())
    }
}

/// Decode an encoded image (PNG, JPEG, GIF, BMP, WebP) held in memory
pub fn decode_bytes(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let image = image::load_from_memory(bytes)?;
    PixelBuffer::try_from(image)
}

/// Decode an image file
pub fn decode_path(path: impl AsRef<Path>) -> Result<PixelBuffer, DecodeError> {
    let path = path.as_ref();
    tracing::trace!(path = %path.display(), "Decoding image file");
    let image = image::open(path)?;
    PixelBuffer::try_from(image)
}

/// Load and decode an image from an `http`, `https` or `file` URL
///
/// Resolves once, either with the pixels or with the reason loading failed.
/// Nothing is retried.
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<PixelBuffer, DecodeError> {
    let parsed = Url::parse(url).map_err(|e| DecodeError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let bytes = match parsed.scheme() {
        "http" | "https" => {
            tracing::debug!(url = %parsed, "Fetching image");
            let response = client.get(parsed.clone()).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(DecodeError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }
            response.bytes().await?.to_vec()
        }
        "file" => {
            let path = parsed
                .to_file_path()
                .map_err(|()| DecodeError::InvalidUrl {
                    url: url.to_string(),
                    reason: "not a local file path".to_string(),
                })?;
            tracing::debug!(path = %path.display(), "Reading image");
            tokio::fs::read(&path).await?
        }
        other => return Err(DecodeError::UnsupportedScheme(other.to_string())),
    };

    tracing::debug!(url = %parsed, bytes = bytes.len(), "Image loaded");
    decode_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([12, 34, 56, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_from_raw_checks_length() {
        let error = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            error,
            DecodeError::BufferSize {
                width: 2,
                height: 2,
                len: 15
            }
        ));
        let buffer = PixelBuffer::from_raw(2, 2, vec![0; 16]).unwrap();
        assert_eq!(buffer.pixel_count(), 4);
        assert_eq!(buffer.as_raw().len(), 16);
    }

    #[test]
    fn test_from_raw_rejects_zero_dimensions() {
        let error = PixelBuffer::from_raw(0, 3, Vec::new()).unwrap_err();
        assert!(matches!(
            error,
            DecodeError::EmptyImage {
                width: 0,
                height: 3
            }
        ));
    }

    #[test]
    fn test_from_image_converts_rgb_to_opaque_rgba() {
        let rgb = image::RgbImage::from_pixel(3, 1, image::Rgb([1, 2, 3]));
        let buffer = PixelBuffer::from_image(&DynamicImage::ImageRgb8(rgb)).unwrap();
        assert_eq!(buffer.width(), 3);
        assert_eq!(buffer.height(), 1);
        assert_eq!(&buffer.as_raw()[..4], &[1, 2, 3, 255]);
    }

    #[test]
    fn test_decode_bytes_png() {
        let buffer = decode_bytes(&png_bytes(4, 3)).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (4, 3));
        assert_eq!(&buffer.as_raw()[..4], &[12, 34, 56, 255]);
    }

    #[test]
    fn test_decode_bytes_garbage() {
        let error = decode_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(error, DecodeError::Image(_)));
    }

    #[test]
    fn test_decode_path_missing_file() {
        let error = decode_path("/nonexistent/dir/image.png").unwrap_err();
        assert!(matches!(error, DecodeError::Image(_)));
    }

    #[tokio::test]
    async fn test_fetch_file_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.png");
        std::fs::write(&path, png_bytes(2, 5)).unwrap();
        let url = Url::from_file_path(&path).unwrap();

        let buffer = fetch(&reqwest::Client::new(), url.as_str()).await.unwrap();
        assert_eq!((buffer.width(), buffer.height()), (2, 5));
    }

    #[tokio::test]
    async fn test_fetch_unsupported_scheme() {
        let error = fetch(&reqwest::Client::new(), "ftp://example.com/a.png")
            .await
            .unwrap_err();
        assert!(matches!(error, DecodeError::UnsupportedScheme(s) if s == "ftp"));
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let error = fetch(&reqwest::Client::new(), "not a url")
            .await
            .unwrap_err();
        assert!(matches!(error, DecodeError::InvalidUrl { .. }));
    }
}
