//! The palette entry points.
//!
//! [`ColorThief`] ties the stages together: validate options, sample the
//! pixel buffer, quantize the samples. The synchronous methods work on an
//! already decoded [`PixelBuffer`]; [`ColorThief::palette_from_url`] loads
//! the image first.

use crate::error::{Error, Result};
use crate::options::{OptionValue, Options};
use crate::palette::Palette;
use crate::quantizer::{Color, MedianCut, Quantizer, SplitPriority};
use crate::sampler::sample;
use crate::source::{self, PixelBuffer};

/// Reusable palette extractor
///
/// Holds the HTTP client used for URL loading and the quantizer settings.
/// Calls share no mutable state, so one instance can serve concurrent
/// requests.
///
/// # Example
///
/// ```
/// use color_thief::{ColorThief, Options, PixelBuffer};
///
/// let pixels = [200, 30, 30, 255].repeat(16);
/// let buffer = PixelBuffer::from_raw(4, 4, pixels).unwrap();
///
/// let thief = ColorThief::new();
/// let palette = thief.palette(&buffer, &Options::new(4, 1).unwrap());
/// assert_eq!(palette.rgb(), vec![[200, 30, 30]]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColorThief {
    client: reqwest::Client,
    quantizer: MedianCut,
}

impl ColorThief {
    /// Extractor with a default HTTP client and population-ordered median cut
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor loading URLs through `client`
    ///
    /// Configure timeouts, proxies or TLS on the client; loads are never
    /// retried.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            quantizer: MedianCut::default(),
        }
    }

    /// Choose how the median cut picks the next box to split.
    #[inline]
    pub fn split_priority(mut self, priority: SplitPriority) -> Self {
        self.quantizer = MedianCut::new(priority);
        self
    }

    /// Extract a palette of at most `options.color_count()` colors
    ///
    /// An image without any usable pixel gives an empty palette.
    pub fn palette(&self, buffer: &PixelBuffer, options: &Options) -> Palette {
        let samples = sample(buffer, options.quality());
        if samples.is_empty() {
            tracing::warn!(
                width = buffer.width(),
                height = buffer.height(),
                "No opaque, non-white pixels sampled"
            );
        }
        self.quantizer.quantize(&samples, options.color_count())
    }

    /// The most dominant color, taken from a five color palette
    ///
    /// `None` when the image has no usable pixel.
    pub fn color(&self, buffer: &PixelBuffer, quality: impl Into<OptionValue>) -> Option<Color> {
        self.palette(buffer, &Options::dominant(quality)).dominant()
    }

    /// Load the image at `url` and extract its palette
    ///
    /// Options are validated before anything is loaded. Load and decode
    /// failures come back as [`Error::Load`] carrying the URL and the cause.
    pub async fn palette_from_url(
        &self,
        url: &str,
        color_count: impl Into<OptionValue>,
        quality: impl Into<OptionValue>,
    ) -> Result<Palette> {
        let options = Options::new(color_count, quality)?;
        let buffer = source::fetch(&self.client, url)
            .await
            .map_err(|source| Error::Load {
                url: url.to_string(),
                source,
            })?;
        Ok(self.palette(&buffer, &options))
    }

    /// Decode a local image path, or load an `http`, `https` or `file` URL
    pub async fn load(&self, location: &str) -> Result<PixelBuffer> {
        if location.contains("://") {
            source::fetch(&self.client, location)
                .await
                .map_err(|source| Error::Load {
                    url: location.to_string(),
                    source,
                })
        } else {
            Ok(source::decode_path(location)?)
        }
    }
}

/// Extract a palette of at most `color_count` colors from `buffer`
///
/// `color_count` is clamped to `2..=20`; anything that is not a positive
/// integer means 10. Asking for exactly one color is an
/// [`Error::InvalidOption`]; use [`get_color`] for that. `quality` is the
/// pixel stride, 10 when not a positive integer.
///
/// # Example
///
/// ```
/// use color_thief::{get_palette, PixelBuffer};
///
/// let pixels = [[255, 0, 0, 255], [0, 0, 255, 255]].concat().repeat(2);
/// let buffer = PixelBuffer::from_raw(2, 2, pixels).unwrap();
///
/// let palette = get_palette(&buffer, 2, 1).unwrap();
/// assert_eq!(palette.rgb(), vec![[0, 0, 255], [255, 0, 0]]);
/// assert!(get_palette(&buffer, 1, 1).is_err());
/// ```
pub fn get_palette(
    buffer: &PixelBuffer,
    color_count: impl Into<OptionValue>,
    quality: impl Into<OptionValue>,
) -> Result<Palette> {
    let options = Options::new(color_count, quality)?;
    Ok(ColorThief::new().palette(buffer, &options))
}

/// The most dominant color of `buffer`
pub fn get_color(buffer: &PixelBuffer, quality: impl Into<OptionValue>) -> Option<Color> {
    ColorThief::new().color(buffer, quality)
}

/// Load the image at `url` and extract a palette of at most `color_count` colors
///
/// Callers typically pass [`DEFAULT_URL_COLOR_COUNT`](crate::DEFAULT_URL_COLOR_COUNT)
/// and [`DEFAULT_QUALITY`](crate::DEFAULT_QUALITY).
pub async fn get_palette_from_url(
    url: &str,
    color_count: impl Into<OptionValue>,
    quality: impl Into<OptionValue>,
) -> Result<Palette> {
    ColorThief::new()
        .palette_from_url(url, color_count, quality)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{DEFAULT_QUALITY, DOMINANT_COLOR_COUNT};
    use pretty_assertions::assert_eq;

    fn checkerboard() -> PixelBuffer {
        let data = [
            [255, 0, 0, 255],
            [0, 255, 0, 255],
            [0, 0, 255, 255],
            [10, 10, 10, 255],
        ]
        .concat();
        PixelBuffer::from_raw(2, 2, data).unwrap()
    }

    #[test]
    fn test_get_palette_four_pixels() {
        let palette = get_palette(&checkerboard(), 4, 1).unwrap();
        assert_eq!(
            palette.rgb(),
            vec![[0, 0, 255], [0, 255, 0], [10, 10, 10], [255, 0, 0]]
        );
    }

    #[test]
    fn test_get_palette_rejects_single_color() {
        for quality in [1, 10, 0] {
            let error = get_palette(&checkerboard(), 1, quality).unwrap_err();
            assert!(matches!(error, Error::InvalidOption(_)));
        }
    }

    #[test]
    fn test_get_color_matches_palette_head() {
        let buffer = checkerboard();
        let palette = get_palette(&buffer, DOMINANT_COLOR_COUNT, 1).unwrap();
        assert_eq!(get_color(&buffer, 1), palette.dominant());
    }

    #[test]
    fn test_get_color_uses_given_quality() {
        let red = [200, 0, 0, 255];
        let blue = [0, 0, 200, 255];
        let buffer = PixelBuffer::from_raw(2, 2, [red, blue, red, blue].concat()).unwrap();

        // stride 2 only ever visits the red pixels
        assert_eq!(get_color(&buffer, 2).unwrap().color.0, [200, 0, 0]);
        assert_eq!(get_color(&buffer, 2usize).unwrap().population, 2);
        // stride 1 sees a tie, broken in favor of the box sorted first
        assert_eq!(get_color(&buffer, 1).unwrap().color.0, [0, 0, 200]);
        // unusable quality falls back to 10, which visits pixel 0 only
        let fallback = get_color(&buffer, 0).unwrap();
        assert_eq!((fallback.color.0, fallback.population), ([200, 0, 0], 1));
    }

    #[test]
    fn test_get_color_empty_image() {
        let buffer = PixelBuffer::from_raw(1, 1, vec![255, 255, 255, 255]).unwrap();
        assert_eq!(get_color(&buffer, DEFAULT_QUALITY), None);
        assert!(get_palette(&buffer, 5, 1).unwrap().is_empty());
    }

    #[test]
    fn test_split_priority_builder() {
        let thief = ColorThief::new().split_priority(SplitPriority::PopulationVolume);
        assert_eq!(thief.quantizer.priority(), SplitPriority::PopulationVolume);
    }
}
