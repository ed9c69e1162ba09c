//! Palette extraction options and their validation.
//!
//! Options arrive as loosely typed numbers (CLI flags, deserialized config,
//! values forwarded from other languages), so the builder accepts any
//! [`OptionValue`] and normalizes it in [`OptionsBuilder::build`].

use crate::error::{Error, Result};

/// Color count used when none (or an unusable one) is given
pub const DEFAULT_COLOR_COUNT: usize = 10;
/// Smallest palette that may be requested
pub const MIN_COLOR_COUNT: usize = 2;
/// Largest palette that may be requested; bigger requests are clamped
pub const MAX_COLOR_COUNT: usize = 20;
/// Sampling stride used when none (or an unusable one) is given
pub const DEFAULT_QUALITY: usize = 10;
/// Color count used by the URL entry point
pub const DEFAULT_URL_COLOR_COUNT: usize = 5;
/// Palette size requested to find the single dominant color
pub const DOMINANT_COLOR_COUNT: usize = 5;

/// A raw, not yet validated option value
///
/// Converts from every primitive integer and float type, so both `usize`
/// constants and loosely typed input can be passed straight through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionValue(f64);

impl OptionValue {
    /// The value as a float
    pub fn get(self) -> f64 {
        self.0
    }

    fn as_positive_integer(self) -> Option<usize> {
        let value = self.0;
        if value.is_finite() && value.fract() == 0.0 && value >= 1.0 {
            // saturating float-to-int cast
            Some(value as usize)
        } else {
            None
        }
    }
}

macro_rules! option_value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for OptionValue {
                fn from(value: $ty) -> Self {
                    OptionValue(value as f64)
                }
            }
        )*
    };
}

option_value_from!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

/// Validated extraction options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    color_count: usize,
    quality: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            color_count: DEFAULT_COLOR_COUNT,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl Options {
    /// Start building options from raw values
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Validate a color count and quality given together
    ///
    /// # Example
    ///
    /// ```
    /// use color_thief::Options;
    ///
    /// let options = Options::new(5, 1).unwrap();
    /// assert_eq!(options.color_count(), 5);
    /// assert!(Options::new(1, 10).is_err());
    /// ```
    pub fn new(
        color_count: impl Into<OptionValue>,
        quality: impl Into<OptionValue>,
    ) -> Result<Self> {
        Self::builder()
            .color_count(color_count)
            .quality(quality)
            .build()
    }

    /// Options for picking the dominant color out of a small palette
    pub(crate) fn dominant(quality: impl Into<OptionValue>) -> Self {
        Self {
            color_count: DOMINANT_COLOR_COUNT,
            quality: normalize_quality(Some(quality.into())),
        }
    }

    /// Maximum number of palette entries
    pub fn color_count(&self) -> usize {
        self.color_count
    }

    /// Pixel stride used while sampling, always at least 1
    pub fn quality(&self) -> usize {
        self.quality
    }
}

/// Fluent builder for [`Options`]
///
/// Unset values fall back to their defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionsBuilder {
    color_count: Option<OptionValue>,
    quality: Option<OptionValue>,
}

impl OptionsBuilder {
    /// Set the requested palette size.
    #[inline]
    pub fn color_count(mut self, count: impl Into<OptionValue>) -> Self {
        self.color_count = Some(count.into());
        self
    }

    /// Set the sampling stride.
    #[inline]
    pub fn quality(mut self, quality: impl Into<OptionValue>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    /// Normalize the raw values.
    ///
    /// A color count of exactly one is rejected; a single color is what
    /// [`get_color`](crate::get_color) is for.
    pub fn build(self) -> Result<Options> {
        let color_count = match self.color_count.and_then(OptionValue::as_positive_integer) {
            None => DEFAULT_COLOR_COUNT,
            Some(1) => {
                return Err(Error::InvalidOption(format!(
                    "color_count should be between {} and {}. To get one color, call get_color() instead of get_palette()",
                    MIN_COLOR_COUNT, MAX_COLOR_COUNT
                )))
            }
            Some(count) => count.clamp(MIN_COLOR_COUNT, MAX_COLOR_COUNT),
        };

        Ok(Options {
            color_count,
            quality: normalize_quality(self.quality),
        })
    }
}

fn normalize_quality(quality: Option<OptionValue>) -> usize {
    quality
        .and_then(OptionValue::as_positive_integer)
        .unwrap_or(DEFAULT_QUALITY)
}
