//! Extract the dominant colors of an image
//!
//! Pixels are sampled with a configurable stride, mostly transparent and
//! near-white pixels are dropped, and the rest is clustered into a small
//! palette with median cut quantization. The approach follows [Color Thief].
//!
//! ```
//! use color_thief::{get_palette, PixelBuffer};
//!
//! let pixels = [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255], [10, 10, 10, 255]].concat();
//! let buffer = PixelBuffer::from_raw(2, 2, pixels).unwrap();
//!
//! let palette = get_palette(&buffer, 4, 1).unwrap();
//! assert_eq!(palette.len(), 4);
//! ```
//!
//! [Color Thief]: https://github.com/lokesh/color-thief

#![deny(missing_docs)]

pub use error::{DecodeError, Error, Result};
pub use options::{
    OptionValue, Options, OptionsBuilder, DEFAULT_COLOR_COUNT, DEFAULT_QUALITY,
    DEFAULT_URL_COLOR_COUNT, DOMINANT_COLOR_COUNT, MAX_COLOR_COUNT, MIN_COLOR_COUNT,
};
pub use palette::Palette;
pub use quantizer::*;
pub use sampler::{is_boring_pixel, sample, MAX_COLOR, MIN_ALPHA};
pub use source::{decode_bytes, decode_path, fetch, PixelBuffer};
pub use thief::{get_color, get_palette, get_palette_from_url, ColorThief};

mod error;
mod options;
mod palette;
mod quantizer;
mod sampler;
mod source;
mod thief;
