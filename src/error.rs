use thiserror::Error;

/// Failure to turn an image source into pixel data
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes could not be decoded as a supported image format
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    /// Reading the image from disk failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP request did not complete
    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("unexpected HTTP status {status} for {url}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The decoded image has no pixels
    #[error("image has zero dimensions: {width}x{height}")]
    EmptyImage {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },

    /// A raw buffer does not hold `width * height` RGBA pixels
    #[error("buffer of {len} bytes does not match {width}x{height} RGBA pixels")]
    BufferSize {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
        /// Actual buffer length in bytes
        len: usize,
    },

    /// The URL could not be parsed or mapped to a local path
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The URL scheme is neither http(s) nor file
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Errors returned by the palette entry points
#[derive(Debug, Error)]
pub enum Error {
    /// An option was rejected before any image work started
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Decoding a local image failed
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Loading an image from a URL failed
    #[error("failed to load image from {url}: {source}")]
    Load {
        /// URL the image was loaded from
        url: String,
        /// Underlying decode failure
        #[source]
        source: DecodeError,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
