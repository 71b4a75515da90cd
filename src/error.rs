//! Error types for the frame-hole-matte crate.

/// Errors that can occur while locating or matting a frame hole.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A seed or probe coordinate lies outside the pixel buffer.
    ///
    /// This points at a stale seed table rather than a normal outcome, so it
    /// is never clamped.
    #[error("seed ({x}, {y}) is outside the {width}x{height} image")]
    SeedOutOfBounds {
        /// Requested column.
        x: i64,
        /// Requested row.
        y: i64,
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// A seed entry could not be parsed.
    #[error("invalid seed `{input}`: {reason}")]
    InvalidSeed {
        /// The offending text (prefixed with its line number for seed tables).
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image format is not supported.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An error occurred during image processing (load, save, encode).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let io_err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io_err.to_string().contains("gone"));

        let unsupported = Error::UnsupportedFormat("jpeg".to_string());
        assert!(unsupported.to_string().contains("jpeg"));

        let out_of_bounds = Error::SeedOutOfBounds {
            x: -1,
            y: 0,
            width: 10,
            height: 20,
        };
        let msg = out_of_bounds.to_string();
        assert!(msg.contains("(-1, 0)"));
        assert!(msg.contains("10x20"));

        let invalid = Error::InvalidSeed {
            input: "frame1.png".to_string(),
            reason: "missing `:`".to_string(),
        };
        assert!(invalid.to_string().contains("frame1.png"));
    }
}
