// Frame decoding: raw encoded image bytes -> pixel buffer

use tracing::debug;

use crate::models::frame::Frame;
use crate::models::sign::{FailureReason, SignError, SignResult};

/// Decode an encoded still image into an RGB frame
/// Every codec error (empty input, corrupt header, unsupported format) maps to
/// `FailureReason::DecodeFailure`
pub fn decode(bytes: &[u8]) -> Result<Frame, FailureReason> {
    decode_frame(bytes).map_err(|e| {
        debug!(error = %e, len = bytes.len(), "Frame decode failed");
        FailureReason::DecodeFailure
    })
}

/// Same as [`decode`] but keeps the underlying error for diagnostics
pub fn decode_frame(bytes: &[u8]) -> SignResult<Frame> {
    if bytes.is_empty() {
        return Err(SignError::DecodeFailed("Empty image buffer".to_string()));
    }

    let image = image::load_from_memory(bytes).map_err(|e| SignError::DecodeFailed(e.to_string()))?;
    let rgb = image.into_rgb8();
    let (width, height) = rgb.dimensions();

    Frame::from_rgb(width, height, rgb.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{jpeg, png};
    use crate::models::frame::ChannelOrder;

    #[test]
    fn test_empty_buffer_is_decode_failure() {
        assert_eq!(decode(b"").unwrap_err(), FailureReason::DecodeFailure);
    }

    #[test]
    fn test_garbage_is_decode_failure() {
        assert_eq!(decode(b"definitely not an image").unwrap_err(), FailureReason::DecodeFailure);
        assert_eq!(decode(&[0u8; 4096]).unwrap_err(), FailureReason::DecodeFailure);
    }

    #[test]
    fn test_truncated_png_is_decode_failure() {
        let mut bytes = png(8, 8);
        bytes.truncate(bytes.len() / 2);
        assert_eq!(decode(&bytes).unwrap_err(), FailureReason::DecodeFailure);
    }

    #[test]
    fn test_decode_png() {
        let frame = decode(&png(4, 3)).unwrap();
        assert_eq!((frame.width, frame.height), (4, 3));
        assert_eq!(frame.order, ChannelOrder::Rgb);
        assert_eq!(frame.data.len(), 4 * 3 * 3);
        assert_eq!(&frame.data[..3], &[200, 150, 100]);
    }

    #[test]
    fn test_decode_jpeg() {
        let frame = decode(&jpeg(16, 16)).unwrap();
        assert_eq!((frame.width, frame.height), (16, 16));
        assert_eq!(frame.pixel_count(), 256);
    }
}
