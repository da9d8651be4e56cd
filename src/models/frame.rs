// Pixel buffers flowing through the recognition pipeline

use crate::models::sign::{SignError, SignResult};

/// Channel order of an interleaved 8-bit, 3-channel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    /// Camera / OpenCV ingestion order
    Bgr,
    /// Order expected by the hand landmark engine
    Rgb,
}

/// A decoded still image, owned by a single pipeline invocation
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub order: ChannelOrder,
}

impl Frame {
    /// Wrap a raw BGR buffer (e.g. a camera frame)
    pub fn from_bgr(width: u32, height: u32, data: Vec<u8>) -> SignResult<Self> {
        Self::new(width, height, data, ChannelOrder::Bgr)
    }

    /// Wrap a raw RGB buffer
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> SignResult<Self> {
        Self::new(width, height, data, ChannelOrder::Rgb)
    }

    fn new(width: u32, height: u32, data: Vec<u8>, order: ChannelOrder) -> SignResult<Self> {
        if width == 0 || height == 0 {
            return Err(SignError::DecodeFailed(format!(
                "Frame has zero dimension: {}x{}",
                width, height
            )));
        }

        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(SignError::DecodeFailed(format!(
                "Frame buffer is {} bytes, expected {} for {}x{}x3",
                data.len(),
                expected,
                width,
                height
            )));
        }

        Ok(Self {
            width,
            height,
            data,
            order,
        })
    }

    /// Convert to RGB order, swapping the first and third channel in place if needed
    pub fn into_rgb(mut self) -> Self {
        if self.order == ChannelOrder::Bgr {
            for px in self.data.chunks_exact_mut(3) {
                px.swap(0, 2);
            }
            self.order = ChannelOrder::Rgb;
        }
        self
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
