//! Camera frames

use repsense_core::{RepsenseError, RepsenseResult, Timestamp};

/// Bytes per pixel (packed RGB)
pub const CHANNELS: usize = 3;

/// One packed RGB8 camera frame
#[derive(Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    /// Capture time, if the source stamps frames
    pub captured_at: Option<Timestamp>,
}

impl Frame {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> RepsenseResult<Self> {
        let expected = Self::buffer_len(width, height);
        if pixels.len() != expected {
            return Err(RepsenseError::InvalidFrame {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Frame {
            width,
            height,
            pixels,
            captured_at: None,
        })
    }

    /// All-black frame
    pub fn blank(width: u32, height: u32) -> Self {
        Frame {
            width,
            height,
            pixels: vec![0; Self::buffer_len(width, height)],
            captured_at: None,
        }
    }

    pub fn with_timestamp(mut self, captured_at: Timestamp) -> Self {
        self.captured_at = Some(captured_at);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGB value at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Some([
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ])
    }

    /// Nearest-neighbour resample to `width` x `height`
    pub fn downscale(&self, width: u32, height: u32) -> Frame {
        if width == self.width && height == self.height {
            return self.clone();
        }
        if self.is_empty() {
            let mut out = Frame::blank(width, height);
            out.captured_at = self.captured_at;
            return out;
        }

        let src_w = self.width as usize;
        let mut pixels = Vec::with_capacity(Self::buffer_len(width, height));
        for y in 0..height as usize {
            let sy = y * self.height as usize / height as usize;
            for x in 0..width as usize {
                let sx = x * src_w / width as usize;
                let offset = (sy * src_w + sx) * CHANNELS;
                pixels.extend_from_slice(&self.pixels[offset..offset + CHANNELS]);
            }
        }

        Frame {
            width,
            height,
            pixels,
            captured_at: self.captured_at,
        }
    }

    fn buffer_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * CHANNELS
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("captured_at", &self.captured_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Frame {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 7]);
            }
        }
        Frame::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_buffer_size_checked() {
        let err = Frame::new(2, 2, vec![0; 5]).unwrap_err();
        assert_eq!(
            err,
            RepsenseError::InvalidFrame {
                expected: 12,
                actual: 5
            }
        );
    }

    #[test]
    fn test_downscale_nearest_neighbour() {
        let frame = gradient(8, 4);
        let small = frame.downscale(4, 2);

        assert_eq!(small.width(), 4);
        assert_eq!(small.height(), 2);
        assert_eq!(small.pixels().len(), 4 * 2 * CHANNELS);
        assert_eq!(small.pixel(0, 0), Some([0, 0, 7]));
        assert_eq!(small.pixel(1, 0), Some([2, 0, 7]));
        assert_eq!(small.pixel(3, 1), Some([6, 2, 7]));
        assert_eq!(small.pixel(4, 0), None);
    }

    #[test]
    fn test_downscale_same_size_is_copy() {
        let frame = gradient(3, 3).with_timestamp(Timestamp::from_millis(40));
        assert_eq!(frame.downscale(3, 3), frame);
    }

    #[test]
    fn test_downscale_empty_source() {
        let frame = Frame::blank(0, 0);
        let out = frame.downscale(4, 4);

        assert_eq!(out.pixel(3, 3), Some([0, 0, 0]));
    }
}
