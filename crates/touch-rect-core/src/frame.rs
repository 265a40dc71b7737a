use std::sync::Arc;

use crate::{Camera, PlaneAnchor};

/// Errors raised when assembling a frame from raw parts.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FrameError {
    #[error("invalid grayscale image buffer length (expected {expected} bytes, got {got})")]
    InvalidGrayBuffer { expected: usize, got: usize },

    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
}

/// Row-major 8-bit camera image.
#[derive(Clone, Debug)]
pub struct GrayImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImage {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::InvalidDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(FrameError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(FrameError::InvalidGrayBuffer {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }
}

/// One captured camera image plus the tracking state at capture time.
///
/// Frames are immutable once built; the engine only holds them for the
/// lifetime of a single detection request.
#[derive(Clone, Debug)]
pub struct Frame {
    pub id: u64,
    /// Capture time in seconds on the tracking clock.
    pub timestamp: f64,
    pub camera: Camera,
    /// Surface planes known to scene tracking at capture time.
    pub planes: Vec<PlaneAnchor>,
    pub image: Option<GrayImage>,
}

/// Shared handle passed between the event thread and the detection worker.
pub type FrameRef = Arc<Frame>;

impl Frame {
    pub fn new(id: u64, timestamp: f64, camera: Camera) -> Self {
        Self {
            id,
            timestamp,
            camera,
            planes: Vec::new(),
            image: None,
        }
    }

    pub fn with_planes(mut self, planes: Vec<PlaneAnchor>) -> Self {
        self.planes = planes;
        self
    }

    pub fn with_image(mut self, image: GrayImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn into_ref(self) -> FrameRef {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Intrinsics;
    use nalgebra::Isometry3;

    #[test]
    fn image_validates_buffer_length() {
        let err = GrayImage::new(4, 3, vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            FrameError::InvalidGrayBuffer {
                expected: 12,
                got: 11
            }
        );
        assert!(matches!(
            GrayImage::new(0, 3, Vec::new()),
            Err(FrameError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn image_pixel_access() {
        let img = GrayImage::new(2, 2, vec![1, 2, 3, 4]).expect("valid");
        assert_eq!(img.get(1, 1), Some(4));
        assert_eq!(img.get(2, 0), None);
    }

    #[test]
    fn frame_builder() {
        let cam = Camera::new(Intrinsics::default(), Isometry3::identity());
        let img = GrayImage::new(1, 1, vec![9]).expect("valid");
        let frame = Frame::new(3, 0.5, cam).with_image(img).into_ref();
        assert_eq!(frame.id, 3);
        assert!(frame.planes.is_empty());
        assert_eq!(frame.image.as_ref().map(GrayImage::width), Some(1));
    }
}
