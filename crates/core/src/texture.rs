//! Texture upload data and sampling selection.
//!
//! Images are uploaded as tightly packed RGBA8. Power-of-two images get a
//! full mipmap chain and trilinear minification; anything else cannot be
//! mipmapped or repeated under WebGL1/GLES2 rules, so it is clamped and
//! sampled linearly.

use crate::context::TextureSampling;
use crate::error::GlError;

/// Largest width or height GL accepts (`GLsizei` is a signed 32-bit int).
pub const MAX_DIMENSION: u32 = i32::MAX as u32;

const BYTES_PER_PIXEL: usize = 4;

/// An RGBA8 image borrowed for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureImage<'a> {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long.
    pub pixels: &'a [u8],
}

impl<'a> TextureImage<'a> {
    /// Wraps `pixels`, checking the length against the dimensions.
    ///
    /// # Errors
    ///
    /// Returns `GlError::TextureDataLength` if `pixels` is not exactly
    /// `width * height * 4` bytes, or if either dimension exceeds
    /// [`MAX_DIMENSION`].
    pub fn new(width: u32, height: u32, pixels: &'a [u8]) -> Result<Self, GlError> {
        let image = Self {
            width,
            height,
            pixels,
        };
        image.validate()?;
        Ok(image)
    }

    /// Byte length an image of these dimensions must have, or `None` when a
    /// dimension exceeds [`MAX_DIMENSION`] or the length overflows `usize`.
    pub fn expected_len(&self) -> Option<usize> {
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return None;
        }
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(BYTES_PER_PIXEL)
    }

    pub fn validate(&self) -> Result<(), GlError> {
        let expected = self.expected_len();
        if expected != Some(self.pixels.len()) {
            return Err(GlError::TextureDataLength {
                width: self.width,
                height: self.height,
                expected,
                len: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Sampling state to apply after uploading this image.
    pub fn sampling(&self) -> TextureSampling {
        if is_power_of_two(self.width) && is_power_of_two(self.height) {
            TextureSampling::Mipmapped
        } else {
            TextureSampling::ClampLinear
        }
    }
}

/// Whether `value` is a power of two. Zero is not.
pub fn is_power_of_two(value: u32) -> bool {
    value.is_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_exact_rgba_length() {
        let pixels = [0_u8; 2 * 2 * 4];
        let image = TextureImage::new(2, 2, &pixels).unwrap();
        assert_eq!(image.expected_len(), Some(16));
    }

    #[test]
    fn new_rejects_short_data() {
        let pixels = [0_u8; 15];
        let err = TextureImage::new(2, 2, &pixels).unwrap_err();
        assert_eq!(
            err,
            GlError::TextureDataLength {
                width: 2,
                height: 2,
                expected: Some(16),
                len: 15
            }
        );
    }

    #[test]
    fn huge_dimensions_are_an_error_not_an_overflow() {
        let err = TextureImage::new(u32::MAX, u32::MAX, &[]).unwrap_err();
        assert_eq!(
            err,
            GlError::TextureDataLength {
                width: u32::MAX,
                height: u32::MAX,
                expected: None,
                len: 0
            }
        );
    }

    #[test]
    fn dimensions_beyond_gl_size_limit_are_rejected() {
        let image = TextureImage {
            width: MAX_DIMENSION + 1,
            height: 0,
            pixels: &[],
        };
        assert_eq!(image.expected_len(), None);
        assert!(image.validate().is_err());

        let image = TextureImage {
            width: MAX_DIMENSION,
            height: 0,
            pixels: &[],
        };
        assert_eq!(image.expected_len(), Some(0));
        assert!(image.validate().is_ok());
    }

    #[test]
    fn power_of_two_images_are_mipmapped() {
        let pixels = vec![0_u8; 4 * 8 * 4];
        let image = TextureImage::new(4, 8, &pixels).unwrap();
        assert_eq!(image.sampling(), TextureSampling::Mipmapped);
    }

    #[test]
    fn non_power_of_two_images_are_clamped() {
        let pixels = vec![0_u8; 3 * 4 * 4];
        let image = TextureImage::new(3, 4, &pixels).unwrap();
        assert_eq!(image.sampling(), TextureSampling::ClampLinear);
    }

    #[test]
    fn zero_is_not_a_power_of_two() {
        assert!(!is_power_of_two(0));
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(1024));
        assert!(!is_power_of_two(1000));
    }

    #[test]
    fn empty_image_is_valid_but_clamped() {
        let image = TextureImage::new(0, 0, &[]).unwrap();
        assert_eq!(image.sampling(), TextureSampling::ClampLinear);
    }
}
