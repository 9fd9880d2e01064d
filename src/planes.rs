//! Contains the Viewport struct, which describes the relationship
//! between a rectangle on the integral plane with an origin at 0,0
//! and the fixed window of the complex plane it is rendered from: a
//! square four units on a side, centered on the origin.
use num::Complex;

use errors::{Error, Result};

/// The extent of the complex plane covered along each axis.  The same
/// span is used for both axes whatever the pixel counts, so pixels are
/// only square in plane units when the image is.
pub const SPAN: f64 = 4.0;

/// Describes the column, row of a pixel in the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The integral plane, and the mapping from it onto the complex plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    width: usize,
    height: usize,
}

impl Viewport {
    /// Constructor.  Both dimensions must be positive.
    pub fn new(width: usize, height: usize) -> Result<Viewport> {
        if width == 0 || height == 0 {
            return Err(Error::Config(format!(
                "image dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Viewport { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Given a pixel on the integral cartesian plane, map it to the
    /// complex plane.  The operation order is fixed: subtract the half
    /// width, scale by the span, divide by the width.  Rearranging it
    /// changes the low bits of the coordinate and with them, near the
    /// boundary of the set, the iteration count.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let (width, height) = (self.width as f64, self.height as f64);
        Complex::new(
            ((pixel.0 as f64) - width / 2.0) * SPAN / width,
            ((pixel.1 as f64) - height / 2.0) * SPAN / height,
        )
    }
}
