//! Image writers: plain-text PPM and PNG.
//!
//! Both take an [`ImageBuffer`] of summed samples, average it, apply
//! gamma 2 and quantize each channel to 8 bits.

use crate::{ImageBuffer, Result};
use ember_math::{Color, Interval};
use std::io::Write;
use std::path::Path;

/// Channel range kept before scaling to [0, 256).
const INTENSITY: Interval = Interval::new(0.000, 0.999);

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a summed pixel color to 8-bit RGB.
pub fn color_to_rgb8(sum: Color, samples_per_pixel: u32) -> [u8; 3] {
    let color = sum / samples_per_pixel.max(1) as f64;
    let quantize = |c: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

impl ImageBuffer {
    /// Convert to RGB bytes, row-major.
    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        self.pixels
            .iter()
            .map(|sum| color_to_rgb8(*sum, self.samples_per_pixel))
            .collect()
    }
}

/// Write the image as an ASCII PPM (`P3`) stream.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut writer: W) -> Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in image.to_rgb8() {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save the image as a PNG file.
pub fn save_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    let buffer = image::RgbImage::from_fn(image.width, image.height, |x, y| {
        image::Rgb(color_to_rgb8(image.get(x, y), image.samples_per_pixel))
    });
    buffer.save(path)?;
    Ok(())
}
