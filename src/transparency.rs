//! Foreground/background classification for stamp images.
//!
//! A scanned stamp is usually a red mark (or light ink) on a dark background.
//! Each pixel is classified on its own RGB value:
//!
//! - **red mark**: `R - G > 30` and `R - B > 30`
//! - **light content**: `(R + G + B) / 3 > 100`
//!
//! Foreground pixels become fully opaque, everything else fully transparent.
//! There is no partial alpha and no neighbourhood smoothing.

use std::path::Path;

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use tracing::{debug, instrument};

use crate::error::Result;

/// Minimum lead of red over both green and blue for a red stamp mark.
pub const RED_MARGIN: i16 = 30;

/// Average brightness above which a pixel counts as light content.
pub const BRIGHTNESS_THRESHOLD: u16 = 100;

/// Alpha assigned to foreground pixels.
pub const OPAQUE: u8 = 255;

/// Alpha assigned to background pixels.
pub const TRANSPARENT: u8 = 0;

/// Whether a pixel belongs to the stamp rather than its background.
#[must_use]
pub fn is_foreground(pixel: Rgb<u8>) -> bool {
    let [r, g, b] = pixel.0;

    let (r16, g16, b16) = (i16::from(r), i16::from(g), i16::from(b));
    let is_red = r16 - g16 > RED_MARGIN && r16 - b16 > RED_MARGIN;

    // avg > 100 <=> sum > 300, without the rounding of an integer division
    let sum = u16::from(r) + u16::from(g) + u16::from(b);
    let is_bright = sum > BRIGHTNESS_THRESHOLD * 3;

    is_red || is_bright
}

/// Build an RGBA stamp from an RGB image.
///
/// RGB channels are copied unchanged; alpha is [`OPAQUE`] for foreground
/// pixels and [`TRANSPARENT`] otherwise.
#[must_use]
pub fn apply_transparency(image: &RgbImage) -> RgbaImage {
    let mut out = RgbaImage::new(image.width(), image.height());
    let mut opaque = 0u64;

    for (src, dst) in image.pixels().zip(out.pixels_mut()) {
        let [r, g, b] = src.0;
        let alpha = if is_foreground(*src) {
            opaque += 1;
            OPAQUE
        } else {
            TRANSPARENT
        };
        *dst = Rgba([r, g, b, alpha]);
    }

    debug!(
        width = image.width(),
        height = image.height(),
        opaque,
        "Transparency mask applied"
    );
    out
}

/// Open a stamp image from disk and apply the transparency mask.
///
/// Any format the `image` crate can decode is accepted; the image is
/// converted to RGB first, so an existing alpha channel is discarded.
///
/// # Errors
///
/// Returns [`Error::Image`](crate::Error::Image) if the file cannot be read or decoded.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_stamp(path: &Path) -> Result<RgbaImage> {
    let rgb = image::open(path)?.to_rgb8();
    debug!(width = rgb.width(), height = rgb.height(), "Stamp image loaded");
    Ok(apply_transparency(&rgb))
}
