//! Logo watermarking for generated banners.

use crate::error::Result;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, RgbaImage};
use std::path::Path;

/// Logo width as a fraction of the target image width.
pub const DEFAULT_WIDTH_RATIO: f32 = 0.18;

/// Gap in pixels between the logo and the bottom-right corner.
pub const DEFAULT_MARGIN: u32 = 24;

/// Channels at or above this are "near white".
const NEAR_WHITE: u8 = 235;

/// Channels at or below this are "near black".
const NEAR_BLACK: u8 = 60;

/// Rewrites a dark-on-white logo for dark backgrounds: near-white pixels
/// become fully transparent, near-black pixels become opaque white.
pub fn recolor_for_dark_background(logo: &mut RgbaImage) {
    for pixel in logo.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if r >= NEAR_WHITE && g >= NEAR_WHITE && b >= NEAR_WHITE {
            pixel.0 = [255, 255, 255, 0];
        } else if r <= NEAR_BLACK && g <= NEAR_BLACK && b <= NEAR_BLACK {
            pixel.0 = [255, 255, 255, 255];
        }
    }
}

/// A recolored logo ready to stamp onto images.
#[derive(Debug, Clone)]
pub struct Watermark {
    logo: RgbaImage,
    width_ratio: f32,
    margin: u32,
}

impl Watermark {
    /// Loads and recolors the logo at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_image(image::open(path)?))
    }

    /// Recolors an already decoded logo.
    pub fn from_image(logo: DynamicImage) -> Self {
        let mut logo = logo.to_rgba8();
        recolor_for_dark_background(&mut logo);
        Self {
            logo,
            width_ratio: DEFAULT_WIDTH_RATIO,
            margin: DEFAULT_MARGIN,
        }
    }

    /// Sets the logo width as a fraction of the image width.
    pub fn with_width_ratio(mut self, ratio: f32) -> Self {
        self.width_ratio = ratio;
        self
    }

    /// Sets the corner margin in pixels.
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Composites the logo into the bottom-right corner and drops alpha.
    pub fn apply(&self, base: &DynamicImage) -> RgbImage {
        let mut canvas = base.to_rgba8();
        let (width, height) = canvas.dimensions();
        let (logo_w, logo_h) = self.logo.dimensions();

        if logo_w == 0 || logo_h == 0 {
            return DynamicImage::ImageRgba8(canvas).to_rgb8();
        }

        let target_w = ((width as f32 * self.width_ratio).round() as u32).max(1);
        let target_h = ((logo_h as u64 * target_w as u64 / logo_w as u64) as u32).max(1);
        let scaled = imageops::resize(&self.logo, target_w, target_h, FilterType::Lanczos3);

        let x = width.saturating_sub(target_w + self.margin);
        let y = height.saturating_sub(target_h + self.margin);
        imageops::overlay(&mut canvas, &scaled, x as i64, y as i64);

        DynamicImage::ImageRgba8(canvas).to_rgb8()
    }
}
