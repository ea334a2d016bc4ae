//! Image preprocessing ahead of recognition
//!
//! The default preset leaves the decoded image untouched so engines run on
//! exactly what was scanned. `scan` cleans up phone photos and photocopies of
//! the form: grayscale, contrast stretch, median denoise, then sharpen.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::filter::{filter3x3, median_filter};

/// Preprocessing preset names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Preset {
    /// Skip all preprocessing
    #[default]
    None,
    /// Steps: grayscale, normalize, denoise, sharpen
    Scan,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Scan => "scan",
        }
    }

    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        match self {
            Self::None => image,
            Self::Scan => {
                let gray = image.to_luma8();
                let gray = stretch_contrast(&gray);
                // 3x3 median (radius 1) removes speckle without blurring strokes
                let gray = median_filter(&gray, 1, 1);
                DynamicImage::ImageLuma8(sharpen(&gray))
            }
        }
    }
}

/// Map the darkest pixel to 0 and the brightest to 255
fn stretch_contrast(gray: &GrayImage) -> GrayImage {
    let (min, max) = gray
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p.0[0]), hi.max(p.0[0])));

    if max <= min {
        return gray.clone();
    }

    let range = (max - min) as f32;
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let value = gray.get_pixel(x, y).0[0];
        Luma([((value - min) as f32 / range * 255.0).round() as u8])
    })
}

fn sharpen(gray: &GrayImage) -> GrayImage {
    let kernel: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];
    filter3x3(gray, &kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_none_returns_image_unchanged() {
        let mut img = RgbImage::new(4, 4);
        img.put_pixel(1, 1, Rgb([200, 10, 30]));
        let original = DynamicImage::ImageRgb8(img);

        let result = Preset::None.apply(original.clone());
        assert_eq!(result, original);
    }

    #[test]
    fn test_scan_produces_grayscale_with_same_dimensions() {
        let img = RgbImage::from_pixel(30, 12, Rgb([120, 140, 160]));
        let result = Preset::Scan.apply(DynamicImage::ImageRgb8(img));

        assert!(matches!(result, DynamicImage::ImageLuma8(_)));
        assert_eq!(result.width(), 30);
        assert_eq!(result.height(), 12);
    }

    #[test]
    fn test_stretch_contrast_uses_full_range() {
        let img = GrayImage::from_fn(10, 1, |x, _| Luma([100 + x as u8 * 5]));
        let stretched = stretch_contrast(&img);

        assert_eq!(stretched.get_pixel(0, 0).0[0], 0);
        assert_eq!(stretched.get_pixel(9, 0).0[0], 255);
    }

    #[test]
    fn test_stretch_contrast_flat_image_is_untouched() {
        let img = GrayImage::from_pixel(5, 5, Luma([90]));
        assert_eq!(stretch_contrast(&img), img);
    }

    #[test]
    fn test_scan_keeps_dark_text_on_light_background() {
        let mut img = GrayImage::from_pixel(40, 20, Luma([230]));
        for x in 5..35 {
            for y in 8..12 {
                img.put_pixel(x, y, Luma([30]));
            }
        }

        let result = Preset::Scan.apply(DynamicImage::ImageLuma8(img)).to_luma8();

        assert!(result.get_pixel(20, 10).0[0] < 64);
        assert!(result.get_pixel(20, 2).0[0] > 192);
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(Preset::None.as_str(), "none");
        assert_eq!(Preset::Scan.as_str(), "scan");
    }
}
