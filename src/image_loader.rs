use crate::error::{AppError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use slint::{Image, Rgba8Pixel, SharedPixelBuffer};
use std::path::Path;
use tiny_skia::{ColorU8, IntSize, Pixmap};

/// Decodes an image file, guessing the format from its content.
fn decode(path: &Path) -> Result<DynamicImage> {
    let img = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    Ok(img)
}

/// Size an image of `width`x`height` has after cover scaling to a `target` square.
///
/// The smaller side lands exactly on `target`; the other overflows.
pub fn cover_dimensions(width: u32, height: u32, target: u32) -> (u32, u32) {
    let scale = f64::max(
        target as f64 / width.max(1) as f64,
        target as f64 / height.max(1) as f64,
    );
    let new_width = ((width as f64 * scale) as u32).max(1);
    let new_height = ((height as f64 * scale) as u32).max(1);
    (new_width, new_height)
}

/// Loads an image and cover-scales it so it fills a `target` square.
pub fn load_cover_scaled(path: &Path, target: u32) -> Result<Pixmap> {
    let img = decode(path)?;
    let (width, height) = cover_dimensions(img.width(), img.height(), target);
    into_pixmap(img.resize_exact(width, height, FilterType::Triangle).to_rgba8())
}

/// Loads an image scaled down (or up) to fit inside a `bound` square, keeping its aspect.
pub fn load_fitted(path: &Path, bound: u32) -> Result<Pixmap> {
    let img = decode(path)?;
    into_pixmap(img.resize(bound, bound, FilterType::Triangle).to_rgba8())
}

/// Converts straight-alpha RGBA8 into a premultiplied pixmap ready for drawing.
pub fn into_pixmap(image: RgbaImage) -> Result<Pixmap> {
    let (width, height) = image.dimensions();
    let size = IntSize::from_wh(width, height)
        .ok_or_else(|| AppError::ImageLoad(format!("empty image ({}x{})", width, height)))?;

    let mut data = image.into_raw();
    for pixel in data.chunks_exact_mut(4) {
        if pixel[3] < u8::MAX {
            let color = ColorU8::from_rgba(pixel[0], pixel[1], pixel[2], pixel[3]).premultiply();
            pixel.copy_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }
    }

    Pixmap::from_vec(data, size)
        .ok_or_else(|| AppError::ImageLoad(format!("invalid pixel buffer ({}x{})", width, height)))
}

/// Wraps a rendered frame into a Slint image without demultiplying it.
pub fn create_slint_image(frame: &Pixmap) -> Image {
    let buffer =
        SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(frame.data(), frame.width(), frame.height());
    Image::from_rgba8_premultiplied(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn cover_fills_the_smaller_side() {
        assert_eq!(cover_dimensions(1920, 1080, 900), (1600, 900));
        assert_eq!(cover_dimensions(1080, 1920, 900), (900, 1600));
        assert_eq!(cover_dimensions(300, 300, 900), (900, 900));
    }

    #[test]
    fn cover_never_collapses_to_zero() {
        let (w, h) = cover_dimensions(10_000, 1, 1);
        assert!(w >= 1 && h >= 1);
    }

    #[test]
    fn loads_and_scales_real_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbaImage::from_pixel(40, 20, Rgba([200, 10, 10, 255]))
            .save(&path)
            .unwrap();

        let cover = load_cover_scaled(&path, 10).unwrap();
        assert_eq!((cover.width(), cover.height()), (20, 10));

        let fitted = load_fitted(&path, 10).unwrap();
        assert_eq!((fitted.width(), fitted.height()), (10, 5));
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();
        assert!(load_cover_scaled(&path, 10).is_err());
    }

    #[test]
    fn pixmap_is_premultiplied() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([200, 100, 50, 255]));
        image.put_pixel(1, 0, Rgba([200, 100, 0, 128]));

        let pixmap = into_pixmap(image).unwrap();
        let opaque = pixmap.pixel(0, 0).unwrap();
        assert_eq!(
            (opaque.red(), opaque.green(), opaque.blue(), opaque.alpha()),
            (200, 100, 50, 255)
        );
        let half = pixmap.pixel(1, 0).unwrap();
        assert_eq!(half.alpha(), 128);
        assert!(half.red() <= 101 && half.red() >= 99);
    }

    #[test]
    fn empty_image_is_rejected() {
        assert!(into_pixmap(RgbaImage::new(0, 4)).is_err());
    }
}
