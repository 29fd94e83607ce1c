use image::{DynamicImage, GrayImage};
use imageproc::filter::sharpen3x3;

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Sharpened copy of the input, used as an extra sweep variant to recover
/// faint strokes the detector misses on the original scan.
pub fn sharpen_variant(img: &DynamicImage) -> DynamicImage {
    DynamicImage::ImageLuma8(sharpen3x3(&img.to_luma8()))
}
