use image::{DynamicImage, GrayImage, Luma};
use swarascan::{BoundingBox, RawDetection};

/// Blank white page of the given size.
pub fn blank_page(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([255u8])))
}

/// Paint a filled black rectangle onto the page, far edge exclusive,
/// clamped to the image bounds.
pub fn draw_ink(page: &mut DynamicImage, x1: u32, y1: u32, x2: u32, y2: u32) {
    let mut gray = page.to_luma8();
    for y in y1..y2.min(gray.height()) {
        for x in x1..x2.min(gray.width()) {
            gray.put_pixel(x, y, Luma([0u8]));
        }
    }
    *page = DynamicImage::ImageLuma8(gray);
}

pub fn bbox(x1: u32, y1: u32, x2: u32, y2: u32) -> BoundingBox {
    BoundingBox::new(x1, y1, x2, y2)
}

pub fn det(label: &str, score: f32, x1: u32, y1: u32, x2: u32, y2: u32) -> RawDetection {
    RawDetection::new(label, score, bbox(x1, y1, x2, y2))
}
