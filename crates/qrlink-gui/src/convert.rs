use image::{DynamicImage, GrayImage};

/// Convert an 8-bit grayscale image to an egui ColorImage.
pub fn gray_to_color_image(image: &GrayImage) -> egui::ColorImage {
    let (w, h) = image.dimensions();
    let pixels = image
        .pixels()
        .map(|p| egui::Color32::from_gray(p[0]))
        .collect();

    egui::ColorImage {
        size: [w as usize, h as usize],
        pixels,
        source_size: Default::default(),
    }
}

/// Downscale a camera frame to fit `max_edge` and convert it for display.
pub fn frame_to_preview(frame: &DynamicImage, max_edge: u32) -> egui::ColorImage {
    let rgb = frame.thumbnail(max_edge, max_edge).to_rgb8();
    let (w, h) = rgb.dimensions();
    egui::ColorImage::from_rgb([w as usize, h as usize], rgb.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, RgbImage};

    #[test]
    fn gray_pixels_map_one_to_one() {
        let mut image = GrayImage::from_pixel(3, 2, Luma([255]));
        image.put_pixel(1, 0, Luma([0]));
        let color = gray_to_color_image(&image);
        assert_eq!(color.size, [3, 2]);
        assert_eq!(color.pixels[1], egui::Color32::BLACK);
        assert_eq!(color.pixels[0], egui::Color32::WHITE);
    }

    #[test]
    fn preview_fits_max_edge() {
        let frame = DynamicImage::ImageRgb8(RgbImage::new(640, 480));
        let preview = frame_to_preview(&frame, 320);
        assert_eq!(preview.size, [320, 240]);
    }
}
