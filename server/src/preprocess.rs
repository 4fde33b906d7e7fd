use image::imageops::FilterType;
use image::DynamicImage;

use pixelpad_shared::decode_data_url;

use crate::error::ApiError;

/// Decodes a `data:image/...;base64,` URL into an image.
pub fn decode_image(data_url: &str) -> Result<DynamicImage, ApiError> {
    let bytes = decode_data_url(data_url)?;
    Ok(image::load_from_memory(&bytes)?)
}

/// Grayscale, resized to `side × side`, scaled to `[0, 1]` and inverted so
/// ink is 1.0 on a 0.0 background. Row-major.
pub fn normalize(image: &DynamicImage, side: u32) -> Vec<f32> {
    let gray = image.to_luma8();
    let resized = image::imageops::resize(&gray, side, side, FilterType::Triangle);
    resized
        .pixels()
        .map(|pixel| 1.0 - f32::from(pixel.0[0]) / 255.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use pixelpad_shared::{draw_line, encode_png_data_url, Point, Rgb, Surface, ToolState};

    use super::*;

    #[test]
    fn blank_surface_normalizes_to_zero() {
        let surface = Surface::new(28, 28, Rgb::WHITE);
        let url = encode_png_data_url(&surface).unwrap();
        let image = decode_image(&url).unwrap();
        assert_eq!((image.width(), image.height()), (28, 28));
        let input = normalize(&image, 8);
        assert_eq!(input.len(), 64);
        assert!(input.iter().all(|value| value.abs() < 0.01));
    }

    #[test]
    fn ink_becomes_one() {
        let surface = Surface::new(16, 16, Rgb::BLACK);
        let url = encode_png_data_url(&surface).unwrap();
        let input = normalize(&decode_image(&url).unwrap(), 4);
        assert!(input.iter().all(|value| (value - 1.0).abs() < 0.01));
    }

    #[test]
    fn strokes_show_up_where_they_were_drawn() {
        let mut surface = Surface::new(20, 20, Rgb::WHITE);
        draw_line(
            &mut surface,
            Point::new(0, 2),
            Point::new(19, 2),
            &ToolState::default(),
        );
        let url = encode_png_data_url(&surface).unwrap();
        let input = normalize(&decode_image(&url).unwrap(), 20);
        assert!((input[2 * 20 + 10] - 1.0).abs() < 0.01);
        assert!(input[15 * 20 + 10].abs() < 0.01);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            decode_image("not a url"),
            Err(ApiError::DataUrl(_))
        ));
        assert!(matches!(
            decode_image("data:image/png;base64,aGVsbG8="),
            Err(ApiError::Image(_))
        ));
    }
}
