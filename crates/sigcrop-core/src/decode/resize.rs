//! Image resizing for capping signature asset dimensions.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgba_image(resized))
}

/// Downscale an image to fit within `max_width x max_height`, preserving
/// aspect ratio.
///
/// Images already within bounds are returned unchanged; images are never
/// upscaled.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either bound is zero.
pub fn resize_to_bounds(
    image: &DecodedImage,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_width == 0 || max_height == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_width,
            height: max_height,
        });
    }

    let (new_width, new_height) =
        calculate_fit_dimensions(image.width, image.height, max_width, max_height);

    tracing::debug!(
        from_width = image.width,
        from_height = image.height,
        new_width,
        new_height,
        "resize to bounds"
    );

    resize(image, new_width, new_height, filter)
}

/// Calculate dimensions that fit within the bounds while preserving aspect ratio.
///
/// Never upscales. Each output dimension is at least 1.
pub fn calculate_fit_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);

    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max_height);

    (new_width, new_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
                pixels.push(255);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 4);
    }

    #[test]
    fn test_resize_same_dimensions_is_identity() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Bilinear).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(resize(&img, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_to_bounds_landscape() {
        let img = create_test_image(1200, 400);
        let resized = resize_to_bounds(&img, 600, 300, FilterType::Lanczos3).unwrap();

        assert_eq!((resized.width, resized.height), (600, 200));
    }

    #[test]
    fn test_resize_to_bounds_height_limited() {
        let img = create_test_image(400, 800);
        let resized = resize_to_bounds(&img, 600, 200, FilterType::Lanczos3).unwrap();

        assert_eq!((resized.width, resized.height), (100, 200));
    }

    #[test]
    fn test_resize_to_bounds_already_fits() {
        let img = create_test_image(100, 50);
        let resized = resize_to_bounds(&img, 600, 200, FilterType::Bilinear).unwrap();

        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_to_bounds_zero_error() {
        let img = create_test_image(100, 50);
        assert!(resize_to_bounds(&img, 0, 10, FilterType::Bilinear).is_err());
        assert!(resize_to_bounds(&img, 10, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_calculate_fit_dimensions() {
        assert_eq!(calculate_fit_dimensions(6000, 4000, 2560, 2560), (2560, 1707));
        assert_eq!(calculate_fit_dimensions(4000, 6000, 2560, 2560), (1707, 2560));
        assert_eq!(calculate_fit_dimensions(300, 100, 300, 100), (300, 100));
        assert_eq!(calculate_fit_dimensions(0, 0, 256, 256), (0, 0));
    }

    #[test]
    fn test_calculate_fit_extreme_ratio_keeps_one_pixel() {
        assert_eq!(calculate_fit_dimensions(10000, 1, 100, 100), (100, 1));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
