//! Image decoding and normalization.
//!
//! The recognizer expects a fixed `[1, 1, 32, 128]` input: grayscale,
//! resized, scaled to `[0, 1]`, then normalized with mean 0.5 / std 0.5.

use candle_core::{Device, Tensor};
use image::imageops::FilterType;
use image::DynamicImage;
use mathscribe_core::{Error, Result};

/// Input height expected by the network.
pub const INPUT_HEIGHT: u32 = 32;

/// Input width expected by the network.
pub const INPUT_WIDTH: u32 = 128;

/// Normalization mean applied after scaling to `[0, 1]`.
pub const NORM_MEAN: f32 = 0.5;

/// Normalization standard deviation applied after scaling to `[0, 1]`.
pub const NORM_STD: f32 = 0.5;

/// Decodes uploaded bytes as a bitmap.
///
/// # Errors
///
/// Returns an image decode error for anything that is not a readable
/// bitmap format.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| Error::image_decode(e.to_string()))
}

/// Converts a decoded image into the normalized input tensor.
///
/// # Errors
///
/// Returns a preprocess error when tensor construction fails.
pub fn image_to_tensor(image: &DynamicImage, device: &Device) -> Result<Tensor> {
    let gray = image.to_luma8();
    let resized = image::imageops::resize(
        &gray,
        INPUT_WIDTH,
        INPUT_HEIGHT,
        FilterType::Triangle,
    );

    let values: Vec<f32> = resized
        .into_raw()
        .into_iter()
        .map(|p| (f32::from(p) / 255.0 - NORM_MEAN) / NORM_STD)
        .collect();

    Tensor::from_vec(
        values,
        (1, 1, INPUT_HEIGHT as usize, INPUT_WIDTH as usize),
        device,
    )
    .map_err(|e| Error::preprocess(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard() -> DynamicImage {
        let img = image::RgbImage::from_fn(64, 16, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgb([255, 255, 255])
            } else {
                image::Rgb([0, 0, 0])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_tensor_shape() {
        let tensor = image_to_tensor(&checkerboard(), &Device::Cpu).unwrap();
        assert_eq!(tensor.dims(), &[1, 1, 32, 128]);
    }

    #[test]
    fn test_value_range_after_normalization() {
        let tensor = image_to_tensor(&checkerboard(), &Device::Cpu).unwrap();
        let values: Vec<f32> = tensor.flatten_all().unwrap().to_vec1().unwrap();
        assert!(values.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_image(&[0x00, 0x01, 0x02]).unwrap_err();
        assert!(matches!(err, Error::ImageDecode { .. }));
    }

    #[test]
    fn test_roundtrip_through_png() {
        let mut bytes = Vec::new();
        checkerboard()
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.width(), 64);
    }
}
