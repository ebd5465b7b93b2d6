use image::imageops::{self, FilterType};
use ndarray::Array4;

use crate::error::ClassifyError;
use crate::models::{InputTensor, INPUT_SIZE};

/// Decodes `bytes` into the model input: RGB, stretched to 224x224 with a
/// bicubic (Catmull-Rom) filter, channels scaled to `[0, 1]`, batch
/// dimension of one.
pub fn preprocess(bytes: &[u8]) -> Result<InputTensor, ClassifyError> {
    let rgb = image::load_from_memory(bytes)?.to_rgb8();
    let resized = imageops::resize(&rgb, INPUT_SIZE, INPUT_SIZE, FilterType::CatmullRom);

    let side = INPUT_SIZE as usize;
    Ok(Array4::from_shape_fn((1, side, side, 3), |(_, y, x, c)| {
        resized.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
    }))
}
