//! Image normalizer: raw upload bytes → classifier input tensor.
//!
//! Decodes any supported format, drops alpha / expands grayscale to RGB,
//! resizes to the model's square grid and scales intensities to [0, 1].
//! Output layout is NHWC with a single-image batch: `(1, H, W, 3)`.

use image::imageops::FilterType;
use ndarray::Array4;
use thiserror::Error;
use tracing::debug;

pub const CHANNELS: usize = 3;

/// Bilinear; deterministic, and the exact filter is not part of the model contract.
const RESIZE_FILTER: FilterType = FilterType::Triangle;

#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("Empty image payload")]
    Empty,

    #[error("Failed to decode image: {0}")]
    Decode(String),
}

/// Normalized single-image batch.
#[derive(Debug, Clone)]
pub struct ImageTensor {
    data: Array4<f32>,
}

impl ImageTensor {
    pub fn shape(&self) -> [usize; 4] {
        let s = self.data.shape();
        [s[0], s[1], s[2], s[3]]
    }

    pub fn as_array(&self) -> &Array4<f32> {
        &self.data
    }

    /// Flat NHWC values.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().copied()
    }
}

/// Decode and normalize an uploaded image to a `side × side` RGB tensor.
pub fn normalize(bytes: &[u8], side: u32) -> Result<ImageTensor, PreprocessError> {
    if bytes.is_empty() {
        return Err(PreprocessError::Empty);
    }

    let decoded =
        image::load_from_memory(bytes).map_err(|e| PreprocessError::Decode(e.to_string()))?;
    debug!(
        width = decoded.width(),
        height = decoded.height(),
        color = ?decoded.color(),
        "Decoded upload"
    );

    let rgb = decoded.to_rgb8();
    let resized = image::imageops::resize(&rgb, side, side, RESIZE_FILTER);

    let side = side as usize;
    let mut data = Array4::<f32>::zeros((1, side, side, CHANNELS));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for (c, &value) in pixel.0.iter().enumerate() {
            data[[0, y as usize, x as usize, c]] = f32::from(value) / 255.0;
        }
    }

    Ok(ImageTensor { data })
}
