use ndarray::{ArrayView3, ArrayView4};

use super::error::CoreError;

/// Decoded image as the inference engines consume it: `f32` samples in
/// row-major HWC order.
///
/// Building one from encoded bytes is the caller's job; the core only
/// passes it between engines and the resampler.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageTensor {
    data: Vec<f32>,
    width: u32,
    height: u32,
    channels: u8,
}

impl ImageTensor {
    pub fn new(data: Vec<f32>, width: u32, height: u32, channels: u8) -> Result<Self, CoreError> {
        let expected = (width as usize) * (height as usize) * (channels as usize);
        if data.len() != expected {
            return Err(CoreError::ShapeMismatch(format!(
                "{width}x{height}x{channels} tensor needs {expected} values, got {}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Tensor filled with a constant value.
    pub fn filled(width: u32, height: u32, channels: u8, value: f32) -> Self {
        let len = (width as usize) * (height as usize) * (channels as usize);
        Self {
            data: vec![value; len],
            width,
            height,
            channels,
        }
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, f32> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("tensor length is checked at construction")
    }

    /// View with a leading batch axis of 1, the layout detection graphs expect.
    pub fn as_batch(&self) -> ArrayView4<'_, f32> {
        self.as_ndarray().insert_axis(ndarray::Axis(0))
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
