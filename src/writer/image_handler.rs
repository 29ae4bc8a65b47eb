//! Image XObjects for PDF generation.
//!
//! Symbols are embedded as Flate-compressed image XObjects (PDF spec
//! Section 8.9). The pixel data never touches the filesystem: it is built in
//! memory, compressed, and handed to the page that draws it.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{Error, Result};
use crate::object::Object;

/// Color space for image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Grayscale (1 component per pixel)
    DeviceGray,
    /// RGB color (3 components per pixel)
    DeviceRGB,
}

impl ColorSpace {
    /// Get the number of color components.
    pub fn components(&self) -> u8 {
        match self {
            ColorSpace::DeviceGray => 1,
            ColorSpace::DeviceRGB => 3,
        }
    }

    /// Get the PDF name for this color space.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
        }
    }
}

/// Compressed image data ready for embedding.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Color space
    pub color_space: ColorSpace,
    /// Flate-compressed samples, 8 bits per component
    pub data: Vec<u8>,
    /// Whether viewers may smooth the image when scaling
    pub interpolate: bool,
}

impl ImageData {
    /// Build image data from an 8-bit grayscale bitmap.
    pub fn from_luma(image: &image::GrayImage) -> Result<Self> {
        Self::from_samples(image.width(), image.height(), ColorSpace::DeviceGray, image.as_raw())
    }

    /// Build image data from raw 8-bit samples.
    pub fn from_samples(
        width: u32,
        height: u32,
        color_space: ColorSpace,
        samples: &[u8],
    ) -> Result<Self> {
        let expected = width as usize * height as usize * color_space.components() as usize;
        if samples.len() != expected {
            return Err(Error::Image(format!(
                "expected {} samples for {}x{} {}, got {}",
                expected,
                width,
                height,
                color_space.pdf_name(),
                samples.len()
            )));
        }

        Ok(Self {
            width,
            height,
            color_space,
            data: compress(samples)?,
            interpolate: false,
        })
    }

    /// Build the image XObject stream object.
    pub fn to_xobject(&self) -> Object {
        let mut dict = HashMap::new();
        dict.insert("Type".to_string(), Object::Name("XObject".to_string()));
        dict.insert("Subtype".to_string(), Object::Name("Image".to_string()));
        dict.insert("Width".to_string(), Object::Integer(self.width as i64));
        dict.insert("Height".to_string(), Object::Integer(self.height as i64));
        dict.insert(
            "ColorSpace".to_string(),
            Object::Name(self.color_space.pdf_name().to_string()),
        );
        dict.insert("BitsPerComponent".to_string(), Object::Integer(8));
        dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
        dict.insert("Interpolate".to_string(), Object::Boolean(self.interpolate));
        dict.insert("Length".to_string(), Object::Integer(self.data.len() as i64));

        Object::Stream {
            dict,
            data: bytes::Bytes::copy_from_slice(&self.data),
        }
    }
}

/// Compress samples with zlib/deflate for the FlateDecode filter.
pub(crate) fn compress(data: &[u8]) -> Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| Error::Image(format!("compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| Error::Image(format!("compression failed: {}", e)))
}

/// Image placement on a PDF page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Display width
    pub width: f32,
    /// Display height
    pub height: f32,
}

impl ImagePlacement {
    /// Create a new image placement.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The six operands of the `cm` operator that map the unit square onto
    /// this placement.
    pub fn transform_matrix(&self) -> (f32, f32, f32, f32, f32, f32) {
        (self.width, 0.0, 0.0, self.height, self.x, self.y)
    }
}
