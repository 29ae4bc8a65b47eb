//! QR symbol generation.
//!
//! Symbols are rendered into an in-memory grayscale bitmap and converted
//! straight into an image XObject; nothing is written to disk.
//!
//! The error-correction level is fixed at L (~7% recovery), the most compact
//! tier, and the encoder picks the smallest QR version that fits the payload.
//!
//! ## Example
//!
//! ```ignore
//! use qrsheet::writer::barcode::{QrEncoder, SymbolEncoder};
//!
//! let image = QrEncoder::default().encode("1A2B3C4D-QR")?;
//! assert_eq!(image.width, image.height);
//! ```

use super::image_handler::ImageData;
use crate::error::{Error, Result};

/// Turns a payload into a square symbol image.
pub trait SymbolEncoder {
    /// Encode `data` into an embeddable image.
    fn encode(&self, data: &str) -> Result<ImageData>;
}

/// Options for QR symbol rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrCodeOptions {
    /// Pixels per module edge
    pub module_pixels: u32,
    /// Quiet zone (border) in modules
    pub quiet_zone: u32,
}

impl Default for QrCodeOptions {
    fn default() -> Self {
        Self {
            module_pixels: 10,
            quiet_zone: 4,
        }
    }
}

impl QrCodeOptions {
    /// Create new QR code options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pixels per module edge.
    pub fn module_pixels(mut self, pixels: u32) -> Self {
        self.module_pixels = pixels.max(1);
        self
    }

    /// Set the quiet zone (border) in modules.
    pub fn quiet_zone(mut self, modules: u32) -> Self {
        self.quiet_zone = modules;
        self
    }
}

/// QR code encoder at error-correction level L.
#[derive(Debug, Clone, Default)]
pub struct QrEncoder {
    options: QrCodeOptions,
}

impl QrEncoder {
    /// Create an encoder with the given rendering options.
    pub fn new(options: QrCodeOptions) -> Self {
        Self { options }
    }

    /// Rendering options in use.
    pub fn options(&self) -> &QrCodeOptions {
        &self.options
    }

    /// Render `data` as a black-on-white bitmap including the quiet zone.
    pub fn render_bitmap(&self, data: &str) -> Result<image::GrayImage> {
        use qrcode::{EcLevel, QrCode};

        let code = QrCode::with_error_correction_level(data, EcLevel::L).map_err(|e| {
            Error::Encoding {
                code: data.to_string(),
                reason: e.to_string(),
            }
        })?;

        let modules = code.width() as u32;
        let module_px = self.options.module_pixels.max(1);
        let side = (modules + self.options.quiet_zone * 2) * module_px;
        let quiet_px = self.options.quiet_zone * module_px;

        let mut img = image::GrayImage::from_pixel(side, side, image::Luma([255]));
        for (index, color) in code.to_colors().into_iter().enumerate() {
            if color != qrcode::Color::Dark {
                continue;
            }
            let col = index as u32 % modules;
            let row = index as u32 / modules;
            let start_x = quiet_px + col * module_px;
            let start_y = quiet_px + row * module_px;
            for dy in 0..module_px {
                for dx in 0..module_px {
                    img.put_pixel(start_x + dx, start_y + dy, image::Luma([0]));
                }
            }
        }

        log::trace!(
            "Encoded {:?} as {}x{} modules ({} px)",
            data,
            modules,
            modules,
            side
        );
        Ok(img)
    }
}

impl SymbolEncoder for QrEncoder {
    fn encode(&self, data: &str) -> Result<ImageData> {
        let bitmap = self.render_bitmap(data)?;
        ImageData::from_luma(&bitmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_is_square_with_quiet_zone() {
        let encoder = QrEncoder::new(QrCodeOptions::new().module_pixels(2).quiet_zone(4));
        let img = encoder.render_bitmap("1A2B3C4D-QR").unwrap();

        // Version 1 is 21 modules wide
        assert_eq!(img.width(), (21 + 8) * 2);
        assert_eq!(img.width(), img.height());

        // Quiet zone is white, finder pattern corner is dark
        assert_eq!(img.get_pixel(0, 0).0, [255]);
        assert_eq!(img.get_pixel(8, 8).0, [0]);
    }

    #[test]
    fn test_version_grows_with_payload() {
        let encoder = QrEncoder::new(QrCodeOptions::new().module_pixels(1).quiet_zone(0));
        let small = encoder.render_bitmap("A").unwrap();
        let large = encoder.render_bitmap(&"X".repeat(200)).unwrap();
        assert!(large.width() > small.width());
    }

    #[test]
    fn test_payload_too_long() {
        // Level L tops out at 2953 bytes
        let result = QrEncoder::default().encode(&"x".repeat(3000));
        match result {
            Err(Error::Encoding { code, .. }) => assert_eq!(code.len(), 3000),
            other => panic!("expected encoding error, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_produces_gray_xobject() {
        let image = QrEncoder::default().encode("HELLO").unwrap();
        assert_eq!(image.width, (21 + 8) * 10);
        assert_eq!(image.color_space, crate::writer::ColorSpace::DeviceGray);
    }

    #[test]
    fn test_module_pixels_minimum() {
        assert_eq!(QrCodeOptions::new().module_pixels(0).module_pixels, 1);
    }
}
