use image::{GrayImage, Luma};
use qrcode::render::unicode;
use qrcode::{Color, QrCode};
use tracing::debug;

use crate::config::{EcLevelChoice, EncodeConfig};
use crate::consts::{DARK, LIGHT};
use crate::error::{QrLinkError, Result};

/// A rendered QR code together with the text it carries.
#[derive(Clone, Debug)]
pub struct GeneratedCode {
    pub text: String,
    /// Symbol width in modules, quiet zone excluded.
    pub modules: usize,
    pub image: GrayImage,
}

/// Encode `text` as a QR code and rasterize it into a square bitmap.
///
/// The symbol plus its quiet zone is scaled by the largest whole factor that
/// fits in `config.size` and centered. The bitmap is exactly
/// `config.size` wide unless the unscaled symbol is already larger.
pub fn generate(text: &str, config: &EncodeConfig) -> Result<GeneratedCode> {
    if text.is_empty() {
        return Err(QrLinkError::EmptyInput);
    }

    let code = encode_symbol(text, config.ec_level)?;
    let modules = code.width();
    let image = rasterize(&code.to_colors(), modules, config.size, config.quiet_zone)?;

    debug!(
        modules,
        size = image.width(),
        ec = %config.ec_level,
        "generated QR code"
    );

    Ok(GeneratedCode {
        text: text.to_string(),
        modules,
        image,
    })
}

/// Render `text` with half-block characters for a terminal.
pub fn render_terminal(text: &str, ec_level: EcLevelChoice) -> Result<String> {
    if text.is_empty() {
        return Err(QrLinkError::EmptyInput);
    }
    let code = encode_symbol(text, ec_level)?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .build())
}

fn encode_symbol(text: &str, ec_level: EcLevelChoice) -> Result<QrCode> {
    QrCode::with_error_correction_level(text.as_bytes(), ec_level.to_qrcode())
        .map_err(|e| QrLinkError::Encode(e.to_string()))
}

fn rasterize(colors: &[Color], modules: usize, size: u32, quiet_zone: u32) -> Result<GrayImage> {
    let modules = modules as u32;
    let padded = quiet_zone
        .checked_mul(2)
        .and_then(|zone| zone.checked_add(modules))
        .ok_or_else(|| {
            QrLinkError::Encode(format!("quiet zone of {quiet_zone} modules is too large"))
        })?;
    let output = size.max(padded);
    let scale = (output / padded).max(1);
    let offset = (output - modules * scale) / 2;

    let mut img = GrayImage::from_pixel(output, output, Luma([LIGHT]));

    for (i, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let mx = i as u32 % modules;
        let my = i as u32 / modules;
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(
                    offset + mx * scale + dx,
                    offset + my * scale + dy,
                    Luma([DARK]),
                );
            }
        }
    }

    Ok(img)
}
