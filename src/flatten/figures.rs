//! Figure flattening and PNG re-encoding.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::ImageFormat;
use std::io::Cursor;

use crate::error::Result;
use crate::model::{FigureRecord, RawFigure, RawImage};

/// Flatten every figure, preserving order.
///
/// Image failures only drop that figure's payload.
pub fn flatten_figures(figures: &[RawFigure]) -> Vec<FigureRecord> {
    figures
        .iter()
        .map(|figure| {
            let record = FigureRecord::new(figure.caption_text());
            let Some(ref payload) = figure.image else {
                return record;
            };
            match encode_png_base64(payload) {
                Ok(encoded) => record.with_base64(encoded),
                Err(e) => {
                    log::warn!("Could not extract figure image: {}", e);
                    record
                }
            }
        })
        .collect()
}

/// Decode an image payload and re-encode it as base64 PNG.
pub fn encode_png_base64(payload: &RawImage) -> Result<String> {
    let bytes = BASE64.decode(payload.base64_data())?;
    let decoded = image::load_from_memory(&bytes)?;

    let mut png = Vec::new();
    decoded.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(BASE64.encode(png))
}
