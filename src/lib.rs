pub mod bmr;
pub mod canvas;
pub mod color;
pub mod error;
pub mod reader;
pub mod rle;
pub mod unshift;

use std::path::Path;

pub use canvas::Canvas;
pub use color::Color;
pub use error::DecodeError;

/// Decodes one image. The extension on `filename` picks the decoder: `.bmr`
/// is raw packed colors, `.rle` must open with the `_RLE_16_` magic number.
/// Neither format stores dimensions, so the row width comes from the caller.
pub fn convert(bytes: &[u8], filename: &str, width: usize) -> Result<Canvas, DecodeError> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    let mut canvas = if extension.eq_ignore_ascii_case("bmr") {
        bmr::decode(bytes, width)?
    } else if extension.eq_ignore_ascii_case("rle") {
        if bytes.len() < rle::MAGIC.len() || bytes[..rle::MAGIC.len()] != *rle::MAGIC {
            return Err(DecodeError::InvalidMagicNumber);
        }

        rle::decode(bytes, width)?
    } else {
        return Err(DecodeError::UnsupportedFormat(extension.to_string()));
    };

    unshift::unshift_columns(&mut canvas);

    Ok(canvas)
}
