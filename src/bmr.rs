use log::trace;

use crate::canvas::{Canvas, CanvasBuilder};
use crate::color::Color;
use crate::error::DecodeError;
use crate::reader::ByteReader;

/// Decodes a headerless stream of packed 15-bit colors into rows of `width`
/// pixels. BMR files carry no dimensions, so the width comes from the
/// caller.
pub fn decode(bytes: &[u8], width: usize) -> Result<Canvas, DecodeError> {
    let mut reader = ByteReader::new(bytes);
    let mut builder = CanvasBuilder::new(width);

    while reader.remaining() > 0 {
        // A lone trailing byte cannot form a color and fails here.
        let raw = reader.read_u16_le()?;
        builder.push(Color::from_rgb5551(raw));
    }

    let canvas = builder.finish();
    trace!("bmr: decoded {} rows of {} pixels", canvas.height(), width);

    Ok(canvas)
}
