use log::{trace, warn};

use crate::canvas::{Canvas, CanvasBuilder};
use crate::color::Color;
use crate::error::DecodeError;
use crate::reader::ByteReader;

/// First 8 bytes of every RLE image.
pub const MAGIC: &[u8; 8] = b"_RLE_16_";

const HEADER_LEN: usize = 8;
const QUANTITY_MASK: u16 = 0x7fff;
const REPEAT_FLAG: u8 = 0x80;

/// Decodes the run-length-encoded stream into rows of `max_width` pixels.
///
/// The magic number is the caller's business; this starts right after it.
/// Each run opens with two bytes: a 15-bit quantity and, in the top bit of
/// the second byte, whether one color repeats `quantity` times or `quantity`
/// distinct colors follow.
pub fn decode(bytes: &[u8], max_width: usize) -> Result<Canvas, DecodeError> {
    let mut builder = CanvasBuilder::new(max_width);

    let mut reader = ByteReader::new(bytes);
    reader.seek(HEADER_LEN);

    // The size field counts the header itself; past that it is two bytes
    // per decoded pixel.
    let total_size = reader.read_u32_le()? as usize;
    let decompressed_size = total_size.saturating_sub(HEADER_LEN);
    let total_rows = decompressed_size / 2 / max_width;

    trace!("rle: expecting {} rows of {} pixels", total_rows, max_width);

    // The row bound keeps a malformed stream from producing unbounded
    // output; a fractional row count floors, which can leave a tail of the
    // stream undecoded.
    while reader.remaining() >= 2 && builder.completed_rows() < total_rows {
        let run_offset = reader.position();
        let byte_1 = reader.read_u8()?;
        let byte_2 = reader.read_u8()?;

        let quantity = (u16::from(byte_1) | (u16::from(byte_2) << 8)) & QUANTITY_MASK;

        match byte_2 & REPEAT_FLAG {
            REPEAT_FLAG => {
                let color = Color::from_rgb5551(reader.read_u16_le()?);

                for _ in 0..quantity {
                    builder.push(color);
                }
            }
            0x00 => {
                for _ in 0..quantity {
                    builder.push(Color::from_rgb5551(reader.read_u16_le()?));
                }
            }
            flag => {
                return Err(DecodeError::UnsupportedRunFlag {
                    offset: run_offset,
                    flag,
                })
            }
        }
    }

    if reader.remaining() >= 2 {
        warn!(
            "rle: stopped at {} rows with {} bytes undecoded",
            builder.completed_rows(),
            reader.remaining()
        );
    }

    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Magic, total size counting the 8-byte header, then the run stream.
    fn rle_stream(decoded_pixels: u32, runs: &[u8]) -> Vec<u8> {
        let mut bytes = MAGIC.to_vec();
        bytes.extend((HEADER_LEN as u32 + decoded_pixels * 2).to_le_bytes());
        bytes.extend_from_slice(runs);
        bytes
    }

    #[test]
    fn test_repeat_run_fills_one_row() {
        // quantity 4, repeat flag, one red color.
        let bytes = rle_stream(4, &[0x04, 0x80, 0x1f, 0x00]);
        let canvas = decode(&bytes, 4).unwrap();

        assert_eq!(canvas.height(), 1);
        assert_eq!(canvas.rows()[0], vec![Color::new(248, 0, 0); 4]);
    }

    #[test]
    fn test_literal_run_keeps_color_order() {
        let bytes = rle_stream(
            3,
            &[
                0x03, 0x00, // quantity 3, literal
                0x1f, 0x00, // red
                0xe0, 0x03, // green
                0x00, 0x7c, // blue
            ],
        );
        let canvas = decode(&bytes, 3).unwrap();

        assert_eq!(canvas.height(), 1);
        assert_eq!(
            canvas.rows()[0],
            vec![
                Color::new(248, 0, 0),
                Color::new(0, 248, 0),
                Color::new(0, 0, 248),
            ]
        );
    }

    #[test]
    fn test_runs_span_row_boundaries() {
        // 6 repeated pixels at width 2 close three rows.
        let bytes = rle_stream(6, &[0x06, 0x80, 0x00, 0x7c]);
        let canvas = decode(&bytes, 2).unwrap();

        assert_eq!(canvas.height(), 3);
        assert_eq!(canvas.rows()[2], vec![Color::new(0, 0, 248); 2]);
    }

    #[test]
    fn test_row_bound_stops_decoding() {
        // The size field admits one row; the second run is left undecoded.
        let bytes = rle_stream(
            2,
            &[
                0x02, 0x80, 0x1f, 0x00, // fills the single expected row
                0x02, 0x80, 0xe0, 0x03,
            ],
        );
        let canvas = decode(&bytes, 2).unwrap();

        assert_eq!(canvas.height(), 1);
        assert_eq!(canvas.rows()[0], vec![Color::new(248, 0, 0); 2]);
    }

    #[test]
    fn test_overlong_run_tail_is_dropped() {
        // One expected row of 4; the run pushes 6 pixels, so two land in a
        // row that never closes.
        let bytes = rle_stream(4, &[0x06, 0x80, 0x1f, 0x00]);
        let canvas = decode(&bytes, 4).unwrap();

        assert_eq!(canvas.height(), 1);
    }

    #[test]
    fn test_truncated_color_in_run() {
        let bytes = rle_stream(4, &[0x04, 0x80, 0x1f]);

        assert_eq!(
            decode(&bytes, 4),
            Err(DecodeError::TruncatedInput { offset: 14 })
        );
    }

    #[test]
    fn test_missing_size_field() {
        assert_eq!(
            decode(MAGIC, 4),
            Err(DecodeError::TruncatedInput { offset: 8 })
        );
    }
}
