use log::trace;

use crate::canvas::Canvas;
use crate::color::Color;

// The encoder parks the first two columns at the end of each row and leaves
// one of these blue markers as the final pixel of the first row.
const SHIFT_MARKER: Color = Color::new(0, 0, 144);
const SHIFT_MARKER_ALT: Color = Color::new(0, 0, 208);

/// Detects the two-column encoding artifact and repairs the canvas in
/// place. Canvases without the marker pixel are left untouched.
pub fn unshift_columns(canvas: &mut Canvas) {
    if canvas.width() < 2 {
        return;
    }

    let last_pixel = match canvas.rows().first().and_then(|row| row.last()) {
        Some(pixel) => *pixel,
        None => return,
    };

    if last_pixel != SHIFT_MARKER && last_pixel != SHIFT_MARKER_ALT {
        return;
    }

    trace!("unshift: marker {:?} found, repairing", last_pixel);

    // Move the final two columns back to the start of every row.
    for row in canvas.rows_mut() {
        row.rotate_right(2);
    }

    // The first two columns are also shifted down by one row; pull each
    // pair up from the row below. The bottom two rows keep their values.
    let height = canvas.height();
    let rows = canvas.rows_mut();

    for i in 0..height {
        if i + 2 < height {
            let (first, second) = (rows[i + 1][0], rows[i + 1][1]);
            rows[i][0] = first;
            rows[i][1] = second;
        }
    }
}
