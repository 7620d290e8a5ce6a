//! The final orientation stage: lossless flips and turns
//!
//! No resampling, no interpolation; every output pixel is some input pixel.
//! Mirroring and a 180 turn together collapse to a vertical flip, which is
//! what the combined variant uses.

use scrawl_core::{Canvas, OrientationKind};

/// Apply the chosen orientation, consuming the canvas
pub fn apply(canvas: Canvas, orientation: OrientationKind) -> Canvas {
    match orientation {
        OrientationKind::None => canvas,
        OrientationKind::FlipH => flip_h(canvas),
        OrientationKind::Rotate180 => rotate_180(canvas),
        // flip then turn: x mirrors twice, so only y mirrors
        OrientationKind::FlipHRotate180 => flip_v(canvas),
    }
}

/// Mirror left-to-right
pub fn flip_h(mut canvas: Canvas) -> Canvas {
    let (w, h) = (canvas.width(), canvas.height());
    for y in 0..h {
        for x in 0..w / 2 {
            let a = canvas.get(x, y);
            let b = canvas.get(w - 1 - x, y);
            canvas.put(x, y, b);
            canvas.put(w - 1 - x, y, a);
        }
    }
    canvas
}

/// Mirror top-to-bottom
pub fn flip_v(mut canvas: Canvas) -> Canvas {
    let (w, h) = (canvas.width(), canvas.height());
    for y in 0..h / 2 {
        for x in 0..w {
            let a = canvas.get(x, y);
            let b = canvas.get(x, h - 1 - y);
            canvas.put(x, y, b);
            canvas.put(x, h - 1 - y, a);
        }
    }
    canvas
}

/// Turn upside down
pub fn rotate_180(mut canvas: Canvas) -> Canvas {
    let len = canvas.data().len() / 4;
    for i in 0..len / 2 {
        let j = len - 1 - i;
        for c in 0..4 {
            canvas.data_mut().swap(i * 4 + c, j * 4 + c);
        }
    }
    canvas
}
