//! Degradation effects: blurs, relief, and edge detection
//!
//! Exactly one of these runs per distortion pass. All kernels sample with
//! clamp-to-edge, so borders never bleed transparent black into the image.

use scrawl_core::Canvas;

/// Gaussian blur with the given sigma; kernel radius is 3 sigma
pub fn gaussian_blur(src: &Canvas, sigma: f32) -> Canvas {
    let radius = (sigma * 3.0).ceil() as i64;
    let mut kernel = Vec::with_capacity((2 * radius + 1) as usize);
    let denom = 2.0 * sigma * sigma;
    for i in -radius..=radius {
        kernel.push((-(i * i) as f32 / denom).exp());
    }
    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }

    let tmp = convolve_1d(src, &kernel, true);
    convolve_1d(&tmp, &kernel, false)
}

/// Box blur: a uniform kernel sized from the radius
pub fn box_blur(src: &Canvas, radius: f32) -> Canvas {
    let half = radius.round().max(1.0) as usize;
    let len = 2 * half + 1;
    let kernel = vec![1.0 / len as f32; len];

    let tmp = convolve_1d(src, &kernel, true);
    convolve_1d(&tmp, &kernel, false)
}

/// Edge-relief convolution
pub fn emboss(src: &Canvas) -> Canvas {
    const KERNEL: [[f32; 3]; 3] = [[-1.0, -1.0, 0.0], [-1.0, 1.0, 1.0], [0.0, 1.0, 1.0]];
    convolve_3x3(src, &KERNEL)
}

/// Sobel edge detection: gradient magnitude of the two 3x3 kernels
pub fn sobel(src: &Canvas) -> Canvas {
    const GX: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
    const GY: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

    let (w, h) = (src.width(), src.height());
    let mut dst = Canvas::new(w, h);

    for y in 0..h {
        for x in 0..w {
            let mut out = [0u8; 4];
            for c in 0..3 {
                let mut gx = 0.0f32;
                let mut gy = 0.0f32;
                for (ky, row) in GX.iter().enumerate() {
                    for (kx, _) in row.iter().enumerate() {
                        let v = sample(src, x as i64 + kx as i64 - 1, y as i64 + ky as i64 - 1, c);
                        gx += v * GX[ky][kx];
                        gy += v * GY[ky][kx];
                    }
                }
                out[c] = (gx * gx + gy * gy).sqrt().clamp(0.0, 255.0) as u8;
            }
            out[3] = src.get(x, y).a;
            let i = ((y * w + x) * 4) as usize;
            dst.data_mut()[i..i + 4].copy_from_slice(&out);
        }
    }

    dst
}

/// Channel value at a clamped coordinate
#[inline]
fn sample(src: &Canvas, x: i64, y: i64, channel: usize) -> f32 {
    let x = x.clamp(0, src.width() as i64 - 1) as u32;
    let y = y.clamp(0, src.height() as i64 - 1) as u32;
    src.data()[((y * src.width() + x) * 4) as usize + channel] as f32
}

/// One separable pass, horizontal or vertical, all four channels
fn convolve_1d(src: &Canvas, kernel: &[f32], horizontal: bool) -> Canvas {
    let (w, h) = (src.width(), src.height());
    let mut dst = Canvas::new(w, h);
    let radius = (kernel.len() / 2) as i64;

    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for (k, weight) in kernel.iter().enumerate() {
                let offset = k as i64 - radius;
                let (sx, sy) = if horizontal {
                    (x as i64 + offset, y as i64)
                } else {
                    (x as i64, y as i64 + offset)
                };
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += sample(src, sx, sy, c) * weight;
                }
            }
            let i = ((y * w + x) * 4) as usize;
            for (c, a) in acc.iter().enumerate() {
                dst.data_mut()[i + c] = a.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    dst
}

/// Full 3x3 convolution on the color channels, alpha passed through
fn convolve_3x3(src: &Canvas, kernel: &[[f32; 3]; 3]) -> Canvas {
    let (w, h) = (src.width(), src.height());
    let mut dst = Canvas::new(w, h);

    for y in 0..h {
        for x in 0..w {
            let mut out = [0u8; 4];
            for c in 0..3 {
                let mut acc = 0.0f32;
                for (ky, row) in kernel.iter().enumerate() {
                    for (kx, weight) in row.iter().enumerate() {
                        acc += sample(src, x as i64 + kx as i64 - 1, y as i64 + ky as i64 - 1, c)
                            * weight;
                    }
                }
                out[c] = acc.round().clamp(0.0, 255.0) as u8;
            }
            out[3] = src.get(x, y).a;
            let i = ((y * w + x) * 4) as usize;
            dst.data_mut()[i..i + 4].copy_from_slice(&out);
        }
    }

    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrawl_core::Color;

    #[test]
    fn blur_of_flat_image_is_flat() {
        let src = Canvas::filled(8, 8, Color::rgba(90, 90, 90, 255));
        let out = gaussian_blur(&src, 2.0);
        for px in out.data().chunks_exact(4) {
            assert!((px[0] as i32 - 90).abs() <= 1);
        }
    }

    #[test]
    fn blur_softens_a_hard_edge() {
        let mut src = Canvas::filled(16, 4, Color::white());
        for y in 0..4 {
            for x in 0..8 {
                src.put(x, y, Color::black());
            }
        }
        let out = box_blur(&src, 1.8);
        // Right at the boundary the value must now sit between the extremes
        let edge = out.get(8, 2);
        assert!(edge.r > 0 && edge.r < 255, "edge stayed hard: {:?}", edge);
    }

    #[test]
    fn sobel_flat_is_black_and_edges_light_up() {
        let flat = Canvas::filled(8, 8, Color::white());
        let out = sobel(&flat);
        assert_eq!(out.get(4, 4).r, 0);

        let mut edged = Canvas::filled(8, 8, Color::white());
        for y in 0..8 {
            for x in 0..4 {
                edged.put(x, y, Color::black());
            }
        }
        let out = sobel(&edged);
        assert!(out.get(4, 4).r > 200, "edge missing: {:?}", out.get(4, 4));
    }

    #[test]
    fn emboss_keeps_flat_regions_recognizable() {
        // The kernel sums to 1, so constant areas survive
        let src = Canvas::filled(8, 8, Color::rgba(120, 120, 120, 255));
        let out = emboss(&src);
        assert_eq!(out.get(4, 4).r, 120);
    }

    #[test]
    fn effects_preserve_dimensions() {
        let src = Canvas::filled(10, 6, Color::white());
        assert_eq!(gaussian_blur(&src, 2.0).width(), 10);
        assert_eq!(box_blur(&src, 1.8).height(), 6);
        assert_eq!(emboss(&src).width(), 10);
        assert_eq!(sobel(&src).height(), 6);
    }
}
