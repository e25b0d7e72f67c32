//! Drawing detections onto an output image.
//!
//! Available when the `image-io` feature is enabled. Outlines use the same
//! one-degree parametric sweep as the voting kernel; the detection count is
//! stamped in the top-left corner with a small built-in digit font so no
//! font dependency is needed.

use crate::detect::Circle;

const OUTLINE: image::Rgb<u8> = image::Rgb([255, 0, 0]);

// 3x5 digit glyphs, one bit per pixel, row-major from the top.
const DIGITS: [u16; 10] = [
    0b111_101_101_101_111, // 0
    0b010_110_010_010_111, // 1
    0b111_001_111_100_111, // 2
    0b111_001_111_001_111, // 3
    0b101_101_111_001_001, // 4
    0b111_100_111_001_111, // 5
    0b111_100_111_101_111, // 6
    0b111_001_001_001_001, // 7
    0b111_101_111_101_111, // 8
    0b111_101_111_001_111, // 9
];

/// Draws every circle outline plus the detection count onto a copy of `base`.
pub fn render_detections(base: &image::RgbImage, circles: &[Circle]) -> image::RgbImage {
    let mut out = base.clone();
    for circle in circles {
        draw_outline(&mut out, circle);
    }
    draw_count(&mut out, circles.len());
    out
}

fn draw_outline(img: &mut image::RgbImage, circle: &Circle) {
    let (cx, cy, radius) = (circle.x as f64, circle.y as f64, circle.radius as f64);
    for t in 0..=360 {
        let angle = (t as f64 * std::f64::consts::PI) / 180.0;
        let px = (cx + radius * angle.cos()) as i64;
        let py = (cy + radius * angle.sin()) as i64;
        put_pixel(img, px, py);
    }
}

fn draw_count(img: &mut image::RgbImage, count: usize) {
    let text = count.to_string();
    let scale = 2i64;
    let mut x0 = 2i64;
    for ch in text.chars() {
        let glyph = DIGITS[ch.to_digit(10).unwrap_or(0) as usize];
        for row in 0..5i64 {
            for col in 0..3i64 {
                let bit = 14 - (row * 3 + col);
                if glyph >> bit & 1 == 1 {
                    for dy in 0..scale {
                        for dx in 0..scale {
                            put_pixel(img, x0 + col * scale + dx, 2 + row * scale + dy);
                        }
                    }
                }
            }
        }
        x0 += 4 * scale;
    }
}

fn put_pixel(img: &mut image::RgbImage, x: i64, y: i64) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, OUTLINE);
    }
}
