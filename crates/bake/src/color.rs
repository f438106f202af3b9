//! Post-pass color correction for baked face images.
//!
//! The rasterizer blends in linear space; exported pixels go through the
//! standard piecewise sRGB transfer curve and a mild saturation boost so the
//! atlas matches what the painter saw on screen.

use crate::surface::Rgba8Canvas;

/// Linear values below this use the linear segment of the sRGB curve
const SRGB_THRESHOLD: f32 = 0.003_130_8;

/// Piecewise linear-to-sRGB transfer for one channel in [0, 1]
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    if linear <= SRGB_THRESHOLD {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Apply sRGB encoding and saturation boost to every covered pixel.
///
/// Pixels with zero alpha are left untouched so uncovered atlas area stays
/// fully transparent black.
pub fn correct_buffer(canvas: &mut Rgba8Canvas, saturation_boost: f32) {
    for pixel in canvas.pixels_mut() {
        if pixel[3] == 0 {
            continue;
        }

        let mut srgb = [0.0f32; 3];
        for (channel, out) in pixel[..3].iter().zip(srgb.iter_mut()) {
            *out = linear_to_srgb(*channel as f32 / 255.0) * 255.0;
        }

        let avg = (srgb[0] + srgb[1] + srgb[2]) / 3.0;
        for (channel, value) in pixel[..3].iter_mut().zip(srgb) {
            let boosted = avg + (value - avg) * saturation_boost;
            *channel = boosted.round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_pixel(rgba: [u8; 4]) -> Rgba8Canvas {
        let mut canvas = Rgba8Canvas::new(1, 1);
        canvas.set_pixel(0, 0, rgba);
        canvas
    }

    #[test]
    fn test_srgb_endpoints() {
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_srgb_monotonic() {
        let mut last = -1.0;
        for i in 0..=100 {
            let v = linear_to_srgb(i as f32 / 100.0);
            assert!(v > last);
            last = v;
        }
    }

    #[test]
    fn test_srgb_brightens_midtones() {
        // 0.5 linear encodes to roughly 0.735 sRGB
        let mid = linear_to_srgb(0.5);
        assert!(mid > 0.7 && mid < 0.76);
    }

    #[test]
    fn test_transparent_pixels_untouched() {
        let mut canvas = single_pixel([120, 30, 200, 0]);
        correct_buffer(&mut canvas, 1.15);
        assert_eq!(canvas.get_pixel(0, 0), Some([120, 30, 200, 0]));
    }

    #[test]
    fn test_gray_is_stable() {
        // Equal channels have zero chroma: the boost is a no-op and the
        // curve endpoints are fixed
        let mut white = single_pixel([255, 255, 255, 255]);
        correct_buffer(&mut white, 1.15);
        assert_eq!(white.get_pixel(0, 0), Some([255, 255, 255, 255]));

        let mut black = single_pixel([0, 0, 0, 255]);
        correct_buffer(&mut black, 1.15);
        assert_eq!(black.get_pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_pure_red_saturates_to_pure_red() {
        // Boost pushes already-zero channels negative; clamp holds them at 0
        let mut red = single_pixel([255, 0, 0, 255]);
        correct_buffer(&mut red, 1.15);
        assert_eq!(red.get_pixel(0, 0), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_boost_widens_channel_spread() {
        let mut canvas = single_pixel([200, 100, 100, 255]);
        correct_buffer(&mut canvas, 1.15);
        let [r, g, b, _] = canvas.get_pixel(0, 0).unwrap();
        // Red stays dominant and the spread grows relative to a pure sRGB
        // encode of the same pixel
        let mut reference = single_pixel([200, 100, 100, 255]);
        correct_buffer(&mut reference, 1.0);
        let [r0, g0, _, _] = reference.get_pixel(0, 0).unwrap();
        assert!(r > g && g == b);
        assert!(r as i32 - g as i32 > r0 as i32 - g0 as i32);
    }
}
