//! Pure calculation functions for crop geometry.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;
use super::params::{CropRect, FocusPoint, PreferredSize};

/// Plan the crop rectangle that keeps `focus` anchored for a `preferred` output.
///
/// The crop has the aspect ratio of `preferred` and spans one full source
/// dimension: the full width for landscape targets, the full height otherwise
/// (square targets included). If that anchor would make the other side larger
/// than the source, the anchor flips so the crop always fits.
///
/// The focus point keeps its *relative* position: its coordinates are scaled
/// by crop/source size and the window is shifted by the difference. Offsets are
/// clamped to `[0, source - crop]` so the window never leaves the source.
///
/// Source and preferred dimensions must be non-zero.
///
/// # Examples
/// ```
/// # use focal_crop::imaging::{Dimensions, FocusPoint, PreferredSize, plan_focus_crop};
/// let rect = plan_focus_crop(
///     Dimensions { width: 3000, height: 1400 },
///     FocusPoint::new(1000, 1100),
///     PreferredSize::new(1900, 200),
/// );
/// assert_eq!((rect.width, rect.height, rect.x, rect.y), (3000, 316, 0, 852));
/// ```
pub fn plan_focus_crop(
    source: Dimensions,
    focus: FocusPoint,
    preferred: PreferredSize,
) -> CropRect {
    let (width, height) = crop_size(source, preferred);

    let scaled_x = scale(focus.x, width, source.width);
    let scaled_y = scale(focus.y, height, source.height);

    CropRect {
        width,
        height,
        x: focus.x.saturating_sub(scaled_x).min(source.width - width),
        y: focus.y.saturating_sub(scaled_y).min(source.height - height),
    }
}

/// Largest `(width, height)` with the preferred aspect that fits in `source`.
fn crop_size(source: Dimensions, preferred: PreferredSize) -> (u32, u32) {
    let aspect = preferred.aspect();
    let full_width = || {
        let h = (source.width as f64 / aspect).round() as u32;
        (source.width, h)
    };
    let full_height = || {
        let w = (source.height as f64 * aspect).round() as u32;
        (w, source.height)
    };

    let (w, h) = if preferred.width > preferred.height {
        match full_width() {
            (_, h) if h > source.height => full_height(),
            size => size,
        }
    } else {
        match full_height() {
            (w, _) if w > source.width => full_width(),
            size => size,
        }
    };

    (w.clamp(1, source.width), h.clamp(1, source.height))
}

/// `round(value * num / den)` in floating point, as the focus scaling needs.
fn scale(value: u32, num: u32, den: u32) -> u32 {
    (value as f64 * num as f64 / den as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(source: (u32, u32), focus: (u32, u32), preferred: (u32, u32)) -> CropRect {
        plan_focus_crop(
            Dimensions {
                width: source.0,
                height: source.1,
            },
            FocusPoint::new(focus.0, focus.1),
            PreferredSize::new(preferred.0, preferred.1),
        )
    }

    fn rect(width: u32, height: u32, x: u32, y: u32) -> CropRect {
        CropRect {
            width,
            height,
            x,
            y,
        }
    }

    // =========================================================================
    // Reference scenarios
    // =========================================================================

    #[test]
    fn wide_banner_from_landscape_photo() {
        // k = 9.5 → ch = round(3000 / 9.5) = 316
        // fy' = round(1100 * 316 / 1400) = 248 → oy = 852
        assert_eq!(
            plan((3000, 1400), (1000, 1100), (1900, 200)),
            rect(3000, 316, 0, 852)
        );
    }

    #[test]
    fn two_to_one_from_camera_frame() {
        // ch = 5280 / 2 = 2640, fy' = round(1100 * 2640 / 2970) = 978
        assert_eq!(
            plan((5280, 2970), (2596, 1100), (800, 400)),
            rect(5280, 2640, 0, 122)
        );
    }

    // =========================================================================
    // Anchor selection
    // =========================================================================

    #[test]
    fn square_target_anchors_full_height() {
        // pw == ph takes the full-height branch
        assert_eq!(plan((800, 600), (400, 300), (300, 300)), rect(600, 600, 100, 0));
    }

    #[test]
    fn portrait_target_anchors_full_height() {
        // cw = round(1000 * 0.8) = 800, fx' = round(900 * 800 / 1600) = 450
        assert_eq!(
            plan((1600, 1000), (900, 500), (400, 500)),
            rect(800, 1000, 450, 0)
        );
    }

    #[test]
    fn landscape_target_flips_when_height_would_overflow() {
        // Full width would need ch = 2500 > 1000, so anchor on height instead
        let r = plan((3000, 1000), (1500, 500), (1200, 1000));
        assert_eq!((r.width, r.height), (1200, 1000));
        assert_eq!(r.y, 0);
        // fx' = round(1500 * 1200 / 3000) = 600 → ox = 900
        assert_eq!(r.x, 900);
    }

    #[test]
    fn square_target_on_portrait_source_flips_to_full_width() {
        let r = plan((600, 800), (300, 400), (200, 200));
        assert_eq!((r.width, r.height), (600, 600));
        // fy' = round(400 * 600 / 800) = 300 → oy = 100
        assert_eq!((r.x, r.y), (0, 100));
    }

    #[test]
    fn same_aspect_keeps_whole_image() {
        assert_eq!(plan((800, 600), (123, 456), (400, 300)), rect(800, 600, 0, 0));
    }

    // =========================================================================
    // Focus placement
    // =========================================================================

    #[test]
    fn focus_at_origin_keeps_top_left() {
        assert_eq!(plan((1000, 1000), (0, 0), (200, 100)), rect(1000, 500, 0, 0));
    }

    #[test]
    fn focus_at_far_corner_keeps_bottom_right() {
        // fy' = 500 → oy = 500, exactly source - crop
        assert_eq!(
            plan((1000, 1000), (1000, 1000), (200, 100)),
            rect(1000, 500, 0, 500)
        );
    }

    #[test]
    fn focus_keeps_relative_position() {
        // Focus at 75% height stays at 75% of the crop height
        let r = plan((1000, 1000), (500, 750), (200, 100));
        assert_eq!(r.height, 500);
        assert_eq!(750 - r.y, 375);
    }

    #[test]
    fn extreme_aspect_never_collapses_to_zero() {
        let r = plan((10, 10), (5, 5), (10_000, 1));
        assert_eq!((r.width, r.height), (10, 1));
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    #[test]
    fn planner_is_pure() {
        let a = plan((4000, 3000), (1234, 2345), (640, 480));
        let b = plan((4000, 3000), (1234, 2345), (640, 480));
        assert_eq!(a, b);
    }

    #[test]
    fn crop_fits_source_and_matches_aspect() {
        let sources = [(3000, 1400), (5280, 2970), (600, 800), (1000, 1000), (37, 911)];
        let targets = [(1900, 200), (800, 400), (300, 300), (400, 500), (16, 9), (9, 16)];

        for &(sw, sh) in &sources {
            for &(pw, ph) in &targets {
                for &(fx, fy) in &[(0, 0), (sw / 3, sh / 2), (sw, sh), (sw, 0)] {
                    let r = plan((sw, sh), (fx, fy), (pw, ph));
                    let ctx = format!("source {sw}x{sh}, focus {fx},{fy}, target {pw}x{ph}: {r}");

                    assert!(r.x + r.width <= sw, "crop exceeds width ({ctx})");
                    assert!(r.y + r.height <= sh, "crop exceeds height ({ctx})");

                    let k = pw as f64 / ph as f64;
                    let w_err = (r.width as f64 - r.height as f64 * k).abs();
                    let h_err = (r.height as f64 - r.width as f64 / k).abs();
                    assert!(w_err <= 1.0 || h_err <= 1.0, "aspect mismatch ({ctx})");
                }
            }
        }
    }
}
