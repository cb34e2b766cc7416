use super::window::{NativeWindow, WindowDimensions};

/// Scale used whenever the geometry cannot produce a meaningful ratio
pub const NEUTRAL_SCALE: f32 = 1.0;

/// Map a logical window size and its backing pixel size to one scale factor.
///
/// Each axis contributes `backing / logical`, falling back to 1.0 when the
/// logical extent is not positive. The two ratios are combined by their
/// midpoint so a transiently non-square scale during a resize still yields a
/// stable value. Never returns a value <= 0.
pub fn native_scale(logical: WindowDimensions, backing: WindowDimensions) -> f32 {
    let x_scale = axis_ratio(logical.width, backing.width);
    let y_scale = axis_ratio(logical.height, backing.height);

    let scale = 0.5 * (x_scale + y_scale);
    if scale <= 0.0 {
        NEUTRAL_SCALE
    } else {
        scale
    }
}

/// Native scale of a live window
pub fn native_scale_of(window: &dyn NativeWindow) -> f32 {
    native_scale(window.logical_size(), window.framebuffer_size())
}

fn axis_ratio(logical: i32, backing: i32) -> f32 {
    if logical > 0 {
        backing as f32 / logical as f32
    } else {
        NEUTRAL_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: i32, height: i32) -> WindowDimensions {
        WindowDimensions::new(width, height)
    }

    #[test]
    fn test_uniform_high_density() {
        assert_eq!(native_scale(dims(800, 600), dims(1600, 1200)), 2.0);
    }

    #[test]
    fn test_identity_scale() {
        assert_eq!(native_scale(dims(1024, 768), dims(1024, 768)), 1.0);
    }

    #[test]
    fn test_zero_height_uses_neutral_axis() {
        // width ratio 2.0, height ratio falls back to 1.0
        assert_eq!(native_scale(dims(800, 0), dims(1600, 300)), 1.5);
    }

    #[test]
    fn test_zero_logical_size_is_neutral() {
        assert_eq!(native_scale(dims(0, 0), dims(1600, 1200)), 1.0);
    }

    #[test]
    fn test_non_square_scale_is_midpoint() {
        // 1.5 and 2.0 average to 1.75
        assert_eq!(native_scale(dims(400, 300), dims(600, 600)), 1.75);
    }

    #[test]
    fn test_midpoint_for_positive_pairs() {
        let cases = [
            ((640, 480), (640, 960)),
            ((1280, 720), (2560, 1080)),
            ((333, 777), (1000, 1000)),
            ((1, 1), (3, 5)),
        ];

        for ((lw, lh), (bw, bh)) in cases {
            let expected = 0.5 * (bw as f32 / lw as f32 + bh as f32 / lh as f32);
            let actual = native_scale(dims(lw, lh), dims(bw, bh));
            assert!((actual - expected).abs() < 1e-6, "{lw}x{lh} -> {bw}x{bh}");
        }
    }

    #[test]
    fn test_never_returns_non_positive() {
        assert_eq!(native_scale(dims(800, 600), dims(0, 0)), 1.0);
        assert_eq!(native_scale(dims(800, 600), dims(-1600, -1200)), 1.0);
        assert_eq!(native_scale(dims(-5, -5), dims(0, 0)), 1.0);
    }
}
