//! Color interpolation and gradient-stop placement for the progress arc.
//!
//! All math here operates on RGBA components. Grayscale inputs must be
//! widened through [`from_luma`] before they reach the lerp or gradient
//! paths; colors that are already RGBA pass through unchanged.

use peniko::Color;

pub(crate) fn lerp(t: f64, min: f64, max: f64) -> f64 {
    (max - min) * t + min
}

pub(crate) fn inverse_lerp(value: f64, min: f64, max: f64) -> f64 {
    (value - min) / (max - min)
}

/// Builds an RGBA color from a single luminance channel plus alpha by
/// replicating the luminance into R, G and B.
///
/// # Examples
///
/// ```rust
/// use circular_progress::color::from_luma;
///
/// let gray = from_luma(0.5, 1.0);
/// assert_eq!(gray.components, [0.5, 0.5, 0.5, 1.0]);
/// ```
pub fn from_luma(white: f32, alpha: f32) -> Color {
    Color::new([white, white, white, alpha])
}

/// Interpolates between two colors componentwise in RGBA space.
///
/// `t` is clamped to `[0, 1]`, so `color_lerp(0.0, a, b) == a` and
/// `color_lerp(1.0, a, b) == b`.
pub fn color_lerp(t: f64, min_color: Color, max_color: Color) -> Color {
    let t = t.clamp(0.0, 1.0);
    let a = min_color.components;
    let b = max_color.components;
    Color::new([
        lerp(t, a[0] as f64, b[0] as f64) as f32,
        lerp(t, a[1] as f64, b[1] as f64) as f32,
        lerp(t, a[2] as f64, b[2] as f64) as f32,
        lerp(t, a[3] as f64, b[3] as f64) as f32,
    ])
}

/// Resolves the single flat fill color for lerp-color mode.
///
/// `[0, 1]` is partitioned into `colors.len() - 1` equal segments; the
/// segment containing `t` (the last segment inclusive at its right edge)
/// interpolates between its two bounding colors, with `t` rescaled to the
/// segment. The whole arc is filled with this one blended color per frame.
///
/// Requires at least two colors; shorter palettes are routed to flat fill
/// by the coloring policy before this is ever called.
pub fn lerp_palette(t: f64, colors: &[Color]) -> Color {
    debug_assert!(colors.len() >= 2);
    let steps = colors.len() - 1;
    let step = 1.0 / steps as f64;
    // Smallest i with t <= i * step, pinned to the last segment at the top.
    let i = ((t / step).ceil() as usize).clamp(1, steps);
    let local = inverse_lerp(t, (i - 1) as f64 * step, i as f64 * step);
    color_lerp(local, colors[i - 1], colors[i])
}

/// Gradient stop locations for `color_count` stops across a widget of
/// `gradient_width` pixels.
///
/// Stops are placed symmetrically so the gradient begins at the arc's inner
/// edge and ends at its outer edge along the widget's horizontal diameter,
/// then normalized to `[0, 1]` fractions of the width. Fewer than two
/// colors or a degenerate width yields no stops.
pub fn gradient_locations(
    color_count: usize,
    gradient_width: f64,
    radius: f64,
    progress_line_width: f64,
) -> Vec<f64> {
    if color_count < 2 || gradient_width <= 0.0 {
        return Vec::new();
    }
    let first = gradient_width / 2.0 - (radius - progress_line_width / 2.0);
    let increment = (gradient_width - 2.0 * first) / (color_count - 1) as f64;
    (0..color_count)
        .map(|i| (first + i as f64 * increment) / gradient_width)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn assert_components(c: Color, expected: [f32; 4]) {
        for (got, want) in c.components.iter().zip(expected.iter()) {
            assert!((got - want).abs() < EPS, "{:?} != {:?}", c.components, expected);
        }
    }

    #[test]
    fn test_from_luma_replicates_channel() {
        assert_components(from_luma(0.25, 0.5), [0.25, 0.25, 0.25, 0.5]);
    }

    #[test]
    fn test_color_lerp_midpoint() {
        let a = Color::new([0.0, 0.0, 0.0, 0.0]);
        let b = Color::new([1.0, 0.5, 0.0, 1.0]);
        assert_components(color_lerp(0.5, a, b), [0.5, 0.25, 0.0, 0.5]);
    }

    #[test]
    fn test_color_lerp_clamps_t() {
        let a = Color::new([0.2, 0.2, 0.2, 1.0]);
        let b = Color::new([0.8, 0.8, 0.8, 1.0]);
        assert_components(color_lerp(-1.0, a, b), a.components);
        assert_components(color_lerp(2.0, a, b), b.components);
    }

    #[test]
    fn test_lerp_palette_two_colors() {
        let a = Color::new([0.0, 0.0, 0.0, 1.0]);
        let b = Color::new([1.0, 1.0, 1.0, 1.0]);
        assert_components(lerp_palette(0.0, &[a, b]), a.components);
        assert_components(lerp_palette(0.5, &[a, b]), [0.5, 0.5, 0.5, 1.0]);
        assert_components(lerp_palette(1.0, &[a, b]), b.components);
    }

    #[test]
    fn test_lerp_palette_hits_interior_color_at_segment_edge() {
        let a = Color::new([1.0, 0.0, 0.0, 1.0]);
        let b = Color::new([0.0, 1.0, 0.0, 1.0]);
        let c = Color::new([0.0, 0.0, 1.0, 1.0]);
        // Two segments; the shared edge resolves to the middle color exactly.
        assert_components(lerp_palette(0.5, &[a, b, c]), b.components);
        // Quarter of the way lands mid-way through the first segment.
        assert_components(lerp_palette(0.25, &[a, b, c]), [0.5, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn test_lerp_palette_last_segment_right_edge_inclusive() {
        let a = Color::new([0.0, 0.0, 0.0, 1.0]);
        let b = Color::new([0.5, 0.5, 0.5, 1.0]);
        let c = Color::new([1.0, 1.0, 1.0, 1.0]);
        assert_components(lerp_palette(1.0, &[a, b, c]), c.components);
    }

    #[test]
    fn test_gradient_locations_strictly_increasing_within_unit_range() {
        let locations = gradient_locations(3, 300.0, 120.0, 24.0);
        assert_eq!(locations.len(), 3);
        for pair in locations.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(locations[0] >= 0.0);
        assert!(*locations.last().unwrap() <= 1.0);
    }

    #[test]
    fn test_gradient_locations_symmetric_about_center() {
        let locations = gradient_locations(3, 300.0, 120.0, 24.0);
        // First and last stops sit the same distance in from either edge.
        assert!((locations[0] + locations[2] - 1.0).abs() < 1e-9);
        assert!((locations[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_gradient_locations_guards_degenerate_input() {
        assert!(gradient_locations(0, 300.0, 120.0, 24.0).is_empty());
        assert!(gradient_locations(1, 300.0, 120.0, 24.0).is_empty());
        assert!(gradient_locations(3, 0.0, 120.0, 24.0).is_empty());
    }
}
