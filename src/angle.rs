//! Canonical-angle math for the progress ring.
//!
//! The ring's `angle` is logically unbounded; everything that renders or
//! reports progress first reduces it to one turn.

/// Reduces an angle in degrees to the canonical half-open range `[0, 360)`.
///
/// This is true modulo with range 360: exact multiples of 360 map to 0,
/// not 360, and negative angles wrap up into range.
pub fn normalize(degrees: f64) -> f64 {
    let mut r = degrees % 360.0;
    if r < 0.0 {
        r += 360.0;
    }
    // Guard against float residue pushing a tiny negative back up to 360.
    if r >= 360.0 {
        r = 0.0;
    }
    r
}

/// The sweep of the progress arc in degrees, in the closed range `[0, 360]`.
///
/// Same as [`normalize`] except that a positive angle which is an exact
/// multiple of 360 counts as a full turn rather than an empty one. A ring
/// set to progress 1.0 therefore draws a complete circle and reads back as
/// 1.0 instead of wrapping to 0.
pub fn sweep(degrees: f64) -> f64 {
    let n = normalize(degrees);
    if n == 0.0 && degrees > 0.0 {
        360.0
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range() {
        for x in [
            -1234.5, -720.0, -360.0, -359.9, -0.1, 0.0, 0.1, 90.0, 359.9, 360.0, 361.0, 720.0,
            12345.6,
        ] {
            let n = normalize(x);
            assert!((0.0..360.0).contains(&n), "normalize({x}) = {n}");
        }
    }

    #[test]
    fn test_normalize_idempotent() {
        for x in [-1000.0, -360.0, -1.0, 0.0, 45.0, 360.0, 361.0, 9999.0] {
            let once = normalize(x);
            assert_eq!(normalize(once), once);
        }
    }

    #[test]
    fn test_normalize_multiples_of_360_map_to_zero() {
        assert_eq!(normalize(360.0), 0.0);
        assert_eq!(normalize(720.0), 0.0);
        assert_eq!(normalize(-360.0), 0.0);
        assert_eq!(normalize(0.0), 0.0);
    }

    #[test]
    fn test_normalize_wraps_negatives_up() {
        assert!((normalize(-90.0) - 270.0).abs() < 1e-9);
        assert!((normalize(-450.0) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_full_turns() {
        assert_eq!(sweep(360.0), 360.0);
        assert_eq!(sweep(720.0), 360.0);
        assert_eq!(sweep(0.0), 0.0);
        // Negative full turns are an empty sweep, not a full one.
        assert_eq!(sweep(-360.0), 0.0);
    }

    #[test]
    fn test_sweep_matches_normalize_elsewhere() {
        for x in [-90.0, 0.5, 90.0, 180.0, 359.9, 361.0] {
            assert_eq!(sweep(x), normalize(x));
        }
    }
}
