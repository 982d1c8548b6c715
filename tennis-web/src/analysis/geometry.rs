//! Joint angle geometry
//!
//! Pure 2D math over landmark positions. Depth (z) is ignored.

use nalgebra::Vector2;

use crate::bridge::Landmark;

fn xy(p: Landmark) -> Vector2<f32> {
    Vector2::new(p.x, p.y)
}

/// Angle ABC in degrees, with B as the vertex
///
/// Uses dot product formula: cos(θ) = (BA · BC) / (|BA| × |BC|)
///
/// Returns 0 if A or C coincides with B.
pub fn angle_at_vertex(a: Landmark, b: Landmark, c: Landmark) -> f32 {
    let ba = xy(a) - xy(b);
    let bc = xy(c) - xy(b);

    let mag_ba = ba.norm();
    let mag_bc = bc.norm();
    if mag_ba == 0.0 || mag_bc == 0.0 {
        return 0.0;
    }

    let cos_angle = (ba.dot(&bc) / (mag_ba * mag_bc)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Deviation of the segment top→bottom from vertical, in degrees
///
/// 0 = perfectly upright, 90 = horizontal (also returned when both points
/// share the same height).
pub fn vertical_deviation(top: Landmark, bottom: Landmark) -> f32 {
    let dx = (top.x - bottom.x).abs();
    let dy = (top.y - bottom.y).abs();
    if dy == 0.0 {
        return 90.0;
    }
    (dx / dy).atan().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Landmark {
        Landmark::new(x, y)
    }

    #[test]
    fn test_straight_line() {
        let angle = angle_at_vertex(p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0));
        assert!((angle - 180.0).abs() < 0.1);
    }

    #[test]
    fn test_right_angle() {
        let angle = angle_at_vertex(p(0.0, 0.0), p(0.5, 0.0), p(0.5, 0.5));
        assert!((angle - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_coincident_points_give_zero() {
        assert_eq!(angle_at_vertex(p(0.3, 0.3), p(0.3, 0.3), p(0.9, 0.1)), 0.0);
        assert_eq!(angle_at_vertex(p(0.9, 0.1), p(0.3, 0.3), p(0.3, 0.3)), 0.0);
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let points = [
            (p(0.1, 0.2), p(0.4, 0.4), p(0.9, 0.3)),
            (p(0.7, 0.1), p(0.2, 0.8), p(0.3, 0.05)),
            (p(0.5, 0.5), p(0.51, 0.49), p(0.2, 0.9)),
        ];
        for (a, b, c) in points {
            let abc = angle_at_vertex(a, b, c);
            let cba = angle_at_vertex(c, b, a);
            assert!((0.0..=180.0).contains(&abc));
            assert!((abc - cba).abs() < 1e-4);
        }
    }

    #[test]
    fn test_depth_is_ignored() {
        let mut a = p(0.0, 0.0);
        a.z = -3.0;
        let angle = angle_at_vertex(a, p(0.5, 0.0), p(0.5, 0.5));
        assert!((angle - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_vertical_deviation_horizontal() {
        assert_eq!(vertical_deviation(p(0.2, 0.4), p(0.6, 0.4)), 90.0);
        assert_eq!(vertical_deviation(p(0.2, 0.4), p(0.2, 0.4)), 90.0);
    }

    #[test]
    fn test_vertical_deviation_upright() {
        assert_eq!(vertical_deviation(p(0.5, 0.2), p(0.5, 0.6)), 0.0);
        let nearly = vertical_deviation(p(0.5, 0.2), p(0.5001, 0.6));
        assert!(nearly < 0.1);
        let lean = vertical_deviation(p(0.5, 0.2), p(0.9, 0.6));
        assert!((lean - 45.0).abs() < 0.01);
    }
}
