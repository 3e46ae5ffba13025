//! Regular polygon construction.

use std::f64::consts::TAU;

use crate::geometry::{Point, Polygon};

/// Vertices of a regular polygon with `edges` corners around `center`.
///
/// The first vertex sits on the positive x-axis and the rest follow at
/// `TAU / edges` steps. The angle is computed from the integer index so
/// float drift can never add or drop a vertex.
///
/// Fewer than 3 edges yields a degenerate outline (0 edges yields none).
pub fn regular_polygon(center: Point, radius: f64, edges: usize) -> Polygon {
    if edges == 0 {
        return Polygon::default();
    }

    let step = TAU / edges as f64;
    let vertices = (0..edges)
        .map(|i| {
            let angle = step * i as f64;
            Point::new(center.x + angle.cos() * radius, center.y + angle.sin() * radius)
        })
        .collect();

    Polygon::new(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_vertex_count() {
        let center = Point::new(0.0, 0.0);
        for edges in 3..64 {
            assert_eq!(regular_polygon(center, 10.0, edges).len(), edges);
        }
    }

    #[test]
    fn vertices_on_circle() {
        let center = Point::new(-40.0, 25.5);
        let poly = regular_polygon(center, 150.0, 12);

        for v in &poly.vertices {
            assert!((v.distance(center) - 150.0).abs() < 1e-9);
        }
    }

    #[test]
    fn starts_on_positive_x_axis() {
        let poly = regular_polygon(Point::new(5.0, 5.0), 2.0, 6);
        let first = poly.vertices[0];
        assert!((first.x - 7.0).abs() < 1e-12);
        assert!((first.y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn counter_clockwise_in_y_up_space() {
        let poly = regular_polygon(Point::new(0.0, 0.0), 1.0, 4);
        assert!(poly.signed_area() > 0.0);
    }

    #[test]
    fn zero_edges_is_empty() {
        assert!(regular_polygon(Point::new(0.0, 0.0), 1.0, 0).is_empty());
    }
}
