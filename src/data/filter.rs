use super::model::{PointDataset, PointValue, QueryRect};

// ---------------------------------------------------------------------------
// Range predicate
// ---------------------------------------------------------------------------

impl QueryRect {
    /// Strict interior test: points on any edge are outside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x > self.x_min && x < self.x_max && y > self.y_min && y < self.y_max
    }
}

/// Whether `point` lies strictly inside `rect`.
pub fn matches(point: &PointValue, rect: &QueryRect) -> bool {
    rect.contains(point.x, point.y)
}

/// Full scan: every record strictly inside `rect`, in dataset order.
pub fn matching_points<'a>(
    dataset: &'a PointDataset,
    rect: &'a QueryRect,
) -> impl Iterator<Item = PointValue> + 'a {
    dataset.iter().filter(move |point| matches(point, rect))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn pv(x: f64, y: f64, value: f64) -> PointValue {
        PointValue { x, y, value }
    }

    #[test]
    fn boundary_points_are_excluded() {
        let rect = QueryRect::new(1.0, 11.0, 1.0, 11.0);
        // Each point sits on exactly one edge with the other coordinate inside.
        for (x, y) in [(1.0, 5.0), (11.0, 5.0), (5.0, 1.0), (5.0, 11.0)] {
            assert!(!matches(&pv(x, y, 0.0), &rect), "({x}, {y}) is on an edge");
        }
        // Corners too.
        for (x, y) in [(1.0, 1.0), (1.0, 11.0), (11.0, 1.0), (11.0, 11.0)] {
            assert!(!rect.contains(x, y), "({x}, {y}) is a corner");
        }
    }

    #[test]
    fn interior_points_are_included() {
        let rect = QueryRect::new(1.0, 11.0, 1.0, 11.0);
        assert!(rect.contains(5.0, 5.0));
        assert!(rect.contains(10.0, 10.0));
        assert!(rect.contains(1.000_001, 10.999_999));
    }

    #[test]
    fn inverted_or_degenerate_rect_matches_nothing() {
        let inverted = QueryRect::new(10.0, 0.0, 0.0, 10.0);
        let flat = QueryRect::new(0.0, 10.0, 5.0, 5.0);
        for (x, y) in [(5.0, 5.0), (0.0, 0.0), (10.0, 10.0), (2.5, 7.5)] {
            assert!(!inverted.contains(x, y));
            assert!(!flat.contains(x, y));
        }
    }

    #[test]
    fn nan_never_matches() {
        let rect = QueryRect::new(f64::NEG_INFINITY, f64::INFINITY, -1.0, 1.0);
        assert!(!rect.contains(f64::NAN, 0.0));
        assert!(!rect.contains(0.0, f64::NAN));
        assert!(rect.contains(1.0e300, 0.0));
    }

    #[test]
    fn scan_over_worked_example() {
        let ds: PointDataset = [pv(0.0, 0.0, 5.0), pv(5.0, 5.0, 15.0), pv(10.0, 10.0, 25.0)]
            .into_iter()
            .collect();
        let rect = QueryRect::new(1.0, 11.0, 1.0, 11.0);

        let hits: Vec<PointValue> = matching_points(&ds, &rect).collect();
        let expected: Vec<PointValue> = ds.iter().filter(|p| rect.contains(p.x, p.y)).collect();
        assert_eq!(hits, expected);
        assert_eq!(hits, vec![pv(5.0, 5.0, 15.0), pv(10.0, 10.0, 25.0)]);
    }

    #[test]
    fn scan_agrees_with_predicate_on_random_cloud() {
        let mut rng = StdRng::seed_from_u64(7);
        // Integer-valued coordinates so plenty of points land on the edges.
        let ds: PointDataset = (0..2_000)
            .map(|_| {
                pv(
                    rng.random_range(-20..=20) as f64,
                    rng.random_range(-20..=20) as f64,
                    rng.random_range(0.0..100.0),
                )
            })
            .collect();

        for _ in 0..50 {
            let a = rng.random_range(-25..=25) as f64;
            let b = rng.random_range(-25..=25) as f64;
            let c = rng.random_range(-25..=25) as f64;
            let d = rng.random_range(-25..=25) as f64;
            let rect = QueryRect::new(a, b, c, d);

            let hits: Vec<PointValue> = matching_points(&ds, &rect).collect();
            let expected: Vec<PointValue> = ds
                .iter()
                .filter(|p| p.x > a && p.x < b && p.y > c && p.y < d)
                .collect();
            assert_eq!(hits, expected, "rect {rect}");
            assert!(hits
                .iter()
                .all(|p| p.x != a && p.x != b && p.y != c && p.y != d));
        }
    }
}
