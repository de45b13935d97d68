use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PointKey – the coordinate pair identifying a record
// ---------------------------------------------------------------------------

/// Coordinate-pair key of a record.
/// Stored in a `BTreeMap`, so `PointKey` must be `Ord`; floats are compared
/// with IEEE total ordering (x first, then y).
#[derive(Debug, Clone, Copy)]
pub struct PointKey {
    pub x: f64,
    pub y: f64,
}

impl PointKey {
    pub fn new(x: f64, y: f64) -> Self {
        PointKey { x, y }
    }
}

// -- Manual Eq/Ord so we can key a BTreeMap on two floats --

impl PartialEq for PointKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for PointKey {}

impl PartialOrd for PointKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PointKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl std::hash::Hash for PointKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl fmt::Display for PointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// PointValue – one record as read from / written to disk
// ---------------------------------------------------------------------------

/// A point together with its scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointValue {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl PointValue {
    pub fn key(&self) -> PointKey {
        PointKey::new(self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// QueryRect – the search window
// ---------------------------------------------------------------------------

/// Axis-aligned query rectangle. Bounds are taken as given: an inverted or
/// degenerate rectangle is legal and simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryRect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl QueryRect {
    /// Bounds in command-line order: `x_min x_max y_min y_max`.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        QueryRect {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

impl fmt::Display for QueryRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x in ({}, {}), y in ({}, {})",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

// ---------------------------------------------------------------------------
// PointDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All loaded records, keyed by coordinate pair.
/// Iteration order is ascending `x`, then ascending `y`.
#[derive(Debug, Clone, Default)]
pub struct PointDataset {
    points: BTreeMap<PointKey, f64>,
    overwritten: usize,
}

impl PointDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. A later record with the same coordinates replaces
    /// the earlier value; returns the replaced value if there was one.
    pub fn insert(&mut self, point: PointValue) -> Option<f64> {
        match self.points.entry(point.key()) {
            Entry::Vacant(slot) => {
                slot.insert(point.value);
                None
            }
            Entry::Occupied(mut slot) => {
                self.overwritten += 1;
                Some(slot.insert(point.value))
            }
        }
    }

    /// Value stored for the given coordinates.
    pub fn get(&self, x: f64, y: f64) -> Option<f64> {
        self.points.get(&PointKey::new(x, y)).copied()
    }

    /// Iterate records in key order.
    pub fn iter(&self) -> impl Iterator<Item = PointValue> + '_ {
        self.points.iter().map(|(key, &value)| PointValue {
            x: key.x,
            y: key.y,
            value,
        })
    }

    /// Number of distinct coordinate pairs.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// How many inserts replaced an existing key.
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }
}

impl FromIterator<PointValue> for PointDataset {
    fn from_iter<I: IntoIterator<Item = PointValue>>(iter: I) -> Self {
        let mut dataset = PointDataset::new();
        for point in iter {
            dataset.insert(point);
        }
        dataset
    }
}
