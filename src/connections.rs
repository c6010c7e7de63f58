// Finding pairs of particles close enough to be joined by a line.
//
// Checking every pair is O(n^2), which is fine for the few dozen particles a
// page background uses. Past a few hundred particles a bucket grid keyed on
// `max_distance`-sized cells only compares neighbours.

use std::collections::HashMap;

/// Every `(i, j)` with `i < j` whose points are strictly closer than
/// `max_distance`, in lexicographic order.
pub fn brute_force_pairs(points: &[[f64; 2]], max_distance: f64) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..points.len() {
        for j in i + 1..points.len() {
            if distance(points[i], points[j]) < max_distance {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Same result as [`brute_force_pairs`], found through a [`BucketGrid`].
pub fn grid_pairs(points: &[[f64; 2]], max_distance: f64) -> Vec<(usize, usize)> {
    if max_distance <= 0.0 {
        return Vec::new();
    }
    let mut grid = BucketGrid::new(max_distance);
    for (i, point) in points.iter().enumerate() {
        grid.insert(*point, i);
    }

    let mut pairs = Vec::new();
    for (i, point) in points.iter().enumerate() {
        for j in grid.neighbors(*point) {
            if j > i && distance(*point, points[j]) < max_distance {
                pairs.push((i, j));
            }
        }
    }
    pairs.sort_unstable();
    pairs
}

pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

pub struct BucketGrid {
    pub cell_size: f64,
    buckets: HashMap<(i64, i64), Vec<usize>>,
}

impl BucketGrid {
    pub fn new(cell_size: f64) -> Self {
        BucketGrid {
            cell_size,
            buckets: HashMap::new(),
        }
    }

    pub fn insert(&mut self, point: [f64; 2], index: usize) {
        let cell = self.cell(point);
        self.buckets.entry(cell).or_insert_with(Vec::new).push(index);
    }

    // Everything in the 3x3 block of cells around `point`. With cells as wide
    // as the search distance, that covers every point within reach.
    //
    // Cell keys saturate for tiny cells or huge coordinates. Offsets past
    // the end of the i64 range are skipped so no cell is visited twice.
    pub fn neighbors(&self, point: [f64; 2]) -> Vec<usize> {
        let (cx, cy) = self.cell(point);
        let mut found = Vec::new();
        for x in -1..=1i64 {
            let nx = match cx.checked_add(x) {
                Some(nx) => nx,
                None => continue,
            };
            for y in -1..=1i64 {
                let ny = match cy.checked_add(y) {
                    Some(ny) => ny,
                    None => continue,
                };
                if let Some(indices) = self.buckets.get(&(nx, ny)) {
                    found.extend(indices.iter().copied());
                }
            }
        }
        found
    }

    fn cell(&self, point: [f64; 2]) -> (i64, i64) {
        (
            (point[0] / self.cell_size).floor() as i64,
            (point[1] / self.cell_size).floor() as i64,
        )
    }
}
