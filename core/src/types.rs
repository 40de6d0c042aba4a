use ndarray::Array2;

/// Single coordinate axis used for board columns, rows, and positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(column, row)`.
pub type Coord2 = (Coord, Coord);

/// Boards are stored row-major, so `(column, row)` maps to `[row, column]`.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        let (rows, columns) = self.dim();
        // dimensions always come from a `Coord2`, so they fit back into one
        let bounds = (columns as Coord, rows as Coord);
        NeighborIter::new(coords, bounds)
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.into())?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.into())?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Moore neighbourhood of a cell, clipped at the board edges.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
