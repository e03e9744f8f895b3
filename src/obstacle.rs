use crate::grid::Position;

/// Static obstacle cells, bounded by a fixed cap. Obstacles never move.
#[derive(Debug, Clone)]
pub struct Obstacles {
    cells: Vec<Position>,
    cap: usize,
}

impl Obstacles {
    #[must_use]
    pub fn with_cap(cap: usize) -> Self {
        Self {
            cells: Vec::with_capacity(cap),
            cap,
        }
    }

    /// Adds an obstacle. Returns `false` when the cap is already reached.
    pub fn push(&mut self, position: Position) -> bool {
        if self.is_full() {
            return false;
        }
        self.cells.push(position);
        true
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.len() >= self.cap
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }
}
