//! Deterministic grid placement
//!
//! Nodes are placed column by column: each node sits one row below the
//! previous one until the column holds `column_capacity` nodes, then
//! placement continues at the top of the next column.

use serde::Deserialize;

use schemascope_core::graph::Position;

/// Spacing and capacity of the placement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Vertical distance between consecutive nodes in a column
    pub row_spacing: i32,

    /// Horizontal distance between columns
    pub column_spacing: i32,

    /// Nodes per column; `0` is treated as `1`
    pub column_capacity: usize,
}

impl GridConfig {
    pub fn new(row_spacing: i32, column_spacing: i32, column_capacity: usize) -> Self {
        Self {
            row_spacing,
            column_spacing,
            column_capacity,
        }
    }

    fn capacity(&self) -> usize {
        self.column_capacity.max(1)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(150, 300, 5)
    }
}

/// Hands out grid positions in placement order.
///
/// The placer is local to one projection run, so separate runs never share
/// a cursor.
#[derive(Debug, Clone)]
pub struct GridPlacer {
    config: GridConfig,
    placed: usize,
    column: i32,
    x: i32,
    y: i32,
}

impl GridPlacer {
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            placed: 0,
            column: 0,
            x: 0,
            y: 0,
        }
    }

    /// Position for the next node, advancing the cursor.
    pub fn place(&mut self) -> Position {
        let position = Position::new(self.x, self.y);

        self.placed += 1;
        self.y = self.y.saturating_add(self.config.row_spacing);
        if self.placed % self.config.capacity() == 0 {
            self.column = self.column.saturating_add(1);
            self.x = self.column.saturating_mul(self.config.column_spacing);
            self.y = 0;
        }

        position
    }

    /// Number of positions handed out so far.
    pub fn placed(&self) -> usize {
        self.placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(config: GridConfig, count: usize) -> Vec<(i32, i32)> {
        let mut placer = GridPlacer::new(config);
        (0..count)
            .map(|_| {
                let position = placer.place();
                (position.x, position.y)
            })
            .collect()
    }

    #[test]
    fn test_default_grid() {
        assert_eq!(
            positions(GridConfig::default(), 7),
            [(0, 0), (0, 150), (0, 300), (0, 450), (0, 600), (300, 0), (300, 150)]
        );
    }

    #[test]
    fn test_custom_grid() {
        assert_eq!(
            positions(GridConfig::new(10, 100, 2), 5),
            [(0, 0), (0, 10), (100, 0), (100, 10), (200, 0)]
        );
    }

    #[test]
    fn test_zero_capacity_places_one_node_per_column() {
        assert_eq!(
            positions(GridConfig::new(150, 300, 0), 3),
            [(0, 0), (300, 0), (600, 0)]
        );
    }

    #[test]
    fn test_placed_count() {
        let mut placer = GridPlacer::new(GridConfig::default());
        placer.place();
        placer.place();
        assert_eq!(placer.placed(), 2);
    }
}
