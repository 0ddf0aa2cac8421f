//! Uniform grid spatial index
//!
//! Buckets entities into square cells of a fixed side length on the (x, z)
//! plane. The grid is rebuilt from scratch every tick, so insertion is O(1)
//! and there is no incremental update path.

use super::SpatialQuery;
use crate::ecs::Entity;
use std::any::Any;
use std::collections::HashMap;

/// Integer cell coordinates `(x, z)`
pub type CellCoord = (i32, i32);

/// Spatial hash grid keyed by cell coordinates
#[derive(Debug, Clone)]
pub struct UniformGrid {
    cell_size: f32,
    inv_cell_size: f32,
    cells: HashMap<CellCoord, Vec<Entity>>,
    entity_cells: HashMap<Entity, CellCoord>,
}

impl UniformGrid {
    /// Create an empty grid
    ///
    /// Non-finite or non-positive cell sizes fall back to 1.0.
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            log::warn!("Invalid grid cell size {cell_size}, using 1.0");
            1.0
        };

        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
            entity_cells: HashMap::new(),
        }
    }

    /// Side length of a cell
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell containing a horizontal position
    pub fn cell_coord(&self, x: f32, z: f32) -> CellCoord {
        // Float-to-int casts saturate, so far-away positions land in edge cells
        (
            (x * self.inv_cell_size).floor() as i32,
            (z * self.inv_cell_size).floor() as i32,
        )
    }

    /// Cell an entity was inserted into
    pub fn cell_of(&self, entity: Entity) -> Option<CellCoord> {
        self.entity_cells.get(&entity).copied()
    }

    /// Number of non-empty cells
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    fn remove_from_cell(&mut self, entity: Entity, coord: CellCoord) {
        if let Some(bucket) = self.cells.get_mut(&coord) {
            bucket.retain(|&e| e != entity);
            if bucket.is_empty() {
                self.cells.remove(&coord);
            }
        }
    }
}

impl Default for UniformGrid {
    fn default() -> Self {
        Self::new(crate::config::CollisionConfig::default().cell_size)
    }
}

impl SpatialQuery for UniformGrid {
    fn insert(&mut self, entity: Entity, x: f32, z: f32) {
        let coord = self.cell_coord(x, z);
        if let Some(previous) = self.entity_cells.insert(entity, coord) {
            if previous == coord {
                return;
            }
            self.remove_from_cell(entity, previous);
        }
        self.cells.entry(coord).or_default().push(entity);
    }

    fn query_into(&self, x: f32, z: f32, radius: f32, out: &mut Vec<Entity>) {
        let radius = radius.max(0.0);
        let (min_x, min_z) = self.cell_coord(x - radius, z - radius);
        let (max_x, max_z) = self.cell_coord(x + radius, z + radius);

        let span = (i64::from(max_x) - i64::from(min_x) + 1) * (i64::from(max_z) - i64::from(min_z) + 1);

        // Large radii cover more cells than exist; walk the occupied ones instead
        if span > self.cells.len() as i64 {
            for (&(cx, cz), bucket) in &self.cells {
                if (min_x..=max_x).contains(&cx) && (min_z..=max_z).contains(&cz) {
                    out.extend_from_slice(bucket);
                }
            }
            return;
        }

        for cx in min_x..=max_x {
            for cz in min_z..=max_z {
                if let Some(bucket) = self.cells.get(&(cx, cz)) {
                    out.extend_from_slice(bucket);
                }
            }
        }
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.entity_cells.clear();
    }

    fn entity_count(&self) -> usize {
        self.entity_cells.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_query_same_cell() {
        let mut grid = UniformGrid::new(4.0);
        grid.insert(Entity::new(1), 1.0, 1.0);
        grid.insert(Entity::new(2), 2.0, 3.0);

        let mut found = grid.query(1.0, 1.0, 0.5);
        found.sort();
        assert_eq!(found, vec![Entity::new(1), Entity::new(2)]);
    }

    #[test]
    fn test_query_reaches_neighbor_cells() {
        let mut grid = UniformGrid::new(4.0);
        grid.insert(Entity::new(1), 3.9, 0.0);
        grid.insert(Entity::new(2), 4.1, 0.0);

        assert_ne!(grid.cell_of(Entity::new(1)), grid.cell_of(Entity::new(2)));
        assert!(grid.query(3.9, 0.0, 0.5).contains(&Entity::new(2)));
    }

    #[test]
    fn test_query_excludes_far_cells() {
        let mut grid = UniformGrid::new(2.0);
        grid.insert(Entity::new(1), 0.0, 0.0);
        grid.insert(Entity::new(2), 50.0, 50.0);

        assert_eq!(grid.query(0.0, 0.0, 1.0), vec![Entity::new(1)]);
    }

    #[test]
    fn test_vertical_position_is_ignored() {
        // Only x and z are indexed; y never reaches the grid
        let mut grid = UniformGrid::new(2.0);
        grid.insert(Entity::new(1), 0.5, 0.5);
        assert_eq!(grid.query(0.5, 0.5, 0.0), vec![Entity::new(1)]);
    }

    #[test]
    fn test_negative_coordinates_floor() {
        let grid = UniformGrid::new(2.0);
        assert_eq!(grid.cell_coord(-0.1, 0.1), (-1, 0));
        assert_eq!(grid.cell_coord(-2.0, -2.1), (-1, -2));
    }

    #[test]
    fn test_reinsert_moves_entity() {
        let mut grid = UniformGrid::new(1.0);
        grid.insert(Entity::new(7), 0.5, 0.5);
        grid.insert(Entity::new(7), 10.5, 10.5);

        assert_eq!(grid.entity_count(), 1);
        assert_eq!(grid.occupied_cells(), 1);
        assert!(grid.query(0.5, 0.5, 0.1).is_empty());
        assert_eq!(grid.query(10.5, 10.5, 0.1), vec![Entity::new(7)]);
    }

    #[test]
    fn test_huge_radius_walks_occupied_cells() {
        let mut grid = UniformGrid::new(0.01);
        grid.insert(Entity::new(1), 0.0, 0.0);
        grid.insert(Entity::new(2), 900.0, -900.0);

        let mut found = grid.query(0.0, 0.0, 1.0e6);
        found.sort();
        assert_eq!(found, vec![Entity::new(1), Entity::new(2)]);
    }

    #[test]
    fn test_clear() {
        let mut grid = UniformGrid::new(4.0);
        grid.insert(Entity::new(1), 0.0, 0.0);
        grid.clear();
        assert_eq!(grid.entity_count(), 0);
        assert!(grid.query(0.0, 0.0, 10.0).is_empty());
    }

    #[test]
    fn test_invalid_cell_size_falls_back() {
        assert_eq!(UniformGrid::new(0.0).cell_size(), 1.0);
        assert_eq!(UniformGrid::new(f32::NAN).cell_size(), 1.0);
    }
}
