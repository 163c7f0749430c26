//! Island heightmap: a square lattice of cells classified into regions from
//! noise minus a radial falloff.

use bevy::prelude::*;

use crate::config::GridConfig;
use crate::error::GenerationError;
use crate::noise_field::{NoiseMap, ScalarFieldGenerator};
use crate::regions::{Region, RegionTable};

/// Side of a cell shared with one of its four neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeDirection {
    /// -X
    Left,
    /// +X
    Right,
    /// -Z (grid y - 1)
    Down,
    /// +Z (grid y + 1)
    Up,
}

impl EdgeDirection {
    pub const ALL: [EdgeDirection; 4] = [
        EdgeDirection::Left,
        EdgeDirection::Right,
        EdgeDirection::Down,
        EdgeDirection::Up,
    ];

    /// Grid coordinates of the neighbor in this direction, `None` past the
    /// grid boundary.
    pub fn neighbor(self, x: usize, y: usize, side_length: usize) -> Option<(usize, usize)> {
        match self {
            EdgeDirection::Left => x.checked_sub(1).map(|nx| (nx, y)),
            EdgeDirection::Right => (x + 1 < side_length).then_some((x + 1, y)),
            EdgeDirection::Down => y.checked_sub(1).map(|ny| (x, ny)),
            EdgeDirection::Up => (y + 1 < side_length).then_some((x, y + 1)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    /// World-space XZ position; the cell's quad is centered here.
    pub world_position: Vec2,
    pub is_water: bool,
    /// Index into the owning grid's [`RegionTable`].
    pub region: usize,
}

/// Classified grid. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct HeightGrid {
    base_size: usize,
    side_length: usize,
    cell_size: f32,
    regions: RegionTable,
    cells: Vec<Cell>,
}

impl HeightGrid {
    /// Sample noise, subtract the falloff and classify every cell.
    pub fn generate(
        config: &GridConfig,
        generator: &mut ScalarFieldGenerator,
    ) -> Result<Self, GenerationError> {
        let regions = config.validate()?;
        let side = config.side_length();

        let noise = generator.noise_2d(config.noise_scale, side);
        let falloff = generate_falloff(side, config.falloff_a, config.falloff_b);
        let values = NoiseMap::from_fn(side, |x, y| noise.get(x, y) - falloff.get(x, y));
        debug!(
            "HeightGrid: sampled {}x{} noise with offsets {:?}",
            side,
            side,
            generator.last_offsets()
        );

        Self::classify(regions, config.base_size, config.resolution, &values)
    }

    /// Assign a region to every cell from precomputed final values
    /// (noise already combined with any falloff).
    pub fn classify(
        regions: RegionTable,
        base_size: usize,
        resolution: usize,
        values: &NoiseMap,
    ) -> Result<Self, GenerationError> {
        if base_size == 0 {
            return Err(GenerationError::ZeroExtent { field: "base_size" });
        }
        if resolution == 0 {
            return Err(GenerationError::ZeroExtent {
                field: "resolution",
            });
        }
        let side_length = base_size * resolution;
        if values.size() != side_length {
            return Err(GenerationError::FieldSizeMismatch {
                expected: side_length,
                actual: values.size(),
            });
        }

        let cell_size = 1.0 / resolution as f32;
        let mut cells = Vec::with_capacity(side_length * side_length);
        for y in 0..side_length {
            for x in 0..side_length {
                let region = regions.assign_region(values.get(x, y));
                cells.push(Cell {
                    x,
                    y,
                    world_position: Vec2::new(x as f32 * cell_size, y as f32 * cell_size),
                    is_water: regions.get(region).is_water(),
                    region,
                });
            }
        }

        Ok(Self {
            base_size,
            side_length,
            cell_size,
            regions,
            cells,
        })
    }

    /// Island size in world units.
    pub fn base_size(&self) -> usize {
        self.base_size
    }

    /// Cells along one side.
    pub fn side_length(&self) -> usize {
        self.side_length
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.side_length && y < self.side_length
    }

    /// Panics when `(x, y)` is outside the grid.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        assert!(
            self.in_bounds(x, y),
            "cell ({x}, {y}) outside {0}x{0} grid",
            self.side_length
        );
        &self.cells[y * self.side_length + x]
    }

    pub fn try_cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.in_bounds(x, y)
            .then(|| &self.cells[y * self.side_length + x])
    }

    #[inline]
    pub fn region_of(&self, cell: &Cell) -> &Region {
        self.regions.get(cell.region)
    }

    /// Grid coordinates containing a world-space XZ position. May be negative
    /// or past the far edge.
    pub fn world_to_grid(&self, world: Vec2) -> (i64, i64) {
        let gx = (world.x / self.cell_size).floor() as i64;
        let gy = (world.y / self.cell_size).floor() as i64;
        (gx, gy)
    }

    /// `None` for positions off the grid or with a non-finite coordinate.
    pub fn try_cell_at_world(&self, world: Vec2) -> Option<&Cell> {
        if !world.is_finite() {
            return None;
        }
        let (gx, gy) = self.world_to_grid(world);
        if gx < 0 || gy < 0 {
            return None;
        }
        self.try_cell(gx as usize, gy as usize)
    }

    /// Panics when `world` falls outside the grid.
    pub fn cell_at_world(&self, world: Vec2) -> &Cell {
        match self.try_cell_at_world(world) {
            Some(cell) => cell,
            None => panic!(
                "world position ({}, {}) outside {}x{} grid",
                world.x, world.y, self.side_length, self.side_length
            ),
        }
    }

    /// Cells sharing an edge with `(x, y)`, each tagged with the side it
    /// lies on. Sides on the grid boundary are skipped.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (EdgeDirection, &Cell)> {
        EdgeDirection::ALL.into_iter().filter_map(move |direction| {
            let (nx, ny) = direction.neighbor(x, y, self.side_length)?;
            Some((direction, self.cell(nx, ny)))
        })
    }

    /// Per-cell sRGBA region colors, row-major, for painting a terrain texture.
    pub fn color_map(&self) -> Vec<[f32; 4]> {
        self.cells
            .iter()
            .map(|cell| self.region_of(cell).color.to_srgba().to_f32_array())
            .collect()
    }
}

/// Square vignette subtracted from the noise to sink the island rim.
///
/// For `xv, yv` in `[-1, 1)` and `v = max(|xv|, |yv|)` the falloff is
/// `v^a / (v^a + (b - b*v)^a)`. Where that ratio is undefined (zero
/// denominator, NaN) the sample is `0.0`, meaning no attenuation.
pub fn generate_falloff(size: usize, a: f32, b: f32) -> NoiseMap {
    NoiseMap::from_fn(size, |x, y| {
        let xv = x as f32 / size as f32 * 2.0 - 1.0;
        let yv = y as f32 / size as f32 * 2.0 - 1.0;
        falloff_value(xv.abs().max(yv.abs()), a, b)
    })
}

#[inline]
pub(crate) fn falloff_value(v: f32, a: f32, b: f32) -> f32 {
    let near = v.powf(a);
    let far = (b - b * v).powf(a);
    let denominator = near + far;
    if denominator == 0.0 {
        return 0.0;
    }
    let value = near / denominator;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
