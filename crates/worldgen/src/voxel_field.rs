/// Dense 3D lattice of density samples, indexed `[x][y][z]`.
///
/// Values are signed-distance-like but not a true SDF: the terrace term in
/// the generator folds the field into stepped bands.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelField {
    size_x: usize,
    size_y: usize,
    size_z: usize,
    values: Vec<f32>,
}

impl VoxelField {
    pub fn new(size_x: usize, size_y: usize, size_z: usize) -> Self {
        Self {
            size_x,
            size_y,
            size_z,
            values: vec![0.0; size_x * size_y * size_z],
        }
    }

    /// Build a field by evaluating `f(x, y, z)` at every lattice point.
    pub fn from_fn(
        size_x: usize,
        size_y: usize,
        size_z: usize,
        mut f: impl FnMut(usize, usize, usize) -> f32,
    ) -> Self {
        let mut field = Self::new(size_x, size_y, size_z);
        for x in 0..size_x {
            for y in 0..size_y {
                for z in 0..size_z {
                    field.set(x, y, z, f(x, y, z));
                }
            }
        }
        field
    }

    /// `(size_x, size_y, size_z)` in lattice points.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.size_x, self.size_y, self.size_z)
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.size_x && y < self.size_y && z < self.size_z
    }

    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        assert!(
            self.in_bounds(x, y, z),
            "voxel ({x}, {y}, {z}) outside {}x{}x{} field",
            self.size_x,
            self.size_y,
            self.size_z
        );
        (x * self.size_y + y) * self.size_z + z
    }

    #[inline]
    pub fn sample(&self, x: usize, y: usize, z: usize) -> f32 {
        self.values[self.index(x, y, z)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: f32) {
        let idx = self.index(x, y, z);
        self.values[idx] = value;
    }
}
