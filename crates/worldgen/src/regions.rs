use bevy::prelude::*;

use crate::config::{RegionConfig, WATER_REGION_NAME};
use crate::error::GenerationError;

/// A terrain band with its derived world-space height.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub threshold: f32,
    pub color: Color,
    pub world_height: f32,
}

impl Region {
    pub fn is_water(&self) -> bool {
        self.name == WATER_REGION_NAME
    }
}

/// Regions ordered by ascending threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTable {
    regions: Vec<Region>,
}

impl RegionTable {
    /// Validate the configured bands and derive their world heights.
    ///
    /// A region at index `i` sits at `(i - 1) * height_scale`, so the first
    /// band is one step below zero.
    pub fn new(configs: &[RegionConfig], height_scale: f32) -> Result<Self, GenerationError> {
        if configs.is_empty() {
            return Err(GenerationError::NoRegions);
        }

        let mut regions = Vec::with_capacity(configs.len());
        let mut previous: Option<f32> = None;
        for (i, config) in configs.iter().enumerate() {
            if !(0.0..=1.0).contains(&config.threshold) {
                return Err(GenerationError::ThresholdOutOfRange {
                    name: config.name.clone(),
                    threshold: config.threshold,
                });
            }
            if let Some(previous) = previous {
                if config.threshold < previous {
                    return Err(GenerationError::ThresholdsNotAscending {
                        name: config.name.clone(),
                        threshold: config.threshold,
                        previous,
                    });
                }
            }
            previous = Some(config.threshold);

            let [r, g, b] = config.color;
            regions.push(Region {
                name: config.name.clone(),
                threshold: config.threshold,
                color: Color::srgb(r, g, b),
                world_height: (i as f32 - 1.0) * height_scale,
            });
        }

        Ok(Self { regions })
    }

    /// Index of the first region whose threshold is at or above `value`.
    ///
    /// Relies on the ascending order checked in [`RegionTable::new`]. Values
    /// above every threshold land in the last region.
    pub fn assign_region(&self, value: f32) -> usize {
        self.regions
            .iter()
            .position(|region| value <= region.threshold)
            .unwrap_or(self.regions.len() - 1)
    }

    #[inline]
    pub fn get(&self, index: usize) -> &Region {
        &self.regions[index]
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Index of the water region, if the table has one.
    pub fn water_index(&self) -> Option<usize> {
        self.regions.iter().position(Region::is_water)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(thresholds: &[(&str, f32)]) -> RegionTable {
        let configs: Vec<RegionConfig> = thresholds
            .iter()
            .map(|&(name, t)| RegionConfig::new(name, t, [1.0, 1.0, 1.0]))
            .collect();
        RegionTable::new(&configs, 0.5).expect("valid table")
    }

    #[test]
    fn test_world_height_derived_from_index() {
        let t = table(&[("Water", 0.3), ("Sand", 0.5), ("Grass", 1.0)]);
        assert_eq!(t.get(0).world_height, -0.5);
        assert_eq!(t.get(1).world_height, 0.0);
        assert_eq!(t.get(2).world_height, 0.5);
    }

    #[test]
    fn test_first_match_low_to_high() {
        let t = table(&[("Water", 0.3), ("Sand", 0.5), ("Grass", 1.0)]);
        assert_eq!(t.assign_region(-0.4), 0);
        assert_eq!(t.assign_region(0.3), 0);
        assert_eq!(t.assign_region(0.31), 1);
        assert_eq!(t.assign_region(0.5), 1);
        assert_eq!(t.assign_region(0.9), 2);
    }

    #[test]
    fn test_value_above_every_threshold_uses_last_region() {
        let t = table(&[("Water", 0.3), ("Sand", 0.6)]);
        assert_eq!(t.assign_region(0.95), 1);
    }

    #[test]
    fn test_assignment_is_monotonic() {
        let t = table(&[
            ("Water", 0.2),
            ("Sand", 0.35),
            ("Grass", 0.6),
            ("Forest", 0.8),
            ("Rock", 1.0),
        ]);
        let mut last = 0;
        for step in 0..=200 {
            let value = -0.5 + step as f32 * 0.0075;
            let index = t.assign_region(value);
            assert!(
                index >= last,
                "region index dropped from {last} to {index} at value {value}"
            );
            last = index;
        }
    }

    #[test]
    fn test_water_detection() {
        let t = table(&[("Water", 0.3), ("Grass", 1.0)]);
        assert!(t.get(0).is_water());
        assert!(!t.get(1).is_water());
        assert_eq!(t.water_index(), Some(0));
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(RegionTable::new(&[], 1.0), Err(GenerationError::NoRegions));
    }

    #[test]
    fn test_descending_thresholds_rejected() {
        let configs = vec![
            RegionConfig::new("Grass", 0.7, [0.0, 1.0, 0.0]),
            RegionConfig::new("Water", 0.3, [0.0, 0.0, 1.0]),
        ];
        assert!(matches!(
            RegionTable::new(&configs, 1.0),
            Err(GenerationError::ThresholdsNotAscending { .. })
        ));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let configs = vec![RegionConfig::new("Peak", 1.5, [1.0, 1.0, 1.0])];
        assert!(matches!(
            RegionTable::new(&configs, 1.0),
            Err(GenerationError::ThresholdOutOfRange { .. })
        ));
    }
}
