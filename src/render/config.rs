use serde::{Deserialize, Serialize};

use crate::util::GameError;

/// Geometry settings for the circular play field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayFieldConfig {
    /// Arc segments per quadrant sector.
    pub segments_per_quadrant: u16,
    /// Segments of the outline ring around the field.
    pub outline_segments: u16,
    /// Field radius as a fraction of the shorter screen side.
    pub radius_ratio: f32,
    /// Outline ring thickness in pixels.
    pub outline_width: f32,
    /// Vertices the scratch arena can hold for one frame.
    pub scratch_vertex_capacity: usize,
}

impl Default for PlayFieldConfig {
    fn default() -> Self {
        Self {
            segments_per_quadrant: 40,
            outline_segments: 200,
            radius_ratio: 0.3125,
            outline_width: 2.0,
            scratch_vertex_capacity: 4096,
        }
    }
}

impl PlayFieldConfig {
    /// Vertices one sector needs: centre plus `segments + 1` arc points.
    pub fn sector_vertex_count(&self) -> usize {
        usize::from(self.segments_per_quadrant) + 2
    }

    pub fn sector_index_count(&self) -> usize {
        3 * usize::from(self.segments_per_quadrant)
    }

    /// Inner and outer point for every outline segment.
    pub fn ring_vertex_count(&self) -> usize {
        2 * usize::from(self.outline_segments)
    }

    pub fn ring_index_count(&self) -> usize {
        6 * usize::from(self.outline_segments)
    }

    /// Radius in pixels for a screen of the given size.
    pub fn radius_for(&self, width: u32, height: u32) -> f32 {
        width.min(height) as f32 * self.radius_ratio
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.segments_per_quadrant == 0 || self.outline_segments == 0 {
            return Err(GameError::InvalidConfig(
                "segment counts must be positive".to_string(),
            ));
        }
        if !(self.radius_ratio > 0.0 && self.radius_ratio <= 0.5) {
            return Err(GameError::InvalidConfig(format!(
                "radius_ratio must be in (0, 0.5], got {}",
                self.radius_ratio
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_counts() {
        let config = PlayFieldConfig::default();
        assert_eq!(config.sector_vertex_count(), 42);
        assert_eq!(config.sector_index_count(), 120);
        assert_eq!(config.ring_vertex_count(), 400);
        assert_eq!(config.ring_index_count(), 1200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_radius_uses_shorter_side() {
        let config = PlayFieldConfig::default();
        assert_eq!(config.radius_for(800, 640), 200.0);
        assert_eq!(config.radius_for(640, 800), 200.0);
    }

    #[test]
    fn test_zero_segments_rejected() {
        let config = PlayFieldConfig {
            segments_per_quadrant: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_bad_radius_rejected() {
        let config = PlayFieldConfig {
            radius_ratio: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
