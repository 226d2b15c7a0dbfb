//! Sizing and shape options for emitted primitives.

use serde::{Deserialize, Serialize};
use tensegrity_types::NodeShape;

use crate::error::LatticeError;
use crate::Tolerance;

/// Square bar profile, sized relative to the tube radius `r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BarProfile {
    /// `r / 10` square.
    #[default]
    Standard,
    /// `r / 50` square.
    Slender,
}

impl BarProfile {
    pub fn side_ratio(self) -> f64 {
        match self {
            BarProfile::Standard => 1.0 / 10.0,
            BarProfile::Slender => 1.0 / 50.0,
        }
    }
}

/// Configuration for [`super::GeometryEmitter`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub node_shape: NodeShape,
    /// Node radius as a fraction of the tube radius.
    pub node_radius_ratio: f64,
    pub bar_profile: BarProfile,
    /// String radius as a fraction of the tube radius.
    pub string_radius_ratio: f64,
    /// Centerline angle (radians) kept when the lattice is a cutaway.
    pub cutaway_span: f64,
    pub tolerance: Tolerance,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            node_shape: NodeShape::Sphere,
            node_radius_ratio: 1.0 / 50.0,
            bar_profile: BarProfile::Standard,
            string_radius_ratio: 1.0 / 100.0,
            cutaway_span: std::f64::consts::PI,
            tolerance: Tolerance::default(),
        }
    }
}

impl EmitterConfig {
    /// Cube nodes, which mesh much faster than spheres.
    pub fn simplified() -> Self {
        Self {
            node_shape: NodeShape::Cube,
            ..Self::default()
        }
    }

    /// Thin `r / 50` bars.
    pub fn slender() -> Self {
        Self {
            bar_profile: BarProfile::Slender,
            ..Self::default()
        }
    }

    /// Parse and validate a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, LatticeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LatticeError> {
        for (parameter, ratio) in [
            ("node_radius_ratio", self.node_radius_ratio),
            ("string_radius_ratio", self.string_radius_ratio),
        ] {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(LatticeError::invalid(parameter, format!("must be finite and positive, got {ratio}")));
            }
        }
        if !(self.cutaway_span > 0.0 && self.cutaway_span <= std::f64::consts::TAU) {
            return Err(LatticeError::invalid(
                "cutaway_span",
                format!("must lie in (0, 2*PI], got {}", self.cutaway_span),
            ));
        }
        if !(self.tolerance.coincidence > 0.0 && self.tolerance.frame_fallback > 0.0) {
            return Err(LatticeError::invalid("tolerance", "tolerances must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sizes() {
        let config = EmitterConfig::default();
        assert_eq!(config.node_shape, NodeShape::Sphere);
        assert!((config.node_radius_ratio - 0.02).abs() < 1e-15);
        assert!((config.string_radius_ratio - 0.01).abs() < 1e-15);
        assert!((config.bar_profile.side_ratio() - 0.1).abs() < 1e-15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(EmitterConfig::simplified().node_shape, NodeShape::Cube);
        assert_eq!(EmitterConfig::slender().bar_profile, BarProfile::Slender);
        assert!((BarProfile::Slender.side_ratio() - 0.02).abs() < 1e-15);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = EmitterConfig::from_json(r#"{"bar_profile": "Slender", "node_shape": {"type": "Cube"}}"#).unwrap();
        assert_eq!(config.bar_profile, BarProfile::Slender);
        assert_eq!(config.node_shape, NodeShape::Cube);
        assert_eq!(config.tolerance, Tolerance::default());
    }

    #[test]
    fn test_rejects_non_positive_ratios() {
        let config = EmitterConfig {
            string_radius_ratio: 0.0,
            ..EmitterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LatticeError::InvalidParameters { parameter: "string_radius_ratio", .. })
        ));
        assert!(EmitterConfig::from_json(r#"{"node_radius_ratio": -1.0}"#).is_err());
    }

    #[test]
    fn test_rejects_bad_cutaway_span() {
        for span in [0.0, -1.0, 7.0, f64::NAN] {
            let config = EmitterConfig {
                cutaway_span: span,
                ..EmitterConfig::default()
            };
            assert!(config.validate().is_err(), "span {span} accepted");
        }
    }
}
