//! Simulation configuration.
//!
//! [`SimConfig`] is a `serde` document describing one run: the container,
//! the ball population, and the physics knobs of the collision resolver.
//! Every field has a default, so a partial JSON document is enough:
//!
//! ```json
//! {
//!   "num_balls": 25,
//!   "width": 900.0,
//!   "height": 400.0,
//!   "velocity_range": [1.0, 4.0],
//!   "seed": 7,
//!   "model": "elastic"
//! }
//! ```

use crate::collision::{CollisionModel, ImpactAnglePolicy};
use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_WIDTH: f64 = 600.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;
pub const BALL_RADIUS: f64 = 10.0;
pub const BALL_MASS: f64 = 1.0;
pub const BALL_COLOR: [u8; 3] = [255, 255, 255];
pub const ELASTICITY: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub num_balls: usize,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub mass: f64,
    /// Per-axis speed magnitude range `[min, max]`; a random sign is applied afterwards.
    pub velocity_range: (f64, f64),
    /// Multiplier applied to a reflected velocity component on wall contact.
    pub elasticity: f64,
    pub dt: f64,
    /// `None` draws a fresh seed from the thread RNG.
    pub seed: Option<u64>,
    pub model: CollisionModel,
    pub impact_angle: ImpactAnglePolicy,
    pub max_placement_attempts: u32,
    pub color: [u8; 3],
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_balls: 10,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            radius: BALL_RADIUS,
            mass: BALL_MASS,
            velocity_range: (-5.0, 5.0),
            elasticity: ELASTICITY,
            dt: 1.0,
            seed: None,
            model: CollisionModel::Reference,
            impact_angle: ImpactAnglePolicy::SkipImpulse,
            max_placement_attempts: 10_000,
            color: BALL_COLOR,
        }
    }
}

impl SimConfig {
    /// Default configuration in a `width` x `height` container.
    pub fn with_container(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the preconditions the engine relies on.
    pub fn validate(&self) -> Result<()> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("radius", self.radius)?;
        positive("mass", self.mass)?;

        let (vmin, vmax) = self.velocity_range;
        if !vmin.is_finite() || !vmax.is_finite() {
            return Err(SimError::invalid("velocity_range must be finite"));
        }
        if vmin > vmax {
            return Err(SimError::invalid(format!(
                "velocity_range min ({vmin}) must not exceed max ({vmax})"
            )));
        }
        if !self.elasticity.is_finite() || self.elasticity < 0.0 {
            return Err(SimError::invalid("elasticity must be finite and >= 0"));
        }
        if !self.dt.is_finite() {
            return Err(SimError::invalid("dt must be finite"));
        }
        if self.max_placement_attempts == 0 {
            return Err(SimError::invalid("max_placement_attempts must be > 0"));
        }
        // Balls are placed on the integer grid [ceil(r), floor(extent - r)].
        if self.radius.ceil() > (self.width - self.radius).floor()
            || self.radius.ceil() > (self.height - self.radius).floor()
        {
            return Err(SimError::invalid(format!(
                "container {}x{} cannot hold a ball of radius {}",
                self.width, self.height, self.radius
            )));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SimError::invalid(format!("{name} must be finite and > 0")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let c = SimConfig::default();
        assert_eq!(c.num_balls, 10);
        assert_eq!(c.width, 600.0);
        assert_eq!(c.height, 600.0);
        assert_eq!(c.radius, 10.0);
        assert_eq!(c.velocity_range, (-5.0, 5.0));
        assert_eq!(c.elasticity, 1.0);
        assert_eq!(c.model, CollisionModel::Reference);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c = SimConfig::from_json_str(r#"{ "width": 900.0, "height": 400.0, "seed": 3 }"#)
            .unwrap();
        assert_eq!(c.width, 900.0);
        assert_eq!(c.height, 400.0);
        assert_eq!(c.seed, Some(3));
        assert_eq!(c.num_balls, 10);
    }

    #[test]
    fn model_and_policy_parse_from_snake_case() {
        let c = SimConfig::from_json_str(r#"{ "model": "elastic", "impact_angle": "clamp" }"#)
            .unwrap();
        assert_eq!(c.model, CollisionModel::Elastic);
        assert_eq!(c.impact_angle, ImpactAnglePolicy::Clamp);
    }

    #[test]
    fn inverted_velocity_range_rejected() {
        let c = SimConfig {
            velocity_range: (4.0, 1.0),
            ..SimConfig::default()
        };
        let msg = c.validate().unwrap_err().to_string();
        assert!(msg.contains("velocity_range"));
    }

    #[test]
    fn non_positive_values_rejected() {
        for c in [
            SimConfig { radius: 0.0, ..SimConfig::default() },
            SimConfig { mass: -1.0, ..SimConfig::default() },
            SimConfig { width: 0.0, ..SimConfig::default() },
            SimConfig { height: f64::NAN, ..SimConfig::default() },
        ] {
            assert!(c.validate().is_err(), "{c:?} should be rejected");
        }
    }

    #[test]
    fn container_smaller_than_a_ball_rejected() {
        let c = SimConfig::with_container(15.0, 600.0);
        assert!(c.validate().is_err());
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = SimConfig::from_json_str("{ width: ").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn json_round_trip_preserves_fields() {
        let c = SimConfig {
            seed: Some(99),
            model: CollisionModel::Elastic,
            ..SimConfig::with_container(1200.0, 300.0)
        };
        let back = SimConfig::from_json_str(&c.to_json_string().unwrap()).unwrap();
        assert_eq!(back, c);
    }
}
