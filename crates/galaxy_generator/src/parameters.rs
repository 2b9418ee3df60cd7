use bevy::color::Srgba;
use bevy::prelude::*;

use crate::GalaxyError;

/// Everything that shapes a generated galaxy.
///
/// The control panel edits a copy of this resource and commits snapshots of
/// it; generation only ever sees a borrowed snapshot.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct GalaxyParameters {
    pub count: u32,
    pub radius: f32,
    pub branches: u32,
    /// Radians of twist per unit of radius
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: Srgba,
    pub outside_color: Srgba,
    /// Sprite size handed to the shading stage
    pub point_size: f32,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 100_000,
            radius: 5.0,
            branches: 4,
            spin: 3.0,
            randomness: 1.0,
            randomness_power: 3.2,
            inside_color: Srgba::rgb_u8(0xff, 0x60, 0x30),
            outside_color: Srgba::rgb_u8(0x9b, 0xa5, 0xc0),
            point_size: 0.3,
        }
    }
}

impl GalaxyParameters {
    // Slider ranges for the control panel, colors are unused
    pub const MIN: Self = Self {
        count: 100,
        radius: 0.01,
        branches: 2,
        spin: -5.0,
        randomness: 0.0,
        randomness_power: 1.0,
        inside_color: Srgba::BLACK,
        outside_color: Srgba::BLACK,
        point_size: 0.001,
    };
    pub const MAX: Self = Self {
        count: 1_000_000,
        radius: 20.0,
        branches: 10,
        spin: 5.0,
        randomness: 2.0,
        randomness_power: 10.0,
        inside_color: Srgba::WHITE,
        outside_color: Srgba::WHITE,
        point_size: 1.0,
    };

    /// Checks every field against its constraint.
    ///
    /// The slider ranges above are narrower than what is accepted here; only
    /// values that would make generation meaningless are rejected.
    pub fn validate(&self) -> Result<(), GalaxyError> {
        if self.count == 0 {
            return Err(GalaxyError::invalid("count", self.count, "must be at least 1"));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(GalaxyError::invalid("radius", self.radius, "must be finite and positive"));
        }
        if self.branches == 0 {
            return Err(GalaxyError::invalid("branches", self.branches, "must be at least 1"));
        }
        if !self.spin.is_finite() {
            return Err(GalaxyError::invalid("spin", self.spin, "must be finite"));
        }
        if !(self.randomness.is_finite() && self.randomness >= 0.0) {
            return Err(GalaxyError::invalid(
                "randomness",
                self.randomness,
                "must be finite and not negative",
            ));
        }
        if !(self.randomness_power.is_finite() && self.randomness_power >= 1.0) {
            return Err(GalaxyError::invalid(
                "randomness_power",
                self.randomness_power,
                "must be finite and at least 1",
            ));
        }
        if !(self.point_size.is_finite() && self.point_size > 0.0) {
            return Err(GalaxyError::invalid(
                "point_size",
                self.point_size,
                "must be finite and positive",
            ));
        }
        Ok(())
    }
}
