use std::f32::consts::TAU;

use bevy::color::{LinearRgba, Mix};
use bevy::math::Vec3;
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::{GalaxyError, GalaxyParameters};

/// Points generated per rayon task. Each chunk gets its own seed.
pub const CHUNK_SIZE: usize = 4096;

/// One generated point, before it is split into vertex buffers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalaxyPoint {
    pub position: Vec3,
    pub color: LinearRgba,
    pub scale: f32,
    pub randomness: Vec3,
}

/// Vertex-ready buffers, one entry per point, all index-aligned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GalaxyBuffers {
    pub positions: Vec<[f32; 3]>,
    /// Linear RGB
    pub colors: Vec<[f32; 3]>,
    pub scales: Vec<f32>,
    pub randomness: Vec<[f32; 3]>,
}

impl GalaxyBuffers {
    fn with_capacity(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
            scales: Vec::with_capacity(count),
            randomness: Vec::with_capacity(count),
        }
    }

    fn push(&mut self, point: GalaxyPoint) {
        self.positions.push(point.position.to_array());
        self.colors
            .push([point.color.red, point.color.green, point.color.blue]);
        self.scales.push(point.scale);
        self.randomness.push(point.randomness.to_array());
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<GalaxyPoint> {
        let [red, green, blue] = *self.colors.get(index)?;
        Some(GalaxyPoint {
            position: Vec3::from_array(*self.positions.get(index)?),
            color: LinearRgba::rgb(red, green, blue),
            scale: *self.scales.get(index)?,
            randomness: Vec3::from_array(*self.randomness.get(index)?),
        })
    }
}

/// Generates a full galaxy from a parameter snapshot.
///
/// Parameters are validated before anything is allocated. The rng is only
/// used to seed one [`StdRng`] per chunk of [`CHUNK_SIZE`] points, so the
/// output is reproducible for a given seed however rayon schedules the chunks.
pub fn generate_galaxy<R: Rng>(
    params: &GalaxyParameters,
    rng: &mut R,
) -> Result<GalaxyBuffers, GalaxyError> {
    params.validate()?;

    let count = params.count as usize;
    let seeds: Vec<u64> = (0..count.div_ceil(CHUNK_SIZE))
        .map(|_| rng.random())
        .collect();

    let palette = Palette {
        inside: params.inside_color.into(),
        outside: params.outside_color.into(),
    };

    let chunks: Vec<Vec<GalaxyPoint>> = seeds
        .into_par_iter()
        .enumerate()
        .map(|(chunk, seed)| {
            let mut chunk_rng = StdRng::seed_from_u64(seed);
            let start = chunk * CHUNK_SIZE;
            let end = (start + CHUNK_SIZE).min(count);
            (start..end)
                .map(|index| sample_point(index, params, &palette, &mut chunk_rng))
                .collect::<Vec<_>>()
        })
        .collect();

    let mut buffers = GalaxyBuffers::with_capacity(count);
    for point in chunks.into_iter().flatten() {
        buffers.push(point);
    }
    Ok(buffers)
}

struct Palette {
    inside: LinearRgba,
    outside: LinearRgba,
}

/// Angle of the arm a point belongs to, assigned by index residue so every
/// arm is populated evenly
pub fn branch_angle(index: usize, branches: u32) -> f32 {
    let branches = branches.max(1) as usize;
    (index % branches) as f32 / branches as f32 * TAU
}

/// Inside-to-outside blend factor for a point at `distance` from the core,
/// `distance² / radius` saturated at the outside color.
pub fn color_mix_factor(distance: f32, radius: f32) -> f32 {
    (distance * distance / radius).clamp(0.0, 1.0)
}

fn sample_point<R: Rng>(
    index: usize,
    params: &GalaxyParameters,
    palette: &Palette,
    rng: &mut R,
) -> GalaxyPoint {
    let distance = rng.random_range(0.0..params.radius);
    let angle = branch_angle(index, params.branches) + distance * params.spin;

    let randomness = Vec3::new(
        sample_jitter(rng, params, distance),
        sample_jitter(rng, params, distance),
        sample_jitter(rng, params, distance),
    );

    GalaxyPoint {
        position: Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance),
        color: palette
            .inside
            .mix(&palette.outside, color_mix_factor(distance, params.radius)),
        scale: rng.random::<f32>(),
        randomness,
    }
}

// Higher powers pull the magnitude towards zero, leaving a few outliers
fn sample_jitter<R: Rng>(rng: &mut R, params: &GalaxyParameters, distance: f32) -> f32 {
    let magnitude = rng.random::<f32>().powf(params.randomness_power);
    let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    sign * magnitude * params.randomness * distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::color::Srgba;
    use bevy::prelude::default;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn small(count: u32) -> GalaxyParameters {
        GalaxyParameters {
            count,
            ..default()
        }
    }

    #[test]
    fn buffers_are_count_wide() {
        // straddles a chunk boundary
        for count in [1, 7, CHUNK_SIZE as u32, CHUNK_SIZE as u32 + 3] {
            let buffers = generate_galaxy(&small(count), &mut seeded(1)).unwrap();
            assert_eq!(buffers.len(), count as usize);
            assert_eq!(buffers.colors.len(), count as usize);
            assert_eq!(buffers.scales.len(), count as usize);
            assert_eq!(buffers.randomness.len(), count as usize);
        }
    }

    #[test]
    fn default_configuration_generates() {
        let params = GalaxyParameters::default();
        let buffers = generate_galaxy(&params, &mut seeded(2)).unwrap();
        assert_eq!(buffers.len(), 100_000);
    }

    #[test]
    fn same_seed_same_galaxy() {
        let params = small(10_000);
        let a = generate_galaxy(&params, &mut seeded(42)).unwrap();
        let b = generate_galaxy(&params, &mut seeded(42)).unwrap();
        let c = generate_galaxy(&params, &mut seeded(43)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn rejects_invalid_parameters_before_generating() {
        let mut rng = seeded(3);
        for params in [
            small(0),
            GalaxyParameters {
                radius: 0.0,
                ..default()
            },
            GalaxyParameters {
                branches: 0,
                ..default()
            },
        ] {
            assert!(matches!(
                generate_galaxy(&params, &mut rng),
                Err(GalaxyError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn branch_angle_follows_index_residue() {
        assert_eq!(branch_angle(0, 4), 0.0);
        assert_eq!(branch_angle(4, 4), 0.0);
        assert_eq!(branch_angle(8, 4), 0.0);
        assert!((branch_angle(1, 4) - TAU / 4.0).abs() < 1e-6);
        assert!((branch_angle(6, 4) - TAU / 2.0).abs() < 1e-6);
        assert!((branch_angle(11, 4) - TAU * 0.75).abs() < 1e-6);
    }

    #[test]
    fn points_lie_on_their_arm_without_spin() {
        let params = GalaxyParameters {
            count: 2000,
            spin: 0.0,
            ..default()
        };
        let buffers = generate_galaxy(&params, &mut seeded(4)).unwrap();
        for (index, position) in buffers.positions.iter().enumerate() {
            let [x, y, z] = *position;
            assert_eq!(y, 0.0);
            let distance = (x * x + z * z).sqrt();
            if distance < 1e-3 {
                continue;
            }
            let expected = branch_angle(index, params.branches);
            let delta = (z.atan2(x) - expected).rem_euclid(TAU);
            assert!(
                delta < 1e-3 || TAU - delta < 1e-3,
                "point {index} is off its arm by {delta}"
            );
        }
    }

    #[test]
    fn spin_twists_with_distance() {
        let params = GalaxyParameters {
            count: 512,
            branches: 1,
            spin: 1.5,
            ..default()
        };
        let buffers = generate_galaxy(&params, &mut seeded(5)).unwrap();
        for position in &buffers.positions {
            let [x, _, z] = *position;
            let distance = (x * x + z * z).sqrt();
            let expected = Vec3::new(
                (distance * params.spin).cos() * distance,
                0.0,
                (distance * params.spin).sin() * distance,
            );
            assert!(Vec3::from_array(*position).distance(expected) < 1e-3);
        }
    }

    #[test]
    fn positions_stay_inside_radius() {
        let params = small(20_000);
        let buffers = generate_galaxy(&params, &mut seeded(6)).unwrap();
        for position in &buffers.positions {
            assert!(Vec3::from_array(*position).length() < params.radius + 1e-4);
        }
    }

    #[test]
    fn scales_are_unit_interval() {
        let buffers = generate_galaxy(&small(20_000), &mut seeded(7)).unwrap();
        assert!(buffers.scales.iter().all(|s| (0.0..1.0).contains(s)));
        let mean = buffers.scales.iter().sum::<f32>() / buffers.scales.len() as f32;
        assert!((mean - 0.5).abs() < 0.02, "mean scale {mean}");
    }

    #[test]
    fn scales_are_not_color_data() {
        let buffers = generate_galaxy(&small(1000), &mut seeded(8)).unwrap();
        let aliased = buffers
            .scales
            .iter()
            .zip(&buffers.colors)
            .filter(|(scale, color)| **scale == color[0])
            .count();
        assert!(aliased < 10);
    }

    #[test]
    fn no_randomness_means_no_offsets() {
        let params = GalaxyParameters {
            count: 1000,
            randomness: 0.0,
            ..default()
        };
        let buffers = generate_galaxy(&params, &mut seeded(9)).unwrap();
        assert!(buffers.randomness.iter().flatten().all(|v| *v == 0.0));
    }

    #[test]
    fn offsets_are_bounded_by_randomness_and_distance() {
        let params = small(10_000);
        let buffers = generate_galaxy(&params, &mut seeded(10)).unwrap();
        for index in 0..buffers.len() {
            let point = buffers.point(index).unwrap();
            let distance = point.position.length();
            let bound = params.randomness * distance + 1e-4;
            assert!(point.randomness.abs().max_element() <= bound);
        }
    }

    #[test]
    fn offsets_use_both_signs_on_every_axis() {
        let buffers = generate_galaxy(&small(5000), &mut seeded(11)).unwrap();
        for axis in 0..3 {
            assert!(buffers.randomness.iter().any(|v| v[axis] > 0.0));
            assert!(buffers.randomness.iter().any(|v| v[axis] < 0.0));
        }
    }

    #[test]
    fn higher_power_concentrates_offsets() {
        let mean_offset = |power: f32| {
            let params = GalaxyParameters {
                count: 50_000,
                randomness_power: power,
                ..default()
            };
            let buffers = generate_galaxy(&params, &mut seeded(12)).unwrap();
            let total: f32 = buffers
                .randomness
                .iter()
                .flatten()
                .map(|v| v.abs())
                .sum();
            total / (buffers.len() * 3) as f32
        };

        let means: Vec<f32> = [1.0, 2.0, 3.2, 6.0].into_iter().map(mean_offset).collect();
        for pair in means.windows(2) {
            assert!(pair[1] < pair[0], "offsets did not shrink: {means:?}");
        }
    }

    #[test]
    fn color_mix_factor_is_squared_distance_over_radius() {
        assert_eq!(color_mix_factor(0.0, 5.0), 0.0);
        assert!((color_mix_factor(1.0, 5.0) - 0.2).abs() < 1e-6);
        assert!((color_mix_factor(2.0, 5.0) - 0.8).abs() < 1e-6);
        // saturates from sqrt(radius) outwards
        assert_eq!(color_mix_factor(2.5, 5.0), 1.0);
        assert_eq!(color_mix_factor(4.999, 5.0), 1.0);
        assert!((color_mix_factor(0.5, 1.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn core_is_inside_color_and_rim_approaches_outside() {
        let params = GalaxyParameters {
            inside_color: Srgba::rgb(1.0, 0.0, 0.0),
            outside_color: Srgba::rgb(0.0, 0.0, 1.0),
            ..small(1)
        };
        let palette = Palette {
            inside: params.inside_color.into(),
            outside: params.outside_color.into(),
        };

        let core = palette
            .inside
            .mix(&palette.outside, color_mix_factor(0.0, params.radius));
        assert_eq!(core, LinearRgba::RED);

        let rim = palette
            .inside
            .mix(&palette.outside, color_mix_factor(params.radius * 0.9999, params.radius));
        assert!(rim.red < 1e-3);
        assert!(rim.blue > 0.999);
    }

    #[test]
    fn generated_colors_blend_by_distance() {
        let params = GalaxyParameters {
            count: 5000,
            inside_color: Srgba::rgb(1.0, 0.0, 0.0),
            outside_color: Srgba::rgb(0.0, 0.0, 1.0),
            ..default()
        };
        let buffers = generate_galaxy(&params, &mut seeded(13)).unwrap();
        let mut saturated = 0;
        for index in 0..buffers.len() {
            let point = buffers.point(index).unwrap();
            let distance = point.position.length();
            let t = (distance * distance / params.radius).min(1.0);
            assert!((point.color.blue - t).abs() < 1e-3);
            assert!((point.color.red - (1.0 - t)).abs() < 1e-3);
            if distance >= params.radius.sqrt() {
                assert!(point.color.blue > 0.999);
                saturated += 1;
            }
        }
        // distance is uniform over [0, 5), so a bit over half the points
        // sit past sqrt(5) and are fully outside colored
        let share = saturated as f32 / buffers.len() as f32;
        assert!((0.5..0.6).contains(&share), "saturated share {share}");
    }
}
