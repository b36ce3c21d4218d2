use super::GalaxyParameters;
use bevy::prelude::*;
use rand::prelude::*;
use rayon::prelude::*;
use std::f32::consts::TAU;

/// Angle of the arm a point belongs to. Points are dealt round-robin across arms by index.
pub fn branch_angle(index: u32, branches: u32) -> f32 {
    let branches = branches.max(1);
    (index % branches) as f32 / branches as f32 * TAU
}

/// Places point `index` at distance `radius_sample` from the centre, twisted by `spin`
pub fn star_position(index: u32, radius_sample: f32, params: &GalaxyParameters) -> Vec3 {
    let spin_angle = radius_sample * params.spin;
    let angle = branch_angle(index, params.branches) + spin_angle;

    vec3(angle.cos() * radius_sample, 0.0, angle.sin() * radius_sample)
}

/// Samples `count` points as a flat xyz buffer of exactly `count * 3` floats.
/// Each point's distance from the centre is drawn uniformly from `[0, radius)`.
pub fn generate_positions(params: &GalaxyParameters) -> Vec<f32> {
    let mut positions = vec![0.0f32; params.count as usize * 3];

    positions
        .par_chunks_exact_mut(3)
        .enumerate()
        .for_each_init(rand::rng, |rng, (index, point)| {
            let radius_sample = rng.random::<f32>() * params.radius;
            let pos = star_position(index as u32, radius_sample, params);
            point.copy_from_slice(&pos.to_array());
        });

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn points(positions: &[f32]) -> impl Iterator<Item = Vec3> + '_ {
        positions
            .chunks_exact(3)
            .map(|p| vec3(p[0], p[1], p[2]))
    }

    #[test]
    fn buffer_holds_three_floats_per_point() {
        for count in [
            GalaxyParameters::MIN.count,
            1_000,
            12_300,
            GalaxyParameters::MAX.count,
        ] {
            let params = GalaxyParameters {
                count,
                ..default()
            };
            assert_eq!(generate_positions(&params).len(), count as usize * 3);
        }
    }

    #[test]
    fn empty_galaxy_is_well_formed() {
        let params = GalaxyParameters {
            count: 0,
            ..default()
        };
        assert!(generate_positions(&params).is_empty());
    }

    #[test]
    fn points_lie_flat_within_radius() {
        let params = GalaxyParameters {
            count: 20_000,
            radius: 3.5,
            spin: -4.2,
            ..default()
        };
        for point in points(&generate_positions(&params)) {
            assert_eq!(point.y, 0.0);
            assert!(point.xz().length() <= params.radius * (1.0 + 1.0e-5));
        }
    }

    #[test]
    fn branch_angles_take_exactly_branches_values() {
        for branches in [2, 3, 7, 13, 20] {
            let distinct: HashSet<u32> = (0..1_000)
                .map(|i| branch_angle(i, branches).to_bits())
                .collect();
            assert_eq!(distinct.len(), branches as usize);

            for k in 0..branches {
                let expected = k as f32 / branches as f32 * TAU;
                assert!(distinct.contains(&expected.to_bits()));
            }
        }
    }

    #[test]
    fn zero_branches_does_not_produce_nan() {
        assert_eq!(branch_angle(5, 0), 0.0);
    }

    #[test]
    fn spin_twists_points_by_distance() {
        let params = GalaxyParameters {
            branches: 4,
            spin: 0.5,
            ..default()
        };
        let pos = star_position(0, 2.0, &params);
        let angle = pos.z.atan2(pos.x);
        assert!((angle - 1.0).abs() < 1.0e-5);
        assert!((pos.xz().length() - 2.0).abs() < 1.0e-5);
    }

    #[test]
    fn four_arm_galaxy_without_spin() {
        let params = GalaxyParameters {
            count: 100,
            size: 0.01,
            radius: 10.0,
            branches: 4,
            spin: 0.0,
        };
        let positions = generate_positions(&params);
        assert_eq!(positions.len(), 300);

        let arms = [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2];
        for (index, point) in points(&positions).enumerate() {
            assert_eq!(point.y, 0.0);
            assert!(point.xz().length() < 10.0);
            assert!((branch_angle(index as u32, 4) - arms[index % 4]).abs() < 1.0e-6);

            // Direction must match the arm unless the point sits at the centre
            if point.xz().length() > 1.0e-3 {
                let dir = point.xz().normalize();
                let arm = arms[index % 4];
                assert!((dir - vec2(arm.cos(), arm.sin())).length() < 1.0e-3);
            }
        }
    }

    #[test]
    fn smallest_radius_is_tolerated() {
        let params = GalaxyParameters {
            count: 500,
            radius: GalaxyParameters::MIN.radius,
            branches: GalaxyParameters::MAX.branches,
            spin: GalaxyParameters::MAX.spin,
            size: GalaxyParameters::MIN.size,
        };
        let positions = generate_positions(&params);
        assert!(positions.iter().all(|v| v.is_finite()));
    }
}
