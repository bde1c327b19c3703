//! Random campus generation.

use campusloop_common::BuildingId;
use rand::seq::SliceRandom;
use rand::Rng;

use super::types::{Building, BuildingKind, BuildingStatus, Dimensions, Layout, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub building_count: u32,
    pub half_extent: f64,
    pub emergency_target: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            building_count: 20,
            half_extent: 20.0,
            emergency_target: 7,
        }
    }
}

impl Layout {
    /// Generate `params.building_count` buildings scattered over the square
    /// `(-half_extent, half_extent)`.
    pub fn generate(params: &LayoutParams, generation: u64, rng: &mut impl Rng) -> Self {
        let extent = params.half_extent.abs().max(f64::EPSILON);
        let buildings = (0..params.building_count)
            .map(|i| {
                let height = rng.gen_range(2.0..7.0);
                let dimensions = Dimensions {
                    width: rng.gen_range(1.0..3.0),
                    height,
                    depth: rng.gen_range(1.0..3.0),
                };
                let position = Position {
                    x: rng.gen_range(-extent..extent),
                    y: height / 2.0,
                    z: rng.gen_range(-extent..extent),
                };
                let kinds = BuildingKind::ALL;
                Building {
                    id: BuildingId(i),
                    position,
                    dimensions,
                    name: building_name(i),
                    kind: kinds[i as usize % kinds.len()],
                    status: *BuildingStatus::ALL
                        .choose(rng)
                        .unwrap_or(&BuildingStatus::Active),
                    occupancy: rng.gen_range(0..100),
                }
            })
            .collect();

        let emergency_target =
            (params.emergency_target < params.building_count).then_some(BuildingId(params.emergency_target));

        Self {
            generation,
            buildings,
            emergency_target,
        }
    }
}

/// `Building A-100`, `Building B-101`, ... wrapping the letter after `Z`.
fn building_name(index: u32) -> String {
    let letter = char::from(b'A' + (index % 26) as u8);
    format!("Building {letter}-{}", 100 + index)
}
