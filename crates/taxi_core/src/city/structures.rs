//! Structure placement: assigns an archetype to each grid block via
//! capped rejection sampling and derives the world footprint and
//! bounding box that feed the collision index.

use glam::Vec3;
use rand::Rng;

use crate::config::CityConfig;
use crate::spatial::Aabb;

use super::grid::GridLayout;

/// Flat roof slab thickness added on top of a block tower.
const ROOF_HEIGHT: f32 = 3.0;
/// Spire on top of a classic tiered tower.
const SPIRE_HEIGHT: f32 = 15.0;
/// Tallest park decor (tree trunk plus both foliage cones).
const PARK_TREE_HEIGHT: f32 = 12.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    Block,
    Classic,
    RoundBlock,
    Park,
}

impl Archetype {
    const ALL: [Archetype; 4] = [
        Archetype::Block,
        Archetype::Classic,
        Archetype::RoundBlock,
        Archetype::Park,
    ];

    /// Cumulative probability table over [Block, Classic, RoundBlock, Park].
    const CUMULATIVE: [f64; 5] = [0.0, 0.7, 0.8, 0.9, 1.0];

    /// Per-grid instance caps; `None` is uncapped. Block must stay
    /// uncapped so the rejection loop below always terminates.
    const CAPS: [Option<u32>; 4] = [None, None, Some(1), Some(1)];
}

/// One placed structure. Immutable after generation; buildings persist
/// for the whole session.
#[derive(Debug, Clone)]
pub struct Building {
    pub archetype: Archetype,
    /// Footprint center at ground level.
    pub position: Vec3,
    /// Footprint in grid units.
    pub width: f32,
    pub depth: f32,
    /// Total assembled height in world units, bounding box included.
    pub height: f32,
    pub aabb: Aabb,
}

/// Candidate site for street furniture, recorded for every non-park
/// structure. Consumed by the host's lamp placement, not by the core.
#[derive(Debug, Clone)]
pub struct LampSite {
    pub position: Vec3,
    /// Footprint in world units.
    pub width: f32,
    pub depth: f32,
}

/// Picks an archetype by sampling the cumulative table, re-drawing while
/// the chosen archetype is at its cap. Terminates because Block (weight
/// 0.7) is never capped.
fn sample_archetype<R: Rng>(counts: &[u32; 4], rng: &mut R) -> Archetype {
    debug_assert!(
        Archetype::CAPS.iter().any(|cap| cap.is_none()),
        "at least one archetype must be uncapped"
    );
    loop {
        let roll: f64 = rng.gen();
        let mut selected = 0;
        for k in 0..Archetype::CUMULATIVE.len() - 1 {
            if roll >= Archetype::CUMULATIVE[k] && roll <= Archetype::CUMULATIVE[k + 1] {
                selected = k;
                break;
            }
        }
        match Archetype::CAPS[selected] {
            Some(cap) if counts[selected] >= cap => continue,
            _ => return Archetype::ALL[selected],
        }
    }
}

/// Assembled extents of one structure: horizontal half sizes and total
/// height, from which the bounding box is derived.
struct Extents {
    half_x: f32,
    half_z: f32,
    height: f32,
}

fn block_extents<R: Rng>(fw: f32, fd: f32, config: &CityConfig, rng: &mut R) -> Extents {
    let height =
        rng.gen_range(config.min_building_height..config.max_building_height);
    Extents {
        half_x: fw * 0.9 / 2.0,
        half_z: fd * 0.9 / 2.0,
        height: height + ROOF_HEIGHT,
    }
}

fn classic_extents<R: Rng>(fw: f32, fd: f32, rng: &mut R) -> Extents {
    // Tiered setback tower: each level shrinks to 80% of the one below.
    let levels = rng.gen_range(2..=4);
    let mut height = 0.0;
    for _ in 0..levels {
        height += rng.gen_range(20.0..50.0);
    }
    Extents {
        half_x: fw * 0.9 / 2.0,
        half_z: fd * 0.9 / 2.0,
        height: height + SPIRE_HEIGHT,
    }
}

fn round_block_extents<R: Rng>(fw: f32, fd: f32, config: &CityConfig, rng: &mut R) -> Extents {
    let radius = fw.min(fd) * 0.4;
    let height =
        rng.gen_range(config.min_building_height..config.max_building_height);
    // The base flares to 1.05x the radius; the dome adds 0.8x.
    Extents {
        half_x: radius * 1.05,
        half_z: radius * 1.05,
        height: height + radius * 0.8,
    }
}

fn park_extents(fw: f32, fd: f32) -> Extents {
    Extents {
        half_x: fw * 0.95 / 2.0,
        half_z: fd * 0.95 / 2.0,
        height: PARK_TREE_HEIGHT,
    }
}

/// Places one structure per interior block of the `(N-1)x(N-1)` grid.
/// Returns the buildings, their boxes (the collision index input) and
/// the lamp candidate list.
pub fn place_structures<R: Rng>(
    layout: &GridLayout,
    config: &CityConfig,
    rng: &mut R,
) -> (Vec<Building>, Vec<Aabb>, Vec<LampSite>) {
    let n = layout.cols.len();
    let mut buildings = Vec::with_capacity(n.saturating_sub(1).pow(2));
    let mut boxes = Vec::with_capacity(buildings.capacity());
    let mut lamps = Vec::new();
    let mut counts = [0u32; 4];

    for i in 0..n.saturating_sub(1) {
        for j in 0..n.saturating_sub(1) {
            let archetype = sample_archetype(&counts, rng);
            counts[Archetype::ALL.iter().position(|a| *a == archetype).unwrap()] += 1;

            // Interior cells of the block, street lines excluded.
            let x1 = layout.cols[i] + 1;
            let z1 = layout.rows[j] + 1;
            let x2 = layout.cols[i + 1] - 1;
            let z2 = layout.rows[j + 1] - 1;

            let width = config.cell_width * (x2 - x1 + 1) as f32;
            let depth = config.cell_depth * (z2 - z1 + 1) as f32;
            let fw = width * config.world_scale;
            let fd = depth * config.world_scale;

            let extents = match archetype {
                Archetype::Block => block_extents(fw, fd, config, rng),
                Archetype::Classic => classic_extents(fw, fd, rng),
                Archetype::RoundBlock => round_block_extents(fw, fd, config, rng),
                Archetype::Park => park_extents(fw, fd),
            };

            let position = Vec3::new(
                x1 as f32 * config.cell_width * config.world_scale + fw / 2.0,
                0.0,
                z1 as f32 * config.cell_depth * config.world_scale + fd / 2.0,
            );
            let aabb = Aabb::new(
                Vec3::new(position.x - extents.half_x, 0.0, position.z - extents.half_z),
                Vec3::new(
                    position.x + extents.half_x,
                    extents.height,
                    position.z + extents.half_z,
                ),
            );

            if archetype != Archetype::Park {
                lamps.push(LampSite {
                    position,
                    width: fw,
                    depth: fd,
                });
            }

            boxes.push(aabb);
            buildings.push(Building {
                archetype,
                position,
                width,
                depth,
                height: extents.height,
                aabb,
            });
        }
    }

    (buildings, boxes, lamps)
}
