//! Procedural city generation. Runs once, synchronously, before the
//! tick loop starts: grid layout, structure placement, road network,
//! and the derived collision index and map bounds.

pub mod grid;
pub mod roads;
pub mod structures;

use bevy_ecs::prelude::Resource;
use glam::Vec3;
use rand::Rng;

use crate::config::CityConfig;
use crate::spatial::{Aabb, CollisionIndex, Surface, SurfaceKind};

pub use grid::GridLayout;
pub use roads::{RoadNetwork, RoadSegment};
pub use structures::{Archetype, Building, LampSite};

/// Ground plane top height; everything off-road rests here.
const GROUND_PLANE_Y: f32 = -0.5;

/// Playable world extent, derived from the outermost grid line plus a
/// one-cell margin. Computed once after generation, read-only afterward.
#[derive(Debug, Clone, Copy, Resource)]
pub struct MapBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl MapBounds {
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min_x + self.max_x) / 2.0,
            0.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }
}

/// Everything generation produces. The collision index and bounds are
/// also inserted as standalone resources; the rest is kept for the
/// renderer and spawn logic.
#[derive(Debug, Clone, Resource)]
pub struct CityModel {
    pub layout: GridLayout,
    pub buildings: Vec<Building>,
    pub roads: RoadNetwork,
    pub lamps: Vec<LampSite>,
}

/// One-shot city generation; deterministic given the RNG state.
pub fn generate_city<R: Rng>(
    config: &CityConfig,
    rng: &mut R,
) -> (CityModel, CollisionIndex, MapBounds) {
    let layout = GridLayout::generate(config.grid_size, rng);
    log::debug!("grid rows {:?} cols {:?}", layout.rows, layout.cols);

    let (buildings, boxes, lamps) = structures::place_structures(&layout, config, rng);
    let roads = roads::build_roads(&layout, config);

    let cw = config.cell_world_width();
    let cd = config.cell_world_depth();
    let last_col = layout.last_col() as f32;
    let last_row = layout.last_row() as f32;

    // Base ground plane under the whole city, one cell beyond the grid.
    let ground_width = (last_col + 2.0) * cw;
    let ground_depth = (last_row + 2.0) * cd;
    let ground = Surface {
        aabb: Aabb::new(
            Vec3::new(-cw, GROUND_PLANE_Y, -cd),
            Vec3::new(ground_width - cw, GROUND_PLANE_Y, ground_depth - cd),
        ),
        kind: SurfaceKind::Ground,
    };

    let mut surfaces = vec![ground];
    surfaces.extend(roads.surfaces.iter().copied());

    let collision = CollisionIndex {
        buildings: boxes,
        surfaces,
    };
    let bounds = MapBounds {
        min_x: -cw,
        max_x: (last_col + 2.0) * cw,
        min_z: -cd,
        max_z: (last_row + 2.0) * cd,
    };

    log::info!(
        "generated city: {} buildings, {} road segments, {} intersections",
        buildings.len(),
        roads.segments.len(),
        roads.intersections.len()
    );

    (
        CityModel {
            layout,
            buildings,
            roads,
            lamps,
        },
        collision,
        bounds,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn bounds_enclose_every_building_and_road() {
        let config = CityConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let (city, collision, bounds) = generate_city(&config, &mut rng);

        for b in &city.buildings {
            assert!(b.aabb.min.x >= bounds.min_x && b.aabb.max.x <= bounds.max_x);
            assert!(b.aabb.min.z >= bounds.min_z && b.aabb.max.z <= bounds.max_z);
        }
        assert!(!collision.surfaces.is_empty());
        assert!(collision.buildings.len() == city.buildings.len());
    }

    #[test]
    fn roads_are_probed_as_ground() {
        let config = CityConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        let (city, collision, _) = generate_city(&config, &mut rng);

        let road = &city.roads.segments[0];
        let hit = collision
            .project_to_ground(road.center + Vec3::new(0.0, 8.0, 0.0))
            .expect("road under probe");
        assert_eq!(hit.kind, SurfaceKind::Road);
    }

    #[test]
    fn open_ground_falls_back_to_the_base_plane() {
        let config = CityConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        let (_, collision, bounds) = generate_city(&config, &mut rng);

        // A corner outside the outermost street line but inside bounds.
        let corner = Vec3::new(bounds.min_x + 1.0, 8.0, bounds.min_z + 1.0);
        let hit = collision.project_to_ground(corner).expect("ground plane");
        assert_eq!(hit.kind, SurfaceKind::Ground);
        assert_eq!(hit.height, GROUND_PLANE_Y);
    }
}
