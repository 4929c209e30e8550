//! Road network: one long ribbon per street line, cross streets between
//! adjacent column lines, sidewalks flanking every ribbon, and crosswalk
//! stripes at each intersection. Road and sidewalk slabs are recorded as
//! surfaces for ground probing; only roads count as drivable.

use glam::Vec3;

use crate::config::CityConfig;
use crate::spatial::{Aabb, Surface, SurfaceKind};

use super::grid::GridLayout;

/// Road slab thickness; the drivable top sits at half of it.
const ROAD_THICKNESS: f32 = 0.3;
/// Sidewalk slab thickness, raised slightly above the road.
const SIDEWALK_THICKNESS: f32 = 0.5;
const SIDEWALK_RAISE: f32 = 0.1;
pub const SIDEWALK_WIDTH: f32 = 3.0;
/// Crosswalk stripe count per intersection.
const CROSSWALK_STRIPES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadAxis {
    /// Runs along +Z (a column line).
    Vertical,
    /// Runs along +X (a row line / cross street).
    Horizontal,
}

/// One drivable ribbon or cross-street segment.
#[derive(Debug, Clone)]
pub struct RoadSegment {
    pub axis: RoadAxis,
    pub center: Vec3,
    pub length: f32,
    pub width: f32,
}

/// Painted lane markings, kept as records for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkingKind {
    CenterLine,
    EdgeLine,
    CrosswalkStripe,
}

#[derive(Debug, Clone)]
pub struct RoadMarking {
    pub kind: MarkingKind,
    pub center: Vec3,
    pub size: Vec3,
}

#[derive(Debug, Default, Clone)]
pub struct RoadNetwork {
    /// Ground-probe surfaces: road and sidewalk slabs.
    pub surfaces: Vec<Surface>,
    pub segments: Vec<RoadSegment>,
    pub markings: Vec<RoadMarking>,
    /// One entry per (col, row) street crossing; traffic lights and
    /// crosswalks are anchored here.
    pub intersections: Vec<Vec3>,
}

fn slab(center: Vec3, half: Vec3, kind: SurfaceKind) -> Surface {
    Surface {
        aabb: Aabb::from_center_half_extents(center, half),
        kind,
    }
}

/// Builds the full road network for a grid layout.
pub fn build_roads(layout: &GridLayout, config: &CityConfig) -> RoadNetwork {
    let cw = config.cell_world_width();
    let cd = config.cell_world_depth();
    let last_row = layout.last_row() as f32;
    let mut net = RoadNetwork::default();

    // Column ribbons spanning the full generated depth.
    for &col in &layout.cols {
        let length = cd * (last_row + 1.0);
        let width = cw;
        let center = Vec3::new(col as f32 * cw + width / 2.0, 0.0, length / 2.0);

        net.surfaces.push(slab(
            center,
            Vec3::new(width / 2.0, ROAD_THICKNESS / 2.0, length / 2.0),
            SurfaceKind::Road,
        ));
        net.segments.push(RoadSegment {
            axis: RoadAxis::Vertical,
            center,
            length,
            width,
        });

        net.markings.push(RoadMarking {
            kind: MarkingKind::CenterLine,
            center: Vec3::new(center.x, 0.2, center.z),
            size: Vec3::new(0.3, 0.05, length),
        });
        for side in [-1.0, 1.0] {
            net.markings.push(RoadMarking {
                kind: MarkingKind::EdgeLine,
                center: Vec3::new(center.x + side * (width / 2.0 - 1.0), 0.2, center.z),
                size: Vec3::new(0.2, 0.05, length),
            });
            net.surfaces.push(slab(
                Vec3::new(
                    center.x + side * (width / 2.0 + SIDEWALK_WIDTH / 2.0),
                    SIDEWALK_RAISE,
                    center.z,
                ),
                Vec3::new(SIDEWALK_WIDTH / 2.0, SIDEWALK_THICKNESS / 2.0, length / 2.0),
                SurfaceKind::Sidewalk,
            ));
        }
    }

    // Cross streets between adjacent column lines, one per row line.
    for &row in &layout.rows {
        for pair in layout.cols.windows(2) {
            let gap_cells = pair[1] - pair[0] - 1;
            if gap_cells <= 0 {
                // Adjacent blocks touch; nothing to pave.
                continue;
            }
            let length = cw * gap_cells as f32;
            let width = cd;
            let center = Vec3::new(
                length / 2.0 + cw * (pair[0] + 1) as f32,
                0.0,
                row as f32 * cd + width / 2.0,
            );

            net.surfaces.push(slab(
                center,
                Vec3::new(length / 2.0, ROAD_THICKNESS / 2.0, width / 2.0),
                SurfaceKind::Road,
            ));
            net.segments.push(RoadSegment {
                axis: RoadAxis::Horizontal,
                center,
                length,
                width,
            });
            net.markings.push(RoadMarking {
                kind: MarkingKind::CenterLine,
                center: Vec3::new(center.x, 0.2, center.z),
                size: Vec3::new(length, 0.05, 0.3),
            });
        }
    }

    // Crosswalk stripes at every street crossing.
    for &col in &layout.cols {
        for &row in &layout.rows {
            let crossing = Vec3::new(
                col as f32 * cw + cw / 2.0,
                0.0,
                row as f32 * cd + cd / 2.0,
            );
            net.intersections.push(crossing);
            for k in 0..CROSSWALK_STRIPES {
                net.markings.push(RoadMarking {
                    kind: MarkingKind::CrosswalkStripe,
                    center: Vec3::new(
                        crossing.x,
                        0.18,
                        crossing.z - cd * 0.3 + k as f32 * 2.0,
                    ),
                    size: Vec3::new(cw * 0.8, 0.06, 1.0),
                });
            }
        }
    }

    net
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_layout() -> GridLayout {
        GridLayout {
            rows: vec![0, 3, 7],
            cols: vec![0, 4, 8],
        }
    }

    #[test]
    fn emits_one_ribbon_per_column_line() {
        let net = build_roads(&fixed_layout(), &CityConfig::default());
        let vertical = net
            .segments
            .iter()
            .filter(|s| s.axis == RoadAxis::Vertical)
            .count();
        assert_eq!(vertical, 3);
    }

    #[test]
    fn cross_streets_fill_every_positive_gap() {
        let net = build_roads(&fixed_layout(), &CityConfig::default());
        // 3 row lines x 2 column gaps, both gaps positive.
        let horizontal = net
            .segments
            .iter()
            .filter(|s| s.axis == RoadAxis::Horizontal)
            .count();
        assert_eq!(horizontal, 6);
    }

    #[test]
    fn touching_blocks_get_no_cross_street() {
        let layout = GridLayout {
            rows: vec![0, 3],
            cols: vec![0, 1],
        };
        let net = build_roads(&layout, &CityConfig::default());
        assert!(net
            .segments
            .iter()
            .all(|s| s.axis == RoadAxis::Vertical));
    }

    #[test]
    fn sidewalks_are_walkable_but_not_road() {
        let net = build_roads(&fixed_layout(), &CityConfig::default());
        let sidewalks = net
            .surfaces
            .iter()
            .filter(|s| s.kind == SurfaceKind::Sidewalk)
            .count();
        // Two per column ribbon.
        assert_eq!(sidewalks, 6);
    }

    #[test]
    fn every_crossing_gets_five_stripes() {
        let net = build_roads(&fixed_layout(), &CityConfig::default());
        assert_eq!(net.intersections.len(), 9);
        let stripes = net
            .markings
            .iter()
            .filter(|m| m.kind == MarkingKind::CrosswalkStripe)
            .count();
        assert_eq!(stripes, 9 * 5);
    }
}
