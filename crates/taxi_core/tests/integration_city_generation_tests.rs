use rand::rngs::StdRng;
use rand::SeedableRng;
use taxi_core::city::{generate_city, Archetype, GridLayout};
use taxi_core::config::CityConfig;
use taxi_core::spatial::SurfaceKind;

#[test]
fn grid_lines_are_strictly_increasing_with_bounded_steps() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = GridLayout::generate(7, &mut rng);

        assert_eq!(layout.rows.len(), 7);
        assert_eq!(layout.cols.len(), 7);
        assert_eq!(layout.rows[0], 0);
        assert_eq!(layout.cols[0], 0);
        for lines in [&layout.rows, &layout.cols] {
            for pair in lines.windows(2) {
                let step = pair[1] - pair[0];
                assert!((3..=5).contains(&step), "step {} out of range", step);
            }
        }
    }
}

#[test]
fn every_interior_block_gets_one_structure() {
    let config = CityConfig::default();
    let mut rng = StdRng::seed_from_u64(7);
    let (city, _, _) = generate_city(&config, &mut rng);

    // 6x6 blocks between 7 lines per axis.
    assert_eq!(city.buildings.len(), 36);
}

#[test]
fn rare_archetypes_appear_at_most_once() {
    for seed in 0..50 {
        let config = CityConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let (city, _, _) = generate_city(&config, &mut rng);

        let count = |a: Archetype| city.buildings.iter().filter(|b| b.archetype == a).count();
        assert!(count(Archetype::RoundBlock) <= 1);
        assert!(count(Archetype::Park) <= 1);
    }
}

#[test]
fn parks_block_driving_but_grow_no_lamps() {
    let config = CityConfig::default();
    let mut rng = StdRng::seed_from_u64(11);
    let (city, collision, _) = generate_city(&config, &mut rng);

    assert_eq!(collision.buildings.len(), city.buildings.len());
    for building in city.buildings.iter().filter(|b| b.archetype == Archetype::Park) {
        assert!(
            !city
                .lamps
                .iter()
                .any(|l| building.aabb.contains_point(l.position)),
            "lamp inside a park footprint"
        );
    }
}

#[test]
fn collision_boxes_are_seated_on_the_ground() {
    let config = CityConfig::default();
    let mut rng = StdRng::seed_from_u64(13);
    let (_, collision, _) = generate_city(&config, &mut rng);

    for b in &collision.buildings {
        assert!(b.min.y <= 0.0);
        assert!(b.max.y > 0.0);
    }
}

#[test]
fn bounds_extend_one_cell_beyond_the_outermost_lines() {
    let config = CityConfig::default();
    let mut rng = StdRng::seed_from_u64(17);
    let (city, _, bounds) = generate_city(&config, &mut rng);

    let cw = config.cell_world_width();
    let cd = config.cell_world_depth();
    assert_eq!(bounds.min_x, -cw);
    assert_eq!(bounds.min_z, -cd);
    assert_eq!(bounds.max_x, (city.layout.last_col() as f32 + 2.0) * cw);
    assert_eq!(bounds.max_z, (city.layout.last_row() as f32 + 2.0) * cd);
}

#[test]
fn one_intersection_per_line_crossing() {
    let config = CityConfig::default();
    let mut rng = StdRng::seed_from_u64(19);
    let (city, _, _) = generate_city(&config, &mut rng);

    assert_eq!(city.roads.intersections.len(), 7 * 7);
}

#[test]
fn sidewalks_flank_every_vertical_ribbon() {
    let config = CityConfig::default();
    let mut rng = StdRng::seed_from_u64(23);
    let (city, _, _) = generate_city(&config, &mut rng);

    let roads = city
        .roads
        .surfaces
        .iter()
        .filter(|s| s.kind == SurfaceKind::Road)
        .count();
    let sidewalks = city
        .roads
        .surfaces
        .iter()
        .filter(|s| s.kind == SurfaceKind::Sidewalk)
        .count();
    assert!(roads > 0);
    // Two raised sidewalks per column ribbon.
    assert_eq!(sidewalks, 7 * 2);
}

#[test]
fn same_seed_generates_the_same_city() {
    let config = CityConfig::default();
    let (a, _, _) = generate_city(&config, &mut StdRng::seed_from_u64(99));
    let (b, _, _) = generate_city(&config, &mut StdRng::seed_from_u64(99));

    assert_eq!(a.layout, b.layout);
    assert_eq!(a.buildings.len(), b.buildings.len());
    for (x, y) in a.buildings.iter().zip(&b.buildings) {
        assert_eq!(x.archetype, y.archetype);
        assert_eq!(x.position, y.position);
        assert_eq!(x.height, y.height);
    }
}
