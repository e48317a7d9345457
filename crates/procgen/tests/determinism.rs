use std::thread;

use procgen::{
    AreaGenerator, AreaTheme, BspDungeonGenerator, CellularAutomataDungeonGenerator,
    DungeonGenerator, SimpleRandomDungeonGenerator,
};
use xxhash_rust::xxh3::xxh3_64;

#[test]
fn bsp_same_seed_yields_identical_maps() {
    let generator = BspDungeonGenerator::new(6, AreaTheme::Dungeon);
    let first = generator.generate(50, 50, 42).expect("50x50 fits bsp");
    let second = generator.generate(50, 50, 42).expect("50x50 fits bsp");

    assert_eq!(first.rooms().len(), second.rooms().len());
    assert_eq!(first.tiles(), second.tiles());
    assert_eq!(first, second);
}

#[test]
fn every_generator_replays_byte_identical_output() {
    let generators: Vec<Box<dyn DungeonGenerator>> = vec![
        Box::new(BspDungeonGenerator::default()),
        Box::new(CellularAutomataDungeonGenerator::default()),
        Box::new(SimpleRandomDungeonGenerator::default()),
    ];

    for generator in &generators {
        for seed in [0_u64, 1, 42, 9_001, u64::MAX] {
            let first = generator.generate(64, 48, seed).expect("64x48 fits every generator");
            let second = generator.generate(64, 48, seed).expect("64x48 fits every generator");
            assert_eq!(
                first.canonical_bytes(),
                second.canonical_bytes(),
                "{} seed={seed}",
                generator.algorithm()
            );
        }
    }
}

#[test]
fn fingerprint_hashes_the_canonical_bytes() {
    let map = BspDungeonGenerator::default().generate(40, 40, 3).expect("valid");
    assert_eq!(map.fingerprint(), xxh3_64(&map.canonical_bytes()));
}

#[test]
fn decorated_areas_replay_descriptions_and_contents() {
    let areas = AreaGenerator::new();
    for theme in AreaTheme::ALL {
        let first = areas.generate_area(theme, 60, 60, 1_234).expect("60x60 fits every theme");
        let second = areas.generate_area(theme, 60, 60, 1_234).expect("60x60 fits every theme");
        assert_eq!(first, second, "{theme}");
    }
}

#[test]
fn parallel_generation_matches_sequential_runs() {
    let sequential: Vec<u64> = AreaTheme::ALL
        .into_iter()
        .map(|theme| {
            AreaGenerator::new()
                .generate_area(theme, 60, 60, 77)
                .expect("60x60 fits every theme")
                .fingerprint()
        })
        .collect();

    let handles: Vec<_> = AreaTheme::ALL
        .into_iter()
        .map(|theme| {
            thread::spawn(move || {
                AreaGenerator::new()
                    .generate_area(theme, 60, 60, 77)
                    .expect("60x60 fits every theme")
                    .fingerprint()
            })
        })
        .collect();
    let parallel: Vec<u64> =
        handles.into_iter().map(|handle| handle.join().expect("generation thread")).collect();

    assert_eq!(sequential, parallel);
}

#[test]
fn shared_registry_is_usable_across_threads() {
    let areas = AreaGenerator::new();
    let expected = areas.generate_area(AreaTheme::Cave, 50, 50, 5).expect("valid").fingerprint();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    areas.generate_area(AreaTheme::Cave, 50, 50, 5).expect("valid").fingerprint()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("generation thread"), expected);
        }
    });
}
