use procgen::{AreaGenerator, AreaTheme, RoomType, TileKind};

#[test]
fn every_theme_describes_every_room() {
    let areas = AreaGenerator::new();
    for theme in AreaTheme::ALL {
        for seed in [1_u64, 42, 777] {
            let map = areas.generate_area(theme, 60, 60, seed).expect("60x60 fits every theme");
            assert_eq!(map.theme(), theme);
            assert!(!map.rooms().is_empty(), "{theme} seed={seed}");
            for room in map.rooms() {
                assert!(!room.description().is_empty(), "{theme} seed={seed}: {room:?}");
            }
        }
    }
}

#[test]
fn decoration_keeps_raw_generator_geometry() {
    let areas = AreaGenerator::new();
    for theme in AreaTheme::ALL {
        let template = areas.template(theme);
        let raw = template.generator().generate(theme, 56, 44, 9).expect("valid");
        let decorated = areas.generate_area(theme, 56, 44, 9).expect("valid");

        assert_eq!(raw.tiles(), decorated.tiles(), "{theme}");
        assert_eq!(raw.corridors(), decorated.corridors(), "{theme}");
        assert_eq!(raw.rooms().len(), decorated.rooms().len(), "{theme}");
        for (before, after) in raw.rooms().iter().zip(decorated.rooms()) {
            assert_eq!(before.center(), after.center());
            assert_eq!(before.area(), after.area());
        }
    }
}

#[test]
fn spawn_and_boss_survive_decoration() {
    let map = AreaGenerator::new().generate_area(AreaTheme::Dungeon, 60, 60, 3).expect("valid");
    let rooms = map.rooms();

    assert_eq!(rooms[0].room_type(), RoomType::Spawn);
    assert_eq!(rooms.iter().filter(|room| room.room_type() == RoomType::Spawn).count(), 1);
    assert_eq!(rooms.iter().filter(|room| room.room_type() == RoomType::Boss).count(), 1);
    for room in rooms {
        let contents = room.contents();
        match room.room_type() {
            RoomType::Treasure => assert!(contents.has_treasure),
            RoomType::Trap => assert!(contents.has_trap && !contents.has_treasure),
            RoomType::Safe => assert_eq!(contents.monster_count, 0),
            RoomType::Boss => assert!((2..=4).contains(&contents.monster_count)),
            _ => {}
        }
    }
}

#[test]
fn descriptions_carry_room_dimensions() {
    let map = AreaGenerator::new().generate_area(AreaTheme::Forest, 60, 60, 12).expect("valid");
    for room in map.rooms() {
        let size = format!("{}x{}", room.width(), room.height());
        assert!(room.description().contains(&size), "{}", room.description());
        assert!(room.description().starts_with("A clearing in the woods"));
    }
}

#[test]
fn themes_with_high_treasure_density_hide_more_treasure() {
    let areas = AreaGenerator::new();
    let treasure_rooms = |theme| {
        (0..40_u64)
            .map(|seed| {
                let map = areas.generate_area(theme, 60, 60, seed).expect("valid");
                map.rooms().iter().filter(|room| room.contents().has_treasure).count()
            })
            .sum::<usize>()
    };
    assert!(treasure_rooms(AreaTheme::Temple) > treasure_rooms(AreaTheme::Sewers));
}

#[test]
fn decorated_maps_still_have_open_ground() {
    let areas = AreaGenerator::new();
    for theme in AreaTheme::ALL {
        let map = areas.generate_area(theme, 48, 48, 2_024).expect("48x48 fits every theme");
        assert!(map.count_open_tiles() > 0);
        assert_eq!(map.get_tile(-1, -1), TileKind::Wall);
    }
}
