use anyhow::{Result, bail};
use clap::Parser;
use log::{debug, info};
use procgen::{
    AlgorithmType, AreaGenerator, AreaTheme, DungeonMap, GenerationError, ProcedureGenerator,
    TileKind,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about = "Sweep seeds over every theme and check map invariants", long_about = None)]
struct Args {
    /// Master seed the per-map seeds are drawn from
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of map seeds per theme
    #[arg(long, default_value_t = 200)]
    seeds: u32,
    #[arg(long, default_value_t = 60)]
    width: usize,
    #[arg(long, default_value_t = 60)]
    height: usize,
}

fn check_invariants(map: &DungeonMap, replay: &DungeonMap, algorithm: AlgorithmType) -> Vec<String> {
    let mut violations = Vec::new();

    if map.canonical_bytes() != replay.canonical_bytes() {
        violations.push("same seed produced different maps".to_string());
    }
    if map.count_open_tiles() == 0 {
        violations.push("no open tiles".to_string());
    }
    if map.corridors().len() + 1 != map.rooms().len() {
        violations.push(format!(
            "{} corridors for {} rooms",
            map.corridors().len(),
            map.rooms().len()
        ));
    }

    for (index, room) in map.rooms().iter().enumerate() {
        let contained = room.x() >= 0
            && room.y() >= 0
            && room.right() as usize <= map.width()
            && room.bottom() as usize <= map.height();
        if !contained {
            violations.push(format!("room {index} leaves the map: {room:?}"));
        }
        if room.cells().any(|pos| map.tile_at(pos) != TileKind::Floor) {
            violations.push(format!("room {index} is not fully carved"));
        }
        if room.description().is_empty() {
            violations.push(format!("room {index} has no description"));
        }
    }

    for (index, corridor) in map.corridors().iter().enumerate() {
        let four_connected = corridor
            .cells()
            .windows(2)
            .all(|step| step[0].x.abs_diff(step[1].x) + step[0].y.abs_diff(step[1].y) == 1);
        if !four_connected {
            violations.push(format!("{algorithm} corridor {index} skips a cell"));
        }
    }

    violations
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!(
        "Fuzzing {} seeds per theme on {}x{} (master seed {})...",
        args.seeds, args.width, args.height, args.seed
    );
    let areas = AreaGenerator::new();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut failures = 0_usize;
    let mut empty = 0_usize;

    for _ in 0..args.seeds {
        let map_seed = rng.next_u64();
        for theme in AreaTheme::ALL {
            let algorithm = areas.template(theme).algorithm();
            let map = match areas.generate_area(theme, args.width, args.height, map_seed) {
                Ok(map) => map,
                Err(GenerationError::EmptyGeneration { .. }) => {
                    debug!("{theme} seed {map_seed} collapsed to an empty map");
                    empty += 1;
                    continue;
                }
                Err(error) => bail!("{theme} seed {map_seed}: {error}"),
            };
            let replay = areas.generate_area(theme, args.width, args.height, map_seed)?;

            for violation in check_invariants(&map, &replay, algorithm) {
                eprintln!("Invariant failed: {theme} seed {map_seed}: {violation}");
                failures += 1;
            }

            let encounter = ProcedureGenerator::generate_encounter(&map, map_seed);
            let quest = ProcedureGenerator::generate_quest(&map, map_seed);
            if !(0.0..=1.0).contains(&encounter.difficulty) || !(1..=10).contains(&quest.difficulty)
            {
                eprintln!("Invariant failed: {theme} seed {map_seed}: procedure out of range");
                failures += 1;
            }
        }
    }

    info!("{empty} generations collapsed to empty caves");
    if failures > 0 {
        bail!("{failures} invariant violations");
    }
    println!("Fuzzing completed successfully.");
    Ok(())
}
