use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use procgen::{
    AreaGenerator, AreaTheme, DungeonMap, Encounter, GenerationRequest, ProcedureGenerator, Quest,
    RoomContents, RoomType,
};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about = "Generate a themed area and print a JSON summary", long_about = None)]
struct Args {
    /// Area theme, e.g. `cave` or `underground_city`
    #[arg(short, long)]
    theme: Option<AreaTheme>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(short, long)]
    seed: Option<u64>,
    /// TOML generation request; flags override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Also roll an encounter with this seed
    #[arg(long)]
    encounter_seed: Option<u64>,
    /// Also roll a quest with this seed
    #[arg(long)]
    quest_seed: Option<u64>,
}

#[derive(Serialize)]
struct RoomSummary<'a> {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    room_type: RoomType,
    contents: RoomContents,
    description: &'a str,
}

#[derive(Serialize)]
struct AreaSummary<'a> {
    theme: AreaTheme,
    width: usize,
    height: usize,
    seed: u64,
    fingerprint: String,
    open_tiles: usize,
    corridors: usize,
    rooms: Vec<RoomSummary<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    encounter: Option<Encounter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quest: Option<Quest>,
}

impl<'a> AreaSummary<'a> {
    fn new(map: &'a DungeonMap) -> Self {
        let rooms = map
            .rooms()
            .iter()
            .map(|room| RoomSummary {
                x: room.x(),
                y: room.y(),
                width: room.width(),
                height: room.height(),
                room_type: room.room_type(),
                contents: room.contents(),
                description: room.description(),
            })
            .collect();
        Self {
            theme: map.theme(),
            width: map.width(),
            height: map.height(),
            seed: map.seed(),
            fingerprint: format!("{:016x}", map.fingerprint()),
            open_tiles: map.count_open_tiles(),
            corridors: map.corridors().len(),
            rooms,
            encounter: None,
            quest: None,
        }
    }
}

fn load_request(args: &Args) -> Result<GenerationRequest> {
    let mut request = match &args.config {
        Some(path) => GenerationRequest::from_toml_file(path)
            .with_context(|| format!("Failed to load generation request: {}", path.display()))?,
        None => GenerationRequest::default(),
    };
    if let Some(theme) = args.theme {
        request.theme = theme;
    }
    if let Some(width) = args.width {
        request.width = width;
    }
    if let Some(height) = args.height {
        request.height = height;
    }
    if let Some(seed) = args.seed {
        request.seed = seed;
    }
    Ok(request)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let request = load_request(&args)?;

    info!(
        "generating {} area {}x{} with seed {}",
        request.theme, request.width, request.height, request.seed
    );
    let areas = AreaGenerator::new();
    let map = request.run(&areas).with_context(|| {
        format!("Generation failed for {} {}x{}", request.theme, request.width, request.height)
    })?;

    let mut summary = AreaSummary::new(&map);
    summary.encounter =
        args.encounter_seed.map(|seed| ProcedureGenerator::generate_encounter(&map, seed));
    summary.quest = args.quest_seed.map(|seed| ProcedureGenerator::generate_quest(&map, seed));

    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
    println!("{json}");
    Ok(())
}
