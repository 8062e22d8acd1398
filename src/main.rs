//! Interim container demo entry point.
//!
//! Builds one container from a config file, fills it with children scattered
//! around the origin, applies field writes from the command line and prints
//! every child's relative and absolute transform as JSON.
//!
//! # Running
//!
//! ```sh
//! cargo run -- --config container.json --children 4 --seed 7 --set rotation=90 --set alpha=0.5
//! cargo run -- --config scene.ini --section hud --set flipX=true
//! ```

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info};
use serde::Serialize;
use std::path::{Path, PathBuf};

use interimcontainer::container::{
    ChildSpawn, ChildTransform, ChildTransformRecord, ContainerConfig, ContainerError, ContainerHost,
    ContainerId, Field, FieldValue,
};
use interimcontainer::factory::{add_container, with_container};
use interimcontainer::resources::containerstore::ContainerStore;
use interimcontainer::systems::containerprune::prune_despawned_children;

/// Interim transform containers
#[derive(Parser)]
#[command(version, about = "Compose child transforms through a container and print the result.")]
struct Cli {
    /// Container config, JSON (`.json`) or INI (`.ini`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// INI section holding the container config.
    #[arg(long, default_value = "container")]
    section: String,

    /// Number of children to create.
    #[arg(long, default_value_t = 3)]
    children: usize,

    /// Seed for child placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Children are placed within this distance of the container on each axis.
    #[arg(long, default_value_t = 32.0)]
    spread: f32,

    /// Container field write, `field=value`. Applied in order.
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    sets: Vec<String>,
}

#[derive(Serialize)]
struct ChildReport {
    entity: u64,
    relative: ChildTransformRecord,
    absolute: ChildTransform,
}

#[derive(Serialize)]
struct ContainerReport {
    id: u32,
    watch: Vec<&'static str>,
    fields: Vec<(&'static str, FieldValue)>,
    children: Vec<ChildReport>,
}

fn load_config(path: &Path, section: &str) -> Result<ContainerConfig, ContainerError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("ini") => ContainerConfig::load_from_ini(path, section),
        _ => ContainerConfig::load_from_file(path),
    }
}

fn parse_set(raw: &str) -> Result<(Field, FieldValue), ContainerError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| ContainerError::Config(format!("expected FIELD=VALUE, got '{}'", raw)))?;
    let field: Field = name.trim().parse()?;
    let value = FieldValue::parse_for(field, value)?;
    Ok((field, value))
}

fn report(world: &World, id: ContainerId) -> Option<ContainerReport> {
    let container = world.resource::<ContainerStore>().get(id)?;
    let children = container
        .children()
        .iter()
        .filter_map(|&entity| {
            Some(ChildReport {
                entity: entity.to_bits(),
                relative: container.record(entity).ok()?.clone(),
                absolute: ContainerHost::transform(world, entity)?,
            })
        })
        .collect();
    Some(ContainerReport {
        id: id.0,
        watch: container.watch_list().iter().map(Field::name).collect(),
        fields: container
            .watch_list()
            .iter()
            .filter_map(|field| container.get(field).map(|v| (field.name(), v)))
            .collect(),
        children,
    })
}

fn run(cli: &Cli) -> Result<(), ContainerError> {
    let config = match &cli.config {
        Some(path) => load_config(path, &cli.section)?,
        None => ContainerConfig::default(),
    };
    let sets = cli
        .sets
        .iter()
        .map(|raw| parse_set(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mut world = World::new();
    world.insert_resource(ContainerStore::new());

    let id = add_container(&mut world, &[], &config)?;

    let mut rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    for _ in 0..cli.children {
        let x = (rng.f32() * 2.0 - 1.0) * cli.spread;
        let y = (rng.f32() * 2.0 - 1.0) * cli.spread;
        with_container(&mut world, id, |container, world| {
            container.create_child(world, &ChildSpawn::at(x, y))
        })?;
    }

    for (field, value) in sets {
        info!("Setting {} = {}", field, value);
        with_container(&mut world, id, |container, world| {
            container.set(world, field, value)
        })?;
    }

    let mut schedule = Schedule::default();
    schedule.add_systems(prune_despawned_children);
    schedule.run(&mut world);

    let report = report(&world, id).ok_or(ContainerError::UnknownContainer(id))?;
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| ContainerError::Config(format!("Failed to serialize report: {}", e)))?;
    println!("{}", json);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}
