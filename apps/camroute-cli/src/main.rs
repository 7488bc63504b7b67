use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use camroute_common::{CameraPose, NodeId};
use camroute_graph::{GraphConfig, WaypointGraph, load_graph};
use camroute_traverse::{CameraDirector, FlightEvent, LookMode, TraverseConfig};

#[derive(Parser)]
#[command(name = "camroute-cli", about = "CLI tool for camroute waypoint graphs")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print workspace crate info
    Info,
    /// Load a graph file and report validation findings
    Validate {
        /// Path to the graph YAML file
        graph: PathBuf,
        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Compute the shortest route between two named nodes
    Route {
        /// Path to the graph YAML file
        graph: PathBuf,
        /// Source node id
        #[arg(short, long)]
        from: String,
        /// Destination node id
        #[arg(short, long)]
        to: String,
    },
    /// Simulate flying the camera along a route, printing each tick
    Fly {
        /// Path to the graph YAML file
        graph: PathBuf,
        /// Source node id
        #[arg(short, long)]
        from: String,
        /// Destination node id
        #[arg(short, long)]
        to: String,
        /// Cruise speed in world units per second
        #[arg(long, default_value = "5.0")]
        speed: f32,
        /// Simulation ticks per second
        #[arg(long, default_value = "30")]
        tick_rate: u32,
        /// Final look-at point as "x,y,z"; defaults to looking ahead
        #[arg(long)]
        target: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("camroute-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", camroute_common::crate_info());
            println!("graph: {}", camroute_graph::crate_info());
            println!("traverse: {}", camroute_traverse::crate_info());
        }
        Commands::Validate { graph, json } => {
            let graph = load(&graph)?;
            let report = graph.validate();
            report.log();
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{} nodes, {} edges",
                    graph.node_count(),
                    edge_count(&graph)
                );
                if report.is_clean() {
                    println!("graph is clean");
                } else {
                    print!("{report}");
                }
            }
        }
        Commands::Route { graph, from, to } => {
            let graph = load(&graph)?;
            let route = graph.route(&NodeId::new(from), &NodeId::new(to))?;
            println!(
                "route: {} hop(s), length {:.2}",
                route.len(),
                route.length()
            );
            let prefixes = route.prefix_lengths();
            for (hop, dist) in route.hops().iter().zip(prefixes) {
                let p = hop.position;
                println!(
                    "  {:<16} ({:.2}, {:.2}, {:.2})  +{:.2}",
                    hop.node, p.x, p.y, p.z, dist
                );
            }
        }
        Commands::Fly {
            graph,
            from,
            to,
            speed,
            tick_rate,
            target,
        } => {
            anyhow::ensure!(speed > 0.0, "speed must be positive");
            anyhow::ensure!(tick_rate > 0, "tick rate must be positive");

            let graph = load(&graph)?;
            let route = graph.route(&NodeId::new(from), &NodeId::new(to))?;

            let look = match target {
                Some(text) => LookMode::FinalTarget(parse_point(&text)?),
                None => LookMode::NextWaypoint,
            };
            let config = TraverseConfig {
                speed,
                look,
                ..TraverseConfig::default()
            };

            let waypoints = route.positions();
            let start = waypoints.first().copied().unwrap_or(Vec3::ZERO);
            let mut director = CameraDirector::new(CameraPose::new(start, start + Vec3::Z));
            let id = director.request(&waypoints, &config);
            tracing::info!(request = %id.0, hops = route.len(), "flight started");

            let dt = 1.0 / tick_rate as f32;
            let mut elapsed = 0.0;
            while director.is_flying() {
                let events = director.tick(dt);
                elapsed += dt;
                let pose = director.pose();
                println!(
                    "t={:>6.2} pos=({:7.2}, {:7.2}, {:7.2}) look=({:7.2}, {:7.2}, {:7.2})",
                    elapsed,
                    pose.position.x,
                    pose.position.y,
                    pose.position.z,
                    pose.target.x,
                    pose.target.y,
                    pose.target.z
                );
                if events
                    .iter()
                    .any(|e| matches!(e, FlightEvent::Completed { .. }))
                {
                    break;
                }
            }
            println!(
                "landed after {:.2}s simulated ({} hop(s), length {:.2})",
                elapsed,
                route.len(),
                route.length()
            );
        }
    }

    Ok(())
}

fn load(path: &Path) -> anyhow::Result<WaypointGraph> {
    load_graph(path).with_context(|| format!("loading graph from {}", path.display()))
}

fn edge_count(graph: &WaypointGraph) -> usize {
    GraphConfig::from_graph(graph)
        .nodes
        .iter()
        .map(|n| n.neighbors.len())
        .sum()
}

fn parse_point(text: &str) -> anyhow::Result<Vec3> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    anyhow::ensure!(parts.len() == 3, "expected \"x,y,z\", got {text:?}");
    let mut coords = [0.0f32; 3];
    for (slot, part) in coords.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .with_context(|| format!("bad coordinate {part:?}"))?;
    }
    Ok(Vec3::from_array(coords))
}
