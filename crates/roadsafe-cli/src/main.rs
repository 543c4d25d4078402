use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadsafe_lib::{
    build_graph, load_survey, plan_route, GraphConfig, HazardSource, RouteAlgorithm,
    RouteEndpoint, RouteRequest, SeverityHazard,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Road survey routing utilities")]
struct Cli {
    /// Path to the survey metadata JSON file.
    #[arg(long)]
    survey: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List surveyed nodes with their coordinates and link counts.
    Nodes,
    /// Compute a route between two endpoints.
    Route {
        /// Start: a node id, or "lat,lon" in decimal degrees.
        #[arg(long = "from")]
        from: String,
        /// Destination: a node id, or "lat,lon" in decimal degrees.
        #[arg(long = "to")]
        to: String,
        /// Search algorithm.
        #[arg(long, value_enum, default_value_t = AlgorithmArg::AStar)]
        algorithm: AlgorithmArg,
        /// Hazard penalty multiplier applied to edge weights.
        #[arg(long)]
        penalty: Option<f64>,
        /// Weight edges by the severities recorded on each node's images.
        #[arg(long)]
        severity_hazard: bool,
        /// Emit the plan as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Dijkstra,
    AStar,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Nodes => handle_nodes(&cli.survey),
        Command::Route {
            from,
            to,
            algorithm,
            penalty,
            severity_hazard,
            json,
        } => handle_route(
            &cli.survey,
            &from,
            &to,
            algorithm.into(),
            penalty,
            severity_hazard,
            json,
        ),
    }
}

fn handle_nodes(survey_path: &Path) -> Result<()> {
    let survey = load_survey(survey_path)
        .with_context(|| format!("failed to load survey from {}", survey_path.display()))?;

    println!("Surveyed nodes ({}):", survey.len());
    for (id, node) in &survey.nodes {
        match node.coordinate.decimal() {
            Some(coordinate) => println!(
                "- {} ({:.6}, {:.6}): {} connections, {} images",
                id,
                coordinate.lat,
                coordinate.lon,
                node.connections.len(),
                node.images.len()
            ),
            None => println!(
                "- {} (coordinate unrecorded): {} connections, {} images",
                id,
                node.connections.len(),
                node.images.len()
            ),
        }
    }
    Ok(())
}

fn handle_route(
    survey_path: &Path,
    from: &str,
    to: &str,
    algorithm: RouteAlgorithm,
    penalty: Option<f64>,
    severity_hazard: bool,
    json: bool,
) -> Result<()> {
    let survey = load_survey(survey_path)
        .with_context(|| format!("failed to load survey from {}", survey_path.display()))?;

    let mut config = GraphConfig::default();
    if let Some(penalty) = penalty {
        config.hazard_penalty = penalty;
    }

    let severity_source = SeverityHazard::default();
    let hazard: Option<&dyn HazardSource> =
        severity_hazard.then_some(&severity_source as &dyn HazardSource);

    let graph = build_graph(&survey, &config, hazard);

    let request = RouteRequest {
        start: parse_endpoint(from),
        goal: parse_endpoint(to),
        algorithm,
    };
    let plan = plan_route(&graph, &request).context("route planning failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if plan.unreachable {
        println!("No route exists between {} and {}.", plan.start, plan.goal);
        return Ok(());
    }

    println!("Route ({}): {} -> {}", plan.algorithm, plan.start, plan.goal);
    for id in &plan.steps {
        match graph.node(id).and_then(|node| node.coordinate) {
            Some(coordinate) => {
                println!("- {} ({:.6}, {:.6})", id, coordinate.lat, coordinate.lon)
            }
            None => println!("- {}", id),
        }
    }
    if let Some(distance_m) = plan.distance_m {
        println!("Total weighted distance: {:.1} m", distance_m);
    }

    Ok(())
}

/// A "lat,lon" pair becomes a coordinate endpoint; anything else is
/// treated as a node id.
fn parse_endpoint(input: &str) -> RouteEndpoint {
    if let Some((lat, lon)) = input.split_once(',') {
        if let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
            return RouteEndpoint::coordinate(lat, lon);
        }
    }
    RouteEndpoint::node(input)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_pairs_parse_as_coordinates() {
        let endpoint = parse_endpoint("40.4461, -74.0058");
        assert_eq!(endpoint, RouteEndpoint::coordinate(40.4461, -74.0058));
    }

    #[test]
    fn node_ids_stay_node_ids() {
        assert_eq!(parse_endpoint("h1"), RouteEndpoint::node("h1"));
        // A comma alone does not make a coordinate.
        assert_eq!(
            parse_endpoint("h1,annex"),
            RouteEndpoint::node("h1,annex")
        );
    }
}
