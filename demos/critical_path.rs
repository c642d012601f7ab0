use condense::{infra::dataset::GraphDescription, infra::export::condensation_dot, pipeline::Pipeline};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// Build tasks with durations on the dependency edges. Linking and codegen wait
// on each other, so they end up in the same component.
const PROJECT: &str = r#"{
    "directed": true,
    "n": 6,
    "edges": [
        { "u": 0, "v": 1, "w": 3 },
        { "u": 0, "v": 2, "w": 2 },
        { "u": 1, "v": 3, "w": 4 },
        { "u": 2, "v": 3, "w": 1 },
        { "u": 3, "v": 4, "w": 2 },
        { "u": 4, "v": 3 },
        { "u": 4, "v": 5, "w": 6 }
    ],
    "source": 0
}"#;

const NAMES: [&str; 6] = ["fetch", "configure", "generate", "codegen", "link", "package"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_env("CONDENSE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("condense=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();

    let description = GraphDescription::from_json(PROJECT)?;
    let graph = description.to_graph()?;
    let analysis = Pipeline::on(&graph).run(description.source)?;

    let components = analysis.components();
    let name_of = |component: usize| {
        components
            .get(component)
            .unwrap_or_default()
            .iter()
            .map(|&v| NAMES[v])
            .collect::<Vec<_>>()
            .join("+")
    };

    let order = analysis
        .order()
        .iter()
        .map(|&component| name_of(component))
        .collect::<Vec<_>>()
        .join(" -> ");
    println!("schedule: {order}");

    let critical = analysis.critical();
    let path = critical
        .path()
        .iter()
        .map(|&component| name_of(component))
        .collect::<Vec<_>>()
        .join(" - ");
    println!("critical path of length {}: {path}", critical.length());
    // critical path of length 13: fetch - configure - link+codegen - package

    println!("{}", condensation_dot(analysis.condensation()));
    println!("{}", serde_json::to_string_pretty(&analysis.report("project", &graph))?);

    Ok(())
}
