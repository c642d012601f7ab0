#![no_main]

use libfuzzer_sys::fuzz_target;

use condense::{
    algo::{CriticalPath, TopoSort},
    infra::dataset::GraphDescription,
    pipeline::Pipeline,
};

const MAX_VERTICES: usize = 512;

fuzz_target!(|description: GraphDescription| {
    if description.n > MAX_VERTICES || description.n == 0 {
        return;
    }

    // Invalid records must be rejected, never panic.
    let Ok(graph) = description.to_graph() else {
        return;
    };

    let source = description.source % graph.vertex_count();

    // Weights are arbitrary, so the only acceptable failure is an overflow.
    let analysis = match Pipeline::on(&graph).run(source) {
        Ok(analysis) => analysis,
        Err(condense::pipeline::Error::Paths(condense::algo::dag_paths::Error::Overflow { .. })) => {
            return;
        }
        Err(error) => panic!("pipeline failed: {error}"),
    };

    let mut vertices = analysis.vertex_order().to_vec();
    vertices.sort_unstable();
    assert!(vertices.iter().copied().eq(graph.vertices()));

    let condensation = analysis.condensation();
    assert!(condensation.is_dag());
    assert_eq!(
        TopoSort::on(condensation.graph()).run().map(|order| order.len()),
        Ok(condensation.len())
    );

    let critical = CriticalPath::on(condensation.graph())
        .run(analysis.condensed_source())
        .expect("the same run succeeded in the pipeline");
    assert_eq!(critical.path(), analysis.critical().path());
});
