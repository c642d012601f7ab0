use std::{
    fmt::Display,
    io::{self, Cursor, Write},
};

use crate::{algo::Condensation, core::Graph};

pub trait Export<G> {
    fn export<Out: Write>(&self, graph: &G, out: &mut Out) -> io::Result<()>;
}

/// Export to the [DOT](https://graphviz.org/doc/info/lang.html) language.
pub struct Dot<W> {
    name: String,
    get_vertex_label: Box<dyn Fn(usize) -> String>,
    get_edge_label: Box<dyn Fn(&W) -> String>,
}

impl<W> Dot<W> {
    pub fn new<FV, FE>(name: Option<String>, get_vertex_label: FV, get_edge_label: FE) -> Self
    where
        FV: Fn(usize) -> String + 'static,
        FE: Fn(&W) -> String + 'static,
    {
        Self {
            name: name.unwrap_or_else(|| String::from("G")),
            get_vertex_label: Box::new(get_vertex_label),
            get_edge_label: Box::new(get_edge_label),
        }
    }

    pub fn to_string<G>(&self, graph: &G) -> String
    where
        Self: Export<G>,
    {
        let mut cursor = Cursor::new(Vec::new());
        self.export(graph, &mut cursor)
            .expect("writing to vec in cursor does not fail");

        String::from_utf8(cursor.into_inner()).expect("dot format is text format")
    }
}

impl<W: Display + 'static> Dot<W> {
    /// Labels vertices by their index and edges by their weight.
    pub fn with_display(name: Option<String>) -> Self {
        Self::new(name, |v| v.to_string(), |w| w.to_string())
    }
}

impl<W> Export<Graph<W>> for Dot<W> {
    fn export<Out: Write>(&self, graph: &Graph<W>, out: &mut Out) -> io::Result<()> {
        if graph.is_directed() {
            out.write_all(b"digraph ")?;
        } else {
            out.write_all(b"graph ")?;
        }

        out.write_all(self.name.as_bytes())?;
        out.write_all(b" {\n")?;

        for v in graph.vertices() {
            writeln!(out, "    v{v} [label={:?}];", (self.get_vertex_label)(v))?;
        }

        let line = if graph.is_directed() { "->" } else { "--" };

        for edge in graph.edges() {
            // Undirected edges are stored in both endpoints, draw them once.
            if !graph.is_directed() && edge.from > edge.to {
                continue;
            }

            writeln!(
                out,
                "    v{} {line} v{} [label={:?}];",
                edge.from,
                edge.to,
                (self.get_edge_label)(&edge.weight)
            )?;
        }

        out.write_all(b"}\n")?;

        Ok(())
    }
}

impl<W> Export<Condensation<W>> for Dot<W> {
    fn export<Out: Write>(&self, condensation: &Condensation<W>, out: &mut Out) -> io::Result<()> {
        <Self as Export<Graph<W>>>::export(self, condensation.graph(), out)
    }
}

/// Labels every condensation vertex with the original vertices it stands for.
pub fn condensation_dot<W: Display + 'static>(condensation: &Condensation<W>) -> String {
    let labels: Vec<String> = (0..condensation.len())
        .map(|id| {
            let members = condensation.members(id).unwrap_or_default();
            let members: Vec<String> = members.iter().map(usize::to_string).collect();
            format!("C{id} {{{}}}", members.join(", "))
        })
        .collect();

    let dot = Dot::new(
        Some(String::from("condensation")),
        move |id| labels.get(id).cloned().unwrap_or_default(),
        |w: &W| w.to_string(),
    );

    dot.to_string(condensation)
}

#[cfg(test)]
mod tests {
    use crate::algo::StronglyConnectedComponents;

    use super::*;

    #[test]
    fn directed_graph() {
        let mut graph = Graph::new_directed(2);
        graph.add_edge(0, 1, 7i64).unwrap();

        let dot = Dot::with_display(None).to_string(&graph);

        assert_eq!(
            dot,
            "digraph G {\n    v0 [label=\"0\"];\n    v1 [label=\"1\"];\n    v0 -> v1 [label=\"7\"];\n}\n"
        );
    }

    #[test]
    fn export_writes_same_text() {
        let mut graph = Graph::new_directed(3);
        graph.extend_with_edges([(0, 1, 2i64), (1, 2, -1)]).unwrap();

        let dot = Dot::with_display(None);
        let mut out = Vec::new();
        dot.export(&graph, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), dot.to_string(&graph));
        assert!(dot.to_string(&graph).ends_with("v1 -> v2 [label=\"-1\"];\n}\n"));
    }

    #[test]
    fn undirected_edge_drawn_once() {
        let mut graph = Graph::new_undirected(2);
        graph.add_edge(1, 0, 3i64).unwrap();

        let dot = Dot::with_display(Some(String::from("U"))).to_string(&graph);

        assert!(dot.starts_with("graph U {\n"));
        assert_eq!(dot.matches("--").count(), 1);
        assert!(dot.contains("v0 -- v1 [label=\"3\"];"));
    }

    #[test]
    fn condensation_labels() {
        let mut graph = Graph::new_directed(3);
        graph
            .extend_with_edges([(0, 1, 1i64), (1, 0, 1), (1, 2, 4)])
            .unwrap();

        let components = StronglyConnectedComponents::on(&graph).run();
        let condensation = Condensation::on(&graph, &components).run().unwrap();
        let cycle = components.component_of(0).unwrap();
        let dot = condensation_dot(&condensation);

        assert!(dot.starts_with("digraph condensation {\n"));
        assert!(dot.contains(&format!("v{cycle} [label=\"C{cycle} {{")));
        assert!(dot.contains("[label=\"4\"];"));
    }
}
