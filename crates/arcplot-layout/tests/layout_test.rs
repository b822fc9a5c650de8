use arcplot_graphlib::{AttrGraph, GraphOptions};
use arcplot_layout::{
    Algorithm, CircularOptions, Error, Graph, KamadaKawaiOptions, SpringOptions, layout,
};

fn matrix_graph() -> AttrGraph {
    let m = [
        [1.0, 2.0, 1.0, 3.0, 5.0],
        [1.0, 0.0, 3.0, 0.0, 0.0],
        [1.0, 1.0, 3.0, 0.0, 1.0],
        [0.0, 0.0, 2.0, 0.0, 1.0],
        [1.0, 1.0, 1.0, 1.0, 1.0],
    ];
    AttrGraph::from_adjacency_matrix(&m, GraphOptions::directed()).expect("square matrix")
}

#[test]
fn every_algorithm_places_every_node_in_order() {
    let g = Graph::from_graphlib(&matrix_graph(), "weight");
    for algorithm in [
        Algorithm::Circular(CircularOptions::default()),
        Algorithm::KamadaKawai(KamadaKawaiOptions::default()),
        Algorithm::Spring(SpringOptions::default()),
    ] {
        let pos = layout(&g, &algorithm).expect("layout");
        let ids: Vec<&str> = pos.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"], "{algorithm:?}");
        assert!(pos.values().all(|p| p.x.is_finite() && p.y.is_finite()));
    }
}

#[test]
fn layouts_are_centered_on_the_origin() {
    let g = Graph::from_graphlib(&matrix_graph(), "weight");
    for algorithm in [
        Algorithm::Circular(CircularOptions::default()),
        Algorithm::KamadaKawai(KamadaKawaiOptions::default()),
    ] {
        let pos = layout(&g, &algorithm).expect("layout");
        let n = pos.len() as f64;
        let cx: f64 = pos.values().map(|p| p.x).sum::<f64>() / n;
        let cy: f64 = pos.values().map(|p| p.y).sum::<f64>() / n;
        assert!(cx.abs() < 1e-9 && cy.abs() < 1e-9, "{algorithm:?}: ({cx}, {cy})");
    }
}

#[test]
fn dangling_edges_are_reported() {
    let mut g = Graph::from_graphlib(&matrix_graph(), "weight");
    g.nodes.pop();
    let err = layout(&g, &Algorithm::default()).unwrap_err();
    assert!(matches!(err, Error::MissingEndpoint { .. }));
}
