//! The example gallery: the same graphs drawn with and without pair routing.

use arcplot::layout::{
    CircularOptions, Graph as LayoutGraph, KamadaKawaiOptions, circular_layout,
    kamada_kawai_layout,
};
use arcplot::{
    AttrGraph, Canvas, ChordOptions, EdgeStyle, GraphOptions, NodeStyle, RoutingOptions,
    SvgRenderOptions, chord_diagram, draw_graph_edges, draw_nodes, draw_plain_edges, weighted,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::CliError;

pub const RANDOM_NODES: usize = 10;
pub const RANDOM_EDGES: usize = 30;

/// One gallery image before serialization.
pub struct Figure {
    pub name: &'static str,
    pub canvas: Canvas,
    pub svg: SvgRenderOptions,
}

impl Figure {
    fn framed(name: &'static str, canvas: Canvas) -> Self {
        Self {
            name,
            canvas,
            svg: SvgRenderOptions {
                diagram_id: arcplot::sanitize_svg_id(name),
                ..SvgRenderOptions::default()
            },
        }
    }

    /// Straight-edge drawings hide the axes, like a quick default plot would.
    fn frameless(name: &'static str, canvas: Canvas) -> Self {
        let mut fig = Self::framed(name, canvas);
        fig.svg.frame = false;
        fig
    }
}

pub fn simple_graph() -> Result<AttrGraph, CliError> {
    let m = [
        [1.0, 2.0, 1.0, 3.0, 5.0],
        [1.0, 0.0, 3.0, 0.0, 0.0],
        [1.0, 1.0, 3.0, 0.0, 1.0],
        [0.0, 0.0, 2.0, 0.0, 1.0],
        [1.0, 1.0, 1.0, 1.0, 1.0],
    ];
    Ok(AttrGraph::from_adjacency_matrix(&m, GraphOptions::directed())?)
}

pub fn cells_communication_graph() -> Result<AttrGraph, CliError> {
    let cell_types = [
        "RPS expressing",
        "B",
        "CD4 T",
        "CD14 Monocytes",
        "NK",
        "CD8 T",
        "FCGR3A Monocytes",
        "Dendritic",
        "Megakaryocytes",
    ];
    let m = [
        [1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0],
        [1.0, 0.0, 1.0, 2.0, 1.0, 1.0, 2.0, 2.0, 0.0],
        [0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 3.0, 3.0, 0.0],
        [1.0, 0.0, 1.0, 3.0, 1.0, 1.0, 3.0, 3.0, 0.0],
        [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0, 3.0, 0.0, 0.0, 3.0, 3.0, 1.0],
        [0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 3.0, 3.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
    ];
    Ok(AttrGraph::from_labeled_adjacency_matrix(
        &cell_types,
        &m,
        GraphOptions::directed(),
    )?)
}

/// Undirected graph on [`RANDOM_NODES`] nodes with [`RANDOM_EDGES`] distinct edges (self-loops
/// allowed) and integer weights in `1..=4`. Drawing an existing pair again re-weights it.
pub fn random_graph(seed: u64) -> AttrGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = AttrGraph::new(GraphOptions::undirected());
    for i in 0..RANDOM_NODES {
        g.ensure_node(i.to_string());
    }
    while g.edge_count() < RANDOM_EDGES {
        let v = rng.gen_range(0..RANDOM_NODES);
        let w = rng.gen_range(0..RANDOM_NODES);
        let weight: u8 = rng.gen_range(1..=4);
        g.set_edge_with_label(v.to_string(), w.to_string(), weighted(f64::from(weight)));
    }
    g
}

/// Circular layout, default markers, straight black edges, no labels.
fn plain_drawing(graph: &AttrGraph, title: &str) -> Result<Canvas, CliError> {
    let pos = circular_layout(
        &LayoutGraph::from_graphlib(graph, "weight"),
        &CircularOptions::default(),
    )?;
    let mut canvas = Canvas::default();
    draw_nodes(graph, &pos, &mut canvas, &NodeStyle::default())?;
    draw_plain_edges(graph, &pos, &mut canvas, &EdgeStyle::plain(), 1.0)?;
    canvas.set_title(title);
    Ok(canvas)
}

fn chord_drawing(graph: &AttrGraph, title: &str) -> Result<Canvas, CliError> {
    let opts = ChordOptions::default();
    let mut canvas = Canvas::square(opts.plot_size);
    chord_diagram(graph, &mut canvas, &opts)?;
    canvas.set_title(title);
    Ok(canvas)
}

fn kamada_kawai_drawing(graph: &AttrGraph, title: &str) -> Result<Canvas, CliError> {
    let pos = kamada_kawai_layout(
        &LayoutGraph::from_graphlib(graph, "weight"),
        &KamadaKawaiOptions::default(),
    )?;
    let mut canvas = Canvas::default();
    draw_nodes(graph, &pos, &mut canvas, &NodeStyle::default())?;
    draw_graph_edges(graph, &pos, &mut canvas, &RoutingOptions::default())?;
    canvas.set_title(title);
    Ok(canvas)
}

/// Every gallery figure, in output order.
pub fn figures(seed: u64) -> Result<Vec<Figure>, CliError> {
    let simple = simple_graph()?;
    let cells = cells_communication_graph()?;
    let random = random_graph(seed);

    let mut simple_chord = chord_drawing(&simple, "A simple graph drawn better")?;
    simple_chord.set_xlim(-1.5, 1.5).set_ylim(-1.5, 1.5);

    Ok(vec![
        Figure::frameless(
            "0_simple_graph_plain",
            plain_drawing(&simple, "Graph drawn with straight edges")?,
        ),
        Figure::framed("1_simple_graph", simple_chord),
        Figure::framed(
            "2_cells_network",
            chord_drawing(&cells, "Cells communication network")?,
        ),
        Figure::frameless(
            "3_plain_cells_network",
            plain_drawing(&cells, "Graph drawn with straight edges")?,
        ),
        Figure::framed(
            "4_not_circular_layout",
            kamada_kawai_drawing(&random, "Random graph with Kamada-Kawai layout")?,
        ),
    ])
}
