use arcplot::{
    AttrGraph, ChordOptions, GraphOptions, ImageFormat, SaveError, SaveOptions,
    render_chord_diagram, save,
};

fn cells_canvas() -> arcplot::Canvas {
    let labels = ["a", "b", "c"];
    let m = [[0.0, 2.0, 1.0], [1.0, 3.0, 0.0], [0.0, 4.0, 0.0]];
    let g = AttrGraph::from_labeled_adjacency_matrix(&labels, &m, GraphOptions::directed())
        .expect("labeled matrix");
    let mut canvas = render_chord_diagram(&g, &ChordOptions::default()).expect("chord diagram");
    canvas.set_title("cells").set_xlim(-1.5, 1.5).set_ylim(-1.5, 1.5);
    canvas
}

#[test]
fn saves_svg_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cells.svg");

    let format = save(&cells_canvas(), &path, &SaveOptions::default()).unwrap();
    assert_eq!(format, ImageFormat::Svg);

    let text = std::fs::read_to_string(&path).unwrap();
    let doc = roxmltree::Document::parse(&text).unwrap();
    let labels: Vec<&str> = doc
        .descendants()
        .filter(|n| n.attribute("class") == Some("label"))
        .filter_map(|n| n.text())
        .collect();
    assert_eq!(labels, ["a", "b", "c"]);
}

#[test]
fn unknown_extension_is_rejected_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cells.gif");

    let err = save(&cells_canvas(), &path, &SaveOptions::default()).unwrap_err();
    assert!(matches!(err, SaveError::UnknownFormat { .. }));
    assert!(!path.exists());
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("cells.svg");

    let err = save(&cells_canvas(), &path, &SaveOptions::default()).unwrap_err();
    assert!(matches!(err, SaveError::Io { .. }));
}

#[cfg(feature = "raster")]
#[test]
fn saves_png_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cells.png");

    let format = save(&cells_canvas(), &path, &SaveOptions::default()).unwrap();
    assert_eq!(format, ImageFormat::Png);
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}
