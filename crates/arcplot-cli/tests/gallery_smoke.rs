use assert_cmd::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;

const FIGURES: [&str; 5] = [
    "0_simple_graph_plain",
    "1_simple_graph",
    "2_cells_network",
    "3_plain_cells_network",
    "4_not_circular_layout",
];

fn png_size(path: &Path) -> (u32, u32) {
    let decoder = png::Decoder::new(fs::File::open(path).expect("open png"));
    let reader = decoder.read_info().expect("png header");
    let info = reader.info();
    (info.width, info.height)
}

#[test]
fn cli_writes_png_gallery() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out_dir = tmp.path().join("images");

    let exe = assert_cmd::cargo_bin!("arcplot-cli");
    Command::new(exe)
        .args(["gallery", "--out-dir", out_dir.to_string_lossy().as_ref()])
        .assert()
        .success();

    for name in FIGURES {
        let path = out_dir.join(format!("{name}.png"));
        let bytes = fs::read(&path).expect("read png");
        assert!(
            bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
            "{} is not a PNG",
            path.display()
        );
        assert_eq!(png_size(&path), (1000, 1000));
    }
}

#[test]
fn cli_writes_svg_gallery() {
    let tmp = tempfile::tempdir().expect("tempdir");

    let exe = assert_cmd::cargo_bin!("arcplot-cli");
    let output = Command::new(exe)
        .args([
            "--format",
            "svg",
            "--out-dir",
            tmp.path().to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert_eq!(stdout.lines().count(), FIGURES.len());

    let cells = fs::read_to_string(tmp.path().join("2_cells_network.svg")).expect("read svg");
    let doc = roxmltree::Document::parse(&cells).expect("well-formed svg");
    let nodes = doc
        .descendants()
        .filter(|n| n.attribute("class") == Some("node"))
        .count();
    assert_eq!(nodes, 9);
    let loops = doc
        .descendants()
        .filter(|n| n.attribute("class") == Some("self-loop"))
        .count();
    assert!(loops > 0);
}

#[test]
fn cli_rejects_unknown_format() {
    let exe = assert_cmd::cargo_bin!("arcplot-cli");
    Command::new(exe)
        .args(["--format", "gif"])
        .assert()
        .failure()
        .code(2);
}
