use assert_cmd::Command;
use predicates::prelude::*;
use rasterpad::draw::{PixelBuffer, Rgba};
use rasterpad::export;
use std::path::Path;
use tempfile::TempDir;

const RED: Rgba = Rgba::new(255, 0, 0, 255);
const BLUE: Rgba = Rgba::new(0, 0, 255, 255);

const OUTLINE_AND_FILL: &str = r#"
[[step]]
op = "shape"
kind = "rectangle"

[[step]]
op = "drag"
from = [10, 10]
to = [30, 30]
steps = 3

[[step]]
op = "tool"
name = "bucket"

[[step]]
op = "named-color"
name = "blue"

[[step]]
op = "start"
x = 20
y = 20
"#;

/// Command isolated from the user's config directory.
fn rasterpad_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rasterpad").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn write_script(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("session.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn help_prints_usage() {
    let temp = TempDir::new().unwrap();
    rasterpad_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Replay drawing gestures onto a pixel buffer",
        ));
}

#[test]
fn script_is_required() {
    let temp = TempDir::new().unwrap();
    rasterpad_cmd(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn replays_script_into_png() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, OUTLINE_AND_FILL);
    let output = temp.path().join("out.png");

    rasterpad_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .args(["--width", "40", "--height", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved drawing to"));

    let image = export::load_png(&output).unwrap();
    assert_eq!((image.width(), image.height()), (40, 40));
    assert_eq!(image.get(20, 20), Some(BLUE));
    assert_eq!(image.get(10, 20), Some(RED));
    assert_eq!(image.get(0, 0), Some(Rgba::WHITE));
}

#[test]
fn unknown_shape_fails() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, "[[step]]\nop = \"shape\"\nkind = \"trapezoid\"\n");

    rasterpad_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(temp.path().join("never.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported shape kind: trapezoid"));

    assert!(!temp.path().join("never.png").exists());
}

#[test]
fn malformed_script_fails() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, "[[step]]\nop = \"start\"\nx = \"left\"\n");

    rasterpad_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load script"));
}

#[test]
fn config_file_sets_canvas_and_export_directory() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, "");
    let exports = temp.path().join("exports");
    let config = temp.path().join("custom.toml");
    std::fs::write(
        &config,
        format!(
            "[canvas]\nwidth = 12\nheight = 7\nbackground = \"transparent\"\n\n\
             [export]\ndirectory = {:?}\nfilename_template = \"blank\"\n",
            exports.to_string_lossy()
        ),
    )
    .unwrap();

    rasterpad_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let image = export::load_png(&exports.join("blank.png")).unwrap();
    assert_eq!((image.width(), image.height()), (12, 7));
    assert_eq!(image.count(Rgba::TRANSPARENT), 84);
}

#[test]
fn user_config_is_picked_up() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("rasterpad");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[canvas]\nwidth = 9\nheight = 9\n\n[drawing]\ndefault_tool = \"bucket\"\ndefault_color = \"blue\"\n",
    )
    .unwrap();
    let script = write_script(&temp, "[[step]]\nop = \"start\"\nx = 4\ny = 4\n");
    let output = temp.path().join("filled.png");

    rasterpad_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let image = export::load_png(&output).unwrap();
    assert_eq!(image.count(BLUE), 81);
}

#[test]
fn input_image_is_drawn_over() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("base.png");
    let mut buffer = PixelBuffer::new(16, 16, Rgba::WHITE);
    for y in 0..16 {
        buffer.set(8, y, Rgba::new(0, 0, 0, 255));
    }
    export::save_png(&buffer, &base).unwrap();

    let script = write_script(
        &temp,
        "[[step]]\nop = \"tool\"\nname = \"bucket\"\n\n[[step]]\nop = \"start\"\nx = 2\ny = 2\n",
    );
    let output = temp.path().join("over.png");

    rasterpad_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--input")
        .arg(&base)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let image = export::load_png(&output).unwrap();
    assert_eq!(image.get(2, 2), Some(RED));
    assert_eq!(image.get(8, 2), Some(Rgba::new(0, 0, 0, 255)));
    assert_eq!(image.get(12, 2), Some(Rgba::WHITE));
}
