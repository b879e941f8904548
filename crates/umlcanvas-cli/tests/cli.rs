//! End-to-end tests that run the built `umlcanvas` binary

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::tempdir;

const MODEL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<XMI xmi.version="1.2" xmlns:UML="org.omg.xmi.namespace.UML">
  <XMI.content>
    <UML:Model xmi.id="M1" name="Zoo">
      <UML:Namespace.ownedElement>
        <UML:Class xmi.id="C1" name="Animal">
          <UML:Classifier.feature>
            <UML:Attribute name="name"/>
            <UML:Operation name="speak"/>
          </UML:Classifier.feature>
        </UML:Class>
        <UML:Class xmi.id="C2" name="Dog"/>
        <UML:Generalization xmi.id="G1" subtype="C2" supertype="C1"/>
      </UML:Namespace.ownedElement>
    </UML:Model>
    <UML:Diagram xmi.id="D1">
      <UML:Diagram.element>
        <UML:DiagramElement subject="C1" geometry="Left=0;Top=0;Right=160;Bottom=96;"/>
        <UML:DiagramElement subject="C2" geometry="Left=0;Top=240;Right=160;Bottom=304;"/>
      </UML:Diagram.element>
    </UML:Diagram>
  </XMI.content>
</XMI>"#;

fn umlcanvas() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_umlcanvas"));
    cmd.env_remove("UMLCANVAS_LOG_LEVEL")
        .env_remove("UMLCANVAS_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = umlcanvas()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start umlcanvas");
    child
        .stdin
        .take()
        .expect("stdin not piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for umlcanvas")
}

#[test]
fn render_ascii_from_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("zoo.xmi");
    fs::write(&input, MODEL).unwrap();

    let output = umlcanvas()
        .args(["render", "-i"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Animal"));
    assert!(stdout.contains("speak"));
    assert!(stdout.contains("Dog"));
    assert!(stdout.contains('△'), "{stdout}");
    assert!(!stdout.contains("\x1b["));
}

#[test]
fn render_svg_from_stdin() {
    let output = run_with_stdin(
        &["render", "--format", "svg", "--theme", "blueprint"],
        MODEL,
    );
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("<svg"));
    assert!(stdout.contains("#1c2f90"));
    assert!(stdout.contains(">Dog</text>"));
}

#[test]
fn render_png_writes_decodable_image() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("zoo.xmi");
    let png_path = dir.path().join("zoo.png");
    fs::write(&input, MODEL).unwrap();

    let output = umlcanvas()
        .args(["render", "--format", "png", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&png_path)
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let decoder = png::Decoder::new(std::io::BufReader::new(fs::File::open(&png_path).unwrap()));
    let reader = decoder.read_info().unwrap();
    assert!(reader.info().width > 160);
    assert!(reader.info().height > 304);
}

#[test]
fn render_png_defaults_to_diagram_png() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("zoo.xmi");
    fs::write(&input, MODEL).unwrap();

    let output = umlcanvas()
        .current_dir(dir.path())
        .args(["render", "--format", "png", "-i", "zoo.xmi"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);
    assert!(dir.path().join("diagram.png").exists());
}

#[test]
fn import_reports_warnings() {
    let model = MODEL.replace(r#"supertype="C1""#, r#"supertype="C9""#);
    let output = run_with_stdin(&["import"], &model);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Classes: 2"));
    assert!(stdout.contains("Relationships: 0"));
    assert!(stdout.contains("Warnings: 1"));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("G1"), "{stderr}");
}

#[test]
fn import_json_session() {
    let output = run_with_stdin(&["import", "--json"], MODEL);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["classes"].as_array().unwrap().len(), 2);
    assert_eq!(json["classes"][0]["attributes"][0], "name");
    assert_eq!(json["relationships"][0]["kind"], "inheritance");
}

#[test]
fn malformed_input_fails() {
    let output = run_with_stdin(&["render"], "<XMI><UML:Class></XMI>");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("Error:"), "{stderr}");
}

#[test]
fn missing_file_fails() {
    let output = umlcanvas()
        .args(["render", "-i", "/no/such/file.xmi"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("/no/such/file.xmi"));
}

#[test]
fn themes_lists_all_palettes() {
    let output = umlcanvas().args(["themes", "--json"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["default", "darkMode", "lightMode", "blueprint"]);
}
