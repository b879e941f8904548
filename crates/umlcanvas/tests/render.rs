//! Rendering imported diagrams to text, SVG and PNG

use umlcanvas::prelude::*;
use umlcanvas::{import, render_ascii, render_svg};

fn xmi(body: &str) -> String {
    format!(
        r#"<XMI xmi.version="1.2" xmlns:UML="org.omg.xmi.namespace.UML"><XMI.content>{}</XMI.content></XMI>"#,
        body
    )
}

#[test]
fn single_class_ascii_snapshot() {
    let diagram = import(&xmi(r#"
        <UML:Class xmi.id="C1" name="Person">
          <UML:Classifier.feature>
            <UML:Attribute name="name"/>
            <UML:Operation name="greet"/>
          </UML:Classifier.feature>
        </UML:Class>
        <UML:DiagramElement subject="C1" geometry="Left=0;Top=0;Right=96;Bottom=80;"/>
    "#))
    .unwrap();

    let expected = "\
┌───────────┐
│  Person   │
├───────────┤
│name       │
├───────────┤
│greet      │
└───────────┘";
    assert_eq!(render_ascii(&diagram).unwrap(), expected);
}

#[test]
fn inheritance_marker_points_at_supertype() {
    let diagram = import(&xmi(r#"
        <UML:Class xmi.id="C1" name="Animal"/>
        <UML:Class xmi.id="C2" name="Dog"/>
        <UML:Generalization xmi.id="G1" subtype="C2" supertype="C1"/>
        <UML:DiagramElement subject="C1" geometry="Left=0;Top=0;Right=160;Bottom=64"/>
        <UML:DiagramElement subject="C2" geometry="Left=0;Top=240;Right=160;Bottom=304"/>
    "#))
    .unwrap();

    let output = render_ascii(&diagram).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    let marker_row = lines.iter().position(|l| l.contains('△')).unwrap();
    let animal_row = lines.iter().position(|l| l.contains("Animal")).unwrap();
    let dog_row = lines.iter().position(|l| l.contains("Dog")).unwrap();
    assert!(animal_row < marker_row && marker_row < dog_row, "{output}");
}

#[test]
fn undrawable_class_is_skipped() {
    let diagram = import(&xmi(r#"
        <UML:Class xmi.id="C1" name="Good"/>
        <UML:Class xmi.id="C2" name="Inverted"/>
        <UML:DiagramElement subject="C2" geometry="Left=200;Top=0;Right=100;Bottom=50"/>
    "#))
    .unwrap();
    assert!(diagram.classes()[1].width < 0);

    let mut surface = AsciiSurface::new();
    let summary = draw_diagram(&diagram, &mut surface, Theme::Default);
    assert_eq!(summary.classes_drawn, 1);
    assert_eq!(summary.skipped, 1);

    let output = surface.finish();
    assert!(output.contains("Good"));
    assert!(!output.contains("Inverted"));
}

#[test]
fn far_apart_classes_are_too_large_for_text() {
    let diagram = import(&xmi(r#"
        <UML:Class xmi.id="C1" name="Near"/>
        <UML:Class xmi.id="C2" name="Far"/>
        <UML:Generalization xmi.id="G1" subtype="C2" supertype="C1"/>
        <UML:DiagramElement subject="C2" geometry="Left=800000;Top=160000;Right=800100;Bottom=160050"/>
    "#))
    .unwrap();

    let err = render_ascii(&diagram).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DiagramError>(),
        Some(DiagramError::RenderError { .. })
    ));

    // SVG output does not grow with the distance between boxes.
    let svg = render_svg(&diagram, Theme::Default).unwrap();
    assert!(svg.contains(">Far</text>"));
}

#[test]
fn very_wide_class_is_too_large_for_text() {
    let diagram = import(&xmi(r#"
        <UML:Class xmi.id="C1" name="Wide"/>
        <UML:DiagramElement subject="C1" geometry="Left=0;Top=0;Right=80000000;Bottom=50"/>
    "#))
    .unwrap();
    assert!(render_ascii(&diagram).is_err());
}

#[test]
fn svg_escapes_text() {
    let diagram = import(&xmi(
        r#"<UML:Class xmi.id="C1" name="Map&lt;K, V&gt; &amp; Co"/>"#,
    ))
    .unwrap();
    let svg = render_svg(&diagram, Theme::Default).unwrap();
    assert!(svg.contains("Map&lt;K, V&gt; &amp; Co"), "{svg}");
    assert!(!svg.contains("Map<K"));
}

#[test]
fn svg_uses_theme_palette() {
    let diagram = import(&xmi(r#"
        <UML:Class xmi.id="C1" name="A"/>
        <UML:Class xmi.id="C2" name="B"/>
        <UML:Association xmi.id="A1">
          <UML:AssociationEnd type="C1" aggregation="composite"/>
          <UML:AssociationEnd type="C2"/>
        </UML:Association>
        <UML:DiagramElement subject="C2" geometry="Left=300;Top=0;Right=400;Bottom=50"/>
    "#))
    .unwrap();

    for theme in Theme::ALL {
        let palette = theme.palette();
        let svg = render_svg(&diagram, theme).unwrap();
        assert!(svg.contains(palette.background), "{theme}");
        assert!(svg.contains(palette.line), "{theme}");
        assert!(svg.contains(palette.text), "{theme}");
        assert!(svg.contains("<polygon"), "{theme}");
    }
}

#[test]
fn empty_diagram_renders_empty_text() {
    let diagram = Diagram::new();
    assert_eq!(render_ascii(&diagram).unwrap(), "");
    assert!(render_svg(&diagram, Theme::DarkMode).unwrap().starts_with("<svg"));
}

#[test]
fn renderers_report_their_format() {
    assert_eq!(AsciiRenderer::new().format(), "ascii");
    assert_eq!(SvgRenderer::new().format(), "svg");
    #[cfg(feature = "png")]
    assert_eq!(PngRenderer::new().format(), "png");
}

#[cfg(feature = "png")]
#[test]
fn png_export_is_a_png() {
    let diagram = import(&xmi(r#"<UML:Class xmi.id="C1" name="A"/>"#)).unwrap();
    let bytes = umlcanvas::export_png(&diagram, Theme::Blueprint).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let reader = png::Decoder::new(std::io::Cursor::new(bytes)).read_info().unwrap();
    assert!(reader.info().width >= 100);
    assert!(reader.info().height >= 50);
}
