//! Logging setup and logging during imports
//!
//! Only one global subscriber can be installed per test binary, so most of
//! these only check that initialization never panics.

use std::str::FromStr;

use umlcanvas::core::logging::{init_logging, LogFormat};

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("Pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("xml").is_err());
    assert_eq!(LogFormat::variants(), &["compact", "pretty", "json"]);
}

#[test]
fn test_init_logging_levels_and_formats() {
    for level in ["trace", "debug", "info", "warn", "error", "off", "umlcanvas::xmi=debug"] {
        let _ = init_logging(Some(level), Some("compact"));
    }
    for format in LogFormat::variants() {
        let _ = init_logging(Some("info"), Some(format));
    }
}

#[test]
fn test_init_logging_rejects_unknown_format() {
    let err = init_logging(Some("info"), Some("xml")).unwrap_err();
    assert!(err.to_string().contains("xml"));
}

#[test]
fn test_import_with_logging_enabled() {
    let _ = init_logging(Some("trace"), Some("compact"));

    // Every skip path runs with a subscriber installed.
    let diagram = umlcanvas::import(
        r#"<XMI xmlns:UML="org.omg.xmi.namespace.UML"><XMI.content>
            <UML:Class name="NoId"/>
            <UML:Class xmi.id="C1" name="A"/>
            <UML:Association xmi.id="A1"><UML:AssociationEnd type="C1"/></UML:Association>
            <UML:Generalization xmi.id="G1" subtype="C1"/>
            <UML:Generalization xmi.id="G2" subtype="C1" supertype="C9"/>
            <UML:DiagramElement subject="C9" geometry="Left=0;Top=0;Right=10;Bottom=10"/>
        </XMI.content></XMI>"#,
    )
    .unwrap();
    assert_eq!(diagram.class_count(), 1);
    assert_eq!(diagram.relationship_count(), 0);
    assert_eq!(diagram.warnings().len(), 5);

    let ascii = umlcanvas::render_ascii(&diagram).unwrap();
    assert!(ascii.contains('A'));
}
