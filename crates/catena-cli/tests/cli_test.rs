use std::fs;

use tempfile::tempdir;

use catena::selector::DiagramKind;
use catena_core::color::Color;
use catena_cli::{Args, CliError, Command, parse_point, run};

fn args(command: Command, output: &std::path::Path) -> Args {
    Args {
        command,
        output: Some(output.to_string_lossy().to_string()),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn test_arrow_fragment_written_to_file() {
    let dir = tempdir().expect("Failed to create temp directory");
    let output = dir.path().join("arrow.svg");
    let command = Command::Arrow {
        from: parse_point("0,0").unwrap(),
        to: parse_point("100,0").unwrap(),
        label: Some("f".to_string()),
        curved: false,
        curvature: None,
    };

    run(&args(command, &output)).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("morphism-arrow"));
    assert!(svg.contains("M 0 0 L 100 0"));
    assert!(svg.contains("url(#arrowhead)"));
    assert!(svg.contains("diagram-label"));
}

#[test]
fn test_node_and_marker_fragments() {
    let dir = tempdir().expect("Failed to create temp directory");

    let node = dir.path().join("node.svg");
    let command = Command::Node {
        at: parse_point("50,50").unwrap(),
        label: "A".to_string(),
    };
    run(&args(command, &node)).unwrap();
    let svg = fs::read_to_string(&node).unwrap();
    assert!(svg.contains("translate(50, 50)"));
    assert!(svg.contains("category-object"));

    let marker = dir.path().join("marker.svg");
    run(&args(Command::Marker, &marker)).unwrap();
    let svg = fs::read_to_string(&marker).unwrap();
    assert!(svg.contains("id=\"arrowhead\""));
}

#[test]
fn test_plan_written_to_file() {
    let dir = tempdir().expect("Failed to create temp directory");
    let output = dir.path().join("plan.txt");
    let command = Command::Plan {
        kind: DiagramKind::Adjunction,
        paths: 3,
        labels: 2,
        missing: vec!["right-adjoint".to_string()],
    };

    run(&args(command, &output)).unwrap();

    let plan = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = plan.lines().collect();
    assert_eq!(lines[0], "# adjunction (top 70%)");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("adjunction-bijection"));
}

#[test]
fn test_explicit_config_applies_styles() {
    let dir = tempdir().expect("Failed to create temp directory");
    let config = dir.path().join("config.toml");
    fs::write(&config, "[style.arrow]\nstroke_color = \"red\"\n").unwrap();
    let output = dir.path().join("arrow.svg");
    let mut args = args(
        Command::Arrow {
            from: parse_point("0,0").unwrap(),
            to: parse_point("10,0").unwrap(),
            label: None,
            curved: true,
            curvature: Some(0.5),
        },
        &output,
    );
    args.config = Some(config.to_string_lossy().to_string());

    run(&args).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    let red = Color::new("red").unwrap();
    assert!(svg.contains(&format!("stroke=\"{red}\"")));
    assert!(svg.contains(" Q "));
}

#[test]
fn test_missing_config_fails() {
    let dir = tempdir().expect("Failed to create temp directory");
    let output = dir.path().join("marker.svg");
    let mut args = args(Command::Marker, &output);
    args.config = Some(dir.path().join("absent.toml").to_string_lossy().to_string());

    let err = run(&args).unwrap_err();

    assert!(matches!(err, CliError::MissingConfig(_)));
    assert!(!output.exists());
}
