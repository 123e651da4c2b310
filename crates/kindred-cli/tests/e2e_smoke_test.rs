use std::{fs, path::PathBuf};

use tempfile::tempdir;

use kindred_cli::{Args, Format, run};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: &PathBuf, output: PathBuf, format: Option<Format>) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        format,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let fixtures = collect_json_files(fixtures_dir());

    assert!(!fixtures.is_empty(), "No fixtures found in tests/fixtures/");

    let mut failed = Vec::new();

    for fixture in &fixtures {
        let stem = fixture.file_stem().unwrap().to_string_lossy().to_string();

        for (extension, format) in [("svg", Format::Svg), ("layout.json", Format::Json)] {
            let output_path = temp_dir.path().join(format!("{stem}.{extension}"));
            let args = args_for(fixture, output_path.clone(), None);
            assert_eq!(args.output_format(), format);

            match run(&args) {
                Ok(()) => {
                    let written = fs::read_to_string(&output_path).unwrap();
                    match format {
                        Format::Svg => assert!(written.contains("<svg")),
                        Format::Json => assert!(written.contains("\"nodes\"")),
                    }
                }
                Err(e) => failed.push((fixture.clone(), e)),
            }
        }
    }

    if !failed.is_empty() {
        eprintln!("\nValid fixtures that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid fixture run(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let fixtures = collect_json_files(fixtures_dir().join("errors"));

    assert!(
        !fixtures.is_empty(),
        "No error fixtures found in tests/fixtures/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for fixture in &fixtures {
        let output_path = temp_dir.path().join(format!(
            "error_{}.svg",
            fixture.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args_for(fixture, output_path, None)).is_ok() {
            unexpectedly_succeeded.push(fixture.clone());
        }
    }

    assert!(
        unexpectedly_succeeded.is_empty(),
        "Error fixtures succeeded unexpectedly: {unexpectedly_succeeded:?}"
    );
}

#[test]
fn e2e_json_output_has_coordinates() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = fixtures_dir().join("three_generations.json");
    let output_path = temp_dir.path().join("tree.svg");

    run(&args_for(&input, output_path.clone(), Some(Format::Json))).unwrap();

    let written = fs::read_to_string(&output_path).unwrap();
    assert!(written.contains("\"name\": \"Edna Hart\""));
    assert!(written.contains("\"lifespan\": \"1920 – 1998\""));
    // frank is joan's partner and sam inherits lucy's parent
    assert!(!written.contains("\"name\": \"Frank Doyle\","));
    assert!(written.contains("\"placement\": \"tree\""));
    assert!(!written.contains("\"placement\": \"unconnected\""));
}

#[test]
fn e2e_missing_input_is_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = fixtures_dir().join("does_not_exist.json");

    let err = run(&args_for(&input, temp_dir.path().join("out.svg"), None)).unwrap_err();
    assert!(matches!(err, kindred::KindredError::Io(_)));
}

#[test]
fn e2e_explicit_config_is_used() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[layout]\nnode_width = 0.0\n").unwrap();

    let mut args = args_for(
        &fixtures_dir().join("loners.json"),
        temp_dir.path().join("out.svg"),
        None,
    );
    args.config = Some(config_path.to_string_lossy().to_string());

    let err = run(&args).unwrap_err();
    assert!(matches!(err, kindred::KindredError::Config(_)));
}
