//! End-to-end tests for `dashboardtool validate`.

mod fixtures;
use fixtures::*;

#[test]
fn test_validate_default_modules_pass() {
    let env = TestEnv::new();

    let output = env.run(&["validate"]);
    assert_success(&output, "Validation of bundled modules");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Validation passed"));
    assert!(stdout.contains("notes: 0 errors, 0 warnings"));
    assert!(stdout.contains("debug: 0 errors, 0 warnings"));
}

#[test]
fn test_validate_json_output() {
    let env = TestEnv::new();

    let output = env.run(&["validate", "--json"]);
    assert_success(&output, "JSON validation");

    let result = stdout_json(&output);
    assert_eq!(result["valid"], true);
    assert_eq!(result["error_count"], 0);
    assert_eq!(result["modules"]["notes"]["is_valid"], true);
    assert_eq!(result["modules"]["debug"]["summary"], "0 errors, 0 warnings");
    assert!(result["solutions"].as_array().unwrap().is_empty());
}

#[test]
fn test_validate_lists_modules_in_render_order() {
    let env = TestEnv::new();

    let output = env.run(&["validate"]);
    assert_success(&output, "validation");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let notes = stdout.find("notes:").expect("notes listed");
    let debug = stdout.find("debug:").expect("debug listed");
    assert!(notes < debug, "stdout: {stdout}");
}

#[test]
fn test_validate_unknown_preset_fails() {
    let env = TestEnv::new();
    env.write_config(PAPER_ONLY_CONFIG);

    let output = env.run(&["validate", "--json"]);
    assert_eq!(
        output.status.code(),
        Some(1),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let result = stdout_json(&output);
    assert_eq!(result["valid"], false);
    assert_eq!(result["modules"]["debug"]["is_valid"], false);
    assert_eq!(result["modules"]["notes"]["is_valid"], true);
    let solutions = result["solutions"].as_array().unwrap();
    assert!(solutions
        .iter()
        .any(|s| s["text"] == "Use one of the available theme presets: paper."));
}

#[test]
fn test_validate_strict_fails_on_warnings() {
    let env = TestEnv::new();
    // Notes only warn when the default theme is unavailable
    env.write_config(
        "default_theme = \"nope\"\n\n\
         [themes.monochrome]\n\
         background = \"#111111\"\n\
         surface = \"#1e1e1e\"\n\
         primary = \"#f5f5f5\"\n\
         secondary = \"#bdbdbd\"\n\
         accent = \"#ffca28\"\n\
         text_primary = \"#ffffff\"\n\
         text_secondary = \"#e0e0e0\"\n",
    );

    let lenient = env.run(&["validate"]);
    assert_success(&lenient, "Validation with warnings only");

    let strict = env.run(&["validate", "--strict"]);
    assert_eq!(strict.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&strict.stderr);
    assert!(stderr.contains("strict mode"), "stderr: {stderr}");
}
