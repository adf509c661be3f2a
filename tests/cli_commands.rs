//! Tests for CLI commands (scale, diff, convert)

use std::process::{Command, Output};

const BIN: &str = env!("CARGO_BIN_EXE_larder");

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn run(args: &[&str]) -> anyhow::Result<Output> {
    let output = Command::new(BIN)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()?;

    Ok(output)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_help_shows_all_commands() -> anyhow::Result<()> {
    let output = run(&["--help"])?;
    let help_text = stdout(&output);

    assert!(help_text.contains("scale"), "scale command not in help");
    assert!(help_text.contains("diff"), "diff command not in help");
    assert!(help_text.contains("convert"), "convert command not in help");

    Ok(())
}

#[test]
fn test_scale_command_text() -> anyhow::Result<()> {
    let recipe = fixture("focaccia_v1.json");
    let output = run(&["scale", "--recipe", &recipe, "--servings", "4"])?;
    assert!(output.status.success());

    let text = stdout(&output);
    let expected = [
        "Focaccia",
        "8 -> 4 servings (½×)",
        "",
        "Dough",
        "  250g bread flour",
        "  200ml (200g) warm water",
        "  ¾ tsp (3g) instant yeast",
        "  1 tsp (6g) salt",
        "",
        "Topping",
        "  2 tbsp (28g) olive oil",
        "  2 cloves garlic, sliced",
        "  flaky sea salt to taste",
    ]
    .join("\n");

    assert_eq!(text.trim_end(), expected);

    Ok(())
}

#[test]
fn test_scale_command_json_clamps_servings() -> anyhow::Result<()> {
    let recipe = fixture("focaccia_v1.json");
    let output = run(&[
        "scale", "--recipe", &recipe, "--servings", "40", "--format", "json",
    ])?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;

    assert_eq!(report["servings"], 16.0);
    assert_eq!(report["scale_factor"], "2×");
    assert_eq!(report["groups"][0]["items"][0]["practical_display"], "1kg");
    assert_eq!(report["groups"][1]["items"][1]["is_indivisible"], true);

    Ok(())
}

#[test]
fn test_diff_command() -> anyhow::Result<()> {
    let previous = fixture("focaccia_v1.json");
    let current = fixture("focaccia_v2.json");
    let output = run(&["diff", "--previous", &previous, "--current", &current])?;
    assert!(output.status.success());

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "[ingredient] Bread flour (550 g) <- bread flour (500 g)");
    assert_eq!(lines[5], "[ingredient] rosemary (2 sprigs) (new)");
    assert_eq!(
        lines[8],
        "[step] Bake 30 minutes or until golden brown. <- Bake for 25 minutes until golden."
    );
    assert_eq!(lines[9], "[step] Brush with oil while still warm. (new)");

    Ok(())
}

#[test]
fn test_convert_command() -> anyhow::Result<()> {
    let output = run(&["convert", "2", "cups", "ml"])?;
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "480ml");

    let output = run(&["convert", "1", "cup", "g"])?;
    assert!(!output.status.success());

    Ok(())
}

#[test]
fn test_missing_recipe_fails() -> anyhow::Result<()> {
    let output = run(&["scale", "--recipe", "does/not/exist.json"])?;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read recipe"));

    Ok(())
}
