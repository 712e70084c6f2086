//! Tests for the `i18n` commands

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_translate_to_english() -> Result<()> {
  let project = PluginProject::new()?;
  let output = run_legend_release(
    &project.path,
    &["i18n", "translate", "LegendViewDockWidgetBase", "レイヤ名", "--locale", "en"],
  )?;
  assert_eq!(stdout(&output).trim(), "Layer Name");
  Ok(())
}

#[test]
fn test_translate_unknown_falls_back_to_message() -> Result<()> {
  let project = PluginProject::new()?;
  let output = run_legend_release(&project.path, &["i18n", "translate", "LegendView", "凡例", "--locale", "fr"])?;
  assert_eq!(stdout(&output).trim(), "凡例");
  Ok(())
}

#[test]
fn test_locales_json() -> Result<()> {
  let project = PluginProject::new()?;
  let output = run_legend_release(&project.path, &["i18n", "locales", "--json"])?;
  let locales: Vec<String> = serde_json::from_slice(&output.stdout)?;
  assert_eq!(locales, vec!["ja", "en"]);
  Ok(())
}

#[test]
fn test_compile_writes_placeholders() -> Result<()> {
  let project = PluginProject::new()?;
  run_legend_release(&project.path, &["i18n", "compile", "--out", "build/i18n"])?;

  for locale in ["ja", "en"] {
    let bytes = std::fs::read(project.path.join(format!("build/i18n/LegendView_{}.qm", locale)))?;
    assert_eq!(&bytes[..4], &[0x3c, 0xb8, 0x64, 0x18]);
  }
  Ok(())
}

#[test]
fn test_compile_writes_python_module() -> Result<()> {
  let project = PluginProject::new()?;
  let output = run_legend_release(&project.path, &["i18n", "compile"])?;
  assert!(stdout(&output).contains("Created Python translation module"));

  let module = std::fs::read_to_string(project.path.join("i18n/translations.py"))?;
  assert!(module.contains("'レイヤ名': 'Layer Name'"));
  assert!(module.contains("def translate(context, message, locale='ja'):"));
  assert!(module.contains("def get_available_locales():"));
  Ok(())
}
