use crate::core::context::ProjectContext;
use crate::core::error::ReleaseResult;
use crate::i18n::{available_locales, catalog, python, qm, translate};
use std::path::PathBuf;

/// Print the translation of one message
pub fn run_i18n_translate(context: &str, message: &str, locale: Option<&str>) -> ReleaseResult<()> {
  let locale = locale.unwrap_or(catalog::DEFAULT_LOCALE);
  println!("{}", translate(context, message, locale));
  Ok(())
}

/// List locales and how many messages each one translates
pub fn run_i18n_locales(json: bool) -> ReleaseResult<()> {
  let locales = available_locales();
  if json {
    println!("{}", serde_json::to_string_pretty(&locales)?);
    return Ok(());
  }

  for locale in locales {
    let marker = if locale == catalog::DEFAULT_LOCALE { " (default)" } else { "" };
    println!("{}{}  {} messages", locale, marker, catalog::entries(locale).len());
  }
  Ok(())
}

/// Write placeholder `.qm` files for every locale and the Python fallback module
pub fn run_i18n_compile(ctx: &ProjectContext, out: Option<PathBuf>) -> ReleaseResult<()> {
  let out_dir = match out {
    Some(dir) if dir.is_absolute() => dir,
    Some(dir) => ctx.project_root().join(dir),
    None => ctx.project_root().join("i18n"),
  };

  println!("Creating translation files...");
  for path in qm::write_placeholders(&out_dir, &available_locales())? {
    println!("   Created binary QM file: {}", path.display());
  }
  let module = python::write_module(&out_dir)?;
  println!("   Created Python translation module: {}", module.display());
  println!("✅ Translation files created successfully!");
  Ok(())
}
