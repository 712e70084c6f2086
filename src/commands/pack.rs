use crate::core::context::ProjectContext;
use crate::core::error::ReleaseResult;
use crate::package::packager::{self, PackPlan};

/// Run the pack command
pub fn run_pack(ctx: &ProjectContext, dry_run: bool) -> ReleaseResult<()> {
  let plan = PackPlan::analyze(ctx)?;
  tracing::debug!(
    plugin = %plan.plugin_name,
    current = %plan.current_version,
    next = %plan.next_version,
    "pack plan ready"
  );

  if dry_run {
    packager::print_plan(&plan);
    return Ok(());
  }

  println!("📦 Packaging {} {} → {}", plan.plugin_name, plan.current_version, plan.next_version);
  let report = packager::execute(ctx, &plan)?;
  packager::print_report(&report);
  Ok(())
}
