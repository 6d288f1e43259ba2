use crate::cli::core::CommandResult;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandGroup};
use crate::cli::render;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "dashboard",
        CommandGroup::Reports,
        "Show this month's stock and finance summary",
        cmd_dashboard,
    )
    .with_aliases(&["dash"])]
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let (summary, failure) = context.inventory.dashboard_or_zeroed();
    output::section("Dashboard");
    if let Some(err) = failure {
        output::warning(format!("Showing empty figures: {err}"));
    }
    output::block(&render::render_dashboard(&summary, context.currency()));
    Ok(())
}
