use stockbook_domain::ReportKind;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::{usage_error, Action, CommandEntry, CommandGroup};
use crate::cli::render;
use crate::cli::shell_context::ShellContext;

const NAME: &str = "report";

const ACTIONS: &[Action] = &[
    Action::new("general", "", "Aggregate the whole ledger"),
    Action::new("monthly", "[YYYY-MM]", "One month, the current one by default"),
    Action::new("daily", "[YYYY-MM-DD]", "One day, today by default"),
    Action::new("save", "<general|monthly|daily> [period]", "Aggregate and store a report"),
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        NAME,
        CommandGroup::Reports,
        "Show inventory and finance reports",
        cmd_report,
    )
    .with_aliases(&["reports"])
    .with_actions(ACTIONS)]
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show(context, ReportKind::General, None),
        [action, rest @ ..] if action.eq_ignore_ascii_case("save") => save(context, rest),
        [kind, rest @ ..] => {
            let kind = parse_kind(kind)?;
            show(context, kind, rest.first().copied())
        }
    }
}

fn parse_kind(raw: &str) -> Result<ReportKind, CommandError> {
    match raw.to_lowercase().as_str() {
        "general" | "monthly" | "daily" => Ok(ReportKind::from_label(raw)),
        other => Err(usage_error(NAME, ACTIONS, other)),
    }
}

fn show(context: &mut ShellContext, kind: ReportKind, period: Option<&str>) -> CommandResult {
    let (report, label) = context.inventory.report_for(kind, period)?;
    let title = match kind {
        ReportKind::General => "General report".to_string(),
        _ => format!("{} report: {label}", capitalize(kind.as_str())),
    };
    output::section(title);
    output::block(&render::render_report(&report, context.currency()));
    Ok(())
}

fn save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = match args.first() {
        Some(raw) => parse_kind(raw).map_err(|_| usage_error(NAME, ACTIONS, "save"))?,
        None => ReportKind::General,
    };
    let generated = context
        .inventory
        .generate_report(kind, args.get(1).copied())?;
    output::success(format!(
        "Report {} saved ({} {}, {} lines)",
        generated.report_id,
        generated.kind,
        generated.period,
        generated.report.inventory.len()
    ));
    Ok(())
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
