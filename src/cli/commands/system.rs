use crate::cli::core::{CommandError, CommandResult};
use crate::cli::help;
use crate::cli::output::{self, section};
use crate::cli::registry::{CommandEntry, CommandGroup};
use crate::cli::shell_context::ShellContext;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("help", CommandGroup::Shell, "Show commands, or one command's actions", cmd_help),
        CommandEntry::new("version", CommandGroup::Shell, "Show build metadata", cmd_version),
        CommandEntry::new("exit", CommandGroup::Shell, "Leave the shell", cmd_exit)
            .with_aliases(&["quit", "q"]),
    ]
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    section(format!("Stockbook {}", meta.version));
    output::info(format!(
        "  Build hash : {} ({})",
        meta.git_hash, meta.git_status
    ));
    output::info(format!("  Built at   : {}", meta.timestamp));
    output::info(format!("  Target     : {}", meta.target));
    output::info(format!("  Profile    : {}", meta.profile));
    output::info(format!("  Rustc      : {}", meta.rustc));
    Ok(())
}

/// `help`, `help <command>` or `help <command> <action>`.
fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        help::print_overview(&context.registry);
        return Ok(());
    };
    match context.registry.resolve(name) {
        Some(entry) => help::print_command(entry, args.get(1).copied()),
        None => context.suggest_command(name),
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
