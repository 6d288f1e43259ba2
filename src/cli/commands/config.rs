use stockbook_config::CONFIG_KEYS;

use crate::cli::core::CommandResult;
use crate::cli::output;
use crate::cli::registry::{usage_error, Action, CommandEntry, CommandGroup};
use crate::cli::shell_context::ShellContext;

const NAME: &str = "config";

const ACTIONS: &[Action] = &[
    Action::new("show", "", "Print every setting and the config file path"),
    Action::new("get", "<key>", "Print one setting"),
    Action::new("set", "<key> <value>", "Change and save one setting"),
    Action::new("backup", "[note]", "Snapshot the current settings"),
    Action::new("backups", "", "List saved snapshots"),
    Action::new("restore", "<name>", "Replace the settings with a snapshot"),
];

/// Settings read once at startup.
const RESTART_KEYS: [&str; 3] = ["bind_address", "data_root", "log_filter"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        NAME,
        CommandGroup::Settings,
        "View and manage saved settings",
        cmd_config,
    )
    .with_aliases(&["settings"])
    .with_actions(ACTIONS)]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first() else {
        return show(context);
    };

    let rest = &args[1..];
    match action.to_lowercase().as_str() {
        "show" => show(context),
        "get" => get(context, rest),
        "set" => set(context, rest),
        "backup" => backup(context, rest),
        "backups" => backups(context),
        "restore" => restore(context, rest),
        other => Err(usage_error(NAME, ACTIONS, other)),
    }
}

fn show(context: &mut ShellContext) -> CommandResult {
    output::section("Configuration");
    for key in CONFIG_KEYS {
        let value = context.config.get(key)?;
        output::info(format!("  {:<18} {}", key, value));
    }
    output::info(format!(
        "  {:<18} {}",
        "config_file",
        context.config_manager.config_path().display()
    ));
    Ok(())
}

fn get(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [key] = args else {
        return Err(usage_error(NAME, ACTIONS, "get"));
    };
    output::info(format!("{key} = {}", context.config.get(key)?));
    Ok(())
}

fn set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [key, value @ ..] = args else {
        return Err(usage_error(NAME, ACTIONS, "set"));
    };
    if value.is_empty() {
        return Err(usage_error(NAME, ACTIONS, "set"));
    }
    context.config.set(key, value.join(" ").trim())?;
    context.persist_config()?;
    context.apply_output_preferences();
    output::success(format!("Updated `{key}`."));
    if RESTART_KEYS.contains(key) {
        output::hint("Takes effect on next start.");
    }
    Ok(())
}

fn backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = (!args.is_empty()).then(|| args.join(" "));
    let name = context
        .config_manager
        .backup(&context.config, note.as_deref())?;
    output::success(format!("Configuration backed up as `{name}`."));
    Ok(())
}

fn backups(context: &mut ShellContext) -> CommandResult {
    let backups = context.config_manager.list_backups()?;
    output::section("Configuration backups");
    if backups.is_empty() {
        output::info("No backups yet.");
    }
    for name in backups {
        output::info(format!("  {name}"));
    }
    Ok(())
}

fn restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name] = args else {
        return Err(usage_error(NAME, ACTIONS, "restore"));
    };
    if !context.confirm(&format!("Replace current settings with `{name}`?"))? {
        output::info("Operation cancelled.");
        return Ok(());
    }
    context.config = context.config_manager.restore(name)?;
    context.apply_output_preferences();
    output::success(format!("Configuration restored from `{name}`."));
    Ok(())
}
