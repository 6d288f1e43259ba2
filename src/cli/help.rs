use crate::cli::output::{self, section};
use crate::cli::registry::{CommandEntry, CommandGroup, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    section("Available commands");
    for group in CommandGroup::ALL {
        let mut entries = registry.in_group(group).peekable();
        if entries.peek().is_none() {
            continue;
        }
        output::info(group.label());
        for entry in entries {
            output::info(format!("  {:<12} {}", entry.name, entry.summary));
        }
    }
    output::info("Use `help <command>` for details.");
}

/// Lists every action of `entry`, or only `action` when one is named.
pub fn print_command(entry: &CommandEntry, action: Option<&str>) {
    section(format!("Help: {}", entry.name));
    output::info(format!("  {}", entry.summary));
    if !entry.aliases.is_empty() {
        output::info(format!("  Aliases: {}", entry.aliases.join(", ")));
    }

    if entry.actions.is_empty() {
        output::info(format!("  Usage: {}", entry.usage()));
        return;
    }

    let selected: Vec<_> = match action.and_then(|name| entry.action(name)) {
        Some(found) => vec![found],
        None => entry.actions.iter().collect(),
    };
    let synopses: Vec<_> = selected
        .iter()
        .map(|action| action.synopsis(entry.name))
        .collect();
    let width = synopses.iter().map(String::len).max().unwrap_or(0);
    for (action, synopsis) in selected.iter().zip(&synopses) {
        output::info(format!("  {synopsis:<width$}  {}", action.about));
    }
}
