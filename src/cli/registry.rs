//! Shell command table.
//!
//! Every command belongs to a [`CommandGroup`] and may carry aliases and a list of
//! [`Action`]s (its subcommands). Help output, usage errors, suggestions and tab
//! completion are all derived from this table, so a command's synopsis is written
//! exactly once.

use std::collections::HashMap;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Heading a command is listed under in `help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Catalog,
    Stock,
    Reports,
    Settings,
    Shell,
}

impl CommandGroup {
    pub const ALL: [CommandGroup; 5] = [
        CommandGroup::Catalog,
        CommandGroup::Stock,
        CommandGroup::Reports,
        CommandGroup::Settings,
        CommandGroup::Shell,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CommandGroup::Catalog => "Catalog",
            CommandGroup::Stock => "Stock",
            CommandGroup::Reports => "Reports",
            CommandGroup::Settings => "Settings",
            CommandGroup::Shell => "Shell",
        }
    }
}

/// A subcommand: its name, argument synopsis and a one-line summary.
///
/// Arguments written as `<product>` name an existing catalog id and are completed
/// from the catalog in the interactive shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub name: &'static str,
    pub args: &'static str,
    pub about: &'static str,
}

impl Action {
    pub const fn new(name: &'static str, args: &'static str, about: &'static str) -> Self {
        Self { name, args, about }
    }

    /// Full invocation, e.g. `stock in <product> <qty> <price>`.
    pub fn synopsis(&self, command: &str) -> String {
        [command, self.name, self.args]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn takes_product(&self) -> bool {
        self.args.starts_with("<product>")
    }
}

#[derive(Clone, Copy)]
pub struct CommandEntry {
    pub name: &'static str,
    pub group: CommandGroup,
    pub summary: &'static str,
    pub aliases: &'static [&'static str],
    pub actions: &'static [Action],
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub fn new(
        name: &'static str,
        group: CommandGroup,
        summary: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            group,
            summary,
            aliases: &[],
            actions: &[],
            handler,
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_actions(mut self, actions: &'static [Action]) -> Self {
        self.actions = actions;
        self
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions
            .iter()
            .find(|action| action.name.eq_ignore_ascii_case(name))
    }

    /// `stock <in|out|level|history>`, or the bare name when there are no actions.
    pub fn usage(&self) -> String {
        command_usage(self.name, self.actions)
    }
}

pub fn command_usage(command: &str, actions: &[Action]) -> String {
    if actions.is_empty() {
        return command.to_string();
    }
    let names: Vec<_> = actions.iter().map(|action| action.name).collect();
    format!("{command} <{}>", names.join("|"))
}

/// Usage error naming the synopsis of `action`, or the command-level usage when
/// `action` is not one of `actions`.
pub fn usage_error(command: &str, actions: &[Action], action: &str) -> CommandError {
    match actions
        .iter()
        .find(|candidate| candidate.name.eq_ignore_ascii_case(action))
    {
        Some(found) => CommandError::usage(&found.synopsis(command)),
        None => CommandError::usage(&command_usage(command, actions)),
    }
}

/// Commands in registration order, indexed by name and alias.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    index: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering a name twice replaces the earlier entry in place.
    pub fn register(&mut self, entry: CommandEntry) {
        let slot = match self.index.get(entry.name) {
            Some(&slot) => {
                self.entries[slot] = entry;
                slot
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };
        for spelling in std::iter::once(entry.name).chain(entry.aliases.iter().copied()) {
            self.index.insert(spelling, slot);
        }
    }

    /// Looks a command up by name or alias, ignoring case.
    pub fn resolve(&self, input: &str) -> Option<&CommandEntry> {
        let key = input.trim().to_ascii_lowercase();
        self.index
            .get(key.as_str())
            .map(|&slot| &self.entries[slot])
    }

    pub fn list(&self) -> impl Iterator<Item = &CommandEntry> + '_ {
        self.entries.iter()
    }

    pub fn in_group(&self, group: CommandGroup) -> impl Iterator<Item = &CommandEntry> + '_ {
        self.entries.iter().filter(move |entry| entry.group == group)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Every name and alias, sorted.
    pub fn spellings(&self) -> Vec<&'static str> {
        let mut spellings: Vec<_> = self.index.keys().copied().collect();
        spellings.sort_unstable();
        spellings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIONS: &[Action] = &[
        Action::new("in", "<product> <qty> <price>", "Record received stock"),
        Action::new("history", "[in|out]", "Show ledger rows"),
        Action::new("list", "", "List everything"),
    ];

    fn noop(_: &mut ShellContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandEntry::new("stock", CommandGroup::Stock, "Stock", noop).with_actions(ACTIONS),
        );
        registry.register(
            CommandEntry::new("exit", CommandGroup::Shell, "Leave", noop).with_aliases(&["quit", "q"]),
        );
        registry
    }

    #[test]
    fn aliases_resolve_to_the_primary_entry() {
        let registry = registry();
        assert_eq!(registry.resolve("QUIT").map(|entry| entry.name), Some("exit"));
        assert_eq!(registry.resolve(" q ").map(|entry| entry.name), Some("exit"));
        assert!(registry.resolve("leave").is_none());
        assert_eq!(registry.spellings(), vec!["exit", "q", "quit", "stock"]);
    }

    #[test]
    fn re_registering_keeps_position() {
        let mut registry = registry();
        registry.register(CommandEntry::new("stock", CommandGroup::Stock, "Replaced", noop));
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["stock", "exit"]);
        assert_eq!(registry.resolve("stock").map(|entry| entry.summary), Some("Replaced"));
    }

    #[test]
    fn synopsis_and_usage_come_from_actions() {
        assert_eq!(ACTIONS[0].synopsis("stock"), "stock in <product> <qty> <price>");
        assert_eq!(ACTIONS[2].synopsis("stock"), "stock list");
        assert_eq!(command_usage("stock", ACTIONS), "stock <in|history|list>");
        assert!(ACTIONS[0].takes_product());
        assert!(!ACTIONS[1].takes_product());
    }

    #[test]
    fn usage_error_prefers_the_action_synopsis() {
        let err = usage_error("stock", ACTIONS, "IN");
        assert_eq!(err.to_string(), "usage: stock in <product> <qty> <price>");
        let err = usage_error("stock", ACTIONS, "move");
        assert_eq!(err.to_string(), "usage: stock <in|history|list>");
    }

    #[test]
    fn groups_filter_entries() {
        let registry = registry();
        let shell: Vec<_> = registry.in_group(CommandGroup::Shell).map(|entry| entry.name).collect();
        assert_eq!(shell, vec!["exit"]);
        assert_eq!(registry.in_group(CommandGroup::Catalog).count(), 0);
    }
}
