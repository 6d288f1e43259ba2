use std::sync::Arc;

use dialoguer::{theme::ColorfulTheme, Confirm};
use stockbook_config::{Config, ConfigManager};
use stockbook_core::Inventory;

use crate::bootstrap;
use crate::cli::commands;
use crate::cli::core::{CliError, CommandError};
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can reach.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub inventory: Arc<Inventory>,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let (config_manager, config) = bootstrap::load_config()?;
        let inventory = bootstrap::open_inventory(&config)?;
        Ok(Self::with_parts(mode, inventory, config_manager, config))
    }

    pub fn with_parts(
        mode: CliMode,
        inventory: Arc<Inventory>,
        config_manager: ConfigManager,
        config: Config,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let context = Self {
            mode,
            registry,
            inventory,
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        };
        context.apply_output_preferences();
        context
    }

    pub fn prompt(&self) -> String {
        "stockbook> ".to_string()
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    /// Resolves a command by name or alias.
    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.resolve(name)
    }

    pub fn currency(&self) -> &str {
        &self.config.currency
    }

    /// Asks before destructive actions. Scripts never block on a prompt.
    pub fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        match self.mode {
            CliMode::Script => Ok(true),
            CliMode::Interactive => self.ask(prompt, false),
        }
    }

    pub(crate) fn ask(&self, prompt: &str, default: bool) -> Result<bool, CommandError> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    pub fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn apply_output_preferences(&self) {
        output::set_plain(!self.config.ui_color_enabled || self.mode == CliMode::Script);
    }
}
