use std::{
    collections::HashMap,
    io::{self, BufRead, Lines},
    sync::Arc,
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;
use stockbook_core::Inventory;
use tracing::debug;

use crate::cli::core::{CliError, CommandError, LoopControl};
use crate::cli::output;
use crate::cli::registry::{Action, CommandRegistry};
use crate::cli::shell_context::{CliMode, ShellContext};

/// Setting this variable switches the shell to line-per-command stdin mode.
pub const SCRIPT_ENV: &str = "STOCKBOOK_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    match mode {
        CliMode::Interactive => {
            let mut terminal = Terminal::new(&context)?;
            output::info("Stockbook shell. Type `help` to list commands.");
            drive(&mut context, &mut terminal)
        }
        CliMode::Script => drive(&mut context, &mut ScriptInput::new(io::stdin().lock())),
    }
}

/// One read from a [`LineSource`].
pub(crate) enum Input {
    Line(String),
    Interrupted,
    Closed,
}

/// Where shell lines come from: the terminal editor or a script on stdin.
pub(crate) trait LineSource {
    fn next_line(&mut self, prompt: &str) -> Result<Input, CliError>;
}

/// Reads lines until the source closes or a command ends the session.
pub(crate) fn drive(context: &mut ShellContext, source: &mut dyn LineSource) -> Result<(), CliError> {
    while context.running {
        let prompt = context.prompt();
        match source.next_line(&prompt)? {
            Input::Line(line) => match handle_line(context, &line) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => context.report_error(err)?,
            },
            Input::Interrupted => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Input::Closed => {
                if context.mode == CliMode::Interactive {
                    output::info("Exiting shell.");
                }
                break;
            }
        }
    }
    Ok(())
}

/// Tokenizes one input line and dispatches it.
pub fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not parse input: {err}"));
            return Ok(LoopControl::Continue);
        }
    };

    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
    context.last_command = Some(line.trim().to_string());
    debug!(command = %command, args = args.len(), "dispatching shell command");

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

pub(crate) struct ScriptInput<R> {
    lines: Lines<R>,
}

impl<R: BufRead> ScriptInput<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> LineSource for ScriptInput<R> {
    fn next_line(&mut self, _prompt: &str) -> Result<Input, CliError> {
        match self.lines.next() {
            Some(line) => Ok(Input::Line(line?)),
            None => Ok(Input::Closed),
        }
    }
}

struct Terminal {
    editor: Editor<ShellCompleter, DefaultHistory>,
}

impl Terminal {
    fn new(context: &ShellContext) -> Result<Self, CliError> {
        let mut editor = Editor::<ShellCompleter, DefaultHistory>::new()?;
        editor.set_helper(Some(ShellCompleter::new(
            &context.registry,
            Some(context.inventory.clone()),
        )));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self { editor })
    }
}

impl LineSource for Terminal {
    fn next_line(&mut self, prompt: &str) -> Result<Input, CliError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    self.editor.add_history_entry(trimmed).ok();
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Closed),
            Err(err) => Err(err.into()),
        }
    }
}

/// Completes command names and aliases, then action names, then catalog ids for
/// actions whose first argument is `<product>`.
pub(crate) struct ShellCompleter {
    spellings: Vec<&'static str>,
    actions: HashMap<&'static str, &'static [Action]>,
    inventory: Option<Arc<Inventory>>,
}

impl ShellCompleter {
    pub(crate) fn new(registry: &CommandRegistry, inventory: Option<Arc<Inventory>>) -> Self {
        let spellings = registry.spellings();
        let actions = spellings
            .iter()
            .filter_map(|&spelling| {
                registry
                    .resolve(spelling)
                    .map(|entry| (spelling, entry.actions))
            })
            .collect();
        Self {
            spellings,
            actions,
            inventory,
        }
    }

    /// Replacement start and candidates for the text before the cursor.
    pub(crate) fn candidates(&self, before_cursor: &str) -> (usize, Vec<String>) {
        let words: Vec<&str> = before_cursor.split_whitespace().collect();
        let (done, current) = if before_cursor.ends_with(char::is_whitespace) || words.is_empty() {
            (words.as_slice(), "")
        } else {
            (&words[..words.len() - 1], words[words.len() - 1])
        };
        let start = before_cursor.len() - current.len();
        let needle = current.to_ascii_lowercase();

        let pool: Vec<String> = match done {
            [] => self.spellings.iter().map(|name| name.to_string()).collect(),
            [command] => self
                .actions_of(command)
                .iter()
                .map(|action| action.name.to_string())
                .collect(),
            [command, action] if self.takes_product(command, action) => self.product_ids(),
            _ => Vec::new(),
        };
        let matches = pool
            .into_iter()
            .filter(|candidate| candidate.to_ascii_lowercase().starts_with(&needle))
            .collect();
        (start, matches)
    }

    fn actions_of(&self, command: &str) -> &'static [Action] {
        self.actions
            .get(command.to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or(&[])
    }

    fn takes_product(&self, command: &str, action: &str) -> bool {
        self.actions_of(command)
            .iter()
            .any(|candidate| candidate.name.eq_ignore_ascii_case(action) && candidate.takes_product())
    }

    fn product_ids(&self) -> Vec<String> {
        let Some(inventory) = &self.inventory else {
            return Vec::new();
        };
        match inventory.catalog() {
            Ok(products) => products
                .into_iter()
                .map(|product| product.id)
                .filter(|id| !id.is_empty() && !id.contains(char::is_whitespace))
                .collect(),
            Err(err) => {
                debug!(error = %err, "product completion skipped");
                Vec::new()
            }
        }
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Helper for ShellCompleter {}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Highlighter for ShellCompleter {}

impl Validator for ShellCompleter {}
