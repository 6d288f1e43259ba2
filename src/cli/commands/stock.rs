use stockbook_domain::Direction;

use crate::cli::commands::{parse_price, parse_quantity};
use crate::cli::core::CommandResult;
use crate::cli::output;
use crate::cli::registry::{usage_error, Action, CommandEntry, CommandGroup};
use crate::cli::render;
use crate::cli::shell_context::ShellContext;

const NAME: &str = "stock";

const ACTIONS: &[Action] = &[
    Action::new("in", "<product> <qty> <price>", "Record received stock at a unit cost"),
    Action::new("out", "<product> <qty> <price>", "Record sold stock at a unit price"),
    Action::new("level", "<product>", "Show the current stock of a product"),
    Action::new("history", "[in|out]", "Show ledger rows, optionally one direction"),
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        NAME,
        CommandGroup::Stock,
        "Record stock movements and inspect levels",
        cmd_stock,
    )
    .with_actions(ACTIONS)]
}

fn cmd_stock(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first() else {
        return Err(usage_error(NAME, ACTIONS, ""));
    };

    let rest = &args[1..];
    match action.to_lowercase().as_str() {
        "in" => record(context, Direction::In, rest),
        "out" => record(context, Direction::Out, rest),
        "level" => level(context, rest),
        "history" => history(context, rest),
        other => Err(usage_error(NAME, ACTIONS, other)),
    }
}

fn record(context: &mut ShellContext, direction: Direction, args: &[&str]) -> CommandResult {
    let [product, quantity, price] = args else {
        return Err(usage_error(NAME, ACTIONS, direction.as_str()));
    };
    let quantity = parse_quantity(quantity)?;
    let price = parse_price(price)?;

    let (entry, label) = match direction {
        Direction::In => (context.inventory.stock_in(product, quantity, price)?, "Stock In"),
        Direction::Out => (context.inventory.stock_out(product, quantity, price)?, "Stock Out"),
    };
    let remaining = context.inventory.current_stock(&entry.product_id)?;
    output::success(format!(
        "{label} recorded: {} x{} (stock now {remaining})",
        entry.product_id, entry.quantity
    ));
    Ok(())
}

fn level(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [product] = args else {
        return Err(usage_error(NAME, ACTIONS, "level"));
    };
    let current = context.inventory.current_stock(product)?;
    output::info(format!("{product}: {current}"));
    Ok(())
}

fn history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let entries = match args.first() {
        None => context.inventory.entries()?,
        Some(raw) => {
            let direction =
                Direction::parse(raw).ok_or_else(|| usage_error(NAME, ACTIONS, "history"))?;
            context.inventory.movements(direction)?
        }
    };
    output::section("Ledger");
    output::block(&render::render_ledger(&entries, context.currency()));
    Ok(())
}
