use stockbook_domain::Product;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::{usage_error, Action, CommandEntry, CommandGroup};
use crate::cli::render;
use crate::cli::shell_context::ShellContext;

const NAME: &str = "product";

const ACTIONS: &[Action] = &[
    Action::new("list", "", "List products with their current stock"),
    Action::new("add", "<id> <main> [sub]", "Add a product to the catalog"),
    Action::new("show", "<product>", "Show one product"),
    Action::new("remove", "<product>", "Delete a product; its ledger rows are kept"),
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        NAME,
        CommandGroup::Catalog,
        "List, add, inspect or remove products",
        cmd_product,
    )
    .with_aliases(&["products"])
    .with_actions(ACTIONS)]
}

fn cmd_product(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first() else {
        return list(context);
    };

    let rest = &args[1..];
    match action.to_lowercase().as_str() {
        "list" => list(context),
        "add" => add(context, rest),
        "show" => show(context, rest),
        "remove" | "delete" => remove(context, rest),
        other => Err(usage_error(NAME, ACTIONS, other)),
    }
}

fn list(context: &mut ShellContext) -> CommandResult {
    let products = context.inventory.products()?;
    output::section("Products");
    output::block(&render::render_products(&products));
    Ok(())
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (id, main) = match args {
        [id, main, ..] => (*id, *main),
        _ => return Err(usage_error(NAME, ACTIONS, "add")),
    };
    let sub = args.get(2).map(|value| value.to_string());

    let product = context.inventory.add_product(Product::new(id, main, sub))?;
    output::success(format!("Product added: {product}"));
    Ok(())
}

fn show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(usage_error(NAME, ACTIONS, "show"));
    };
    let row = context
        .inventory
        .products()?
        .into_iter()
        .find(|row| row.product.matches_id(id))
        .ok_or_else(|| CommandError::Message(format!("Product not found: {id}")))?;

    output::section(format!("Product {}", row.product.id));
    output::info(format!("  Main category : {}", row.product.main_category));
    output::info(format!(
        "  Sub category  : {}",
        row.product.sub_category.as_deref().unwrap_or("-")
    ));
    output::info(format!("  Current stock : {}", row.current_stock));
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(usage_error(NAME, ACTIONS, "remove"));
    };
    if !context.confirm(&format!("Delete product `{id}`? Ledger history is kept."))? {
        output::info("Operation cancelled.");
        return Ok(());
    }
    let removed = context.inventory.delete_product(id)?;
    output::success(format!("Product deleted: {}", removed.id));
    Ok(())
}
