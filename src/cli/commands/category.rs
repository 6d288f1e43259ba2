use crate::cli::core::CommandResult;
use crate::cli::output;
use crate::cli::registry::{usage_error, Action, CommandEntry, CommandGroup};
use crate::cli::render;
use crate::cli::shell_context::ShellContext;

const NAME: &str = "category";

const ACTIONS: &[Action] = &[
    Action::new("list", "", "Show main categories and their sub categories"),
    Action::new("set", "<product> <main> [sub]", "Recategorize one product"),
    Action::new("clear-main", "<main>", "Blank a main category on every product"),
    Action::new("clear-sub", "<main> <sub>", "Blank a sub category under one main"),
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        NAME,
        CommandGroup::Catalog,
        "Browse and maintain product categories",
        cmd_category,
    )
    .with_aliases(&["categories", "cat"])
    .with_actions(ACTIONS)]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(action) = args.first() else {
        return list(context);
    };

    let rest = &args[1..];
    match action.to_lowercase().as_str() {
        "list" => list(context),
        "set" => set(context, rest),
        "clear-main" => clear_main(context, rest),
        "clear-sub" => clear_sub(context, rest),
        other => Err(usage_error(NAME, ACTIONS, other)),
    }
}

fn list(context: &mut ShellContext) -> CommandResult {
    let tree = context.inventory.categories()?;
    output::section("Categories");
    output::block(&render::render_categories(&tree));
    Ok(())
}

fn set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (id, main) = match args {
        [id, main, ..] => (*id, *main),
        _ => return Err(usage_error(NAME, ACTIONS, "set")),
    };
    let sub = args.get(2).map(|value| value.to_string());
    let product = context.inventory.update_categories(id, main, sub)?;
    output::success(format!("Categories updated: {product}"));
    Ok(())
}

fn clear_main(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name] = args else {
        return Err(usage_error(NAME, ACTIONS, "clear-main"));
    };
    if !context.confirm(&format!("Clear main category `{name}` from all products?"))? {
        output::info("Operation cancelled.");
        return Ok(());
    }
    let cleared = context.inventory.clear_main_category(name)?;
    output::success(format!("Main category removed from {cleared} products"));
    Ok(())
}

fn clear_sub(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [main, sub] = args else {
        return Err(usage_error(NAME, ACTIONS, "clear-sub"));
    };
    if !context.confirm(&format!("Clear sub category `{sub}` under `{main}`?"))? {
        output::info("Operation cancelled.");
        return Ok(());
    }
    let cleared = context.inventory.clear_sub_category(main, sub)?;
    output::success(format!("Sub category removed from {cleared} products"));
    Ok(())
}
