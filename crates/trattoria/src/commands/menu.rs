//! Menu command handlers.

use tabled::Tabled;
use trattoria_core::{
    Console, CreateMenuItemRequest, EntityId, Intent, MenuCategory, MenuFilter, MenuItem,
    UpdateMenuItemRequest,
};

use crate::cli::{GlobalOpts, MenuArgs, MenuCommand, MenuItemFields};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct MenuItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Prep (min)")]
    prep: u32,
    #[tabled(rename = "Available")]
    available: String,
}

impl From<&MenuItem> for MenuItemRow {
    fn from(m: &MenuItem) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.name.clone(),
            category: m.category.to_string(),
            price: m.price.to_string(),
            prep: m.preparation_time_minutes,
            available: util::yes_no(m.available),
        }
    }
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
}

fn detail(m: &MenuItem) -> String {
    output::detail_lines(&[
        ("ID", m.id.to_string()),
        ("Name", m.name.clone()),
        ("Description", util::or_dash(m.description.as_deref())),
        ("Category", m.category.to_string()),
        ("Price", m.price.to_string()),
        ("Prep time", format!("{} min", m.preparation_time_minutes)),
        ("Available", util::yes_no(m.available)),
        ("Image", util::or_dash(m.image_url.as_deref())),
        ("Created", m.created_at.to_rfc3339()),
        ("Updated", m.updated_at.to_rfc3339()),
    ])
}

fn print_list(items: &[MenuItem], global: &GlobalOpts) {
    let out = output::render_list(
        global.format(),
        items,
        |m| MenuItemRow::from(m),
        |m| m.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

fn print_one(item: &MenuItem, global: &GlobalOpts) {
    let out = output::render_single(global.format(), item, detail, |m| m.id.to_string());
    output::print_output(&out, global.quiet);
}

fn not_found(id: &str) -> impl FnOnce(CliError) -> CliError + '_ {
    move |e| e.for_resource("menu item", id, "menu list")
}

fn validate(fields: &MenuItemFields) -> Result<(), CliError> {
    if !fields.price.is_finite() || fields.price < 0.0 {
        return Err(CliError::Validation {
            field: "price".into(),
            reason: format!("expected a non-negative amount, got {}", fields.price),
        });
    }
    if fields.currency.trim().is_empty() {
        return Err(CliError::Validation {
            field: "currency".into(),
            reason: "cannot be empty".into(),
        });
    }
    Ok(())
}

fn create_request(f: MenuItemFields) -> CreateMenuItemRequest {
    CreateMenuItemRequest {
        name: f.name,
        description: f.description,
        price: f.price,
        currency: f.currency.to_uppercase(),
        category: f.category,
        image_url: f.image_url,
        preparation_time_minutes: f.prep_time,
    }
}

fn update_request(f: MenuItemFields, available: bool) -> UpdateMenuItemRequest {
    UpdateMenuItemRequest {
        name: f.name,
        description: f.description,
        price: f.price,
        currency: f.currency.to_uppercase(),
        category: f.category,
        image_url: f.image_url,
        preparation_time_minutes: f.prep_time,
        available,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(console: &Console, args: MenuArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let store = console.menu();

    match args.command {
        MenuCommand::List(list) => {
            let size = config::page_size(list.size, console.config());
            let state = util::settle(store, Intent::Load { page: list.page, size }, global).await?;
            print_list(&state.items, global);
            Ok(())
        }

        MenuCommand::Search { query } => {
            let state = util::settle(store, Intent::Search { query }, global).await?;
            print_list(&state.items, global);
            Ok(())
        }

        MenuCommand::Category { category } => {
            filtered(console, MenuFilter::Category(category), global).await
        }
        MenuCommand::Available => filtered(console, MenuFilter::Available, global).await,

        MenuCommand::Categories => {
            let all = MenuCategory::all();
            let out = output::render_list(
                global.format(),
                &all,
                |c| CategoryRow {
                    name: c.to_string(),
                },
                ToString::to_string,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MenuCommand::Get { id } => {
            let item = fetch(console, &id, global).await?;
            print_one(&item, global);
            Ok(())
        }

        MenuCommand::Create(fields) => {
            validate(&fields)?;
            let created = util::settle_entity(
                store,
                Intent::Create {
                    payload: create_request(fields),
                },
                global,
            )
            .await?;
            output::success(global, &format!("Menu item {} created", created.id));
            print_one(&created, global);
            Ok(())
        }

        MenuCommand::Update {
            id,
            fields,
            available,
        } => {
            validate(&fields)?;
            let updated = util::settle_entity(
                store,
                Intent::Update {
                    id: EntityId::from(id.as_str()),
                    payload: update_request(fields, available),
                },
                global,
            )
            .await
            .map_err(not_found(&id))?;
            output::success(global, &format!("Menu item {id} updated"));
            print_one(&updated, global);
            Ok(())
        }

        MenuCommand::MakeAvailable { id } => set_available(console, &id, true, global).await,
        MenuCommand::MakeUnavailable { id } => set_available(console, &id, false, global).await,

        MenuCommand::Delete { id } => {
            let item = fetch(console, &id, global).await?;
            if !util::confirm(
                &format!("Delete menu item '{}' ({})?", item.name, item.category),
                "menu delete",
                global.yes,
            )? {
                return Ok(());
            }
            util::settle(
                store,
                Intent::Delete {
                    id: EntityId::from(id.as_str()),
                },
                global,
            )
            .await
            .map_err(not_found(&id))?;
            output::success(global, &format!("Menu item {id} deleted"));
            Ok(())
        }
    }
}

/// Record the filter on the store, then replace the items with the
/// server's filtered list.
async fn filtered(console: &Console, filter: MenuFilter, global: &GlobalOpts) -> Result<(), CliError> {
    let store = console.menu();
    util::settle(
        store,
        Intent::SetFilter {
            filter: Some(filter),
        },
        global,
    )
    .await?;
    let state = util::settle(store, Intent::Filter { filter }, global).await?;
    print_list(&state.items, global);
    Ok(())
}

async fn fetch(console: &Console, id: &str, global: &GlobalOpts) -> Result<MenuItem, CliError> {
    util::settle_entity(
        console.menu(),
        Intent::LoadOne {
            id: EntityId::from(id),
        },
        global,
    )
    .await
    .map_err(not_found(id))
}

async fn set_available(
    console: &Console,
    id: &str,
    available: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let item = util::settle_entity(
        console.menu(),
        Intent::ToggleStatus {
            id: EntityId::from(id),
            desired_state: available,
        },
        global,
    )
    .await
    .map_err(not_found(id))?;

    let verb = if available { "available" } else { "unavailable" };
    output::success(global, &format!("Menu item {id} is now {verb}"));
    print_one(&item, global);
    Ok(())
}
