//! Customer command handlers.

use tabled::Tabled;
use trattoria_core::{
    Console, CreateCustomerRequest, Customer, EntityId, Intent, UpdateCustomerRequest,
};

use crate::cli::{CustomerFields, CustomersArgs, CustomersCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&Customer> for CustomerRow {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            email: c.email.clone(),
            phone: util::or_dash(c.phone.as_deref()),
            active: util::yes_no(c.active),
        }
    }
}

fn detail(c: &Customer) -> String {
    output::detail_lines(&[
        ("ID", c.id.to_string()),
        ("Name", c.name.clone()),
        ("Email", c.email.clone()),
        ("Phone", util::or_dash(c.phone.as_deref())),
        ("Address", util::or_dash(c.address.as_deref())),
        ("Active", util::yes_no(c.active)),
        ("Created", c.created_at.to_rfc3339()),
        ("Updated", c.updated_at.to_rfc3339()),
    ])
}

fn print_list(items: &[Customer], global: &GlobalOpts) {
    let out = output::render_list(
        global.format(),
        items,
        |c| CustomerRow::from(c),
        |c| c.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

fn print_one(customer: &Customer, global: &GlobalOpts) {
    let out = output::render_single(global.format(), customer, detail, |c| c.id.to_string());
    output::print_output(&out, global.quiet);
}

fn not_found(id: &str) -> impl FnOnce(CliError) -> CliError + '_ {
    move |e| e.for_resource("customer", id, "customers list")
}

impl From<CustomerFields> for CreateCustomerRequest {
    fn from(f: CustomerFields) -> Self {
        Self {
            name: f.name,
            email: f.email,
            phone: f.phone,
            address: f.address,
        }
    }
}

impl From<CustomerFields> for UpdateCustomerRequest {
    fn from(f: CustomerFields) -> Self {
        Self {
            name: f.name,
            email: f.email,
            phone: f.phone,
            address: f.address,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: CustomersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = console.customers();

    match args.command {
        CustomersCommand::List(list) => {
            let size = config::page_size(list.size, console.config());
            let state = util::settle(store, Intent::Load { page: list.page, size }, global).await?;
            print_list(&state.items, global);
            Ok(())
        }

        CustomersCommand::Search { query } => {
            let state = util::settle(store, Intent::Search { query }, global).await?;
            print_list(&state.items, global);
            Ok(())
        }

        CustomersCommand::Get { id } => {
            let selected = fetch(console, &id, global).await?;
            print_one(&selected, global);
            Ok(())
        }

        CustomersCommand::ByEmail { email } => {
            let customer = console
                .select_customer_by_email(&email)
                .await
                .map_err(|e| CliError::from(e).for_resource("customer", &email, "customers list"))?;
            print_one(&customer, global);
            Ok(())
        }

        CustomersCommand::Create(fields) => {
            let created = util::settle_entity(
                store,
                Intent::Create {
                    payload: fields.into(),
                },
                global,
            )
            .await?;
            output::success(global, &format!("Customer {} created", created.id));
            print_one(&created, global);
            Ok(())
        }

        CustomersCommand::Update { id, fields } => {
            let updated = util::settle_entity(
                store,
                Intent::Update {
                    id: EntityId::from(id.as_str()),
                    payload: fields.into(),
                },
                global,
            )
            .await
            .map_err(not_found(&id))?;
            output::success(global, &format!("Customer {id} updated"));
            print_one(&updated, global);
            Ok(())
        }

        CustomersCommand::Activate { id } => toggle(console, &id, true, global).await,
        CustomersCommand::Deactivate { id } => toggle(console, &id, false, global).await,

        CustomersCommand::Delete { id } => {
            let customer = fetch(console, &id, global).await?;
            if !util::confirm(
                &format!("Delete customer '{}' <{}>?", customer.name, customer.email),
                "customers delete",
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
            output::success(global, &format!("Customer {id} deleted"));
            Ok(())
        }
    }
}

/// Load one customer into the store's selection.
async fn fetch(console: &Console, id: &str, global: &GlobalOpts) -> Result<Customer, CliError> {
    util::settle_entity(
        console.customers(),
        Intent::LoadOne {
            id: EntityId::from(id),
        },
        global,
    )
    .await
    .map_err(not_found(id))
}

async fn toggle(
    console: &Console,
    id: &str,
    desired_state: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let customer = util::settle_entity(
        console.customers(),
        Intent::ToggleStatus {
            id: EntityId::from(id),
            desired_state,
        },
        global,
    )
    .await
    .map_err(not_found(id))?;

    let verb = if desired_state { "activated" } else { "deactivated" };
    output::success(global, &format!("Customer {id} {verb}"));
    print_one(&customer, global);
    Ok(())
}
