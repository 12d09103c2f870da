//! Dashboard handler: headline counts over both collections.

use trattoria_core::{Console, DashboardStats};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(stats: &DashboardStats) -> String {
    output::detail_lines(&[
        ("Customers", stats.total_customers.to_string()),
        ("Active customers", stats.active_customers.to_string()),
        ("Menu items", stats.total_menu_items.to_string()),
        ("Available items", stats.available_menu_items.to_string()),
    ])
}

fn plain(stats: &DashboardStats) -> String {
    format!(
        "{} {} {} {}",
        stats.total_customers,
        stats.active_customers,
        stats.total_menu_items,
        stats.available_menu_items
    )
}

pub async fn handle(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let spinner = output::spinner(global, "loading dashboard");
    let result = console.refresh_dashboard().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let stats = match result {
        Ok(stats) => stats,
        Err(err) => {
            // Either store may hold the failure.
            util::clear_error(console.customers()).await;
            util::clear_error(console.menu()).await;
            return Err(err.into());
        }
    };

    let out = output::render_single(global.format(), &stats, detail, plain);
    output::print_output(&out, global.quiet);
    Ok(())
}
