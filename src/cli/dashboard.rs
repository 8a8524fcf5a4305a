use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{Context, RangeArgs};
use crate::error::Result;
use crate::fmt::{long_date, money, percent};
use crate::metrics::{self, Period};

const POPULAR_LIMIT: usize = 4;
const RECENT_LIMIT: usize = 5;

pub fn run(ctx: &mut Context, range: &RangeArgs) -> Result<()> {
    let range = range.resolve()?;
    let salon = &ctx.salon;

    let services = range.filter(&salon.services, ctx.now);
    let transactions = range.filter(&salon.transactions, ctx.now);
    let (prior_services, prior_transactions) = match range.previous_bounds(ctx.now) {
        Some(window) => (window.filter(&salon.services), window.filter(&salon.transactions)),
        None => (Vec::new(), Vec::new()),
    };

    let m = metrics::aggregate(
        &Period::new(&transactions, &services),
        &Period::new(&prior_transactions, &prior_services),
    );

    println!(
        "{}: {}",
        ctx.settings.salon_name.bold(),
        range.label()
    );

    let trend = if m.trend_percent >= 0.0 {
        percent(m.trend_percent).green()
    } else {
        percent(m.trend_percent).red()
    };
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![Cell::new("Total income"), Cell::new(money(m.total))]);
    table.add_row(vec![Cell::new("Clients attended"), Cell::new(m.count)]);
    table.add_row(vec![Cell::new("Services completed"), Cell::new(m.count)]);
    table.add_row(vec![Cell::new("Average per service"), Cell::new(money(m.average))]);
    table.add_row(vec![Cell::new("Trend vs previous period"), Cell::new(trend)]);
    println!("{table}");

    let popular = metrics::popular_services(&services, POPULAR_LIMIT);
    if !popular.is_empty() {
        let mut ptable = Table::new();
        ptable.set_header(vec!["Service", "Count", "Revenue"]);
        for p in &popular {
            ptable.add_row(vec![
                Cell::new(p.kind),
                Cell::new(p.count),
                Cell::new(money(p.revenue)),
            ]);
        }
        println!("\nPopular Services\n{ptable}");
    }

    let recent = metrics::recent_services(&services, RECENT_LIMIT);
    if recent.is_empty() {
        println!("\nNo services in this period.");
    } else {
        let mut rtable = Table::new();
        rtable.set_header(vec!["Date", "Service", "Client", "Employee", "Price"]);
        for s in &recent {
            rtable.add_row(vec![
                Cell::new(long_date(&s.date)),
                Cell::new(s.kind),
                Cell::new(&s.client_name),
                Cell::new(salon.employee_label(Some(&s.employee_id))),
                Cell::new(money(s.price)),
            ]);
        }
        println!("\nRecent Services\n{rtable}");
    }

    let team = metrics::employee_breakdown(&salon.employees, &services);
    let mut ttable = Table::new();
    ttable.set_header(vec!["Employee", "Services", "Income", "Average"]);
    for row in &team {
        ttable.add_row(vec![
            Cell::new(&row.name),
            Cell::new(row.stats.count),
            Cell::new(money(row.stats.revenue)),
            Cell::new(money(row.stats.average)),
        ]);
    }
    println!("\nTeam\n{ttable}");
    Ok(())
}
