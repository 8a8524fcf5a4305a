use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::Context;
use crate::error::Result;
use crate::fmt::{long_date, money, seniority};
use crate::metrics::{recent_services, service_stats};
use crate::models::Service;

pub fn run(ctx: &mut Context) -> Result<()> {
    let session = ctx.session()?;
    let employee = ctx.salon.employee(&session.user_id)?;
    let own: Vec<Service> = ctx
        .salon
        .services
        .iter()
        .filter(|s| s.employee_id == employee.id)
        .cloned()
        .collect();
    let stats = service_stats(&own);

    let badge = if session.is_admin() { "admin".magenta() } else { "staff".cyan() };
    println!("{} [{badge}]", session.display_name().bold());
    let mut table = Table::new();
    table.add_row(vec![Cell::new("Email"), Cell::new(&employee.email)]);
    table.add_row(vec![Cell::new("Phone"), Cell::new(&employee.phone)]);
    table.add_row(vec![Cell::new("Role"), Cell::new(employee.position)]);
    table.add_row(vec![
        Cell::new("Seniority"),
        Cell::new(seniority(&employee.hire_date, ctx.now.date())),
    ]);
    table.add_row(vec![Cell::new("Specialties"), Cell::new(employee.specialties.join(", "))]);
    table.add_row(vec![Cell::new("Services"), Cell::new(stats.count)]);
    table.add_row(vec![Cell::new("Income"), Cell::new(money(stats.revenue))]);
    table.add_row(vec![Cell::new("Average"), Cell::new(money(stats.average))]);
    println!("{table}");

    let recent = recent_services(&own, 5);
    if !recent.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Date", "Service", "Client", "Price"]);
        for s in &recent {
            table.add_row(vec![
                Cell::new(long_date(&s.date)),
                Cell::new(s.kind),
                Cell::new(&s.client_name),
                Cell::new(money(s.price)),
            ]);
        }
        println!("\n{}\n{table}", "Recent Services".bold());
    }
    Ok(())
}
