use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::Context;
use crate::error::Result;
use crate::fmt::{long_date, money, seniority};
use crate::metrics::service_stats;
use crate::models::{Position, Service};
use crate::store::{EmployeeFilter, NewEmployee};

pub fn list(
    ctx: &mut Context,
    position: Option<Position>,
    search: Option<String>,
    active: Option<bool>,
) -> Result<()> {
    let filter = EmployeeFilter {
        position,
        search,
        active,
    };
    let found = ctx.salon.employees(&filter);

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Role", "Email", "Phone", "Specialties", "Access", "Active"]);
    for e in &found {
        table.add_row(vec![
            Cell::new(&e.id),
            Cell::new(e.full_name()),
            Cell::new(e.position),
            Cell::new(&e.email),
            Cell::new(&e.phone),
            Cell::new(e.specialties.join(", ")),
            Cell::new(e.role),
            Cell::new(if e.active { "yes" } else { "no" }),
        ]);
    }
    println!("Employees ({})\n{table}", found.len());
    Ok(())
}

pub fn show(ctx: &mut Context, id: &str) -> Result<()> {
    let employee = ctx.salon.employee(id)?;
    let own: Vec<Service> = ctx
        .salon
        .services
        .iter()
        .filter(|s| s.employee_id == employee.id)
        .cloned()
        .collect();
    let stats = service_stats(&own);

    println!("{}", employee.full_name().bold());
    let mut table = Table::new();
    table.add_row(vec![Cell::new("ID"), Cell::new(&employee.id)]);
    table.add_row(vec![Cell::new("Role"), Cell::new(employee.position)]);
    table.add_row(vec![Cell::new("Access"), Cell::new(employee.role)]);
    table.add_row(vec![Cell::new("Email"), Cell::new(&employee.email)]);
    table.add_row(vec![Cell::new("Phone"), Cell::new(&employee.phone)]);
    table.add_row(vec![Cell::new("Hired"), Cell::new(long_date(&employee.hire_date))]);
    table.add_row(vec![
        Cell::new("Seniority"),
        Cell::new(seniority(&employee.hire_date, ctx.now.date())),
    ]);
    table.add_row(vec![Cell::new("Specialties"), Cell::new(employee.specialties.join(", "))]);
    table.add_row(vec![
        Cell::new("Active"),
        Cell::new(if employee.active { "yes" } else { "no" }),
    ]);
    table.add_row(vec![Cell::new("Services"), Cell::new(stats.count)]);
    table.add_row(vec![Cell::new("Income"), Cell::new(money(stats.revenue))]);
    table.add_row(vec![Cell::new("Average"), Cell::new(money(stats.average))]);
    println!("{table}");
    Ok(())
}

pub fn add(ctx: &mut Context, form: NewEmployee) -> Result<()> {
    let today = ctx.now.date();
    let (employee, password) = ctx.salon.add_employee(form, today)?;
    ctx.save()?;
    println!("Added employee: {} (ID {})", employee.full_name(), employee.id);
    println!("Temporary password: {}", password.bold());
    Ok(())
}
