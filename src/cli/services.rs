use comfy_table::{Cell, Table};
use tracing::warn;

use crate::cli::{Context, RangeArgs};
use crate::error::{Result, SalonError};
use crate::fmt::{long_date, money};
use crate::metrics::service_stats;
use crate::models::ServiceKind;
use crate::store::{NewService, ServiceQuery};

/// Staff always see their own services; admins may narrow to one employee.
pub fn list(ctx: &mut Context, range: &RangeArgs, employee: Option<String>) -> Result<()> {
    let range = range.resolve()?;
    let session = ctx.session()?;
    let employee_id = match &session.employee_id {
        Some(own) => {
            if employee.as_deref().is_some_and(|e| e != own) {
                warn!(requested = ?employee, "staff can only list their own services");
            }
            Some(own.clone())
        }
        None => employee,
    };

    let found = ctx.salon.services(&ServiceQuery { employee_id, range }, ctx.now);
    let stats = service_stats(&found);

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Service", "Client", "Employee", "Price"]);
    for s in &found {
        table.add_row(vec![
            Cell::new(&s.id),
            Cell::new(long_date(&s.date)),
            Cell::new(s.kind),
            Cell::new(&s.client_name),
            Cell::new(ctx.salon.employee_label(Some(&s.employee_id))),
            Cell::new(money(s.price)),
        ]);
    }
    println!("Services: {}\n{table}", range.label());
    println!(
        "{} services, {} total, {} average",
        stats.count,
        money(stats.revenue),
        money(stats.average)
    );
    Ok(())
}

pub fn add(
    ctx: &mut Context,
    date: Option<String>,
    kind: ServiceKind,
    price: f64,
    client: String,
    employee: Option<String>,
) -> Result<()> {
    let session = ctx.session()?;
    let employee_id = match (&session.employee_id, employee) {
        (Some(own), _) => own.clone(),
        (None, Some(id)) => id,
        (None, None) => {
            return Err(SalonError::Validation(
                "--employee is required when logging a service as admin".to_string(),
            ))
        }
    };
    let form = NewService {
        date: date.unwrap_or_else(|| ctx.today_str()),
        kind,
        price,
        client_name: client,
        employee_id,
    };
    let service = ctx.salon.add_service(form, chrono::Utc::now())?;
    ctx.save()?;
    println!(
        "Logged {} for {} on {}: {} ({})",
        service.kind,
        service.client_name,
        service.date,
        money(service.price),
        ctx.salon.employee_label(Some(&service.employee_id))
    );
    Ok(())
}
