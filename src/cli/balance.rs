use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{Context, RangeArgs};
use crate::dates;
use crate::error::Result;
use crate::fmt::{long_date, money};
use crate::metrics::{self, LedgerQuery};
use crate::models::TxnKind;

pub fn run(
    ctx: &mut Context,
    range: &RangeArgs,
    kind: Option<TxnKind>,
    search: Option<String>,
) -> Result<()> {
    let range = range.resolve()?;
    let salon = &ctx.salon;
    let transactions = salon.transactions_in(&range, ctx.now);
    let services = dates::filter(&salon.services, &range, ctx.now);

    let totals = metrics::balance(&transactions, &services);
    let net_label = if totals.net >= 0.0 {
        "Balance".green().bold()
    } else {
        "Balance".red().bold()
    };
    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec![Cell::new("Total income".green()), Cell::new(money(totals.income))]);
    table.add_row(vec![Cell::new("Total expenses".red()), Cell::new(money(totals.expense))]);
    table.add_row(vec![Cell::new(net_label), Cell::new(money(totals.net))]);
    table.add_row(vec![
        Cell::new("  from services"),
        Cell::new(money(totals.service_income)),
    ]);
    println!("Balance: {}\n{table}", range.label());

    let query = LedgerQuery { kind, search };
    let entries = query.apply(metrics::ledger_entries(&transactions, &services));
    if entries.is_empty() {
        println!("\nNo ledger lines match.");
        return Ok(());
    }

    let mut ltable = Table::new();
    ltable.set_header(vec!["Date", "Concept", "Category", "Employee", "Source", "Amount"]);
    for e in &entries {
        let amount = match e.txn.kind {
            TxnKind::Income => format!("+{}", money(e.txn.amount)).green(),
            TxnKind::Expense => format!("-{}", money(e.txn.amount)).red(),
        };
        ltable.add_row(vec![
            Cell::new(long_date(&e.txn.date)),
            Cell::new(&e.txn.concept),
            Cell::new(&e.txn.category),
            Cell::new(salon.employee_label(e.txn.employee_id.as_deref())),
            Cell::new(if e.from_service { "service" } else { "manual" }),
            Cell::new(amount),
        ]);
    }
    println!("\nLedger ({} lines)\n{ltable}", entries.len());
    Ok(())
}
