use crate::cli::Context;
use crate::error::Result;
use crate::fmt::money;
use crate::models::TxnKind;
use crate::store::NewTransaction;

pub struct TransactionArgs {
    pub kind: TxnKind,
    pub concept: String,
    pub amount: f64,
    pub date: Option<String>,
    pub category: String,
    pub employee: Option<String>,
    pub description: Option<String>,
}

pub fn add(ctx: &mut Context, args: TransactionArgs) -> Result<()> {
    let form = NewTransaction {
        kind: args.kind,
        concept: args.concept,
        amount: args.amount,
        date: args.date.unwrap_or_else(|| ctx.today_str()),
        category: args.category,
        employee_id: args.employee,
        description: args.description,
    };
    let txn = ctx.salon.add_transaction(form)?;
    ctx.save()?;
    println!(
        "Recorded {} '{}' on {}: {} [{}]",
        txn.kind,
        txn.concept,
        txn.date,
        money(txn.amount),
        txn.category
    );
    Ok(())
}
