use std::cmp::Reverse;

use crate::dates::{parse_instant, Dated};
use crate::models::{Employee, Service, ServiceKind, Transaction, TxnKind};

pub const SERVICE_CATEGORY: &str = "servicios";

// ---------------------------------------------------------------------------
// Period metrics
// ---------------------------------------------------------------------------

/// The records of one reporting period.
#[derive(Debug, Clone, Copy)]
pub struct Period<'a> {
    pub transactions: &'a [Transaction],
    pub services: &'a [Service],
}

impl<'a> Period<'a> {
    pub fn new(transactions: &'a [Transaction], services: &'a [Service]) -> Self {
        Self {
            transactions,
            services,
        }
    }

    /// Manual income lines plus one synthetic income per service.
    pub fn income_total(&self) -> f64 {
        let manual: f64 = self
            .transactions
            .iter()
            .filter(|t| t.kind == TxnKind::Income)
            .map(|t| t.amount)
            .sum();
        let from_services: f64 = self.services.iter().map(|s| s.price).sum();
        manual + from_services
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub total: f64,
    pub count: usize,
    pub average: f64,
    pub trend_percent: f64,
}

/// Both totals count income transactions plus service prices, so the trend
/// compares like with like. A zero prior total gives a 0% trend.
pub fn aggregate(current: &Period, prior: &Period) -> Metrics {
    let total = current.income_total();
    let count = current.services.len();
    let average = if count > 0 { total / count as f64 } else { 0.0 };
    let prior_total = prior.income_total();
    let trend_percent = if prior_total > 0.0 {
        (total - prior_total) / prior_total * 100.0
    } else {
        0.0
    };
    Metrics {
        total,
        count,
        average,
        trend_percent,
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The income line a service implies. Derived on demand, never stored.
pub fn service_income(services: &[Service]) -> Vec<Transaction> {
    services
        .iter()
        .map(|s| Transaction {
            id: format!("servicio-{}", s.id),
            kind: TxnKind::Income,
            concept: format!("{} - {}", s.kind, s.client_name),
            amount: s.price,
            date: s.date.clone(),
            employee_id: Some(s.employee_id.clone()),
            category: SERVICE_CATEGORY.to_string(),
            description: None,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub txn: Transaction,
    pub from_service: bool,
}

impl Dated for LedgerEntry {
    fn date(&self) -> &str {
        &self.txn.date
    }
}

/// Manual transactions merged with synthetic service income, newest first.
pub fn ledger_entries(transactions: &[Transaction], services: &[Service]) -> Vec<LedgerEntry> {
    let mut entries: Vec<LedgerEntry> = transactions
        .iter()
        .cloned()
        .map(|txn| LedgerEntry {
            txn,
            from_service: false,
        })
        .chain(service_income(services).into_iter().map(|txn| LedgerEntry {
            txn,
            from_service: true,
        }))
        .collect();
    entries.sort_by_key(|e| Reverse(parse_instant(&e.txn.date)));
    entries
}

#[derive(Debug, Clone, Default)]
pub struct LedgerQuery {
    pub kind: Option<TxnKind>,
    pub search: Option<String>,
}

impl LedgerQuery {
    /// Kind must match when set; search is a case-insensitive substring of
    /// the concept or the category.
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        if self.kind.is_some_and(|k| k != entry.txn.kind) {
            return false;
        }
        match self.search.as_deref().map(str::to_lowercase) {
            Some(term) if !term.is_empty() => {
                entry.txn.concept.to_lowercase().contains(&term)
                    || entry.txn.category.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }

    pub fn apply(&self, entries: Vec<LedgerEntry>) -> Vec<LedgerEntry> {
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Balance {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    pub service_income: f64,
}

pub fn balance(transactions: &[Transaction], services: &[Service]) -> Balance {
    let income = Period::new(transactions, services).income_total();
    let expense: f64 = transactions
        .iter()
        .filter(|t| t.kind == TxnKind::Expense)
        .map(|t| t.amount)
        .sum();
    let service_income: f64 = services.iter().map(|s| s.price).sum();
    Balance {
        income,
        expense,
        net: income - expense,
        service_income,
    }
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PopularService {
    pub kind: ServiceKind,
    pub count: usize,
    pub revenue: f64,
}

/// Per-kind count and revenue, highest revenue first.
pub fn popular_services(services: &[Service], limit: usize) -> Vec<PopularService> {
    let mut by_kind: Vec<PopularService> = Vec::new();
    for s in services {
        match by_kind.iter_mut().find(|p| p.kind == s.kind) {
            Some(p) => {
                p.count += 1;
                p.revenue += s.price;
            }
            None => by_kind.push(PopularService {
                kind: s.kind,
                count: 1,
                revenue: s.price,
            }),
        }
    }
    by_kind.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    by_kind.truncate(limit);
    by_kind
}

pub fn recent_services(services: &[Service], limit: usize) -> Vec<Service> {
    let mut sorted = services.to_vec();
    sorted.sort_by_key(|s| Reverse(parse_instant(&s.date)));
    sorted.truncate(limit);
    sorted
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceStats {
    pub count: usize,
    pub revenue: f64,
    pub average: f64,
}

pub fn service_stats(services: &[Service]) -> ServiceStats {
    let count = services.len();
    let revenue: f64 = services.iter().map(|s| s.price).sum();
    ServiceStats {
        count,
        revenue,
        average: if count > 0 { revenue / count as f64 } else { 0.0 },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeMetrics {
    pub employee_id: String,
    pub name: String,
    pub stats: ServiceStats,
}

/// Service stats for every employee, highest revenue first.
pub fn employee_breakdown(employees: &[Employee], services: &[Service]) -> Vec<EmployeeMetrics> {
    let mut rows: Vec<EmployeeMetrics> = employees
        .iter()
        .map(|e| {
            let own: Vec<Service> = services
                .iter()
                .filter(|s| s.employee_id == e.id)
                .cloned()
                .collect();
            EmployeeMetrics {
                employee_id: e.id.clone(),
                name: e.full_name(),
                stats: service_stats(&own),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.stats.revenue.total_cmp(&a.stats.revenue));
    rows
}
