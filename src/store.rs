use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::auth::{temporary_password, Credentials};
use crate::dates::{parse_date, parse_instant, DateRange};
use crate::demo;
use crate::error::{Result, SalonError};
use crate::models::{Employee, Position, Role, Service, ServiceKind, Transaction, TxnKind};

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

pub const UNASSIGNED: &str = "Unassigned";
pub const UNKNOWN_EMPLOYEE: &str = "Unknown employee";

/// Every record the salon knows about, held in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Salon {
    #[serde(rename = "empleadas", default)]
    pub employees: Vec<Employee>,
    #[serde(rename = "servicios", default)]
    pub services: Vec<Service>,
    #[serde(rename = "transacciones", default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub position: Option<Position>,
    /// Case-insensitive match on first name, last name or email.
    pub search: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceQuery {
    pub employee_id: Option<String>,
    pub range: DateRange,
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: Position,
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewService {
    pub date: String,
    pub kind: ServiceKind,
    pub price: f64,
    pub client_name: String,
    pub employee_id: String,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TxnKind,
    pub concept: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
    pub employee_id: Option<String>,
    pub description: Option<String>,
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SalonError::Validation(format!("Missing required field: {field}")));
    }
    Ok(trimmed.to_string())
}

fn valid_amount(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(SalonError::Validation(format!(
            "{field} must be a non-negative number, got {value}"
        )));
    }
    Ok(value)
}

fn valid_date(field: &str, value: &str) -> Result<String> {
    let value = required(field, value)?;
    parse_date(&value)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or_else(|| SalonError::Validation(format!("{field} must be YYYY-MM-DD, got '{value}'")))
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Next numeric id after the largest numeric id in `ids`.
fn next_id<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    let max = ids.filter_map(|id| id.parse::<u64>().ok()).max().unwrap_or(0);
    (max + 1).to_string()
}

impl Salon {
    pub fn demo() -> Self {
        Self {
            employees: demo::employees(),
            services: demo::services(),
            transactions: demo::transactions(),
        }
    }

    /// Read a snapshot, or start from the demo seed when none exists yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no snapshot, using demo seed");
            return Ok(Self::demo());
        }
        let content = std::fs::read_to_string(path)?;
        let salon: Salon = serde_json::from_str(&content)?;
        debug!(
            path = %path.display(),
            employees = salon.employees.len(),
            services = salon.services.len(),
            transactions = salon.transactions.len(),
            "snapshot loaded"
        );
        Ok(salon)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, format!("{json}\n"))?;
        debug!(path = %path.display(), "snapshot saved");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Employees
    // -----------------------------------------------------------------------

    pub fn employees(&self, filter: &EmployeeFilter) -> Vec<&Employee> {
        let term = filter
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        self.employees
            .iter()
            .filter(|e| filter.position.map_or(true, |p| e.position == p))
            .filter(|e| filter.active.map_or(true, |a| e.active == a))
            .filter(|e| match &term {
                Some(t) => {
                    e.first_name.to_lowercase().contains(t)
                        || e.last_name.to_lowercase().contains(t)
                        || e.email.to_lowercase().contains(t)
                }
                None => true,
            })
            .collect()
    }

    pub fn employee(&self, id: &str) -> Result<&Employee> {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| SalonError::EmployeeNotFound(id.to_string()))
    }

    /// Full name for display; a missing or dangling reference gets a fallback label.
    pub fn employee_label(&self, id: Option<&str>) -> String {
        match id {
            None => UNASSIGNED.to_string(),
            Some(id) => self
                .employee(id)
                .map(Employee::full_name)
                .unwrap_or_else(|_| UNKNOWN_EMPLOYEE.to_string()),
        }
    }

    pub fn add_employee(&mut self, form: NewEmployee, today: NaiveDate) -> Result<(Employee, String)> {
        let first_name = required("first name", &form.first_name)?;
        let last_name = required("last name", &form.last_name)?;
        let email = required("email", &form.email)?;
        let email_re = Regex::new(EMAIL_PATTERN).map_err(|e| SalonError::Other(e.to_string()))?;
        if !email_re.is_match(&email) {
            return Err(SalonError::Validation(format!("Invalid email address: {email}")));
        }
        if self.employees.iter().any(|e| e.email.eq_ignore_ascii_case(&email)) {
            return Err(SalonError::Validation(format!("Email already in use: {email}")));
        }
        let specialties: Vec<String> = form
            .specialties
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if specialties.is_empty() {
            return Err(SalonError::Validation(
                "At least one specialty is required".to_string(),
            ));
        }

        let password = temporary_password();
        let employee = Employee {
            id: next_id(self.employees.iter().map(|e| e.id.as_str())),
            first_name,
            last_name,
            email,
            phone: form.phone.trim().to_string(),
            position: form.position,
            hire_date: today.format("%Y-%m-%d").to_string(),
            avatar: String::new(),
            specialties,
            active: true,
            role: Role::Staff,
            credentials: Some(Credentials::new(&password)),
        };
        info!(id = %employee.id, email = %employee.email, "employee created");
        self.employees.push(employee.clone());
        Ok((employee, password))
    }

    // -----------------------------------------------------------------------
    // Services
    // -----------------------------------------------------------------------

    /// Services matching `query` at `now`, newest first.
    pub fn services(&self, query: &ServiceQuery, now: NaiveDateTime) -> Vec<Service> {
        let own: Vec<Service> = self
            .services
            .iter()
            .filter(|s| query.employee_id.as_deref().map_or(true, |id| s.employee_id == id))
            .cloned()
            .collect();
        let mut found = query.range.filter(&own, now);
        found.sort_by_key(|s| std::cmp::Reverse(parse_instant(&s.date)));
        debug!(range = %query.range, count = found.len(), "services queried");
        found
    }

    pub fn add_service(&mut self, form: NewService, created: DateTime<Utc>) -> Result<Service> {
        let service = Service {
            id: next_id(self.services.iter().map(|s| s.id.as_str())),
            date: valid_date("date", &form.date)?,
            kind: form.kind,
            price: valid_amount("price", form.price)?,
            client_name: required("client name", &form.client_name)?,
            employee_id: required("employee", &form.employee_id)?,
            created_at: created.to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        info!(id = %service.id, kind = %service.kind, employee = %service.employee_id, "service logged");
        self.services.push(service.clone());
        Ok(service)
    }

    // -----------------------------------------------------------------------
    // Transactions
    // -----------------------------------------------------------------------

    pub fn transactions_in(&self, range: &DateRange, now: NaiveDateTime) -> Vec<Transaction> {
        range.filter(&self.transactions, now)
    }

    pub fn add_transaction(&mut self, form: NewTransaction) -> Result<Transaction> {
        let txn = Transaction {
            id: next_id(self.transactions.iter().map(|t| t.id.as_str())),
            kind: form.kind,
            concept: required("concept", &form.concept)?,
            amount: valid_amount("amount", form.amount)?,
            date: valid_date("date", &form.date)?,
            employee_id: optional_text(form.employee_id),
            category: required("category", &form.category)?,
            description: optional_text(form.description),
        };
        info!(id = %txn.id, kind = %txn.kind, amount = txn.amount, "transaction recorded");
        self.transactions.push(txn.clone());
        Ok(txn)
    }
}
