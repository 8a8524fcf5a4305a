use crate::auth::Credentials;
use crate::models::{Employee, Position, Role, Service, ServiceKind, Transaction, TxnKind};

// (id, first, last, email, phone, position, hire date, specialties, role, password)
type EmployeeRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    Position,
    &'static str,
    &'static [&'static str],
    Role,
    &'static str,
);

const EMPLOYEES: &[EmployeeRow] = &[
    ("1", "María", "González", "maria@different.com", "+34 123 456 789", Position::Gerente, "2020-01-15", &["Gestión", "Corte", "Peinado"], Role::Admin, "admin123"),
    ("2", "Ana", "Martínez", "ana@different.com", "+34 123 456 790", Position::Estilista, "2021-03-10", &["Corte", "Peinado", "Color"], Role::Staff, "ana123"),
    ("3", "Carmen", "López", "carmen@different.com", "+34 123 456 791", Position::Colorista, "2021-06-15", &["Color", "Permanente", "Alisado"], Role::Staff, "carmen123"),
    ("4", "Laura", "Fernández", "laura@different.com", "+34 123 456 792", Position::Manicurista, "2022-01-20", &["Manicura", "Pedicura", "Uñas de gel"], Role::Staff, "laura123"),
    ("5", "Sofia", "Ruiz", "sofia@different.com", "+34 123 456 793", Position::Estilista, "2022-09-05", &["Corte", "Peinado", "Maquillaje"], Role::Staff, "sofia123"),
];

// (id, date, kind, price, client, employee, created at)
const SERVICES: &[(&str, &str, ServiceKind, f64, &str, &str, &str)] = &[
    ("1", "2024-01-15", ServiceKind::Corte, 45.0, "Ana García", "2", "2024-01-15T10:30:00Z"),
    ("2", "2024-01-16", ServiceKind::Color, 85.0, "María Torres", "3", "2024-01-16T11:15:00Z"),
    ("3", "2024-01-17", ServiceKind::Manos, 25.0, "Laura Sánchez", "4", "2024-01-17T14:20:00Z"),
];

// (id, kind, concept, amount, date, employee, category, description)
const TRANSACTIONS: &[(&str, TxnKind, &str, f64, &str, Option<&str>, &str, &str)] = &[
    ("1", TxnKind::Income, "Corte y Peinado", 45.0, "2024-01-15", Some("2"), "Servicios", "Corte moderno y peinado"),
    ("2", TxnKind::Income, "Coloración completa", 85.0, "2024-01-16", Some("3"), "Servicios", "Coloración con mechas"),
    ("3", TxnKind::Income, "Manicura francesa", 25.0, "2024-01-17", Some("4"), "Servicios", "Manicura francesa con gel"),
    ("4", TxnKind::Expense, "Productos de coloración", 150.0, "2024-01-14", None, "Insumos", "Compra de tintes y oxidantes"),
    ("5", TxnKind::Expense, "Material de manicura", 80.0, "2024-01-13", None, "Insumos", "Esmaltes y limas profesionales"),
];

/// Demo logins as `(email, password)`. Development data only.
pub fn logins() -> impl Iterator<Item = (&'static str, &'static str)> {
    EMPLOYEES.iter().map(|row| (row.3, row.9))
}

pub fn employees() -> Vec<Employee> {
    EMPLOYEES
        .iter()
        .map(|&(id, first, last, email, phone, position, hired, specialties, role, password)| Employee {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            position,
            hire_date: hired.to_string(),
            avatar: String::new(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            active: true,
            role,
            credentials: Some(Credentials::new(password)),
        })
        .collect()
}

pub fn services() -> Vec<Service> {
    SERVICES
        .iter()
        .map(|&(id, date, kind, price, client, employee, created)| Service {
            id: id.to_string(),
            date: date.to_string(),
            kind,
            price,
            client_name: client.to_string(),
            employee_id: employee.to_string(),
            created_at: created.to_string(),
        })
        .collect()
}

pub fn transactions() -> Vec<Transaction> {
    TRANSACTIONS
        .iter()
        .map(|&(id, kind, concept, amount, date, employee, category, description)| Transaction {
            id: id.to_string(),
            kind,
            concept: concept.to_string(),
            amount,
            date: date.to_string(),
            employee_id: employee.map(str::to_string),
            category: category.to_string(),
            description: Some(description.to_string()),
        })
        .collect()
}
