use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::auth::Credentials;

/// Access level of a login. Wire values are `admin` and `empleada`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "empleada")]
    Staff,
}

impl Role {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "empleada",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Job title of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Estilista,
    Colorista,
    Manicurista,
    Gerente,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Estilista,
        Position::Colorista,
        Position::Manicurista,
        Position::Gerente,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Estilista => "Estilista",
            Self::Colorista => "Colorista",
            Self::Manicurista => "Manicurista",
            Self::Gerente => "Gerente",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| {
                format!("unknown role '{s}' (expected Estilista, Colorista, Manicurista or Gerente)")
            })
    }
}

/// The fixed catalogue of billable services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    Peinado,
    Lavado,
    Corte,
    Color,
    Reflejos,
    #[serde(rename = "Depilación")]
    Depilacion,
    Manos,
    #[serde(rename = "Belleza de pies")]
    BellezaDePies,
    Pedicuria,
    Ampollas,
    Otros,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 11] = [
        ServiceKind::Peinado,
        ServiceKind::Lavado,
        ServiceKind::Corte,
        ServiceKind::Color,
        ServiceKind::Reflejos,
        ServiceKind::Depilacion,
        ServiceKind::Manos,
        ServiceKind::BellezaDePies,
        ServiceKind::Pedicuria,
        ServiceKind::Ampollas,
        ServiceKind::Otros,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Peinado => "Peinado",
            Self::Lavado => "Lavado",
            Self::Corte => "Corte",
            Self::Color => "Color",
            Self::Reflejos => "Reflejos",
            Self::Depilacion => "Depilación",
            Self::Manos => "Manos",
            Self::BellezaDePies => "Belleza de pies",
            Self::Pedicuria => "Pedicuria",
            Self::Ampollas => "Ampollas",
            Self::Otros => "Otros",
        }
    }

    /// ASCII, dash-separated form accepted on the command line.
    fn slug(&self) -> Option<&'static str> {
        match self {
            Self::Depilacion => Some("depilacion"),
            Self::BellezaDePies => Some("belleza-de-pies"),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|k| k.name().to_lowercase() == wanted || k.slug() == Some(wanted.as_str()))
            .copied()
            .ok_or_else(|| format!("unknown service '{s}'"))
    }
}

/// Direction of a ledger line. Wire values are `ingreso` and `egreso`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxnKind {
    #[serde(rename = "ingreso")]
    Income,
    #[serde(rename = "egreso")]
    Expense,
}

impl TxnKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TxnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TxnKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "ingreso" => Ok(Self::Income),
            "expense" | "egreso" => Ok(Self::Expense),
            other => Err(format!("unknown transaction kind '{other}' (expected income or expense)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "rol")]
    pub position: Position,
    #[serde(rename = "fechaIngreso")]
    pub hire_date: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(rename = "especialidades")]
    pub specialties: Vec<String>,
    #[serde(rename = "activa")]
    pub active: bool,
    #[serde(rename = "tipoUsuario")]
    pub role: Role,
    #[serde(rename = "credenciales", default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "servicio")]
    pub kind: ServiceKind,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "nombreCliente")]
    pub client_name: String,
    #[serde(rename = "empleadaId")]
    pub employee_id: String,
    #[serde(rename = "fechaCreacion")]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "tipo")]
    pub kind: TxnKind,
    #[serde(rename = "concepto")]
    pub concept: String,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "empleadaId", default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_wire_names_match_source() {
        let svc = Service {
            id: "1".into(),
            date: "2024-01-15".into(),
            kind: ServiceKind::BellezaDePies,
            price: 45.0,
            client_name: "Ana García".into(),
            employee_id: "2".into(),
            created_at: "2024-01-15T10:30:00Z".into(),
        };
        let json = serde_json::to_value(&svc).unwrap();
        assert_eq!(json["fecha"], "2024-01-15");
        assert_eq!(json["servicio"], "Belleza de pies");
        assert_eq!(json["nombreCliente"], "Ana García");
        assert_eq!(json["empleadaId"], "2");
        assert_eq!(json["fechaCreacion"], "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_transaction_optional_fields_omitted() {
        let txn = Transaction {
            id: "4".into(),
            kind: TxnKind::Expense,
            concept: "Productos de coloración".into(),
            amount: 150.0,
            date: "2024-01-14".into(),
            employee_id: None,
            category: "Insumos".into(),
            description: None,
        };
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["tipo"], "egreso");
        assert!(json.get("empleadaId").is_none());
        assert!(json.get("descripcion").is_none());
    }

    #[test]
    fn test_service_kind_parses_accented_and_slug_forms() {
        assert_eq!("Depilación".parse::<ServiceKind>(), Ok(ServiceKind::Depilacion));
        assert_eq!("depilacion".parse::<ServiceKind>(), Ok(ServiceKind::Depilacion));
        assert_eq!("belleza-de-pies".parse::<ServiceKind>(), Ok(ServiceKind::BellezaDePies));
        assert_eq!("CORTE".parse::<ServiceKind>(), Ok(ServiceKind::Corte));
        assert!("Coloración".parse::<ServiceKind>().is_err());
    }

    #[test]
    fn test_role_and_kind_parsing() {
        assert_eq!("gerente".parse::<Position>(), Ok(Position::Gerente));
        assert!("Barbero".parse::<Position>().is_err());
        assert_eq!("egreso".parse::<TxnKind>(), Ok(TxnKind::Expense));
        assert_eq!("Income".parse::<TxnKind>(), Ok(TxnKind::Income));
        assert_eq!(Role::Staff.to_string(), "empleada");
    }
}
