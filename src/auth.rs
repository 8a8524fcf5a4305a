use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::error::{Result, SalonError};
use crate::models::{Employee, Role};

const SALT_LEN: usize = 16;
const TEMP_PASSWORD_LEN: usize = 12;

/// Salted SHA-256 password digest. Only the hex salt and hex digest are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub salt: String,
    pub hash: String,
}

impl Credentials {
    pub fn new(password: &str) -> Self {
        let salt: [u8; SALT_LEN] = rand::thread_rng().gen();
        let salt = hex::encode(salt);
        let hash = digest(&salt, password);
        Self { salt, hash }
    }

    pub fn verify(&self, password: &str) -> bool {
        let candidate = digest(&self.salt, password);
        // constant-time comparison
        candidate.len() == self.hash.len()
            && candidate
                .bytes()
                .zip(self.hash.bytes())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Random password handed to a newly created employee.
pub fn temporary_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TEMP_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

/// The logged-in user, passed explicitly to every gated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    /// Set for staff logins; services they log are attributed to it.
    pub employee_id: Option<String>,
}

impl Session {
    pub fn for_employee(employee: &Employee) -> Self {
        Self {
            user_id: employee.id.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            role: employee.role,
            employee_id: match employee.role {
                Role::Staff => Some(employee.id.clone()),
                Role::Admin => None,
            },
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Look up `email` (case-insensitive) and check the password.
pub fn login(employees: &[Employee], email: &str, password: &str) -> Result<Session> {
    let wanted = email.trim();
    let found = employees
        .iter()
        .find(|e| e.email.eq_ignore_ascii_case(wanted))
        .filter(|e| e.credentials.as_ref().is_some_and(|c| c.verify(password)));

    match found {
        Some(employee) => {
            info!(user = %employee.email, role = %employee.role, "login");
            Ok(Session::for_employee(employee))
        }
        None => {
            warn!(user = %wanted, "login rejected");
            Err(SalonError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn employee(id: &str, email: &str, role: Role, password: Option<&str>) -> Employee {
        Employee {
            id: id.to_string(),
            first_name: "Ana".to_string(),
            last_name: "Martínez".to_string(),
            email: email.to_string(),
            phone: String::new(),
            position: Position::Estilista,
            hire_date: "2021-03-10".to_string(),
            avatar: String::new(),
            specialties: vec!["Corte".to_string()],
            active: true,
            role,
            credentials: password.map(Credentials::new),
        }
    }

    #[test]
    fn test_credentials_never_store_plaintext() {
        let creds = Credentials::new("ana123");
        assert!(!creds.hash.contains("ana123"));
        assert_eq!(creds.hash.len(), 64);
        assert_eq!(creds.salt.len(), SALT_LEN * 2);
        let json = serde_json::to_string(&creds).unwrap();
        assert!(!json.contains("ana123"));
    }

    #[test]
    fn test_verify() {
        let creds = Credentials::new("ana123");
        assert!(creds.verify("ana123"));
        assert!(!creds.verify("ana124"));
        assert!(!creds.verify(""));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let a = Credentials::new("secret");
        let b = Credentials::new("secret");
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn test_login_staff_sets_employee_id() {
        let staff = vec![employee("2", "ana@different.com", Role::Staff, Some("ana123"))];
        let session = login(&staff, "ANA@different.com", "ana123").unwrap();
        assert_eq!(session.role, Role::Staff);
        assert_eq!(session.employee_id.as_deref(), Some("2"));
        assert!(!session.is_admin());
    }

    #[test]
    fn test_login_admin_has_no_employee_id() {
        let staff = vec![employee("1", "maria@different.com", Role::Admin, Some("admin123"))];
        let session = login(&staff, "maria@different.com", "admin123").unwrap();
        assert!(session.is_admin());
        assert!(session.employee_id.is_none());
    }

    #[test]
    fn test_login_rejects_wrong_password_and_missing_credentials() {
        let staff = vec![
            employee("2", "ana@different.com", Role::Staff, Some("ana123")),
            employee("3", "carmen@different.com", Role::Staff, None),
        ];
        assert!(matches!(
            login(&staff, "ana@different.com", "nope"),
            Err(SalonError::InvalidCredentials)
        ));
        assert!(login(&staff, "carmen@different.com", "").is_err());
        assert!(login(&staff, "nobody@different.com", "ana123").is_err());
    }

    #[test]
    fn test_temporary_password_shape() {
        let pw = temporary_password();
        assert_eq!(pw.len(), TEMP_PASSWORD_LEN);
        assert!(pw.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
