//! Account Service - customer registration, customer and staff login

use serde::Serialize;

use crate::domain::{CustomerRepository, DomainError, NewCustomer, StaffRepository};
use crate::infrastructure::auth::{
    JwtKeys, ROLE_CUSTOMER, ROLE_STAFF, hash_password, verify_password,
};
use crate::models::{Customer, StaffMember};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Registration form as submitted by the client
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerSession {
    pub token: String,
    pub customer: Customer,
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffSession {
    pub token: String,
    pub staff: StaffMember,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Check a registration form. Returns the trimmed name and normalized email.
pub fn validate_registration(form: &Registration) -> Result<(String, String), DomainError> {
    let name = form.name.trim();
    if name.chars().count() < 2 {
        return Err(DomainError::validation(
            "Name must be at least 2 characters",
        ));
    }

    let email = normalize_email(&form.email);
    if !is_valid_email(&email) {
        return Err(DomainError::validation("Invalid email address"));
    }

    if form.password.chars().count() < 6 {
        return Err(DomainError::validation(
            "Password must be at least 6 characters",
        ));
    }

    if form.password != form.confirm_password {
        return Err(DomainError::validation("Passwords do not match"));
    }

    Ok((name.to_string(), email))
}

pub async fn register(
    customers: &dyn CustomerRepository,
    form: Registration,
) -> Result<Customer, DomainError> {
    let (name, email) = validate_registration(&form)?;

    if customers.exists_by_email(&email).await? {
        return Err(DomainError::Conflict(
            "Email is already registered".to_string(),
        ));
    }

    let password_hash = hash_password(&form.password).map_err(DomainError::Internal)?;

    let customer = customers
        .create(NewCustomer {
            name,
            email,
            password_hash,
        })
        .await?;

    tracing::info!("New customer registered: {} ({})", customer.email, customer.id);
    Ok(customer)
}

pub async fn login(
    customers: &dyn CustomerRepository,
    jwt: &JwtKeys,
    email: &str,
    password: &str,
) -> Result<CustomerSession, DomainError> {
    let email = normalize_email(email);

    let Some(credentials) = customers.find_credentials(&email).await? else {
        tracing::warn!("Login failed: unknown customer email");
        return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    if !verify_password(password, &credentials.password_hash).map_err(DomainError::Internal)? {
        tracing::warn!("Login failed: wrong password for customer {}", credentials.customer.id);
        return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let customer = credentials.customer;
    let token = jwt
        .create(customer.id, ROLE_CUSTOMER, &customer.name)
        .map_err(DomainError::Internal)?;

    tracing::info!("Customer {} logged in", customer.id);
    Ok(CustomerSession { token, customer })
}

pub async fn staff_login(
    staff: &dyn StaffRepository,
    jwt: &JwtKeys,
    email: &str,
    password: &str,
) -> Result<StaffSession, DomainError> {
    let email = normalize_email(email);

    let Some(credentials) = staff.find_credentials(&email).await? else {
        tracing::warn!("Staff login failed: unknown email");
        return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    if !verify_password(password, &credentials.password_hash).map_err(DomainError::Internal)? {
        tracing::warn!("Staff login failed: wrong password for {}", credentials.staff.id);
        return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let member = credentials.staff;
    let token = jwt
        .create(member.id, ROLE_STAFF, &member.name)
        .map_err(DomainError::Internal)?;

    tracing::info!("Staff member {} logged in", member.id);
    Ok(StaffSession {
        token,
        staff: member,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, password: &str, confirm: &str) -> Registration {
        Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn valid_registration_is_normalized() {
        let (name, email) =
            validate_registration(&form("  Lan  ", " Lan@Example.COM ", "secret", "secret"))
                .unwrap();
        assert_eq!(name, "Lan");
        assert_eq!(email, "lan@example.com");
    }

    #[test]
    fn short_name_is_rejected() {
        let err = validate_registration(&form(" A ", "a@b.c", "secret", "secret")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["plain", "@example.com", "user@", "a@b@c"] {
            assert!(
                validate_registration(&form("Lan", email, "secret", "secret")).is_err(),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn short_password_is_rejected() {
        let err = validate_registration(&form("Lan", "a@b.c", "12345", "12345")).unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation("Password must be at least 6 characters".to_string())
        );
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let err = validate_registration(&form("Lan", "a@b.c", "secret1", "secret2")).unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation("Passwords do not match".to_string())
        );
    }
}
