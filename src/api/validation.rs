//! Input validation for API requests.
//!
//! Each function validates a single field and returns an error message
//! suitable for the `ValidationErrorBuilder` in the `error` module.

pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username is required".to_string());
    }
    if username.len() > 64 {
        return Err("Username is too long (max 64 characters)".to_string());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    if password.len() > 128 {
        return Err("Password is too long (max 128 characters)".to_string());
    }
    Ok(())
}

pub fn validate_sweet_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }
    if name.len() > 128 {
        return Err("Name is too long (max 128 characters)".to_string());
    }
    Ok(())
}

pub fn validate_category(category: &str) -> Result<(), String> {
    if category.trim().is_empty() {
        return Err("Category is required".to_string());
    }
    if category.len() > 64 {
        return Err("Category is too long (max 64 characters)".to_string());
    }
    Ok(())
}

pub fn validate_price(price: f64) -> Result<(), String> {
    if !price.is_finite() || price < 0.0 {
        return Err("Price must be a non-negative number".to_string());
    }
    Ok(())
}

pub fn validate_quantity(quantity: i64) -> Result<(), String> {
    if quantity < 0 {
        return Err("Quantity must not be negative".to_string());
    }
    Ok(())
}

/// Restock amounts may be negative (a stock correction), but huge magnitudes
/// would overflow SQLite's integer addition and corrupt the column type.
pub fn validate_restock_amount(amount: i64) -> Result<(), String> {
    const MAX_RESTOCK_AMOUNT: i64 = 1_000_000_000;
    if !(-MAX_RESTOCK_AMOUNT..=MAX_RESTOCK_AMOUNT).contains(&amount) {
        return Err("Restock amount is out of range".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(2.5).is_ok());
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_restock_amount() {
        assert!(validate_restock_amount(5).is_ok());
        assert!(validate_restock_amount(-5).is_ok());
        assert!(validate_restock_amount(1_000_000_000).is_ok());
        assert!(validate_restock_amount(1_000_000_001).is_err());
        assert!(validate_restock_amount(i64::MAX).is_err());
        assert!(validate_restock_amount(i64::MIN).is_err());
    }
}
