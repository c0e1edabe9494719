//! Checkout field validation
//!
//! Pure, no I/O. Runs before any database access so malformed requests
//! never open a transaction. Length checks count characters rather than
//! bytes; shipping fields are routinely non-ASCII.

use std::collections::BTreeMap;

use super::checkout::CheckoutRequest;
use crate::db::models::ShippingAddress;

/// Field-scoped validation messages, keyed by request field name
pub type FieldErrors = BTreeMap<String, Vec<String>>;

const MIN_FULL_NAME_CHARS: usize = 3;
const MIN_CITY_CHARS: usize = 2;
const MIN_ADDRESS_CHARS: usize = 10;
const POSTAL_CODE_DIGITS: usize = 10;

/// Validate shipping fields and cart shape.
///
/// Returns the normalized shipping fields (trimmed, postal code stripped
/// of separators) or every failed field with its messages.
pub fn validate_request(req: &CheckoutRequest) -> Result<ShippingAddress, FieldErrors> {
    let mut errors = FieldErrors::new();

    if req.items.is_empty() {
        push(&mut errors, "items", "cart is empty");
    } else if req.items.iter().any(|line| line.qty < 1) {
        push(&mut errors, "items", "qty must be at least 1");
    }

    let full_name = require(&mut errors, "full_name", &req.full_name);
    let phone = require(&mut errors, "phone", &req.phone);
    let address = require(&mut errors, "address", &req.address);
    let city = require(&mut errors, "city", &req.city);
    let postal_code = require(&mut errors, "postal_code", &req.postal_code);

    if let Some(v) = full_name
        && v.chars().count() < MIN_FULL_NAME_CHARS
    {
        push(&mut errors, "full_name", "full name must be at least 3 characters");
    }

    if let Some(v) = phone
        && !is_valid_phone(v)
    {
        push(&mut errors, "phone", "phone number is not valid (example: 09123456789)");
    }

    if let Some(v) = address
        && v.chars().count() < MIN_ADDRESS_CHARS
    {
        push(&mut errors, "address", "address must be at least 10 characters");
    }

    if let Some(v) = city
        && v.chars().count() < MIN_CITY_CHARS
    {
        push(&mut errors, "city", "city name is not valid");
    }

    let postal_norm = postal_code.map(normalize_postal_code);
    if let Some(ref v) = postal_norm
        && !is_valid_postal_code(v)
    {
        push(&mut errors, "postal_code", "postal code must be 10 digits");
    }

    match (full_name, phone, address, city, postal_norm) {
        (Some(full_name), Some(phone), Some(address), Some(city), Some(postal_code))
            if errors.is_empty() =>
        {
            Ok(ShippingAddress {
                full_name: full_name.to_string(),
                phone: phone.to_string(),
                address: address.to_string(),
                city: city.to_string(),
                postal_code,
            })
        }
        _ => Err(errors),
    }
}

fn push(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}

/// Trimmed, non-empty value of a required field, recording an error otherwise
fn require<'a>(
    errors: &mut FieldErrors,
    field: &str,
    value: &'a Option<String>,
) -> Option<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            push(errors, field, "this field is required");
            None
        }
    }
}

/// Local mobile (`09` + 9 digits) or international (`+989` + 9 digits).
/// ASCII digits only; localized digit forms must be transliterated by
/// the client.
fn is_valid_phone(value: &str) -> bool {
    let local = value.len() == 11
        && value.starts_with("09")
        && value.bytes().all(|b| b.is_ascii_digit());
    let international = value.len() == 13
        && value.starts_with("+989")
        && value[1..].bytes().all(|b| b.is_ascii_digit());
    local || international
}

/// Strip the separators people type into postal codes
fn normalize_postal_code(value: &str) -> String {
    value.chars().filter(|c| *c != '-' && *c != ' ').collect()
}

fn is_valid_postal_code(value: &str) -> bool {
    value.len() == POSTAL_CODE_DIGITS && value.bytes().all(|b| b.is_ascii_digit())
}
