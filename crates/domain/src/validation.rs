// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation for machines, farmers, and bookings.

use crate::error::DomainError;
use crate::types::{Booking, BookingRef, FarmerDetails, Machine};

/// Validates a farmer's identity fields.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The contact is not exactly 10 ASCII digits
/// - The email has no `@` separating a non-empty local part and domain
/// - The Aadhaar number is not exactly 12 ASCII digits
pub fn validate_farmer_fields(farmer: &FarmerDetails) -> Result<(), DomainError> {
    if farmer.name.trim().is_empty() {
        return Err(DomainError::InvalidFarmerName(String::from(
            "name must not be empty",
        )));
    }

    if farmer.contact.len() != 10 || !farmer.contact.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidFarmerContact(format!(
            "'{}' is not a 10-digit contact number",
            farmer.contact
        )));
    }

    match farmer.email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
        _ => {
            return Err(DomainError::InvalidFarmerEmail(format!(
                "'{}' is not a valid email address",
                farmer.email
            )));
        }
    }

    if farmer.aadhaar.len() != 12 || !farmer.aadhaar.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidAadhaar(format!(
            "'{}' is not a 12-digit Aadhaar number",
            farmer.aadhaar
        )));
    }

    Ok(())
}

/// Validates an optional requested field area.
///
/// # Errors
///
/// Returns `DomainError::InvalidFieldArea` if the area is negative, zero,
/// or not a finite number.
pub fn validate_field_area(field_area: Option<f64>) -> Result<(), DomainError> {
    if let Some(area) = field_area
        && (!area.is_finite() || area <= 0.0)
    {
        return Err(DomainError::InvalidFieldArea(format!(
            "field area must be a positive number, got {area}"
        )));
    }
    Ok(())
}

/// Validates a machine code.
///
/// Codes are non-empty and composed of uppercase alphanumerics and hyphens.
///
/// # Errors
///
/// Returns `DomainError::InvalidMachineCode` otherwise.
pub fn validate_machine_code(machine_code: &str) -> Result<(), DomainError> {
    if machine_code.is_empty()
        || !machine_code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(DomainError::InvalidMachineCode(format!(
            "'{machine_code}' must be non-empty uppercase alphanumerics and hyphens"
        )));
    }
    Ok(())
}

/// Validates a center code.
///
/// # Errors
///
/// Returns `DomainError::InvalidCenterCode` if the code is empty or contains
/// characters other than uppercase alphanumerics.
pub fn validate_center_code(code: &str) -> Result<(), DomainError> {
    if code.is_empty()
        || !code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(DomainError::InvalidCenterCode(format!(
            "'{code}' must be non-empty uppercase alphanumerics"
        )));
    }
    Ok(())
}

/// Validates a machine's field constraints.
///
/// # Errors
///
/// Returns an error if:
/// - The machine code is malformed
/// - The machine name is empty
/// - The purchase year is outside 1950..=2100
/// - The cumulative hours used is negative or not finite
pub fn validate_machine_fields(machine: &Machine) -> Result<(), DomainError> {
    validate_machine_code(&machine.machine_code)?;

    if machine.machine_name.trim().is_empty() {
        return Err(DomainError::InvalidMachineName(String::from(
            "machine name must not be empty",
        )));
    }

    if !(1950..=2100).contains(&machine.purchase_year) {
        return Err(DomainError::InvalidPurchaseYear(machine.purchase_year));
    }

    if !machine.total_hours_used.is_finite() || machine.total_hours_used < 0.0 {
        return Err(DomainError::InvalidHoursUsed(format!(
            "hours used must be non-negative, got {}",
            machine.total_hours_used
        )));
    }

    Ok(())
}

/// Validates that a booking reference is not already present in the ledger.
///
/// # Errors
///
/// Returns `DomainError::DuplicateBookingRef` if any existing booking
/// carries the same reference.
pub fn validate_booking_ref_unique(
    booking_ref: &BookingRef,
    bookings: &[Booking],
) -> Result<(), DomainError> {
    if bookings.iter().any(|b| &b.booking_ref == booking_ref) {
        return Err(DomainError::DuplicateBookingRef {
            booking_ref: booking_ref.value().to_string(),
        });
    }
    Ok(())
}
