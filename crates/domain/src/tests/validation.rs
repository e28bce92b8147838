// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Booking, BookingRef, Center, DateRange, DomainError, FarmerDetails, Machine, MachineType,
    validate_booking_ref_unique, validate_center_code, validate_farmer_fields,
    validate_field_area, validate_machine_code, validate_machine_fields,
};
use time::{Date, Month};

fn test_center() -> Center {
    Center::new("LUD", "Ludhiana CHC", "Ludhiana", "Punjab")
}

fn valid_farmer() -> FarmerDetails {
    FarmerDetails {
        name: String::from("Test Farmer"),
        contact: String::from("9998887776"),
        email: String::from("farmer@example.com"),
        aadhaar: String::from("123412341234"),
    }
}

fn valid_machine() -> Machine {
    Machine::new(
        "LUD-HAP-1",
        "Happy Seeder 9ft",
        MachineType::HappySeeder,
        2023,
        test_center(),
    )
}

#[test]
fn test_valid_farmer_passes() {
    assert!(validate_farmer_fields(&valid_farmer()).is_ok());
}

#[test]
fn test_empty_farmer_name_rejected() {
    let mut farmer = valid_farmer();
    farmer.name = String::from("   ");
    assert!(matches!(
        validate_farmer_fields(&farmer),
        Err(DomainError::InvalidFarmerName(_))
    ));
}

#[test]
fn test_farmer_contact_must_be_ten_digits() {
    let mut farmer = valid_farmer();

    farmer.contact = String::from("12345");
    assert!(matches!(
        validate_farmer_fields(&farmer),
        Err(DomainError::InvalidFarmerContact(_))
    ));

    farmer.contact = String::from("99988877761");
    assert!(validate_farmer_fields(&farmer).is_err());

    farmer.contact = String::from("999888777a");
    assert!(validate_farmer_fields(&farmer).is_err());
}

#[test]
fn test_farmer_email_must_have_local_and_domain() {
    let mut farmer = valid_farmer();

    farmer.email = String::from("not-an-email");
    assert!(matches!(
        validate_farmer_fields(&farmer),
        Err(DomainError::InvalidFarmerEmail(_))
    ));

    farmer.email = String::from("@example.com");
    assert!(validate_farmer_fields(&farmer).is_err());

    farmer.email = String::from("farmer@localhost");
    assert!(validate_farmer_fields(&farmer).is_err());
}

#[test]
fn test_aadhaar_must_be_twelve_digits() {
    let mut farmer = valid_farmer();

    farmer.aadhaar = String::from("12341234123");
    assert!(matches!(
        validate_farmer_fields(&farmer),
        Err(DomainError::InvalidAadhaar(_))
    ));

    farmer.aadhaar = String::from("1234-1234-12");
    assert!(validate_farmer_fields(&farmer).is_err());
}

#[test]
fn test_field_area_bounds() {
    assert!(validate_field_area(None).is_ok());
    assert!(validate_field_area(Some(2.5)).is_ok());
    assert!(matches!(
        validate_field_area(Some(0.0)),
        Err(DomainError::InvalidFieldArea(_))
    ));
    assert!(validate_field_area(Some(-1.0)).is_err());
    assert!(validate_field_area(Some(f64::NAN)).is_err());
}

#[test]
fn test_machine_code_format() {
    assert!(validate_machine_code("LUD-HAP-1").is_ok());
    assert!(validate_machine_code("").is_err());
    assert!(validate_machine_code("lud-hap-1").is_err());
    assert!(validate_machine_code("LUD HAP 1").is_err());
}

#[test]
fn test_center_code_format() {
    assert!(validate_center_code("LUD").is_ok());
    assert!(validate_center_code("").is_err());
    assert!(validate_center_code("LUD-1").is_err());
}

#[test]
fn test_machine_field_constraints() {
    assert!(validate_machine_fields(&valid_machine()).is_ok());

    let mut machine = valid_machine();
    machine.purchase_year = 1900;
    assert!(matches!(
        validate_machine_fields(&machine),
        Err(DomainError::InvalidPurchaseYear(1900))
    ));

    let mut machine = valid_machine();
    machine.total_hours_used = -4.0;
    assert!(matches!(
        validate_machine_fields(&machine),
        Err(DomainError::InvalidHoursUsed(_))
    ));

    let mut machine = valid_machine();
    machine.machine_name = String::new();
    assert!(matches!(
        validate_machine_fields(&machine),
        Err(DomainError::InvalidMachineName(_))
    ));
}

#[test]
fn test_booking_ref_uniqueness() {
    let booking_ref = BookingRef::parse("BKG-A1B2C3").expect("valid test reference");
    let range = DateRange::new(
        Date::from_calendar_date(2026, Month::March, 1).expect("valid test date"),
        Date::from_calendar_date(2026, Month::March, 5).expect("valid test date"),
    )
    .expect("valid test range");
    let existing = Booking::new(
        booking_ref.clone(),
        test_center(),
        "LUD-HAP-1",
        range,
        valid_farmer(),
        None,
        None,
    );

    assert!(validate_booking_ref_unique(&booking_ref, &[]).is_ok());
    assert!(matches!(
        validate_booking_ref_unique(&booking_ref, std::slice::from_ref(&existing)),
        Err(DomainError::DuplicateBookingRef { .. })
    ));

    let fresh = BookingRef::parse("BKG-D4E5F6").expect("valid test reference");
    assert!(validate_booking_ref_unique(&fresh, &[existing]).is_ok());
}
