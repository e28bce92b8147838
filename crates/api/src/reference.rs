// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Generation of booking references and machine codes.

use crate::error::{ApiError, translate_domain_error};
use chc_hire_domain::{Booking, BookingRef, Center, Machine, MachineType};
use rand::{Rng, RngExt};
use tracing::warn;

const REF_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Collision retries before giving up. With a 36^6 reference space this
/// only trips if the ledger is pathologically dense.
const MAX_REF_ATTEMPTS: usize = 16;

/// Generates a candidate booking reference: `BKG-` plus six characters
/// from `[A-Z0-9]`.
fn generate_candidate<R: Rng>(rng: &mut R) -> String {
    let suffix: String = (0..BookingRef::SUFFIX_LEN)
        .map(|_| {
            let idx: usize = rng.random_range(0..REF_CHARSET.len());
            char::from(REF_CHARSET[idx])
        })
        .collect();
    format!("{}{suffix}", BookingRef::PREFIX)
}

/// Generates a booking reference unique within the given ledger,
/// retrying on collision.
///
/// # Errors
///
/// Returns `ApiError::Internal` if no unique reference is found within
/// the retry budget.
pub fn generate_unique_booking_ref(existing: &[Booking]) -> Result<BookingRef, ApiError> {
    let mut rng = rand::rng();
    for _ in 0..MAX_REF_ATTEMPTS {
        let candidate: BookingRef =
            BookingRef::parse(&generate_candidate(&mut rng)).map_err(translate_domain_error)?;
        if !existing.iter().any(|b| b.booking_ref == candidate) {
            return Ok(candidate);
        }
    }
    warn!(
        attempts = MAX_REF_ATTEMPTS,
        ledger_size = existing.len(),
        "Booking reference generation exhausted its retry budget"
    );
    Err(ApiError::Internal {
        message: String::from("could not generate a unique booking reference"),
    })
}

/// Generates a machine code of the form `<CENTER>-<TYP>-<n>`, where `n`
/// counts the center's inventory, bumping the counter until the code is
/// unused.
#[must_use]
pub fn generate_machine_code(
    center: &Center,
    machine_type: MachineType,
    existing: &[Machine],
) -> String {
    let type_code: String = machine_type.type_code();
    let mut count: usize = existing.len() + 1;
    let mut code: String = format!("{}-{}-{}", center.code(), type_code, count);
    while existing.iter().any(|m| m.machine_code == code) {
        count += 1;
        code = format!("{}-{}-{}", center.code(), type_code, count);
    }
    code
}
