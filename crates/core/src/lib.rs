// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use chc_hire_domain::{Center, DomainError};

// Re-export public types and functions
pub use apply::{apply, apply_bootstrap};
pub use command::Command;
pub use error::CoreError;
pub use state::{BootstrapMetadata, BootstrapResult, State, TransitionResult};

/// Validates that a center exists in the metadata.
///
/// This is a read-only validation that does not create audit events.
///
/// # Errors
///
/// Returns `DomainError::CenterNotFound` if the center has not been created.
pub fn validate_center_exists(
    metadata: &BootstrapMetadata,
    center: &Center,
) -> Result<(), DomainError> {
    if !metadata.has_center(center) {
        return Err(DomainError::CenterNotFound {
            code: center.code().to_string(),
        });
    }
    Ok(())
}
