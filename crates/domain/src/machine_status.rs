// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Machine operational status and equipment categories.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Operational status of a machine.
///
/// `InUse` is owned by the booking lifecycle: it is set at handover and
/// cleared at completion. Maintenance and `OutOfService` are administrative
/// states that can be entered regardless of booking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineStatus {
    /// Available for booking.
    Idle,
    /// Handed over under an Active booking.
    InUse,
    /// Pulled for servicing.
    Maintenance,
    /// Withdrawn from the fleet.
    OutOfService,
}

impl MachineStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::InUse => "In Use",
            Self::Maintenance => "Maintenance",
            Self::OutOfService => "Out of Service",
        }
    }

    /// Parses a status from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Idle" => Ok(Self::Idle),
            "In Use" => Ok(Self::InUse),
            "Maintenance" => Ok(Self::Maintenance),
            "Out of Service" => Ok(Self::OutOfService),
            _ => Err(DomainError::InvalidMachineStatus(s.to_string())),
        }
    }
}

impl FromStr for MachineStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Equipment categories stocked by custom-hiring centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineType {
    HappySeeder,
    SuperSeeder,
    SmartSeeder,
    Mulcher,
    Rotavator,
    ZeroTillageDrill,
    StrawBaler,
    StrawReaper,
    StrawChopper,
    PaddyThresher,
    WheatThresher,
    ChaffCutter,
    DiscHarrow,
    Cultivator,
    LaserLandLeveller,
    ReaperBinder,
    Baler,
    Rake,
    StrawCollectionMachine,
    Other,
}

impl MachineType {
    /// Returns the display name of the equipment category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HappySeeder => "Happy Seeder",
            Self::SuperSeeder => "Super Seeder",
            Self::SmartSeeder => "Smart Seeder",
            Self::Mulcher => "Mulcher",
            Self::Rotavator => "Rotavator",
            Self::ZeroTillageDrill => "Zero Tillage Drill",
            Self::StrawBaler => "Straw Baler",
            Self::StrawReaper => "Straw Reaper",
            Self::StrawChopper => "Straw Chopper",
            Self::PaddyThresher => "Paddy Thresher",
            Self::WheatThresher => "Wheat Thresher",
            Self::ChaffCutter => "Chaff Cutter",
            Self::DiscHarrow => "Disc Harrow",
            Self::Cultivator => "Cultivator",
            Self::LaserLandLeveller => "Laser Land Leveller",
            Self::ReaperBinder => "Reaper Binder",
            Self::Baler => "Baler",
            Self::Rake => "Rake",
            Self::StrawCollectionMachine => "Straw Collection Machine",
            Self::Other => "Other",
        }
    }

    /// Parses an equipment category from its display name.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Happy Seeder" => Ok(Self::HappySeeder),
            "Super Seeder" => Ok(Self::SuperSeeder),
            "Smart Seeder" => Ok(Self::SmartSeeder),
            "Mulcher" => Ok(Self::Mulcher),
            "Rotavator" => Ok(Self::Rotavator),
            "Zero Tillage Drill" => Ok(Self::ZeroTillageDrill),
            "Straw Baler" => Ok(Self::StrawBaler),
            "Straw Reaper" => Ok(Self::StrawReaper),
            "Straw Chopper" => Ok(Self::StrawChopper),
            "Paddy Thresher" => Ok(Self::PaddyThresher),
            "Wheat Thresher" => Ok(Self::WheatThresher),
            "Chaff Cutter" => Ok(Self::ChaffCutter),
            "Disc Harrow" => Ok(Self::DiscHarrow),
            "Cultivator" => Ok(Self::Cultivator),
            "Laser Land Leveller" => Ok(Self::LaserLandLeveller),
            "Reaper Binder" => Ok(Self::ReaperBinder),
            "Baler" => Ok(Self::Baler),
            "Rake" => Ok(Self::Rake),
            "Straw Collection Machine" => Ok(Self::StrawCollectionMachine),
            "Other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidMachineType(s.to_string())),
        }
    }

    /// Returns the three-letter code used when composing machine codes.
    #[must_use]
    pub fn type_code(&self) -> String {
        self.as_str()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .take(3)
            .collect::<String>()
            .to_uppercase()
    }
}

impl FromStr for MachineType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for MachineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_status_round_trip() {
        let statuses = [
            MachineStatus::Idle,
            MachineStatus::InUse,
            MachineStatus::Maintenance,
            MachineStatus::OutOfService,
        ];

        for status in statuses {
            let s = status.as_str();
            match MachineStatus::parse_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse machine status: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_machine_status_uses_display_strings() {
        assert_eq!(MachineStatus::InUse.as_str(), "In Use");
        assert_eq!(MachineStatus::OutOfService.as_str(), "Out of Service");
        assert!(MachineStatus::parse_str("InUse").is_err());
    }

    #[test]
    fn test_machine_type_round_trip() {
        let types = [
            MachineType::HappySeeder,
            MachineType::ZeroTillageDrill,
            MachineType::LaserLandLeveller,
            MachineType::StrawCollectionMachine,
            MachineType::Other,
        ];

        for machine_type in types {
            let s = machine_type.as_str();
            match MachineType::parse_str(s) {
                Ok(parsed) => assert_eq!(machine_type, parsed),
                Err(e) => panic!("Failed to parse machine type: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_type_code() {
        assert_eq!(MachineType::HappySeeder.type_code(), "HAP");
        assert_eq!(MachineType::Rotavator.type_code(), "ROT");
        assert_eq!(MachineType::Other.type_code(), "OTH");
    }

    #[test]
    fn test_invalid_machine_type() {
        assert!(MachineType::parse_str("Combine Harvester").is_err());
    }
}
