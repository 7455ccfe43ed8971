//! Department codes and their keys in the remote store.
//!
//! The dashboard offers a small fixed set of department codes (`it`, `mech`).
//! Each code maps to exactly one key under `<root>/Department/` in the store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PortalError;

/// A department selectable in the material popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    /// Information Technology (`it` -> `IT`)
    It,
    /// Mechanical (`mech` -> `Mechanics`)
    Mech,
}

impl Department {
    /// Every department, in dropdown order.
    pub const ALL: [Department; 2] = [Department::It, Department::Mech];

    /// Look up a UI code. Codes outside the table yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "it" => Some(Department::It),
            "mech" => Some(Department::Mech),
            _ => None,
        }
    }

    /// The code used by the UI select element.
    pub fn code(&self) -> &'static str {
        match self {
            Department::It => "it",
            Department::Mech => "mech",
        }
    }

    /// The key used in storage paths.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Department::It => "IT",
            Department::Mech => "Mechanics",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

impl FromStr for Department {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::from_code(s).ok_or_else(|| PortalError::UnknownDepartment(s.to_string()))
    }
}
