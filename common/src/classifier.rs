//! Branch code extraction
//!
//! Never fails: a PRN either yields a code (known or fallback) or nothing.

use crate::config::SeatingConfig;

/// Length of the fallback code taken from the end of the PRN digits
pub const FALLBACK_CODE_LEN: usize = 5;

/// Label given to every code not present in the configured mapping
pub const OTHER_LABEL: &str = "Other";

/// Result of scanning one registration number
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchMatch {
    /// A configured code appears inside the digits
    Known { code: String, label: String },
    /// No configured code; last 5 digits (or all digits when shorter)
    Fallback { code: String },
    /// The value contains no digits at all
    Absent,
}

impl BranchMatch {
    pub fn code(&self) -> Option<&str> {
        match self {
            BranchMatch::Known { code, .. } | BranchMatch::Fallback { code } => Some(code),
            BranchMatch::Absent => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            BranchMatch::Known { label, .. } => Some(label),
            BranchMatch::Fallback { .. } => Some(OTHER_LABEL),
            BranchMatch::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, BranchMatch::Absent)
    }
}

/// Keep ASCII digits only
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Extract the branch code from a raw PRN value
pub fn extract_branch_code(raw: &str, config: &SeatingConfig) -> BranchMatch {
    let digits = digits_only(raw);
    if digits.is_empty() {
        return BranchMatch::Absent;
    }

    if let Some(known) = config
        .branch_codes
        .iter()
        .find(|b| digits.contains(b.code.as_str()))
    {
        return BranchMatch::Known {
            code: known.code.clone(),
            label: known.label.clone(),
        };
    }

    let code = if digits.len() >= FALLBACK_CODE_LEN {
        digits[digits.len() - FALLBACK_CODE_LEN..].to_string()
    } else {
        digits
    };
    BranchMatch::Fallback { code }
}
