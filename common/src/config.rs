//! Seating configuration
//!
//! Passed explicitly into the partitioner and both writers.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Known branch code and its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchCode {
    pub code: String,
    pub label: String,
}

impl BranchCode {
    pub fn new(code: &str, label: &str) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
        }
    }
}

/// Months mapped to an exam season word ("Winter", "Summer")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRule {
    pub label: String,
    pub months: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeatingConfig {
    pub institution_name: String,
    pub center_code: String,
    pub students_per_block: usize,
    /// Block year used when the first student's year is missing or unparseable
    pub default_year: i64,
    /// Scanned in order; the first code found inside the PRN digits wins
    pub branch_codes: Vec<BranchCode>,
    /// Checked in order; no match means a bare "Examination {year}"
    pub seasons: Vec<SeasonRule>,
}

impl Default for SeatingConfig {
    fn default() -> Self {
        Self {
            institution_name: "V. V. P. Institute of Engineering & Technology, Solapur".into(),
            center_code: "6321".into(),
            students_per_block: 30,
            default_year: 2,
            branch_codes: vec![
                BranchCode::new("11995", "AI & DS"),
                BranchCode::new("11191", "Civil"),
                BranchCode::new("11242", "CSE"),
                BranchCode::new("11293", "Elect"),
                BranchCode::new("11372", "ENTC"),
                BranchCode::new("11612", "Mech"),
            ],
            seasons: vec![
                SeasonRule {
                    label: "Winter".into(),
                    months: vec![11, 12, 1],
                },
                SeasonRule {
                    label: "Summer".into(),
                    months: vec![4, 5, 6, 7],
                },
            ],
        }
    }
}

impl SeatingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.students_per_block == 0 {
            return Err(Error::Config("studentsPerBlock must be at least 1".into()));
        }

        for branch in &self.branch_codes {
            if branch.code.is_empty() || !branch.code.chars().all(|c| c.is_ascii_digit()) {
                return Err(Error::Config(format!(
                    "branch code must be a non-empty digit string: {:?}",
                    branch.code
                )));
            }
        }

        for season in &self.seasons {
            if let Some(month) = season.months.iter().find(|m| !(1..=12).contains(*m)) {
                return Err(Error::Config(format!(
                    "season {} has invalid month {}",
                    season.label, month
                )));
            }
        }

        Ok(())
    }

    pub fn recognized_codes(&self) -> Vec<String> {
        self.branch_codes.iter().map(|b| b.code.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SeatingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.students_per_block, 30);
        assert_eq!(config.recognized_codes()[0], "11995");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = SeatingConfig {
            students_per_block: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_non_digit_code_rejected() {
        let mut config = SeatingConfig::default();
        config.branch_codes.push(BranchCode::new("11A95", "Bad"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_month_rejected() {
        let mut config = SeatingConfig::default();
        config.seasons[0].months.push(13);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SeatingConfig::from_json(r#"{"centerCode": "1234", "studentsPerBlock": 24}"#)
            .expect("parse failed");
        assert_eq!(config.center_code, "1234");
        assert_eq!(config.students_per_block, 24);
        assert_eq!(config.branch_codes.len(), 6);
        assert_eq!(config.default_year, 2);
    }
}
