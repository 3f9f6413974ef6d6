//! Roster partitioning
//!
//! Table → classified records → filter → sort → fixed-size blocks.

use crate::classifier::{extract_branch_code, BranchMatch};
use crate::config::SeatingConfig;
use crate::error::{Error, Result};
use crate::types::{Block, DebugSummary, RosterTable, SeatingData, Student};

/// Headers accepted as the registration-number column
const PRN_HEADERS: &[&str] = &["prn", "prn no", "prn no.", "prn number"];

/// Headers accepted as the name column
const NAME_HEADERS: &[&str] = &["name", "student name"];

/// One accepted roster row
#[derive(Debug, Clone)]
struct Record {
    prn: String,
    name: String,
    year: Option<i64>,
    code: String,
    label: String,
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    prn: usize,
    name: Option<usize>,
    year: Option<usize>,
}

impl Columns {
    fn detect(table: &RosterTable) -> Result<Self> {
        let prn = table
            .find_column(|h| PRN_HEADERS.iter().any(|p| h.eq_ignore_ascii_case(p)))
            .ok_or_else(|| Error::MissingColumn(table.headers.join(", ")))?;
        let name = table
            .find_column(|h| NAME_HEADERS.iter().any(|n| h.eq_ignore_ascii_case(n)))
            .or_else(|| table.find_column(|h| h == "Name"));
        let year = table.find_column(|h| h.to_lowercase().contains("year"));

        Ok(Self { prn, name, year })
    }
}

/// Process a roster table with the current local time as timestamp
pub fn process_table(table: &RosterTable, config: &SeatingConfig) -> Result<SeatingData> {
    let timestamp = chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string();
    process_table_at(table, config, timestamp)
}

/// Process a roster table
///
/// Fails only when no PRN column can be identified. Rows whose PRN has no
/// digits are dropped and counted in `debug`.
pub fn process_table_at(
    table: &RosterTable,
    config: &SeatingConfig,
    timestamp: String,
) -> Result<SeatingData> {
    config.validate()?;
    let columns = Columns::detect(table)?;

    let rows_before_filter = table.len();
    let mut records: Vec<Record> = (0..table.len())
        .filter_map(|row| classify_row(table, row, columns, config))
        .collect();
    let rows_after_filter = records.len();

    if rows_after_filter < rows_before_filter {
        log::warn!(
            "{} row(s) dropped: PRN contains no digits",
            rows_before_filter - rows_after_filter
        );
    }

    // (label, code, prn); sort_by is stable so equal keys keep input order
    records.sort_by(|a, b| {
        (a.label.as_str(), a.code.as_str(), a.prn.as_str())
            .cmp(&(b.label.as_str(), b.code.as_str(), b.prn.as_str()))
    });

    let blocks = create_blocks(&records, config);

    Ok(SeatingData {
        total_students: records.len(),
        blocks,
        timestamp,
        debug: DebugSummary {
            rows_before_filter,
            rows_after_filter,
            recognized_branch_codes: config.recognized_codes(),
        },
    })
}

fn classify_row(
    table: &RosterTable,
    row: usize,
    columns: Columns,
    config: &SeatingConfig,
) -> Option<Record> {
    let prn = table.cell(row, columns.prn).trim().to_string();

    let (code, label) = match extract_branch_code(&prn, config) {
        BranchMatch::Known { code, label } => (code, label),
        fallback @ BranchMatch::Fallback { .. } => {
            log::warn!(
                "PRN {} has no known branch code, using {}",
                prn,
                fallback.code().unwrap_or_default()
            );
            let label = fallback.label().unwrap_or_default().to_string();
            let code = fallback.code().unwrap_or_default().to_string();
            (code, label)
        }
        BranchMatch::Absent => return None,
    };

    Some(Record {
        name: columns
            .name
            .map(|c| table.cell(row, c).trim().to_string())
            .unwrap_or_default(),
        year: columns.year.and_then(|c| parse_year(table.cell(row, c))),
        prn,
        code,
        label,
    })
}

/// Parse a year cell: "2", " 3 " or a float such as "2.0" (truncated)
pub fn parse_year(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(year) = raw.parse::<i64>() {
        return Some(year);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Some(f.trunc() as i64),
        _ => None,
    }
}

/// 1-based index → base-26 letters (1 → "A", 26 → "Z", 27 → "AA")
pub fn block_letters(mut n: usize) -> String {
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn create_blocks(records: &[Record], config: &SeatingConfig) -> Vec<Block> {
    records
        .chunks(config.students_per_block)
        .enumerate()
        .map(|(index, chunk)| build_block(index + 1, chunk, config))
        .collect()
}

fn build_block(block_number: usize, chunk: &[Record], config: &SeatingConfig) -> Block {
    let first = &chunk[0];
    let last = &chunk[chunk.len() - 1];
    let year = first.year.unwrap_or(config.default_year);

    let mut branches: Vec<String> = chunk.iter().map(|r| r.label.clone()).collect();
    branches.sort();
    branches.dedup();
    let branch = branches.join(", ");

    let students = chunk
        .iter()
        .zip(1u32..)
        .map(|(record, desk_no)| Student {
            desk_no,
            prn: record.prn.clone(),
            name: record.name.clone(),
            branch: record.label.clone(),
            branch_code: record.code.clone(),
            year: record.year.unwrap_or(year),
        })
        .collect();

    let block_label = block_letters(block_number);
    log::debug!(
        "Block-{}: {} students, PRN {} .. {}",
        block_label,
        chunk.len(),
        first.prn,
        last.prn
    );

    Block {
        block_number,
        block_name: format!("Block-{}", block_label),
        block_label,
        total_students: chunk.len(),
        prn_from: first.prn.clone(),
        prn_to: last.prn.clone(),
        year,
        branch,
        branches,
        branch_code: first.code.clone(),
        students,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, Once};

    fn table(rows: &[(&str, &str, &str)]) -> RosterTable {
        RosterTable::new(
            vec!["Sr No.".into(), "PRN".into(), "Name".into(), "Year ".into()],
            rows.iter()
                .enumerate()
                .map(|(i, (prn, name, year))| {
                    vec![(i + 1).to_string(), prn.to_string(), name.to_string(), year.to_string()]
                })
                .collect(),
        )
    }

    fn numbered(count: usize, code: &str) -> Vec<(String, String, String)> {
        (0..count)
            .map(|i| (format!("2023{}{:04}", code, i), format!("Student {}", i), "2".to_string()))
            .collect()
    }

    fn to_table(rows: &[(String, String, String)]) -> RosterTable {
        let refs: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|(a, b, c)| (a.as_str(), b.as_str(), c.as_str()))
            .collect();
        table(&refs)
    }

    fn run(table: &RosterTable, config: &SeatingConfig) -> SeatingData {
        process_table_at(table, config, "2026-01-01T00:00:00".into()).expect("process failed")
    }

    #[test]
    fn test_block_letters() {
        assert_eq!(block_letters(1), "A");
        assert_eq!(block_letters(26), "Z");
        assert_eq!(block_letters(27), "AA");
        assert_eq!(block_letters(52), "AZ");
        assert_eq!(block_letters(53), "BA");
        assert_eq!(block_letters(702), "ZZ");
        assert_eq!(block_letters(703), "AAA");
    }

    #[test]
    fn test_missing_prn_column() {
        let table = RosterTable::new(vec!["Roll".into(), "Name".into()], vec![]);
        let err = process_table_at(&table, &SeatingConfig::default(), String::new()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(_)));
    }

    #[test]
    fn test_prn_header_case_insensitive() {
        let table = RosterTable::new(
            vec![" prn ".into()],
            vec![vec!["2023011995001".into()]],
        );
        let data = run(&table, &SeatingConfig::default());
        assert_eq!(data.total_students, 1);
    }

    #[test]
    fn test_65_records_make_30_30_5() {
        let data = run(&to_table(&numbered(65, "11242")), &SeatingConfig::default());
        let sizes: Vec<usize> = data.blocks.iter().map(|b| b.students.len()).collect();
        assert_eq!(sizes, vec![30, 30, 5]);
        assert_eq!(data.total_students, 65);
        assert_eq!(data.blocks[2].block_name, "Block-C");
    }

    #[test]
    fn test_desk_numbers_contiguous() {
        let data = run(&to_table(&numbered(65, "11242")), &SeatingConfig::default());
        for block in &data.blocks {
            let desks: Vec<u32> = block.students.iter().map(|s| s.desk_no).collect();
            let expected: Vec<u32> = (1..=block.students.len() as u32).collect();
            assert_eq!(desks, expected);
            assert_eq!(block.total_students, block.students.len());
        }
    }

    #[test]
    fn test_every_record_in_exactly_one_block() {
        let mut rows = numbered(40, "11612");
        rows.extend(numbered(25, "11191"));
        let data = run(&to_table(&rows), &SeatingConfig::default());

        let mut seen: Vec<&str> = data
            .blocks
            .iter()
            .flat_map(|b| b.students.iter().map(|s| s.prn.as_str()))
            .collect();
        assert_eq!(seen.len(), 65);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 65);
    }

    #[test]
    fn test_rows_without_digits_are_filtered() {
        let table = table(&[
            ("2023011995001", "A", "2"),
            ("", "B", "2"),
            ("nan", "C", "2"),
            ("2023011242001", "D", "2"),
        ]);
        let data = run(&table, &SeatingConfig::default());
        assert_eq!(data.debug.rows_before_filter, 4);
        assert_eq!(data.debug.rows_after_filter, 2);
        assert_eq!(data.total_students, 2);
        assert_eq!(data.debug.recognized_branch_codes.len(), 6);
    }

    #[test]
    fn test_sorted_by_label_then_code_then_prn() {
        let table = table(&[
            ("2023011995002", "x", "2"),
            ("999999999", "y", "2"),
            ("2023011191001", "z", "2"),
            ("2023011995001", "w", "2"),
        ]);
        let data = run(&table, &SeatingConfig::default());
        let order: Vec<(&str, &str)> = data.blocks[0]
            .students
            .iter()
            .map(|s| (s.branch.as_str(), s.prn.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("AI & DS", "2023011995001"),
                ("AI & DS", "2023011995002"),
                ("Civil", "2023011191001"),
                ("Other", "999999999"),
            ]
        );
        assert_eq!(data.blocks[0].branches, vec!["AI & DS", "Civil", "Other"]);
        assert_eq!(data.blocks[0].branch, "AI & DS, Civil, Other");
        assert_eq!(data.blocks[0].branch_code, "11995");
    }

    #[test]
    fn test_block_can_straddle_branches() {
        let mut rows = numbered(20, "11995");
        rows.extend(numbered(20, "11242"));
        let data = run(&to_table(&rows), &SeatingConfig::default());
        assert_eq!(data.blocks[0].branches, vec!["AI & DS", "CSE"]);
        assert_eq!(data.blocks[1].branch, "CSE");
    }

    #[test]
    fn test_deterministic_across_runs_and_input_order() {
        let rows = numbered(70, "11372");
        let mut reversed = rows.clone();
        reversed.reverse();
        let config = SeatingConfig::default();
        let a = run(&to_table(&rows), &config);
        let b = run(&to_table(&rows), &config);
        let c = run(&to_table(&reversed), &config);
        assert_eq!(a, b);
        let prns = |d: &SeatingData| -> Vec<String> {
            d.blocks.iter().flat_map(|b| b.students.iter().map(|s| s.prn.clone())).collect()
        };
        assert_eq!(prns(&a), prns(&c));
    }

    #[test]
    fn test_year_defaults_when_missing() {
        let table = table(&[
            ("2023011995001", "A", ""),
            ("2023011995002", "B", "3"),
        ]);
        let data = run(&table, &SeatingConfig::default());
        assert_eq!(data.blocks[0].year, 2);
        assert_eq!(data.blocks[0].students[0].year, 2);
        assert_eq!(data.blocks[0].students[1].year, 3);
    }

    #[test]
    fn test_configured_capacity() {
        let config = SeatingConfig {
            students_per_block: 4,
            ..Default::default()
        };
        let data = run(&to_table(&numbered(10, "11293")), &config);
        let sizes: Vec<usize> = data.blocks.iter().map(|b| b.students.len()).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
        assert_eq!(data.blocks[0].prn_from, "2023112930000");
        assert_eq!(data.blocks[0].prn_to, "2023112930003");
    }

    #[test]
    fn test_empty_roster_has_no_blocks() {
        let data = run(&table(&[]), &SeatingConfig::default());
        assert!(data.blocks.is_empty());
        assert_eq!(data.total_students, 0);
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2"), Some(2));
        assert_eq!(parse_year(" 3 "), Some(3));
        assert_eq!(parse_year("2.0"), Some(2));
        assert_eq!(parse_year("2.5"), Some(2));
        assert_eq!(parse_year("3.7"), Some(3));
        assert_eq!(parse_year("NaN"), None);
        assert_eq!(parse_year("SE"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn test_fractional_year_is_truncated() {
        let data = run(&table(&[("2023011995001", "A", "3.7")]), &SeatingConfig::default());
        assert_eq!(data.blocks[0].year, 3);
        assert_eq!(data.blocks[0].students[0].year, 3);
    }

    struct Capture {
        lines: Mutex<Vec<(log::Level, String)>>,
    }

    impl log::Log for Capture {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture {
        lines: Mutex::new(Vec::new()),
    };

    #[test]
    fn test_fallback_code_is_warned() {
        static INSTALL: Once = Once::new();
        INSTALL.call_once(|| {
            log::set_logger(&CAPTURE).expect("logger already set");
            log::set_max_level(log::LevelFilter::Trace);
        });

        run(&table(&[("7777700001", "A", "2")]), &SeatingConfig::default());

        let lines = CAPTURE.lines.lock().unwrap();
        assert!(lines
            .iter()
            .any(|(level, msg)| *level == log::Level::Warn && msg.contains("7777700001")));
    }
}
