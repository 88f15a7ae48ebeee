//! Seed dataset models.
//!
//! The seeding operation always inserts the same fixed rows. Re-running it
//! appends another copy of the set; the table is additive, not upserted.

use chrono::NaiveDate;
use serde::Serialize;

/// One row of the fixed seed dataset.
#[derive(Debug, Clone, Copy)]
pub struct SeedRow {
    /// Patient display name.
    pub name: &'static str,

    /// Date of birth, stored in the `date_of_birth` timestamp column.
    pub date_of_birth: NaiveDate,
}

/// The fixed seed dataset, in insertion order.
pub const SEED_ROWS: [SeedRow; 4] = [
    SeedRow {
        name: "Alice Green",
        date_of_birth: birth_date(1984, 3, 9),
    },
    SeedRow {
        name: "Brian Holt",
        date_of_birth: birth_date(1991, 7, 23),
    },
    SeedRow {
        name: "Carmen Diaz",
        date_of_birth: birth_date(1978, 11, 2),
    },
    SeedRow {
        name: "Dmitri Volkov",
        date_of_birth: birth_date(2002, 5, 17),
    },
];

const fn birth_date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid seed date"),
    }
}

/// Result of a seeding run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedOutcome {
    /// Row count reported by the database engine for the insert.
    pub affected_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_set_has_four_rows() {
        assert_eq!(SEED_ROWS.len(), 4);
    }

    #[test]
    fn test_seed_names_are_unique() {
        for (i, row) in SEED_ROWS.iter().enumerate() {
            for other in &SEED_ROWS[i + 1..] {
                assert_ne!(row.name, other.name);
            }
        }
    }

    #[test]
    fn test_outcome_uses_camel_case() {
        let rendered = serde_json::to_value(SeedOutcome { affected_count: 4 }).unwrap();
        assert_eq!(rendered["affectedCount"], 4);
    }
}
