use std::collections::HashSet;

use chrono::NaiveDate;
use log::debug;

use crate::error::IntegrityError;

/// Allocates date-prefixed catalog ids: the decimal concatenation of
/// `YYYYMMDD` and a per-day sequence number starting at 1, with no width
/// padding. Ids allocated later in a run are numerically greater than earlier
/// ones of the same day.
pub struct IdAllocator {
    date_prefix: String,
    next_seq: u64,
}

impl IdAllocator {
    /// Seed the per-day sequence from the ids already in use (union of
    /// database and manifest), taken from a fresh snapshot at run start.
    pub fn seeded(today: NaiveDate, existing: &HashSet<i64>) -> Self {
        let date_prefix = today.format("%Y%m%d").to_string();

        let mut max_seq = 0u64;
        for id in existing {
            let decimal = id.to_string();
            if let Some(suffix) = decimal.strip_prefix(&date_prefix) {
                if let Ok(seq) = suffix.parse::<u64>() {
                    max_seq = max_seq.max(seq);
                }
            }
        }

        debug!(
            "Id allocator seeded: prefix {}, next sequence {}",
            date_prefix,
            max_seq + 1
        );
        Self {
            date_prefix,
            next_seq: max_seq + 1,
        }
    }

    /// Next id for this run. Uniqueness against ids outside the run is the
    /// integrity guard's job; within a run the sequence alone guarantees it.
    pub fn allocate(&mut self) -> Result<i64, IntegrityError> {
        let id = format!("{}{}", self.date_prefix, self.next_seq);
        self.next_seq += 1;
        id.parse::<i64>().map_err(|_| IntegrityError::IdSpaceExhausted {
            prefix: self.date_prefix.clone(),
        })
    }
}
