use std::collections::HashSet;

use log::debug;

use crate::allocator::IdAllocator;
use crate::catalog::ManifestEntry;
use crate::error::IntegrityError;

/// Attempts per entry before the run gives up on finding a free id. Bounded
/// so a corrupted id space cannot loop forever.
pub const RETRY_BUDGET: u32 = 1000;

/// Pre-allocation gate: no two manifest entries may share an id. A duplicate
/// aborts the whole run before any mutation, since partial application would
/// leave the three sources in an unrecoverable state.
pub fn check_manifest_duplicates(entries: &[ManifestEntry]) -> Result<(), IntegrityError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.id) {
            return Err(IntegrityError::DuplicateId { id: entry.id });
        }
    }
    Ok(())
}

/// Post-allocation gate: draw ids from the allocator until one clears every
/// id observed at run start plus those allocated earlier in this run. `taken`
/// accumulates the winner so later calls see it.
pub fn clear_allocation(
    allocator: &mut IdAllocator,
    taken: &mut HashSet<i64>,
    filename: &str,
) -> Result<i64, IntegrityError> {
    for _ in 0..RETRY_BUDGET {
        let id = allocator.allocate()?;
        if taken.insert(id) {
            return Ok(id);
        }
        debug!("Id {} already in use, retrying allocation for {}", id, filename);
    }

    Err(IntegrityError::RetryBudgetExhausted {
        filename: filename.to_string(),
        attempts: RETRY_BUDGET,
    })
}
