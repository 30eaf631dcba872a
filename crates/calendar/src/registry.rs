//! Calendar identity and instance counting.
//!
//! Ids are handed out monotonically from 1 and never reused. The live and
//! created counters are diagnostics only; nothing in the crate branches on
//! them.

use std::sync::atomic::{AtomicI64, Ordering};

static NEXT_ID: AtomicI64 = AtomicI64::new(1);
static LIVE: AtomicI64 = AtomicI64::new(0);

/// Assigns a fresh id and counts a new live calendar.
pub(crate) fn register() -> i64 {
    LIVE.fetch_add(1, Ordering::Relaxed);
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Counts a calendar as destroyed.
pub(crate) fn release() {
    LIVE.fetch_sub(1, Ordering::Relaxed);
}

/// Number of calendars currently alive in this process.
pub fn live_calendars() -> i64 {
    LIVE.load(Ordering::Relaxed)
}

/// Number of calendars created in this process so far.
pub fn created_calendars() -> i64 {
    NEXT_ID.load(Ordering::Relaxed) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let a = register();
        let b = register();
        assert!(b > a);
        release();
        release();
    }

    #[test]
    fn concurrent_registration_yields_unique_ids() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| (0..100).map(|_| register()).collect::<Vec<_>>()))
            .collect();
        let mut ids: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        for _ in 0..ids.len() {
            release();
        }
        let n = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), n);
    }
}
