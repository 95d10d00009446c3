use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::movie::Movie;
use crate::domain::types::{MovieId, Timestamp};

static LAST_ISSUED_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Returns a millisecond value strictly greater than any issued before in
/// this process.
fn issue_millis(now_millis: i64) -> i64 {
    let mut last = LAST_ISSUED_MILLIS.load(Ordering::Relaxed);
    loop {
        let next = now_millis.max(last + 1);
        match LAST_ISSUED_MILLIS.compare_exchange_weak(
            last,
            next,
            Ordering::AcqRel,
            Ordering::Relaxed,
        ) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

/// Generate a timestamp-based id not used by any movie in `existing`.
pub fn next_movie_id(now: Timestamp, existing: &[Movie]) -> MovieId {
    loop {
        let id = MovieId::from_millis(issue_millis(now.timestamp_millis()));
        if !existing.iter().any(|movie| movie.id == id) {
            return id;
        }
    }
}
