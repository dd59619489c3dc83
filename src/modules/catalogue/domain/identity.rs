use chrono::Utc;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::catalogue::domain::entities::CvId;

/// Hands out ids for records whose store does not generate its own.
pub trait IdentityAssigner: Send + Sync {
    fn next_id(&self) -> CvId;
}

/// Last millisecond value handed out in this process.
static LAST_ISSUED_MILLIS: AtomicU64 = AtomicU64::new(0);

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `<millis><9 base36 chars>` ids.
///
/// The millisecond part is a monotonic logical clock shared by every
/// instance in the process: a call landing in an already used millisecond
/// takes the next one, so two ids from one process never share a prefix.
/// The random suffix keeps ids minted by different processes apart.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampIdentity;

impl TimestampIdentity {
    pub fn new() -> Self {
        Self
    }

    fn issue_millis(now: u64) -> u64 {
        let bump = |last: u64| if now > last { now } else { last + 1 };

        let previous = match LAST_ISSUED_MILLIS.fetch_update(
            Ordering::AcqRel,
            Ordering::Acquire,
            |last| Some(bump(last)),
        ) {
            Ok(prev) | Err(prev) => prev,
        };

        bump(previous)
    }

    fn random_suffix() -> String {
        let mut rng = rand::thread_rng();
        (0..SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect()
    }
}

impl IdentityAssigner for TimestampIdentity {
    fn next_id(&self) -> CvId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let millis = Self::issue_millis(now);
        CvId::new(format!("{}{}", millis, Self::random_suffix()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_id_shape() {
        let id = TimestampIdentity::new().next_id();
        let s = id.as_str();

        let (millis, suffix) = s.split_at(s.len() - SUFFIX_LEN);
        assert!(millis.parse::<u64>().is_ok(), "prefix should be millis: {s}");
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_rapid_sequential_ids_are_distinct() {
        let assigner = TimestampIdentity::new();
        let ids: HashSet<CvId> = (0..10_000).map(|_| assigner.next_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_concurrent_ids_are_distinct() {
        let assigner = Arc::new(TimestampIdentity::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let assigner = Arc::clone(&assigner);
                std::thread::spawn(move || {
                    (0..1_000).map(|_| assigner.next_id()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(all.insert(id), "duplicate id issued");
            }
        }
        assert_eq!(all.len(), 8_000);
    }

    #[test]
    fn test_millis_never_repeat_within_process() {
        let first = TimestampIdentity::issue_millis(5);
        let second = TimestampIdentity::issue_millis(5);
        assert!(second > first);
    }
}
