//! ID generation and idempotency hashing utilities.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::validation::ValidatedIssue;

// ============================================================================
// ID Generation
// ============================================================================

/// Generate a unique record ID with the given prefix.
///
/// Uses SHA256 hashing with base36 encoding.
/// The `exists` closure checks for collisions.
pub fn generate_id<F>(
    prefix: &str,
    title: &str,
    location: &str,
    reported_at: DateTime<Utc>,
    record_count: usize,
    exists: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    let mut length = optimal_hash_length(record_count);

    loop {
        for nonce in 0..10 {
            let seed = generate_id_seed(title, location, reported_at, nonce);
            let hash_str = compute_id_hash(&seed, length);
            let id = format!("{prefix}-{hash_str}");
            if !exists(&id) {
                return id;
            }
        }

        if length < 8 {
            length += 1;
        } else {
            // Fallback: longer hash with increasing nonces
            let mut nonce = 10u32;
            loop {
                let seed = generate_id_seed(title, location, reported_at, nonce);
                let hash_str = compute_id_hash(&seed, 12);
                let id = format!("{prefix}-{hash_str}");
                if !exists(&id) {
                    return id;
                }
                nonce += 1;
                if nonce > 1000 {
                    return format!("{prefix}-{hash_str}{nonce}");
                }
            }
        }
    }
}

/// Shortest hash length keeping the collision probability under 25%.
#[must_use]
fn optimal_hash_length(record_count: usize) -> usize {
    let n = record_count as f64;
    let max_prob = 0.25;

    for (len, exp) in [(3_usize, 3_i32), (4, 4), (5, 5), (6, 6), (7, 7), (8, 8)] {
        let space = 36_f64.powi(exp);
        let prob = 1.0 - (-n * n / (2.0 * space)).exp();
        if prob < max_prob {
            return len;
        }
    }
    8
}

fn generate_id_seed(title: &str, location: &str, reported_at: DateTime<Utc>, nonce: u32) -> String {
    format!(
        "{}|{}|{}|{}",
        title,
        location,
        reported_at.timestamp_nanos_opt().unwrap_or(0),
        nonce
    )
}

fn compute_id_hash(input: &str, length: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();

    let mut num = 0u64;
    for &byte in result.iter().take(8) {
        num = (num << 8) | u64::from(byte);
    }

    let mut encoded = base36_encode(num);
    if encoded.len() < length {
        encoded = format!("{encoded:0>length$}");
    }
    encoded.chars().take(length).collect()
}

fn base36_encode(mut num: u64) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if num == 0 {
        return "0".to_string();
    }
    let mut chars = Vec::new();
    while num > 0 {
        #[allow(clippy::cast_possible_truncation)]
        chars.push(ALPHABET[(num % 36) as usize] as char);
        num /= 36;
    }
    chars.into_iter().rev().collect()
}

// ============================================================================
// Idempotency Keys
// ============================================================================

/// Compute the SHA256 idempotency key for one submission attempt.
///
/// Fields included (stable order with null separators):
/// title, description, location, type, severity, image data URL,
/// submission timestamp.
///
/// A retried submission reuses the key computed for the first attempt,
/// so a sink can tell a retry from a new report.
#[must_use]
pub fn idempotency_key(issue: &ValidatedIssue, submitted_at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();

    let mut hash_field = |value: &str| {
        if value.contains('\0') {
            hasher.update(value.replace('\0', " ").as_bytes());
        } else {
            hasher.update(value.as_bytes());
        }
        hasher.update(b"\x00");
    };

    hash_field(&issue.title);
    hash_field(&issue.description);
    hash_field(&issue.location);
    hash_field(issue.issue_type.as_str());
    hash_field(issue.severity.as_str());
    hash_field(
        issue
            .image
            .as_ref()
            .map_or("", |image| image.data_url.as_str()),
    );
    hash_field(&submitted_at.timestamp_nanos_opt().unwrap_or(0).to_string());

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IssueType, Severity};
    use chrono::TimeZone;

    fn issue() -> ValidatedIssue {
        ValidatedIssue {
            title: "Large pothole here".to_string(),
            description: "It is very deep and dangerous".to_string(),
            location: "Main St".to_string(),
            issue_type: IssueType::Pothole,
            severity: Severity::High,
            image: None,
        }
    }

    #[test]
    fn test_idempotency_key_deterministic() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let k1 = idempotency_key(&issue(), at);
        let k2 = idempotency_key(&issue(), at);
        assert_eq!(k1, k2);
        assert_eq!(k1.len(), 64);
    }

    #[test]
    fn test_idempotency_key_changes_with_content_and_time() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut other = issue();
        other.severity = Severity::Low;
        assert_ne!(idempotency_key(&issue(), at), idempotency_key(&other, at));

        let later = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 1).unwrap();
        assert_ne!(idempotency_key(&issue(), at), idempotency_key(&issue(), later));
    }

    #[test]
    fn test_generate_id_format() {
        let id = generate_id("rw", "Test", "Main St", Utc::now(), 0, |_| false);
        assert!(id.starts_with("rw-"));
        assert!(id.len() >= 6);
    }

    #[test]
    fn test_generate_id_collision_handling() {
        let mut generated = std::collections::HashSet::new();
        let now = Utc::now();
        let id1 = generate_id("rw", "Test", "Main St", now, 0, |id| generated.contains(id));
        generated.insert(id1.clone());
        let id2 = generate_id("rw", "Test", "Main St", now, 0, |id| generated.contains(id));
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_hash_length_grows_with_count() {
        assert_eq!(optimal_hash_length(0), 3);
        assert!(optimal_hash_length(10_000) > optimal_hash_length(10));
    }
}
