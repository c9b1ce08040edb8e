//! Payment references: short uppercase labels clients quote as the memo of a
//! bank transfer. Derived from the creation timestamp, not from randomness;
//! they are correlation labels, not secrets.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

const PREFIX: &str = "BK";
const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// Disambiguates references minted within the same millisecond.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

pub fn payment_reference(created_at: DateTime<Utc>) -> String {
    let millis = created_at.timestamp_millis().max(0) as u64;
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed) % (36 * 36);
    format!("{PREFIX}-{}{}", to_base36(millis), pad_base36(seq, 2))
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).expect("base36 digits are ascii")
}

fn pad_base36(value: u64, width: usize) -> String {
    format!("{:0>width$}", to_base36(value))
}
