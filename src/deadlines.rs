//! Deadline policy: pure predicates over a registration. The sweeper consumes
//! these; nothing here runs a timer.

use chrono::{DateTime, Duration, Utc};

use crate::models::{PaymentStatus, Registration, RegistrationStatus};

pub fn hold_deadline(created_at: DateTime<Utc>, hold_minutes: i64) -> DateTime<Utc> {
    created_at + Duration::minutes(hold_minutes)
}

pub fn payment_deadline(created_at: DateTime<Utc>, payment_hours: i64) -> DateTime<Utc> {
    created_at + Duration::hours(payment_hours)
}

/// A hold has lapsed: the reservation window passed and nobody confirmed.
pub fn is_hold_expired(registration: &Registration, now: DateTime<Utc>) -> bool {
    now > registration.reserved_until && registration.status == RegistrationStatus::Reserved
}

/// The longer payment window passed without a verified payment.
pub fn is_payment_overdue(registration: &Registration, now: DateTime<Utc>) -> bool {
    now > registration.payment_deadline && registration.payment_status == PaymentStatus::Pending
}

#[cfg(test)]
mod tests {
    use crate::models::PaymentMethod;

    use super::*;

    fn registration(status: RegistrationStatus, payment_status: PaymentStatus) -> Registration {
        let created = Utc::now();
        Registration {
            id: 1,
            class_id: 1,
            client_id: 1,
            status,
            payment_status,
            payment_method: PaymentMethod::Transfer,
            payment_amount: 25.0,
            payment_reference: "BK-TEST".to_string(),
            reserved_until: hold_deadline(created, 10),
            payment_deadline: payment_deadline(created, 24),
            user_confirmed_transfer: false,
            created_at: created,
        }
    }

    #[test]
    fn test_hold_expired_only_after_deadline_and_only_when_reserved() {
        let reg = registration(RegistrationStatus::Reserved, PaymentStatus::Pending);
        assert!(!is_hold_expired(&reg, reg.created_at));
        assert!(!is_hold_expired(&reg, reg.reserved_until));
        assert!(is_hold_expired(
            &reg,
            reg.reserved_until + Duration::seconds(1)
        ));

        let confirmed = registration(RegistrationStatus::Confirmed, PaymentStatus::Pending);
        assert!(!is_hold_expired(
            &confirmed,
            confirmed.reserved_until + Duration::hours(1)
        ));
    }

    #[test]
    fn test_payment_overdue_ignores_paid_registrations() {
        let pending = registration(RegistrationStatus::Confirmed, PaymentStatus::Pending);
        assert!(is_payment_overdue(
            &pending,
            pending.payment_deadline + Duration::seconds(1)
        ));

        let paid = registration(RegistrationStatus::Confirmed, PaymentStatus::Paid);
        assert!(!is_payment_overdue(
            &paid,
            paid.payment_deadline + Duration::days(1)
        ));
    }

    #[test]
    fn test_windows_are_ten_minutes_and_twenty_four_hours() {
        let created = Utc::now();
        assert_eq!(hold_deadline(created, 10) - created, Duration::minutes(10));
        assert_eq!(
            payment_deadline(created, 24) - created,
            Duration::hours(24)
        );
    }
}
