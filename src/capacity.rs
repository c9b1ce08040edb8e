//! Capacity ledger: per-class seat counting. Both operations mutate the class
//! row in place and must run under the store lock so the check-and-increment
//! is atomic with respect to concurrent reservations.

use crate::booking::BookingError;
use crate::models::{Class, ClassStatus};

/// Claims one seat, failing with `ClassFull` when none is free.
pub fn try_reserve(class: &mut Class) -> Result<(), BookingError> {
    if class.status != ClassStatus::Scheduled {
        return Err(BookingError::InvalidInput(
            "class is not open for booking".into(),
        ));
    }
    if class.current_bookings >= class.max_capacity {
        return Err(BookingError::ClassFull);
    }
    class.current_bookings += 1;
    Ok(())
}

/// Returns one seat, floored at 0. Release-once per registration is enforced
/// by the state machine, not here.
pub fn release(class: &mut Class) {
    class.current_bookings = class.current_bookings.saturating_sub(1);
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn class(max: u32, current: u32) -> Class {
        Class {
            id: 1,
            template_id: 1,
            scheduled_date: Utc::now(),
            location: "Studio A".to_string(),
            max_capacity: max,
            current_bookings: current,
            custom_price: None,
            status: ClassStatus::Scheduled,
        }
    }

    #[test]
    fn test_try_reserve_increments_until_full() {
        let mut c = class(2, 0);
        assert!(try_reserve(&mut c).is_ok());
        assert!(try_reserve(&mut c).is_ok());
        assert_eq!(try_reserve(&mut c), Err(BookingError::ClassFull));
        assert_eq!(c.current_bookings, 2);
    }

    #[test]
    fn test_try_reserve_rejects_cancelled_class() {
        let mut c = class(5, 0);
        c.status = ClassStatus::Cancelled;
        assert!(matches!(
            try_reserve(&mut c),
            Err(BookingError::InvalidInput(_))
        ));
        assert_eq!(c.current_bookings, 0);
    }

    #[test]
    fn test_release_floors_at_zero() {
        let mut c = class(2, 1);
        release(&mut c);
        assert_eq!(c.current_bookings, 0);
        release(&mut c);
        assert_eq!(c.current_bookings, 0);
    }
}
