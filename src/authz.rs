//! Authorization guard: who may apply which action to a registration.
//!
//! Confirm and confirm-transfer are owner-only, even for admins. Cancel is
//! owner-or-admin. This asymmetry is intentional: staff verify payments, but
//! only the client who placed a hold may assert it.

use crate::models::{Registration, Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Confirm,
    ConfirmTransfer,
    Cancel,
    AdminUpdate,
    Read,
}

/// `role == admin` and `is_superuser` stay separate inputs; this is the only
/// place they are combined.
pub fn is_admin_equivalent(user: &User) -> bool {
    user.role == Role::Admin || user.is_superuser
}

pub fn can_access(actor: &User, registration: &Registration, action: Action) -> bool {
    let is_owner = registration.client_id == actor.id;
    match action {
        Action::Confirm | Action::ConfirmTransfer => is_owner,
        Action::Cancel => is_owner || is_admin_equivalent(actor),
        Action::AdminUpdate => is_admin_equivalent(actor),
        Action::Read => is_owner || actor.role == Role::Staff || is_admin_equivalent(actor),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::models::{PaymentMethod, PaymentStatus, RegistrationStatus};

    use super::*;

    fn user(id: u64, role: Role, is_superuser: bool) -> User {
        User {
            id,
            name: format!("user-{id}"),
            role,
            is_superuser,
        }
    }

    fn registration(client_id: u64) -> Registration {
        let now = Utc::now();
        Registration {
            id: 1,
            class_id: 1,
            client_id,
            status: RegistrationStatus::Reserved,
            payment_status: PaymentStatus::Pending,
            payment_method: PaymentMethod::Transfer,
            payment_amount: 25.0,
            payment_reference: "BK-TEST".to_string(),
            reserved_until: now,
            payment_deadline: now,
            user_confirmed_transfer: false,
            created_at: now,
        }
    }

    #[test]
    fn test_confirm_is_owner_only_even_for_admins() {
        let reg = registration(1);
        let owner = user(1, Role::Client, false);
        let other = user(2, Role::Client, false);
        let staff = user(3, Role::Staff, false);
        let admin = user(4, Role::Admin, false);
        let superuser = user(5, Role::Client, true);

        for action in [Action::Confirm, Action::ConfirmTransfer] {
            assert!(can_access(&owner, &reg, action));
            assert!(!can_access(&other, &reg, action));
            assert!(!can_access(&staff, &reg, action));
            assert!(!can_access(&admin, &reg, action));
            assert!(!can_access(&superuser, &reg, action));
        }
    }

    #[test]
    fn test_cancel_is_owner_or_admin_equivalent() {
        let reg = registration(1);
        assert!(can_access(&user(1, Role::Client, false), &reg, Action::Cancel));
        assert!(!can_access(&user(2, Role::Client, false), &reg, Action::Cancel));
        assert!(!can_access(&user(3, Role::Staff, false), &reg, Action::Cancel));
        assert!(can_access(&user(4, Role::Admin, false), &reg, Action::Cancel));
        assert!(can_access(&user(5, Role::Client, true), &reg, Action::Cancel));
    }

    #[test]
    fn test_admin_update_requires_admin_equivalent() {
        let reg = registration(1);
        assert!(!can_access(
            &user(1, Role::Client, false),
            &reg,
            Action::AdminUpdate
        ));
        assert!(!can_access(
            &user(3, Role::Staff, false),
            &reg,
            Action::AdminUpdate
        ));
        assert!(can_access(
            &user(4, Role::Admin, false),
            &reg,
            Action::AdminUpdate
        ));
        assert!(can_access(
            &user(5, Role::Staff, true),
            &reg,
            Action::AdminUpdate
        ));
    }

    #[test]
    fn test_read_allows_owner_staff_and_admins() {
        let reg = registration(1);
        assert!(can_access(&user(1, Role::Client, false), &reg, Action::Read));
        assert!(!can_access(&user(2, Role::Client, false), &reg, Action::Read));
        assert!(can_access(&user(3, Role::Staff, false), &reg, Action::Read));
        assert!(can_access(&user(4, Role::Admin, false), &reg, Action::Read));
    }
}
