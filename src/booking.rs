//! Registration state machine: `reserved -> confirmed`, `reserved|confirmed
//! -> cancelled`, nothing leaves `cancelled`. Every transition runs inside a
//! single store transaction so the status write and the capacity ledger
//! update commit together.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::authz::{self, Action};
use crate::capacity;
use crate::deadlines;
use crate::mailer::Mailer;
use crate::models::{
    Class, ClassTemplate, PaymentMethod, PaymentStatus, Registration, RegistrationDetail,
    RegistrationPatch, RegistrationStatus, User,
};
use crate::reference;
use crate::settings::Settings;
use crate::store::MemoryStore;

#[derive(Debug, Error, PartialEq)]
pub enum BookingError {
    #[error("class not found")]
    ClassNotFound,
    #[error("class is fully booked")]
    ClassFull,
    #[error("registration not found")]
    RegistrationNotFound,
    #[error("{0}")]
    InvalidInput(String),
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
    #[error("registration is already cancelled")]
    AlreadyCancelled,
    #[error("not allowed")]
    Forbidden,
    /// A stored registration points at a class row that no longer exists.
    /// Broken cross-entity state, not a caller mistake.
    #[error("class row {0} missing for an existing registration")]
    ClassRowMissing(u64),
}

pub struct BookingService {
    store: Arc<MemoryStore>,
    mailer: Arc<dyn Mailer>,
    hold_minutes: i64,
    payment_hours: i64,
}

impl BookingService {
    pub fn new(store: Arc<MemoryStore>, mailer: Arc<dyn Mailer>, settings: &Settings) -> Self {
        Self {
            store,
            mailer,
            hold_minutes: settings.hold_minutes,
            payment_hours: settings.payment_hours,
        }
    }

    /// Places a hold: seat claimed, payment pending, both deadlines stamped.
    pub fn reserve(
        &self,
        client_id: u64,
        class_id: u64,
        payment_amount: Option<f64>,
        payment_method: PaymentMethod,
    ) -> Result<Registration, BookingError> {
        let amount = match payment_amount {
            Some(a) if a.is_finite() && a > 0.0 => a,
            _ => {
                return Err(BookingError::InvalidInput(
                    "payment_amount must be a positive number".into(),
                ));
            }
        };

        let now = Utc::now();
        let registration = self.store.transaction(|tables| {
            let class = tables
                .classes
                .get_mut(&class_id)
                .ok_or(BookingError::ClassNotFound)?;
            capacity::try_reserve(class)?;

            let mut payment_reference = reference::payment_reference(now);
            while tables.reference_taken(&payment_reference) {
                payment_reference = reference::payment_reference(now);
            }

            let id = tables.next_registration_id();
            let registration = Registration {
                id,
                class_id,
                client_id,
                status: RegistrationStatus::Reserved,
                payment_status: PaymentStatus::Pending,
                payment_method,
                payment_amount: amount,
                payment_reference,
                reserved_until: deadlines::hold_deadline(now, self.hold_minutes),
                payment_deadline: deadlines::payment_deadline(now, self.payment_hours),
                user_confirmed_transfer: false,
                created_at: now,
            };
            tables.registrations.insert(id, registration.clone());
            Ok(registration)
        })?;

        debug!(
            registration_id = registration.id,
            class_id, client_id, "hold placed"
        );
        Ok(registration)
    }

    /// Owner-only; valid only from `reserved`. The seat was counted at
    /// reservation time, so the ledger is untouched here.
    pub fn confirm(&self, registration_id: u64, actor: &User) -> Result<Registration, BookingError> {
        type Confirmed = (Registration, Class, Option<ClassTemplate>);
        let (registration, class, template): Confirmed = self.store.transaction(|tables| {
            let registration = tables
                .registrations
                .get(&registration_id)
                .ok_or(BookingError::RegistrationNotFound)?;
            if !authz::can_access(actor, registration, Action::Confirm) {
                return Err(BookingError::Forbidden);
            }
            if registration.status != RegistrationStatus::Reserved {
                return Err(BookingError::InvalidTransition(format!(
                    "cannot confirm a {} registration",
                    registration.status.as_str()
                )));
            }
            // Resolve the email payload before mutating, so an inconsistent
            // row fails the transition without half-applying it.
            let class = tables
                .classes
                .get(&registration.class_id)
                .cloned()
                .ok_or(BookingError::ClassRowMissing(registration.class_id))?;
            let template = tables.templates.get(&class.template_id).cloned();
            let registration = tables
                .registrations
                .get_mut(&registration_id)
                .ok_or(BookingError::RegistrationNotFound)?;
            registration.status = RegistrationStatus::Confirmed;
            Ok((registration.clone(), class, template))
        })?;

        // Side effect outside the lock.
        self.mailer
            .send_confirmation(&registration, &class, template.as_ref());
        Ok(registration)
    }

    /// Client-asserted "I sent the transfer" flag; distinct from the
    /// staff-verified `payment_status` and never changes `status`.
    pub fn confirm_transfer(
        &self,
        registration_id: u64,
        actor: &User,
    ) -> Result<Registration, BookingError> {
        self.store.transaction(|tables| {
            let registration = tables
                .registrations
                .get_mut(&registration_id)
                .ok_or(BookingError::RegistrationNotFound)?;
            if !authz::can_access(actor, registration, Action::ConfirmTransfer) {
                return Err(BookingError::Forbidden);
            }
            registration.user_confirmed_transfer = true;
            Ok(registration.clone())
        })
    }

    /// Owner or admin-equivalent; releases the seat exactly once. A second
    /// cancel fails with `AlreadyCancelled` instead of double-releasing.
    pub fn cancel(&self, registration_id: u64, actor: &User) -> Result<Registration, BookingError> {
        self.store.transaction(|tables| {
            let registration = tables
                .registrations
                .get_mut(&registration_id)
                .ok_or(BookingError::RegistrationNotFound)?;
            if !authz::can_access(actor, registration, Action::Cancel) {
                return Err(BookingError::Forbidden);
            }
            if registration.status == RegistrationStatus::Cancelled {
                return Err(BookingError::AlreadyCancelled);
            }
            registration.status = RegistrationStatus::Cancelled;
            let class_id = registration.class_id;
            let cancelled = registration.clone();
            if let Some(class) = tables.classes.get_mut(&class_id) {
                capacity::release(class);
            }
            Ok(cancelled)
        })
    }

    /// Admin-equivalent field patch. Status changes keep the ledger honest:
    /// leaving `{reserved, confirmed}` releases the seat, re-entering them
    /// from `cancelled` must pass the capacity check again.
    pub fn admin_update(
        &self,
        registration_id: u64,
        actor: &User,
        patch: RegistrationPatch,
    ) -> Result<Registration, BookingError> {
        if let Some(amount) = patch.payment_amount {
            if !amount.is_finite() || amount <= 0.0 {
                return Err(BookingError::InvalidInput(
                    "payment_amount must be a positive number".into(),
                ));
            }
        }

        self.store.transaction(|tables| {
            let current = tables
                .registrations
                .get(&registration_id)
                .cloned()
                .ok_or(BookingError::RegistrationNotFound)?;
            if !authz::can_access(actor, &current, Action::AdminUpdate) {
                return Err(BookingError::Forbidden);
            }

            let new_status = patch.status.unwrap_or(current.status);
            let occupies = |s: RegistrationStatus| {
                matches!(
                    s,
                    RegistrationStatus::Reserved | RegistrationStatus::Confirmed
                )
            };
            if !occupies(current.status) && occupies(new_status) {
                let class = tables
                    .classes
                    .get_mut(&current.class_id)
                    .ok_or(BookingError::ClassRowMissing(current.class_id))?;
                capacity::try_reserve(class)?;
            } else if occupies(current.status) && !occupies(new_status) {
                if let Some(class) = tables.classes.get_mut(&current.class_id) {
                    capacity::release(class);
                }
            }

            let registration = tables
                .registrations
                .get_mut(&registration_id)
                .ok_or(BookingError::RegistrationNotFound)?;
            registration.status = new_status;
            if let Some(v) = patch.payment_status {
                registration.payment_status = v;
            }
            if let Some(v) = patch.payment_method {
                registration.payment_method = v;
            }
            if let Some(v) = patch.payment_amount {
                registration.payment_amount = v;
            }
            if let Some(v) = patch.user_confirmed_transfer {
                registration.user_confirmed_transfer = v;
            }
            Ok(registration.clone())
        })
    }

    /// Sweeps lapsed holds through the same cancel+release path. Returns how
    /// many seats were reclaimed.
    pub fn expire_holds(&self, now: DateTime<Utc>) -> usize {
        self.store.transaction(|tables| {
            let expired: Vec<u64> = tables
                .registrations
                .values()
                .filter(|r| deadlines::is_hold_expired(r, now))
                .map(|r| r.id)
                .collect();
            for id in &expired {
                if let Some(registration) = tables.registrations.get_mut(id) {
                    registration.status = RegistrationStatus::Cancelled;
                    let class_id = registration.class_id;
                    if let Some(class) = tables.classes.get_mut(&class_id) {
                        capacity::release(class);
                    }
                }
            }
            expired.len()
        })
    }

    pub fn registration_detail(
        &self,
        registration_id: u64,
        actor: &User,
    ) -> Result<RegistrationDetail, BookingError> {
        self.store.transaction(|tables| {
            let registration = tables
                .registrations
                .get(&registration_id)
                .cloned()
                .ok_or(BookingError::RegistrationNotFound)?;
            if !authz::can_access(actor, &registration, Action::Read) {
                return Err(BookingError::Forbidden);
            }
            let class = tables
                .classes
                .get(&registration.class_id)
                .cloned()
                .ok_or(BookingError::ClassRowMissing(registration.class_id))?;
            Ok(RegistrationDetail {
                registration,
                class,
            })
        })
    }

    pub fn class_roster(
        &self,
        class_id: u64,
        actor: &User,
    ) -> Result<Vec<Registration>, BookingError> {
        if !authz::is_admin_equivalent(actor) {
            return Err(BookingError::Forbidden);
        }
        self.store.transaction(|tables| {
            if !tables.classes.contains_key(&class_id) {
                return Err(BookingError::ClassNotFound);
            }
            let mut roster: Vec<Registration> = tables
                .registrations
                .values()
                .filter(|r| r.class_id == class_id)
                .cloned()
                .collect();
            roster.sort_by_key(|r| r.id);
            Ok(roster)
        })
    }
}
