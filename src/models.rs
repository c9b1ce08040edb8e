use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Staff,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Reserved,
    Confirmed,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationStatus::Reserved => "reserved",
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Transfer,
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    Scheduled,
    Cancelled,
}

/// Identity resolved from a session token. `role` and `is_superuser` are
/// independent signals; only `authz::is_admin_equivalent` combines them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub role: Role,
    pub is_superuser: bool,
}

/// Reusable class definition that scheduled classes are created from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassTemplate {
    pub id: u64,
    pub name: String,
    pub duration_min: u32,
    pub base_price: f64,
    pub default_capacity: u32,
    pub is_active: bool,
    pub is_default: bool,
}

/// One scheduled occurrence of a template. `current_bookings` counts
/// registrations in `{reserved, confirmed}` and never exceeds `max_capacity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Class {
    pub id: u64,
    pub template_id: u64,
    #[schema(value_type = String, format = "date-time", example = "2026-09-07T18:00:00Z")]
    pub scheduled_date: DateTime<Utc>,
    pub location: String,
    pub max_capacity: u32,
    pub current_bookings: u32,
    pub custom_price: Option<f64>,
    pub status: ClassStatus,
}

/// One client's claim on a seat in a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Registration {
    pub id: u64,
    pub class_id: u64,
    pub client_id: u64,
    pub status: RegistrationStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub payment_amount: f64,
    /// Short human-typeable label quoted as the bank-transfer memo.
    pub payment_reference: String,
    #[schema(value_type = String, format = "date-time")]
    pub reserved_until: DateTime<Utc>,
    #[schema(value_type = String, format = "date-time")]
    pub payment_deadline: DateTime<Utc>,
    pub user_confirmed_transfer: bool,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

/// Field-wise patch applied by `admin_update`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegistrationPatch {
    pub status: Option<RegistrationStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_amount: Option<f64>,
    pub user_confirmed_transfer: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegistrationDetail {
    pub registration: Registration,
    pub class: Class,
}
