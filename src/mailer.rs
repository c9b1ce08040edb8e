//! Confirmation-email collaborator. Delivery is outside this service; the
//! default implementation records what would be sent.

use tracing::info;

use crate::models::{Class, ClassTemplate, Registration};

pub trait Mailer: Send + Sync {
    fn send_confirmation(
        &self,
        registration: &Registration,
        class: &Class,
        template: Option<&ClassTemplate>,
    );
}

#[derive(Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send_confirmation(
        &self,
        registration: &Registration,
        class: &Class,
        template: Option<&ClassTemplate>,
    ) {
        let class_name = template.map(|t| t.name.as_str()).unwrap_or("class");
        info!(
            client_id = registration.client_id,
            reference = %registration.payment_reference,
            class = class_name,
            location = %class.location,
            date = %class.scheduled_date,
            "confirmation email queued"
        );
    }
}
