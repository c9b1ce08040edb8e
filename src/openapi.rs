use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers::ReserveRequest;
use crate::models::{
    Class, ClassStatus, ClassTemplate, PaymentMethod, PaymentStatus, Registration,
    RegistrationDetail, RegistrationPatch, RegistrationStatus, Role, User,
};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("session"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::reserve,
        crate::handlers::update_registration,
        crate::handlers::get_registration,
        crate::handlers::class_registrations
    ),
    components(schemas(
        Class,
        ClassStatus,
        ClassTemplate,
        PaymentMethod,
        PaymentStatus,
        Registration,
        RegistrationDetail,
        RegistrationPatch,
        RegistrationStatus,
        ReserveRequest,
        Role,
        User
    )),
    tags(
        (name = "booking", description = "Class registration reservation lifecycle")
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;
