pub mod booking;
pub mod field;
pub mod message;
pub mod payment;
pub mod user;
pub use booking::*;
pub use field::*;
pub use message::*;
pub use payment::*;
pub use user::*;

use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(
            Message,
            ErrorMessage,
            RegisterInfo,
            LoginInfo,
            AuthUser,
            AuthResponse,
            FieldInfo,
            FieldResponse,
            FieldEnvelope,
            FieldListResponse,
            NewBooking,
            BookingResponse,
            BookingEnvelope,
            NewPayment,
            PaymentResponse,
            PaymentEnvelope,
        ),
    ),
    modifiers(&SecurityAddon)
)]
/// Captures OpenAPI schemas and canned responses defined in the DTO module
pub struct OpenApiSchemas;

pub struct SecurityAddon;
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}
