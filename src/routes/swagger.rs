use crate::models::dto;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Field Booking API",
    description = "Sports field registry, slot booking and payment API",
))]
struct Api;

/// Constructs the route on the API that renders the swagger UI and returns the OpenAPI schema.
/// Merges in OpenAPI definitions from the [dto] package and the route submodules
pub fn build_documentation() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_docs())
}

pub fn api_docs() -> utoipa::openapi::OpenApi {
    let mut api_docs = Api::openapi();
    api_docs.merge(dto::OpenApiSchemas::openapi());
    api_docs.merge(super::health::HealthApi::openapi());
    api_docs.merge(super::user::UsersApi::openapi());
    api_docs.merge(super::field::FieldsApi::openapi());
    api_docs.merge(super::booking::BookingsApi::openapi());
    api_docs.merge(super::payment::PaymentsApi::openapi());
    api_docs
}
