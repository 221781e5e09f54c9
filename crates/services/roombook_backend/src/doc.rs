// --- File: crates/services/roombook_backend/src/doc.rs ---

#![cfg(feature = "openapi")]

use roombook_auth::doc::AuthApiDoc;
use roombook_booking::doc::BookingApiDoc;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::HealthResponse;

struct BearerAddon;

impl Modify for BearerAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Room Booking API",
        version = "0.1.0",
        description = "Meeting-room booking with conflict-free reservations",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(crate::health_handler),
    components(schemas(HealthResponse)),
    modifiers(&BearerAddon),
    tags((name = "Health", description = "Liveness")),
    servers((url = "/api", description = "Main API Prefix")),
)]
struct ApiDoc;

/// All crate docs merged into one document.
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(AuthApiDoc::openapi());
    doc.merge(BookingApiDoc::openapi());
    doc
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi())
}
