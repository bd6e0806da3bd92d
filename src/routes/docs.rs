use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

/// Path the raw OpenAPI document is served from; the browser UI at `/docs`
/// fetches it from here.
const OPENAPI_JSON: &str = "/api-doc/openapi.json";

/// Interactive browser for the scheduling API, generated from the route
/// annotations.
pub fn router(state: SharedState) -> Router<SharedState> {
    let swagger: Router<SharedState> =
        SwaggerUi::new("/docs").url(OPENAPI_JSON, ApiDoc::openapi()).into();

    swagger.with_state(state)
}
