//! OpenAPI documentation
//!
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use super::types::{EnrollRequest, EnrollResponseData, HealthResponse, QueueStatusData};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Matchmaker API",
        version = "1.0.0",
        description = "Enroll players; groups form in arrival order once enough are queued.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        super::handlers::enroll_player,
        super::handlers::queue_status,
        super::handlers::health_check,
    ),
    components(schemas(EnrollRequest, EnrollResponseData, QueueStatusData, HealthResponse)),
    tags(
        (name = "Matchmaking", description = "Player enrollment and queue state"),
        (name = "System", description = "Health and diagnostics")
    )
)]
pub struct ApiDoc;
