use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use crate::api::handlers::{
    filters::{
        build_endpoint_filter,
        build_combined_filter,
        get_default_filters,
    },
    tables::sort_table,
};

/// Root endpoint to provide information about the API
async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "name": "pcapkit API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Capture/display filter builder and table sorting backend",
        "endpoints": [
            {
                "path": "/api/filters/endpoint",
                "method": "POST",
                "description": "Build a capture or display filter for one endpoint"
            },
            {
                "path": "/api/filters/combined",
                "method": "POST",
                "description": "Build one filter covering a list of endpoints"
            },
            {
                "path": "/api/filters/default",
                "method": "GET",
                "description": "Exclusion filters for the endpoint list loaded at startup"
            },
            {
                "path": "/api/tables/sort",
                "method": "POST",
                "description": "Sort table rows by a column, toggling direction on repeat"
            }
        ]
    }))
}

/// Configure API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Root endpoint
        .route("/", web::get().to(index))
        .service(
            web::scope("/api")
                // Filter expressions
                .service(
                    web::scope("/filters")
                        .route("/endpoint", web::post().to(build_endpoint_filter))
                        .route("/combined", web::post().to(build_combined_filter))
                        .route("/default", web::get().to(get_default_filters))
                )
                // Table sorting
                .service(
                    web::scope("/tables")
                        .route("/sort", web::post().to(sort_table))
                )
        );
}
