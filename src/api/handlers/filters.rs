use actix_web::{web, HttpResponse};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::filter::builder;
use crate::models::config::AppConfig;
use crate::models::filter::{Endpoint, EndpointFilterRequest, FilterGoal, Purpose};
use crate::utils::error::AppResult;

/// Build endpoint filter request
#[derive(Deserialize)]
pub struct EndpointFilterBody {
    /// "capture" or "display"
    purpose: String,

    #[serde(flatten)]
    endpoint: Endpoint,

    /// "include" or "exclude" (default)
    filter_goal: Option<String>,
}

/// Build combined filter request
#[derive(Deserialize)]
pub struct CombinedFilterBody {
    purpose: String,
    #[serde(default)]
    endpoints: Vec<Endpoint>,
    filter_goal: Option<String>,
}

/// Response carrying one filter expression
#[derive(Serialize)]
struct ExpressionResponse {
    purpose: Purpose,
    filter_goal: FilterGoal,
    expression: String,
}

/// Response for the preloaded endpoint list
#[derive(Serialize)]
struct DefaultFiltersResponse {
    endpoints: usize,
    capture: String,
    display: String,
}

/// Build the filter for a single endpoint
pub async fn build_endpoint_filter(body: web::Json<EndpointFilterBody>) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let request = EndpointFilterRequest::parse(&body.purpose, body.endpoint, body.filter_goal.as_deref())?;

    let expression = builder::build(&request);
    debug!("Endpoint filter: {}", expression);

    Ok(HttpResponse::Ok().json(ExpressionResponse {
        purpose: request.purpose,
        filter_goal: request.filter_goal,
        expression,
    }))
}

/// Build one filter covering a list of endpoints
pub async fn build_combined_filter(body: web::Json<CombinedFilterBody>) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let request = EndpointFilterRequest::parse(&body.purpose, Endpoint::default(), body.filter_goal.as_deref())?;

    let expression = builder::build_for_endpoints(&body.endpoints, request.purpose, request.filter_goal);
    info!(
        "Built combined {} filter for {} endpoints",
        request.purpose,
        body.endpoints.len()
    );

    Ok(HttpResponse::Ok().json(ExpressionResponse {
        purpose: request.purpose,
        filter_goal: request.filter_goal,
        expression,
    }))
}

/// Exclusion filters for the endpoint list loaded at startup
pub async fn get_default_filters(config: web::Data<AppConfig>) -> HttpResponse {
    let endpoints = &config.default_endpoints;

    HttpResponse::Ok().json(DefaultFiltersResponse {
        endpoints: endpoints.len(),
        capture: builder::build_for_endpoints(endpoints, Purpose::Capture, FilterGoal::Exclude),
        display: builder::build_for_endpoints(endpoints, Purpose::Display, FilterGoal::Exclude),
    })
}
