use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, ResponseError, Result as ActixResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use talentx_core::TalentSource;
use talentx_matching::{InsightContext, MatchEngine, MatchError, MatchReport, MatchRequest};
use talentx_storage::DatasetStore;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// The engine served over HTTP
pub type Engine = MatchEngine<Arc<DatasetStore>>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Source(#[from] talentx_core::Error),

    #[error("Matching task failed: {0}")]
    Blocking(String),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::Match(e) => e.kind(),
            ApiError::Source(talentx_core::Error::DimensionNotFound(_)) => "dimension_not_found",
            ApiError::Source(_) => "source",
            ApiError::Blocking(_) => "internal",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            "benchmark_not_found" | "employee_not_found" | "dimension_not_found" => StatusCode::NOT_FOUND,
            "invalid_criteria" | "incomplete_benchmark" | "dimension_mismatch" => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
        }))
    }
}

#[derive(Serialize)]
struct MatchResponse {
    run_id: Uuid,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: MatchReport,
}

#[derive(Serialize)]
struct InsightResponse {
    run_id: Uuid,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    context: InsightContext,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(engine: Arc<Engine>, port: u16) -> std::io::Result<()> {
        info!(port, "Starting REST API");
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(engine.clone()))
                .configure(Self::routes)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    pub fn routes(cfg: &mut web::ServiceConfig) {
        cfg.route("/healthz", web::get().to(healthz))
            .route("/dataset", web::get().to(describe_dataset))
            .route("/dataset/reload", web::post().to(reload_dataset))
            .route("/dimensions", web::get().to(list_dimensions))
            .route("/dimensions/{id}", web::get().to(get_dimension))
            .route("/benchmarks", web::get().to(list_benchmarks))
            .route("/benchmarks/{id}", web::get().to(get_benchmark))
            .route("/match", web::post().to(run_match))
            .route("/match/insights", web::post().to(match_insights));
    }
}

fn store(engine: &Engine) -> &DatasetStore {
    engine.source()
}

async fn healthz() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({ "status": "ok" })))
}

async fn describe_dataset(engine: web::Data<Arc<Engine>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(store(&engine).describe()))
}

async fn reload_dataset(engine: web::Data<Arc<Engine>>) -> Result<HttpResponse, ApiError> {
    let description = store(&engine).reload()?;
    Ok(HttpResponse::Ok().json(description))
}

async fn list_dimensions(engine: web::Data<Arc<Engine>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(store(&engine).dimensions()))
}

async fn get_dimension(
    engine: web::Data<Arc<Engine>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let dimension = store(&engine).dimension(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(dimension))
}

async fn list_benchmarks(engine: web::Data<Arc<Engine>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(store(&engine).benchmarks()))
}

async fn get_benchmark(
    engine: web::Data<Arc<Engine>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    match store(&engine).benchmark(&id)? {
        Some(profile) => Ok(HttpResponse::Ok().json(profile)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "error": format!("Benchmark not found: {}", id),
            "kind": "benchmark_not_found",
        }))),
    }
}

async fn run_match(
    engine: web::Data<Arc<Engine>>,
    req: web::Json<MatchRequest>,
) -> Result<HttpResponse, ApiError> {
    let engine = engine.get_ref().clone();
    let request = req.into_inner();
    let report = web::block(move || engine.run(&request))
        .await
        .map_err(|e| ApiError::Blocking(e.to_string()))?
        .map_err(|e| {
            warn!(kind = e.kind(), error = %e, "Matching request rejected");
            e
        })?;

    let response = MatchResponse {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        report,
    };
    Ok(HttpResponse::Ok().json(response))
}

async fn match_insights(
    engine: web::Data<Arc<Engine>>,
    req: web::Json<MatchRequest>,
) -> Result<HttpResponse, ApiError> {
    let engine = engine.get_ref().clone();
    let request = req.into_inner();
    let context = web::block(move || engine.insights(&request))
        .await
        .map_err(|e| ApiError::Blocking(e.to_string()))??;

    let response = InsightResponse {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        context,
    };
    Ok(HttpResponse::Ok().json(response))
}
