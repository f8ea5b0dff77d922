use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use loanscope_core::{Error, Record, RECORD_COLUMNS};
use loanscope_scoring::ScoringResult;
use loanscope_similarity::{SimilarResponse, DEFAULT_TOP_K};
use loanscope_storage::ScoringEngine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

#[derive(Deserialize)]
struct MatchQuery {
    limit: Option<usize>,
    #[serde(default)]
    explain: bool,
}

impl MatchQuery {
    fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_TOP_K)
    }
}

/// A record with its scoring outcome merged in
#[derive(Serialize)]
struct ScoredRecord<'a> {
    #[serde(flatten)]
    record: &'a Record,
    #[serde(flatten)]
    scoring: ScoringResult,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(engine: Arc<ScoringEngine>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(engine.clone()))
                .configure(configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Register all routes; shared by the server and tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/schema", web::get().to(get_schema))
        .route("/records/{id}", web::get().to(get_record))
        .route("/records/{id}/score", web::get().to(score_record))
        .route("/records/{id}/similar", web::get().to(similar_records))
        .route("/records/{id}/evaluate", web::get().to(evaluate_record));
}

fn record_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "Record not found"
    }))
}

fn scoring_failed(id: &str, e: Error) -> HttpResponse {
    error!("Scoring record {} failed: {}", id, e);
    HttpResponse::InternalServerError().json(serde_json::json!({
        "error": e.to_string()
    }))
}

async fn get_schema(engine: web::Data<Arc<ScoringEngine>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "columns": RECORD_COLUMNS,
        "features": engine.scorer().features().features(),
        "classifier": engine.scorer().classifier_name(),
        "records_count": engine.store().len(),
    })))
}

async fn get_record(
    engine: web::Data<Arc<ScoringEngine>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();

    match engine.lookup_raw(&id) {
        Some(record) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": record
        }))),
        None => Ok(record_not_found()),
    }
}

async fn score_record(
    engine: web::Data<Arc<ScoringEngine>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();

    let record = match engine.lookup_raw(&id) {
        Some(r) => r,
        None => return Ok(record_not_found()),
    };

    match engine.score(record) {
        Ok(scoring) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": ScoredRecord { record, scoring }
        }))),
        Err(e) => Ok(scoring_failed(&id, e)),
    }
}

async fn similar_records(
    engine: web::Data<Arc<ScoringEngine>>,
    path: web::Path<String>,
    query: web::Query<MatchQuery>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();

    let record = match engine.lookup_raw(&id) {
        Some(r) => r,
        None => return Ok(record_not_found()),
    };

    let matches = engine.rank_similar(record, query.limit());

    if query.explain {
        let store = engine.store();
        let response = SimilarResponse::new(record, &matches, store.columns(), store.len(), true);
        Ok(HttpResponse::Ok().json(response))
    } else {
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": matches
        })))
    }
}

async fn evaluate_record(
    engine: web::Data<Arc<ScoringEngine>>,
    path: web::Path<String>,
    query: web::Query<MatchQuery>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();

    let Some(record) = engine.lookup_raw(&id) else {
        return Ok(record_not_found());
    };

    match engine.evaluate(record.id, query.limit()) {
        Ok(Some(evaluation)) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": evaluation
        }))),
        Ok(None) => Ok(record_not_found()),
        Err(e) => Ok(scoring_failed(&id, e)),
    }
}
