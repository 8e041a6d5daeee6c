/// Liveness snapshot for load balancers and container healthchecks.
use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use sqlx::PgPool;
use std::time::Instant;

/// Fixed at startup so uptime can be reported.
#[derive(Clone)]
pub struct HealthState {
    pub env: String,
    pub started_at: Instant,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum DatabaseStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    uptime_secs: u64,
    database: DatabaseStatus,
}

/// GET /health
///
/// Pings the database and reports `ok` or `degraded`. Always 200; the body
/// carries the component detail.
pub async fn health_check(
    pool: web::Data<PgPool>,
    state: web::Data<HealthState>,
) -> impl Responder {
    let database = match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => DatabaseStatus::Healthy,
        Err(e) => {
            tracing::warn!("health check database ping failed: {}", e);
            DatabaseStatus::Unhealthy
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: if database == DatabaseStatus::Healthy {
            "ok"
        } else {
            "degraded"
        },
        version: env!("CARGO_PKG_VERSION"),
        environment: state.env.clone(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        database,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(DatabaseStatus::Healthy).unwrap(),
            "healthy"
        );
        assert_eq!(
            serde_json::to_value(DatabaseStatus::Unhealthy).unwrap(),
            "unhealthy"
        );
    }
}
