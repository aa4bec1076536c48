use actix_web::{web, HttpResponse};

use um_infra::DatabasePool;

/// Health check including database connectivity
///
/// Reports 503 when the registered database pool cannot answer a query. A
/// process without a pool (tests, local runs on in-memory storage) only
/// reports liveness.
pub async fn health_check(database: Option<web::Data<DatabasePool>>) -> HttpResponse {
    let database_status = match database {
        Some(pool) => {
            let healthy = matches!(pool.health_check().await, Ok(true));
            let stats = pool.get_statistics();
            tracing::debug!(healthy, %stats, "Database health checked");
            Some((
                healthy,
                serde_json::json!({
                    "status": if healthy { "up" } else { "down" },
                    "connections": stats.connections,
                    "idle_connections": stats.idle_connections,
                    "max_connections": stats.max_connections,
                }),
            ))
        }
        None => None,
    };

    let healthy = database_status.as_ref().map_or(true, |(healthy, _)| *healthy);
    let body = serde_json::json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "service": "user-management-service",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database_status.map(|(_, details)| details),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
