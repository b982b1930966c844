//! Liveness and readiness probes.
//!
//! Readiness flips once the server has bound its socket and wired storage;
//! liveness stays up until shutdown begins. Probe responses are never cached.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::{Deserialize, Serialize};

/// Shared probe state, registered as `web::Data<HealthState>`.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Live but not yet ready.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail both probes so load balancers drain the instance.
    pub fn mark_draining(&self) {
        self.ready.store(false, Ordering::Release);
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

/// Probe body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Ok,
    Unavailable,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ProbeResponse {
    pub status: ProbeStatus,
}

fn probe_response(healthy: bool) -> HttpResponse {
    let (mut builder, status) = if healthy {
        (HttpResponse::Ok(), ProbeStatus::Ok)
    } else {
        (HttpResponse::ServiceUnavailable(), ProbeStatus::Unavailable)
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ProbeResponse { status })
}

/// Readiness probe: 200 once the service accepts traffic, 503 before that
/// and while draining.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Ready to handle traffic", body = ProbeResponse),
        (status = 503, description = "Starting up or draining", body = ProbeResponse)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready())
}

/// Liveness probe: 200 until shutdown begins.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Process is alive", body = ProbeResponse),
        (status = 503, description = "Shutting down", body = ProbeResponse)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive())
}
