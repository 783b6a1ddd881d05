//! HTTP surface used by the rendered pages.

use crate::config::Config;
use crate::contact::{ContactResponse, ContactSubmission, ErrorBody};
use crate::i18n::LocaleCode;
use crate::page::PageContext;
use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/page-context", get(page_context))
        .route("/api/contact", post(submit_contact))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, router(state))
        .await
        .context("HTTP server stopped")
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub path: Option<String>,
    pub lang: Option<String>,
}

pub async fn page_context(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<PageContext> {
    let requested = query.lang.as_deref().and_then(|code| match LocaleCode::from_code(code) {
        Ok(locale) => Some(locale),
        Err(e) => {
            debug!("Ignoring requested locale: {}", e);
            None
        }
    });

    Json(PageContext::resolve(
        query.path.as_deref().unwrap_or("/"),
        requested,
        state.config.default_locale,
        &state.config.site_base_url,
    ))
}

/// Body forwarded to the mail relay.
#[derive(Debug, Serialize)]
struct ForwardPayload<'a> {
    #[serde(flatten)]
    submission: &'a ContactSubmission,
    received_at: DateTime<Utc>,
}

type ApiError = (StatusCode, Json<ErrorBody>);

/// Contact form endpoint.
///
/// A filled honeypot is dropped silently and answered exactly like a
/// successful submission, so bots cannot tell they were filtered.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(submission): Json<ContactSubmission>,
) -> Result<Json<ContactResponse>, ApiError> {
    let strings = submission.lang.strings();

    if submission.is_spam() {
        info!("Honeypot filled, dropping contact submission");
        return Ok(Json(ContactResponse { success: true }));
    }

    if let Err(fields) = submission.validate() {
        debug!("Contact submission rejected: {} invalid field(s)", fields.len());
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: strings.error_validation.to_string(),
                fields,
            }),
        ));
    }

    let Some(forward_url) = &state.config.contact_forward_url else {
        warn!(
            "CONTACT_FORWARD_URL not set, contact submission ({}) was not forwarded",
            submission.lang
        );
        return Ok(Json(ContactResponse { success: true }));
    };

    let payload = ForwardPayload {
        submission: &submission,
        received_at: Utc::now(),
    };

    let forwarded = state
        .http
        .post(forward_url)
        .json(&payload)
        .send()
        .await
        .and_then(|response| response.error_for_status());

    match forwarded {
        Ok(_) => {
            info!("Contact submission forwarded ({})", submission.lang);
            Ok(Json(ContactResponse { success: true }))
        }
        Err(e) => {
            error!("Failed to forward contact submission: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorBody {
                    error: strings.error_transient.to_string(),
                    fields: Vec::new(),
                }),
            ))
        }
    }
}
