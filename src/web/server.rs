use axum::http::header;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use uuid::Uuid;

use crate::cli::ServeArgs;
use crate::core::types::{ClientInfo, OrderType};
use crate::order::{generate, preview, OrderError};
use crate::template::{CellLayout, TemplateStore};
use crate::utils::validation::{validate_client_field, MAX_TEXT_SIZE, XLSX_MIME_TYPE};
use crate::web::session_store::SessionStore;

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_MULTIPART_FIELDS: usize = 10;
pub const MAX_TEXT_FIELD_SIZE: usize = MAX_TEXT_SIZE;
pub const MAX_BODY_SIZE: usize = 2 * 1024 * 1024; // 2MB

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "oligo_order_session";

/// How often idle sessions are swept
pub const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Shared application state
pub struct AppState {
    pub templates: TemplateStore,
    pub layout: CellLayout,
    /// Shared access password; `None` disables the gate
    pub password: Option<String>,
    pub sessions: SessionStore,
}

impl AppState {
    #[must_use]
    pub fn new(
        templates: TemplateStore,
        layout: CellLayout,
        password: Option<String>,
        session_ttl: Duration,
    ) -> Self {
        let password = password.filter(|p| !p.is_empty());
        let sessions = SessionStore::new(password.is_some(), session_ttl);
        Self {
            templates,
            layout,
            password,
            sessions,
        }
    }
}

/// Order form fields extracted from multipart form
#[derive(Debug, Default)]
struct OrderForm {
    client: ClientInfo,
    order_type: OrderType,
    text: String,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    // Log detailed error server-side for debugging (not exposed to client)
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None, // Never expose internal details to prevent information disclosure
    }
}

fn error_response(status: StatusCode, error: ErrorResponse) -> Response {
    (status, Json(error)).into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the layout cannot be loaded, the tokio runtime cannot
/// be created, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Create the application routes with security headers, timeouts and body
/// limits, but without per-IP rate limiting (which needs peer addresses).
pub fn create_app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/session", get(session_handler))
        .route("/api/login", post(login_handler))
        .route("/api/logout", post(logout_handler))
        .route("/api/preview", post(preview_handler))
        .route("/api/generate", post(generate_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(100))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

/// Create the full router, including IP-based rate limiting.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limiter configuration"))?;

    Ok(create_app_router(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let layout = args.templates.cell_layout()?;
    let templates = args.templates.template_store();

    for order_type in [OrderType::DnaPrimer, OrderType::SirnaRna] {
        let path = templates.path_for(order_type);
        if !path.is_file() {
            tracing::warn!(
                "{} template not found at {}; those orders will fail",
                order_type,
                path.display()
            );
        }
    }

    let session_ttl = args.session_ttl();
    let state = Arc::new(AppState::new(
        templates,
        layout,
        args.password,
        session_ttl,
    ));
    if state.password.is_none() {
        tracing::warn!("No access password configured; the form is open to anyone who can reach it");
    }

    spawn_session_sweeper(Arc::clone(&state));

    let app = create_router(state)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting oligo-order web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Periodically drop idle sessions and the text they hold
fn spawn_session_sweeper(state: Arc<AppState>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = state.sessions.purge_expired();
            if removed > 0 {
                tracing::debug!("Dropped {} idle sessions", removed);
            }
        }
    });
}

/// Main page handler
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("templates/index.html"))
}

fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}

/// Find the caller's live session, or start one and set its cookie
fn resolve_session(state: &AppState, jar: CookieJar) -> (CookieJar, Uuid) {
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
        .filter(|id| state.sessions.contains(id));

    match existing {
        Some(id) => (jar, id),
        None => {
            let id = state.sessions.create();
            (jar.add(session_cookie(id)), id)
        }
    }
}

/// Resolve the session and reject it unless it has passed the gate
fn require_auth(state: &AppState, jar: CookieJar) -> Result<(CookieJar, Uuid), Response> {
    let (jar, id) = resolve_session(state, jar);
    let authenticated = state
        .sessions
        .with_session(&id, |s| s.authenticated)
        .unwrap_or(false);

    if authenticated {
        Ok((jar, id))
    } else {
        Err((
            jar,
            error_response(
                StatusCode::UNAUTHORIZED,
                create_safe_error_response("unauthorized", "Please enter the access password", None),
            ),
        )
            .into_response())
    }
}

/// Report whether the caller is logged in and whether a password is required
async fn session_handler(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let (jar, id) = resolve_session(&state, jar);
    let authenticated = state
        .sessions
        .with_session(&id, |s| s.authenticated)
        .unwrap_or(false);

    (
        jar,
        Json(serde_json::json!({
            "authenticated": authenticated,
            "gate_enabled": state.sessions.gate_enabled(),
        })),
    )
}

async fn login_handler(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Response {
    let (jar, id) = resolve_session(&state, jar);

    let mut candidate = String::new();
    let mut fields_received = 0usize;
    while let Ok(Some(field)) = multipart.next_field().await {
        fields_received += 1;
        if fields_received > MAX_MULTIPART_FIELDS {
            break;
        }
        if field.name() == Some("password") {
            candidate = field.text().await.unwrap_or_default();
        }
    }

    let authenticated = match &state.password {
        Some(expected) => state
            .sessions
            .with_session(&id, |s| s.authenticate(&candidate, expected))
            .unwrap_or(false),
        None => true,
    };

    if authenticated {
        tracing::info!("Session {} authenticated", id);
        (jar, Json(serde_json::json!({ "authenticated": true }))).into_response()
    } else {
        tracing::warn!("Rejected password attempt for session {}", id);
        (
            jar,
            error_response(
                StatusCode::UNAUTHORIZED,
                create_safe_error_response("invalid_password", "Incorrect password", None),
            ),
        )
            .into_response()
    }
}

async fn logout_handler(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    if let Some(id) = jar
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
    {
        state.sessions.remove(&id);
        tracing::debug!("Session {} ended", id);
    }

    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Json(serde_json::json!({ "authenticated": false })),
    )
}

/// API endpoint showing the rows that would be ordered
async fn preview_handler(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Response {
    let (jar, id) = match require_auth(&state, jar) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let form = match extract_order_form(&mut multipart).await {
        Ok(form) => form,
        Err(response) => return (jar, response).into_response(),
    };

    let order_type = form.order_type;
    let rows = preview(&form.text, order_type);
    state.sessions.with_session(&id, |s| {
        s.update(form.client, order_type, form.text);
    });

    let body = if rows.is_empty() {
        serde_json::json!({
            "order_type": order_type,
            "rows": rows,
            "warning": OrderError::NoMatchesFound.to_string(),
        })
    } else {
        serde_json::json!({
            "order_type": order_type,
            "rows": rows,
        })
    };

    (jar, Json(body)).into_response()
}

/// API endpoint returning the filled order form as an xlsx download
async fn generate_handler(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Response {
    let start_time = std::time::Instant::now();

    let (jar, id) = match require_auth(&state, jar) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let form = match extract_order_form(&mut multipart).await {
        Ok(form) => form,
        Err(response) => return (jar, response).into_response(),
    };

    // Work on a snapshot so the session lock is not held during file I/O
    let Some(session) = state.sessions.with_session(&id, |s| {
        s.update(form.client, form.order_type, form.text);
        s.clone()
    }) else {
        return (
            jar,
            error_response(
                StatusCode::UNAUTHORIZED,
                create_safe_error_response("session_expired", "Session expired, please reload", None),
            ),
        )
            .into_response();
    };

    let order = match generate(&session, &state.templates, &state.layout) {
        Ok(order) => order,
        Err(err) => return (jar, order_error_response(&err)).into_response(),
    };

    let Ok(disposition) = HeaderValue::from_str(&content_disposition(&order.filename)) else {
        return (
            jar,
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                create_safe_error_response(
                    "fill_failed",
                    "Failed to prepare the download",
                    Some("Content-Disposition header rejected"),
                ),
            ),
        )
            .into_response();
    };

    tracing::info!(
        "Generated {} order with {} rows in {} ms",
        order.order_type,
        order.rows.len(),
        start_time.elapsed().as_millis()
    );

    (
        jar,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_MIME_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        order.content,
    )
        .into_response()
}

fn order_error_response(err: &OrderError) -> Response {
    match err {
        OrderError::NoMatchesFound => error_response(
            StatusCode::BAD_REQUEST,
            create_safe_error_response("no_matches", &err.to_string(), None),
        ),
        OrderError::TemplateNotFound(path) => {
            let internal = format!("missing template {}", path.display());
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                create_safe_error_response(
                    "template_not_found",
                    "The order template is missing on the server. Please contact the administrator.",
                    Some(&internal),
                ),
            )
        }
        OrderError::Fill(message) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            create_safe_error_response(
                "fill_failed",
                "Failed to fill the order form",
                Some(message.as_str()),
            ),
        ),
    }
}

/// `attachment` disposition with an ASCII fallback and the UTF-8 name (RFC 6266)
fn content_disposition(filename: &str) -> String {
    format!(
        "attachment; filename=\"order_form.xlsx\"; filename*=UTF-8''{}",
        utf8_percent_encode(filename, NON_ALPHANUMERIC)
    )
}

/// Extract the order form fields from a multipart body
async fn extract_order_form(multipart: &mut Multipart) -> Result<OrderForm, Response> {
    let mut form = OrderForm::default();
    let mut fields_received = 0usize;

    loop {
        // Check field count limit before processing
        if fields_received >= MAX_MULTIPART_FIELDS {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Too many form fields".to_string(),
                    error_type: "field_limit_exceeded".to_string(),
                    details: None,
                },
            ));
        }

        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => {
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    create_safe_error_response(
                        "invalid_form",
                        "Failed to read the submitted form",
                        None,
                    ),
                ));
            }
        };
        fields_received += 1;

        let name = field.name().unwrap_or_default().to_string();
        let Ok(value) = field.text().await else {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                create_safe_error_response(
                    "invalid_form",
                    "Failed to read the submitted form",
                    None,
                ),
            ));
        };

        match name.as_str() {
            "client_name" => form.client.name = value,
            "client_unit" => form.client.unit = value,
            "client_group" => form.client.group = value,
            "order_type" => match value.parse::<OrderType>() {
                Ok(order_type) => form.order_type = order_type,
                Err(_) => {
                    return Err(error_response(
                        StatusCode::BAD_REQUEST,
                        create_safe_error_response(
                            "invalid_order_type",
                            "Order type must be 'dna' or 'rna'",
                            None,
                        ),
                    ));
                }
            },
            "order_text" => {
                // Validate text field size
                if value.len() > MAX_TEXT_FIELD_SIZE {
                    return Err(error_response(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        ErrorResponse {
                            error: "Text field size exceeds limit".to_string(),
                            error_type: "text_too_large".to_string(),
                            details: None,
                        },
                    ));
                }
                form.text = value;
            }
            _ => {} // Ignore unknown fields
        }
    }

    for (field, value) in [
        ("name", &form.client.name),
        ("unit", &form.client.unit),
        ("group", &form.client.group),
    ] {
        if let Err(err) = validate_client_field(field, value) {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                create_safe_error_response("field_too_long", &err.to_string(), None),
            ));
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_encodes_utf8_name() {
        let value = content_disposition("百力格订购表_张三.xlsx");
        assert!(value.starts_with("attachment; filename=\"order_form.xlsx\""));
        assert!(value.contains("filename*=UTF-8''%E7%99%BE"));
        assert!(value.is_ascii());
        assert!(HeaderValue::from_str(&value).is_ok());
    }

    #[test]
    fn test_empty_password_disables_gate() {
        let layout = CellLayout::load_embedded().unwrap();
        let state = AppState::new(
            TemplateStore::in_dir("."),
            layout,
            Some(String::new()),
            Duration::from_secs(60),
        );
        assert!(state.password.is_none());
        assert!(!state.sessions.gate_enabled());
    }

    #[test]
    fn test_order_error_statuses() {
        assert_eq!(
            order_error_response(&OrderError::NoMatchesFound).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            order_error_response(&OrderError::TemplateNotFound("x.xlsx".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            order_error_response(&OrderError::Fill("boom".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
