use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Json, Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::core::{Ledger, LedgerError, MemberId, default_tier, member_row, tier_infos};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

pub type SharedLedger = Arc<Mutex<Ledger>>;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RegisterPayload {
    name: Option<String>,
    tier_id: Option<String>,
    deposit_amount: Option<Value>,
}

// Anything other than a JSON number or string is left unparseable so the
// ledger reports it as an invalid amount after the name check.
fn amount_text(value: Option<Value>) -> String {
    match value {
        Some(Value::Number(n)) => n.as_f64().map(|v| v.to_string()).unwrap_or_default(),
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    kind: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WeekResponse {
    current_week: u64,
}

pub fn router(ledger: SharedLedger) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/tiers", get(tiers_handler))
        .route("/api/ledger", get(ledger_handler))
        .route("/api/members", post(register_handler))
        .route("/api/members/:id", delete(withdraw_handler))
        .route("/api/week/advance", post(advance_week_handler))
        .fallback(not_found_handler)
        .with_state(ledger)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let app = router(Arc::new(Mutex::new(Ledger::new())));

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "savings group view listening");
    info!("Local access: http://127.0.0.1:{}/", addr.port());

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    json_response(
        StatusCode::NOT_FOUND,
        ErrorResponse {
            error: "Not found".to_string(),
            kind: "not_found",
        },
    )
}

async fn tiers_handler() -> Response {
    json_response(StatusCode::OK, tier_infos())
}

async fn ledger_handler(State(ledger): State<SharedLedger>) -> Response {
    let ledger = ledger.lock().await;
    json_response(StatusCode::OK, ledger.snapshot())
}

async fn register_handler(
    State(ledger): State<SharedLedger>,
    payload: Result<Json<RegisterPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            debug!(%rejection, "registration body rejected");
            return json_response(
                rejection.status(),
                ErrorResponse {
                    error: rejection.body_text(),
                    kind: "invalid_request",
                },
            );
        }
    };
    let name = payload.name.unwrap_or_default();
    let tier_id = payload
        .tier_id
        .unwrap_or_else(|| default_tier().id.as_str().to_string());
    let amount = amount_text(payload.deposit_amount);

    let mut ledger = ledger.lock().await;
    let week = ledger.current_week();
    match ledger.register(&name, &tier_id, &amount) {
        Ok(member) => json_response(StatusCode::CREATED, member_row(&member, week)),
        Err(err) => ledger_error_response(&err),
    }
}

async fn withdraw_handler(
    State(ledger): State<SharedLedger>,
    Path(id): Path<String>,
) -> Response {
    match id.parse::<MemberId>() {
        Ok(id) => ledger.lock().await.withdraw(id),
        Err(_) => debug!(%id, "withdraw ignored: malformed member id"),
    }
    with_cache_control(StatusCode::NO_CONTENT)
}

async fn advance_week_handler(State(ledger): State<SharedLedger>) -> Response {
    let current_week = ledger.lock().await.advance_week();
    json_response(StatusCode::OK, WeekResponse { current_week })
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn ledger_error_response(err: &LedgerError) -> Response {
    let status = match err {
        LedgerError::TierNotFound(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    json_response(
        status,
        ErrorResponse {
            error: err.to_string(),
            kind: err.kind(),
        },
    )
}
