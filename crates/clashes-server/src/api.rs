use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Path, RawQuery, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use clashes_data::{actions, ClashBackend, CreateOutcome};
use clashes_shared::constants::TERM_PARAM;
use clashes_shared::{Clash, CreateClashForm, Envelope, FieldErrors};

use crate::config::ServerConfig;
use crate::error::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn ClashBackend>,
    pub config: Arc<ServerConfig>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/info", get(server_info))
        .route("/clashes", get(list_clashes).post(create_clash))
        .route("/clashes/:id", get(get_clash))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServerInfoResponse {
    name: String,
    version: &'static str,
    graphql_host: Option<String>,
}

/// First `term` value of the query string, or empty. Never rejects: a
/// repeated or undecodable parameter is treated like any other term.
fn term_from_query(query: Option<&str>) -> String {
    query
        .and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == TERM_PARAM)
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default()
}

/// Body returned when a create submission does not end in a redirect.
#[derive(Serialize)]
struct CreateFailureResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    values: CreateClashForm,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn server_info(State(state): State<AppState>) -> Json<ServerInfoResponse> {
    Json(ServerInfoResponse {
        name: state.config.instance_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        graphql_host: state.config.graphql_host(),
    })
}

/// `GET /clashes?term=` — filtered list wrapped in the envelope.
async fn list_clashes(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Envelope<Vec<Clash>>>, ServerError> {
    let term = term_from_query(query.as_deref());

    let clashes = actions::filter_clashes(state.backend.as_ref(), &term).await?;
    debug!(%term, count = clashes.len(), "Listing clashes");

    Ok(Json(Envelope::list(clashes)))
}

async fn get_clash(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Clash>>, ServerError> {
    let clash = actions::fetch_clash(state.backend.as_ref(), &id).await?;
    Ok(Json(Envelope::ok(clash)))
}

/// `POST /clashes` — urlencoded create form.
async fn create_clash(
    State(state): State<AppState>,
    form: Result<Form<CreateClashForm>, FormRejection>,
) -> Result<Response, ServerError> {
    let Form(form) = form.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    let outcome = actions::create_clash(state.backend.as_ref(), form).await;
    if let Some(err) = outcome.error() {
        debug!(error = %err, "Create submission did not succeed");
    }

    let response = match outcome {
        CreateOutcome::Redirect { id, location } => {
            info!(id = %id, "Redirecting to new clash");
            Redirect::to(&location).into_response()
        }
        CreateOutcome::Invalid { errors, values } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(CreateFailureResponse {
                success: false,
                errors: Some(errors),
                message: None,
                values,
            }),
        )
            .into_response(),
        CreateOutcome::Failed { message, values } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(CreateFailureResponse {
                success: false,
                errors: None,
                message: Some(message),
                values,
            }),
        )
            .into_response(),
    };

    Ok(response)
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use clashes_data::FakeBackend;
    use clashes_shared::PeerRef;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn clash(id: &str, title: &str, description: &str) -> Clash {
        Clash {
            id: id.into(),
            title: Some(title.into()),
            description: Some(description.into()),
            location: "Marseille".into(),
            address: "Vieux-Port".into(),
            date: "2024-08-15T19:00:00Z".into(),
            picture_url: "https://example.com/c.png".into(),
            created_by_peer: Some(PeerRef {
                id: "p1".into(),
                name: "Alice".into(),
            }),
            participants: vec![],
        }
    }

    fn app_with(backend: FakeBackend) -> (Router, Arc<FakeBackend>) {
        let backend = Arc::new(backend);
        let state = AppState {
            backend: backend.clone(),
            config: Arc::new(ServerConfig::default()),
        };
        (build_router(state), backend)
    }

    fn app() -> (Router, Arc<FakeBackend>) {
        app_with(FakeBackend::with_clashes(vec![
            clash("1", "Beach volley", "Sun and sand"),
            clash("2", "Pétanque", "Bring your own boules"),
            clash("3", "Sunset drinks", "On the beach"),
        ]))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn form_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/clashes")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const VALID_FORM: &str = "title=Party&description=Dancing+until+sunrise&location=Paris\
        &address=10+rue+Oberkampf&date=2024-06-01T20%3A00\
        &pictureUrl=https%3A%2F%2Fexample.com%2Fp.png&createdByPeerId=p1";

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app();
        let (status, body) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_without_term_returns_everything() {
        let (app, _) = app();
        let (status, body) = get_json(app, "/clashes").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 3);
        assert_eq!(body["data"][0]["id"], "1");
        assert_eq!(body["data"][2]["id"], "3");
    }

    #[tokio::test]
    async fn test_list_filters_by_term() {
        let (app, _) = app();
        let (status, body) = get_json(app, "/clashes?term=BEACH").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        let ids: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_list_repeated_term_uses_first_value() {
        let (app, _) = app();
        let (status, body) = get_json(app, "/clashes?term=beach&term=zzz").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 2);
    }

    #[tokio::test]
    async fn test_list_odd_query_strings_never_reject() {
        for uri in ["/clashes?term", "/clashes?term=%FF", "/clashes?&&", "/clashes?other=1"] {
            let (app, _) = app();
            let (status, body) = get_json(app, uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body["success"], true, "{uri}");
        }
    }

    #[test]
    fn test_term_from_query() {
        assert_eq!(term_from_query(None), "");
        assert_eq!(term_from_query(Some("term=Park%20Run")), "Park Run");
        assert_eq!(term_from_query(Some("term=a+b&term=c")), "a b");
        assert_eq!(term_from_query(Some("q=x")), "");
    }

    #[tokio::test]
    async fn test_list_failure_envelope() {
        let (app, backend) = app();
        backend.set_fail_reads(true);

        let (status, body) = get_json(app, "/clashes?term=x").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "Failed to fetch clashes",
                "message": "Failed to fetch clashes",
            })
        );
    }

    #[tokio::test]
    async fn test_get_clash_and_not_found() {
        let (app, _) = app();
        let (status, body) = get_json(app.clone(), "/clashes/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["title"], "Pétanque");

        let (status, body) = get_json(app, "/clashes/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_create_redirects_to_detail_page() {
        let (app, backend) = app_with(FakeBackend {
            assign_id: Some("42".into()),
            ..FakeBackend::default()
        });

        let response = app.oneshot(form_request(VALID_FORM)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/clashes/42");

        let created = backend.created.lock().await;
        assert_eq!(created.len(), 1);
        assert!(created[0].participant_ids.is_empty());
    }

    #[tokio::test]
    async fn test_create_invalid_echoes_values() {
        let (app, backend) = app();
        let response = app
            .oneshot(form_request("title=&description=short&pictureUrl=not-a-url"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value =
            serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap())
                .unwrap();
        assert!(body["errors"]["title"].is_array());
        assert!(body["errors"]["description"].is_array());
        assert!(body["errors"]["pictureUrl"].is_array());
        assert_eq!(body["values"]["description"], "short");
        assert_eq!(backend.create_count(), 0);
    }

    #[tokio::test]
    async fn test_create_backend_failure() {
        let (app, backend) = app();
        backend.set_fail_creates(true);

        let response = app.oneshot(form_request(VALID_FORM)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value =
            serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap())
                .unwrap();
        assert_eq!(body["message"], "Failed to create clash. Please try again.");
        assert_eq!(body["values"]["title"], "Party");
        assert!(body.get("errors").is_none());
    }
}
