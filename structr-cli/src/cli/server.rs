// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! HTTP binding for the configuration console
//!
//! Maps `GET`/`POST /structr/config` onto [`ConfigConsole`]. The session id
//! travels in the `STRUCTR_SESSION` cookie; a request without one gets a
//! fresh id issued with the response.

use axum::{
    extract::{Form, Query, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, StatusCode,
    },
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use structr::config::settings::{HOST, HTTP_PORT};
use structr::console::{ConsoleRequest, ConsoleResponse, CONFIG_URL};
use structr::StructrInstance;
use tower_http::trace::TraceLayer;

pub const SESSION_COOKIE: &str = "STRUCTR_SESSION";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8082;

#[derive(Clone)]
pub struct AppState {
    pub instance: Arc<StructrInstance>,
}

pub fn create_router(instance: Arc<StructrInstance>) -> Router {
    Router::new()
        .route(CONFIG_URL, get(get_config).post(post_config))
        .with_state(AppState { instance })
        .layer(TraceLayer::new_for_http())
}

/// Listen address from the instance settings, with an optional port override
pub fn listen_address(
    instance: &StructrInstance,
    port: Option<u16>,
) -> Result<SocketAddr, Box<dyn std::error::Error>> {
    let settings = instance.settings();
    let host = settings
        .get_string(HOST)
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = match port {
        Some(port) => port,
        None => settings
            .get_integer(HTTP_PORT)
            .and_then(|p| u16::try_from(p).ok())
            .unwrap_or(DEFAULT_PORT),
    };

    Ok(format!("{}:{}", host, port).parse()?)
}

/// Serve until Ctrl-C
pub async fn serve(
    instance: Arc<StructrInstance>,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(instance);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Configuration console listening on http://{}{}", addr, CONFIG_URL);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}

async fn get_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    dispatch(state, &headers, params, false).await
}

async fn post_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(params): Form<Vec<(String, String)>>,
) -> Response {
    dispatch(state, &headers, params, true).await
}

async fn dispatch(
    state: AppState,
    headers: &HeaderMap,
    params: Vec<(String, String)>,
    post: bool,
) -> Response {
    let (session_id, issued) = match session_from_headers(headers) {
        Some(id) => (id, false),
        None => (uuid::Uuid::new_v4().simple().to_string(), true),
    };

    let request = ConsoleRequest {
        session_id: Some(session_id.clone()),
        params,
    };

    // starting a service may open the database
    let instance = state.instance.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let console = instance.console();
        if post {
            console.handle_post(&request)
        } else {
            console.handle_get(&request)
        }
    })
    .await;

    let response = match outcome {
        Ok(ConsoleResponse::Redirect(location)) => Redirect::to(&location).into_response(),
        Ok(ConsoleResponse::Html(html)) => Html(html).into_response(),
        Err(e) => {
            error!("Console request failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if issued {
        let cookie = format!(
            "{}={}; Path=/structr; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, session_id
        );
        ([(SET_COOKIE, cookie)], response).into_response()
    } else {
        response
    }
}

fn session_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, header::LOCATION, Request};
    use structr::config::CONFIG_FILE_NAME;
    use structr::services::NODE_SERVICE;
    use tower::ServiceExt;

    const PASSWORD: &str = "secret";

    fn configured_instance(dir: &tempfile::TempDir) -> Arc<StructrInstance> {
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            format!(
                "\"database.driver\" = \"memory\"\n\"superuser.password\" = \"{}\"\n",
                PASSWORD
            ),
        )
        .unwrap();
        Arc::new(StructrInstance::open(dir.path(), None).unwrap())
    }

    fn with_session(builder: axum::http::request::Builder, session: &str) -> axum::http::request::Builder {
        builder.header(COOKIE, format!("other=1; {}={}", SESSION_COOKIE, session))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8_lossy(&bytes).to_string()
    }

    async fn login(app: &Router, session: &str) -> Response {
        app.clone()
            .oneshot(
                with_session(Request::builder().method("POST").uri(CONFIG_URL), session)
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(format!(
                        "action=login&username=superadmin&password={}",
                        PASSWORD
                    )))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[test]
    fn test_session_cookie_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_from_headers(&headers), None);

        headers.insert(COOKIE, "a=b; STRUCTR_SESSION=abc123".parse().unwrap());
        assert_eq!(session_from_headers(&headers), Some("abc123".to_string()));

        headers.insert(COOKIE, "STRUCTR_SESSION=".parse().unwrap());
        assert_eq!(session_from_headers(&headers), None);
    }

    #[tokio::test]
    async fn test_first_contact_issues_session() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(configured_instance(&dir));

        let response = app
            .oneshot(Request::builder().uri(CONFIG_URL).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("STRUCTR_SESSION="));
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
        assert!(body_text(response).await.contains("loginButton"));
    }

    #[tokio::test]
    async fn test_login_then_start_service() {
        let dir = tempfile::tempdir().unwrap();
        let instance = configured_instance(&dir);
        let app = create_router(instance.clone());

        let response = login(&app, "s1").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), CONFIG_URL);
        assert!(response.headers().get(SET_COOKIE).is_none());

        let response = app
            .clone()
            .oneshot(
                with_session(
                    Request::builder().uri(format!("{}?start={}", CONFIG_URL, NODE_SERVICE)),
                    "s1",
                )
                .body(Body::empty())
                .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "/structr/config#services"
        );
        assert!(instance.services().is_ready(NODE_SERVICE));

        let response = app
            .oneshot(
                with_session(Request::builder().uri(CONFIG_URL), "s1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(body_text(response).await.contains("configTabs"));
    }

    #[tokio::test]
    async fn test_anonymous_start_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let instance = configured_instance(&dir);
        let app = create_router(instance.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("{}?start={}", CONFIG_URL, NODE_SERVICE))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(!instance.services().is_ready(NODE_SERVICE));
    }

    #[test]
    fn test_listen_address_uses_settings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "\"application.host\" = \"127.0.0.1\"\n\"application.http.port\" = 9099\n",
        )
        .unwrap();
        let instance = StructrInstance::open(dir.path(), None).unwrap();

        assert_eq!(
            listen_address(&instance, None).unwrap(),
            "127.0.0.1:9099".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(listen_address(&instance, Some(1234)).unwrap().port(), 1234);
    }
}
