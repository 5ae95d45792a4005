//! Request entry point
//!
//! Method validation, health probes, body limits, then form dispatch.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::HeaderValue;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::dispatch::dispatch;
use crate::config::AppState;
use crate::http::{self, FormFields};
use crate::logger::{self, AccessLogEntry};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let started = Instant::now();
    let mut entry = access_entry(&req, peer_addr);

    let mut response = route_request(req, &state).await;

    if let Ok(name) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert("Server", name);
    }
    if state.config.http.enable_cors {
        response
            .headers_mut()
            .insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    }

    if state.config.logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let health = &state.config.http.health;
    let path = req.uri().path();

    if health.enabled && (path == health.liveness_path || path == health.readiness_path) {
        return match *req.method() {
            Method::GET | Method::HEAD => {
                http::build_health_response("ok", req.method() == Method::HEAD)
            }
            _ => {
                logger::log_warning(&format!("Method not allowed: {} {path}", req.method()));
                http::build_405_response(http::HEALTH_ALLOW)
            }
        };
    }

    match *req.method() {
        Method::POST => {}
        Method::OPTIONS => return http::build_options_response(state.config.http.enable_cors),
        _ => {
            logger::log_warning(&format!("Method not allowed: {} {path}", req.method()));
            return http::build_405_response(http::FORM_ALLOW);
        }
    }

    let max_body_size = state.config.http.max_body_size;
    if let Some(resp) = check_content_length(&req, max_body_size) {
        return resp;
    }

    let body = match read_body(req.into_body(), max_body_size).await {
        Ok(body) => body,
        Err(resp) => return resp,
    };

    let form = FormFields::parse(&body);
    let outcome = dispatch(&form, state).await;
    match outcome.to_json() {
        Ok(json) => http::build_json_response(json),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            http::build_500_response()
        }
    }
}

/// Reject a declared Content-Length above the limit before reading the body
fn check_content_length<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    match content_length.to_str().ok()?.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        _ => None,
    }
}

/// Collect the body, enforcing the size limit on what is actually received
async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, Response<Full<Bytes>>>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            logger::log_error(&format!("Request body exceeded {max_body_size} bytes"));
            Err(http::build_413_response())
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            Err(http::build_400_response())
        }
    }
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry
}
