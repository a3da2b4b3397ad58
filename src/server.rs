//! Sentiment preview HTTP service
//!
//! Lets a client show the label an entry would get before submitting it.
//! Uses hyper for the HTTP server.
//!
//! - `POST /api/analyze-sentiment` `{"text": "..."}` → `{"sentiment": "Positive"}`
//! - `GET /health` → `ok`

use crate::domain::Lexicon;
use anyhow::Context;
use bytes::Bytes;
use http_body_util::{BodyExt, Full, Limited};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 64 * 1024;

const ANALYZE_PATH: &str = "/api/analyze-sentiment";

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    text: String,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    sentiment: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(value).unwrap_or_default();
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body)))
        .expect("static response should not fail")
}

fn error_response(status: StatusCode, error: &'static str) -> Response<Full<Bytes>> {
    json_response(status, &ErrorResponse { error })
}

/// Answer one request whose body has already been read
pub fn route(
    method: &Method,
    path: &str,
    body: &[u8],
    lexicon: &Lexicon,
) -> Response<Full<Bytes>> {
    match (method, path) {
        (&Method::POST, ANALYZE_PATH) => match serde_json::from_slice::<AnalyzeRequest>(body) {
            Ok(request) => {
                let sentiment = lexicon.classify(&request.text);
                debug!(
                    chars = request.text.chars().count(),
                    sentiment = %sentiment,
                    "sentiment_preview"
                );
                json_response(
                    StatusCode::OK,
                    &AnalyzeResponse {
                        sentiment: sentiment.as_str(),
                    },
                )
            }
            Err(e) => {
                debug!(error = %e, "sentiment_preview_rejected");
                error_response(StatusCode::BAD_REQUEST, "No text provided")
            }
        },
        (&Method::OPTIONS, ANALYZE_PATH) => Response::builder()
            .status(StatusCode::OK)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Full::new(Bytes::new()))
            .expect("static response should not fail"),
        (&Method::GET, "/health") => Response::builder()
            .status(StatusCode::OK)
            .body(Full::new(Bytes::from("ok")))
            .expect("static response should not fail"),
        (_, ANALYZE_PATH) => error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
        _ => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::new(Bytes::from("Not Found")))
            .expect("static response should not fail"),
    }
}

async fn handle_request(
    req: Request<hyper::body::Incoming>,
    lexicon: Arc<Lexicon>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();

    let body = match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!(path = %parts.uri.path(), error = %e, "request_body_rejected");
            return Ok(error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large",
            ));
        }
    };

    Ok(route(&parts.method, parts.uri.path(), &body, &lexicon))
}

/// Serve connections from `listener` until `shutdown` turns true
pub async fn serve(
    listener: TcpListener,
    lexicon: Lexicon,
    mut shutdown: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    let lexicon = Arc::new(lexicon);
    let addr = listener.local_addr()?;
    info!(addr = %addr, "preview_server_started");

    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, _peer)) => {
                        let io = TokioIo::new(stream);
                        let lexicon = lexicon.clone();

                        tokio::spawn(async move {
                            let service = service_fn(move |req| {
                                let lexicon = lexicon.clone();
                                async move { handle_request(req, lexicon).await }
                            });

                            if let Err(e) = http1::Builder::new()
                                .serve_connection(io, service)
                                .await
                            {
                                error!(error = %e, "preview_http_error");
                            }
                        });
                    }
                    Err(e) => {
                        error!(error = %e, "preview_accept_error");
                    }
                }
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    info!("preview_server_shutdown");
                    return Ok(());
                }
            }
        }
    }
}

/// Bind `addr` and serve until Ctrl-C
pub async fn run(addr: &str, lexicon: Lexicon) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    serve(listener, lexicon, shutdown_rx).await
}
