//! Request logging middleware.
//!
//! Wraps every request in an `http_request` span and, once the inner service
//! has produced a response, logs method, path, status and elapsed time and
//! records the HTTP metrics. Logs carry the raw path; metrics are labelled
//! with the matched route pattern.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::task::{Context, Poll};

use actix_web::{
    Error, HttpRequest,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};
use tracing::{Instrument, Span, info, info_span, warn};

use crate::metrics::{self, Timer};

const UNMATCHED_PATH: &str = "unmatched";

/// Metrics label for the request path: the matched route pattern, so paths
/// outside the route table share one label.
pub fn metrics_path(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| UNMATCHED_PATH.to_string())
}

/// Request logging middleware factory
pub struct RequestLogger;

impl RequestLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RequestLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestLoggerService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerService { service }))
    }
}

/// Request logging middleware service
pub struct RequestLoggerService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let path = req.path().to_string();
        let peer_ip = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        let span = info_span!(
            "http_request",
            http.method = %method,
            http.target = %path,
            net.peer.ip = %peer_ip,
            http.status_code = tracing::field::Empty,
        );

        let timer = Timer::new();
        let fut = self.service.call(req);

        Box::pin(
            async move {
                let result = fut.await;
                let elapsed = timer.elapsed();

                match &result {
                    Ok(res) => {
                        let status = res.status().as_u16();
                        Span::current().record("http.status_code", status);
                        info!(
                            method = %method,
                            path = %path,
                            status,
                            elapsed = ?elapsed,
                            "Request completed"
                        );
                        metrics::record_http_request(
                            &method,
                            &metrics_path(res.request()),
                            status,
                            elapsed.as_secs_f64(),
                        );
                    }
                    Err(e) => {
                        warn!(
                            method = %method,
                            path = %path,
                            elapsed = ?elapsed,
                            error = %e,
                            "Request failed"
                        );
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}
