//! Assigns every request a trace id.
//!
//! The id is stored in request extensions as [`TraceId`], installed as the
//! task-local [`trace_ctx`](crate::trace_ctx) for the rest of the pipeline,
//! and echoed back in the `x-trace-id` response header. Wrap this outermost
//! so `StructuredLogger` and `TraceSpan` can read it.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::HttpMessage;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use uuid::Uuid;

use crate::trace_ctx;

pub const TRACE_HEADER: &str = "x-trace-id";

/// Trace id of the current request, as stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(pub String);

pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = Uuid::new_v4().to_string();
        req.extensions_mut().insert(TraceId(trace_id.clone()));

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = trace_ctx::with_trace_id(trace_id.clone(), fut).await?;

            if let Ok(value) = HeaderValue::from_str(&trace_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(TRACE_HEADER), value);
            }
            Ok(res)
        })
    }
}
