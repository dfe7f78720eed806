use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Request bodies in this API are a handful of fields.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

/// JSON body extractor whose failures render as `400 BAD_REQUEST` problem details.
///
/// serde's own message is logged redacted and never returned to the client.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

fn bad_body(detail: &'static str) -> AppError {
    AppError::bad_request(ErrorCode::BadRequest, detail)
}

/// A missing content type is tolerated; anything present must be JSON.
fn is_json_content_type(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return true;
    };
    let mime = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    mime.is_empty() || mime == "application/json" || mime.ends_with("+json")
}

async fn read_body(mut payload: Payload, limit: usize) -> Result<BytesMut, AppError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            warn!(trace_id = %trace_ctx::trace_id(), error = %e, "request body stream failed");
            bad_body("Failed to read request body")
        })?;
        if body.len() + chunk.len() > limit {
            debug!(trace_id = %trace_ctx::trace_id(), limit, "request body too large");
            return Err(bad_body("Request body too large"));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn parse_error_detail(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", error.line()),
        Category::Eof => "Invalid JSON: unexpected end of input".into(),
        Category::Data => "Invalid JSON: wrong types for one or more fields".into(),
        Category::Io => "Invalid JSON: I/O error while reading body".into(),
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, AppError>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|ct| ct.to_str().unwrap_or("invalid").to_string());
        let payload = payload.take();

        Box::pin(async move {
            if !is_json_content_type(content_type.as_deref()) {
                debug!(content_type = ?content_type, "rejecting non-JSON body");
                return Err(bad_body("Content-Type must be application/json"));
            }

            let body = read_body(payload, MAX_BODY_BYTES).await?;
            serde_json::from_slice::<T>(&body)
                .map(ValidatedJson)
                .map_err(|e| {
                    debug!(
                        trace_id = %trace_ctx::trace_id(),
                        error = %Redacted(&e.to_string()),
                        body_size = body.len(),
                        "JSON body rejected"
                    );
                    AppError::bad_request(ErrorCode::BadRequest, parse_error_detail(&e))
                })
        })
    }
}
