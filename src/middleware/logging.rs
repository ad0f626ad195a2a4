use reqwest::header::HeaderValue;
use reqwest::{RequestBuilder, Response};
use std::time::Instant;
use uuid::Uuid;

use crate::services::ServiceKind;

/// Sends an outgoing service request, tagging it with an `x-request-id`
/// header and logging its start and completion.
pub async fn send_logged(
    service: ServiceKind,
    request: RequestBuilder,
) -> Result<Response, reqwest::Error> {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let (client, request) = request.build_split();
    let mut request = request?;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        request.headers_mut().insert("x-request-id", value);
    }

    let method = request.method().clone();
    let url = request.url().clone();

    tracing::info!(
        request_id = %request_id,
        service = %service,
        method = %method,
        url = %url,
        "Service request started"
    );

    match client.execute(request).await {
        Ok(response) => {
            tracing::info!(
                request_id = %request_id,
                service = %service,
                status = %response.status(),
                duration_ms = %start.elapsed().as_millis(),
                "Service request completed"
            );
            Ok(response)
        }
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                service = %service,
                error = %e,
                duration_ms = %start.elapsed().as_millis(),
                "Service request failed"
            );
            Err(e)
        }
    }
}
