//! Invocation envelopes around [`QueryPaginator`].
//!
//! Two event shapes are accepted. An event carrying `httpMethod` came through an HTTP
//! gateway: its parameters live in `queryStringParameters` as strings, with `nextToken`
//! JSON-encoded, and the answer is wrapped in a status/headers/body envelope. Any other
//! event carries the request fields directly and gets the plain response back.

use super::{QueryPaginator, QueryRequest};
use crate::error::{FeedbackError, FeedbackResult, InputError};
use crate::store::{FeedbackStore, PageCursor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// The gateway-facing response wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,

    /// JSON-encoded response or `{"error": ...}` object.
    pub body: String,
}

impl HttpResponse {
    fn new(status_code: u16, body: &Value) -> Self {
        let headers = BTreeMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ]);

        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }

    fn from_error(err: &FeedbackError) -> Self {
        Self::new(err.status_code(), &json!({ "error": err.to_string() }))
    }

    /// Decode the body back into JSON.
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

/// Whether `event` arrived through the HTTP gateway, which sets `httpMethod` or `requestContext`.
#[must_use]
pub fn is_http_event(event: &Value) -> bool {
    event.get("httpMethod").is_some() || event.get("requestContext").is_some()
}

/// Build a request from a gateway event's `queryStringParameters`.
pub fn request_from_http_event(event: &Value) -> Result<QueryRequest, InputError> {
    let params = match event.get("queryStringParameters") {
        None | Some(Value::Null) => return Ok(QueryRequest::default()),
        Some(Value::Object(params)) => params,
        Some(_) => return Err(InputError::Malformed("queryStringParameters must be an object".into())),
    };

    let next_token = match query_param(params, "nextToken")? {
        Some(text) if !text.is_empty() => Some(PageCursor::from_json_str(&text)?),
        _ => None,
    };

    Ok(QueryRequest {
        start_date: query_param(params, "startDate")?,
        end_date: query_param(params, "endDate")?,
        urgency: query_param(params, "urgency")?,
        next_token,
    })
}

fn query_param(params: &Map<String, Value>, name: &str) -> Result<Option<String>, InputError> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(InputError::Malformed(format!("query parameter '{name}' must be a string, got {other}"))),
    }
}

/// Build a request from a direct event whose fields are the request itself.
pub fn request_from_direct_event(event: &Value) -> Result<QueryRequest, InputError> {
    if !event.is_object() {
        return Err(InputError::Malformed("event must be a JSON object".into()));
    }

    QueryRequest::deserialize(event).map_err(|e| InputError::Malformed(format!("invalid request: {e}")))
}

/// Serve a direct event.
pub async fn handle_direct<S: FeedbackStore>(paginator: &QueryPaginator<S>, event: &Value) -> FeedbackResult<Value> {
    let request = request_from_direct_event(event)?;
    let response = paginator.query(&request).await?;
    serde_json::to_value(&response).map_err(|e| FeedbackError::malformed(format!("unable to encode response: {e}")))
}

/// Serve a gateway event. Failures are folded into the envelope, never returned.
pub async fn handle_http<S: FeedbackStore>(paginator: &QueryPaginator<S>, event: &Value) -> HttpResponse {
    let outcome = async {
        let request = request_from_http_event(event)?;
        let response = paginator.query(&request).await?;
        Ok::<_, FeedbackError>(response)
    }
    .await;

    match outcome.map(|response| serde_json::to_value(&response)) {
        Ok(Ok(body)) => HttpResponse::new(200, &body),
        Ok(Err(e)) => {
            log::error!("Erro ao serializar resposta: {e}");
            HttpResponse::new(500, &json!({ "error": e.to_string() }))
        }
        Err(e) => {
            log::error!("Erro ao buscar feedbacks: {e}");
            HttpResponse::from_error(&e)
        }
    }
}

/// Serve either event shape, returning the JSON the caller should see.
pub async fn invoke<S: FeedbackStore>(paginator: &QueryPaginator<S>, event: &Value) -> FeedbackResult<Value> {
    if is_http_event(event) {
        let response = handle_http(paginator, event).await;
        return serde_json::to_value(&response).map_err(|e| FeedbackError::malformed(format!("unable to encode response: {e}")));
    }

    handle_direct(paginator, event).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryFeedbackStore, RawItem};

    fn item(id: &str, created_at: &str) -> RawItem {
        json!({
            "pk": {"S": "FEEDBACK"},
            "feedbackId": {"S": id},
            "createdAt": {"S": created_at},
            "urgency": {"S": "alta"},
            "nota": {"N": "5"}
        })
        .as_object()
        .unwrap()
        .clone()
    }

    fn store() -> MemoryFeedbackStore {
        MemoryFeedbackStore::with_items(
            "FeedbacksTable",
            [
                item("fb-1", "2026-01-05T10:00:00Z"),
                item("fb-2", "2026-01-06T10:00:00Z"),
                item("fb-3", "2026-01-07T10:00:00Z"),
            ],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_http_event_without_parameters() {
        let store = store();
        let paginator = QueryPaginator::new(&store, "FeedbacksTable", "FEEDBACK", 10);
        let event = json!({"httpMethod": "GET", "queryStringParameters": null});

        let response = handle_http(&paginator, &event).await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");

        let body = response.body_json().unwrap();
        assert_eq!(body["count"], 3);
        assert_eq!(body["startDate"], "2020-01-01T00:00:00Z");
        assert!(body.get("nextToken").is_none());
    }

    #[tokio::test]
    async fn test_request_context_event_is_http() {
        let store = store();
        let paginator = QueryPaginator::new(&store, "FeedbacksTable", "FEEDBACK", 10);
        let event = json!({
            "requestContext": {"requestId": "test-123", "stage": "prod"},
            "queryStringParameters": {"startDate": "2026-01-06T00:00:00Z"}
        });
        assert!(is_http_event(&event));

        let envelope = invoke(&paginator, &event).await.unwrap();
        assert_eq!(envelope["statusCode"], 200);
        assert_eq!(envelope["headers"]["Access-Control-Allow-Origin"], "*");

        let body: Value = serde_json::from_str(envelope["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["count"], 2);
        assert_eq!(body["startDate"], "2026-01-06T00:00:00Z");
    }

    #[tokio::test]
    async fn test_http_event_with_string_cursor() {
        let store = store();
        let paginator = QueryPaginator::new(&store, "FeedbacksTable", "FEEDBACK", 2);

        let first = handle_http(&paginator, &json!({"httpMethod": "GET"})).await.body_json().unwrap();
        let token = first["nextToken"].to_string();

        let event = json!({"httpMethod": "GET", "queryStringParameters": {"nextToken": token}});
        let second = handle_http(&paginator, &event).await.body_json().unwrap();
        assert_eq!(second["count"], 1);
        assert_eq!(second["items"][0]["feedbackId"], "fb-3");
    }

    #[tokio::test]
    async fn test_http_event_with_bad_cursor_is_400() {
        let store = store();
        let paginator = QueryPaginator::new(&store, "FeedbacksTable", "FEEDBACK", 2);
        let event = json!({"httpMethod": "GET", "queryStringParameters": {"nextToken": "not-json"}});

        let response = handle_http(&paginator, &event).await;
        assert_eq!(response.status_code, 400);
        let body = response.body_json().unwrap();
        assert!(body["error"].as_str().unwrap().contains("invalid nextToken"));
    }

    #[tokio::test]
    async fn test_http_store_failure_is_500_with_error_body() {
        let store = store();
        let paginator = QueryPaginator::new(&store, "OtherTable", "FEEDBACK", 2);

        let response = handle_http(&paginator, &json!({"httpMethod": "GET"})).await;
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body_json().unwrap(), json!({"error": "table 'OtherTable' not found"}));
    }

    #[tokio::test]
    async fn test_direct_event_returns_plain_response() {
        let store = store();
        let paginator = QueryPaginator::new(&store, "FeedbacksTable", "FEEDBACK", 10);
        let event = json!({"startDate": "2026-01-06T00:00:00Z", "urgency": "alta"});

        let body = invoke(&paginator, &event).await.unwrap();
        assert_eq!(body["count"], 2);
        assert_eq!(body["urgency"], "alta");
        assert!(body.get("statusCode").is_none());
    }

    #[tokio::test]
    async fn test_direct_event_with_malformed_cursor_is_input_error() {
        let store = store();
        let paginator = QueryPaginator::new(&store, "FeedbacksTable", "FEEDBACK", 10);
        let event = json!({"nextToken": {"offset": 2}});

        let err = invoke(&paginator, &event).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_invoke_wraps_http_events() {
        let store = store();
        let paginator = QueryPaginator::new(&store, "FeedbacksTable", "FEEDBACK", 10);

        let envelope = invoke(&paginator, &json!({"httpMethod": "GET"})).await.unwrap();
        assert_eq!(envelope["statusCode"], 200);
        assert!(envelope["body"].is_string());
    }

    #[test]
    fn test_non_string_query_parameter_is_rejected() {
        let event = json!({"httpMethod": "GET", "queryStringParameters": {"urgency": 3}});
        assert!(request_from_http_event(&event).is_err());
    }
}
