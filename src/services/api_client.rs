// ============================================================================
// API CLIENT - headers, status handling, error notification
// ============================================================================
// Every failure is returned to the caller AND toasted when a notifier is
// attached: pages may add their own contextual UI on top.
// ============================================================================

use std::rc::Rc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::error::RequestError;
use crate::stores::{Notifier, SessionStore, Toast};
use super::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody};

const UNKNOWN_ERROR: &str = "An unknown error occurred";

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    api_key: Option<String>,
    session: Rc<dyn SessionStore>,
    transport: Rc<dyn HttpTransport>,
    notifier: Option<Rc<dyn Notifier>>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        session: Rc<dyn SessionStore>,
        transport: Rc<dyn HttpTransport>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            session,
            transport,
            notifier: None,
        }
    }

    /// Key sent as `X-API-Key` on every non-GET request
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_notifier(mut self, notifier: Rc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn session(&self) -> &Rc<dyn SessionStore> {
        &self.session
    }

    pub fn build_request(&self, method: HttpMethod, endpoint: &str, body: RequestBody) -> HttpRequest {
        let mut headers = Vec::new();

        // multipart bodies need the browser-generated boundary
        if !matches!(body, RequestBody::Multipart(_)) {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = self.session.get().filter(|t| !t.is_empty()) {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        if method != HttpMethod::Get {
            if let Some(key) = &self.api_key {
                headers.push(("X-API-Key".to_string(), key.clone()));
            }
        }

        HttpRequest {
            method,
            url: format!("{}{}", self.base_url, endpoint),
            query: Vec::new(),
            headers,
            body,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, RequestError> {
        self.send(HttpMethod::Get, endpoint, RequestBody::Empty).await
    }

    /// GET with query parameters; callers decide which to include
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, RequestError> {
        let mut request = self.build_request(HttpMethod::Get, endpoint, RequestBody::Empty);
        request.query = params.iter().map(|(key, value)| (key.to_string(), value.clone())).collect();
        match self.dispatch(request, false).await? {
            Some(value) => Ok(value),
            None => Err(RequestError::EmptyBody),
        }
    }

    pub async fn send_json<B, T>(&self, method: HttpMethod, endpoint: &str, payload: &B) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = json_body(payload)?;
        self.send(method, endpoint, body).await
    }

    /// Like `send`, but an HTTP 204 resolves to `Ok(None)`
    pub async fn send_optional<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: RequestBody,
    ) -> Result<Option<T>, RequestError> {
        self.dispatch(self.build_request(method, endpoint, body), true).await
    }

    pub async fn send<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: RequestBody,
    ) -> Result<T, RequestError> {
        match self.dispatch(self.build_request(method, endpoint, body), false).await? {
            Some(value) => Ok(value),
            None => Err(RequestError::EmptyBody),
        }
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        allow_empty: bool,
    ) -> Result<Option<T>, RequestError> {
        let method = request.method;
        let endpoint = request.url.clone();
        let outcome = match self.execute(request).await {
            Ok(None) if !allow_empty => Err(RequestError::EmptyBody),
            other => other,
        };

        if let Err(err) = &outcome {
            log::error!("❌ {} {} failed: {}", method.as_str(), endpoint, err);
            if let Some(notifier) = &self.notifier {
                notifier.notify(Toast::error("API Error").with_description(err.to_string()));
            }
        }
        outcome
    }

    async fn execute<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<Option<T>, RequestError> {
        let endpoint = request.url.clone();
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            let message = error_message(&response);
            if response.status == 401 {
                log::warn!("🔐 401 from {}, clearing local session", endpoint);
                self.session.clear();
                return Err(RequestError::Unauthorized(message));
            }
            return Err(RequestError::Status { status: response.status, message });
        }

        if response.status == 204 {
            return Ok(None);
        }

        serde_json::from_str::<T>(&response.body)
            .map(Some)
            .map_err(|e| RequestError::Decode(e.to_string()))
    }
}

pub fn json_body<B: Serialize + ?Sized>(payload: &B) -> Result<RequestBody, RequestError> {
    serde_json::to_string(payload)
        .map(RequestBody::Json)
        .map_err(|e| RequestError::Decode(format!("Serialization error: {}", e)))
}

/// `message`, then `detail`, then the bare status; unreadable bodies get a generic text
pub fn error_message(response: &HttpResponse) -> String {
    match serde_json::from_str::<serde_json::Value>(&response.body) {
        Ok(body) => body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .or_else(|| body.get("detail").and_then(serde_json::Value::as_str))
            .filter(|message| !message.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP error! status: {}", response.status)),
        Err(_) => UNKNOWN_ERROR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::MemorySessionStore;
    use crate::testing::{block_on, RecordingNotifier, ScriptedTransport};
    use serde_json::json;

    fn client(token: Option<&str>, transport: Rc<ScriptedTransport>) -> (ApiClient, Rc<MemorySessionStore>, Rc<RecordingNotifier>) {
        let session = Rc::new(token.map(MemorySessionStore::with_token).unwrap_or_default());
        let notifier = Rc::new(RecordingNotifier::default());
        let api = ApiClient::new("http://api.test/", session.clone(), transport)
            .with_api_key(Some("secret".into()))
            .with_notifier(notifier.clone());
        (api, session, notifier)
    }

    #[test]
    fn get_carries_bearer_but_no_api_key() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, json!({"ok": true}));
        let (api, _, _) = client(Some("tok"), transport.clone());

        let _: serde_json::Value = block_on(api.get("/api/dashboard")).unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "http://api.test/api/dashboard");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("Authorization"), Some("Bearer tok"));
        assert_eq!(request.header("X-API-Key"), None);
    }

    #[test]
    fn writes_carry_api_key_and_skip_bearer_without_session() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(201, json!({"id": 1}));
        let (api, _, _) = client(None, transport.clone());

        let _: serde_json::Value =
            block_on(api.send_json(HttpMethod::Post, "/api/departments", &json!({"name": "Parks"}))).unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.header("X-API-Key"), Some("secret"));
        assert_eq!(request.header("Authorization"), None);
        assert_eq!(request.body, RequestBody::Json(r#"{"name":"Parks"}"#.into()));
    }

    #[test]
    fn failure_is_returned_and_toasted() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(400, json!({"detail": "Department with this name already exists."}));
        let (api, _, notifier) = client(Some("tok"), transport);

        let err = block_on(api.send_json::<_, serde_json::Value>(
            HttpMethod::Post,
            "/api/departments",
            &json!({}),
        ))
        .unwrap_err();

        assert_eq!(
            err,
            RequestError::Status { status: 400, message: "Department with this name already exists.".into() }
        );
        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "API Error");
        assert_eq!(toasts[0].description.as_deref(), Some("Department with this name already exists."));
    }

    #[test]
    fn error_message_fallbacks() {
        let with_message = HttpResponse { status: 500, body: r#"{"message":"boom","detail":"x"}"#.into() };
        assert_eq!(error_message(&with_message), "boom");

        let no_message = HttpResponse { status: 422, body: r#"{"detail":[{"loc":["body"]}]}"#.into() };
        assert_eq!(error_message(&no_message), "HTTP error! status: 422");

        let html = HttpResponse { status: 502, body: "<html>Bad gateway</html>".into() };
        assert_eq!(error_message(&html), "An unknown error occurred");
    }

    #[test]
    fn no_content_is_a_null_success() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond_raw(204, "");
        let (api, _, notifier) = client(Some("tok"), transport);

        let result: Option<serde_json::Value> =
            block_on(api.send_optional(HttpMethod::Delete, "/api/departments/4", RequestBody::Empty)).unwrap();
        assert_eq!(result, None);
        assert!(notifier.toasts().is_empty());
    }

    #[test]
    fn unauthorized_clears_session() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(401, json!({"detail": "Invalid authentication token"}));
        let (api, session, _) = client(Some("stale"), transport);

        let err = block_on(api.get::<serde_json::Value>("/api/reports")).unwrap_err();
        assert_eq!(err, RequestError::Unauthorized("Invalid authentication token".into()));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn network_failure_is_toasted_too() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.fail(RequestError::Network("Failed to fetch".into()));
        let (api, _, notifier) = client(Some("tok"), transport);

        let err = block_on(api.get::<serde_json::Value>("/api/analytics")).unwrap_err();
        assert_eq!(err, RequestError::Network("Failed to fetch".into()));
        assert_eq!(notifier.toasts().len(), 1);
    }
}
