// ============================================================================
// TRANSPORT - raw HTTP exchange, no session or error policy
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::Request;
use web_sys::FormData;
use crate::error::RequestError;
use crate::models::SelectedFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: SelectedFile },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(String),
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Appended to `url` by the transport, which does the encoding
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError>;
}

/// Browser `fetch` through gloo-net
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Put => Request::put(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        };
        if !request.query.is_empty() {
            builder = builder.query(request.query.iter().map(|(key, value)| (key.as_str(), value.as_str())));
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(json) => builder.body(json),
            RequestBody::Multipart(parts) => builder.body(form_data(&parts)?),
        }
        .map_err(|e| RequestError::Network(format!("Request build error: {}", e)))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        let status = response.status();
        let body = read_body(response.text().await)?;
        Ok(HttpResponse { status, body })
    }
}

/// A body that cannot be read is a failed exchange, not an empty one
fn read_body(text: Result<String, gloo_net::Error>) -> Result<String, RequestError> {
    text.map_err(|e| RequestError::Network(format!("Could not read response body: {}", e)))
}

fn form_data(parts: &[FormPart]) -> Result<FormData, RequestError> {
    let js_error = |e: wasm_bindgen::JsValue| RequestError::Network(format!("FormData error: {:?}", e));
    let form = FormData::new().map_err(js_error)?;

    for part in parts {
        match part {
            FormPart::Text { name, value } => form.append_with_str(name, value).map_err(js_error)?,
            FormPart::File { name, file } => {
                if let Some(handle) = &file.handle {
                    form.append_with_blob_and_filename(name, handle, &file.name)
                        .map_err(js_error)?;
                }
            }
        }
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_body_is_a_network_error() {
        let err = read_body(Err(gloo_net::Error::GlooError("stream aborted".into()))).unwrap_err();
        assert!(matches!(err, RequestError::Network(message) if message.contains("stream aborted")));
        assert_eq!(read_body(Ok(String::new())), Ok(String::new()));
    }

    #[test]
    fn query_params_are_kept_apart_from_the_url() {
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "http://api.test/api/reports/all".into(),
            query: vec![("category".into(), "Public Service".into())],
            headers: Vec::new(),
            body: RequestBody::Empty,
        };
        assert_eq!(request.param("category"), Some("Public Service"));
        assert_eq!(request.param("skip"), None);
    }
}
