// ============================================================================
// CITIZEN API - account, own reports, submissions, public map
// ============================================================================
// Failures are not toasted here: citizen pages show their own messages.
// ============================================================================

use std::rc::Rc;
use thiserror::Error;
use crate::config::CONFIG;
use crate::error::RequestError;
use crate::models::{Credentials, RegisterRequest, Report, ReportDraft, ReportRecord, TokenResponse};
use crate::router::CitizenRoute;
use crate::stores::SessionStore;
use crate::utils::validation::{validate_report, ValidationErrors};
use super::api_client::ApiClient;
use super::query_cache::QueryClient;
use super::transport::{FetchTransport, FormPart, HttpMethod, HttpTransport, RequestBody};

pub const MY_REPORTS: &str = "my-reports";
pub const PUBLIC_REPORTS: &str = "public-reports";

const SESSION_EXPIRED: &str = "Authentication failed. Please log in again.";
const LOGIN_REQUIRED: &str = "You must be logged in to submit a report.";

/// Why a submission did not go through
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Request(#[from] RequestError),
}

#[derive(Clone)]
pub struct CitizenApi {
    client: ApiClient,
}

impl CitizenApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn from_config(session: Rc<dyn SessionStore>) -> Self {
        let transport: Rc<dyn HttpTransport> = Rc::new(FetchTransport);
        Self::new(ApiClient::new(CONFIG.citizen_api_url.clone(), session, transport))
    }

    pub fn session(&self) -> &Rc<dyn SessionStore> {
        self.client.session()
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<serde_json::Value, RequestError> {
        let created = self
            .client
            .send_json(HttpMethod::Post, "/api/auth/register", request)
            .await?;
        log::info!("✅ Account created for {}", request.email);
        Ok(created)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, RequestError> {
        let token: TokenResponse = self
            .client
            .send_json(HttpMethod::Post, "/api/auth/login", credentials)
            .await?;
        if !token.access_token.is_empty() {
            self.session().set(&token.access_token);
        }
        log::info!("🔐 Citizen login successful");
        Ok(token)
    }

    /// There is no server logout for citizens: the token is simply dropped
    pub fn sign_out(&self, queries: &QueryClient) -> CitizenRoute {
        self.session().clear();
        queries.clear();
        log::info!("👋 Citizen signed out");
        CitizenRoute::Login
    }

    /// Reports of the signed-in citizen; empty without a session
    pub async fn fetch_my_reports(&self) -> Result<Vec<Report>, RequestError> {
        if !self.session().is_authenticated() {
            log::debug!("📋 No session, skipping report history");
            return Ok(Vec::new());
        }

        let records: Vec<ReportRecord> = self.client.get("/api/reports").await.map_err(|err| match err {
            RequestError::Unauthorized(_) => RequestError::Unauthorized(SESSION_EXPIRED.to_string()),
            other => other,
        })?;
        Ok(records.into_iter().map(Report::from).collect())
    }

    /// Validates first: an invalid draft never reaches the network
    pub async fn submit_report(&self, draft: &ReportDraft) -> Result<serde_json::Value, SubmitError> {
        let submission = validate_report(draft).map_err(SubmitError::Invalid)?;
        if !self.session().is_authenticated() {
            return Err(RequestError::SignedOut(LOGIN_REQUIRED.to_string()).into());
        }

        let report_json = serde_json::to_string(&submission)
            .map_err(|e| RequestError::Decode(format!("Serialization error: {}", e)))?;
        let mut parts = vec![FormPart::Text { name: "report_data_json".to_string(), value: report_json }];
        if let Some(image) = &draft.image {
            parts.push(FormPart::File { name: "images".to_string(), file: image.clone() });
        }

        let created = self
            .client
            .send(HttpMethod::Post, "/api/reports", RequestBody::Multipart(parts))
            .await?;
        log::info!("✅ Report submitted");
        Ok(created)
    }

    /// Every report, for the public map
    pub async fn fetch_all_reports(&self) -> Result<Vec<Report>, RequestError> {
        let records: Vec<ReportRecord> = self.client.get("/api/reports/all").await?;
        Ok(records.into_iter().map(Report::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReportStatus, SelectedFile};
    use crate::stores::MemorySessionStore;
    use crate::testing::{block_on, ScriptedTransport};
    use serde_json::json;

    fn api(token: Option<&str>, transport: Rc<ScriptedTransport>) -> (CitizenApi, Rc<MemorySessionStore>) {
        let session = Rc::new(token.map(MemorySessionStore::with_token).unwrap_or_default());
        (CitizenApi::new(ApiClient::new("http://api.test", session.clone(), transport)), session)
    }

    #[test]
    fn history_without_session_makes_no_request() {
        let transport = Rc::new(ScriptedTransport::new());
        let (api, _) = api(None, transport.clone());

        assert_eq!(block_on(api.fetch_my_reports()).unwrap(), vec![]);
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn history_is_decoded_tolerantly() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, json!([
            {"id": "a1", "status": "Resolved", "submittedDate": "2024-01-01T10:00:00Z",
             "location": {"latitude": 1.0, "longitude": 2.0}},
            {"id": 2, "description": "", "status": "Archived"}
        ]));
        let (api, _) = api(Some("tok"), transport);

        let reports = block_on(api.fetch_my_reports()).unwrap();
        assert_eq!(reports[0].status, ReportStatus::Resolved);
        assert_eq!(reports[0].submitted_date, "2024-01-01T10:00:00Z");
        assert_eq!(reports[1].description, "No description");
        assert_eq!(reports[1].status, ReportStatus::Pending);
    }

    #[test]
    fn expired_token_is_dropped() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(401, json!({"detail": "Could not validate credentials"}));
        let (api, session) = api(Some("stale"), transport);

        let err = block_on(api.fetch_my_reports()).unwrap_err();
        assert_eq!(err, RequestError::Unauthorized(SESSION_EXPIRED.into()));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn draft_without_location_never_hits_the_network() {
        let transport = Rc::new(ScriptedTransport::new());
        let (api, _) = api(Some("tok"), transport.clone());
        let draft = ReportDraft { description: "Water leaking from main".into(), ..Default::default() };

        match block_on(api.submit_report(&draft)) {
            Err(SubmitError::Invalid(errors)) => {
                assert!(errors.to_string().contains("latitude"));
                assert!(errors.to_string().contains("longitude"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn submission_is_multipart() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(201, json!({"id": 99}));
        let (api, _) = api(Some("tok"), transport.clone());
        let image = SelectedFile { name: "pothole.jpg".into(), mime: "image/jpeg".into(), size: 2048, handle: None };
        let draft = ReportDraft {
            description: "Deep pothole at the junction".into(),
            latitude: Some(28.474_4),
            longitude: Some(77.504_1),
            image: Some(image.clone()),
        };

        block_on(api.submit_report(&draft)).unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "http://api.test/api/reports");
        assert_eq!(request.header("Content-Type"), None);
        assert_eq!(request.header("Authorization"), Some("Bearer tok"));
        assert_eq!(
            request.body,
            RequestBody::Multipart(vec![
                FormPart::Text {
                    name: "report_data_json".into(),
                    value: r#"{"description":"Deep pothole at the junction","latitude":28.4744,"longitude":77.5041}"#.into(),
                },
                FormPart::File { name: "images".into(), file: image },
            ])
        );
    }

    #[test]
    fn submission_requires_session() {
        let transport = Rc::new(ScriptedTransport::new());
        let (api, _) = api(None, transport.clone());
        let draft = ReportDraft {
            description: "Graffiti on the underpass".into(),
            latitude: Some(1.0),
            longitude: Some(1.0),
            image: None,
        };

        let err = block_on(api.submit_report(&draft)).unwrap_err();
        assert_eq!(err, SubmitError::Request(RequestError::SignedOut(LOGIN_REQUIRED.into())));
        let reported: &dyn std::error::Error = &err;
        assert_eq!(reported.to_string(), LOGIN_REQUIRED);
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn sign_out_drops_token_without_request() {
        let transport = Rc::new(ScriptedTransport::new());
        let (api, session) = api(Some("jwt"), transport.clone());

        assert_eq!(api.sign_out(&QueryClient::default()), CitizenRoute::Login);
        assert!(!session.is_authenticated());
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn login_persists_token() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, json!({"access_token": "jwt"}));
        let (api, session) = api(None, transport);

        block_on(api.login(&Credentials { email: "a@b.co".into(), password: "secret".into() })).unwrap();
        assert_eq!(session.get().as_deref(), Some("jwt"));
    }
}
