// ============================================================================
// ADMIN API - dashboard, reports, analytics and departments
// ============================================================================

use std::rc::Rc;
use crate::config::CONFIG;
use crate::error::RequestError;
use crate::models::{
    AnalyticsData, AnalyticsSummary, Credentials, DashboardData, Department, DepartmentCreate,
    DepartmentUpdate, MessageResponse, PaginatedReports, Report, ReportRecord, ReportStatus,
    TokenResponse,
};
use crate::router::AdminRoute;
use crate::stores::{Notifier, SessionStore};
use crate::utils::pagination::{estimate_total_count, page_offset};
use super::api_client::{json_body, ApiClient};
use super::query_cache::{QueryClient, QueryKey};
use super::transport::{FetchTransport, HttpMethod, HttpTransport, RequestBody};

pub const REPORTS: &str = "reports";
pub const DEPARTMENTS: &str = "departments";
pub const DASHBOARD: &str = "dashboard";
pub const ANALYTICS: &str = "analytics";

/// Reports within `radius_km` of a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaFilter {
    pub center_lat: f64,
    pub center_lon: f64,
    pub radius_km: f64,
}

/// `None` means "all" for every field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub category: Option<String>,
    pub department_id: Option<i64>,
    pub area: Option<AreaFilter>,
}

impl ReportFilter {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn query_params(&self, page: usize, limit: usize) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status", status.backend_value().to_string()));
        }
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(department_id) = self.department_id {
            params.push(("department_id", department_id.to_string()));
        }
        if let Some(area) = self.area {
            params.push(("center_lat", area.center_lat.to_string()));
            params.push(("center_lon", area.center_lon.to_string()));
            params.push(("radius_km", area.radius_km.to_string()));
        }
        params.push(("skip", page_offset(page, limit).to_string()));
        params.push(("limit", limit.to_string()));
        params
    }

    /// One cache entry per filter and page, all under the `reports` resource
    pub fn cache_key(&self, page: usize, limit: usize) -> QueryKey {
        let area = self
            .area
            .map(|a| format!("{},{},{}", a.center_lat, a.center_lon, a.radius_km))
            .unwrap_or_else(|| "all".to_string());
        QueryKey::new(REPORTS)
            .with(self.status.map_or("all", |s| s.backend_value()))
            .with(self.category.as_deref().unwrap_or("all"))
            .with(self.department_id.map_or_else(|| "all".to_string(), |id| id.to_string()))
            .with(area)
            .with(page)
            .with(limit)
    }
}

#[derive(Clone)]
pub struct AdminApi {
    client: ApiClient,
}

impl AdminApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Browser client against `API_BASE_URL`, toasting every failure
    pub fn from_config(session: Rc<dyn SessionStore>, notifier: Rc<dyn Notifier>) -> Self {
        let transport: Rc<dyn HttpTransport> = Rc::new(FetchTransport);
        let client = ApiClient::new(CONFIG.api_base_url.clone(), session, transport)
            .with_api_key(CONFIG.admin_api_key.clone())
            .with_notifier(notifier);
        Self::new(client)
    }

    pub fn session(&self) -> &Rc<dyn SessionStore> {
        self.client.session()
    }

    /// Stores the returned token as the admin session
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, RequestError> {
        let token: TokenResponse = self
            .client
            .send_json(HttpMethod::Post, "/api/auth/login", credentials)
            .await?;
        self.session().set(&token.access_token);
        log::info!("🔐 Admin login successful");
        Ok(token)
    }

    /// Best effort: a failed call is logged and otherwise ignored
    pub async fn logout(&self) {
        match self
            .client
            .send_optional::<MessageResponse>(HttpMethod::Post, "/api/auth/logout", RequestBody::Empty)
            .await
        {
            Ok(_) => log::info!("✅ Server session closed"),
            Err(err) => log::warn!("⚠️ Logout API call failed, clearing locally anyway: {}", err),
        }
    }

    /// Logout followed by unconditional local cleanup; returns where to go next
    pub async fn sign_out(&self, queries: &QueryClient) -> AdminRoute {
        self.logout().await;
        self.session().clear();
        queries.clear();
        AdminRoute::Login
    }

    pub async fn fetch_dashboard(&self) -> Result<DashboardData, RequestError> {
        self.client.get("/api/dashboard").await
    }

    pub async fn fetch_reports(
        &self,
        filter: &ReportFilter,
        page: usize,
        limit: usize,
    ) -> Result<PaginatedReports, RequestError> {
        let records: Vec<ReportRecord> = self
            .client
            .get_with_query("/api/reports/all", &filter.query_params(page, limit))
            .await?;
        let reports: Vec<Report> = records.into_iter().map(Report::from).collect();

        log::debug!("📋 Page {} returned {} reports", page, reports.len());
        Ok(PaginatedReports {
            total_count: estimate_total_count(reports.len(), limit),
            reports,
        })
    }

    pub async fn update_report_status(&self, id: &str, status: ReportStatus) -> Result<Report, RequestError> {
        let payload = serde_json::json!({ "status": status.backend_value() });
        let record: ReportRecord = self
            .client
            .send_json(HttpMethod::Put, &format!("/api/reports/{}/status", id), &payload)
            .await?;
        log::info!("✅ Report {} moved to {}", id, status);
        Ok(Report::from(record))
    }

    pub async fn fetch_analytics(&self) -> Result<AnalyticsData, RequestError> {
        let summary: AnalyticsSummary = self.client.get("/api/analytics").await?;
        Ok(AnalyticsData::from(summary))
    }

    pub async fn fetch_departments(&self) -> Result<Vec<Department>, RequestError> {
        self.client.get("/api/departments").await
    }

    pub async fn fetch_department(&self, id: i64) -> Result<Department, RequestError> {
        self.client.get(&format!("/api/departments/{}", id)).await
    }

    pub async fn create_department(&self, department: &DepartmentCreate) -> Result<Department, RequestError> {
        self.client
            .send_json(HttpMethod::Post, "/api/departments", department)
            .await
    }

    pub async fn update_department(&self, id: i64, update: &DepartmentUpdate) -> Result<Department, RequestError> {
        self.client
            .send(HttpMethod::Put, &format!("/api/departments/{}", id), json_body(update)?)
            .await
    }

    /// Accepts both `204 No Content` and a `{message}` body
    pub async fn delete_department(&self, id: i64) -> Result<Option<MessageResponse>, RequestError> {
        self.client
            .send_optional(HttpMethod::Delete, &format!("/api/departments/{}", id), RequestBody::Empty)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::MemorySessionStore;
    use crate::testing::{block_on, RecordingNotifier, ScriptedTransport};
    use serde_json::json;

    fn api(transport: Rc<ScriptedTransport>) -> (AdminApi, Rc<MemorySessionStore>) {
        let session = Rc::new(MemorySessionStore::with_token("admin-token"));
        let client = ApiClient::new("http://api.test", session.clone(), transport)
            .with_api_key(Some("key".into()))
            .with_notifier(Rc::new(RecordingNotifier::default()));
        (AdminApi::new(client), session)
    }

    fn backend_reports(count: usize) -> serde_json::Value {
        let rows: Vec<_> = (0..count)
            .map(|i| json!({
                "id": i + 1,
                "description": "Overflowing bin",
                "status": "pending",
                "category": "Public Service",
                "created_at": "2024-03-02T09:15:00",
                "latitude": 28.6,
                "longitude": 77.2
            }))
            .collect();
        json!(rows)
    }

    #[test]
    fn full_page_doubles_total_and_short_page_does_not() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, backend_reports(5));
        transport.respond(200, backend_reports(3));
        let (api, _) = api(transport.clone());

        let full = block_on(api.fetch_reports(&ReportFilter::default(), 1, 5)).unwrap();
        assert_eq!(full.total_count, 10);
        assert_eq!(full.reports[0].id, "1");
        let requests = transport.requests();
        let first = &requests[0];
        assert_eq!(first.param("skip"), Some("0"));
        assert_eq!(first.param("limit"), Some("5"));
        assert_eq!(first.param("status"), None);

        let short = block_on(api.fetch_reports(&ReportFilter::default(), 1, 5)).unwrap();
        assert_eq!(short.total_count, 3);
    }

    #[test]
    fn filters_are_sent_in_wire_form() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, json!([]));
        let (api, _) = api(transport.clone());
        let filter = ReportFilter {
            status: Some(ReportStatus::InProgress),
            category: Some("Safety".into()),
            department_id: Some(2),
            area: Some(AreaFilter { center_lat: 28.5, center_lon: 77.25, radius_km: 10.0 }),
        };

        block_on(api.fetch_reports(&filter, 3, 5)).unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "http://api.test/api/reports/all");
        let params: Vec<(&str, &str)> = request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            params,
            vec![
                ("status", "in_progress"),
                ("category", "Safety"),
                ("department_id", "2"),
                ("center_lat", "28.5"),
                ("center_lon", "77.25"),
                ("radius_km", "10"),
                ("skip", "10"),
                ("limit", "5"),
            ]
        );
    }

    #[test]
    fn cache_keys_share_the_reports_resource() {
        let a = ReportFilter::default().cache_key(1, 5);
        let b = ReportFilter { status: Some(ReportStatus::Resolved), ..Default::default() }.cache_key(2, 5);
        assert_ne!(a, b);
        assert_eq!(a.resource(), REPORTS);
        assert_eq!(b.resource(), REPORTS);
    }

    #[test]
    fn status_update_sends_backend_value() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, json!({"id": 12, "description": "Broken bench", "status": "resolved"}));
        let (api, _) = api(transport.clone());

        let report = block_on(api.update_report_status("12", ReportStatus::Resolved)).unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.url, "http://api.test/api/reports/12/status");
        assert_eq!(request.body, RequestBody::Json(r#"{"status":"resolved"}"#.into()));
        assert_eq!(request.header("X-API-Key"), Some("key"));
        assert_eq!(report.status, ReportStatus::Resolved);
    }

    #[test]
    fn rejected_delete_is_an_error() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(400, json!({"detail": "Cannot delete department with active reports"}));
        let (api, _) = api(transport);

        let err = block_on(api.delete_department(4)).unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "Cannot delete department with active reports");
    }

    #[test]
    fn delete_accepts_message_body() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, json!({"message": "Department deleted"}));
        let (api, _) = api(transport);

        let deleted = block_on(api.delete_department(4)).unwrap();
        assert_eq!(deleted.map(|m| m.message).as_deref(), Some("Department deleted"));
    }

    #[test]
    fn login_stores_token() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, json!({"access_token": "fresh", "token_type": "bearer"}));
        let (api, session) = api(transport);
        session.clear();

        let credentials = Credentials { email: "admin@city.gov".into(), password: "pw".into() };
        block_on(api.login(&credentials)).unwrap();
        assert_eq!(session.get().as_deref(), Some("fresh"));
    }

    #[test]
    fn sign_out_clears_locally_even_when_logout_fails() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.fail(RequestError::Network("Failed to fetch".into()));
        let (api, session) = api(transport);
        let queries = QueryClient::default();
        block_on(queries.fetch(QueryKey::new(DASHBOARD), || async { Ok::<_, RequestError>(1) })).unwrap();

        let next = block_on(api.sign_out(&queries));

        assert_eq!(next, AdminRoute::Login);
        assert!(!session.is_authenticated());
        assert!(queries.get_cached::<i32>(&QueryKey::new(DASHBOARD)).is_none());
    }
}
