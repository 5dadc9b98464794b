// ============================================================================
// STATUS DRAWER - report detail panel with the three status buttons
// ============================================================================
// Any status other than the current one may be chosen; there is no
// forward-only workflow.
// ============================================================================

use std::rc::Rc;
use yew::functional::Reducible;
use crate::error::RequestError;
use crate::models::{Report, ReportStatus};
use crate::services::admin_api::{AdminApi, REPORTS};
use crate::services::QueryClient;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusDrawer {
    report: Option<Report>,
    pending: Option<ReportStatus>,
}

impl StatusDrawer {
    pub fn open(&mut self, report: Report) {
        self.report = Some(report);
        self.pending = None;
    }

    pub fn close(&mut self) {
        self.report = None;
        self.pending = None;
    }

    pub fn is_open(&self) -> bool {
        self.report.is_some()
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn pending(&self) -> Option<ReportStatus> {
        self.pending
    }

    /// The button for the current status is disabled, and all are while saving
    pub fn can_select(&self, status: ReportStatus) -> bool {
        match &self.report {
            Some(report) => self.pending.is_none() && report.status != status,
            None => false,
        }
    }

    /// Marks the update as in flight; `None` when the choice is not allowed
    pub fn begin(&mut self, status: ReportStatus) -> Option<String> {
        if !self.can_select(status) {
            return None;
        }
        self.pending = Some(status);
        self.report.as_ref().map(|report| report.id.clone())
    }

    /// Success closes the drawer; failure leaves it open for another try
    pub fn finish<T>(&mut self, id: &str, outcome: &Result<T, RequestError>) {
        self.settle(id, outcome.is_ok());
    }

    /// Ignored once the drawer was closed or moved to another report
    fn settle(&mut self, id: &str, saved: bool) {
        if self.report.as_ref().map(|report| report.id.as_str()) != Some(id) {
            return;
        }
        if saved {
            self.close();
        } else {
            self.pending = None;
        }
    }
}

pub enum DrawerAction {
    Open(Report),
    Close,
    Begin(ReportStatus),
    Finish { id: String, saved: bool },
}

impl Reducible for StatusDrawer {
    type Action = DrawerAction;

    fn reduce(self: Rc<Self>, action: DrawerAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            DrawerAction::Open(report) => next.open(report),
            DrawerAction::Close => next.close(),
            DrawerAction::Begin(status) => {
                next.begin(status);
            }
            DrawerAction::Finish { id, saved } => next.settle(&id, saved),
        }
        Rc::new(next)
    }
}

/// One status mutation; every cached report page is invalidated on success
pub async fn apply_status_update(
    api: &AdminApi,
    queries: &QueryClient,
    id: &str,
    status: ReportStatus,
) -> Result<Report, RequestError> {
    let updated = api.update_report_status(id, status).await?;
    queries.invalidate(REPORTS);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ApiClient, QueryKey};
    use crate::stores::MemorySessionStore;
    use crate::testing::{block_on, RecordingNotifier, ScriptedTransport};
    use serde_json::json;

    fn report(status: ReportStatus) -> Report {
        Report {
            id: "17".into(),
            description: "Tree fallen across road".into(),
            status,
            category: Some("Safety".into()),
            submitted_date: "2024-03-02T09:15:00".into(),
            image_url: None,
            location: None,
            citizen_id: "5".into(),
        }
    }

    #[test]
    fn current_status_cannot_be_chosen() {
        let mut drawer = StatusDrawer::default();
        assert!(!drawer.can_select(ReportStatus::Pending));

        drawer.open(report(ReportStatus::InProgress));
        assert!(drawer.can_select(ReportStatus::Pending));
        assert!(!drawer.can_select(ReportStatus::InProgress));
        assert!(drawer.can_select(ReportStatus::Resolved));
        assert_eq!(drawer.begin(ReportStatus::InProgress), None);
    }

    #[test]
    fn failure_keeps_drawer_open_and_success_closes_it() {
        let mut drawer = StatusDrawer::default();
        drawer.open(report(ReportStatus::Pending));

        assert_eq!(drawer.begin(ReportStatus::Resolved).as_deref(), Some("17"));
        assert!(!drawer.can_select(ReportStatus::InProgress));

        drawer.finish::<()>("17", &Err(RequestError::Network("offline".into())));
        assert!(drawer.is_open());
        assert_eq!(drawer.pending(), None);

        drawer.begin(ReportStatus::Resolved);
        drawer.finish("17", &Ok(()));
        assert!(!drawer.is_open());
    }

    #[test]
    fn late_result_does_not_reopen_or_touch_another_report() {
        let drawer = Rc::new(StatusDrawer::default());
        let drawer = drawer.reduce(DrawerAction::Open(report(ReportStatus::Pending)));
        let drawer = drawer.reduce(DrawerAction::Begin(ReportStatus::Resolved));
        let closed = drawer.reduce(DrawerAction::Close);

        let after_failure = closed.reduce(DrawerAction::Finish { id: "17".into(), saved: false });
        assert!(!after_failure.is_open());

        let mut other = report(ReportStatus::InProgress);
        other.id = "18".into();
        let reopened = after_failure.reduce(DrawerAction::Open(other));
        let reopened = reopened.reduce(DrawerAction::Begin(ReportStatus::Pending));
        let settled = reopened.reduce(DrawerAction::Finish { id: "17".into(), saved: true });
        assert_eq!(settled.report().map(|r| r.id.as_str()), Some("18"));
        assert_eq!(settled.pending(), Some(ReportStatus::Pending));
    }

    #[test]
    fn successful_update_invalidates_every_report_page() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, json!({"id": 17, "status": "resolved"}));
        transport.respond(500, json!({"message": "db down"}));
        let client = ApiClient::new("http://api.test", Rc::new(MemorySessionStore::with_token("t")), transport)
            .with_notifier(Rc::new(RecordingNotifier::default()));
        let api = AdminApi::new(client);
        let queries = QueryClient::default();
        let page = QueryKey::new(REPORTS).with(1);
        block_on(queries.fetch(page.clone(), || async { Ok::<_, RequestError>(0) })).unwrap();

        let updated = block_on(apply_status_update(&api, &queries, "17", ReportStatus::Resolved)).unwrap();
        assert_eq!(updated.status, ReportStatus::Resolved);
        assert!(queries.is_invalidated(&page));

        let fresh = QueryClient::default();
        block_on(fresh.fetch(page.clone(), || async { Ok::<_, RequestError>(0) })).unwrap();
        assert!(block_on(apply_status_update(&api, &fresh, "17", ReportStatus::Pending)).is_err());
        assert!(!fresh.is_invalidated(&page));
    }
}
