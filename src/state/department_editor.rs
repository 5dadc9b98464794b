// ============================================================================
// DEPARTMENT EDITOR - create/edit dialogs and delete confirmation
// ============================================================================
// Rows are never removed or patched locally: every successful action
// invalidates the department list and the table shows what the API returns.
// ============================================================================

use std::rc::Rc;
use yew::functional::Reducible;
use crate::error::RequestError;
use crate::models::{Department, DepartmentCreate, DepartmentUpdate};
use crate::services::admin_api::{AdminApi, DEPARTMENTS};
use crate::services::QueryClient;
use crate::utils::validation::{validate_department, ValidationErrors};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorDialog {
    #[default]
    Closed,
    Create,
    Edit(Department),
    ConfirmDelete(Department),
}

/// What the open dialog asks the API to do
#[derive(Debug, Clone, PartialEq)]
pub enum DepartmentAction {
    Create(DepartmentCreate),
    Update { id: i64, update: DepartmentUpdate },
    Delete { id: i64, name: String },
}

impl DepartmentAction {
    pub fn success_message(&self) -> String {
        match self {
            DepartmentAction::Create(_) => "Department created successfully".to_string(),
            DepartmentAction::Update { .. } => "Department updated successfully".to_string(),
            DepartmentAction::Delete { name, .. } => format!("Department \"{}\" deleted successfully", name),
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            DepartmentAction::Create(_) => "Failed to create department",
            DepartmentAction::Update { .. } => "Failed to update department",
            DepartmentAction::Delete { .. } => "Failed to delete department",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepartmentEditor {
    dialog: EditorDialog,
    form: DepartmentCreate,
    errors: ValidationErrors,
    submitting: bool,
}

impl DepartmentEditor {
    pub fn dialog(&self) -> &EditorDialog {
        &self.dialog
    }

    pub fn form(&self) -> &DepartmentCreate {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn open_create(&mut self) {
        *self = Self { dialog: EditorDialog::Create, ..Self::default() };
    }

    /// Prefills the form with the department's current values
    pub fn open_edit(&mut self, department: Department) {
        *self = Self {
            form: DepartmentCreate::from(&department),
            dialog: EditorDialog::Edit(department),
            ..Self::default()
        };
    }

    pub fn confirm_delete(&mut self, department: Department) {
        *self = Self { dialog: EditorDialog::ConfirmDelete(department), ..Self::default() };
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn set_name(&mut self, name: String) {
        self.form.name = name;
    }

    pub fn set_email(&mut self, email: String) {
        self.form.email = email;
    }

    /// Validates the form and marks the dialog busy.
    ///
    /// `None` when nothing should be sent: the dialog is closed or busy, the
    /// form is invalid (errors are kept for display), or an edit changed
    /// nothing (the dialog just closes).
    pub fn submit(&mut self) -> Option<DepartmentAction> {
        if self.submitting {
            return None;
        }
        let action = match &self.dialog {
            EditorDialog::Closed => return None,
            EditorDialog::ConfirmDelete(department) => DepartmentAction::Delete {
                id: department.id,
                name: department.name.clone(),
            },
            EditorDialog::Create | EditorDialog::Edit(_) => {
                let form = DepartmentCreate {
                    name: self.form.name.trim().to_string(),
                    email: self.form.email.trim().to_string(),
                };
                if let Err(errors) = validate_department(&form) {
                    self.errors = errors;
                    return None;
                }
                self.errors = ValidationErrors::new();
                match &self.dialog {
                    EditorDialog::Edit(original) => {
                        let update = DepartmentUpdate::diff(original, &form);
                        if update.is_empty() {
                            self.close();
                            return None;
                        }
                        DepartmentAction::Update { id: original.id, update }
                    }
                    _ => DepartmentAction::Create(form),
                }
            }
        };
        self.submitting = true;
        Some(action)
    }

    /// Success closes the dialog; failure keeps it open with the form intact.
    /// A dialog opened after the request started is left alone.
    pub fn finish<T>(&mut self, outcome: &Result<T, RequestError>) {
        if !self.submitting {
            return;
        }
        match outcome {
            Ok(_) => self.close(),
            Err(_) => self.submitting = false,
        }
    }
}

/// A change applied to whatever the editor holds when it is dispatched
pub struct EditorUpdate(Box<dyn FnOnce(&mut DepartmentEditor)>);

impl EditorUpdate {
    pub fn new(apply: impl FnOnce(&mut DepartmentEditor) + 'static) -> Self {
        Self(Box::new(apply))
    }
}

impl Reducible for DepartmentEditor {
    type Action = EditorUpdate;

    fn reduce(self: Rc<Self>, update: EditorUpdate) -> Rc<Self> {
        let mut next = (*self).clone();
        (update.0)(&mut next);
        Rc::new(next)
    }
}

/// Runs one action and invalidates the department list on success
pub async fn run_department_action(
    api: &AdminApi,
    queries: &QueryClient,
    action: &DepartmentAction,
) -> Result<(), RequestError> {
    match action {
        DepartmentAction::Create(form) => {
            api.create_department(form).await?;
        }
        DepartmentAction::Update { id, update } => {
            api.update_department(*id, update).await?;
        }
        DepartmentAction::Delete { id, .. } => {
            api.delete_department(*id).await?;
        }
    }
    queries.invalidate(DEPARTMENTS);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ApiClient, HttpMethod, QueryKey, RequestBody};
    use crate::stores::MemorySessionStore;
    use crate::testing::{block_on, RecordingNotifier, ScriptedTransport};
    use crate::utils::validation::Field;
    use serde_json::json;

    fn works() -> Department {
        Department {
            id: 3,
            name: "Public Works".into(),
            email: "works@city.gov".into(),
            created_at: Some("2024-01-10T08:00:00".into()),
        }
    }

    fn api(transport: Rc<ScriptedTransport>) -> AdminApi {
        let client = ApiClient::new("http://api.test", Rc::new(MemorySessionStore::with_token("t")), transport)
            .with_api_key(Some("key".into()))
            .with_notifier(Rc::new(RecordingNotifier::default()));
        AdminApi::new(client)
    }

    #[test]
    fn invalid_create_form_keeps_dialog_open() {
        let mut editor = DepartmentEditor::default();
        editor.open_create();
        editor.set_name("W".into());
        editor.set_email("not-an-email".into());

        assert_eq!(editor.submit(), None);
        assert!(editor.errors().has(Field::Name));
        assert!(editor.errors().has(Field::Email));
        assert_eq!(editor.dialog(), &EditorDialog::Create);
        assert!(!editor.is_submitting());
    }

    #[test]
    fn edit_sends_only_changed_fields() {
        let mut editor = DepartmentEditor::default();
        editor.open_edit(works());
        assert_eq!(editor.form().name, "Public Works");

        editor.set_email(" roads@city.gov ".into());
        let action = editor.submit().unwrap();
        assert_eq!(
            action,
            DepartmentAction::Update {
                id: 3,
                update: DepartmentUpdate { name: None, email: Some("roads@city.gov".into()) },
            }
        );
        assert!(editor.is_submitting());
        assert_eq!(editor.submit(), None);
    }

    #[test]
    fn unchanged_edit_just_closes() {
        let mut editor = DepartmentEditor::default();
        editor.open_edit(works());
        assert_eq!(editor.submit(), None);
        assert_eq!(editor.dialog(), &EditorDialog::Closed);
    }

    #[test]
    fn delete_messages_name_the_department() {
        let mut editor = DepartmentEditor::default();
        editor.confirm_delete(works());
        let action = editor.submit().unwrap();
        assert_eq!(action.success_message(), "Department \"Public Works\" deleted successfully");
        assert_eq!(action.failure_message(), "Failed to delete department");

        editor.finish::<()>(&Err(RequestError::Network("offline".into())));
        assert!(matches!(editor.dialog(), EditorDialog::ConfirmDelete(_)));
        editor.submit().unwrap();
        editor.finish(&Ok(()));
        assert_eq!(editor.dialog(), &EditorDialog::Closed);
    }

    #[test]
    fn late_result_leaves_a_newer_dialog_alone() {
        let editor = Rc::new(DepartmentEditor::default());
        let editor = editor.reduce(EditorUpdate::new(|e| e.confirm_delete(works())));
        let editor = editor.reduce(EditorUpdate::new(|e| {
            e.submit();
        }));
        assert!(editor.is_submitting());

        let editor = editor.reduce(EditorUpdate::new(|e| e.open_create()));
        let editor = editor.reduce(EditorUpdate::new(|e| e.finish(&Ok(()))));
        assert_eq!(editor.dialog(), &EditorDialog::Create);
    }

    #[test]
    fn successful_action_invalidates_list_and_failure_does_not() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(200, json!({"id": 9, "name": "Parks", "email": "parks@city.gov"}));
        transport.respond(400, json!({"detail": "Cannot delete department with active reports"}));
        let api = api(transport.clone());
        let queries = QueryClient::default();
        let list = QueryKey::new(DEPARTMENTS);
        block_on(queries.fetch(list.clone(), || async { Ok::<_, RequestError>(0) })).unwrap();

        let create = DepartmentAction::Create(DepartmentCreate {
            name: "Parks".into(),
            email: "parks@city.gov".into(),
        });
        block_on(run_department_action(&api, &queries, &create)).unwrap();
        assert!(queries.is_invalidated(&list));
        let request = transport.requests()[0].clone();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body, RequestBody::Json(r#"{"name":"Parks","email":"parks@city.gov"}"#.into()));

        let fresh = QueryClient::default();
        block_on(fresh.fetch(list.clone(), || async { Ok::<_, RequestError>(0) })).unwrap();
        let delete = DepartmentAction::Delete { id: 3, name: "Public Works".into() };
        let err = block_on(run_department_action(&api, &fresh, &delete)).unwrap_err();
        assert_eq!(err.to_string(), "Cannot delete department with active reports");
        assert!(!fresh.is_invalidated(&list));
    }
}
