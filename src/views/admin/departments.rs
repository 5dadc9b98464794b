// ============================================================================
// DEPARTMENTS VIEW - list with create/edit dialogs and delete confirmation
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use crate::components::form::input_value;
use crate::components::{AdminLayout, FieldError, LoadError};
use crate::context::use_portal;
use crate::hooks::use_query;
use crate::models::Department;
use crate::router::{AdminRoute, Route};
use crate::services::admin_api::DEPARTMENTS;
use crate::services::{AdminApi, QueryKey};
use crate::state::{run_department_action, DepartmentEditor, EditorDialog, EditorUpdate};
use crate::stores::Toast;
use crate::utils::validation::Field;
use crate::utils::{format_date, DateStyle};

#[function_component(Departments)]
pub fn departments() -> Html {
    let portal = use_portal::<AdminApi>();
    let editor = use_reducer(DepartmentEditor::default);

    let query = {
        let api = portal.api.clone();
        use_query(&portal.queries, QueryKey::new(DEPARTMENTS), move || {
            let api = api.clone();
            async move { api.fetch_departments().await }
        })
    };

    {
        let toasts = portal.toasts.clone();
        use_effect_with(query.error.clone(), move |error| {
            if let Some(err) = error {
                log::error!("❌ Failed to load departments: {}", err);
                toasts.push(Toast::error("Failed to load departments").with_description(err.to_string()));
            }
            || ()
        });
    }

    let update = {
        let editor = editor.clone();
        move |apply: EditorUpdate| editor.dispatch(apply)
    };

    let open_create = {
        let update = update.clone();
        Callback::from(move |_: MouseEvent| update(EditorUpdate::new(|e| e.open_create())))
    };
    let close = {
        let update = update.clone();
        Callback::from(move |_: MouseEvent| update(EditorUpdate::new(|e| e.close())))
    };
    let open_edit = {
        let update = update.clone();
        move |department: Department| {
            let update = update.clone();
            Callback::from(move |_: MouseEvent| {
                let department = department.clone();
                update(EditorUpdate::new(move |e| e.open_edit(department)))
            })
        }
    };
    let confirm_delete = {
        let update = update.clone();
        move |department: Department| {
            let update = update.clone();
            Callback::from(move |_: MouseEvent| {
                let department = department.clone();
                update(EditorUpdate::new(move |e| e.confirm_delete(department)))
            })
        }
    };
    let on_name = {
        let update = update.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(&e);
            update(EditorUpdate::new(move |editor| editor.set_name(value)))
        })
    };
    let on_email = {
        let update = update.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(&e);
            update(EditorUpdate::new(move |editor| editor.set_email(value)))
        })
    };

    let submit = {
        let editor = editor.clone();
        let portal = portal.clone();
        Callback::from(move |_: ()| {
            let action = (*editor).clone().submit();
            editor.dispatch(EditorUpdate::new(|e| {
                e.submit();
            }));
            let Some(action) = action else {
                return;
            };

            let editor = editor.clone();
            let portal = portal.clone();
            spawn_local(async move {
                let outcome = run_department_action(&portal.api, &portal.queries, &action).await;
                match &outcome {
                    Ok(()) => portal.toasts.push(Toast::success(action.success_message())),
                    Err(err) => {
                        log::error!("❌ {}: {}", action.failure_message(), err);
                        portal.toasts.push(Toast::error(action.failure_message()))
                    }
                };
                editor.dispatch(EditorUpdate::new(move |e| e.finish(&outcome)));
            });
        })
    };
    let on_form_submit = submit.reform(|e: SubmitEvent| e.prevent_default());
    let on_delete = submit.reform(|_: MouseEvent| ());

    let dialog = render_dialog(&editor, on_form_submit, on_delete, on_name, on_email, close);

    let list = match (query.data.clone(), query.error.clone()) {
        (Some(list), _) => list,
        (None, Some(error)) => {
            return html! {
                <AdminLayout title="Departments">
                    <div class="centered-panel">
                        <LoadError
                            {error}
                            icon="🏢"
                            title="Failed to Load Departments"
                            on_retry={query.refetch.clone()}
                            login_path={AdminRoute::Login.path()}
                        >
                            <button type="button" class="btn btn-primary" onclick={open_create}>{"+ Add Department"}</button>
                        </LoadError>
                    </div>
                    { dialog }
                </AdminLayout>
            };
        }
        (None, None) => {
            return html! {
                <AdminLayout title="Departments">
                    <div class="centered-panel">
                        <div class="spinner"></div>
                        <p class="text-muted">{"Loading departments..."}</p>
                    </div>
                </AdminLayout>
            };
        }
    };

    html! {
        <AdminLayout title="Departments">
            <div class="stack">
                <div class="row-between">
                    <div>
                        <h1 class="section-title">{"Departments"}</h1>
                        <p class="text-muted">{"Manage city departments and their contact information"}</p>
                    </div>
                    <button type="button" class="btn btn-primary" onclick={open_create.clone()}>{"+ Add Department"}</button>
                </div>

                <div class="card">
                    <div class="card-header">
                        <h3 class="card-title">{ format!("🏢 All Departments ({})", list.len()) }</h3>
                    </div>
                    <div class="card-content">
                        if list.is_empty() {
                            <div class="empty-state">
                                <div class="empty-icon">{"🏢"}</div>
                                <p class="empty-title">{"No departments found"}</p>
                                <p class="text-muted">{"Start by creating your first department."}</p>
                                <button type="button" class="btn btn-primary" onclick={open_create}>{"+ Add Department"}</button>
                            </div>
                        } else {
                            <table class="table">
                                <thead>
                                    <tr>
                                        <th>{"Department Name"}</th>
                                        <th>{"Contact Email"}</th>
                                        <th>{"Created Date"}</th>
                                        <th class="text-right">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    { for list.iter().map(|department| html! {
                                        <tr key={department.id.to_string()}>
                                            <td class="font-medium">{ &department.name }</td>
                                            <td>{ format!("✉️ {}", department.email) }</td>
                                            <td>
                                                { department.created_at.as_deref()
                                                    .map(|raw| format_date(raw, DateStyle::Short))
                                                    .unwrap_or_else(|| "-".to_string()) }
                                            </td>
                                            <td class="text-right">
                                                <div class="button-row justify-end">
                                                    <button type="button" class="btn btn-outline btn-sm" title="Edit"
                                                        onclick={open_edit(department.clone())}>{"✏️"}</button>
                                                    <button type="button" class="btn btn-outline btn-sm" title="Delete"
                                                        onclick={confirm_delete(department.clone())}>{"🗑️"}</button>
                                                </div>
                                            </td>
                                        </tr>
                                    }) }
                                </tbody>
                            </table>
                        }
                    </div>
                </div>
            </div>
            { dialog }
        </AdminLayout>
    }
}

fn render_dialog(
    editor: &DepartmentEditor,
    on_submit: Callback<SubmitEvent>,
    on_delete: Callback<MouseEvent>,
    on_name: Callback<InputEvent>,
    on_email: Callback<InputEvent>,
    on_close: Callback<MouseEvent>,
) -> Html {
    let busy = editor.is_submitting();
    let (title, description, idle_label, busy_label, prefix) = match editor.dialog() {
        EditorDialog::Closed => return html! {},
        EditorDialog::ConfirmDelete(department) => {
            return html! {
                <>
                    <div class="dialog-backdrop" onclick={on_close.clone()}></div>
                    <div class="dialog" role="alertdialog">
                        <h2 class="dialog-title">{"Delete Department"}</h2>
                        <p class="dialog-description">
                            { format!(
                                "Are you sure you want to delete \"{}\"? This action cannot be undone \
                                 and will fail if the department has active reports.",
                                department.name
                            ) }
                        </p>
                        <div class="dialog-footer">
                            <button type="button" class="btn btn-outline" onclick={on_close} disabled={busy}>{"Cancel"}</button>
                            <button type="button" class="btn btn-destructive" onclick={on_delete} disabled={busy}>{"Delete"}</button>
                        </div>
                    </div>
                </>
            };
        }
        EditorDialog::Create => (
            "Add New Department",
            "Create a new department to manage civic issues.",
            "Create Department",
            "Creating...",
            "",
        ),
        EditorDialog::Edit(_) => (
            "Edit Department",
            "Update the department information.",
            "Update Department",
            "Updating...",
            "edit-",
        ),
    };
    let form = editor.form();

    html! {
        <>
            <div class="dialog-backdrop" onclick={on_close.clone()}></div>
            <div class="dialog" role="dialog">
                <form onsubmit={on_submit} novalidate=true>
                    <div class="dialog-header">
                        <h2 class="dialog-title">{ title }</h2>
                        <p class="dialog-description">{ description }</p>
                        <button type="button" class="dialog-close" onclick={on_close}>{"✕"}</button>
                    </div>
                    <div class="form-stack">
                        <div class="form-item">
                            <label for={format!("{}name", prefix)}>{"Department Name"}</label>
                            <input id={format!("{}name", prefix)} class="input" placeholder="e.g., Public Works"
                                value={form.name.clone()} oninput={on_name} />
                            <FieldError errors={editor.errors().clone()} field={Field::Name} />
                        </div>
                        <div class="form-item">
                            <label for={format!("{}email", prefix)}>{"Contact Email"}</label>
                            <input id={format!("{}email", prefix)} class="input" type="email" placeholder="department@city.gov"
                                value={form.email.clone()} oninput={on_email} />
                            <FieldError errors={editor.errors().clone()} field={Field::Email} />
                        </div>
                    </div>
                    <div class="dialog-footer">
                        <button type="submit" class="btn btn-primary" disabled={busy}>
                            { if busy { busy_label } else { idle_label } }
                        </button>
                    </div>
                </form>
            </div>
        </>
    }
}
