pub mod department_editor;
pub mod guard_state;
pub mod location_picker;
pub mod status_drawer;

pub use department_editor::{run_department_action, DepartmentAction, DepartmentEditor, EditorDialog, EditorUpdate};
pub use guard_state::GuardState;
pub use location_picker::{round_coordinate, GeolocationError, LocationPickerState};
pub use status_drawer::{apply_status_update, DrawerAction, StatusDrawer};
