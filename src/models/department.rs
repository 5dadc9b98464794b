use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentCreate {
    pub name: String,
    pub email: String,
}

impl From<&Department> for DepartmentCreate {
    fn from(department: &Department) -> Self {
        Self {
            name: department.name.clone(),
            email: department.email.clone(),
        }
    }
}

/// Partial update: only the fields that changed are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl DepartmentUpdate {
    pub fn diff(original: &Department, edited: &DepartmentCreate) -> Self {
        Self {
            name: (edited.name != original.name).then(|| edited.name.clone()),
            email: (edited.email != original.email).then(|| edited.email.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_only_carries_changed_fields() {
        let original = Department {
            id: 3,
            name: "Public Works".into(),
            email: "works@city.gov".into(),
            created_at: None,
        };
        let edited = DepartmentCreate {
            name: "Public Works".into(),
            email: "roads@city.gov".into(),
        };

        let update = DepartmentUpdate::diff(&original, &edited);
        assert_eq!(update.name, None);
        assert_eq!(update.email.as_deref(), Some("roads@city.gov"));
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"email":"roads@city.gov"}"#);

        let unchanged = DepartmentUpdate::diff(&original, &DepartmentCreate::from(&original));
        assert!(unchanged.is_empty());
    }
}
