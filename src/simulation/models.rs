//! Domain records held by the simulation store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Vocabulary and tone the workspace runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppMode {
    /// Universities: faculty, students, projects.
    #[default]
    Education,
    /// Companies: managers, team members, work teams.
    Organization,
}

/// Simulated role. Nothing enforces it; it only selects menus and data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Organization or university administrator.
    Admin,
    /// Faculty member or manager.
    Faculty,
    /// Student or team member.
    Student,
}

/// The tenant everything belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// When the tenant was set up.
    pub created_at: DateTime<Utc>,
    /// Mode the tenant was created in.
    pub mode: AppMode,
}

/// A workspace member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Simulated role.
    pub role: UserRole,
    /// Owning [`Organization`] id.
    pub organization_id: String,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Delivery status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Progressing as planned.
    #[serde(rename = "On Track")]
    OnTrack,
    /// Behind schedule.
    #[serde(rename = "Delayed")]
    Delayed,
    /// Delivered.
    #[serde(rename = "Completed")]
    Completed,
    /// Likely to miss its goals.
    #[serde(rename = "At Risk")]
    AtRisk,
}

impl ProjectStatus {
    /// Display order used by the dashboard breakdown.
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::OnTrack,
        ProjectStatus::Completed,
        ProjectStatus::Delayed,
        ProjectStatus::AtRisk,
    ];

    /// Human-readable label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::OnTrack => "On Track",
            ProjectStatus::Delayed => "Delayed",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::AtRisk => "At Risk",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A tracked project or work team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable identifier.
    pub id: String,
    /// Project or team title.
    pub title: String,
    /// Member names, not ids.
    pub students: Vec<String>,
    /// Member user ids, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_ids: Option<Vec<String>>,
    /// Supervising faculty member or manager.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<String>,
    /// Technologies in use, in the order entered.
    pub technologies: Vec<String>,
    /// Completion percentage, 0 to 100.
    pub progress: u8,
    /// Delivery status.
    pub status: ProjectStatus,
    /// Date of the latest update.
    pub last_updated: NaiveDate,
    /// Free-text summary.
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_serializes_like_the_search_payload() {
        let project = Project {
            id: "9".into(),
            title: "Flood Sensor Mesh".into(),
            students: vec!["Lin Wei".into()],
            student_ids: None,
            faculty_id: Some("u2".into()),
            technologies: vec!["Rust".into()],
            progress: 35,
            status: ProjectStatus::AtRisk,
            last_updated: NaiveDate::from_ymd_opt(2023, 10, 20).unwrap(),
            description: "Mesh of river level sensors.".into(),
        };

        assert_eq!(
            serde_json::to_value(&project).unwrap(),
            json!({
                "id": "9",
                "title": "Flood Sensor Mesh",
                "students": ["Lin Wei"],
                "facultyId": "u2",
                "technologies": ["Rust"],
                "progress": 35,
                "status": "At Risk",
                "lastUpdated": "2023-10-20",
                "description": "Mesh of river level sensors."
            })
        );
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(AppMode::Organization).unwrap(), json!("ORGANIZATION"));
        assert_eq!(serde_json::to_value(UserRole::Faculty).unwrap(), json!("FACULTY"));
        assert_eq!(ProjectStatus::OnTrack.to_string(), "On Track");
    }
}
