//! Single-owner application state.

use chrono::Utc;
use uuid::Uuid;

use super::models::{AppMode, Organization, Project, User, UserRole};
use super::seed::{self, DEMO_ORG_ID};
use super::vocabulary::Term;

const DEFAULT_USER_NAME: &str = "Demo User";
const DEMO_EMAIL_DOMAIN: &str = "demo.com";
const ADMIN_EMAIL: &str = "admin@projectradar.app";
const INVITE_BASE_URL: &str = "https://projectradar.app/invite";

/// In-memory workspace: organization, users, projects and the session.
///
/// The store is a plain value. Callers that share it across tasks wrap it
/// themselves.
#[derive(Debug, Clone)]
pub struct SimulationStore {
    app_mode: AppMode,
    organization: Option<Organization>,
    users: Vec<User>,
    projects: Vec<Project>,
    current_user: Option<User>,
}

impl Default for SimulationStore {
    fn default() -> Self {
        Self::new()
    }
}

fn new_id(prefix: &str) -> String {
    format!("{}{}", prefix, Uuid::new_v4().simple())
}

impl SimulationStore {
    /// Store seeded with the demo organization, its three users and the
    /// sample projects. Nobody is logged in.
    pub fn new() -> Self {
        Self {
            app_mode: AppMode::Education,
            organization: Some(seed::initial_organization()),
            users: seed::initial_users(),
            projects: seed::mock_projects(),
            current_user: None,
        }
    }

    /// Empty store with no organization.
    pub fn empty(app_mode: AppMode) -> Self {
        Self {
            app_mode,
            organization: None,
            users: Vec::new(),
            projects: Vec::new(),
            current_user: None,
        }
    }

    /// Current vocabulary mode.
    pub fn app_mode(&self) -> AppMode {
        self.app_mode
    }

    /// Switch the vocabulary mode. Stored data is left as is.
    pub fn set_app_mode(&mut self, mode: AppMode) {
        tracing::debug!(?mode, "App mode changed");
        self.app_mode = mode;
    }

    /// Word for `term` in the current mode.
    pub fn term(&self, term: Term) -> &'static str {
        term.label(self.app_mode)
    }

    /// Log in as the first user holding `role`, creating one if none exists.
    pub fn login(&mut self, role: UserRole, name: Option<&str>) -> &User {
        let user = match self.users.iter().find(|u| u.role == role) {
            Some(existing) => existing.clone(),
            None => {
                let name = name.unwrap_or(DEFAULT_USER_NAME);
                let user = User {
                    id: new_id("u"),
                    name: name.to_string(),
                    email: format!(
                        "{}@{}",
                        name.to_lowercase().replacen(' ', ".", 1),
                        DEMO_EMAIL_DOMAIN
                    ),
                    role,
                    organization_id: self
                        .organization
                        .as_ref()
                        .map_or_else(|| DEMO_ORG_ID.to_string(), |org| org.id.clone()),
                    avatar: None,
                };
                self.users.push(user.clone());
                user
            }
        };

        tracing::info!(user_id = %user.id, ?role, "Logged in");
        self.current_user.insert(user)
    }

    /// Clear the current user, if any.
    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            tracing::info!(user_id = %user.id, "Logged out");
        }
    }

    /// Replace the workspace with a fresh organization run by `admin_name`,
    /// who becomes the current user.
    pub fn create_organization(&mut self, name: &str, admin_name: &str) -> &Organization {
        let organization = Organization {
            id: new_id("org"),
            name: name.to_string(),
            created_at: Utc::now(),
            mode: self.app_mode,
        };
        let admin = User {
            id: new_id("u"),
            name: admin_name.to_string(),
            email: ADMIN_EMAIL.to_string(),
            role: UserRole::Admin,
            organization_id: organization.id.clone(),
            avatar: None,
        };

        tracing::info!(org_id = %organization.id, mode = ?self.app_mode, "Organization created");

        self.users = vec![admin.clone()];
        self.projects.clear();
        self.current_user = Some(admin);
        self.organization.insert(organization)
    }

    /// Add a user and return their invitation link.
    pub fn invite_user(&mut self, email: &str, role: UserRole, name: &str) -> String {
        let user = User {
            id: new_id("u"),
            name: name.to_string(),
            email: email.to_string(),
            role,
            organization_id: self
                .organization
                .as_ref()
                .map(|org| org.id.clone())
                .unwrap_or_default(),
            avatar: None,
        };
        let link = format!(
            "{}/{}/{}",
            INVITE_BASE_URL,
            role.invite_slug(self.app_mode),
            user.id
        );

        tracing::info!(user_id = %user.id, ?role, "User invited");
        self.users.push(user);
        link
    }

    /// Append a project. Progress above 100 is capped.
    pub fn create_project(&mut self, mut project: Project) {
        project.progress = project.progress.min(100);
        tracing::debug!(project_id = %project.id, "Project created");
        self.projects.push(project);
    }

    /// The logged-in user.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// The active organization, if one exists.
    pub fn organization(&self) -> Option<&Organization> {
        self.organization.as_ref()
    }

    /// All members in insertion order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// All projects in insertion order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Members holding `role`.
    pub fn users_with_role(&self, role: UserRole) -> impl Iterator<Item = &User> {
        self.users.iter().filter(move |u| u.role == role)
    }

    /// First project listing `name` among its members.
    pub fn project_for_student(&self, name: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|p| p.students.iter().any(|s| s == name))
    }

    /// The project list as indented JSON, the form embedded in search prompts.
    pub fn projects_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.projects)
    }
}
