//! Mode-dependent wording.

use super::models::{AppMode, UserRole};

/// A word whose rendering depends on the [`AppMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    /// Supervisor: faculty or manager.
    Faculty,
    /// Member: student or team member.
    Student,
    /// Unit of work: project or work team.
    Project,
    /// The tenant: university or organization.
    Org,
    /// Same word in both modes.
    Dept,
}

impl Term {
    /// The word for this term in `mode`.
    pub fn label(self, mode: AppMode) -> &'static str {
        match (mode, self) {
            (AppMode::Education, Term::Faculty) => "Faculty",
            (AppMode::Education, Term::Student) => "Student",
            (AppMode::Education, Term::Project) => "Project",
            (AppMode::Education, Term::Org) => "University",
            (AppMode::Organization, Term::Faculty) => "Manager",
            (AppMode::Organization, Term::Student) => "Team Member",
            (AppMode::Organization, Term::Project) => "Work Team",
            (AppMode::Organization, Term::Org) => "Organization",
            (_, Term::Dept) => "Department",
        }
    }
}

impl UserRole {
    /// The term describing this role, e.g. `University` for an education admin.
    pub fn term(self) -> Term {
        match self {
            UserRole::Admin => Term::Org,
            UserRole::Faculty => Term::Faculty,
            UserRole::Student => Term::Student,
        }
    }

    /// Slug used in invitation links.
    pub fn invite_slug(self, mode: AppMode) -> &'static str {
        match (self, mode) {
            (UserRole::Faculty, AppMode::Education) => "faculty",
            (UserRole::Faculty, AppMode::Organization) => "manager",
            (_, AppMode::Education) => "student",
            (_, AppMode::Organization) => "member",
        }
    }
}
