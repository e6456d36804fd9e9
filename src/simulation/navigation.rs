//! Role-dependent menu.

use super::models::UserRole;
use super::store::SimulationStore;
use super::vocabulary::Term;

/// A screen of the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleType {
    /// Portfolio overview with dashboard figures.
    Dashboard,
    /// Member management and invitations.
    OrgAdmin,
    /// Report comparison against an earlier submission.
    Recall,
    /// Single-report analysis.
    Analyzer,
    /// Natural-language project search.
    Search,
    /// Image editing from a prompt.
    Creative,
    /// The member's own projects and feedback.
    StudentHub,
}

impl ModuleType {
    /// Menu entries for `role`, in display order.
    pub fn available_for(role: UserRole) -> &'static [ModuleType] {
        match role {
            UserRole::Admin => &[ModuleType::Dashboard, ModuleType::OrgAdmin, ModuleType::Search],
            UserRole::Faculty => &[
                ModuleType::Dashboard,
                ModuleType::Recall,
                ModuleType::Analyzer,
                ModuleType::Search,
                ModuleType::Creative,
            ],
            UserRole::Student => &[ModuleType::StudentHub, ModuleType::Creative],
        }
    }

    /// Module shown right after login.
    pub fn default_for(role: UserRole) -> ModuleType {
        match role {
            UserRole::Admin | UserRole::Faculty => ModuleType::Dashboard,
            UserRole::Student => ModuleType::StudentHub,
        }
    }

    /// Menu label as seen by `role`, in the store's current vocabulary.
    pub fn label(self, role: UserRole, store: &SimulationStore) -> String {
        match (self, role) {
            (ModuleType::Dashboard, UserRole::Faculty) => {
                format!("My {}s", store.term(Term::Project))
            }
            (ModuleType::Dashboard, _) => "Dashboard".to_string(),
            (ModuleType::OrgAdmin, _) => format!("Manage {}", store.term(Term::Org)),
            (ModuleType::Search, UserRole::Admin) => {
                format!("Search {}s", store.term(Term::Project))
            }
            (ModuleType::Search, _) => "Search DB".to_string(),
            (ModuleType::Recall, _) => "Memory Recall".to_string(),
            (ModuleType::Analyzer, _) => "Analyze Report".to_string(),
            (ModuleType::Creative, _) => "Visual Studio".to_string(),
            (ModuleType::StudentHub, _) => "My Hub".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::AppMode;

    #[test]
    fn test_menus_per_role() {
        assert_eq!(ModuleType::available_for(UserRole::Admin).len(), 3);
        assert_eq!(
            ModuleType::available_for(UserRole::Student),
            &[ModuleType::StudentHub, ModuleType::Creative]
        );
        assert!(ModuleType::available_for(UserRole::Faculty).contains(&ModuleType::Recall));
        assert!(!ModuleType::available_for(UserRole::Student).contains(&ModuleType::Dashboard));
    }

    #[test]
    fn test_default_module() {
        assert_eq!(ModuleType::default_for(UserRole::Admin), ModuleType::Dashboard);
        assert_eq!(ModuleType::default_for(UserRole::Faculty), ModuleType::Dashboard);
        assert_eq!(ModuleType::default_for(UserRole::Student), ModuleType::StudentHub);
    }

    #[test]
    fn test_labels_follow_mode() {
        let mut store = SimulationStore::new();
        assert_eq!(ModuleType::Dashboard.label(UserRole::Faculty, &store), "My Projects");
        assert_eq!(ModuleType::OrgAdmin.label(UserRole::Admin, &store), "Manage University");

        store.set_app_mode(AppMode::Organization);
        assert_eq!(ModuleType::Dashboard.label(UserRole::Faculty, &store), "My Work Teams");
        assert_eq!(ModuleType::Search.label(UserRole::Admin, &store), "Search Work Teams");
        assert_eq!(ModuleType::Search.label(UserRole::Faculty, &store), "Search DB");
        assert_eq!(ModuleType::Dashboard.label(UserRole::Admin, &store), "Dashboard");
    }
}
