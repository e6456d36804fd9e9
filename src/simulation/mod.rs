//! In-memory workspace simulation.
//!
//! Models the organization, its members and their projects, together with
//! the role-dependent navigation and the mode-dependent vocabulary
//! (academic or corporate). Nothing is persisted.
//!
//! # Example
//!
//! ```
//! use project_radar::simulation::{SimulationStore, Term, UserRole, AppMode};
//!
//! let mut store = SimulationStore::new();
//! store.set_app_mode(AppMode::Organization);
//! assert_eq!(store.term(Term::Faculty), "Manager");
//!
//! let user = store.login(UserRole::Faculty, None);
//! assert_eq!(user.name, "Mentor User");
//! ```

mod dashboard;
mod models;
mod navigation;
mod seed;
mod store;
mod vocabulary;

pub use dashboard::{DashboardStats, StatusCount, TechnologyCount};
pub use models::{AppMode, Organization, Project, ProjectStatus, User, UserRole};
pub use navigation::ModuleType;
pub use seed::mock_projects;
pub use store::SimulationStore;
pub use vocabulary::Term;
