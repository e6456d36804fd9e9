//! Aggregate figures for the admin dashboard.

use super::models::{Project, ProjectStatus};

/// Number of projects in one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCount {
    /// The status counted.
    pub status: ProjectStatus,
    /// Projects currently in it.
    pub count: usize,
}

/// How many projects use a technology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnologyCount {
    /// Technology as written on the project.
    pub name: String,
    /// Projects listing it.
    pub count: usize,
}

/// Summary of a project list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardStats {
    /// Number of projects.
    pub total: usize,
    /// Rounded mean progress; 0 for an empty list.
    pub average_progress: u8,
    /// Projects marked at risk.
    pub at_risk: usize,
    /// Projects marked completed.
    pub completed: usize,
    /// Non-empty statuses in display order.
    pub status_breakdown: Vec<StatusCount>,
    /// At most five, most used first.
    pub top_technologies: Vec<TechnologyCount>,
}

const TOP_TECHNOLOGIES: usize = 5;

impl DashboardStats {
    /// Compute the dashboard figures for `projects`.
    pub fn from_projects(projects: &[Project]) -> Self {
        let total = projects.len();
        let count_of = |status: ProjectStatus| projects.iter().filter(|p| p.status == status).count();

        let average_progress = if total == 0 {
            0
        } else {
            let sum: u32 = projects.iter().map(|p| u32::from(p.progress)).sum();
            let rounded = (f64::from(sum) / total as f64).round();
            rounded.clamp(0.0, 100.0) as u8
        };

        let status_breakdown = ProjectStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status,
                count: count_of(status),
            })
            .filter(|entry| entry.count > 0)
            .collect();

        let mut technologies: Vec<TechnologyCount> = Vec::new();
        for tech in projects.iter().flat_map(|p| p.technologies.iter()) {
            match technologies.iter_mut().find(|t| &t.name == tech) {
                Some(entry) => entry.count += 1,
                None => technologies.push(TechnologyCount {
                    name: tech.clone(),
                    count: 1,
                }),
            }
        }
        technologies.sort_by(|a, b| b.count.cmp(&a.count));
        technologies.truncate(TOP_TECHNOLOGIES);

        Self {
            total,
            average_progress,
            at_risk: count_of(ProjectStatus::AtRisk),
            completed: count_of(ProjectStatus::Completed),
            status_breakdown,
            top_technologies: technologies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::seed::mock_projects;

    #[test]
    fn test_empty_projects() {
        let stats = DashboardStats::from_projects(&[]);
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn test_seed_projects() {
        let stats = DashboardStats::from_projects(&mock_projects());

        assert_eq!(stats.total, 5);
        // (75 + 40 + 90 + 60 + 20) / 5 = 57
        assert_eq!(stats.average_progress, 57);
        assert_eq!(stats.at_risk, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(
            stats.status_breakdown,
            vec![
                StatusCount { status: ProjectStatus::OnTrack, count: 2 },
                StatusCount { status: ProjectStatus::Completed, count: 1 },
                StatusCount { status: ProjectStatus::Delayed, count: 1 },
                StatusCount { status: ProjectStatus::AtRisk, count: 1 },
            ]
        );

        let names: Vec<_> = stats.top_technologies.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Python", "YOLOv8", "OpenCV", "React", "Solidity"]);
        assert_eq!(stats.top_technologies[0].count, 2);
    }

    #[test]
    fn test_zero_statuses_are_dropped() {
        let projects: Vec<_> = mock_projects()
            .into_iter()
            .filter(|p| p.status == ProjectStatus::OnTrack)
            .collect();
        let stats = DashboardStats::from_projects(&projects);

        assert_eq!(stats.status_breakdown.len(), 1);
        assert_eq!(stats.average_progress, 68);
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        let mut projects = mock_projects();
        projects.truncate(1);
        projects[0].progress = 250;

        let stats = DashboardStats::from_projects(&projects);
        assert_eq!(stats.average_progress, 100);
    }
}
