//! Demo data the store starts with.

use chrono::{NaiveDate, Utc};

use super::models::{AppMode, Organization, Project, ProjectStatus, User, UserRole};

pub(crate) const DEMO_ORG_ID: &str = "org1";

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn project(
    id: &str,
    title: &str,
    students: [&str; 2],
    technologies: [&str; 4],
    progress: u8,
    status: ProjectStatus,
    last_updated: NaiveDate,
    description: &str,
) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        students: students.iter().map(ToString::to_string).collect(),
        student_ids: None,
        faculty_id: None,
        technologies: technologies.iter().map(ToString::to_string).collect(),
        progress,
        status,
        last_updated,
        description: description.to_string(),
    }
}

/// The five sample projects.
pub fn mock_projects() -> Vec<Project> {
    vec![
        project(
            "1",
            "AI-Driven Traffic Management System",
            ["Alice Johnson", "Bob Smith"],
            ["Python", "YOLOv8", "OpenCV", "React"],
            75,
            ProjectStatus::OnTrack,
            date(2023, 10, 15),
            "Using computer vision to optimize traffic light timings at busy intersections.",
        ),
        project(
            "2",
            "Blockchain Based Supply Chain",
            ["Charlie Brown", "David Lee"],
            ["Solidity", "Ethereum", "Web3.js", "Node.js"],
            40,
            ProjectStatus::Delayed,
            date(2023, 10, 10),
            "A decentralized application to ensure transparency in logistics.",
        ),
        project(
            "3",
            "Smart IoT Infrastructure",
            ["Eva Green", "Frank White"],
            ["Arduino", "LoRaWAN", "C++", "Firebase"],
            90,
            ProjectStatus::Completed,
            date(2023, 9, 28),
            "Remote monitoring of environmental conditions.",
        ),
        project(
            "4",
            "AR Maintenance Assistant",
            ["Grace Hopper", "Ada Lovelace"],
            ["Unity", "ARFoundation", "C#", "Mapbox"],
            60,
            ProjectStatus::OnTrack,
            date(2023, 10, 18),
            "Augmented reality app to help technicians repair machinery.",
        ),
        project(
            "5",
            "Customer Sentiment Analysis",
            ["Ivan Drago", "Rocky Balboa"],
            ["Python", "NLTK", "Transformers", "Django"],
            20,
            ProjectStatus::AtRisk,
            date(2023, 10, 1),
            "Analyzing feedback to gauge product effectiveness.",
        ),
    ]
}

/// Admin, mentor and team member of the demo organization.
pub fn initial_users() -> Vec<User> {
    [
        ("u1", "Admin User", "admin@demo.com", UserRole::Admin),
        ("u2", "Mentor User", "mentor@demo.com", UserRole::Faculty),
        ("u3", "Team User", "team@demo.com", UserRole::Student),
    ]
    .into_iter()
    .map(|(id, name, email, role)| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        organization_id: DEMO_ORG_ID.to_string(),
        avatar: None,
    })
    .collect()
}

/// The organization the store starts in.
pub fn initial_organization() -> Organization {
    Organization {
        id: DEMO_ORG_ID.to_string(),
        name: "Demo Organization".to_string(),
        created_at: Utc::now(),
        mode: AppMode::Education,
    }
}
