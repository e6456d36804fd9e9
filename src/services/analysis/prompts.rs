//! System instructions and user prompts for the analysis operations.

use crate::simulation::{AppMode, Term};

/// Separator sent between the previous and the current report.
pub const PREVIOUS_REPORT_MARKER: &str = " [END OF PREVIOUS REPORT] ";

fn pick(mode: AppMode, education: &'static str, organization: &'static str) -> &'static str {
    match mode {
        AppMode::Education => education,
        AppMode::Organization => organization,
    }
}

/// Instruction for extracting a structured summary from a single report.
pub fn analyzer_instruction(mode: AppMode) -> String {
    format!(
        "
You are ProjectRadar, an expert project analyzer for {audience}.
Analyze the provided project report (text or image) and extract:
1. Project Title
2. {members}
3. Technologies Used
4. Problem Statement
5. Objectives
6. Methodology / Strategy
7. Current Progress (%)
8. Tasks Completed This Month
9. Pending Tasks
10. Risks/Blockers
11. {supervisor} Comments (if any)
12. AI Suggested Next Steps
13. One-line Elevator Pitch
14. 10-Point Summary

Format output in clean Markdown. Be professional, {register}, and accurate.
",
        audience = pick(mode, "academic institutions", "corporate organizations"),
        members = pick(mode, "Team Members & Branch/Year", "Team Members & Role"),
        supervisor = Term::Faculty.label(mode),
        register = pick(mode, "academic", "business-oriented"),
    )
}

/// Instruction for comparing last month's report with this month's.
pub fn recall_instruction(mode: AppMode) -> String {
    format!(
        "
You are ProjectRadar's {supervisor} Memory Recall module.
Compare the 'Last Month' report with the 'This Month' report.
Produce:
1. Difference Summary (\"What changed\")
2. Completion % Delta
3. Progress Indicators (Good/Bad)
4. Newly Added Tasks
5. Missed Deadlines
6. Insights for Evaluation
7. Suggested Remarks for the Team
8. Suggested Questions to Ask
9. 15-second \"Quick Recall\" Briefing for the {reader}
",
        supervisor = Term::Faculty.label(mode),
        reader = pick(mode, "Professor", "Manager"),
    )
}

/// Instruction for mentoring feedback on a report.
pub fn feedback_instruction(mode: AppMode) -> String {
    format!(
        "
You are ProjectRadar's {persona}.
Provide constructive feedback on the uploaded report:
1. Constructive Feedback
2. Improvements Required
3. Quality Rating (1-5 Stars)
4. {evaluation}
5. Unique Feature Suggestions
6. Next Milestones
7. Recommended Resources (Links/Topics)

Tone: {tone}.
",
        persona = pick(mode, "Student Mentor", "Team Coach"),
        evaluation = pick(mode, "Novelty Evaluation", "Innovation & Impact Score"),
        tone = pick(
            mode,
            "Encouraging, Academic, Instructional",
            "Professional, Result-Oriented, Efficient"
        ),
    )
}

/// `Analyze this project report.` in the mode's vocabulary.
pub fn analyze_prompt(mode: AppMode) -> String {
    format!(
        "Analyze this {} report.",
        Term::Project.label(mode).to_lowercase()
    )
}

/// `Provide faculty feedback for this report.` in the mode's vocabulary.
pub fn feedback_prompt(mode: AppMode) -> String {
    format!(
        "Provide {} feedback for this report.",
        Term::Faculty.label(mode).to_lowercase()
    )
}

/// Trailing instruction of a report comparison.
pub fn comparison_prompt() -> &'static str {
    "
  Compare these two documents. 
  Document 1 is the PREVIOUS MONTH report. 
  Document 2 is the CURRENT MONTH report.
  Perform the Faculty Recall analysis.
  "
}

/// Search prompt embedding the project database as JSON.
pub fn search_prompt(query: &str, projects_json: &str) -> String {
    format!(
        "
    You are an intelligent database interface.
    Here is the current project database in JSON format:
    {projects_json}

    The user is searching for: \"{query}\"

    Return a list of matching projects with a brief summary for each.
    Also suggest 2-3 faculty members who might be experts in these domains.
    Format as Markdown.
    If no matches, suggest related topics.
    "
    )
}
