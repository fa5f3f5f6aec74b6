//! Answer scoring, per-skill breakdowns and the canned recommendation texts.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

pub const GENERAL_SKILL: &str = "General";

/// One answered question as reported by the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerRecord {
    #[serde(default, alias = "questionId")]
    pub question_id: Option<String>,
    #[serde(default)]
    pub question: String,
    #[serde(default, alias = "selectedOption")]
    pub selected_option: Option<usize>,
    #[serde(default)]
    pub correct: bool,
    #[serde(default)]
    pub skill: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillScore {
    pub skill: String,
    pub correct: usize,
    pub total: usize,
    pub percentage: f64,
}

/// Performance band used by every tiered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    NeedsWork,
    Good,
    Excellent,
}

impl Band {
    pub fn of(percentage: f64) -> Self {
        if percentage < 60.0 {
            Band::NeedsWork
        } else if percentage < 80.0 {
            Band::Good
        } else {
            Band::Excellent
        }
    }
}

fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    }
}

pub fn score(answers: &[AnswerRecord]) -> Score {
    let correct = answers.iter().filter(|a| a.correct).count();
    Score {
        correct,
        total: answers.len(),
        percentage: percentage(correct, answers.len()),
    }
}

/// Groups answers by skill in first-seen order. Answers without a skill count
/// towards `General`.
pub fn skill_breakdown(answers: &[AnswerRecord]) -> Vec<SkillScore> {
    let mut breakdown: Vec<SkillScore> = Vec::new();
    for answer in answers {
        let skill = answer
            .skill
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(GENERAL_SKILL);
        let idx = match breakdown.iter().position(|s| s.skill == skill) {
            Some(idx) => idx,
            None => {
                breakdown.push(SkillScore {
                    skill: skill.to_string(),
                    correct: 0,
                    total: 0,
                    percentage: 0.0,
                });
                breakdown.len() - 1
            }
        };
        let entry = &mut breakdown[idx];
        entry.total += 1;
        if answer.correct {
            entry.correct += 1;
        }
    }
    for entry in &mut breakdown {
        entry.percentage = percentage(entry.correct, entry.total);
    }
    breakdown
}

/// "Python: 3/5 (60.0%)" lines, as fed to the recommendation prompt.
pub fn performance_summary(breakdown: &[SkillScore]) -> String {
    breakdown.iter().fold(String::new(), |mut out, s| {
        let _ = writeln!(out, "{}: {}/{} ({:.1}%)", s.skill, s.correct, s.total, s.percentage);
        out
    })
}

/// Recommendation used when no LLM is available or the call failed.
pub fn fallback_recommendation(skill: &str, percentage: f64) -> String {
    match Band::of(percentage) {
        Band::NeedsWork => format!(
            "To strengthen your {skill} skills, focus on core concepts and practice foundational problems regularly. Consider reviewing basic syntax and data structures."
        ),
        Band::Good => format!(
            "Your {skill} knowledge is solid but can be enhanced. Target specific weak areas and tackle more complex challenges to improve."
        ),
        Band::Excellent => format!(
            "Excellent work in {skill}! To maintain your proficiency, explore advanced topics and real-world applications."
        ),
    }
}

/// Recommendation used when the LLM answered but returned nothing usable.
pub fn brief_recommendation(skill: &str, percentage: f64) -> String {
    match Band::of(percentage) {
        Band::NeedsWork => {
            format!("You need to improve in {skill}. Focus on fundamental concepts.")
        }
        Band::Good => format!(
            "Good performance in {skill}, but there's room for improvement. Practice more problems."
        ),
        Band::Excellent => format!(
            "Excellent performance in {skill}! Continue challenging yourself with advanced topics."
        ),
    }
}

// Checked in order; "C" is last because it is a substring of other names.
const STUDY_RESOURCES: &[(&str, &str)] = &[
    ("Python", "Python: Complete Python documentation, Automate the Boring Stuff with Python"),
    ("Java", "Java: Oracle's Java Tutorials, Effective Java by Joshua Bloch"),
    ("Data Structures", "Data Structures: Introduction to Algorithms by Cormen et al."),
    ("SQL", "SQL: SQL Cookbook by Anthony Molinaro"),
    ("Machine Learning", "Machine Learning: Hands-On Machine Learning by Aurélien Géron"),
    ("Operating System", "Operating Systems: Operating System Concepts by Silberschatz et al."),
    ("Web Development", "Web Development: MDN Web Docs, freeCodeCamp tutorials"),
    ("C", "C Programming: The C Programming Language by Kernighan and Ritchie"),
];

pub fn study_resource(skill: &str) -> String {
    STUDY_RESOURCES
        .iter()
        .find(|(needle, _)| skill.contains(needle))
        .map(|(_, resource)| resource.to_string())
        .unwrap_or_else(|| format!("{skill}: Search for online courses and tutorials on {skill}"))
}

/// Dashboard results text: overall feedback, per-skill lines and study
/// resources for the first three selected skills.
pub fn assessment_report(percentage: f64, breakdown: &[SkillScore], selected_skills: &[String]) -> String {
    let mut report = String::new();

    report.push_str(match Band::of(percentage) {
        Band::NeedsWork => "You need to improve in the selected skills. Focus on fundamental concepts and practice more problems.\n\n",
        Band::Good => "Good performance, but there's room for improvement. Practice more problems and review advanced topics.\n\n",
        Band::Excellent => "Excellent performance! Continue challenging yourself with advanced topics and real-world projects.\n\n",
    });

    if !breakdown.is_empty() {
        report.push_str("Skill-specific recommendations:\n");
        for s in breakdown {
            let advice = match Band::of(s.percentage) {
                Band::NeedsWork => "Focus on fundamental concepts. Review basics and practice more problems.",
                Band::Good => "Good understanding but needs improvement. Practice advanced problems.",
                Band::Excellent => "Strong understanding. Challenge yourself with complex problems.",
            };
            let _ = writeln!(report, "• {}: {advice}", s.skill);
        }
    }

    report.push_str("\nRecommended study resources:\n");
    for skill in selected_skills.iter().take(3) {
        let _ = writeln!(report, "• {}", study_resource(skill));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(skill: Option<&str>, correct: bool) -> AnswerRecord {
        AnswerRecord {
            skill: skill.map(String::from),
            correct,
            ..AnswerRecord::default()
        }
    }

    #[test]
    fn test_score_empty_is_zero() {
        let s = score(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.percentage, 0.0);
    }

    #[test]
    fn test_score_percentage() {
        let answers = [answer(None, true), answer(None, false), answer(None, true), answer(None, true)];
        let s = score(&answers);
        assert_eq!(s.correct, 3);
        assert!((s.percentage - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_breakdown_preserves_order_and_defaults_general() {
        let answers = [
            answer(Some("Java"), true),
            answer(None, false),
            answer(Some("Java"), false),
            answer(Some(""), true),
        ];
        let b = skill_breakdown(&answers);
        assert_eq!(b.len(), 2);
        assert_eq!(b[0].skill, "Java");
        assert_eq!((b[0].correct, b[0].total), (1, 2));
        assert_eq!(b[1].skill, GENERAL_SKILL);
        assert_eq!((b[1].correct, b[1].total), (1, 2));
        assert!((b[1].percentage - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_performance_summary_format() {
        let b = skill_breakdown(&[answer(Some("SQL + DBMS"), true), answer(Some("SQL + DBMS"), false), answer(Some("SQL + DBMS"), false)]);
        assert_eq!(performance_summary(&b), "SQL + DBMS: 1/3 (33.3%)\n");
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(Band::of(59.9), Band::NeedsWork);
        assert_eq!(Band::of(60.0), Band::Good);
        assert_eq!(Band::of(79.9), Band::Good);
        assert_eq!(Band::of(80.0), Band::Excellent);
    }

    #[test]
    fn test_fallback_recommendation_mentions_skill() {
        assert!(fallback_recommendation("Java", 10.0).starts_with("To strengthen your Java skills"));
        assert!(fallback_recommendation("Java", 70.0).starts_with("Your Java knowledge is solid"));
        assert!(fallback_recommendation("Java", 95.0).starts_with("Excellent work in Java!"));
    }

    #[test]
    fn test_brief_recommendation() {
        assert_eq!(
            brief_recommendation("Python", 20.0),
            "You need to improve in Python. Focus on fundamental concepts."
        );
    }

    #[test]
    fn test_study_resource_web_is_not_c() {
        assert!(study_resource("Web Development (HTML/CSS/JS + Basics React)").starts_with("Web Development:"));
        assert!(study_resource("C Programming").starts_with("C Programming:"));
        assert_eq!(
            study_resource("Rust"),
            "Rust: Search for online courses and tutorials on Rust"
        );
    }

    #[test]
    fn test_assessment_report_sections() {
        let breakdown = skill_breakdown(&[answer(Some("Python"), true), answer(Some("Java"), false)]);
        let selected: Vec<String> = ["Python", "Java", "SQL + DBMS", "Operating System"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let report = assessment_report(50.0, &breakdown, &selected);

        assert!(report.starts_with("You need to improve in the selected skills."));
        assert!(report.contains("• Python: Strong understanding."));
        assert!(report.contains("• Java: Focus on fundamental concepts."));
        assert!(report.contains("• SQL: SQL Cookbook"));
        assert!(!report.contains("Operating System Concepts"));
    }

    #[test]
    fn test_answer_record_accepts_camel_case() {
        let raw = r#"{"questionId": "py-01", "question": "Q", "selectedOption": 2, "correct": true, "skill": "Python"}"#;
        let record: AnswerRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.question_id.as_deref(), Some("py-01"));
        assert_eq!(record.selected_option, Some(2));
        assert!(record.correct);
    }
}
