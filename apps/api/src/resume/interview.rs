//! Offline interview helpers used by the dashboard: skill-driven questions
//! and keyword-driven feedback. No LLM involved.

pub const INTERVIEW_LENGTH: usize = 10;

const SKILLS_QUESTIONED: usize = 5;
const SKILLS_PRAISED: usize = 3;

const GENERAL_QUESTIONS: &[&str] = &[
    "What motivated you to pursue a career in technology?",
    "Describe a situation where you had to work in a team to solve a technical problem.",
    "What is your approach to debugging complex issues in code?",
    "How do you prioritize tasks when working on multiple projects?",
    "What tools or methodologies do you use for version control and collaboration?",
    "Can you explain a technical concept from your resume in simple terms?",
    "What are your short-term and long-term career goals in the technology field?",
    "How do you handle tight deadlines and high-pressure situations?",
    "What's the most challenging technical problem you've solved, and what did you learn from it?",
    "How do you approach learning new technologies and programming languages?",
];

const TECHNICAL_TERMS: &[&str] = &["project", "team", "debug", "solution", "implement", "design", "develop"];
const BEHAVIORAL_TERMS: &[&str] = &["communicate", "collaborate", "lead", "manage", "organize", "prioritize"];

/// Exactly ten questions: three per skill for the first five skills, then
/// general questions until the interview is full.
pub fn personalized_questions(skills: &[String]) -> Vec<String> {
    let mut questions: Vec<String> = skills
        .iter()
        .take(SKILLS_QUESTIONED)
        .flat_map(|skill| {
            [
                format!("Can you describe a challenging project you worked on using {skill} and how you overcame obstacles?"),
                format!("What are your strengths and areas for improvement in {skill}?"),
                format!("How do you stay updated with the latest trends and best practices in {skill}?"),
            ]
        })
        .collect();

    let missing = INTERVIEW_LENGTH.saturating_sub(questions.len());
    questions.extend(GENERAL_QUESTIONS.iter().take(missing).map(|q| q.to_string()));
    questions.truncate(INTERVIEW_LENGTH);
    questions
}

pub fn personalized_recommendations(answers: &[String], skills: &[String]) -> String {
    let answer_text = answers
        .iter()
        .filter(|a| !a.trim().is_empty())
        .map(|a| a.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let mentions_any = |terms: &[&str]| terms.iter().any(|t| answer_text.contains(t));

    let mut out = String::from("Based on your resume analysis and responses, here are my recommendations:\n\n");

    if !skills.is_empty() {
        let top: Vec<&str> = skills.iter().take(SKILLS_PRAISED).map(String::as_str).collect();
        out.push_str(&format!(
            "• You have experience in {}. Focus on highlighting specific projects and achievements with these technologies in your job applications.\n",
            top.join(", ")
        ));
    }

    if mentions_any(TECHNICAL_TERMS) {
        out.push_str("• You demonstrate strong technical communication skills. Continue developing this by contributing to technical blogs or documentation.\n");
    } else {
        out.push_str("• Work on providing more specific technical details when describing your projects and experiences.\n");
    }

    if mentions_any(BEHAVIORAL_TERMS) {
        out.push_str("• You show good awareness of teamwork and collaboration. Emphasize leadership experiences in your interviews.\n");
    } else {
        out.push_str("• Practice articulating your teamwork and leadership experiences more clearly.\n");
    }

    out.push_str("\nGeneral improvement areas:\n");
    out.push_str("• Practice explaining complex technical concepts in simple terms\n");
    out.push_str("• Prepare specific examples from your projects to demonstrate your capabilities\n");
    out.push_str("• Research the companies you're applying to and tailor your responses accordingly\n");
    out.push_str("• Continue learning and staying updated with industry trends\n");
    out
}
