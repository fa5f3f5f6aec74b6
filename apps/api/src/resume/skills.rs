//! Keyword-based skill extraction from resume text.
//!
//! Two passes: every known skill found anywhere in the text (0.9), then
//! skills implied by fragments of an explicit skills section (0.8).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const TEXT_MATCH_CONFIDENCE: f32 = 0.9;
pub const SECTION_MATCH_CONFIDENCE: f32 = 0.8;

/// Shorter names ("C", "R", "Go") only count as whole tokens.
const MIN_SECTION_SUBSTRING_LEN: usize = 3;

pub const KNOWN_SKILLS: &[&str] = &[
    // Programming languages
    "Python", "Java", "C++", "C#", "JavaScript", "TypeScript", "PHP", "Ruby", "Go", "Rust",
    "Swift", "Kotlin", "Scala", "R", "MATLAB", "SQL", "HTML", "CSS", "C",
    // Web frameworks
    "React", "Angular", "Vue", "Node.js", "Express", "Django", "Flask", "Spring", "ASP.NET",
    "Ruby on Rails", "Laravel", "Bootstrap", "jQuery", "Ajax",
    // Databases
    "MySQL", "PostgreSQL", "MongoDB", "Oracle", "SQL Server", "Redis", "Firebase",
    "Elasticsearch", "Cassandra", "DynamoDB",
    // Cloud and DevOps
    "AWS", "Azure", "Google Cloud", "Docker", "Kubernetes", "Jenkins", "Git", "GitHub",
    "GitLab", "CI/CD", "Terraform", "Ansible", "Puppet",
    // Data science and ML
    "TensorFlow", "PyTorch", "Keras", "Scikit-learn", "Pandas", "NumPy", "Matplotlib",
    "Seaborn", "Jupyter", "Spark", "Hadoop", "Tableau", "Power BI",
    // Mobile
    "Android", "iOS", "React Native", "Flutter", "Xamarin", "Ionic",
    // Operating systems
    "Linux", "Unix", "Windows", "macOS",
    // Other
    "Blockchain", "IoT", "Cybersecurity", "DevOps", "Agile", "Scrum",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkill {
    pub name: String,
    pub confidence: f32,
}

/// One case-insensitive matcher per known skill. A hit must not be glued to
/// another identifier character, so "Java" does not fire inside "JavaScript"
/// and "C" does not fire inside every word.
static SKILL_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    KNOWN_SKILLS
        .iter()
        .map(|&skill| {
            let pattern = format!(
                r"(?i)(?:^|[^a-z0-9+#.]){}(?:$|[^a-z0-9+#])",
                regex::escape(skill)
            );
            let re = Regex::new(&pattern).expect("skill pattern is valid");
            (skill, re)
        })
        .collect()
});

static SECTION_HEADERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["skills", "technical skills", "competencies", "proficiencies"]
        .iter()
        .map(|h| Regex::new(&format!(r"(?i){h}\s*[:\-]?")).expect("section header pattern is valid"))
        .collect()
});

/// A blank line or a "Word:" line ends the section.
static SECTION_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\n\n|\n[a-z]+:").expect("section end pattern is valid"));

static FRAGMENT_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\n,;]").expect("fragment split pattern is valid"));

pub fn extract_skills(text: &str) -> Vec<ExtractedSkill> {
    let mut found: Vec<ExtractedSkill> = SKILL_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(skill, _)| ExtractedSkill {
            name: (*skill).to_string(),
            confidence: TEXT_MATCH_CONFIDENCE,
        })
        .collect();

    if let Some(section) = skills_section(text) {
        for fragment in FRAGMENT_SPLIT.split(section) {
            let Some(skill) = skill_in_fragment(fragment) else {
                continue;
            };
            if !found.iter().any(|s| s.name.eq_ignore_ascii_case(skill)) {
                found.push(ExtractedSkill {
                    name: skill.to_string(),
                    confidence: SECTION_MATCH_CONFIDENCE,
                });
            }
        }
    }

    found
}

/// Body of the first recognised skills header, in header priority order.
fn skills_section(text: &str) -> Option<&str> {
    SECTION_HEADERS.iter().find_map(|header| {
        let m = header.find(text)?;
        let rest = &text[m.end()..];
        let end = SECTION_END.find(rest).map(|e| e.start()).unwrap_or(rest.len());
        let section = rest[..end].trim();
        (!section.is_empty()).then_some(section)
    })
}

/// Longest known skill a fragment mentions, so "PostgreSQL" is not read as
/// "SQL". Inside a skills section longer names may also appear as part of a
/// word ("ReactJS").
fn skill_in_fragment(fragment: &str) -> Option<&'static str> {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return None;
    }
    let lower = fragment.to_lowercase();
    SKILL_PATTERNS
        .iter()
        .filter(|(skill, re)| {
            let substring_hit =
                skill.len() >= MIN_SECTION_SUBSTRING_LEN && lower.contains(&skill.to_lowercase());
            substring_hit || re.is_match(fragment)
        })
        .map(|(skill, _)| *skill)
        .max_by_key(|skill| skill.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(skills: &[ExtractedSkill]) -> Vec<&str> {
        skills.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_whole_text_matches_are_token_aware() {
        let skills = extract_skills("Built services in JavaScript and Go, deployed with Docker.");
        let found = names(&skills);
        assert!(found.contains(&"JavaScript"));
        assert!(found.contains(&"Go"));
        assert!(found.contains(&"Docker"));
        assert!(!found.contains(&"Java"));
        assert!(!found.contains(&"C"));
        assert!(!found.contains(&"R"));
        assert!(skills.iter().all(|s| s.confidence == TEXT_MATCH_CONFIDENCE));
    }

    #[test]
    fn test_symbol_skills_match() {
        let found = extract_skills("Languages: C++, C#, and plain C. Also Node.js and CI/CD.");
        let found = names(&found);
        for skill in ["C++", "C#", "C", "Node.js", "CI/CD"] {
            assert!(found.contains(&skill), "missing {skill}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        let found = extract_skills("experienced with KUBERNETES and tensorflow");
        let found = names(&found);
        assert!(found.contains(&"Kubernetes"));
        assert!(found.contains(&"TensorFlow"));
    }

    #[test]
    fn test_section_pass_adds_implied_skills() {
        let text = "John Doe\nSkills: ReactJS, Pythonic design\n\nExperience:\nWorked a lot.";
        let skills = extract_skills(text);
        let react = skills.iter().find(|s| s.name == "React").unwrap();
        assert_eq!(react.confidence, SECTION_MATCH_CONFIDENCE);
        let python = skills.iter().find(|s| s.name == "Python").unwrap();
        assert_eq!(python.confidence, SECTION_MATCH_CONFIDENCE);
    }

    #[test]
    fn test_fragment_prefers_longest_skill() {
        assert_eq!(skill_in_fragment(" JavaScript "), Some("JavaScript"));
        assert_eq!(skill_in_fragment("PostgreSQL"), Some("PostgreSQL"));
        assert_eq!(skill_in_fragment("MySQLWorkbench"), Some("MySQL"));
        assert_eq!(skill_in_fragment("hiking"), None);
    }

    #[test]
    fn test_section_pass_skips_shorter_names_inside_longer_ones() {
        let text = "Skills: JavaScript, PostgreSQL\n\nExperience:\nWorked a lot.";
        let skills = extract_skills(text);
        let found = names(&skills);
        assert!(found.contains(&"JavaScript"));
        assert!(found.contains(&"PostgreSQL"));
        assert!(!found.contains(&"Java"));
        assert!(!found.contains(&"SQL"));
    }

    #[test]
    fn test_section_pass_does_not_duplicate() {
        let text = "Technical Skills: Python, Rust\n\nEducation:\nBSc";
        let skills = extract_skills(text);
        assert_eq!(skills.iter().filter(|s| s.name == "Python").count(), 1);
        assert_eq!(skills.iter().find(|s| s.name == "Rust").unwrap().confidence, TEXT_MATCH_CONFIDENCE);
    }

    #[test]
    fn test_section_ends_at_next_header() {
        let text = "Skills: Rust\nProjects: a ReactJS dashboard";
        assert_eq!(skills_section(text), Some("Rust"));
    }

    #[test]
    fn test_no_skills() {
        assert!(extract_skills("I enjoy hiking and cooking.").is_empty());
    }
}
