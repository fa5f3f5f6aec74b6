//! Question bank: the static per-skill question list loaded once at startup.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

const BUNDLED_BANK: &str = include_str!("../../data/it_skill_questions.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question_id: String,
    pub skill: String,
    pub question: String,
}

/// Questions grouped by skill. Skill order is the order of first appearance
/// in the source file.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    skill_order: Vec<String>,
    by_skill: HashMap<String, Vec<Question>>,
}

impl QuestionBank {
    pub fn from_questions(questions: Vec<Question>) -> Self {
        let mut bank = QuestionBank::default();
        for question in questions {
            if !bank.by_skill.contains_key(&question.skill) {
                bank.skill_order.push(question.skill.clone());
            }
            bank.by_skill
                .entry(question.skill.clone())
                .or_default()
                .push(question);
        }
        bank
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let questions: Vec<Question> =
            serde_json::from_str(raw).context("Question bank is not a valid question list")?;
        Ok(Self::from_questions(questions))
    }

    /// Loads the bank from `path`, or the bundled bank when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let bank = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read question bank {}", path.display()))?;
                Self::from_json(&raw)
                    .with_context(|| format!("Failed to load question bank {}", path.display()))?
            }
            None => Self::from_json(BUNDLED_BANK)?,
        };
        info!(
            "Question bank loaded: {} skills, {} questions",
            bank.skill_order.len(),
            bank.len()
        );
        Ok(bank)
    }

    pub fn skills(&self) -> &[String] {
        &self.skill_order
    }

    pub fn questions(&self, skill: &str) -> Option<&[Question]> {
        self.by_skill.get(skill).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.by_skill.values().map(Vec::len).sum()
    }

    /// Up to `count` distinct questions for `skill`, in random order.
    /// `None` when the skill is not in the bank.
    pub fn sample<R: Rng + ?Sized>(&self, skill: &str, count: usize, rng: &mut R) -> Option<Vec<Question>> {
        let questions = self.by_skill.get(skill)?;
        let take = count.min(questions.len());
        Some(questions.choose_multiple(rng, take).cloned().collect())
    }
}
