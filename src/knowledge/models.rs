//! Data models for the knowledge base

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ingested question/answer pair
///
/// Keywords are the lowercased words of the question longer than three
/// characters; they are recomputed whenever the question is rewritten.
/// Two items are equal when question and category match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqItem {
    question: String,
    answer: String,
    category: String,
    keywords: Vec<String>,
    relevance_score: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FaqItem {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let question = question.into();
        let keywords = Self::extract_keywords(&question);
        let now = Utc::now();

        Self {
            question,
            answer: answer.into(),
            category: category.into(),
            keywords,
            relevance_score: 1.0,
            created_at: now,
            updated_at: now,
        }
    }

    fn extract_keywords(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_whitespace()
            .filter(|word| word.len() > 3)
            .map(String::from)
            .collect()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// Rewrite the question, recomputing keywords and the updated timestamp
    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
        self.keywords = Self::extract_keywords(&self.question);
        self.updated_at = Utc::now();
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn set_answer(&mut self, answer: impl Into<String>) {
        self.answer = answer.into();
        self.updated_at = Utc::now();
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        self.updated_at = Utc::now();
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn relevance_score(&self) -> f64 {
        self.relevance_score
    }

    pub fn set_relevance_score(&mut self, score: f64) {
        self.relevance_score = score;
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Trim surrounding whitespace from question and answer in place
    pub fn trim(&mut self) {
        let question = self.question.trim().to_string();
        if question != self.question {
            self.set_question(question);
        }
        let answer = self.answer.trim().to_string();
        if answer != self.answer {
            self.set_answer(answer);
        }
    }
}

impl PartialEq for FaqItem {
    fn eq(&self, other: &Self) -> bool {
        self.question == other.question && self.category == other.category
    }
}

impl Eq for FaqItem {}
