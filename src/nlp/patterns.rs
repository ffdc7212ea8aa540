//! Canned responses for common queries

use crate::error::Result;
use chrono::Local;
use regex::Regex;
use tracing::debug;

/// Reply attached to a pattern
///
/// Time and date replies are rendered when the pattern fires, not when the
/// matcher is constructed, so the answer is always current.
enum CannedReply {
    Fixed(&'static str),
    CurrentTime,
    CurrentDate,
}

/// First-match lookup over an ordered list of (regex, reply) pairs
pub struct PatternMatcher {
    patterns: Vec<(Regex, CannedReply)>,
}

impl PatternMatcher {
    pub fn new() -> Result<Self> {
        let patterns = vec![
            (Regex::new(r"(?i)what.*(time|clock)")?, CannedReply::CurrentTime),
            (Regex::new(r"(?i)what.*(date|today)")?, CannedReply::CurrentDate),
            (
                Regex::new(r"\d+\s*[+\-*/]\s*\d+")?,
                CannedReply::Fixed(
                    "I can see you're asking about math! For calculations, I'd recommend using a calculator.",
                ),
            ),
            (
                Regex::new(r"(?i)weather|temperature|rain|sunny|cloudy")?,
                CannedReply::Fixed(
                    "I don't have access to real-time weather data. Please check a weather app or website.",
                ),
            ),
            (
                Regex::new(r"(?i)what.*(your name|are you called)")?,
                CannedReply::Fixed(
                    "I'm an AI assistant created to help answer your questions and have conversations!",
                ),
            ),
            (
                Regex::new(r"(?i)what.*can.*you.*do")?,
                CannedReply::Fixed(
                    "I can help with questions, provide information, assist with programming concepts, and have conversations!",
                ),
            ),
        ];

        Ok(Self { patterns })
    }

    /// Return the reply for the first pattern that matches anywhere in the
    /// input, or `None` when nothing matches
    pub fn matches(&self, text: &str) -> Option<String> {
        for (pattern, reply) in &self.patterns {
            if pattern.is_match(text) {
                debug!(pattern = pattern.as_str(), "canned pattern matched");
                return Some(match reply {
                    CannedReply::Fixed(reply) => (*reply).to_string(),
                    CannedReply::CurrentTime => {
                        format!("The current time is {}", Local::now().format("%H:%M"))
                    }
                    CannedReply::CurrentDate => {
                        format!("Today is {}", Local::now().format("%B %d, %Y"))
                    }
                });
            }
        }
        None
    }
}
