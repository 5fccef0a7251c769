//! # Chatbot Crate
//!
//! Pattern-matched responder for the movie chat surface.
//!
//! Input is lowercased and walked through an ordered rule table; the first
//! matching rule wins. Five rules answer with a fixed reply, the last rule
//! captures a movie title from "i like <anything>" and delegates to the
//! recommendation engine. The responder keeps no state between calls: the
//! reply is a pure function of the input string and the read-only engine.

use lazy_static::lazy_static;
use regex::Regex;
use recommender::{Recommendation, RecommendationEngine};
use std::sync::Arc;
use tracing::debug;

/// What a matched rule answers with.
enum Reply {
    /// A canned response
    Fixed(&'static str),
    /// Capture group 1 is a movie title; ask the engine
    Recommend,
}

/// One row of the dispatch table.
struct Rule {
    pattern: Regex,
    reply: Reply,
}

const GREETING: &str = "Hello! How can I help you today?";
const HOW_ARE_YOU: &str = "I'm just a bot, but I'm doing great! How about you?";
const IDENTITY: &str = "I'm a simple chatbot created to assist you.";
const HELP: &str = "Sure, I'm here to help! You can ask me for movie recommendations \
                    by telling me a movie you like. For example, 'I like Titanic'.";
const FAREWELL: &str = "Goodbye! Have a great day!";
const NOT_UNDERSTOOD: &str = "I'm sorry, I didn't understand that. Can you please rephrase?";
const NO_RECOMMENDATIONS: &str = "I couldn't find any recommendations for this movie.";

/// How many titles a chat recommendation asks for.
const CHAT_RECOMMENDATIONS: usize = 5;

lazy_static! {
    /// The dispatch table, in priority order. Patterns are unanchored
    /// substring searches over the lowercased input, so e.g. the greeting
    /// rule fires on any input containing "hi", including words like "his".
    /// That looseness is part of the observable behavior.
    static ref RULES: Vec<Rule> = vec![
        Rule {
            pattern: Regex::new(r"hello|hi").unwrap(),
            reply: Reply::Fixed(GREETING),
        },
        Rule {
            pattern: Regex::new(r"how are you").unwrap(),
            reply: Reply::Fixed(HOW_ARE_YOU),
        },
        Rule {
            pattern: Regex::new(r"what is your name|who are you").unwrap(),
            reply: Reply::Fixed(IDENTITY),
        },
        Rule {
            pattern: Regex::new(r"help|can you recommend a movie|movie").unwrap(),
            reply: Reply::Fixed(HELP),
        },
        Rule {
            pattern: Regex::new(r"bye|goodbye").unwrap(),
            reply: Reply::Fixed(FAREWELL),
        },
        Rule {
            pattern: Regex::new(r"i like (.+)").unwrap(),
            reply: Reply::Recommend,
        },
    ];
}

/// The chat responder. Cheap to clone-by-Arc and share across sessions.
pub struct Responder {
    engine: Arc<RecommendationEngine>,
}

impl Responder {
    pub fn new(engine: Arc<RecommendationEngine>) -> Self {
        Self { engine }
    }

    /// Whether this input is a farewell (the shell uses this to end a chat
    /// session after printing the reply).
    pub fn is_farewell(&self, input: &str) -> bool {
        matches!(input.to_lowercase().as_str(), "bye" | "goodbye")
    }

    /// Answer one line of user input.
    pub fn respond(&self, input: &str) -> String {
        let input = input.to_lowercase();

        for (position, rule) in RULES.iter().enumerate() {
            if let Some(captures) = rule.pattern.captures(&input) {
                debug!(position, "rule matched");
                match rule.reply {
                    Reply::Fixed(text) => return text.to_string(),
                    Reply::Recommend => {
                        // Group 1 is the rest of the line, as typed (minus case)
                        let title = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
                        return self.recommend_reply(title);
                    }
                }
            }
        }

        NOT_UNDERSTOOD.to_string()
    }

    /// Format the engine's answer for the chat surface.
    fn recommend_reply(&self, title: &str) -> String {
        match self.engine.recommend(title, CHAT_RECOMMENDATIONS) {
            // The engine's canned not-found message goes out verbatim
            Recommendation::Fallback(picks) => picks.message(),
            Recommendation::Similar { titles, .. } if titles.is_empty() => {
                NO_RECOMMENDATIONS.to_string()
            }
            Recommendation::Similar { titles, .. } => {
                format!(
                    "If you like '{}', you might also enjoy:\n {}.",
                    title,
                    titles.join(",\n ")
                )
            }
        }
    }
}
