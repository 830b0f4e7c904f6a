//! Offline, rule-based planning used when the model cannot be relied on.
//!
//! Extraction is pattern matching over a small fixed vocabulary. It sits
//! behind [`TaskExtractor`] so a smarter extractor can replace it without
//! touching the planner.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{Plan, Step};

/// Cities recognised by the keyword extractor, in priority order.
const KNOWN_CITIES: &[&str] = &["mumbai", "delhi", "pune", "bangalore", "chennai"];

/// Phrases that introduce a news topic, tried in order.
const TOPIC_PATTERNS: &[&str] = &[
    r"news about (.+)",
    r"updates on (.+)",
    r"headlines about (.+)",
    r"recent news about (.+)",
    r"latest news about (.+)",
];

pub const DEFAULT_CITY: &str = "Mumbai";
pub const DEFAULT_TOPIC: &str = "Artificial Intelligence";

pub const WEATHER_ACTION: &str = "weather_tool";
pub const NEWS_ACTION: &str = "news_tool";

/// Pulls planning hints out of free text.
pub trait TaskExtractor: Send + Sync {
    /// City the user asked about, if any.
    fn city(&self, text: &str) -> Option<String>;

    /// News topic the user asked about, if one is spelled out.
    fn news_topic(&self, text: &str) -> Option<String>;
}

/// Fixed-vocabulary keyword and regex extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordExtractor;

impl TaskExtractor for KeywordExtractor {
    fn city(&self, text: &str) -> Option<String> {
        let lower = text.to_lowercase();
        KNOWN_CITIES
            .iter()
            .find(|city| lower.contains(*city))
            .map(|city| capitalize(city))
    }

    fn news_topic(&self, text: &str) -> Option<String> {
        let lower = text.to_lowercase();
        topic_patterns()
            .iter()
            .find_map(|re| re.captures(&lower))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }
}

fn topic_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        TOPIC_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect()
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build a plan from `user_task` without consulting the model.
///
/// Emits a weather step when a city is recognised and a news step when the
/// text mentions "news", weather first. Never returns an empty plan.
pub fn rule_based_plan(extractor: &dyn TaskExtractor, user_task: &str) -> Plan {
    let mut steps = Vec::new();

    if let Some(city) = extractor.city(user_task) {
        steps.push(Step::with_param(WEATHER_ACTION, "city", city));
    }

    if user_task.to_lowercase().contains("news") {
        let topic = extractor
            .news_topic(user_task)
            .unwrap_or_else(|| DEFAULT_TOPIC.to_string());
        steps.push(Step::with_param(NEWS_ACTION, "query", topic));
    }

    if steps.is_empty() {
        steps.push(Step::with_param(WEATHER_ACTION, "city", DEFAULT_CITY));
    }

    Plan::new(steps)
}
