//! Rule-based chat responder
//!
//! Maps one utterance to exactly one canned advisory text.
//! - Greedy first match over an ordered topic table (no scoring)
//! - Within a topic, the first refinement rule that matches wins
//! - Nothing matches → the global capabilities overview
//!
//! Matching is case-insensitive substring containment over a Unicode-aware
//! lowercase form of the input, so Devanagari terms match as written.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

mod rules;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Greeting,
    Banking,
    Investment,
    Loan,
    GovernmentScheme,
    Savings,
    DigitalPayment,
    Tax,
    Insurance,
    Retirement,
    GoalPlanning,
}

/// Refinement inside a topic: any term present → this response.
#[derive(Debug, Clone)]
pub struct SubRule {
    pub refinement_terms: Vec<String>,
    pub response: String,
}

#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub topic: Topic,
    pub trigger_terms: Vec<String>,
    pub sub_rules: Vec<SubRule>,
    pub default_response: String,
}

/// Which branch of the table produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Index into the topic's `sub_rules`.
    SubRule(usize),
    TopicDefault,
    Fallback,
}

#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub topic: Option<Topic>,
    pub kind: MatchKind,
    pub response: &'a str,
}

pub struct ResponseSelector {
    rules: Vec<KeywordRule>,
    fallback: String,
}

lazy_static! {
    static ref DEFAULT_SELECTOR: ResponseSelector = ResponseSelector::builtin();
}

/// Select a reply with the built-in rule table.
pub fn select_response(utterance: &str) -> String {
    DEFAULT_SELECTOR.select(utterance).to_string()
}

/// Shared instance of the built-in table, built on first use.
pub fn default_selector() -> &'static ResponseSelector {
    &DEFAULT_SELECTOR
}

/// First message an assistant shows when a session opens.
pub fn welcome_message() -> &'static str {
    rules::WELCOME_MESSAGE
}

impl ResponseSelector {
    /// Rules are evaluated in the order given.
    pub fn new(rules: Vec<KeywordRule>, fallback: impl Into<String>) -> Self {
        let rules = rules.into_iter().map(normalize_rule).collect();
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// Built-in bilingual (English / Hindi) advisory table.
    pub fn builtin() -> Self {
        let rules = rules::RULES
            .iter()
            .map(|def| KeywordRule {
                topic: def.topic,
                trigger_terms: to_owned_terms(def.triggers),
                sub_rules: def
                    .sub_rules
                    .iter()
                    .map(|sub| SubRule {
                        refinement_terms: to_owned_terms(sub.refinements),
                        response: sub.response.to_string(),
                    })
                    .collect(),
                default_response: def.default_response.to_string(),
            })
            .collect();

        Self::new(rules, rules::FALLBACK_RESPONSE)
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Response text for an utterance. Never empty, never fails.
    pub fn select(&self, utterance: &str) -> &str {
        self.classify(utterance).response
    }

    /// Full selection, including which topic and branch fired.
    pub fn classify(&self, utterance: &str) -> Selection<'_> {
        let normalized = utterance.to_lowercase();

        for rule in &self.rules {
            if !contains_any(&normalized, &rule.trigger_terms) {
                continue;
            }

            let selection = match rule
                .sub_rules
                .iter()
                .position(|sub| contains_any(&normalized, &sub.refinement_terms))
            {
                Some(index) => Selection {
                    topic: Some(rule.topic),
                    kind: MatchKind::SubRule(index),
                    response: &rule.sub_rules[index].response,
                },
                None => Selection {
                    topic: Some(rule.topic),
                    kind: MatchKind::TopicDefault,
                    response: &rule.default_response,
                },
            };

            debug!(topic = %rule.topic, kind = ?selection.kind, "Responder matched topic");
            return selection;
        }

        debug!("Responder fell back to overview");
        Selection {
            topic: None,
            kind: MatchKind::Fallback,
            response: &self.fallback,
        }
    }
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self::builtin()
    }
}

fn to_owned_terms(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

/// Terms are compared against lowercased input, so store them lowercased too.
fn normalize_rule(mut rule: KeywordRule) -> KeywordRule {
    rule.trigger_terms = normalize_terms(rule.trigger_terms);
    for sub in &mut rule.sub_rules {
        sub.refinement_terms = normalize_terms(std::mem::take(&mut sub.refinement_terms));
    }
    rule
}

fn normalize_terms(terms: Vec<String>) -> Vec<String> {
    terms
        .into_iter()
        .map(|t| t.to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

fn contains_any(text: &str, terms: &[String]) -> bool {
    terms.iter().any(|term| text.contains(term.as_str()))
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Topic::Greeting => "greeting",
            Topic::Banking => "banking",
            Topic::Investment => "investment",
            Topic::Loan => "loan",
            Topic::GovernmentScheme => "government_scheme",
            Topic::Savings => "savings",
            Topic::DigitalPayment => "digital_payment",
            Topic::Tax => "tax",
            Topic::Insurance => "insurance",
            Topic::Retirement => "retirement",
            Topic::GoalPlanning => "goal_planning",
        };
        write!(f, "{}", s)
    }
}
