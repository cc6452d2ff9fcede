//! Setup-readiness quiz scoring.
//!
//! Answers naming an unknown question or option are ignored, as are
//! unanswered questions.

use super::bands::{BandTable, ScoreBand};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

/// Selected option id by question id
pub type QuizAnswerSet = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOption {
    pub id: &'static str,
    pub label: &'static str,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: &'static [QuizOption],
}

impl QuizQuestion {
    pub fn option(&self, id: &str) -> Option<&'static QuizOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn max_score(&self) -> u32 {
        self.options.iter().map(|o| o.score).max().unwrap_or(0)
    }
}

const fn opt(id: &'static str, label: &'static str, score: u32) -> QuizOption {
    QuizOption { id, label, score }
}

pub static QUESTIONS: &[QuizQuestion] = &[
    QuizQuestion {
        id: "timeline",
        prompt: "When do you plan to start operating in Spain?",
        options: &[
            opt("exploring", "Just exploring", 0),
            opt("within-12-months", "Within the next 12 months", 1),
            opt("within-6-months", "Within the next 6 months", 4),
            opt("already-operating", "Already operating", 5),
        ],
    },
    QuizQuestion {
        id: "nie",
        prompt: "Do you have a NIE (foreigner identification number)?",
        options: &[
            opt("not-started", "Not started", 0),
            opt("researching", "Researching the process", 1),
            opt("appointment-booked", "Appointment booked", 4),
            opt("obtained", "Obtained", 5),
        ],
    },
    QuizQuestion {
        id: "structure",
        prompt: "Have you chosen a legal structure (autónomo or SL)?",
        options: &[
            opt("undecided", "Undecided", 0),
            opt("comparing", "Comparing options", 1),
            opt("chosen", "Chosen, not yet registered", 4),
            opt("incorporated", "Registered or incorporated", 5),
        ],
    },
    QuizQuestion {
        id: "banking",
        prompt: "Do you have a Spanish bank account?",
        options: &[
            opt("none", "No account", 0),
            opt("foreign-only", "Only foreign accounts", 1),
            opt("in-progress", "Opening one", 4),
            opt("open", "Open and active", 5),
        ],
    },
    QuizQuestion {
        id: "tax-registration",
        prompt: "Have you registered with the tax agency (census declaration)?",
        options: &[
            opt("not-aware", "Not aware it is needed", 0),
            opt("aware", "Aware, not started", 1),
            opt("prepared", "Documents prepared", 4),
            opt("filed", "Filed", 5),
        ],
    },
    QuizQuestion {
        id: "advisor",
        prompt: "Do you have professional tax and legal support in Spain?",
        options: &[
            opt("none", "No support", 0),
            opt("informal", "Informal advice from friends", 1),
            opt("shortlisted", "Shortlisted an advisor", 4),
            opt("engaged", "Advisor engaged", 5),
        ],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TierLevel {
    Low,
    Medium,
    High,
}

/// Static result content for a score range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultTier {
    pub level: TierLevel,
    pub title: &'static str,
    pub findings: &'static [&'static str],
    pub recommendations: &'static [&'static str],
}

pub static RESULT_TIERS: BandTable<ResultTier> = BandTable(&[
    ScoreBand {
        min: 0,
        max: 12,
        value: ResultTier {
            level: TierLevel::Low,
            title: "Early stage",
            findings: &[
                "Key identification and registration steps have not started",
                "Banking and tax obligations are not yet mapped out",
            ],
            recommendations: &[
                "Start the NIE application, it gates most other steps",
                "Book an initial consultation to plan structure and timeline",
            ],
        },
    },
    ScoreBand {
        min: 13,
        max: 22,
        value: ResultTier {
            level: TierLevel::Medium,
            title: "Making progress",
            findings: &[
                "Several foundations are in place",
                "Some registrations are still pending",
            ],
            recommendations: &[
                "Finish tax census registration before invoicing",
                "Confirm whether the impatriate regime applies before the deadline",
            ],
        },
    },
    ScoreBand {
        min: 23,
        max: 30,
        value: ResultTier {
            level: TierLevel::High,
            title: "Ready to launch",
            findings: &[
                "Identification, banking and registration are largely complete",
                "Professional support is in place",
            ],
            recommendations: &[
                "Set up quarterly filing reminders",
                "Review payroll and Social Security costs before the first hire",
            ],
        },
    },
]);

/// Tier returned if a score falls outside every band
pub fn default_tier() -> &'static ResultTier {
    &RESULT_TIERS.bands()[0].value
}

pub fn find_question(id: &str) -> Option<&'static QuizQuestion> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// Sum of the highest option score of every question
pub fn max_score() -> u32 {
    QUESTIONS.iter().map(QuizQuestion::max_score).sum()
}

/// Total score of the recognised answers.
pub fn calculate_score(answers: &QuizAnswerSet) -> u32 {
    answers
        .iter()
        .filter_map(|(question, option)| find_question(question)?.option(option))
        .map(|o| o.score)
        .sum()
}

/// Score as a whole percentage of the maximum, 0-100.
pub fn get_score_percentage(answers: &QuizAnswerSet) -> u32 {
    let max = max_score();
    if max == 0 {
        return 0;
    }
    (Decimal::from(calculate_score(answers)) * Decimal::ONE_HUNDRED / Decimal::from(max))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

/// Tier whose range contains the total score.
pub fn calculate_result(answers: &QuizAnswerSet) -> &'static ResultTier {
    let score = calculate_score(answers);
    RESULT_TIERS.lookup(score).unwrap_or_else(|| {
        log::warn!("Quiz score {} outside result tiers", score);
        default_tier()
    })
}
