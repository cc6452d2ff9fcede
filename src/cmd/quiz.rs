//! Quiz command - setup-readiness score and result tier

use crate::cmd::{print_json, print_table, read_json};
use crate::core::quiz::{find_question, max_score, QUESTIONS, RESULT_TIERS};
use crate::core::{
    calculate_result, calculate_score, get_score_percentage, InputError, LeadPayload,
    QuizAnswerSet, QuizLead, ResultTier,
};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct QuizCommand {
    /// Answer as QUESTION=OPTION (repeatable), e.g. --answer nie=obtained
    #[arg(short, long = "answer", value_parser = parse_answer)]
    answers: Vec<(String, String)>,

    /// JSON object of question id to option id (or "-" for stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// List the questions and their options instead of scoring
    #[arg(long)]
    questions: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Output only the lead-capture payload as JSON
    #[arg(long, conflicts_with = "json")]
    lead: bool,
}

fn parse_answer(s: &str) -> Result<(String, String), InputError> {
    match s.split_once('=') {
        Some((question, option)) if !question.trim().is_empty() && !option.trim().is_empty() => {
            Ok((question.trim().to_string(), option.trim().to_string()))
        }
        _ => Err(InputError::MalformedAnswer(s.to_string())),
    }
}

#[derive(Debug, Serialize)]
struct QuizOutput<'a> {
    score: u32,
    max_score: u32,
    score_percentage: u32,
    tier: &'a ResultTier,
}

#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "Question")]
    question: String,
    #[tabled(rename = "Option")]
    option: &'static str,
    #[tabled(rename = "Answer")]
    label: &'static str,
    #[tabled(rename = "Points")]
    score: u32,
}

impl QuizCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        RESULT_TIERS.validate(max_score())?;

        if self.questions {
            return self.print_questions();
        }

        let answers = self.answers()?;
        warn_unknown(&answers);
        let tier = calculate_result(&answers);

        if self.lead {
            print_json(&LeadPayload::Quiz(QuizLead::new(&answers, tier.level)))
        } else if self.json {
            print_json(&QuizOutput {
                score: calculate_score(&answers),
                max_score: max_score(),
                score_percentage: get_score_percentage(&answers),
                tier,
            })
        } else {
            print_result(&answers, tier);
            Ok(())
        }
    }

    fn answers(&self) -> anyhow::Result<QuizAnswerSet> {
        let mut answers: QuizAnswerSet = match &self.input {
            Some(path) => read_json(path)?,
            None => QuizAnswerSet::new(),
        };
        // flags override the file
        answers.extend(self.answers.iter().cloned());
        Ok(answers)
    }

    fn print_questions(&self) -> anyhow::Result<()> {
        if self.json {
            return print_json(&QUESTIONS);
        }
        let rows = QUESTIONS
            .iter()
            .flat_map(|q| {
                q.options.iter().enumerate().map(move |(i, o)| OptionRow {
                    question: if i == 0 { q.id.to_string() } else { String::new() },
                    option: o.id,
                    label: o.label,
                    score: o.score,
                })
            })
            .collect();
        print_table(rows, 3);
        Ok(())
    }
}

fn warn_unknown(answers: &QuizAnswerSet) {
    for (question, option) in answers {
        match find_question(question) {
            None => log::warn!("Ignoring unknown question '{}'", question),
            Some(q) if q.option(option).is_none() => {
                log::warn!("Ignoring unknown option '{}' for '{}'", option, question)
            }
            Some(_) => {}
        }
    }
}

fn print_result(answers: &QuizAnswerSet, tier: &ResultTier) {
    println!();
    println!("SETUP READINESS: {}", tier.title.to_uppercase());
    println!();
    println!(
        "Score: {}/{} ({}%), {} of {} questions answered",
        calculate_score(answers),
        max_score(),
        get_score_percentage(answers),
        answers
            .keys()
            .filter(|q| find_question(q).is_some())
            .count(),
        QUESTIONS.len()
    );
    println!();
    println!("Findings:");
    for finding in tier.findings {
        println!("  - {}", finding);
    }
    println!();
    println!("Recommendations:");
    for recommendation in tier.recommendations {
        println!("  - {}", recommendation);
    }
    println!();
}
