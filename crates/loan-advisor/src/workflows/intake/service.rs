use std::ops::RangeInclusive;
use std::sync::Arc;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use super::domain::{
    ConversationState, IntakeStep, Profile, AGE_YEARS, AMOUNT_RUBLES, EMPLOYMENT_MONTHS,
    INCOME_RUBLES, TERM_MONTHS,
};
use super::normalizer::{parse_credit_history, parse_loan_type, parse_number, parse_yes_no};
use super::prompts::{self, correction, question, summary};
use super::vocabulary::{normalize_token, Vocabulary};
use crate::workflows::offers::{OfferEngine, RankedOffer};

/// Body accepted by the chat endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "message_as_text")]
    pub message: Option<String>,
    #[serde(default)]
    pub state: Option<Value>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, state: Option<Value>) -> Self {
        Self {
            message: Some(message.into()),
            state,
        }
    }
}

/// Reply envelope: the text to show, the state to send back next time, and any offers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatTurn {
    pub reply: String,
    pub state: ConversationState,
    pub offers: Vec<RankedOffer>,
}

impl ChatTurn {
    fn text(reply: impl Into<String>, state: ConversationState) -> Self {
        Self {
            reply: reply.into(),
            state,
            offers: Vec::new(),
        }
    }

    /// Apology turn that starts the conversation over.
    pub fn recovery() -> Self {
        Self::text(prompts::RECOVERY, ConversationState::initial())
    }
}

/// Failures that abort a turn and are answered with [`ChatTurn::recovery`].
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("unreadable chat request: {0}")]
    InvalidRequest(String),
}

/// Drives the question sequence and hands completed profiles to the offer engine.
pub struct LoanIntakeService {
    engine: OfferEngine,
    vocabulary: Arc<Vocabulary>,
}

impl LoanIntakeService {
    pub fn new(engine: OfferEngine, vocabulary: Arc<Vocabulary>) -> Self {
        Self { engine, vocabulary }
    }

    pub fn engine(&self) -> &OfferEngine {
        &self.engine
    }

    /// Processes one request end to end. Malformed state is replaced rather than rejected.
    pub fn handle(&self, request: ChatRequest) -> ChatTurn {
        let state = ConversationState::restore(request.state).unwrap_or_else(|reason| {
            debug!(%reason, "discarding caller state");
            ConversationState::initial()
        });
        let message = request.message.unwrap_or_default();

        self.respond(&message, state)
    }

    pub fn recover(&self, err: &ChatError) -> ChatTurn {
        error!(error = %err, "chat turn failed, restarting conversation");
        ChatTurn::recovery()
    }

    /// Applies one message to a validated state.
    pub fn respond(&self, message: &str, state: ConversationState) -> ChatTurn {
        let message = message.trim();
        let token = normalize_token(message);

        if message.is_empty() || self.vocabulary.is_reset(&token) {
            debug!(from_step = state.step.index(), "conversation reset");
            let state = ConversationState::initial();
            return ChatTurn::text(question(state.step), state);
        }

        if state.step.is_terminal() {
            if self.vocabulary.is_refresh(&token) {
                let offers = self.rank(&state.profile);
                return ChatTurn {
                    reply: prompts::REFRESHED.to_string(),
                    state,
                    offers,
                };
            }
            return ChatTurn::text(prompts::HELP, state);
        }

        self.answer(message, state)
    }

    fn answer(&self, message: &str, mut state: ConversationState) -> ChatTurn {
        let step = state.step;

        if !self.record(step, message, &mut state.profile) {
            debug!(step = step.index(), "answer rejected");
            return ChatTurn::text(correction(step), state);
        }

        state.step = step.next();
        debug!(from_step = step.index(), to_step = state.step.index(), "answer accepted");

        if !state.step.is_terminal() {
            return ChatTurn::text(question(state.step), state);
        }

        let offers = self.rank(&state.profile);
        info!(
            loan_type = ?state.profile.loan_type,
            offers = offers.len(),
            "intake complete"
        );
        ChatTurn {
            reply: summary(&state.profile),
            state,
            offers,
        }
    }

    /// Writes the answer for `step` into the profile, returning whether it validated.
    fn record(&self, step: IntakeStep, message: &str, profile: &mut Profile) -> bool {
        let vocabulary = self.vocabulary.as_ref();

        match step {
            IntakeStep::LoanType => store(
                &mut profile.loan_type,
                parse_loan_type(message, vocabulary),
            ),
            IntakeStep::Age => store(
                &mut profile.age,
                whole_number(message, &AGE_YEARS).map(|years| years as u32),
            ),
            IntakeStep::Income => store(
                &mut profile.income,
                whole_number(message, &INCOME_RUBLES).map(|rubles| rubles as u64),
            ),
            IntakeStep::EmploymentMonths => store(
                &mut profile.employment_months,
                whole_number(message, &EMPLOYMENT_MONTHS).map(|months| months as u64),
            ),
            IntakeStep::CreditHistory => store(
                &mut profile.credit_history,
                parse_credit_history(message, vocabulary),
            ),
            IntakeStep::Insurance => store(
                &mut profile.insurance,
                parse_yes_no(message, vocabulary),
            ),
            IntakeStep::DesiredAmount => store(
                &mut profile.desired_amount,
                whole_number(message, &AMOUNT_RUBLES).map(|rubles| rubles as u64),
            ),
            IntakeStep::DesiredMonths => store(
                &mut profile.desired_months,
                whole_number(message, &TERM_MONTHS).map(|months| months as u64),
            ),
            // Nothing is collected once offers are shown.
            IntakeStep::OffersShown => false,
        }
    }

    fn rank(&self, profile: &Profile) -> Vec<RankedOffer> {
        self.engine.rank(&profile.offer_query())
    }
}

fn store<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match value {
        Some(value) => {
            *slot = Some(value);
            true
        }
        None => false,
    }
}

// The range applies to the raw number; rounding happens only after it passes.
fn whole_number(text: &str, range: &RangeInclusive<f64>) -> Option<f64> {
    parse_number(text)
        .filter(|value| range.contains(value))
        .map(f64::round)
}

fn message_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(_) => Err(de::Error::custom("message must be a string")),
    }
}
