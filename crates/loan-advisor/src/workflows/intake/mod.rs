//! Conversational profile intake.
//!
//! The caller owns the conversation state and sends it back with every message; the service
//! validates one answer per turn and ranks offers once the last question is answered.

pub mod domain;
mod normalizer;
mod prompts;
pub mod router;
pub mod service;
mod vocabulary;

#[cfg(test)]
mod tests;

pub use domain::{ConversationState, CreditHistory, IntakeStep, MalformedState, Profile};
pub use normalizer::{parse_credit_history, parse_loan_type, parse_number, parse_yes_no};
pub use prompts::format_rubles;
pub use router::chat_router;
pub use service::{ChatError, ChatRequest, ChatTurn, LoanIntakeService};
pub use vocabulary::{Vocabulary, VocabularyDocument, VocabularyError};
