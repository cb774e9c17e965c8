use super::domain::CreditHistory;
use super::vocabulary::{normalize_token, Vocabulary};
use crate::workflows::offers::LoanType;

/// Reads a number typed the way borrowers write it: `"500 000"`, `"12,5"`, `"1e6"`.
///
/// All whitespace is dropped and the first comma is read as a decimal point. Returns `None`
/// when nothing finite can be parsed.
pub fn parse_number(text: &str) -> Option<f64> {
    let compact: String = text.chars().filter(|ch| !ch.is_whitespace()).collect();
    let decimal = compact.replacen(',', ".", 1);

    decimal.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn parse_yes_no(text: &str, vocabulary: &Vocabulary) -> Option<bool> {
    vocabulary.answer(&normalize_token(text))
}

pub fn parse_loan_type(text: &str, vocabulary: &Vocabulary) -> Option<LoanType> {
    vocabulary.loan_type(&normalize_token(text))
}

pub fn parse_credit_history(text: &str, vocabulary: &Vocabulary) -> Option<CreditHistory> {
    vocabulary.credit_history(&normalize_token(text))
}
