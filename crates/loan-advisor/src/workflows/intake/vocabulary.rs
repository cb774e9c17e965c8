use super::domain::CreditHistory;
use crate::workflows::offers::LoanType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Word lists the normalizers and global commands match against.
///
/// Lookups are case-insensitive on trimmed input. Keys are normalized once at construction,
/// so a document may spell them in any case.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    loan_types: HashMap<String, LoanType>,
    credit_history: HashMap<String, CreditHistory>,
    affirmative: Vec<String>,
    negative: Vec<String>,
    reset: Vec<String>,
    refresh: Vec<String>,
}

/// On-disk shape of a vocabulary override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VocabularyDocument {
    pub loan_types: HashMap<String, LoanType>,
    pub credit_history: HashMap<String, CreditHistory>,
    pub affirmative: Vec<String>,
    pub negative: Vec<String>,
    pub reset: Vec<String>,
    pub refresh: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid vocabulary JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("vocabulary table `{0}` is empty")]
    EmptyTable(&'static str),
    #[error("token `{0}` is listed as both affirmative and negative")]
    AmbiguousAnswer(String),
}

const LOAN_TYPES: &[(&str, LoanType)] = &[
    ("наличными", LoanType::Cash),
    ("кредит наличными", LoanType::Cash),
    ("cash", LoanType::Cash),
    ("авто", LoanType::Auto),
    ("автокредит", LoanType::Auto),
    ("auto", LoanType::Auto),
    ("ипотека", LoanType::Mortgage),
    ("mortgage", LoanType::Mortgage),
    ("рефинанс", LoanType::Refinance),
    ("рефинансирование", LoanType::Refinance),
    ("refinance", LoanType::Refinance),
];

const CREDIT_HISTORY: &[(&str, CreditHistory)] = &[
    ("хорошо", CreditHistory::Good),
    ("good", CreditHistory::Good),
    ("средне", CreditHistory::Avg),
    ("avg", CreditHistory::Avg),
    ("плохо", CreditHistory::Bad),
    ("bad", CreditHistory::Bad),
];

const AFFIRMATIVE: &[&str] = &["да", "y", "yes", "true", "1"];
const NEGATIVE: &[&str] = &["нет", "n", "no", "false", "0"];
const RESET: &[&str] = &["сброс", "/reset"];
const REFRESH: &[&str] = &["ещё", "еще"];

pub(crate) fn normalize_token(value: &str) -> String {
    value.trim().to_lowercase()
}

fn normalize_all(words: impl IntoIterator<Item = String>) -> Vec<String> {
    words.into_iter().map(|word| normalize_token(&word)).collect()
}

impl Vocabulary {
    /// Built-in Russian vocabulary with English aliases.
    pub fn russian() -> Self {
        Self::from_parts(
            LOAN_TYPES.iter().map(|(word, value)| (word.to_string(), *value)),
            CREDIT_HISTORY
                .iter()
                .map(|(word, value)| (word.to_string(), *value)),
            AFFIRMATIVE.iter().map(|word| word.to_string()),
            NEGATIVE.iter().map(|word| word.to_string()),
            RESET.iter().map(|word| word.to_string()),
            REFRESH.iter().map(|word| word.to_string()),
        )
    }

    pub fn from_document(document: VocabularyDocument) -> Result<Self, VocabularyError> {
        let tables = [
            ("loan_types", document.loan_types.is_empty()),
            ("credit_history", document.credit_history.is_empty()),
            ("affirmative", document.affirmative.is_empty()),
            ("negative", document.negative.is_empty()),
            ("reset", document.reset.is_empty()),
            ("refresh", document.refresh.is_empty()),
        ];
        if let Some((name, _)) = tables.into_iter().find(|(_, empty)| *empty) {
            return Err(VocabularyError::EmptyTable(name));
        }

        let vocabulary = Self::from_parts(
            document.loan_types,
            document.credit_history,
            document.affirmative,
            document.negative,
            document.reset,
            document.refresh,
        );

        if let Some(token) = vocabulary
            .affirmative
            .iter()
            .find(|token| vocabulary.negative.contains(token))
        {
            return Err(VocabularyError::AmbiguousAnswer(token.clone()));
        }

        Ok(vocabulary)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, VocabularyError> {
        let document: VocabularyDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, VocabularyError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    fn from_parts(
        loan_types: impl IntoIterator<Item = (String, LoanType)>,
        credit_history: impl IntoIterator<Item = (String, CreditHistory)>,
        affirmative: impl IntoIterator<Item = String>,
        negative: impl IntoIterator<Item = String>,
        reset: impl IntoIterator<Item = String>,
        refresh: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            loan_types: loan_types
                .into_iter()
                .map(|(word, value)| (normalize_token(&word), value))
                .collect(),
            credit_history: credit_history
                .into_iter()
                .map(|(word, value)| (normalize_token(&word), value))
                .collect(),
            affirmative: normalize_all(affirmative),
            negative: normalize_all(negative),
            reset: normalize_all(reset),
            refresh: normalize_all(refresh),
        }
    }

    pub fn loan_type(&self, token: &str) -> Option<LoanType> {
        self.loan_types.get(token).copied()
    }

    pub fn credit_history(&self, token: &str) -> Option<CreditHistory> {
        self.credit_history.get(token).copied()
    }

    pub fn answer(&self, token: &str) -> Option<bool> {
        if self.affirmative.iter().any(|word| word == token) {
            Some(true)
        } else if self.negative.iter().any(|word| word == token) {
            Some(false)
        } else {
            None
        }
    }

    pub fn is_reset(&self, token: &str) -> bool {
        self.reset.iter().any(|word| word == token)
    }

    pub fn is_refresh(&self, token: &str) -> bool {
        self.refresh.iter().any(|word| word == token)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::russian()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn document() -> VocabularyDocument {
        VocabularyDocument {
            loan_types: HashMap::from([("Home Loan".to_string(), LoanType::Mortgage)]),
            credit_history: HashMap::from([("Fair".to_string(), CreditHistory::Avg)]),
            affirmative: vec!["Sure".to_string()],
            negative: vec!["Nope".to_string()],
            reset: vec!["restart".to_string()],
            refresh: vec!["more".to_string()],
        }
    }

    #[test]
    fn russian_vocabulary_covers_commands() {
        let vocabulary = Vocabulary::russian();
        assert!(vocabulary.is_reset("сброс"));
        assert!(vocabulary.is_reset("/reset"));
        assert!(vocabulary.is_refresh("ещё"));
        assert!(vocabulary.is_refresh("еще"));
        assert!(!vocabulary.is_refresh("сброс"));
    }

    #[test]
    fn document_keys_are_normalized() {
        let vocabulary = Vocabulary::from_document(document()).expect("valid vocabulary");
        assert_eq!(vocabulary.loan_type("home loan"), Some(LoanType::Mortgage));
        assert_eq!(vocabulary.credit_history("fair"), Some(CreditHistory::Avg));
        assert_eq!(vocabulary.answer("sure"), Some(true));
        assert_eq!(vocabulary.answer("nope"), Some(false));
        assert_eq!(vocabulary.loan_type("ипотека"), None);
    }

    #[test]
    fn rejects_empty_tables() {
        let mut document = document();
        document.refresh.clear();
        let error = Vocabulary::from_document(document).expect_err("empty refresh table");
        assert!(matches!(error, VocabularyError::EmptyTable("refresh")));
    }

    #[test]
    fn rejects_tokens_that_are_both_yes_and_no() {
        let mut document = document();
        document.negative.push("SURE".to_string());
        let error = Vocabulary::from_document(document).expect_err("ambiguous token");
        assert!(matches!(error, VocabularyError::AmbiguousAnswer(token) if token == "sure"));
    }

    #[test]
    fn reads_json_documents() {
        let json = r#"{
            "loan_types": {"Car": "auto"},
            "credit_history": {"Great": "good"},
            "affirmative": ["ok"],
            "negative": ["nah"],
            "reset": ["start over"],
            "refresh": ["again"]
        }"#;
        let vocabulary = Vocabulary::from_reader(Cursor::new(json)).expect("parses");
        assert_eq!(vocabulary.loan_type("car"), Some(LoanType::Auto));
        assert!(vocabulary.is_reset("start over"));
    }
}
