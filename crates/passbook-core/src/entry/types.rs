//! Entry type definitions

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::validation::{validate_line, validate_token};
use crate::error::{Result, StoreError};

/// One stored credential
///
/// Website, question and answer are fixed at creation; only the username and
/// password can be changed afterwards, through the store.
#[derive(Clone, PartialEq, Eq)]
pub struct Entry {
    website: String,
    username: String,
    password: String,
    verification_question: String,
    verification_answer: String,
}

impl Entry {
    /// Create a validated entry
    pub fn new(
        website: &str,
        username: &str,
        password: &str,
        verification_question: &str,
        verification_answer: &str,
    ) -> Result<Self> {
        validate_token("website", website)?;
        validate_token("username", username)?;
        validate_token("password", password)?;
        validate_line("verification question", verification_question)?;
        validate_line("verification answer", verification_answer)?;

        Ok(Self {
            website: website.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            verification_question: verification_question.to_string(),
            verification_answer: verification_answer.to_string(),
        })
    }

    pub fn website(&self) -> &str {
        &self.website
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The prompt shown before revealing or modifying this entry
    pub fn verification_question(&self) -> &str {
        &self.verification_question
    }

    /// Return the password if `answer` matches the stored answer exactly
    pub fn reveal_password(&self, answer: &str) -> Result<RevealedPassword> {
        if !self.answer_matches(answer) {
            return Err(StoreError::VerificationFailed);
        }
        Ok(RevealedPassword::new(self.password.clone()))
    }

    /// Whether this entry is keyed by `(website, username)`
    pub fn matches(&self, website: &str, username: &str) -> bool {
        self.website == website && self.username == username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    pub(crate) fn verification_answer(&self) -> &str {
        &self.verification_answer
    }

    /// Check `answer` against the stored answer (exact, case-sensitive)
    pub fn answer_matches(&self, answer: &str) -> bool {
        self.verification_answer == answer
    }

    pub(crate) fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }

    /// Caller validates both values first
    pub(crate) fn set_credentials(&mut self, username: &str, password: &str) {
        self.username = username.to_string();
        self.password = password.to_string();
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("website", &self.website)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("verification_question", &self.verification_question)
            .field("verification_answer", &"[REDACTED]")
            .finish()
    }
}

/// Revealed password - automatically zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct RevealedPassword {
    value: String,
}

impl RevealedPassword {
    fn new(value: String) -> Self {
        Self { value }
    }

    /// Get the password (use carefully)
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Consume and return the inner value
    pub fn into_inner(mut self) -> String {
        std::mem::take(&mut self.value)
    }
}

impl std::fmt::Debug for RevealedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealedPassword")
            .field("value", &"[REDACTED]")
            .finish()
    }
}
