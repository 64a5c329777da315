use tracing::warn;

use crate::error::TutorError;

/// Shown whenever the tutor cannot answer.
pub const TUTOR_FALLBACK: &str =
    "Sorry, I'm having trouble connecting to the AI tutor right now. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorRequest {
    pub pattern_title: String,
    pub question: Option<String>,
}

impl TutorRequest {
    /// Request for a pattern. Blank questions count as "no question".
    #[must_use]
    pub fn new(pattern_title: impl Into<String>, question: Option<String>) -> Self {
        Self {
            pattern_title: pattern_title.into(),
            question: question
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
        }
    }

    /// Instructions for a generative backend.
    #[must_use]
    pub fn prompt(&self) -> String {
        let ask = match &self.question {
            Some(question) => format!("The user asks: \"{question}\""),
            None => "Please provide a concise, intuitive explanation of this pattern with a \
                     real-world analogy."
                .to_string(),
        };
        format!(
            "You are an expert Computer Science tutor specializing in Data Structures and Algorithms.\n\
             The user is studying the pattern: \"{title}\".\n\
             {ask}\n\n\
             Keep the answer clear, encouraging, and formatted in Markdown.\n\
             Focus on \"intuition\" - how to spot this pattern in a new problem.\n\
             Do not provide full code solutions unless asked, focusing on conceptual logic.\n",
            title = self.pattern_title,
        )
    }
}

pub trait Tutor: Send + Sync {
    /// Produce a Markdown explanation.
    ///
    /// # Errors
    ///
    /// Returns `TutorError` when no answer can be produced.
    fn explain(&self, request: &TutorRequest) -> Result<String, TutorError>;
}

/// Tutor used when no backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTutor;

impl Tutor for OfflineTutor {
    fn explain(&self, _request: &TutorRequest) -> Result<String, TutorError> {
        Err(TutorError::Unavailable)
    }
}

/// Ask a question about a pattern, always returning displayable text.
///
/// # Errors
///
/// Returns `TutorError::EmptyQuestion` if `question` is blank; backend failures
/// are replaced by [`TUTOR_FALLBACK`].
pub fn ask_tutor(
    tutor: &dyn Tutor,
    pattern_title: &str,
    question: &str,
) -> Result<String, TutorError> {
    if question.trim().is_empty() {
        return Err(TutorError::EmptyQuestion);
    }
    let request = TutorRequest::new(pattern_title, Some(question.to_string()));
    Ok(explain_or_fallback(tutor, &request))
}

/// Ask for the default pattern explanation, always returning displayable text.
#[must_use]
pub fn explain_pattern(tutor: &dyn Tutor, pattern_title: &str) -> String {
    explain_or_fallback(tutor, &TutorRequest::new(pattern_title, None))
}

fn explain_or_fallback(tutor: &dyn Tutor, request: &TutorRequest) -> String {
    match tutor.explain(request) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => "I couldn't generate an explanation at this time.".to_string(),
        Err(err) => {
            warn!(error = %err, pattern = %request.pattern_title, "tutor request failed");
            TUTOR_FALLBACK.to_string()
        }
    }
}
