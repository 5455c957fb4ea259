use autoweb_core_types::{ErrorKind, Outcome};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RevealError {
    #[error("step limit reached after {steps} steps; target never located{}", cause_suffix(.last_error))]
    NeverFound {
        steps: u32,
        last_error: Option<String>,
    },
    #[error("step limit reached after {steps} steps; target located but never visible")]
    StepLimit { steps: u32 },
    #[error("scroll gesture failed: {0}")]
    Gesture(String),
    #[error("reconciler port missing: {0}")]
    MissingPort(&'static str),
}

fn cause_suffix(last_error: &Option<String>) -> String {
    match last_error {
        Some(reason) => format!(" (last error: {reason})"),
        None => String::new(),
    }
}

impl RevealError {
    /// The target never resolved, so any position we hold for it is meaningless.
    pub fn is_never_found(&self) -> bool {
        matches!(self, RevealError::NeverFound { .. })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RevealError::NeverFound { .. } => ErrorKind::NotFound,
            RevealError::StepLimit { .. } => ErrorKind::StepLimit,
            RevealError::Gesture(_) => ErrorKind::Gesture,
            RevealError::MissingPort(_) => ErrorKind::Internal,
        }
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::failure(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_mention_step_limit() {
        let err = RevealError::NeverFound {
            steps: 15,
            last_error: Some("page unavailable".into()),
        };
        assert_eq!(
            err.to_string(),
            "step limit reached after 15 steps; target never located (last error: page unavailable)"
        );
        assert!(err.is_never_found());
        assert!(!RevealError::StepLimit { steps: 15 }.is_never_found());
        assert!(RevealError::StepLimit { steps: 15 }
            .outcome()
            .to_tagged()
            .starts_with("ERROR: step limit reached"));
    }
}
