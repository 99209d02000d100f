use std::future::Future;

use thiserror::Error;

use crate::history::SourceError;

/// Fatal console-input errors. There is no re-ask: a malformed number
/// terminates the run.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("invalid numeric input for {label}: '{value}'")]
    InvalidNumber { label: String, value: String },

    #[error("input closed before '{label}' was answered")]
    Closed { label: String },

    #[error("failed to read console input: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability seam for interactive input. The CLI reads stdin; tests feed
/// scripted values.
pub trait Prompt {
    /// Ask for a single numeric value. Parse failure is fatal.
    fn read_value(&self, label: &str) -> Result<f64, PromptError>;

    /// Ask for a free-form line of text.
    fn read_line(&self, label: &str) -> Result<String, PromptError>;
}

/// Run `fetch` once; on any fetch error, fall back to exactly one
/// interactive prompt. Fetch errors never propagate past this boundary.
pub async fn fetch_or_prompt<F, Fut>(
    fetch: F,
    prompt: &dyn Prompt,
    label: &str,
) -> Result<f64, PromptError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<f64, SourceError>>,
{
    match fetch().await {
        Ok(value) => Ok(value),
        Err(_) => prompt.read_value(label),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct ScriptedPrompt {
        values: RefCell<Vec<f64>>,
    }

    impl ScriptedPrompt {
        fn with_values(values: Vec<f64>) -> Self {
            Self {
                values: RefCell::new(values),
            }
        }

        fn remaining(&self) -> usize {
            self.values.borrow().len()
        }
    }

    impl Prompt for ScriptedPrompt {
        fn read_value(&self, label: &str) -> Result<f64, PromptError> {
            let mut values = self.values.borrow_mut();
            if values.is_empty() {
                return Err(PromptError::Closed {
                    label: label.to_owned(),
                });
            }
            Ok(values.remove(0))
        }

        fn read_line(&self, label: &str) -> Result<String, PromptError> {
            Err(PromptError::Closed {
                label: label.to_owned(),
            })
        }
    }

    #[tokio::test]
    async fn successful_fetch_never_prompts() {
        let prompt = ScriptedPrompt::with_values(vec![99.0]);

        let value = fetch_or_prompt(|| async { Ok(1.05) }, &prompt, "manual PCR value")
            .await
            .expect("fetched value");

        assert_eq!(value, 1.05);
        assert_eq!(prompt.remaining(), 1, "prompt must not be consumed");
    }

    #[tokio::test]
    async fn failed_fetch_consumes_exactly_one_prompt() {
        let prompt = ScriptedPrompt::with_values(vec![14.6]);

        let value = fetch_or_prompt(
            || async { Err(SourceError::unavailable("upstream down")) },
            &prompt,
            "manual VIX value",
        )
        .await
        .expect("fallback value");

        assert_eq!(value, 14.6);
        assert_eq!(prompt.remaining(), 0);
    }

    #[tokio::test]
    async fn exhausted_prompt_is_fatal() {
        let prompt = ScriptedPrompt::with_values(Vec::new());

        let err = fetch_or_prompt(
            || async { Err(SourceError::empty_series("no closes")) },
            &prompt,
            "manual PCR value",
        )
        .await
        .expect_err("must fail");

        assert!(matches!(err, PromptError::Closed { .. }));
    }
}
