//! Ordered Candidate Attempts
//!
//! Cores of different versions expose the same operation at different
//! paths. Candidates are tried in order; the first success wins.

use serde_json::Value;

use crate::application::client::{CallOptions, CoreClient};
use crate::domain::core_error::CoreError;
use crate::domain::transport::CoreTransport;

/// Post-processing of a successful body; may still reject it
pub type Shape = Box<dyn Fn(Value) -> Result<Value, CoreError> + Send + Sync>;

/// One endpoint shape to try
pub struct Candidate {
    pub path: String,
    pub options: CallOptions,
    shape: Option<Shape>,
}

impl Candidate {
    pub fn new(path: impl Into<String>, options: CallOptions) -> Self {
        Self {
            path: path.into(),
            options,
            shape: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path, CallOptions::get())
    }

    /// Transform or reject the body of a successful call
    pub fn with_shape<F>(mut self, shape: F) -> Self
    where
        F: Fn(Value) -> Result<Value, CoreError> + Send + Sync + 'static,
    {
        self.shape = Some(Box::new(shape));
        self
    }
}

/// Result of trying every candidate
#[derive(Debug)]
pub enum Outcome {
    Success(Value),
    /// All failed and the last error means "does not exist"
    NotFound(CoreError),
    /// All failed otherwise
    Failed(CoreError),
}

/// Try candidates in order and classify the last failure
pub async fn attempt_in_order<T, P>(
    client: &CoreClient<T>,
    candidates: Vec<Candidate>,
    is_not_found: P,
) -> Outcome
where
    T: CoreTransport,
    P: Fn(&CoreError) -> bool,
{
    let mut last_error = None;

    for candidate in candidates {
        let result = match client.call(&candidate.path, candidate.options).await {
            Ok(body) => match &candidate.shape {
                Some(shape) => shape(body),
                None => Ok(body),
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(body) => return Outcome::Success(body),
            Err(e) => {
                tracing::debug!(path = %candidate.path, error = %e, "Core candidate failed");
                last_error = Some(e);
            }
        }
    }

    let error = last_error.unwrap_or_else(|| CoreError::Transport("No Core endpoint to try".to_string()));
    if is_not_found(&error) {
        Outcome::NotFound(error)
    } else {
        Outcome::Failed(error)
    }
}
