//! Error taxonomy shared by the workflow and the remote client.
//!
//! Local guard failures never reach the network; remote failures carry enough
//! detail to pick the most specific user-visible message.

use thiserror::Error;

use crate::workflow::AnalysisStage;

pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

/// Input rejected before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("describe your idea before generating")]
    EmptyIdea,
    #[error("choose an industry before generating")]
    MissingIndustry,
    #[error("idea must be at least {min} characters")]
    IdeaTooShort { min: usize },
    #[error("idea must be at most {max} characters")]
    IdeaTooLong { max: usize },
}

/// Failure of a single request against the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("analysis service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    /// 401 on a session-bearing call. The auth collaborator clears the
    /// session. Sign-in calls report a rejected password as `Status`.
    #[error("session expired")]
    AuthExpired,
}

impl RemoteError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::AuthExpired => Some(401),
            Self::Transport(_) | Self::Malformed(_) => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::AuthExpired => SESSION_EXPIRED_MESSAGE.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Hard-dependency failure inside one analysis run, attributed to the stage
/// that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} failed: {cause}", .stage.label())]
pub struct AnalysisError {
    pub stage: AnalysisStage,
    #[source]
    pub cause: RemoteError,
}

impl AnalysisError {
    pub fn new(stage: AnalysisStage, cause: RemoteError) -> Self {
        Self { stage, cause }
    }

    pub fn user_message(&self) -> String {
        self.cause.user_message()
    }
}
