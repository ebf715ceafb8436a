// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! The core state machine itself is total over its input space and raises
//! nothing; errors only exist at the async shell boundary (closed channels).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HoldgateError {
    #[error("reactor event channel closed")]
    ChannelClosed,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for HoldgateError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        HoldgateError::ChannelClosed
    }
}

pub type Result<T> = std::result::Result<T, HoldgateError>;
