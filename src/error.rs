// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

use crate::domain::component::{ComponentKind, InstanceRef};

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid binding: {0}")]
    InvalidBinding(#[from] InvalidBindingError),

    #[error("Instance creation failed: {0}")]
    InstanceCreation(#[from] InstanceCreationError),

    /// An operation was invoked from a callback while another one was
    /// still running.
    #[error("{0} called while another lifecycle operation is running")]
    Reentrant(&'static str),

    /// Only widgets report actions.
    #[error("instance {0} is not a widget")]
    NotAWidget(InstanceRef),

    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),
}

/// A binding descriptor or binding set is malformed.
///
/// This is always a caller bug and is raised before the mount point is
/// contacted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidBindingError {
    /// An input or two-way binding was declared with an empty field name.
    #[error("binding field name must not be empty")]
    EmptyField,

    /// An output binding was declared with an empty event name.
    #[error("binding event name must not be empty")]
    EmptyEvent,

    /// The same field is bound more than once in one request.
    #[error("field `{0}` is bound more than once")]
    DuplicateField(String),
}

/// The mount point rejected a creation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceCreationError {
    /// The mount point has no container accepting this kind.
    #[error("no container accepts {0} instances")]
    UnknownKind(ComponentKind),

    /// The mount point refused the request for another reason.
    #[error("{0}")]
    Rejected(String),
}

/// Failures reported by [`MountPoint::destroy`](crate::mount::MountPoint::destroy).
///
/// The orchestrator treats every variant as benign.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("instance {0} is already detached")]
    Detached(InstanceRef),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
