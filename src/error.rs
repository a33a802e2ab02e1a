//! Error types shared by every area of the crate.
//!
//! All failures in bilby are fatal for the operation that raised them and
//! are returned synchronously to the caller. Nothing is retried, nothing
//! falls back silently, and nothing is logged before being returned.
//!
//! [`Error::kind`] groups the variants into the broad categories callers
//! usually care about:
//!
//! | Kind | Raised by |
//! |------|-----------|
//! | [`ErrorKind::Arity`] | constructing a tagged value with the wrong number of fields |
//! | [`ErrorKind::Definition`] | duplicate fields or cases, method/property conflicts |
//! | [`ErrorKind::DispatchMiss`] | no overload accepts the arguments, unknown names |
//! | [`ErrorKind::MatchMiss`] | missing case handler, no pattern matched |
//! | [`ErrorKind::PatternSyntax`] | malformed pattern text |
//! | [`ErrorKind::Type`] | a value of the wrong kind reached a builtin |
//! | [`ErrorKind::Custom`] | raised from user handlers through [`Error::custom`] |
//!
//! # Examples
//!
//! ```rust
//! use bilby::{Error, ErrorKind, TaggedProduct};
//!
//! let tuple = TaggedProduct::new("Tuple2", ["_1", "_2"]).unwrap();
//! let error = tuple.construct(vec![1.into()]).unwrap_err();
//! assert_eq!(error.kind(), ErrorKind::Arity);
//! assert_eq!(error.to_string(), "Tuple2: expected 2 arguments, got 1");
//! ```

use std::fmt;

/// The kind of a binding stored in an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// A name dispatched through predicate/implementation overloads.
    Method,
    /// A name bound directly to a value.
    Property,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method => formatter.write_str("method"),
            Self::Property => formatter.write_str("property"),
        }
    }
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong number of constructor arguments.
    Arity,
    /// An invalid or conflicting definition.
    Definition,
    /// A call that no registration can serve.
    DispatchMiss,
    /// A value that no handler or pattern covers.
    MatchMiss,
    /// Pattern text that does not parse.
    PatternSyntax,
    /// A value of an unexpected kind.
    Type,
    /// An error raised by user code.
    Custom,
}

/// Errors produced by bilby.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A tagged constructor received the wrong number of values.
    #[error("{type_name}: expected {expected} arguments, got {actual}")]
    Arity {
        /// The product name or case key being constructed.
        type_name: String,
        /// The declared field count.
        expected: usize,
        /// The number of values supplied.
        actual: usize,
    },

    /// A tagged type declared the same field twice.
    #[error("{type_name}: duplicate field `{field}`")]
    DuplicateField {
        /// The product name or case key being defined.
        type_name: String,
        /// The repeated field name.
        field: String,
    },

    /// A tagged sum declared the same case key twice.
    #[error("{type_name}: duplicate case `{case}`")]
    DuplicateCase {
        /// The sum name.
        type_name: String,
        /// The repeated case key.
        case: String,
    },

    /// A case key that the tagged sum does not declare.
    #[error("{type_name} has no case named `{case}`")]
    UnknownCase {
        /// The sum name.
        type_name: String,
        /// The requested case key.
        case: String,
    },

    /// A name registered as one binding kind was registered as the other.
    #[error("`{name}` is already defined as a {existing}")]
    Conflict {
        /// The conflicting name.
        name: String,
        /// The kind the name is already bound as.
        existing: BindingKind,
    },

    /// No registered predicate accepted the call's arguments.
    #[error("method `{name}` is not implemented for this input")]
    NotImplemented {
        /// The method name.
        name: String,
    },

    /// The name is bound to nothing in the environment.
    #[error("`{name}` is not defined")]
    Undefined {
        /// The missing name.
        name: String,
    },

    /// The name is a property whose value cannot be invoked.
    #[error("property `{name}` is not callable")]
    NotCallable {
        /// The property name.
        name: String,
    },

    /// A handler table given to `match_with` omitted the instance's case.
    #[error("{type_name}: handlers given to match didn't include `{case}`")]
    MissingCase {
        /// The product or sum name.
        type_name: String,
        /// The case key without a handler.
        case: String,
    },

    /// No compiled pattern accepted the value.
    #[error("no pattern matched {value}")]
    NoMatch {
        /// Canonical rendering of the unmatched value.
        value: String,
    },

    /// Malformed pattern text.
    #[error("invalid pattern `{pattern}` at offset {position}: {message}")]
    PatternSyntax {
        /// The full pattern text.
        pattern: String,
        /// Byte offset of the failure.
        position: usize,
        /// What went wrong.
        message: String,
    },

    /// A value of the wrong kind was supplied.
    #[error("expected {expected}, got {actual}")]
    Type {
        /// Description of the expected value.
        expected: &'static str,
        /// Type name of the supplied value.
        actual: &'static str,
    },

    /// An error raised by user code.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an error carrying an arbitrary message.
    ///
    /// Handlers and implementations use this to fail a call.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bilby::{Error, ErrorKind};
    ///
    /// let error = Error::custom("boom");
    /// assert_eq!(error.kind(), ErrorKind::Custom);
    /// assert_eq!(error.to_string(), "boom");
    /// ```
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Returns the broad classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Arity { .. } => ErrorKind::Arity,
            Self::DuplicateField { .. }
            | Self::DuplicateCase { .. }
            | Self::UnknownCase { .. }
            | Self::Conflict { .. } => ErrorKind::Definition,
            Self::NotImplemented { .. } | Self::Undefined { .. } | Self::NotCallable { .. } => {
                ErrorKind::DispatchMiss
            }
            Self::MissingCase { .. } | Self::NoMatch { .. } => ErrorKind::MatchMiss,
            Self::PatternSyntax { .. } => ErrorKind::PatternSyntax,
            Self::Type { .. } => ErrorKind::Type,
            Self::Custom(_) => ErrorKind::Custom,
        }
    }
}

/// Result type used throughout bilby.
pub type Result<T> = std::result::Result<T, Error>;
