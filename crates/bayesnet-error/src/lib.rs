//! Error taxonomy for the bayesnet exact-inference engine.
//!
//! Mirrors the flat, hand-rolled error style used across the workspace:
//! no `thiserror` derive, just a plain enum with `Display`/`Error` impls
//! and a couple of `format!`-flavored construction macros.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

#[cfg(feature = "backtrace")]
use std::backtrace::Backtrace;

pub type BayesResult<T> = Result<T, BayesError>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    EmptyDomain,
    DuplicateVariable,
    UnknownVariable,
    ShapeMismatch,
    DegenerateFactor,
    InvalidEvidence,
    InconsistentEvidence,
    CompilationFailure,
    Multiple,
    Context,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrString(Cow<'static, str>);

impl AsRef<str> for ErrString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ErrString {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: Into<Cow<'static, str>>> From<T> for ErrString {
    fn from(v: T) -> Self {
        Self(v.into())
    }
}

/// Errors raised by domain, table, network, graph and junction-tree
/// operations. Kinds follow the taxonomy in the project's error design:
/// raised eagerly, never retried or suppressed internally.
#[derive(Debug)]
pub enum BayesError {
    /// A `Domain` was constructed from an empty iterable.
    EmptyDomain,
    /// A `Domain` iterable contained the same variable twice.
    DuplicateVariable { symbol: ErrString },
    /// A variable was subtracted from / marginalized out of a domain that
    /// does not contain it.
    UnknownVariable { symbol: ErrString },
    /// A values array's length did not match the product of domain
    /// cardinalities.
    ShapeMismatch { expected: usize, actual: usize },
    /// A table's values summed to zero; it cannot be normalized.
    DegenerateFactor { message: ErrString },
    /// A restriction named a state index outside a variable's cardinality.
    InvalidEvidence {
        variable: ErrString,
        state: usize,
        cardinality: usize,
    },
    /// Collect/distribute produced an all-zero separator message.
    InconsistentEvidence { message: ErrString },
    /// Junction-tree linking could not find a parent clique satisfying the
    /// running-intersection property, or elimination could not proceed.
    CompilationFailure { message: ErrString },

    Multiple(MultiDisplay),

    Context {
        context: ErrorContext,
        source: Box<BayesError>,
        #[cfg(feature = "backtrace")]
        backtrace: Backtrace,
    },
}

impl BayesError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyDomain => ErrorCode::EmptyDomain,
            Self::DuplicateVariable { .. } => ErrorCode::DuplicateVariable,
            Self::UnknownVariable { .. } => ErrorCode::UnknownVariable,
            Self::ShapeMismatch { .. } => ErrorCode::ShapeMismatch,
            Self::DegenerateFactor { .. } => ErrorCode::DegenerateFactor,
            Self::InvalidEvidence { .. } => ErrorCode::InvalidEvidence,
            Self::InconsistentEvidence { .. } => ErrorCode::InconsistentEvidence,
            Self::CompilationFailure { .. } => ErrorCode::CompilationFailure,
            Self::Multiple(_) => ErrorCode::Multiple,
            Self::Context { .. } => ErrorCode::Context,
        }
    }

    pub fn with_context(self, msg: impl Into<String>) -> Self {
        BayesError::Context {
            context: ErrorContext::new(msg),
            source: Box::new(self),
            #[cfg(feature = "backtrace")]
            backtrace: Backtrace::capture(),
        }
    }
}

impl Display for BayesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDomain => write!(f, "domain must contain at least one variable"),
            Self::DuplicateVariable { symbol } => {
                write!(f, "duplicate variable in domain: {}", symbol)
            }
            Self::UnknownVariable { symbol } => {
                write!(f, "variable not in domain: {}", symbol)
            }
            Self::ShapeMismatch { expected, actual } => write!(
                f,
                "values length {} does not match domain size {}",
                actual, expected
            ),
            Self::DegenerateFactor { message } => write!(f, "degenerate factor: {}", message),
            Self::InvalidEvidence {
                variable,
                state,
                cardinality,
            } => write!(
                f,
                "state {} out of range for variable {} with cardinality {}",
                state, variable, cardinality
            ),
            Self::InconsistentEvidence { message } => {
                write!(f, "inconsistent evidence: {}", message)
            }
            Self::CompilationFailure { message } => {
                write!(f, "junction-tree compilation failed: {}", message)
            }
            Self::Multiple(m) => write!(f, "multiple errors:\n{}", m),
            Self::Context {
                context, source, ..
            } => write!(f, "{}\nCaused by: {}", context, source),
        }
    }
}

impl std::error::Error for BayesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Context { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ErrorContext {
    message: String,
}

impl ErrorContext {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ErrorContext {}

#[derive(Debug)]
pub struct MultiDisplay(Vec<BayesError>);

impl Display for MultiDisplay {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[{}] {} (code: {:?})", i, e, e.code())?;
        }
        Ok(())
    }
}

impl From<Vec<BayesError>> for MultiDisplay {
    fn from(v: Vec<BayesError>) -> Self {
        Self(v)
    }
}

pub trait ResultExt<T> {
    fn context(self, msg: impl Into<String>) -> BayesResult<T>;
    fn with_context<F: FnOnce() -> String>(self, f: F) -> BayesResult<T>;
}

impl<T, E: Into<BayesError>> ResultExt<T> for Result<T, E> {
    fn context(self, msg: impl Into<String>) -> BayesResult<T> {
        self.map_err(|e| e.into().with_context(msg))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> BayesResult<T> {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[doc(hidden)]
pub mod __private {
    #[inline]
    #[cold]
    #[must_use]
    pub fn must_use<E>(e: E) -> E {
        e
    }
}

#[macro_export]
macro_rules! bayes_err {
    (DuplicateVariable: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::BayesError::DuplicateVariable { symbol: format!($fmt, $($arg),*).into() })
    };
    (UnknownVariable: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::BayesError::UnknownVariable { symbol: format!($fmt, $($arg),*).into() })
    };
    (DegenerateFactor: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::BayesError::DegenerateFactor { message: format!($fmt, $($arg),*).into() })
    };
    (InconsistentEvidence: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::BayesError::InconsistentEvidence { message: format!($fmt, $($arg),*).into() })
    };
    (InvalidEvidence: $variable:expr, $state:expr, $cardinality:expr) => {
        $crate::__private::must_use($crate::BayesError::InvalidEvidence {
            variable: $variable.into(),
            state: $state,
            cardinality: $cardinality,
        })
    };
    (CompilationFailure: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::BayesError::CompilationFailure { message: format!($fmt, $($arg),*).into() })
    };
}

#[macro_export]
macro_rules! bayes_bail {
    ($($tt:tt)+) => { return Err($crate::bayes_err!($($tt)+)) };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($tt:tt)+) => {
        if !$cond { $crate::bayes_bail!($($tt)+); }
    };
}
