use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug)]
struct VariableData {
    symbol: String,
    cardinality: usize,
}

/// A discrete random variable: a display symbol (cosmetic only) plus a
/// cardinality (number of mutually exclusive states).
///
/// Identity is by reference, not by symbol: two variables created with the
/// same symbol are distinct. Cloning a `Variable` clones the handle, not the
/// identity, the same way a cheap handle into an out-of-line record works:
/// cloning shares the same underlying data rather than duplicating it.
#[derive(Clone, Debug)]
pub struct Variable(Arc<VariableData>);

impl Variable {
    /// Creates a new variable with `cardinality` mutually exclusive states.
    /// `cardinality` is clamped to at least 1.
    pub fn new(symbol: impl Into<String>, cardinality: usize) -> Self {
        Self(Arc::new(VariableData {
            symbol: symbol.into(),
            cardinality: cardinality.max(1),
        }))
    }

    /// Convenience constructor for the common binary (cardinality = 2) case.
    pub fn binary(symbol: impl Into<String>) -> Self {
        Self::new(symbol, 2)
    }

    pub fn symbol(&self) -> &str {
        &self.0.symbol
    }

    pub fn cardinality(&self) -> usize {
        self.0.cardinality
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(feature = "serde")]
impl Serialize for Variable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Variable", 2)?;
        s.serialize_field("symbol", self.symbol())?;
        s.serialize_field("cardinality", &self.cardinality())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Variable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            symbol: String,
            cardinality: usize,
        }
        let raw = Raw::deserialize(deserializer)?;
        Ok(Variable::new(raw.symbol, raw.cardinality))
    }
}
