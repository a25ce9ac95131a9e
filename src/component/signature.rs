// ABOUTME: Signature - the construction parameters a unit accepts, and the
// ABOUTME: keyword validation applied before a unit is built.

use serde_json::{Map, Value};

use crate::error::AssemblyError;

/// Parameters a unit accepts at construction or bind time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    /// Only the listed keyword names are accepted.
    Fixed(Vec<String>),

    /// Arbitrary extra keywords are accepted; validation is skipped.
    Variadic,
}

impl Signature {
    /// A fixed-arity signature from parameter names.
    pub fn fixed<I, S>(params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fixed(params.into_iter().map(Into::into).collect())
    }

    /// A signature with no parameters.
    pub fn empty() -> Self {
        Self::Fixed(Vec::new())
    }

    /// Whether arbitrary keywords are accepted.
    pub fn is_variadic(&self) -> bool {
        matches!(self, Self::Variadic)
    }

    /// Accepted parameter names, empty for variadic signatures.
    pub fn params(&self) -> &[String] {
        match self {
            Self::Fixed(params) => params,
            Self::Variadic => &[],
        }
    }

    /// Check that every key in `kwargs` is an accepted parameter.
    ///
    /// `unit` names the unit in the error message.
    pub fn validate(&self, unit: &str, kwargs: &Map<String, Value>) -> Result<(), AssemblyError> {
        let Self::Fixed(params) = self else {
            return Ok(());
        };

        let unknown: Vec<String> = kwargs
            .keys()
            .filter(|key| !params.contains(key))
            .cloned()
            .collect();

        if unknown.is_empty() {
            Ok(())
        } else {
            Err(AssemblyError::ArgumentMismatch {
                unit: unit.to_string(),
                unknown,
                valid: params.clone(),
            })
        }
    }
}
