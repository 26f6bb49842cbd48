use crate::fault::Fault;

/// Result of a reflective get, set, call or construct.
///
/// Exactly one of [`value`](Self::value) and [`fault`](Self::fault) is
/// populated.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationOutcome<T> {
    result: Result<T, Fault>,
}

impl<T> InvocationOutcome<T> {
    pub fn success(value: T) -> Self {
        Self { result: Ok(value) }
    }

    pub fn failure(fault: Fault) -> Self {
        Self { result: Err(fault) }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }

    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn fault(&self) -> Option<&Fault> {
        self.result.as_ref().err()
    }

    pub fn into_value(self) -> Option<T> {
        self.result.ok()
    }

    pub fn into_fault(self) -> Option<Fault> {
        self.result.err()
    }

    pub fn into_result(self) -> Result<T, Fault> {
        self.result
    }

    pub fn as_result(&self) -> Result<&T, &Fault> {
        self.result.as_ref()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> InvocationOutcome<U> {
        InvocationOutcome {
            result: self.result.map(f),
        }
    }
}

impl<T> From<Result<T, Fault>> for InvocationOutcome<T> {
    fn from(result: Result<T, Fault>) -> Self {
        Self { result }
    }
}

impl<T> From<InvocationOutcome<T>> for Result<T, Fault> {
    fn from(outcome: InvocationOutcome<T>) -> Self {
        outcome.result
    }
}
