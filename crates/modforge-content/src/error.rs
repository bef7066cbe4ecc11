use serde::Serialize;
use std::fmt;

///
/// ErrorTree
///
/// Flat collector for validation failures. Passes accumulate messages and
/// convert to a `Result` at the end, so one walk surfaces every problem
/// instead of the first.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct ErrorTree {
    errors: Vec<String>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, err: impl ToString) {
        self.errors.push(err.to_string());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

// err
/// Push a formatted message onto an `ErrorTree`.
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}

// report
// Single choke point for dual-channel reporting: emits the structured
// diagnostic, then hands the error back for propagation. Every fatal
// construction failure goes through here.
pub(crate) fn report<E: std::error::Error>(err: E) -> E {
    tracing::error!(target: "modforge::content", error = %err, "content definition rejected");

    err
}

///
/// TESTS
///
