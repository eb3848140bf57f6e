use thiserror::Error;

/// Errors raised while building a producer or converting raw samples.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Catalog or filter misconfiguration detected at producer build time.
    #[error("invalid catalog: {0}")]
    Construction(String),

    /// A sampled raw key has no attribute mapping in its metric's table.
    #[error("missing attribute mapping: {0}")]
    MissingAttribute(String),

    /// A conversion function was invoked without an output slot.
    #[error("no aggregation slot supplied")]
    MissingSlot,

    /// A raw sample carried a different value kind than the catalog expects.
    #[error("unexpected value kind for {key}: expected {expected}, got {actual}")]
    UnexpectedKind {
        /// Raw counter key of the offending sample.
        key: String,
        /// Value kind the conversion function requires.
        expected: &'static str,
        /// Value kind the sample actually carried.
        actual: &'static str,
    },

    /// Several conversion errors collected from one produce pass.
    #[error("{}", join_display(.0))]
    Multiple(Vec<BridgeError>),
}

/// Result type alias for runtime-bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

fn join_display(errors: &[BridgeError]) -> String {
    let mut out = String::new();
    for (i, err) in errors.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        out.push_str(&err.to_string());
    }
    out
}

impl BridgeError {
    /// Creates a new construction error
    pub fn construction<S: Into<String>>(msg: S) -> Self {
        Self::Construction(msg.into())
    }

    /// Creates a new missing-attribute error
    pub fn missing_attribute<S: Into<String>>(key: S) -> Self {
        Self::MissingAttribute(key.into())
    }

    /// Creates a new unexpected-kind error
    pub fn unexpected_kind<S: Into<String>>(
        key: S,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::UnexpectedKind {
            key: key.into(),
            expected,
            actual,
        }
    }

    /// Joins accumulated errors into one combined result.
    ///
    /// An empty list is success, a single error passes through unchanged,
    /// anything more folds into [`BridgeError::Multiple`].
    pub fn join(mut errors: Vec<BridgeError>) -> Result<()> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(BridgeError::Multiple(errors)),
        }
    }

    /// Returns the error category for metrics/logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Construction(_) => "construction",
            Self::MissingAttribute(_) => "attributes",
            Self::MissingSlot => "contract",
            Self::UnexpectedKind { .. } => "kind",
            Self::Multiple(_) => "multiple",
        }
    }
}
