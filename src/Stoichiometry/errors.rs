use num_bigint::BigInt;
use thiserror::Error;

/// error kinds of the stoichiometry core. Every operation reports its failure
/// through this type, no partial results are returned alongside an error
#[derive(Debug, Error)]
pub enum StoichError {
    #[error("Malformed formula: {0}")]
    MalformedFormula(String),
    #[error("Division by zero in exact fraction")]
    DivisionByZero,
    /// a single free column is only reported when no element crosses the arrow
    #[error("Reaction cannot be balanced uniquely: {}", unique_balance_reason(*free_columns))]
    CannotBalanceUniquely { free_columns: usize },
    #[error("Balanced coefficients have inconsistent signs: {}", join_integers(.0))]
    InconsistentSigns(Vec<BigInt>),
    #[error("No reactant has a positive initial amount")]
    NoReactantSupplied,
    #[error("Molar mass is unknown for '{0}'")]
    MissingMolarMass(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type StoichResult<T> = Result<T, StoichError>;

fn unique_balance_reason(free_columns: usize) -> String {
    if free_columns == 1 {
        "no element occurs on both sides of the arrow".to_string()
    } else {
        format!(
            "{} free columns after elimination (exactly 1 required)",
            free_columns
        )
    }
}

fn join_integers(values: &[BigInt]) -> String {
    let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", values.join(", "))
}
