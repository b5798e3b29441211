/// Outcome of the two independent syntax checks.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxChecks {
    pub grammar: bool,
    pub pattern: bool,
}

/// Heuristics that make an address look like a throwaway or placeholder.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspiciousPattern {
    TestPrefix,
    TempPrefix,
    NoReply,
    NumericLocal,
    ShortLocal,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxReport {
    pub valid: bool,
    pub reason: String,
    pub suspicious_score: u8,
    pub suspicious_patterns: Vec<SuspiciousPattern>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub validations: Option<SyntaxChecks>,
    /// Grammar violations, kept for diagnostics even when the pattern check
    /// accepted the address.
    pub grammar_reasons: Vec<String>,
}

impl SyntaxReport {
    pub(crate) fn rejected(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: reason.into(),
            suspicious_score: 0,
            suspicious_patterns: Vec::new(),
            validations: None,
            grammar_reasons: Vec::new(),
        }
    }
}
