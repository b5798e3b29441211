#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionConfidence {
    High,
    Medium,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    TypoCorrection,
}

/// A correction offered alongside an address; never applied silently.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    #[cfg_attr(feature = "with-serde", serde(rename = "type"))]
    pub kind: SuggestionKind,
    pub corrected_address: String,
    pub confidence: SuggestionConfidence,
}

/// Where a typo correction came from.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionSource {
    TypoTable,
    EditDistance,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DomainReport {
    pub valid: bool,
    pub domain: String,
    pub ascii_domain: String,
    pub typo: bool,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub suggestion: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub confidence: Option<SuggestionConfidence>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub source: Option<CorrectionSource>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub distance: Option<usize>,
    pub is_disposable: bool,
    pub is_popular_provider: bool,
}

impl DomainReport {
    /// The correction as a [`Suggestion`], when one was produced.
    pub fn to_suggestion(&self) -> Option<Suggestion> {
        let corrected_address = self.suggestion.clone()?;
        Some(Suggestion {
            kind: SuggestionKind::TypoCorrection,
            corrected_address,
            confidence: self.confidence.unwrap_or(SuggestionConfidence::High),
        })
    }
}
