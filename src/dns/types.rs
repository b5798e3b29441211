use std::net::Ipv4Addr;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MxRecord {
    #[cfg_attr(feature = "with-serde", serde(rename = "priority"))]
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    #[cfg_attr(feature = "with-serde", serde(rename = "MX"))]
    Mx,
    #[cfg_attr(feature = "with-serde", serde(rename = "A"))]
    A,
}

/// Error text of each failed lookup, kept for diagnostics.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LookupAttempts {
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub mx_error: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub a_error: Option<String>,
}

impl LookupAttempts {
    pub fn is_empty(&self) -> bool {
        self.mx_error.is_none() && self.a_error.is_none()
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DnsReport {
    pub valid: bool,
    pub domain: String,
    #[cfg_attr(feature = "with-serde", serde(rename = "type", skip_serializing_if = "Option::is_none"))]
    pub kind: Option<RecordKind>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub records: Vec<MxRecord>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub addresses: Vec<Ipv4Addr>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub primary_mx: Option<String>,
    pub fallback: bool,
    pub cached: bool,
    pub details: String,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "LookupAttempts::is_empty"))]
    pub attempts: LookupAttempts,
}

impl DnsReport {
    pub(crate) fn mx(domain: &str, records: Vec<MxRecord>) -> Self {
        let primary_mx = records.first().map(|r| r.exchange.clone());
        Self {
            valid: true,
            domain: domain.to_string(),
            kind: Some(RecordKind::Mx),
            details: format!("Found {} MX record(s)", records.len()),
            records,
            primary_mx,
            ..Self::default()
        }
    }

    pub(crate) fn a_fallback(domain: &str, addresses: Vec<Ipv4Addr>, attempts: LookupAttempts) -> Self {
        Self {
            valid: true,
            domain: domain.to_string(),
            kind: Some(RecordKind::A),
            addresses,
            fallback: true,
            details: "No MX records, using A records (fallback)".to_string(),
            attempts,
            ..Self::default()
        }
    }

    pub(crate) fn lenient(domain: &str, attempts: LookupAttempts) -> Self {
        Self {
            valid: true,
            domain: domain.to_string(),
            fallback: true,
            details: format!("DNS check failed for popular provider {domain}, assuming valid"),
            attempts,
            ..Self::default()
        }
    }

    pub(crate) fn failed(domain: &str, attempts: LookupAttempts) -> Self {
        Self {
            valid: false,
            domain: domain.to_string(),
            details: "No mail-capable DNS records found".to_string(),
            attempts,
            ..Self::default()
        }
    }

    pub(crate) fn no_domain() -> Self {
        Self {
            details: "No domain found".to_string(),
            ..Self::default()
        }
    }

    /// Host an SMTP probe should connect to: the preferred exchanger, or the
    /// domain itself for implicit-MX (A record or lenient) reports.
    pub fn mail_host(&self) -> Option<&str> {
        if !self.valid {
            return None;
        }
        self.primary_mx
            .as_deref()
            .or_else(|| (!self.domain.is_empty()).then_some(self.domain.as_str()))
    }
}
