use super::BatchOptions;
#[cfg(feature = "with-serde")]
use super::BatchError;

/// A batch as received at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchRequest {
    pub emails: Vec<String>,
    pub options: BatchOptions,
    /// Entries in the submitted list, including dropped non-strings.
    /// The batch cap applies to this count.
    pub submitted: usize,
}

impl BatchRequest {
    pub fn new(emails: Vec<String>, options: BatchOptions) -> Self {
        Self {
            submitted: emails.len(),
            emails,
            options,
        }
    }

    /// Parses `{"emails": [...], "options": {...}}`.
    ///
    /// Non-string entries in `emails` are dropped; a missing or `null`
    /// `options` takes the defaults.
    #[cfg(feature = "with-serde")]
    pub fn from_json(body: &str) -> Result<Self, BatchError> {
        use serde::Deserialize;
        use serde_json::Value;

        let value: Value = serde_json::from_str(body).map_err(BatchError::malformed)?;
        let Some(entries) = value.get("emails").and_then(Value::as_array) else {
            return Err(BatchError::NotAList);
        };
        let emails = entries
            .iter()
            .filter_map(|entry| entry.as_str().map(str::to_owned))
            .collect();
        let options = match value.get("options") {
            None | Some(Value::Null) => BatchOptions::default(),
            Some(raw) => BatchOptions::deserialize(raw).map_err(BatchError::malformed)?,
        };
        Ok(Self {
            emails,
            options,
            submitted: entries.len(),
        })
    }
}

#[cfg(all(test, feature = "with-serde"))]
mod tests {
    use super::*;

    #[test]
    fn parses_emails_and_camel_case_options() {
        let request = BatchRequest::from_json(
            r#"{"emails":["a@example.com",42,null,"b@example.com"],
                "options":{"skipSMTP":true,"strictValidation":true,"timeout":1500}}"#,
        )
        .unwrap();
        assert_eq!(request.emails, vec!["a@example.com", "b@example.com"]);
        assert!(request.options.skip_smtp);
        assert!(request.options.strict_validation);
        assert_eq!(request.options.timeout, 1500);
        assert!(request.options.check_disposable);
        assert!(request.options.include_suggestions);
    }

    #[test]
    fn submitted_counts_dropped_entries() {
        let mut entries: Vec<_> = (0..100)
            .map(|i| serde_json::Value::from(format!("u{i}@example.com")))
            .collect();
        entries.push(serde_json::Value::Null);
        let body = serde_json::json!({ "emails": entries }).to_string();

        let request = BatchRequest::from_json(&body).unwrap();
        assert_eq!(request.emails.len(), 100);
        assert_eq!(request.submitted, 101);
    }

    #[test]
    fn missing_options_take_defaults() {
        let request = BatchRequest::from_json(r#"{"emails":[]}"#).unwrap();
        assert_eq!(request.options, BatchOptions::default());
        assert_eq!(request.options.timeout, 8_000);
    }

    #[test]
    fn emails_must_be_a_list() {
        for body in [r#"{"emails":"a@example.com"}"#, r#"{}"#, r#"[1,2]"#] {
            assert!(matches!(
                BatchRequest::from_json(body),
                Err(BatchError::NotAList)
            ));
        }
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert!(matches!(
            BatchRequest::from_json("{emails:"),
            Err(BatchError::Malformed(_))
        ));
        assert!(matches!(
            BatchRequest::from_json(r#"{"emails":[],"options":{"timeout":"soon"}}"#),
            Err(BatchError::Malformed(_))
        ));
    }
}
