//! General-purpose address grammar: RFC 5322 atext local part and
//! DNS-shaped domain labels after IDNA conversion.

pub(crate) const MAX_ADDRESS_LEN: usize = 254;
pub(crate) const MAX_LOCAL_LEN: usize = 64;
pub(crate) const MAX_LABEL_LEN: usize = 63;

/// Non-alphanumeric atext characters (RFC 5322 §3.2.3).
const ATEXT_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~";

/// Returns the list of grammar violations; empty means the address is valid.
pub(crate) fn grammar_violations(address: &str) -> Vec<String> {
    let mut reasons = Vec::new();

    if address.len() > MAX_ADDRESS_LEN {
        reasons.push(format!(
            "total length {} > {MAX_ADDRESS_LEN}",
            address.len()
        ));
    }

    let (local, domain) = match address.split_once('@') {
        Some((local, domain)) if !domain.contains('@') => (local, domain),
        _ => {
            reasons.push("must contain exactly one '@'".to_string());
            return reasons;
        }
    };

    if !(1..=MAX_LOCAL_LEN).contains(&local.len()) {
        reasons.push(format!(
            "local part length {} invalid (1..={MAX_LOCAL_LEN})",
            local.len()
        ));
    }
    if !is_dot_atom(local) {
        reasons.push("invalid local part".to_string());
    }

    let ascii = match idna::domain_to_ascii(domain) {
        Ok(ascii) if !ascii.is_empty() => ascii,
        Ok(_) => {
            reasons.push("domain empty after IDNA conversion".to_string());
            return reasons;
        }
        Err(_) => {
            reasons.push("domain punycode conversion failed".to_string());
            return reasons;
        }
    };
    if !ascii.contains('.') {
        reasons.push(format!("domain '{ascii}' needs at least one dot"));
    }
    reasons.extend(ascii.split('.').filter_map(label_violation));
    reasons
}

/// Dot-separated runs of atext; dots never lead, trail or repeat.
fn is_dot_atom(s: &str) -> bool {
    s.split('.').all(|atom| {
        !atom.is_empty()
            && atom
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || ATEXT_SPECIALS.contains(c))
    })
}

/// First problem with one ASCII domain label, if any.
fn label_violation(label: &str) -> Option<String> {
    if label.is_empty() {
        return Some("empty domain label".to_string());
    }
    let problem = if label.len() > MAX_LABEL_LEN {
        format!("is {} bytes, over {MAX_LABEL_LEN}", label.len())
    } else if label.starts_with('-') || label.ends_with('-') {
        "starts or ends with '-'".to_string()
    } else if let Some(c) = label
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
    {
        format!("contains '{c}'")
    } else {
        return None;
    };
    Some(format!("domain label '{label}' {problem}"))
}
