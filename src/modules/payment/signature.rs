//! PayFast signature scheme.
//!
//! The gateway hashes the canonical form-encoded rendering of a field
//! set with MD5. MD5 is what the gateway protocol mandates; it is an
//! interoperability requirement, not a strength choice, and swapping
//! it for a stronger digest breaks verification on the gateway side.

use super::model::FieldSet;

/// Field carrying the signature itself; never part of the canonical
/// string it signs.
pub const SIGNATURE_FIELD: &str = "signature";

// Classic form encoding: uppercase percent-escapes, space as `+`.
fn encode_component(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

/// Renders the canonical string the gateway hashes: `name=value`
/// pairs joined by `&` in insertion order, with empty values and the
/// signature field skipped, and the passphrase (when configured)
/// appended last.
pub fn canonicalize(fields: &FieldSet, passphrase: Option<&str>) -> String {
    let mut data = String::new();

    for (name, value) in fields.iter() {
        if name == SIGNATURE_FIELD || value.is_empty() {
            continue;
        }

        data.push_str(name);
        data.push('=');
        data.push_str(&encode_component(value));
        data.push('&');
    }

    if data.ends_with('&') {
        data.pop();
    }

    if let Some(passphrase) = passphrase.filter(|passphrase| !passphrase.is_empty()) {
        data.push_str("&passphrase=");
        data.push_str(&encode_component(passphrase));
    }

    data
}

pub fn sign(fields: &FieldSet, passphrase: Option<&str>) -> String {
    format!("{:x}", md5::compute(canonicalize(fields, passphrase)))
}

/// Recomputes the signature and compares it to the candidate. The
/// digest is lowercase hex by convention but inbound values may
/// arrive in any case, so the candidate is lowercased first.
pub fn verify(fields: &FieldSet, passphrase: Option<&str>, candidate: &str) -> bool {
    sign(fields, passphrase) == candidate.to_ascii_lowercase()
}
