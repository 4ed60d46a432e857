//! Canonical hashing of requests.
//!
//! Hashes are computed over the JSON Canonicalization Scheme (RFC 8785) form
//! of a request, so key order and whitespace in the source document never
//! change the result:
//!
//! ```text
//! hash = hex(BLAKE3(JCS(json)))
//! ```

use crate::error::SpecError;
use crate::format::AudioFormat;
use crate::params::Sound;
use crate::request::Request;

/// Computes the canonical BLAKE3 hash of a whole request.
///
/// # Example
/// ```
/// use chiptone_spec::{Request, ToneParams};
/// use chiptone_spec::hash::canonical_request_hash;
///
/// let request = Request::tone("blip", ToneParams::new(440.0, 50));
/// let hash = canonical_request_hash(&request).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_request_hash(request: &Request) -> Result<String, SpecError> {
    let value = request.to_value()?;
    Ok(canonical_value_hash(&value))
}

/// Computes the canonical hash of the synthesis parameters only.
///
/// `id` and `description` are excluded, so two requests that render the
/// same bytes share a hash. This is the key used for cached renders.
pub fn canonical_sound_hash(format: &AudioFormat, sound: &Sound) -> Result<String, SpecError> {
    let value = serde_json::json!({
        "format": serde_json::to_value(format)?,
        "sound": serde_json::to_value(sound)?,
    });
    Ok(canonical_value_hash(&value))
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    let canonical = canonicalize_json(value);
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Canonicalizes a JSON value according to RFC 8785 (JCS).
///
/// - Object keys are sorted lexicographically
/// - No whitespace between tokens
/// - Integral floats are written without a fraction
/// - Strings use minimal escaping
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => format_jcs_number(n),
        serde_json::Value::String(s) => format_jcs_string(s),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_json).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let pairs: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| format!("{}:{}", format_jcs_string(k), canonicalize_json(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

/// Formats a number according to JCS rules.
fn format_jcs_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => format_ecmascript_f64(f),
        _ => "null".to_string(),
    }
}

/// Serializes a finite double the way ECMAScript `Number.prototype.toString`
/// does: shortest round-trip digits, plain notation for magnitudes in
/// `[1e-6, 1e21)` and `d.ddde±n` outside it.
fn format_ecmascript_f64(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let sign = if f < 0.0 { "-" } else { "" };

    // `{:e}` yields the shortest round-trip digits as `d.ddde<exp>`.
    let sci = format!("{:e}", f.abs());
    let (mantissa, exp) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exp.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let exp_sign = if n - 1 < 0 { "-" } else { "+" };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", lead, exp_sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", lead, rest, exp_sign, (n - 1).abs())
        }
    };
    format!("{}{}", sign, body)
}

/// Formats a string according to JCS rules.
fn format_jcs_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c < '\x20' => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}
