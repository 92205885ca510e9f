//! Config redaction: produce safe-to-log config snapshots by masking secrets.

use serde_json::Value;

/// Keys whose values are secrets.
static SECRET_KEYS: &[&str] = &["token", "bot_token", "botToken", "secret", "password"];

fn is_sensitive_key(key: &str) -> bool {
    SECRET_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// Keep a 4-char hint of a secret, mask the rest.
pub fn mask_secret(s: &str) -> String {
    match s.char_indices().nth(4) {
        Some((cut, _)) => format!("{}***", &s[..cut]),
        None => "***".to_string(),
    }
}

/// Redact a config JSON value, replacing sensitive fields with masked hints.
pub fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                let redacted = match v {
                    Value::String(s) if is_sensitive_key(k) && !s.is_empty() => {
                        Value::String(mask_secret(s))
                    }
                    other => redact(other),
                };
                out.insert(k.clone(), redacted);
            }
            Value::Object(out)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(redact).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn masks_token_fields() {
        let v = json!({"token": "MTAyNDU2Nzg5.abc", "prefix": "!"});
        let r = redact(&v);
        assert_eq!(r["token"], "MTAy***");
        assert_eq!(r["prefix"], "!");
    }

    #[test]
    fn short_secrets_fully_masked() {
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret("abcd"), "***");
        assert_eq!(mask_secret("abcde"), "abcd***");
    }

    #[test]
    fn nested_objects() {
        let v = json!({"discord": {"botToken": "secretsecret"}});
        assert_eq!(redact(&v)["discord"]["botToken"], "secr***");
    }
}
