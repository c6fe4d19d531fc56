use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::ValidateEmail;

lazy_static! {
    /// Digits-only rule for id fields: no sign, no decimal point
    /// - Valid: "0", "42", "007"
    /// - Invalid: "", "-1", "1.5", "1e3", " 1", "abc"
    pub static ref ID_REGEX: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// One failed rule for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Collected validation outcome. Every applicable rule is checked and
/// recorded; nothing short-circuits on the first failure.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Render in the wire format, one `<message>; ` segment per failing
    /// field, in the order the rules were applied.
    pub fn to_message(&self) -> String {
        self.0
            .iter()
            .map(|e| format!("{}; ", e.message))
            .collect()
    }
}

/// Escape HTML/attribute metacharacters. Applied to every text field before
/// it is persisted or compared, so the stored string may differ from the
/// raw input.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn is_valid_id(value: &str) -> bool {
    ID_REGEX.is_match(value)
}

/// Parse an id after the digits-only rule. Values that overflow i32 are
/// treated the same as malformed ones.
pub fn parse_id(value: &str) -> Option<i32> {
    if !is_valid_id(value) {
        return None;
    }
    value.parse::<i32>().ok()
}

/// Non-empty rule for a required text field, applied to the escaped form.
pub fn require_text(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if escape(value).is_empty() {
        errors.push(field, format!("invalid {}", field));
    }
}

/// Digits-only rule for an id carried in a request body.
pub fn require_id(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if !is_valid_id(value) {
        errors.push(field, format!("invalid {}", field));
    }
}

/// Non-empty + structural syntax rule for an email field, applied to the
/// escaped form.
pub fn require_email(errors: &mut FieldErrors, field: &'static str, value: &str) {
    let escaped = escape(value);
    if escaped.is_empty() || !escaped.validate_email() {
        errors.push(field, format!("invalid {}", field));
    }
}

/// Deserialize an id-like body field from either a JSON number or string, so
/// the digits-only rule sees the raw textual form. Absent and non-scalar
/// values become the empty string, which the rule rejects.
pub fn de_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_regex_accepts_digits_only() {
        assert!(is_valid_id("0"));
        assert!(is_valid_id("42"));
        assert!(is_valid_id("007"));
    }

    #[test]
    fn id_regex_rejects_signs_decimals_and_text() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("-1"));
        assert!(!is_valid_id("+1"));
        assert!(!is_valid_id("1.5"));
        assert!(!is_valid_id("1e3"));
        assert!(!is_valid_id(" 1"));
        assert!(!is_valid_id("12a"));
    }

    #[test]
    fn parse_id_rejects_i32_overflow() {
        assert_eq!(parse_id("2147483647"), Some(i32::MAX));
        assert_eq!(parse_id("2147483648"), None);
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(escape("O'Brien"), "O&#x27;Brien");
        assert_eq!(escape("a/b\\c`d\"e"), "a&#x2F;b&#x5C;c&#96;d&quot;e");
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn field_errors_render_in_rule_order() {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "firstName", "");
        require_email(&mut errors, "email", "not-an-email");
        assert_eq!(errors.to_message(), "invalid firstName; invalid email; ");

        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["firstName", "email"]);
    }

    #[test]
    fn require_email_accepts_valid_syntax() {
        let mut errors = FieldErrors::new();
        require_email(&mut errors, "email", "ada@example.com");
        assert!(errors.is_empty());
    }

    #[test]
    fn de_lenient_string_accepts_number_and_string() {
        #[derive(Debug, serde::Deserialize)]
        struct Body {
            #[serde(default, deserialize_with = "super::de_lenient_string")]
            id: String,
        }

        let from_number: Body = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(from_number.id, "7");

        let from_string: Body = serde_json::from_str(r#"{"id": "7"}"#).unwrap();
        assert_eq!(from_string.id, "7");

        let negative: Body = serde_json::from_str(r#"{"id": -7}"#).unwrap();
        assert!(!is_valid_id(&negative.id));

        let absent: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.id, "");
    }
}
