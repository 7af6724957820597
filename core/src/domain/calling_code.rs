//! Calling-code extraction strategies.
//!
//! Providers never report the calling code of the DID they lease, so its
//! length is inferred from whatever the caller sent: a country hint ending in
//! `-<digits>`, a query parameter, or a field of a forwarded multipart body.
//! Only the *length* of the result is used by the normalizer. A hint whose
//! numeric suffix differs in length from the real calling code yields a wrong
//! national number; this is a known limitation of the heuristic.

use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-(\d+)$").expect("valid trailing code regex"));

static MULTIPART_APP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"name="app"[\s\S]*?\r\n\r\n(.*?)\r\n"#).expect("valid multipart app regex")
});

/// Where the calling code of a reply comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallingCodeStrategy {
    /// Trailing `-<digits>` suffix of a country hint
    CountryHint(String),
    /// Code already extracted by the adapter
    Known(String),
    /// Nothing to go on; the national form stays empty
    Unresolved,
}

impl CallingCodeStrategy {
    pub fn resolve(&self) -> Option<String> {
        match self {
            CallingCodeStrategy::CountryHint(hint) => trailing_code_suffix(hint).map(str::to_string),
            CallingCodeStrategy::Known(code) if !code.is_empty() => Some(code.clone()),
            CallingCodeStrategy::Known(_) | CallingCodeStrategy::Unresolved => None,
        }
    }
}

/// Digits after the last hyphen, when the hint ends with them
///
/// `master--TJ-992` yields `992`; `US` yields nothing.
pub fn trailing_code_suffix(hint: &str) -> Option<&str> {
    TRAILING_CODE_REGEX
        .captures(hint)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Value of the `app` part in a raw `multipart/form-data` body
pub fn multipart_app_field(body: &str) -> Option<&str> {
    MULTIPART_APP_REGEX
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// First value of a query parameter
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_code_suffix() {
        assert_eq!(trailing_code_suffix("master--TJ-992"), Some("992"));
        assert_eq!(trailing_code_suffix("gb-44"), Some("44"));
        assert_eq!(trailing_code_suffix("US"), None);
        assert_eq!(trailing_code_suffix("TJ-992-x"), None);
        assert_eq!(trailing_code_suffix("992"), None);
    }

    #[test]
    fn test_multipart_app_field() {
        let body = "------b\r\nContent-Disposition: form-data; name=\"carrier\"\r\n\r\ntcell\r\n------b\r\nContent-Disposition: form-data; name=\"app\"\r\n\r\nmaster--TJ-992\r\n------b--\r\n";
        assert_eq!(multipart_app_field(body), Some("master--TJ-992"));

        let without_app = "------b\r\nContent-Disposition: form-data; name=\"carrier\"\r\n\r\ntcell\r\n------b--\r\n";
        assert_eq!(multipart_app_field(without_app), None);
        assert_eq!(multipart_app_field("app=master--TJ-992"), None);
    }

    #[test]
    fn test_query_param() {
        let url = "https://onepva.com/api/sms/?app=tg&country=tj&code=992";
        assert_eq!(query_param(url, "code").as_deref(), Some("992"));
        assert_eq!(query_param(url, "auth-token"), None);
        assert_eq!(query_param("not a url", "code"), None);
    }

    #[test]
    fn test_strategy_resolution() {
        assert_eq!(
            CallingCodeStrategy::CountryHint("master--TJ-992".into()).resolve().as_deref(),
            Some("992")
        );
        assert_eq!(CallingCodeStrategy::Known("1".into()).resolve().as_deref(), Some("1"));
        assert_eq!(CallingCodeStrategy::Known(String::new()).resolve(), None);
        assert_eq!(CallingCodeStrategy::Unresolved.resolve(), None);
    }
}
