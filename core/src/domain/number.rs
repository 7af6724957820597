//! DID normalization into the canonical `{full, plus, national}` triple.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::calling_code::CallingCodeStrategy;
use crate::domain::reply::ParsedReply;

/// Top-level `meta` value of a successful provider reply
const SUCCESS_META: f64 = 200.0;

/// Fields probed, in order, when the reply shape is not trusted
const LENIENT_TOP_LEVEL_FIELDS: [&str; 3] = ["did", "number", "phone"];

/// Canonical representation of a leased number
///
/// `plus` is `full` without one leading `+`. `national` is `plus` minus as many
/// leading characters as the inferred calling code has, or empty when no
/// calling code could be inferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedNumber {
    pub full: String,
    pub plus: String,
    pub national: String,
}

impl NormalizedNumber {
    pub fn from_did(did: &str, calling_code: Option<&str>) -> Self {
        let plus = did.strip_prefix('+').unwrap_or(did).to_string();
        let national = match calling_code {
            Some(code) => plus.chars().skip(code.chars().count()).collect(),
            None => String::new(),
        };

        Self {
            full: did.to_string(),
            plus,
            national,
        }
    }

    /// Triple reported when no DID could be found at all
    pub fn empty() -> Self {
        Self {
            full: String::new(),
            plus: String::new(),
            national: String::new(),
        }
    }

    pub fn to_value(&self) -> Value {
        json!({
            "full": self.full,
            "plus": self.plus,
            "national": self.national,
        })
    }
}

/// DID of a reply in the recognized success shape
///
/// The shape is `{"meta": 200, "data": {"did": "<non-empty string>"}}`.
pub fn success_did(value: &Value) -> Option<&str> {
    let meta_ok = value
        .get("meta")
        .and_then(Value::as_f64)
        .map_or(false, |meta| meta == SUCCESS_META);
    if !meta_ok {
        return None;
    }

    value
        .get("data")
        .and_then(|data| data.get("did"))
        .and_then(Value::as_str)
        .filter(|did| !did.is_empty())
}

/// DID lookup that ignores the status discriminator
pub fn lenient_did(value: &Value) -> Option<&str> {
    let nested = value.get("data").and_then(|data| data.get("did"));
    std::iter::once(nested)
        .chain(LENIENT_TOP_LEVEL_FIELDS.iter().map(|field| value.get(*field)))
        .flatten()
        .filter_map(Value::as_str)
        .find(|did| !did.is_empty())
}

/// Normalize a reply using the trailing suffix of a country hint
pub fn normalize(parsed: &ParsedReply, country_hint: &str) -> Option<NormalizedNumber> {
    normalize_with(parsed, &CallingCodeStrategy::CountryHint(country_hint.to_string()))
}

/// Normalize a reply with an explicit calling-code strategy
///
/// Returns `None` when the reply is unstructured or not in the success shape;
/// the caller then passes the parsed payload through untouched.
pub fn normalize_with(
    parsed: &ParsedReply,
    strategy: &CallingCodeStrategy,
) -> Option<NormalizedNumber> {
    let did = success_did(parsed.as_structured()?)?;
    let code = strategy.resolve();
    let number = NormalizedNumber::from_did(did, code.as_deref());

    if !dg_shared::phone::is_valid_international_phone(&number.full) {
        tracing::debug!(
            did = %dg_shared::phone::mask_phone_number(&number.full),
            "provider returned a DID outside E.164"
        );
    }
    if code.is_none() {
        tracing::debug!("calling code unresolved, national form left empty");
    }

    Some(number)
}
