//! Unit tests for provider adapters

mod onepva_tests;

use dg_core::domain::reply::parse;
use dg_core::domain::{ParsePolicy, ParsedReply, RawUpstreamReply};

pub(crate) fn parsed(content_type: &str, body: &str, policy: ParsePolicy) -> ParsedReply {
    parse(
        &RawUpstreamReply::new(200, Some(content_type.to_string()), body),
        policy,
    )
}
