//! Domain layer: canonical request, call, reply and response types.

pub mod call;
pub mod calling_code;
pub mod envelope;
pub mod number;
pub mod provider;
pub mod reply;
pub mod request;

pub use call::{CallBody, OutboundCall};
pub use calling_code::CallingCodeStrategy;
pub use envelope::ResponseEnvelope;
pub use number::NormalizedNumber;
pub use provider::ProviderId;
pub use reply::{ParsePolicy, ParsedReply, RawUpstreamReply, UnstructuredReason};
pub use request::{AmbientCredentials, PassthroughRequest, ProvisionRequest};
