//! Rule-based conversational assistant for the showroom catalog.
//!
//! The pipeline is deliberately deterministic: the input text is matched
//! against a locale keyword table and the catalog to produce a
//! [`ChatIntent`], and the intent is executed against the catalog to
//! produce a [`ChatReply`]. No model calls, no session state.

pub mod intent;
pub mod keywords;
pub mod reply;

pub use intent::{classify, ChatIntent, SuperlativeKind};
pub use keywords::KeywordTable;
pub use reply::{Assistant, ChatBranch, ChatReply, SpecSummary};
