//! Transcript Module
//!
//! Video id parsing, language resolution, the provider boundary and the
//! cache-aside service that ties them together.

mod fallback;
pub mod language;
mod provider;
mod record;
mod service;
mod video_id;
mod youtube;


pub use fallback::{FallbackProvider, ProviderState, ProviderStatus};
pub use language::{LanguageResolver, FALLBACK_TABLE_VERSION};
pub use provider::{ProviderError, TranscriptProvider};
pub use record::{TranscriptRecord, TranscriptSegment};
pub use service::{Fetched, TranscriptService};
pub use video_id::{is_valid_id, VideoId};
pub use youtube::YoutubeProvider;
