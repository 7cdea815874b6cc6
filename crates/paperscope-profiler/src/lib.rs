//! paperscope-profiler — Deterministic paper profiling.
//!
//! Reads a paper's title, abstract and concept tags and reports which
//! methods it uses, which topics it covers, what kind of paper it is and a
//! quality score. Detection is phrase matching against the taxonomy
//! lexicons; nothing here is learned or cached.

pub mod concepts;
pub mod detect;
pub mod meta;
pub mod profile;
pub mod quality;

pub use detect::{ChannelHit, MAX_EVIDENCE};
pub use meta::MetaFlags;
pub use profile::{DetectedMethod, DetectedTopic, PaperProfile, PaperProfiler, TopicSource};
pub use quality::{parse_publication_date, quality_score};
