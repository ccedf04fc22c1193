//! Invoice line classification, GL resolution and summary aggregation.

pub mod aggregator;
pub mod classifier;
pub mod pipeline;
pub mod resolver;
pub mod rules;

pub use aggregator::{Aggregator, MergeRule, PRIMARY_BEVERAGE_CATEGORY};
pub use classifier::LineClassifier;
pub use pipeline::{Extraction, ExtractionPipeline};
pub use resolver::{ItemResolver, ReferenceLookup};
pub use rules::{ItemRowCandidate, LineMatch, LineRule, SurchargeCandidate, SurchargeKind};
