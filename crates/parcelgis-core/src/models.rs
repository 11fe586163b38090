pub mod candidate;
pub mod descriptor;
pub mod feature;

pub use candidate::{CandidateDocument, EnrichmentRecord, SpatialCandidate};
pub use descriptor::{DescriptorPair, GeometryDescriptor};
pub use feature::{ParcelCollection, ParcelFeature};
