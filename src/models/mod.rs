pub mod disease;
pub mod enums;

pub use disease::{DiseaseRecord, DiseaseSummary, RelatedCondition};
pub use enums::{InvalidEnum, Severity};
