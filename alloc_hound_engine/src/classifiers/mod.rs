// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! The allocation classifiers, one per implicit-allocation category.
//!
//! Classifiers never communicate with each other; the single sanctioned
//! overlap is the closure classifier emitting the method-group rule for
//! the capture-of-self-only case, which degrades into that category.

mod closure;
mod concatenation;
mod conversion;
mod enumerator;
mod explicit;

pub use closure::ClosureCaptureClassifier;
pub use concatenation::ConcatenationClassifier;
pub use conversion::ConversionClassifier;
pub use enumerator::EnumeratorClassifier;
pub use explicit::ExplicitAllocationClassifier;

use crate::dispatch::AllocationClassifier;

/// The full default classifier set, in no significant order.
pub fn default_classifiers() -> Vec<Box<dyn AllocationClassifier>> {
    vec![
        Box::new(ConversionClassifier),
        Box::new(ClosureCaptureClassifier),
        Box::new(ConcatenationClassifier),
        Box::new(EnumeratorClassifier),
        Box::new(ExplicitAllocationClassifier),
    ]
}
