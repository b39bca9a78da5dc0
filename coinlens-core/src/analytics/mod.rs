//! The numeric pipeline: align, normalize, correlate.
//!
//! Raw per-asset series are joined onto the first series' timestamps, each
//! column is min-max normalized against its own full raw series, and the
//! resulting table feeds a Pearson correlation matrix. Degenerate inputs
//! (constant series, non-finite values, zero-variance columns) degrade to
//! fixed values instead of erroring; shape violations (duplicate keys,
//! mismatched lengths under index alignment) are rejected up front.

pub mod align;
pub mod correlate;
pub mod normalize;

pub use align::{AlignedFrame, align};
pub use correlate::{correlation_matrix, pearson};
pub use normalize::{align_and_normalize, normalize, normalize_against};
