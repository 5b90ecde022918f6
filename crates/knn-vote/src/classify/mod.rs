//! Partitioned k-NN classification.
//!
//! Each partition is scanned by a [`PartitionWorker`], which keeps only its
//! `k_local` nearest candidates. A [`Merger`] then keeps the `k_global`
//! nearest of all those candidates and the majority label among them is the
//! classification. As long as `k_local >= k_global`, this gives the same
//! answer as a single scan over all the data.

mod candidate;
mod merger;
mod pool;
mod worker;

pub use candidate::LabeledCandidate;
pub use merger::{merge, Classification, Merger};
pub use pool::{classify, classify_linear, par_classify, par_classify_streaming};
pub use worker::{PartitionWorker, ScanStats};
