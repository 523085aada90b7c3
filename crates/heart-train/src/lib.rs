//! Heart Train - offline fitting of the gesture model
//!
//! dataset → stratified split → scaler fitted on the training split →
//! logistic regression on scaled features → evaluation on the held-out split.
//!
//! Training is deterministic for a given dataset and [`TrainConfig`].

pub mod fit;
pub mod metrics;
pub mod pipeline;
pub mod split;

pub use fit::*;
pub use metrics::*;
pub use pipeline::*;
pub use split::*;
