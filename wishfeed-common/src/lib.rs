pub mod cache;
pub mod chunk;
pub mod discovery;
pub mod media;
pub mod model;
pub mod reconcile;
pub mod report;
pub mod synthesize;
pub mod util;
