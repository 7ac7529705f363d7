pub mod registry;

pub use registry::{MockRegistry, SlowRegistry, create_test_resolver};
