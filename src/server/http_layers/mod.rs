mod requests_logging;

pub use requests_logging::*;
