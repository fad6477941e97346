//! Library components of the `biosample` command line tool.

pub mod logging;
pub mod pipeline;
pub mod summary;
