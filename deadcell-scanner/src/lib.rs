pub mod cell;
pub mod classify;
pub mod error;
pub mod probe;
pub mod result;
pub mod scanner;

pub use cell::{Cell, cell_address};
pub use classify::{UrlCandidate, classify};
pub use error::ScanError;
pub use probe::{ProbeVerdict, Prober};
pub use result::{BrokenLink, ScanReport};
pub use scanner::Scanner;
