mod cve;
mod research;
mod trending;

pub use cve::CveRecord;
pub use research::ResearchCommand;
pub use trending::{TrendingPeriod, TrendingRepo};
