pub mod remote_fetch;
pub mod temperature_reader;

pub use remote_fetch::{FetchOutcome, RemoteFetcher};
pub use temperature_reader::{LoadReport, MalformedRowPolicy, TemperatureReader};
