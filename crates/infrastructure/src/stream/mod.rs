mod backoff;
mod http_stream;
mod ndjson;

pub use backoff::Backoff;
pub use http_stream::HttpRecordStream;
pub use ndjson::NdjsonDecoder;
