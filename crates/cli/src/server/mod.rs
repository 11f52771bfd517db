pub mod stream;
pub mod web;

pub use stream::start_stream;
pub use web::start_web_server;
