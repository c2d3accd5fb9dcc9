pub mod http;

pub use http::{CurlTransport, HttpClient, HttpResponse};
