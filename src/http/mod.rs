pub mod client;
pub mod endpoints;

pub use client::{
    ApiClient, RequestOptions, TokenSource, build_http_client, encode_path_segment,
};
pub use endpoints::Endpoints;
