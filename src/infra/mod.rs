pub mod boot;
pub mod config;
pub mod http {
    pub mod headers;
    pub mod json;
}
pub mod http_app;
pub mod logging;
pub mod runtime;
