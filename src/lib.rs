pub mod errors;
pub mod models;
pub mod rate_limiter;
pub mod url_check_service;
pub mod validation;
