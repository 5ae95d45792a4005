//! HTTP protocol layer module
//!
//! Form body decoding and response builders, decoupled from the handlers that use them.

pub mod form;
pub mod response;

// Re-export commonly used types
pub use form::FormFields;
pub use response::{
    build_400_response, build_405_response, build_413_response, build_500_response,
    build_health_response, build_json_response, build_options_response, FORM_ALLOW,
    HEALTH_ALLOW,
};
