pub mod delimiter;
pub mod formats;
pub mod json_utils;

pub use delimiter::comma_to_newline;
pub use formats::convert_json_yaml;
