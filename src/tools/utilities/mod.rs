//! Utility tools: generators, lookups and parsers

mod ip_converter;
mod mime_lookup;
mod password;
mod url_parser;
mod user_agent;
mod uuid_generator;

pub use ip_converter::{AddressClass, IpConverterTool};
pub use mime_lookup::MimeLookupTool;
pub use password::{PasswordGeneratorTool, PasswordPolicy, generate_password};
pub use url_parser::UrlParserTool;
pub use user_agent::{UserAgentInfo, UserAgentParserTool, parse_user_agent};
pub use uuid_generator::UuidGeneratorTool;
