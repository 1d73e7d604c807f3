//! Developer tools: formatters, inspectors and converters for code and data

mod binary_converter;
mod color;
mod cron;
mod hash_calculator;
mod json_diff;
mod json_formatter;
mod jwt;
mod regex_tester;
mod sql_formatter;
mod xml_formatter;
mod yaml_converter;

pub use binary_converter::BinaryConverterTool;
pub use color::{ColorConverterTool, ColorPickerTool, Rgb};
pub use cron::{CronBuilderTool, CronParserTool, CronSchedule};
pub use hash_calculator::{HashAlgorithm, HashCalculatorTool};
pub use json_diff::JsonDiffTool;
pub use json_formatter::JsonFormatterTool;
pub use jwt::{JwtDecoderTool, JwtGeneratorTool};
pub use regex_tester::RegexTesterTool;
pub use sql_formatter::SqlFormatterTool;
pub use xml_formatter::XmlFormatterTool;
pub use yaml_converter::YamlConverterTool;

pub(crate) use json_formatter::pretty_json;
