//! Text tools: codecs, converters, statistics and generators for plain text

mod base64_codec;
mod case_converter;
mod char_frequency;
mod csv_to_json;
mod html_entities;
mod line_counter;
mod lorem_ipsum;
mod markdown;
mod number_to_chinese;
mod text_dedup;
mod text_diff;
mod url_codec;

pub use base64_codec::Base64Tool;
pub use case_converter::CaseConverterTool;
pub use char_frequency::CharFrequencyTool;
pub use csv_to_json::CsvToJsonTool;
pub use html_entities::HtmlEntitiesTool;
pub use line_counter::{LineCounterTool, TextStats};
pub use lorem_ipsum::{LoremIpsumTool, LoremUnit};
pub use markdown::{MarkdownPreviewTool, markdown_to_html};
pub use number_to_chinese::NumberToChineseTool;
pub use text_dedup::TextDedupTool;
pub use text_diff::TextDiffTool;
pub use url_codec::{UrlTool, decode_component, encode_component};
