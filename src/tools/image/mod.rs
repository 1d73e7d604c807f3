//! Image tools

mod image_base64;

pub use image_base64::{DataUri, ImageBase64Tool};
