pub mod encoding;
pub mod xml;
