//! RTF parsing module.

mod control;
mod options;
mod rtf_parser;
mod scanner;
pub mod substitution;

pub use control::ControlWord;
pub use options::{encoding_for_code_page, ParseOptions, DEFAULT_CODE_PAGE};
pub use rtf_parser::RtfParser;
pub use scanner::{Scanner, Token};
pub use substitution::{normalize, SubstitutionOptions, TextEncoding};
