//! HTTP Handlers

mod chapter;
mod ping;
mod reader;
mod search;

pub use chapter::*;
pub use ping::*;
pub use reader::*;
pub use search::*;
