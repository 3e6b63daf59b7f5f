mod download;
mod print;
mod text;
mod word;

pub use download::download_file;
pub use print::print_view;
pub use text::{to_text, TEXT_FILENAME, TEXT_MIME};
pub use word::{to_word_html, WORD_FILENAME, WORD_MIME};
