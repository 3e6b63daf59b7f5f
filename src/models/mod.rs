mod export;
mod note;

pub use export::{ExportFormat, ExportOptions};
pub use note::{Collection, Note};
