use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Txt,
    Word,
    Pdf,
}

impl ExportFormat {
    /// Matches the `data-format` attribute on export menu entries.
    pub fn from_data_attr(value: &str) -> Option<Self> {
        match value {
            "txt" => Some(Self::Txt),
            "word" => Some(Self::Word),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn data_attr(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Word => "word",
            Self::Pdf => "pdf",
        }
    }
}

/// Checkbox state read at export time. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub include_time: bool,
    pub include_source: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_time: true,
            include_source: true,
        }
    }
}
