use std::path::PathBuf;

/// Output written by `extract-data` when no destination is given.
pub const DEFAULT_EXTRACT_OUTPUT: &str = "output.bin";
/// Output written by `get-tables` when no destination is given.
pub const DEFAULT_TABLES_OUTPUT:  &str = "all-tables.txt";

/// Input and output paths for one run of either tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub input:  PathBuf,
    pub output: PathBuf,
}

impl ToolConfig {
    pub fn extractor(input: impl Into<PathBuf>) -> Self {
        Self { input: input.into(), output: PathBuf::from(DEFAULT_EXTRACT_OUTPUT) }
    }

    pub fn scanner(input: impl Into<PathBuf>) -> Self {
        Self { input: input.into(), output: PathBuf::from(DEFAULT_TABLES_OUTPUT) }
    }

    /// Replace the default destination.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}
