use thiserror::Error;

/// Failures a caller may want to tell apart. Everything else travels as a
/// plain `anyhow::Error` with context attached.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A required column is absent from the input file.
    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: String },

    /// Input file extension the loader does not understand.
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// Palette entry that is not a `#rrggbb` hex string.
    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),

    /// Numeric cell that could not be parsed even after stripping `$` and `,`.
    #[error("invalid numeric value '{0}'")]
    InvalidAmount(String),

    /// Failure while turning the rendered buffer into an image file.
    #[error("image encoding failed: {0}")]
    ImageEncode(String),
}
