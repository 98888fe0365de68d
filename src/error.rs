use std::fmt::{Display, Formatter};

// Pipeline stage
//------------------------------------------------------------------------------

/// The pipeline step a wrapped failure originated from.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Stage {
    Encode,
    Render,
    Compose,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let msg = match *self {
            Self::Encode => "encode",
            Self::Render => "render",
            Self::Compose => "compose",
        };
        f.write_str(msg)
    }
}

// Error
//------------------------------------------------------------------------------

#[derive(Debug)]
pub enum Error {
    // Single item pipeline
    EmptyPayload,
    Encoding(qrcode::types::QrError),
    ColorFormat(String),
    LogoDecode(image::ImageError),
    Stage { stage: Stage, source: Box<Error> },

    // Bulk pipeline
    Schema { missing: Vec<String> },
    Row { row: usize, source: Box<Error> },
    Workbook(calamine::XlsxError),
    Archive(zip::result::ZipError),

    // Serialization & staging
    Image(image::ImageError),
    Io(std::io::Error),
}

impl Error {
    pub(crate) fn stage(stage: Stage, source: Error) -> Self {
        Self::Stage { stage, source: Box::new(source) }
    }

    pub(crate) fn row(row: usize, source: Error) -> Self {
        Self::Row { row, source: Box::new(source) }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::EmptyPayload => f.write_str("Empty payload"),
            Self::Encoding(e) => write!(f, "Payload cannot be encoded: {e}"),
            Self::ColorFormat(spec) => write!(f, "Invalid color spec {spec:?}"),
            Self::LogoDecode(e) => write!(f, "Logo is not a decodable image: {e}"),
            Self::Stage { stage, source } => write!(f, "Pipeline failed at {stage} stage: {source}"),
            Self::Schema { missing } => {
                write!(f, "Dataset is missing required columns: {}", missing.join(", "))
            }
            Self::Row { row, source } => write!(f, "Row {row} failed: {source}"),
            Self::Workbook(e) => write!(f, "Cannot read workbook: {e}"),
            Self::Archive(e) => write!(f, "Cannot write archive: {e}"),
            Self::Image(e) => write!(f, "Cannot serialize image: {e}"),
            Self::Io(e) => write!(f, "IO failure: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyPayload | Self::ColorFormat(_) | Self::Schema { .. } => None,
            Self::Encoding(e) => Some(e),
            Self::LogoDecode(e) | Self::Image(e) => Some(e),
            Self::Stage { source, .. } | Self::Row { source, .. } => Some(source.as_ref()),
            Self::Workbook(e) => Some(e),
            Self::Archive(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

pub type QrResult<T> = Result<T, Error>;
