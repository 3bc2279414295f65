use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("PDF render error: {0}")]
    Pdf(#[from] printpdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
