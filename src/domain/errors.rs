use std::path::PathBuf;

#[derive(Debug)]
pub enum DomainError {
    NotCsv(PathBuf),
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotCsv(path) => {
                write!(f, "Not a CSV file: {}", path.display())
            }
            DomainError::Io(err) => {
                write!(f, "I/O error: {}", err)
            }
            DomainError::Csv(err) => {
                write!(f, "CSV error: {}", err)
            }
        }
    }
}

impl std::error::Error for DomainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DomainError::NotCsv(_) => None,
            DomainError::Io(err) => Some(err),
            DomainError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err)
    }
}

impl From<csv::Error> for DomainError {
    fn from(err: csv::Error) -> Self {
        DomainError::Csv(err)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
