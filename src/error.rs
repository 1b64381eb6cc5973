use std::path::PathBuf;

/// Result type alias for the core parsing and synthesis routines
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for annotation parsing and schema synthesis
#[derive(Debug)]
pub enum Error {
    /// Malformed `@router` or `@response` annotation payload
    AnnotationSyntax(String),
    /// Malformed field metadata string (unbalanced quoting, missing `:"`)
    MetadataSyntax(String),
    /// An object field carries neither a `json` name nor an `embed` marker
    MissingBindingName(String),
    /// Non-numeric payload in a `len=`/`max=`/`min=` validation option
    ConstraintSyntax(String),
    /// A would-be parameter field matches none of the four binding keys.
    /// The parameter extractor treats this as a skip, never a process error.
    NoBindingLocation,
    /// A source file could not be read or parsed into a syntax tree
    SourceRead { file: PathBuf, message: String },
    /// An annotation error, wrapped with the identity of the originating file
    SourceFile { file: PathBuf, source: Box<Error> },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::AnnotationSyntax(msg) => write!(f, "cannot parse annotation: {}", msg),
            Error::MetadataSyntax(msg) => write!(f, "cannot parse field metadata: {}", msg),
            Error::MissingBindingName(field) => {
                write!(f, "field {} has no json name and no embed marker", field)
            }
            Error::ConstraintSyntax(msg) => write!(f, "cannot parse validate option: {}", msg),
            Error::NoBindingLocation => write!(f, "no binding location for parameter"),
            Error::SourceRead { file, message } => {
                write!(f, "cannot read source file {}: {}", file.display(), message)
            }
            Error::SourceFile { file, source } => {
                write!(f, "cannot parse comments of {}: {}", file.display(), source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::SourceFile { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
