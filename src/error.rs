use std::fmt;

/// Errors from the fallible edges of the crate: writing images, loading fonts
/// and parsing command line input. Rendering itself never fails.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Png(String),
    Font(FontError),
    InvalidArgument(String),
}

#[derive(Debug)]
pub enum FontError {
    Invalid(ab_glyph::InvalidFont),
    NotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO error: {e}"),
            Error::Png(e) => write!(f, "PNG error: {e}"),
            Error::Font(e) => write!(f, "font error: {e}"),
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::Invalid(e) => write!(f, "invalid font data: {e}"),
            FontError::NotFound => write!(f, "no usable system font found"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<ab_glyph::InvalidFont> for Error {
    fn from(e: ab_glyph::InvalidFont) -> Self {
        Error::Font(FontError::Invalid(e))
    }
}

impl From<FontError> for Error {
    fn from(e: FontError) -> Self {
        Error::Font(e)
    }
}

impl From<lexopt::Error> for Error {
    fn from(e: lexopt::Error) -> Self {
        Error::InvalidArgument(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = Error::InvalidArgument("radius".into());
        assert_eq!(err.to_string(), "invalid argument: radius");

        let err: Error = FontError::NotFound.into();
        assert_eq!(err.to_string(), "font error: no usable system font found");
    }
}
