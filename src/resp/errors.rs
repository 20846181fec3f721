use failure::Fail;

/// The `Result` type of the wire codec.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type of the wire codec.
/// Anything malformed coming off the socket lands here; nothing in the
/// codec panics on bad input.
#[derive(Debug, Fail)]
pub enum Error {
    /// the underlying stream failed.
    #[fail(display = "io error on the wire: {}", io_error)]
    Io {
        #[cause]
        /// the original io exception.
        io_error: std::io::Error,
    },
    /// a value started with a type byte we do not know.
    #[fail(display = "unexpected start of value: {:?}", _0)]
    UnexpectedStartOfValue(char),
    /// a length header was not a decimal number.
    #[fail(display = "invalid length header: {:?}", _0)]
    InvalidLength(String),
    /// a `\r\n` terminator was missing where one was required.
    #[fail(display = "expected CRLF, found byte {:#x}", _0)]
    MissingNewline(u8),
    /// a string on the wire was not valid utf-8.
    #[fail(display = "invalid utf-8 on the wire: {}", utf8_error)]
    Utf8 {
        #[cause]
        /// the original utf-8 exception.
        utf8_error: std::string::FromUtf8Error,
    },
}

impl Error {
    /// whether this error is a clean end-of-stream, i.e. the peer simply
    /// closed the connection between two commands.
    pub fn is_eof(&self) -> bool {
        match self {
            Error::Io { io_error } => io_error.kind() == std::io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(io_error: std::io::Error) -> Self {
        Error::Io { io_error }
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(utf8_error: std::string::FromUtf8Error) -> Self {
        Error::Utf8 { utf8_error }
    }
}
