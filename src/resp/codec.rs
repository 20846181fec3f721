use std::io::{Read, Write};

pub use super::errors::Result;

use super::errors::Error;
use super::value::{ProtocolVersion, Value};

/// read one wire value from a stream.
///
/// # Error
///
/// when the stream ends between values, throws an `Io` error whose
/// `is_eof()` is true; any malformed framing throws the matching
/// `resp::Error` variant.
pub fn read(stream: &mut impl Read) -> Result<Value> {
    let prefix = read_byte(stream)?;
    match prefix {
        b'$' => {
            let line = read_line(stream)?;
            // the classic protocol spells null as a bulk string of length -1.
            if line == "-1" {
                return Ok(Value::Null);
            }
            let len = line.parse::<usize>().map_err(|_| Error::InvalidLength(line))?;
            Ok(Value::Bulk(read_bulk_tail(stream, len)?))
        }
        b'+' => Ok(Value::Simple(read_line(stream)?)),
        b'-' => Ok(Value::Error(read_line(stream)?)),
        b':' => {
            let line = read_line(stream)?;
            let n = line
                .parse::<i64>()
                .map_err(|_| Error::InvalidLength(line))?;
            Ok(Value::Int(n))
        }
        b'*' => {
            let len = read_length(stream)?;
            let mut values = Vec::with_capacity(len);
            for _ in 0..len {
                values.push(read(stream)?);
            }
            Ok(Value::Array(values))
        }
        b'%' => {
            let len = read_length(stream)?;
            let mut pairs = Vec::with_capacity(len);
            for _ in 0..len {
                let key = read(stream)?;
                let value = read(stream)?;
                pairs.push((key, value));
            }
            Ok(Value::Map(pairs))
        }
        b'_' => {
            expect_newline(stream)?;
            Ok(Value::Null)
        }
        other => Err(Error::UnexpectedStartOfValue(other as char)),
    }
}

/// write one wire value to a stream.
/// `version` only matters for `Null`, which has two encodings.
pub fn write(
    value: &Value,
    stream: &mut impl Write,
    version: ProtocolVersion,
) -> std::io::Result<()> {
    match value {
        Value::Simple(s) => write!(stream, "+{}\r\n", s),
        Value::Error(s) => write!(stream, "-{}\r\n", s),
        Value::Int(n) => write!(stream, ":{}\r\n", n),
        Value::Bulk(s) => {
            write!(stream, "${}\r\n", s.len())?;
            stream.write_all(s.as_bytes())?;
            stream.write_all(b"\r\n")
        }
        Value::Array(values) => {
            write!(stream, "*{}\r\n", values.len())?;
            for value in values {
                write(value, stream, version)?;
            }
            Ok(())
        }
        Value::Map(pairs) => {
            write!(stream, "%{}\r\n", pairs.len())?;
            for (key, value) in pairs {
                write(key, stream, version)?;
                write(value, stream, version)?;
            }
            Ok(())
        }
        Value::Null => match version {
            ProtocolVersion::Resp2 => stream.write_all(b"$-1\r\n"),
            ProtocolVersion::Resp3 => stream.write_all(b"_\r\n"),
        },
    }
}

fn read_byte(stream: &mut impl Read) -> Result<u8> {
    let mut buf = [0u8];
    stream.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// read bytes up to (and consuming) the next CRLF.
fn read_line(stream: &mut impl Read) -> Result<String> {
    let mut line = Vec::new();
    loop {
        let b = read_byte(stream)?;
        if b == b'\r' {
            break;
        }
        line.push(b);
    }
    let b = read_byte(stream)?;
    if b != b'\n' {
        return Err(Error::MissingNewline(b));
    }
    Ok(String::from_utf8(line)?)
}

fn read_length(stream: &mut impl Read) -> Result<usize> {
    let line = read_line(stream)?;
    line.parse::<usize>().map_err(|_| Error::InvalidLength(line))
}

/// read the body of a bulk string, the `$` and length header already consumed.
fn read_bulk_tail(stream: &mut impl Read, len: usize) -> Result<String> {
    let mut body = vec![0u8; len];
    stream.read_exact(&mut body)?;
    expect_newline(stream)?;
    Ok(String::from_utf8(body)?)
}

fn expect_newline(stream: &mut impl Read) -> Result<()> {
    let b = read_byte(stream)?;
    if b != b'\r' {
        return Err(Error::MissingNewline(b));
    }
    let b = read_byte(stream)?;
    if b != b'\n' {
        return Err(Error::MissingNewline(b));
    }
    Ok(())
}
