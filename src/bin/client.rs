use std::io::{BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::process::exit;

use structopt::StructOpt;

use memkv::resp::{self, ProtocolVersion, Value};

#[derive(Debug, StructOpt)]
#[structopt(name = "memkv-client",
about = env!("CARGO_PKG_DESCRIPTION"),
author = env!("CARGO_PKG_AUTHORS"),
version = env!("CARGO_PKG_VERSION"))]
enum ClientOpt {
    /// store a string value under a key.
    Set {
        key: String,
        value: String,
        #[structopt(
        parse(try_from_str = str::parse),
        name = "addr",
        long = "--addr",
        default_value = "127.0.0.1:6543"
        )]
        server: SocketAddr,
    },
    /// print the string stored under a key.
    Get {
        key: String,
        #[structopt(
        parse(try_from_str = str::parse),
        name = "addr",
        long = "--addr",
        default_value = "127.0.0.1:6543"
        )]
        server: SocketAddr,
    },
    /// move the value under one key to another key.
    Rename {
        source: String,
        dest: String,
        #[structopt(
        parse(try_from_str = str::parse),
        name = "addr",
        long = "--addr",
        default_value = "127.0.0.1:6543"
        )]
        server: SocketAddr,
    },
    /// set a field inside the hash under a key.
    Hset {
        key: String,
        field: String,
        value: String,
        #[structopt(
        parse(try_from_str = str::parse),
        name = "addr",
        long = "--addr",
        default_value = "127.0.0.1:6543"
        )]
        server: SocketAddr,
    },
    /// print a field of the hash under a key.
    Hget {
        key: String,
        field: String,
        #[structopt(
        parse(try_from_str = str::parse),
        name = "addr",
        long = "--addr",
        default_value = "127.0.0.1:6543"
        )]
        server: SocketAddr,
    },
    /// remove every key from the store.
    Flushall {
        #[structopt(
        parse(try_from_str = str::parse),
        name = "addr",
        long = "--addr",
        default_value = "127.0.0.1:6543"
        )]
        server: SocketAddr,
    },
}

impl ClientOpt {
    fn server(&self) -> SocketAddr {
        match self {
            ClientOpt::Set { server, .. }
            | ClientOpt::Get { server, .. }
            | ClientOpt::Rename { server, .. }
            | ClientOpt::Hset { server, .. }
            | ClientOpt::Hget { server, .. }
            | ClientOpt::Flushall { server } => *server,
        }
    }

    fn request(&self) -> Value {
        let parts: Vec<&str> = match self {
            ClientOpt::Set { key, value, .. } => vec!["SET", key, value],
            ClientOpt::Get { key, .. } => vec!["GET", key],
            ClientOpt::Rename { source, dest, .. } => vec!["RENAME", source, dest],
            ClientOpt::Hset {
                key, field, value, ..
            } => vec!["HSET", key, field, value],
            ClientOpt::Hget { key, field, .. } => vec!["HGET", key, field],
            ClientOpt::Flushall { .. } => vec!["FLUSHALL"],
        };
        Value::Array(parts.into_iter().map(Value::from).collect())
    }
}

fn send_to(request: &Value, addr: SocketAddr) -> resp::Result<Value> {
    let stream = TcpStream::connect(addr)?;
    let mut writer = stream.try_clone()?;
    request.write(&mut writer, ProtocolVersion::Resp2)?;
    writer.flush()?;
    let mut reader = BufReader::new(stream);
    Value::read(&mut reader)
}

fn main() -> resp::Result<()> {
    let opt = ClientOpt::from_args();
    match send_to(&opt.request(), opt.server())? {
        Value::Simple(s) | Value::Bulk(s) => {
            println!("{}", s);
            exit(0);
        }
        Value::Int(n) => {
            println!("{}", n);
            exit(0);
        }
        Value::Null => {
            println!("(nil)");
            exit(0);
        }
        Value::Error(reason) => {
            eprintln!("{}", reason);
            exit(1);
        }
        other => {
            eprintln!("unexpected reply: {:?}", other);
            exit(1);
        }
    };
}
