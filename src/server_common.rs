use std::net::SocketAddr;
use std::str::FromStr;

use failure::Fail;
use structopt::StructOpt;

use crate::server_common::ServerError::{ProtocolError, StoreFailed};
use crate::StoreError;

/// the command line options of the server binary.
#[derive(Debug, StructOpt, Clone)]
#[structopt(name = "memkv-server",
about = env ! ("CARGO_PKG_DESCRIPTION"),
author = env ! ("CARGO_PKG_AUTHORS"),
version = env ! ("CARGO_PKG_VERSION"))]
pub struct ServerOpt {
    /// the address to listen on.
    #[structopt(
    default_value = "127.0.0.1:6543",
    parse(try_from_str = str::parse),
    long = "--addr"
    )]
    pub addr: SocketAddr,
    /// which thread pool runs the connection handlers.
    #[structopt(
    default_value = "shared_queue",
    parse(try_from_str = str::parse),
    long = "--pool"
    )]
    pub pool: Pool,
    /// how many workers the pool holds. Defaults to the CPU count.
    #[structopt(long = "--pool-size")]
    pub pool_size: Option<usize>,
}

impl ServerOpt {
    /// the effective pool size, falling back to the CPU count.
    pub fn pool_size(&self) -> usize {
        self.pool_size.unwrap_or_else(num_cpus::get)
    }
}

/// the thread pool flavors the server can run on.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Pool {
    Naive,
    Rayon,
    SharedQueue,
}

impl Default for Pool {
    fn default() -> Self {
        Pool::SharedQueue
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Fail)]
#[fail(display = "no such pool: {}", _0)]
pub struct NoSuchPool(String);

impl FromStr for Pool {
    type Err = NoSuchPool;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "naive" => Ok(Pool::Naive),
            "shared_queue" => Ok(Pool::SharedQueue),
            "rayon" => Ok(Pool::Rayon),
            _ => Err(NoSuchPool(s.to_owned())),
        }
    }
}

impl AsRef<str> for Pool {
    fn as_ref(&self) -> &str {
        match self {
            Pool::Naive => "naive",
            Pool::Rayon => "rayon",
            Pool::SharedQueue => "shared_queue",
        }
    }
}

/// the error type of the server context.
#[derive(Debug, Fail)]
pub enum ServerError {
    /// the store threw an error the dispatcher could not absorb.
    #[fail(display = "store exception: {}", store_error)]
    StoreFailed {
        #[cause]
        store_error: StoreError,
    },
    /// the peer sent bytes we could not parse as a request.
    #[fail(display = "unparsable request: {}", wire_error)]
    ProtocolError {
        #[cause]
        wire_error: crate::resp::Error,
    },
    /// generic io failure on the connection.
    #[fail(display = "io exception: {}", io_error)]
    Io {
        #[cause]
        io_error: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ServerError>;

impl From<StoreError> for ServerError {
    fn from(store_error: StoreError) -> Self {
        StoreFailed { store_error }
    }
}

impl From<crate::resp::Error> for ServerError {
    fn from(wire_error: crate::resp::Error) -> Self {
        ProtocolError { wire_error }
    }
}

impl From<std::io::Error> for ServerError {
    fn from(io_error: std::io::Error) -> Self {
        ServerError::Io { io_error }
    }
}
