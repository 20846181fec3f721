use std::io::{BufReader, BufWriter, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};

use log::{error, info};
use structopt::StructOpt;

use memkv::command::{self, Command, Reply};
use memkv::resp::{self, ProtocolVersion, Value};
use memkv::server_common::*;
use memkv::thread_pool::*;
use memkv::{MemStore, Store};

struct Server<E, P> {
    store: E,
    pool: P,
}

impl<E, P> Server<E, P>
where
    E: Store,
    P: ThreadPool,
{
    fn new(store: E, pool: P) -> Self {
        Server { store, pool }
    }

    fn do_listen_on(self, addr: SocketAddr) -> Result<()> {
        let listener = TcpListener::bind(&addr)?;
        info!("succeeded to bind to {}, listening for connections.", addr);
        for stream in listener.incoming() {
            let store = self.store.clone();
            self.pool.spawn(move || match stream {
                Ok(stream) => {
                    let peer = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "UNKNOWN".to_owned());
                    let outcome = Connection::new(stream, store).and_then(Connection::run);
                    if let Err(err) = outcome {
                        error!(target: "app::error", "connection with peer {} failed: {}", peer, err);
                    }
                }
                Err(err) => {
                    error!(target: "app::error", "failed to accept a connection: {}", err)
                }
            })
        }
        Ok(())
    }

    fn listen_on(self, addr: SocketAddr) {
        info!("our server will be on: {}", addr);
        match self.do_listen_on(addr) {
            Err(err) => {
                error!(target: "app::error", "err: {}; our server on {} will stop...", err, addr)
            }
            Ok(_) => info!("goodbye!"),
        }
    }
}

/// One client connection: a request/reply loop over a single socket.
///
/// The store handle is injected per connection; there is no process-wide
/// store anywhere. The negotiated protocol version only changes how nulls
/// are encoded on the way out.
struct Connection<E> {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    version: ProtocolVersion,
    store: E,
}

impl<E: Store> Connection<E> {
    fn new(stream: TcpStream, store: E) -> Result<Self> {
        let writer = BufWriter::new(stream.try_clone()?);
        Ok(Connection {
            reader: BufReader::new(stream),
            writer,
            version: ProtocolVersion::default(),
            store,
        })
    }

    fn run(mut self) -> Result<()> {
        loop {
            let request = match resp::read(&mut self.reader) {
                Ok(Value::Array(parts)) => parts,
                Ok(other) => {
                    error!(target: "app::error", "request is not an array: {:?}", other);
                    self.reply(Reply::err("BAD_REQUEST"))?;
                    return Ok(());
                }
                // the peer hanging up between commands is the normal end
                // of a session, not a failure.
                Err(ref err) if err.is_eof() => return Ok(()),
                Err(err) => {
                    self.reply(Reply::err("BAD_REQUEST"))?;
                    return Err(err.into());
                }
            };
            match Command::parse(&request) {
                Ok(Command::Hello { version }) => self.hello(&version)?,
                Ok(cmd) => {
                    let reply = command::dispatch(cmd, &self.store);
                    self.reply(reply)?;
                }
                Err(err) => {
                    error!(target: "app::error", "rejected request: {}", err);
                    self.reply(Reply::from(err))?;
                }
            }
        }
    }

    /// answer `HELLO` and switch the null encoding for this connection.
    fn hello(&mut self, version: &str) -> Result<()> {
        match version.parse::<ProtocolVersion>() {
            Ok(negotiated) => {
                self.version = negotiated;
                match negotiated {
                    ProtocolVersion::Resp2 => self.reply(Reply::Ok),
                    ProtocolVersion::Resp3 => self.write(Value::Map(vec![
                        (Value::from("server"), Value::from("memkv")),
                        (
                            Value::from("version"),
                            Value::from(env!("CARGO_PKG_VERSION")),
                        ),
                        (Value::from("proto"), Value::Int(3)),
                        (Value::from("mode"), Value::from("standalone")),
                        (Value::from("role"), Value::from("master")),
                    ])),
                }
            }
            Err(_) => self.reply(Reply::err("UNSUPPORTED_PROTO")),
        }
    }

    fn reply(&mut self, reply: Reply) -> Result<()> {
        self.write(reply.into_wire())
    }

    fn write(&mut self, value: Value) -> Result<()> {
        value.write(&mut self.writer, self.version)?;
        self.writer.flush()?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let opt: ServerOpt = ServerOpt::from_args();
    log4rs::init_config(memkv::config::log4rs::config()).expect("unable to init logger.");
    info!(target: "app::request", "memkv version {}, listening on {}", env!("CARGO_PKG_VERSION"), opt.addr);
    info!("config: {:?}", opt);
    let store = MemStore::new();
    let size = opt.pool_size();
    match opt.pool {
        Pool::Naive => Server::new(store, NaiveThreadPool::new(size)?).listen_on(opt.addr),
        Pool::SharedQueue => {
            Server::new(store, SharedQueueThreadPool::new(size)?).listen_on(opt.addr)
        }
        Pool::Rayon => Server::new(store, RayonThreadPool::new(size)?).listen_on(opt.addr),
    };
    info!("goodbye.");
    Ok(())
}
