use failure::Fail;
use log::info;

use crate::resp::Value as Wire;
use crate::store::errors::StoreError;
use crate::store::store::Store;
use crate::store::value::Value;

/// A fully parsed client command, arguments already normalized to strings.
///
/// Arity is checked here, before anything touches the store; a command
/// that parses is guaranteed to carry the right number of arguments.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Command {
    /// `SET key value`
    Set { key: String, value: String },
    /// `GET key`
    Get { key: String },
    /// `RENAME source dest`
    Rename { source: String, dest: String },
    /// `HSET key field value`
    HSet {
        key: String,
        field: String,
        value: String,
    },
    /// `HGET key field`
    HGet { key: String, field: String },
    /// `FLUSHALL`
    FlushAll,
    /// `HELLO version` — protocol negotiation, answered by the connection
    /// layer before dispatch.
    Hello { version: String },
    /// `CLIENT SETINFO attr value` — sent by stock client libraries on
    /// connect; acknowledged and otherwise ignored.
    ClientSetInfo { attr: String, value: String },
}

/// the error type of command parsing.
/// These are protocol-level rejections: the store is never touched.
#[derive(Debug, Fail, Eq, PartialEq)]
pub enum CommandError {
    /// the request array was empty.
    #[fail(display = "empty command")]
    EmptyCommand,
    /// the command name is not one we know.
    #[fail(display = "unknown command {:?}", command)]
    UnknownCommand {
        /// the name as received.
        command: String,
    },
    /// the command exists but came with the wrong number of arguments.
    #[fail(display = "wrong number of arguments for {}", command)]
    WrongArity {
        /// the (recognized) command name.
        command: String,
    },
    /// an argument had a wire type we cannot treat as a string.
    #[fail(display = "argument has an unusable wire type")]
    BadArgument,
}

impl CommandError {
    /// the stable machine-readable code of this error.
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::EmptyCommand => "EMPTY_COMMAND",
            CommandError::UnknownCommand { .. } => "UNKNOWN_COMMAND",
            CommandError::WrongArity { .. } => "WRONG_ARITY",
            CommandError::BadArgument => "BAD_ARGUMENT",
        }
    }
}

/// normalize one wire argument to its string form.
///
/// An argument sent as the wire's integer type is canonicalized to its
/// decimal rendering, so `HSET k 1 v` and `HGET k "1"` address the same
/// hash field. The store only ever sees the normalized form.
fn argument(value: &Wire) -> Result<String, CommandError> {
    match value {
        Wire::Bulk(s) | Wire::Simple(s) => Ok(s.clone()),
        Wire::Int(n) => Ok(n.to_string()),
        _ => Err(CommandError::BadArgument),
    }
}

impl Command {
    /// parse a request array into a command.
    ///
    /// Command names are matched case-insensitively; arity is fixed per
    /// command and checked here.
    pub fn parse(request: &[Wire]) -> Result<Command, CommandError> {
        let mut args = Vec::with_capacity(request.len());
        for value in request {
            args.push(argument(value)?);
        }
        let name = match args.first() {
            Some(name) => name.to_uppercase(),
            None => return Err(CommandError::EmptyCommand),
        };
        let arity = |expected: usize| -> Result<(), CommandError> {
            if args.len() - 1 != expected {
                return Err(CommandError::WrongArity {
                    command: name.clone(),
                });
            }
            Ok(())
        };
        match name.as_str() {
            "SET" => {
                arity(2)?;
                Ok(Command::Set {
                    key: args.remove(1),
                    value: args.remove(1),
                })
            }
            "GET" => {
                arity(1)?;
                Ok(Command::Get {
                    key: args.remove(1),
                })
            }
            "RENAME" => {
                arity(2)?;
                Ok(Command::Rename {
                    source: args.remove(1),
                    dest: args.remove(1),
                })
            }
            "HSET" => {
                arity(3)?;
                Ok(Command::HSet {
                    key: args.remove(1),
                    field: args.remove(1),
                    value: args.remove(1),
                })
            }
            "HGET" => {
                arity(2)?;
                Ok(Command::HGet {
                    key: args.remove(1),
                    field: args.remove(1),
                })
            }
            "FLUSHALL" => {
                arity(0)?;
                Ok(Command::FlushAll)
            }
            "HELLO" => {
                arity(1)?;
                Ok(Command::Hello {
                    version: args.remove(1),
                })
            }
            "CLIENT" => match args.get(1).map(|s| s.to_uppercase()) {
                Some(ref sub) if sub.as_str() == "SETINFO" => {
                    arity(3)?;
                    Ok(Command::ClientSetInfo {
                        attr: args.remove(2),
                        value: args.remove(2),
                    })
                }
                _ => Err(CommandError::UnknownCommand { command: name }),
            },
            _ => Err(CommandError::UnknownCommand { command: name }),
        }
    }
}

/// What goes back to the client for one command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// plain `+OK`.
    Ok,
    /// a bulk string payload.
    Bulk(String),
    /// an integer payload.
    Int(i64),
    /// the absent-value marker. Not an error.
    Nil,
    /// a map payload (only the HELLO answer uses this).
    Map(Vec<(Wire, Wire)>),
    /// an error reply carrying a stable code.
    Error {
        /// the machine-readable code clients branch on.
        code: String,
    },
}

impl Reply {
    /// make an error reply from any coded error.
    pub fn err(code: impl Into<String>) -> Reply {
        Reply::Error { code: code.into() }
    }

    /// render this reply as a wire value.
    /// Errors take the documented `ERROR: <CODE>` shape.
    pub fn into_wire(self) -> Wire {
        match self {
            Reply::Ok => Wire::Simple("OK".to_owned()),
            Reply::Bulk(s) => Wire::Bulk(s),
            Reply::Int(n) => Wire::Int(n),
            Reply::Nil => Wire::Null,
            Reply::Map(pairs) => Wire::Map(pairs),
            Reply::Error { code } => Wire::Error(format!("ERROR: {}", code)),
        }
    }
}

impl From<CommandError> for Reply {
    fn from(err: CommandError) -> Reply {
        Reply::err(err.code())
    }
}

impl From<StoreError> for Reply {
    fn from(err: StoreError) -> Reply {
        Reply::err(err.code())
    }
}

/// run one command against the store and shape the result as a reply.
///
/// Every failure is scoped to this one command: an error reply leaves the
/// store exactly as it was before the command ran.
pub fn dispatch(command: Command, store: &impl Store) -> Reply {
    info!(target: "app::request", "dispatching {:?}.", &command);
    let outcome = match command {
        Command::Set { key, value } => store.set(key, value).map(|()| Reply::Ok),
        Command::Get { key } => store.get(&key).map(|found| match found {
            Some(Value::Str(s)) => Reply::Bulk(s),
            Some(_) => Reply::err(StoreError::WrongType { key }.code()),
            None => Reply::Nil,
        }),
        Command::Rename { source, dest } => store.rename(&source, dest).map(|()| Reply::Ok),
        Command::HSet { key, field, value } => store
            .hset(key, field, value)
            .map(|created| Reply::Int(created as i64)),
        Command::HGet { key, field } => store.hget(&key, &field).map(|found| match found {
            Some(s) => Reply::Bulk(s),
            None => Reply::Nil,
        }),
        Command::FlushAll => store.flush_all().map(|()| Reply::Ok),
        // session commands are owned by the connection layer; answering
        // OK here keeps dispatch total over `Command`.
        Command::Hello { .. } | Command::ClientSetInfo { .. } => Ok(Reply::Ok),
    };
    outcome.unwrap_or_else(Reply::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemStore;

    fn req(parts: &[&str]) -> Vec<Wire> {
        parts.iter().map(|s| Wire::from(*s)).collect()
    }

    #[test]
    fn parses_commands_case_insensitively() {
        let command = Command::parse(&req(&["set", "foo", "bar"])).unwrap();
        assert_eq!(
            command,
            Command::Set {
                key: "foo".to_owned(),
                value: "bar".to_owned(),
            }
        );
        assert!(Command::parse(&req(&["FlushAll"])).is_ok());
        assert!(Command::parse(&req(&["HGET", "h", "f"])).is_ok());
    }

    #[test]
    fn rejects_wrong_arity_before_the_store() {
        match Command::parse(&req(&["GET"])) {
            Err(CommandError::WrongArity { command }) => assert_eq!(command, "GET"),
            other => panic!("expected WrongArity, got {:?}", other),
        }
        assert!(Command::parse(&req(&["SET", "only-key"])).is_err());
        assert!(Command::parse(&req(&["FLUSHALL", "extra"])).is_err());
    }

    #[test]
    fn rejects_unknown_commands() {
        match Command::parse(&req(&["SUBSCRIBE", "chan"])) {
            Err(CommandError::UnknownCommand { command }) => assert_eq!(command, "SUBSCRIBE"),
            other => panic!("expected UnknownCommand, got {:?}", other),
        }
        assert_eq!(
            Command::parse(&[]).unwrap_err().code(),
            "EMPTY_COMMAND"
        );
    }

    #[test]
    fn integer_arguments_normalize_to_decimal_strings() {
        let request = vec![Wire::from("HSET"), Wire::from("myhash"), Wire::Int(1), Wire::from("hello")];
        let command = Command::parse(&request).unwrap();
        assert_eq!(
            command,
            Command::HSet {
                key: "myhash".to_owned(),
                field: "1".to_owned(),
                value: "hello".to_owned(),
            }
        );
    }

    #[test]
    fn normalization_holds_end_to_end() {
        let store = MemStore::new();
        let hset = vec![Wire::from("HSET"), Wire::from("myhash"), Wire::Int(1), Wire::from("hello")];
        dispatch(Command::parse(&hset).unwrap(), &store);
        let hget = req(&["HGET", "myhash", "1"]);
        let reply = dispatch(Command::parse(&hget).unwrap(), &store);
        assert_eq!(reply, Reply::Bulk("hello".to_owned()));
    }

    #[test]
    fn rename_of_missing_key_reports_a_stable_code() {
        let store = MemStore::new();
        let reply = dispatch(
            Command::parse(&req(&["RENAME", "foo", "baz"])).unwrap(),
            &store,
        );
        assert_eq!(reply.into_wire(), Wire::Error("ERROR: NO_SUCH_KEY".to_owned()));
    }

    #[test]
    fn get_on_a_hash_key_is_a_type_error() {
        let store = MemStore::new();
        dispatch(Command::parse(&req(&["HSET", "h", "f", "v"])).unwrap(), &store);
        let reply = dispatch(Command::parse(&req(&["GET", "h"])).unwrap(), &store);
        assert_eq!(reply, Reply::err("WRONGTYPE"));
    }

    #[test]
    fn hset_reply_counts_new_fields() {
        let store = MemStore::new();
        let first = dispatch(Command::parse(&req(&["HSET", "h", "f", "a"])).unwrap(), &store);
        let second = dispatch(Command::parse(&req(&["HSET", "h", "f", "b"])).unwrap(), &store);
        assert_eq!(first, Reply::Int(1));
        assert_eq!(second, Reply::Int(0));
    }

    #[test]
    fn get_of_missing_key_is_nil_not_error() {
        let store = MemStore::new();
        let reply = dispatch(Command::parse(&req(&["GET", "nope"])).unwrap(), &store);
        assert_eq!(reply, Reply::Nil);
    }
}
