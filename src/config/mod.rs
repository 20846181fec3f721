/// the log4rs configuration used by the server binary.
pub mod log4rs;
