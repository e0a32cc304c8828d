mod command_result;
pub mod extract;
pub mod helper;
pub mod init;
pub mod rename;
pub mod scan;
pub mod search;
pub mod translate;
pub mod watch;

pub use command_result::*;
