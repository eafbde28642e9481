pub mod protocol;
pub mod runtime;
pub mod server;

pub const SOCKET_PATH: &str = "/tmp/arcdial.sock";
