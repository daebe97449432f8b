// ── Transports ──

pub mod http;
pub mod rpc;
pub mod stdio;
