// ── Router state storage ──
//
// The aggregate and its collections. Everything here is crate-private;
// outside callers only ever see it through `RouterEngine`.

mod device_table;
mod log_buffer;
mod state;

pub(crate) use state::RouterState;
