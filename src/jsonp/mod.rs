//! JSONP bridge for providers that only answer with a callback-wrapped script.
//!
//! A call picks a unique callback name, points a script request at
//! `{url}?callback={name}&...`, and waits for that name to be invoked. The
//! bridge owns the table from callback name to the waiting call, so no global
//! state is involved and concurrent calls never see each other's results.

mod bridge;
mod payload;
mod script;

pub use bridge::{HttpScriptLoader, JsonpBridge, PendingScript, ScriptLoader};
pub use payload::{
    build_script_url, encode_uri_component, next_callback_name, serialize_params, JsonpData,
    CALLBACK_PREFIX,
};
pub use script::{parse_invocation, Invocation};
