//! Fuzz target for request-layer vertex id parsing.
//!
//! Ids arrive as raw strings from clients, so the parser must reject any
//! malformed input with `InvalidArgument` and never panic.

#![no_main]

use kout_core::graph::{parse_vertex_id, VertexId};
use kout_core::Error;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    match parse_vertex_id(raw) {
        Ok(VertexId::Number(n)) => {
            assert_eq!(parse_vertex_id(&n.to_string()), Ok(VertexId::Number(n)));
        }
        Ok(VertexId::Text(text)) => assert!(!text.is_empty()),
        Err(err) => assert!(matches!(err, Error::InvalidArgument(_))),
    }
});
