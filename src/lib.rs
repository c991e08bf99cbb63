#![doc(test(attr(deny(warnings))))]

//! Campus Core offers the sequence-allocation and fee-instalment
//! reconciliation primitives that back university administration workflows.

pub mod core;
pub mod domain;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        let build = utils::build_info::current();
        utils::init_tracing();
        tracing::info!(
            version = build.version,
            git_hash = build.git_hash,
            "Campus Core tracing initialized."
        );
    });
}
