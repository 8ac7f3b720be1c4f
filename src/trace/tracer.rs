// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The call-ops tracer program sent with `debug_traceBlockByHash`
//!
//! The node runs this JavaScript once per transaction while re-executing the
//! block. It is an opaque parameter on our side; what matters is its output
//! contract, one object per transaction:
//!
//! ```json
//! { "callOps": [{ "from": <addr>, "addr": <word>, "val": <int> }, ...],
//!   "from": <addr>, "to": <addr>, "value": <int> }
//! ```
//!
//! `step` records every `CALL` (0xF1). With geth's stack API `peek(0)` is the
//! top of the stack, and `CALL` pops `gas, addr, value, ...` in that order, so
//! the destination is `peek(1)` and the value `peek(2)`. An off-by-one here
//! yields wrong addresses and amounts rather than an error, so the slots are
//! fixed constants and a test pins the program text to them.

use serde::Serialize;

/// Opcode of the value-transferring call instruction.
pub const CALL_OPCODE: u8 = 0xF1;

/// Stack slot (0 = top) of `CALL`'s destination operand.
pub const CALL_ADDR_STACK_SLOT: usize = 1;

/// Stack slot (0 = top) of `CALL`'s value operand.
pub const CALL_VALUE_STACK_SLOT: usize = 2;

/// Version tag of the tracer output contract, bumped whenever the result
/// shape changes.
pub const TRACER_VERSION: &str = "callops/1";

/// JSON-RPC method carrying the tracer.
pub const DEBUG_TRACE_BLOCK_BY_HASH: &str = "debug_traceBlockByHash";

/// The tracer program.
pub const CALL_OPS_TRACER: &str = r#"{
    retVal: { callOps: [] },
    step: function (log, db) {
        if (log.op.toNumber() == 0xF1) {
            this.retVal.callOps.push({
                from: log.contract.getAddress(),
                addr: log.stack.peek(1),
                val: log.stack.peek(2)
            });
        }
    },
    fault: function (log, db) {},
    result: function (ctx, db) {
        this.retVal.from = ctx.from;
        this.retVal.to = ctx.to;
        this.retVal.value = ctx.value;
        return this.retVal;
    }
}"#;

/// Tracer options object, the second `debug_traceBlockByHash` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TracerOptions {
    tracer: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<String>,
}

impl TracerOptions {
    /// Options carrying [`CALL_OPS_TRACER`] and an optional node-side timeout.
    pub fn call_ops(timeout: Option<String>) -> Self {
        Self {
            tracer: CALL_OPS_TRACER,
            timeout,
        }
    }
}
