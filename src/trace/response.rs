// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Decoding and flattening of the call-ops tracer output
//!
//! The tracer's JSON is loosely typed: the same address may be serialized as
//! a byte array, a typed-array object, a hex string or a decimal string
//! depending on which tracer value it came from and on the node version.
//! Each field decoder tries the known encodings in a fixed order and fails
//! closed with [`MalformedTraceError`] when none applies.
//!
//! Per-transaction elements may be the tracer object itself or geth's
//! wrapped form `{ "txHash": .., "result": {..} }` / `{ "txHash": .., "error": ".." }`.

use alloy_primitives::Address;
use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::{MalformedTraceError, NativeTransferError};
use crate::types::address::{
    address_from_be_bytes, address_from_decimal, address_from_hex, AddressParseError,
};
use crate::types::amount::Amount;
use crate::types::extraction::{Extraction, RecordLocation, SkippedRecord};
use crate::types::transfers::NativeTransfer;

/// Flatten a `debug_traceBlockByHash` result into native transfers.
///
/// For transaction *i* the transaction-level record comes first, followed by
/// one record per call in recorded order. Records that cannot be decoded are
/// skipped and reported. A per-transaction `error` aborts the whole result
/// before anything is emitted.
pub fn flatten_trace_result(
    result: &Value,
) -> Result<Extraction<NativeTransfer>, NativeTransferError> {
    let transactions = result
        .as_array()
        .ok_or_else(|| MalformedTraceError::NotAnArray {
            found: json_type(result).to_string(),
        })?;

    if let Some((tx_index, message)) = transactions
        .iter()
        .enumerate()
        .find_map(|(i, element)| transaction_error(element).map(|m| (i, m)))
    {
        return Err(NativeTransferError::trace_execution(format!(
            "transaction {tx_index}: {message}"
        )));
    }

    let mut extraction = Extraction::default();
    for (tx_index, element) in transactions.iter().enumerate() {
        flatten_transaction(tx_index, unwrap_result(element), &mut extraction);
    }
    Ok(extraction)
}

/// A JSON-RPC response body that alloy's typed response parsing rejected.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LenientResponse {
    /// `error` absent or `null` next to a `result`
    Result(Value),
    /// `error` is a bare string or an object with a `message`
    Error(String),
}

/// Re-read a response body leniently. Nodes send both
/// `{"error": "..."}` and `{"error": null, "result": [..]}`, neither of which
/// is a standard JSON-RPC response.
pub(crate) fn lenient_response(body: &str) -> Option<LenientResponse> {
    let body: Value = serde_json::from_str(body).ok()?;
    match body.get("error") {
        None | Some(Value::Null) => body.get("result").cloned().map(LenientResponse::Result),
        Some(Value::String(message)) => Some(LenientResponse::Error(message.clone())),
        Some(Value::Object(error)) => error
            .get("message")
            .and_then(Value::as_str)
            .map(|message| LenientResponse::Error(message.to_string())),
        Some(_) => None,
    }
}

fn flatten_transaction(
    tx_index: usize,
    element: &Value,
    extraction: &mut Extraction<NativeTransfer>,
) {
    let mut skip = |location: RecordLocation, error: MalformedTraceError| {
        warn!(?location, error = %error, "Skipping malformed trace record");
        extraction.skipped.push(SkippedRecord::new(location, error));
    };

    let Some(object) = element.as_object() else {
        skip(
            RecordLocation::Transaction { tx_index },
            MalformedTraceError::UnexpectedShape {
                what: "transaction trace",
                found: json_type(element).to_string(),
            },
        );
        return;
    };

    let mut records = Vec::new();

    match decode_transaction_context(object) {
        Ok((from, to, amount)) => {
            records.push(NativeTransfer::transaction(tx_index, from, to, amount));
        }
        Err(e) => skip(RecordLocation::Transaction { tx_index }, e),
    }

    match object.get("callOps") {
        Some(Value::Array(calls)) => {
            for (call_index, call) in calls.iter().enumerate() {
                match decode_call_op(call) {
                    Ok((from, to, amount)) => {
                        records.push(NativeTransfer::call(tx_index, from, to, amount));
                    }
                    Err(e) => skip(RecordLocation::Call { tx_index, call_index }, e),
                }
            }
        }
        None | Some(Value::Null) => skip(
            RecordLocation::Transaction { tx_index },
            MalformedTraceError::MissingField { field: "callOps" },
        ),
        Some(other) => skip(
            RecordLocation::Transaction { tx_index },
            MalformedTraceError::UnexpectedShape {
                what: "callOps",
                found: json_type(other).to_string(),
            },
        ),
    }

    extraction.records.extend(records);
}

fn decode_transaction_context(
    object: &Map<String, Value>,
) -> Result<(Address, Address, Amount), MalformedTraceError> {
    Ok((
        decode_address(object, "from")?,
        decode_address(object, "to")?,
        decode_amount(object, "value")?,
    ))
}

fn decode_call_op(call: &Value) -> Result<(Address, Address, Amount), MalformedTraceError> {
    let object = call
        .as_object()
        .ok_or_else(|| MalformedTraceError::UnexpectedShape {
            what: "call record",
            found: json_type(call).to_string(),
        })?;
    Ok((
        decode_address(object, "from")?,
        decode_address(object, "addr")?,
        decode_amount(object, "val")?,
    ))
}

/// The message of a wrapped per-transaction error, if `element` is one.
fn transaction_error(element: &Value) -> Option<String> {
    let object = element.as_object()?;
    if object.contains_key("callOps") {
        return None;
    }
    match object.get("error")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

/// `result` of a wrapped per-transaction element, or the element itself.
fn unwrap_result(element: &Value) -> &Value {
    match element.as_object() {
        Some(object) if !object.contains_key("callOps") => {
            object.get("result").unwrap_or(element)
        }
        _ => element,
    }
}

/// Decode an address field, trying in order: byte array, typed-array object,
/// `0x` hex string, decimal string.
pub(crate) fn decode_address(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Address, MalformedTraceError> {
    let invalid = |reason: String| MalformedTraceError::InvalidAddress { field, reason };
    let from_parse = |e: AddressParseError| invalid(e.to_string());

    match object.get(field) {
        None | Some(Value::Null) => Err(MalformedTraceError::MissingField { field }),
        Some(Value::Array(items)) => {
            let bytes = byte_values(items.iter()).map_err(invalid)?;
            address_from_raw_bytes(&bytes).map_err(invalid)
        }
        Some(Value::Object(indexed)) => {
            let bytes = typed_array_bytes(indexed).map_err(invalid)?;
            address_from_raw_bytes(&bytes).map_err(invalid)
        }
        Some(Value::String(text)) if text.starts_with("0x") || text.starts_with("0X") => {
            address_from_hex(text).map_err(from_parse)
        }
        Some(Value::String(text)) => address_from_decimal(text).map_err(from_parse),
        Some(other) => Err(invalid(format!("unsupported JSON {}", json_type(other)))),
    }
}

/// Decode an amount field, trying in order: decimal string, `0x` hex string,
/// non-negative JSON integer.
pub(crate) fn decode_amount(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Amount, MalformedTraceError> {
    let invalid = |reason: String| MalformedTraceError::InvalidAmount { field, reason };

    match object.get(field) {
        None | Some(Value::Null) => Err(MalformedTraceError::MissingField { field }),
        Some(Value::String(text)) if text.starts_with("0x") || text.starts_with("0X") => {
            Amount::from_hex_str(text).map_err(|e| invalid(e.to_string()))
        }
        Some(Value::String(text)) => {
            Amount::from_decimal_str(text).map_err(|e| invalid(e.to_string()))
        }
        Some(Value::Number(number)) => number
            .as_u64()
            .map(Amount::from)
            .ok_or_else(|| invalid(format!("{number} is not a non-negative integer"))),
        Some(other) => Err(invalid(format!("unsupported JSON {}", json_type(other)))),
    }
}

/// Raw byte forms must be a bare address or a full stack word.
fn address_from_raw_bytes(bytes: &[u8]) -> Result<Address, String> {
    if bytes.len() != 20 && bytes.len() != 32 {
        return Err(format!("{} bytes, expected 20 or 32", bytes.len()));
    }
    address_from_be_bytes(bytes).map_err(|e| e.to_string())
}

fn byte_values<'a>(items: impl Iterator<Item = &'a Value>) -> Result<Vec<u8>, String> {
    items
        .map(|item| {
            item.as_u64()
                .and_then(|byte| u8::try_from(byte).ok())
                .ok_or_else(|| format!("{item} is not a byte"))
        })
        .collect()
}

/// Bytes of a JS typed array serialized as `{"0": b0, "1": b1, ...}`.
fn typed_array_bytes(indexed: &Map<String, Value>) -> Result<Vec<u8>, String> {
    let mut slots = vec![None; indexed.len()];
    for (key, value) in indexed {
        let position: usize = key
            .parse()
            .map_err(|_| format!("non-numeric key {key:?}"))?;
        if *key != position.to_string() {
            return Err(format!("non-canonical key {key:?}"));
        }
        let slot = slots
            .get_mut(position)
            .ok_or_else(|| format!("index {position} out of range"))?;
        *slot = Some(value);
    }
    let values = slots
        .into_iter()
        .enumerate()
        .map(|(position, slot)| slot.ok_or_else(|| format!("index {position} missing")))
        .collect::<Result<Vec<_>, _>>()?;
    byte_values(values.into_iter())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::address::address_to_decimal;
    use crate::types::transfers::NativeTransferKind;
    use alloy_primitives::address;
    use serde_json::json;

    const ADDR_A: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    const ADDR_B: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
    const ADDR_C: Address = address!("cccccccccccccccccccccccccccccccccccccccc");
    const ADDR_D: Address = address!("dddddddddddddddddddddddddddddddddddddddd");

    fn bytes_json(address: Address) -> Value {
        json!(address.as_slice())
    }

    #[test]
    fn test_flattens_transaction_then_calls() {
        let result = json!([{
            "callOps": [{
                "from": bytes_json(ADDR_C),
                "addr": address_to_decimal(ADDR_D),
                "val": "7"
            }],
            "from": bytes_json(ADDR_A),
            "to": bytes_json(ADDR_B),
            "value": "5"
        }]);

        let extraction = flatten_trace_result(&result).unwrap();
        assert!(extraction.is_complete());
        assert_eq!(
            extraction.records,
            vec![
                NativeTransfer::transaction(0, ADDR_A, ADDR_B, Amount::from(5)),
                NativeTransfer::call(0, ADDR_C, ADDR_D, Amount::from(7)),
            ]
        );
        assert_eq!(extraction.records[0].call_depth, 0);
        assert_eq!(extraction.records[1].call_depth, 1);
        assert_eq!(extraction.records[1].kind, NativeTransferKind::Call);
    }

    #[test]
    fn test_zero_value_transaction_is_kept() {
        let result = json!([{
            "callOps": [],
            "from": bytes_json(ADDR_A),
            "to": bytes_json(ADDR_B),
            "value": "0"
        }]);

        let extraction = flatten_trace_result(&result).unwrap();
        assert_eq!(extraction.records.len(), 1);
        assert!(extraction.records[0].amount.is_zero());
    }

    #[test]
    fn test_wrapped_results_are_unwrapped() {
        let result = json!([{
            "txHash": "0x00000000000000000000000000000000000000000000000000000000000000aa",
            "result": {
                "callOps": [],
                "from": format!("{ADDR_A:#x}"),
                "to": format!("{ADDR_B:#x}"),
                "value": "0x10"
            }
        }]);

        let extraction = flatten_trace_result(&result).unwrap();
        assert_eq!(
            extraction.records,
            vec![NativeTransfer::transaction(0, ADDR_A, ADDR_B, Amount::from(16))]
        );
    }

    #[test]
    fn test_wrapped_error_aborts_without_partial_results() {
        let result = json!([
            { "callOps": [], "from": bytes_json(ADDR_A), "to": bytes_json(ADDR_B), "value": "1" },
            { "txHash": "0x01", "error": "execution timeout" }
        ]);

        match flatten_trace_result(&result) {
            Err(NativeTransferError::TraceExecution { message }) => {
                assert!(message.contains("execution timeout"));
                assert!(message.contains("transaction 1"));
            }
            other => panic!("expected TraceExecution, got {other:?}"),
        }
    }

    #[test]
    fn test_non_array_result_is_malformed() {
        assert!(matches!(
            flatten_trace_result(&json!({ "callOps": [] })),
            Err(NativeTransferError::MalformedTrace(MalformedTraceError::NotAnArray { .. }))
        ));
        assert!(matches!(
            flatten_trace_result(&Value::Null),
            Err(NativeTransferError::MalformedTrace(MalformedTraceError::NotAnArray { .. }))
        ));
    }

    #[test]
    fn test_malformed_call_is_skipped_and_rest_kept() {
        let result = json!([{
            "callOps": [
                { "from": bytes_json(ADDR_C), "addr": "not a number", "val": "1" },
                { "from": bytes_json(ADDR_C), "addr": address_to_decimal(ADDR_D), "val": "2" }
            ],
            "from": bytes_json(ADDR_A),
            "to": bytes_json(ADDR_B),
            "value": "0"
        }]);

        let extraction = flatten_trace_result(&result).unwrap();
        assert_eq!(extraction.records.len(), 2);
        assert_eq!(extraction.records[1].amount, Amount::from(2));
        assert_eq!(extraction.skipped.len(), 1);
        assert_eq!(
            extraction.skipped[0].location,
            RecordLocation::Call {
                tx_index: 0,
                call_index: 0
            }
        );
    }

    #[test]
    fn test_malformed_context_skips_only_transaction_record() {
        let result = json!([{
            "callOps": [{ "from": bytes_json(ADDR_C), "addr": address_to_decimal(ADDR_D), "val": "3" }],
            "from": bytes_json(ADDR_A),
            "value": "1"
        }]);

        let extraction = flatten_trace_result(&result).unwrap();
        assert_eq!(
            extraction.records,
            vec![NativeTransfer::call(0, ADDR_C, ADDR_D, Amount::from(3))]
        );
        assert_eq!(
            extraction.skipped[0].reason.to_string(),
            MalformedTraceError::MissingField { field: "to" }.to_string()
        );
    }

    #[test]
    fn test_address_encodings_normalize_identically() {
        let word = ADDR_D.into_word();
        let typed_array: Map<String, Value> = ADDR_D
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, b)| (i.to_string(), json!(b)))
            .collect();

        for encoded in [
            bytes_json(ADDR_D),
            json!(word.as_slice()),
            Value::Object(typed_array),
            json!(format!("{ADDR_D:#x}")),
            json!(format!("{word:#x}")),
            json!(address_to_decimal(ADDR_D)),
        ] {
            let object = json!({ "addr": encoded.clone() });
            let decoded = decode_address(object.as_object().unwrap(), "addr");
            assert_eq!(decoded, Ok(ADDR_D), "encoding {encoded}");
        }
    }

    #[test]
    fn test_address_decoding_fails_closed() {
        for encoded in [
            json!(true),
            json!(12),
            json!([]),
            json!([1, 2, 3]),
            json!([256]),
            json!(vec![0xffu8; 32]),
            json!({ "x": 1 }),
            json!("0xnothex"),
            json!("-1"),
        ] {
            let object = json!({ "addr": encoded.clone() });
            assert!(
                matches!(
                    decode_address(object.as_object().unwrap(), "addr"),
                    Err(MalformedTraceError::InvalidAddress { field: "addr", .. })
                ),
                "encoding {encoded} should be rejected"
            );
        }
    }

    #[test]
    fn test_typed_array_keys_must_be_canonical() {
        let mut indexed: Map<String, Value> = ADDR_A
            .iter()
            .enumerate()
            .map(|(i, byte)| (i.to_string(), json!(byte)))
            .collect();
        let object = json!({ "addr": indexed });
        assert_eq!(decode_address(object.as_object().unwrap(), "addr"), Ok(ADDR_A));

        // "05" and "5" name the same slot
        indexed.insert("05".to_string(), json!(0));
        let object = json!({ "addr": indexed });
        match decode_address(object.as_object().unwrap(), "addr") {
            Err(MalformedTraceError::InvalidAddress { reason, .. }) => {
                assert!(reason.contains("non-canonical key \"05\""), "{reason}")
            }
            other => panic!("expected invalid address, got {other:?}"),
        }

        let mut gap = indexed.clone();
        gap.remove("05");
        gap.remove("5");
        gap.insert("20".to_string(), json!(0));
        let object = json!({ "addr": gap });
        match decode_address(object.as_object().unwrap(), "addr") {
            Err(MalformedTraceError::InvalidAddress { reason, .. }) => {
                assert!(reason.contains("index 20 out of range"), "{reason}")
            }
            other => panic!("expected invalid address, got {other:?}"),
        }
    }

    #[test]
    fn test_amount_encodings() {
        for (encoded, expected) in [
            (json!("1000"), Amount::from(1000)),
            (json!("0x3e8"), Amount::from(1000)),
            (json!(1000), Amount::from(1000)),
        ] {
            let object = json!({ "val": encoded });
            assert_eq!(decode_amount(object.as_object().unwrap(), "val"), Ok(expected));
        }

        for encoded in [json!(-1), json!(1.5), json!("1e3"), json!([1])] {
            let object = json!({ "val": encoded });
            assert!(decode_amount(object.as_object().unwrap(), "val").is_err());
        }
    }

    #[test]
    fn test_lenient_response_errors() {
        assert_eq!(
            lenient_response(r#"{"jsonrpc":"2.0","id":0,"error":"tracer failed"}"#),
            Some(LenientResponse::Error("tracer failed".to_string()))
        );
        assert_eq!(
            lenient_response(r#"{"jsonrpc":"2.0","id":0,"error":{"code":-32000,"message":"boom"}}"#),
            Some(LenientResponse::Error("boom".to_string()))
        );
        assert_eq!(lenient_response(r#"{"jsonrpc":"2.0","id":0,"error":{"code":1}}"#), None);
        assert_eq!(lenient_response(r#"{"jsonrpc":"2.0","id":0,"error":17}"#), None);
        assert_eq!(lenient_response("<html>"), None);
    }

    #[test]
    fn test_lenient_response_null_error_reads_result() {
        assert_eq!(
            lenient_response(r#"{"jsonrpc":"2.0","id":0,"error":null,"result":[{"callOps":[]}]}"#),
            Some(LenientResponse::Result(json!([{ "callOps": [] }])))
        );
        assert_eq!(
            lenient_response(r#"{"jsonrpc":"2.0","id":0,"result":[]}"#),
            Some(LenientResponse::Result(json!([])))
        );
        assert_eq!(lenient_response(r#"{"jsonrpc":"2.0","id":0,"error":null}"#), None);
    }
}
