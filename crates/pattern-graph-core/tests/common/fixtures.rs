//! Pattern store fixtures.

use std::io::Write;

use pattern_graph_core::{InMemoryGateway, ReverseLookup};
use tempfile::NamedTempFile;

/// Three-level store.
///
/// ```text
///   node2:   sent_loop -> sent_1 -> {phr_cat, phr_sat, phr_mat}
///   node1:   phr_cat -> {tok_the, tok_cat}
///            phr_sat -> {tok_sat, missing}
///            phr_mat -> {tok_the, tok_mat}
///   node0:   tok_the, tok_cat, tok_sat, tok_mat
/// ```
///
/// `sent_1` keeps one of its references inside a nested mapping and
/// `missing` exists in no KB.
pub const STORE: &str = r#"{
  "patterns": [
    {"pattern_name": "tok_the", "kb_id": "node0_kato", "frequency": 120, "payload": [["Ġthe"]]},
    {"pattern_name": "tok_cat", "kb_id": "node0_kato", "frequency": 9,   "payload": [["Ġcat"]]},
    {"pattern_name": "tok_sat", "kb_id": "node0_kato", "frequency": 4,   "payload": [["Ġsat"]]},
    {"pattern_name": "tok_mat", "kb_id": "node0_kato", "frequency": 2,   "payload": [["Ġmat"]]},
    {"pattern_name": "phr_cat", "kb_id": "node1_kato", "frequency": 7,
     "payload": [["PTRN|tok_the"], ["PTRN|tok_cat"]]},
    {"pattern_name": "phr_sat", "kb_id": "node1_kato", "frequency": 3,
     "payload": [["PTRN|tok_sat"], ["PTRN|missing"]]},
    {"pattern_name": "phr_mat", "kb_id": "node1_kato", "frequency": 2,
     "payload": [["PTRN|tok_the"], ["PTRN|tok_mat"]]},
    {"pattern_name": "sent_1", "kb_id": "node2_kato", "frequency": 1,
     "payload": {"events": [["PTRN|phr_cat", "PTRN|phr_sat"]], "meta": {"next": "PTRN|phr_mat"}},
     "metadata": {"source": "fixture"}},
    {"pattern_name": "sent_loop", "kb_id": "node2_kato", "payload": [["PTRN|sent_1"]]}
  ]
}"#;

/// Origin P with descendants D1 and D2 and nothing else.
pub const P_D1_D2: &str = r#"{
  "patterns": [
    {"pattern_name": "D1", "kb_id": "node0_kato", "payload": [["Ġx"]]},
    {"pattern_name": "D2", "kb_id": "node0_kato", "payload": [["Ġy"]]},
    {"pattern_name": "P",  "kb_id": "node1_kato", "payload": [["PTRN|D1"], ["PTRN|D2"]]}
  ]
}"#;

pub fn gateway(lookup: ReverseLookup) -> InMemoryGateway {
    InMemoryGateway::from_json_str(STORE, lookup).expect("fixture parses")
}

/// Write `contents` to a temporary file that lives as long as the handle.
pub fn temp_file(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
