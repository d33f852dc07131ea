//! Decoding of Qdrant point payloads into typed result payloads.
//!
//! Payloads written by older indexers carry no `kind` tag; their kind is inferred from the
//! identifying field (`filepath` or `commit_id`).

use std::collections::HashMap;

use qdrant_client::qdrant::{Value, value::Kind};

use qrefine_domain::{CommitInfo, FileChunk, ResultPayload};

pub const KIND_FIELD: &str = "kind";

pub fn decode_payload(payload: &HashMap<String, Value>) -> ResultPayload {
	let kind = match payload_str(payload, KIND_FIELD) {
		Some(kind) => kind,
		None if payload.contains_key("filepath") => "file_chunk",
		None if payload.contains_key("commit_id") => "commit_info",
		None => return ResultPayload::Unknown,
	};

	match kind {
		"file_chunk" => ResultPayload::FileChunk(FileChunk {
			filepath: payload_string(payload, "filepath"),
			content_chunk: payload_string(payload, "content_chunk"),
			chunk_index: payload_u32(payload, "chunk_index").unwrap_or_default(),
			total_chunks: payload_u32(payload, "total_chunks").unwrap_or_default(),
			last_modified: payload_str(payload, "last_modified").map(str::to_string),
		}),
		"commit_info" => ResultPayload::CommitInfo(CommitInfo {
			commit_id: payload_string(payload, "commit_id"),
			commit_message: payload_string(payload, "commit_message"),
			author: payload_string(payload, "author"),
			date: payload_string(payload, "date"),
			changed_files: payload_str_list(payload, "changed_files"),
			parent_ids: payload_str_list(payload, "parent_ids"),
		}),
		other => {
			tracing::warn!(kind = other, "Unrecognized payload kind; result carries no text.");

			ResultPayload::Unknown
		},
	}
}

fn payload_str<'a>(payload: &'a HashMap<String, Value>, key: &str) -> Option<&'a str> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::StringValue(text)) => Some(text.as_str()),
		_ => None,
	}
}

fn payload_string(payload: &HashMap<String, Value>, key: &str) -> String {
	payload_str(payload, key).unwrap_or_default().to_string()
}

fn payload_u32(payload: &HashMap<String, Value>, key: &str) -> Option<u32> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::IntegerValue(value)) => u32::try_from(*value).ok(),
		Some(Kind::DoubleValue(value)) =>
			if value.fract() == 0.0 && *value >= 0.0 {
				u32::try_from(*value as i64).ok()
			} else {
				None
			},
		_ => None,
	}
}

fn payload_str_list(payload: &HashMap<String, Value>, key: &str) -> Vec<String> {
	let Some(value) = payload.get(key) else { return Vec::new() };

	match &value.kind {
		Some(Kind::ListValue(list)) => list
			.values
			.iter()
			.filter_map(|item| match &item.kind {
				Some(Kind::StringValue(text)) => Some(text.clone()),
				_ => None,
			})
			.collect(),
		_ => Vec::new(),
	}
}
