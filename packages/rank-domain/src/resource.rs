use std::collections::BTreeMap;

use serde::de::Error as _;

/// Reads the existing score out of a per-user resource blob.
///
/// The blob is a JSON object keyed by numeric field ids (`{"1": 40, "7": 3}`). A `null` blob, a
/// `null` field, or a blob without the requested field all score 0. Keys are read as base-10
/// integers, so `"01"` names field 1. Non-numeric keys and non-integer values are errors.
pub fn parse_existing_score(blob: &str, field_id: i64) -> serde_json::Result<i64> {
	let fields: Option<BTreeMap<String, Option<i64>>> = serde_json::from_str(blob)?;
	let mut score = 0;

	for (key, value) in fields.unwrap_or_default() {
		let id = key.parse::<i64>().map_err(|err| {
			serde_json::Error::custom(format!("field id {key:?} is not an integer: {err}"))
		})?;

		if id == field_id {
			score = value.unwrap_or(0);
		}
	}

	Ok(score)
}
