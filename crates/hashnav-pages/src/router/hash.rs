//! Hash fragment to route resolution.

use super::table::RouteTable;

/// Resolves a location fragment (e.g. `"#/about"`) to a route of `table`.
///
/// An empty fragment stands for the fallback route. One leading `#` is
/// stripped and the remainder goes through [`RouteTable::normalize`].
pub fn route_from_hash(hash: &str, table: &RouteTable) -> String {
	let hash = if hash.is_empty() {
		table.fallback_hash()
	} else {
		hash.to_string()
	};
	let raw = hash.strip_prefix('#').unwrap_or(&hash);

	table.normalize(Some(raw)).to_string()
}
