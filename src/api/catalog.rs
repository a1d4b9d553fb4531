use serde_json::Value;

use crate::model::CoinId;

/// First entry whose `symbol` string equals `symbol` ignoring case.
///
/// Listing order decides ties. Entries that are not objects, or whose symbol
/// is missing or not a string, never match.
pub fn find_by_symbol<'a>(entries: &'a [Value], symbol: &str) -> Option<&'a Value> {
    let wanted = symbol.to_uppercase();
    entries.iter().find(|entry| {
        entry
            .get("symbol")
            .and_then(Value::as_str)
            .is_some_and(|s| s.to_uppercase() == wanted)
    })
}

/// The entry's `id`, if it has a non-null one.
pub fn coin_id(entry: &Value) -> Option<CoinId> {
    entry
        .get("id")
        .filter(|id| !id.is_null())
        .cloned()
        .map(CoinId)
}
