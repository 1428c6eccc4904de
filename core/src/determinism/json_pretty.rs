use crate::error::CoreResult;
use serde::Serialize;

// Feed files on disk:
// - UTF-8 JSON, no BOM
// - two-space indentation
// - object keys in the order they were read (serde_json preserve_order)
// - exactly one trailing newline
pub fn to_pretty_bytes<T: Serialize>(value: &T) -> CoreResult<Vec<u8>> {
    let mut out = serde_json::to_vec_pretty(value)?;
    out.push(b'\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_key_order_and_ends_with_newline() {
        let v: serde_json::Value = serde_json::from_str(r#"{"b":1,"a":[]}"#).unwrap();
        let bytes = to_pretty_bytes(&v).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "{\n  \"b\": 1,\n  \"a\": []\n}\n"
        );
    }
}
