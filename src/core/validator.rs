use crate::domain::model::ShippingBox;
use serde_json::Value;

/// 判斷未經型別轉換的 JSON 是否為合法目錄。
///
/// 必須是陣列，且每個元素都有非空的 `name`，以及恰好三個大於 0 的數字組成的
/// `dimensions`。只要有一個元素不合格，整份目錄就不合格。
pub fn is_valid_catalog_value(candidate: &Value) -> bool {
    let Some(items) = candidate.as_array() else {
        return false;
    };

    items.iter().all(|item| {
        let has_name = item
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|name| !name.is_empty());

        let has_dimensions = item
            .get("dimensions")
            .and_then(Value::as_array)
            .is_some_and(|dims| {
                dims.len() == 3
                    && dims
                        .iter()
                        .all(|d| d.as_f64().is_some_and(|v| v > 0.0))
            });

        has_name && has_dimensions
    })
}

pub fn is_valid_box(shipping_box: &ShippingBox) -> bool {
    !shipping_box.name.is_empty()
        && shipping_box
            .dimensions
            .iter()
            .all(|d| d.is_finite() && *d > 0.0)
}

pub fn is_valid_catalog(catalog: &[ShippingBox]) -> bool {
    catalog.iter().all(is_valid_box)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_catalog_accepts_canonical_shape() {
        let catalog = json!([
            {"name": "6C", "dimensions": [6, 6, 6]},
            {"name": "BIKE", "dimensions": [54.5, 7.75, 27.5]}
        ]);
        assert!(is_valid_catalog_value(&catalog));
        assert!(is_valid_catalog_value(&json!([])));
    }

    #[test]
    fn test_value_catalog_is_all_or_nothing() {
        let wrong_arity = json!([
            {"name": "6C", "dimensions": [6, 6, 6]},
            {"name": "flat", "dimensions": [6, 6]}
        ]);
        let zero = json!([{"name": "6C", "dimensions": [6, 0, 6]}]);
        let text = json!([{"name": "6C", "dimensions": [6, "6", 6]}]);
        let no_name = json!([{"dimensions": [6, 6, 6]}]);
        let empty_name = json!([{"name": "", "dimensions": [6, 6, 6]}]);

        for candidate in [wrong_arity, zero, text, no_name, empty_name] {
            assert!(!is_valid_catalog_value(&candidate), "{candidate}");
        }
        assert!(!is_valid_catalog_value(&json!({"name": "6C"})));
    }

    #[test]
    fn test_typed_catalog_rejects_non_finite() {
        let good = ShippingBox::new("8C", [8.0, 8.0, 8.0]);
        let bad = ShippingBox::new("NaN", [8.0, f64::NAN, 8.0]);
        assert!(is_valid_catalog(&[good.clone()]));
        assert!(!is_valid_catalog(&[good, bad]));
        assert!(!is_valid_box(&ShippingBox::new("", [1.0, 1.0, 1.0])));
    }
}
