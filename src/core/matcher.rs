use crate::domain::model::ShippingBox;

fn sorted_descending(values: [f64; 3]) -> [f64; 3] {
    let mut sorted = values;
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted
}

/// 紙箱能否裝下目標（兩者皆可任意旋轉），能的話回傳三軸空隙總和
pub fn fit_slack(shipping_box: &ShippingBox, target: [f64; 3]) -> Option<f64> {
    let box_dims = sorted_descending(shipping_box.dimensions);
    let target_dims = sorted_descending(target);

    let fits = box_dims
        .iter()
        .zip(target_dims.iter())
        .all(|(b, t)| b >= t);

    fits.then(|| {
        box_dims
            .iter()
            .zip(target_dims.iter())
            .map(|(b, t)| (b - t).abs())
            .sum()
    })
}

/// 找出空隙總和最小、且裝得下目標的紙箱。
///
/// 目標尺寸應已加上緩衝。空隙相同時保留目錄中較早出現的紙箱。
pub fn find_closest_box(
    target_length: f64,
    target_width: f64,
    target_height: f64,
    catalog: &[ShippingBox],
) -> Option<&ShippingBox> {
    let target = [target_length, target_width, target_height];
    let mut closest: Option<(&ShippingBox, f64)> = None;

    for shipping_box in catalog {
        let Some(slack) = fit_slack(shipping_box, target) else {
            continue;
        };

        match closest {
            Some((_, smallest)) if slack >= smallest => {}
            _ => closest = Some((shipping_box, slack)),
        }
    }

    if let Some((shipping_box, slack)) = closest {
        tracing::debug!("Matched box {} with slack {}", shipping_box.name, slack);
    }

    closest.map(|(shipping_box, _)| shipping_box)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubes() -> Vec<ShippingBox> {
        vec![
            ShippingBox::new("6C", [6.0, 6.0, 6.0]),
            ShippingBox::new("8C", [8.0, 8.0, 8.0]),
        ]
    }

    #[test]
    fn test_cube_examples() {
        let catalog = cubes();
        assert_eq!(find_closest_box(5.0, 5.0, 5.0, &catalog).unwrap().name, "6C");
        assert_eq!(find_closest_box(7.0, 7.0, 7.0, &catalog).unwrap().name, "8C");
        assert!(find_closest_box(9.0, 9.0, 9.0, &catalog).is_none());
    }

    #[test]
    fn test_empty_catalog_has_no_match() {
        assert!(find_closest_box(1.0, 1.0, 1.0, &[]).is_none());
    }

    #[test]
    fn test_exact_fit_has_zero_slack() {
        let wreath = ShippingBox::new("MED WREATH", [20.0, 6.0, 20.0]);
        assert_eq!(fit_slack(&wreath, [6.0, 20.0, 20.0]), Some(0.0));
        assert_eq!(fit_slack(&wreath, [21.0, 1.0, 1.0]), None);
    }

    #[test]
    fn test_tightest_by_slack_not_volume() {
        // 10C 體積較大，但空隙總和 19 小於長條箱的 23
        let catalog = vec![
            ShippingBox::new("rod", [30.0, 2.0, 2.0]),
            ShippingBox::new("10C", [10.0, 10.0, 10.0]),
        ];
        let found = find_closest_box(9.0, 1.0, 1.0, &catalog).unwrap();
        assert_eq!(found.name, "10C");

        let found = find_closest_box(1.0, 25.0, 1.0, &catalog).unwrap();
        assert_eq!(found.name, "rod");
    }

    #[test]
    fn test_tie_keeps_first_box() {
        let catalog = vec![
            ShippingBox::new("first", [10.0, 8.0, 6.0]),
            ShippingBox::new("second", [6.0, 10.0, 8.0]),
        ];
        assert_eq!(
            find_closest_box(5.0, 5.0, 5.0, &catalog).unwrap().name,
            "first"
        );
    }

    #[test]
    fn test_stored_dimension_order_is_untouched() {
        let catalog = vec![ShippingBox::new("84C", [24.0, 13.0, 16.0])];
        let before = catalog.clone();
        assert!(find_closest_box(10.0, 10.0, 10.0, &catalog).is_some());
        assert_eq!(catalog, before);
    }
}
