use crate::domain::model::{Catalog, ShippingBox};

/// 內建紙箱清單，儲存區沒有可用目錄時使用
const DEFAULT_BOXES: &[(&str, [f64; 3])] = &[
    ("6C", [6.0, 6.0, 6.0]),
    ("8C", [8.0, 8.0, 8.0]),
    ("10C", [10.0, 10.0, 10.0]),
    ("12C", [12.0, 12.0, 12.0]),
    ("14C", [14.0, 14.0, 14.0]),
    ("16C", [16.0, 16.0, 16.0]),
    ("18C", [18.0, 18.0, 18.0]),
    ("20C", [20.0, 20.0, 20.0]),
    ("22C", [22.0, 22.0, 22.0]),
    ("24C", [24.0, 24.0, 24.0]),
    ("25.75C", [25.75, 25.75, 25.75]),
    ("12126", [12.0, 12.0, 6.0]),
    ("16164 UPS", [16.0, 16.0, 4.0]),
    ("J-10", [9.0, 7.0, 4.0]),
    ("J-12", [10.0, 7.0, 5.0]),
    ("J-15", [14.0, 11.0, 6.0]),
    ("17118 UPS", [17.0, 11.0, 8.0]),
    ("J-22", [20.0, 15.0, 9.0]),
    ("J-57", [26.0, 18.0, 13.0]),
    ("151210 UPS", [15.0, 12.0, 10.0]),
    ("201212 UPS", [20.0, 12.0, 12.0]),
    ("84C", [24.0, 13.0, 16.0]),
    ("202012 UPS", [20.0, 20.0, 12.0]),
    ("MED WREATH", [20.0, 6.0, 20.0]),
    ("24186 UPS", [24.0, 18.0, 6.0]),
    ("LG WREATH", [24.0, 6.0, 24.0]),
    ("30246 UPS", [30.0, 24.0, 6.0]),
    ("30 MIRROR", [30.0, 6.0, 30.0]),
    ("42 MIRROR", [42.0, 6.0, 36.0]),
    ("48 MIRROR", [48.0, 5.0, 36.0]),
    ("UPS-1", [20.0, 20.0, 25.0]),
    ("UPS-2", [24.0, 17.0, 24.0]),
    ("UPS-3", [33.0, 18.0, 18.0]),
    ("UPS-4", [22.0, 18.0, 12.0]),
    ("UMBRELLA-4", [4.0, 4.0, 60.0]),
    ("SKI HALF", [9.0, 6.0, 38.0]),
    ("SKI BOTH", [9.0, 6.0, 84.0]),
    ("6648", [6.0, 6.0, 48.0]),
    ("LAMP", [13.0, 13.0, 40.0]),
    ("151548 UPS", [15.0, 15.0, 48.0]),
    ("TV DW", [27.0, 20.0, 18.0]),
    ("VCR DW", [20.0, 20.0, 12.0]),
    ("SUITCASE", [24.0, 10.0, 31.0]),
    ("GUITAR", [20.0, 8.0, 50.0]),
    ("GOLF BOX", [14.0, 14.0, 53.0]),
    ("241818UPS", [24.0, 18.0, 18.0]),
    ("242416 UPS", [24.0, 24.0, 16.0]),
    ("WARDROBE", [24.0, 21.0, 46.0]),
    ("BB-130", [34.0, 22.0, 24.0]),
    ("SNOWBOARD", [8.0, 16.0, 65.0]),
    ("BIKE", [54.5, 7.75, 27.5]),
    ("SHIRT B", [18.0, 14.0, 4.0]),
    ("CHAIR", [30.0, 29.0, 34.0]),
];

pub fn default_catalog() -> Catalog {
    DEFAULT_BOXES
        .iter()
        .map(|(name, dimensions)| ShippingBox::new(*name, *dimensions))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validator::is_valid_catalog;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 53);
        assert!(is_valid_catalog(&catalog));
        assert_eq!(catalog[0], ShippingBox::new("6C", [6.0, 6.0, 6.0]));
    }
}
