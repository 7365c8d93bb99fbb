use serde::{Deserialize, Serialize};

/// Constant `source` tag written with every market-data row.
pub const SOURCE_TAG: &str = "HK_GOV";

/// A price record normalized from the upstream feed, ready for storage.
///
/// The natural key is `(barcode, name)`: duplicate names with different
/// barcodes are distinct rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    /// Upstream barcode; empty string when the feed omits it.
    pub barcode: String,
    /// Resolved display name (localized field preferred). Never empty —
    /// records without a name are skipped during normalization.
    pub name: String,
    /// Listed price.
    ///
    /// Boundary note: this is a feed-time `f64` convenience type; the store's
    /// numeric column rounds on persistence. Absent upstream prices are
    /// normalized to `0`.
    pub price: f64,
}

impl MarketRecord {
    /// Object-storage key for this record's mirrored image.
    ///
    /// Records without a barcode all map to `market/.jpg`; the mirror
    /// overwrites that key on each such record, matching the feed's own
    /// lack of identity for barcode-less items.
    #[must_use]
    pub fn image_object_key(&self) -> String {
        format!("market/{}.jpg", self.barcode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(barcode: &str) -> MarketRecord {
        MarketRecord {
            barcode: barcode.to_string(),
            name: "可樂".to_string(),
            price: 5.5,
        }
    }

    #[test]
    fn image_object_key_uses_barcode() {
        let record = make_record("111");
        assert_eq!(record.image_object_key(), "market/111.jpg");
    }

    #[test]
    fn image_object_key_with_empty_barcode() {
        let record = make_record("");
        assert_eq!(record.image_object_key(), "market/.jpg");
    }

    #[test]
    fn serde_roundtrip_record() {
        let record = make_record("111");
        let json = serde_json::to_string(&record).expect("serialization failed");
        let decoded: MarketRecord = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded, record);
    }
}
