//! Cart line handling

use std::collections::BTreeMap;

use serde::Deserialize;

/// One requested cart line
#[derive(Debug, Clone, Deserialize)]
pub struct CartLine {
    pub product_id: i64,
    pub qty: i64,
}

/// Merge duplicate product lines, summing quantities.
///
/// Clients may submit the same product twice across UI states; merging
/// gives one line per product instead of duplicate items or a double
/// lock on the same row. The map is keyed by product id in ascending
/// order, which fixes the order stock is validated and decremented in.
///
/// Returns `None` when a product's summed quantity overflows `i64`.
pub fn merge_lines(lines: &[CartLine]) -> Option<BTreeMap<i64, i64>> {
    let mut merged: BTreeMap<i64, i64> = BTreeMap::new();
    for line in lines {
        let qty = merged.entry(line.product_id).or_insert(0);
        *qty = qty.checked_add(line.qty)?;
    }
    Some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_sums_duplicate_products() {
        let lines = vec![
            CartLine { product_id: 7, qty: 1 },
            CartLine { product_id: 3, qty: 5 },
            CartLine { product_id: 7, qty: 2 },
        ];
        let merged = merge_lines(&lines).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[&7], 3);
        assert_eq!(merged[&3], 5);
    }

    #[test]
    fn test_merge_keeps_distinct_products() {
        let lines = vec![
            CartLine { product_id: 1, qty: 1 },
            CartLine { product_id: 2, qty: 2 },
        ];
        let merged = merge_lines(&lines).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[&1], 1);
        assert_eq!(merged[&2], 2);
    }

    #[test]
    fn test_merge_iterates_ids_in_ascending_order() {
        let lines = vec![
            CartLine { product_id: 99, qty: 1 },
            CartLine { product_id: 5, qty: 1 },
            CartLine { product_id: 42, qty: 1 },
        ];
        let ids: Vec<i64> = merge_lines(&lines).unwrap().into_keys().collect();

        assert_eq!(ids, vec![5, 42, 99]);
    }

    #[test]
    fn test_merge_empty_cart_is_empty() {
        assert!(merge_lines(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_merge_rejects_overflowing_qty_sum() {
        let lines = vec![
            CartLine { product_id: 7, qty: i64::MAX },
            CartLine { product_id: 7, qty: 2 },
        ];
        assert!(merge_lines(&lines).is_none());
    }
}
