use serde::{Deserialize, Serialize};

use shopflow_core::ProductId;

/// A selected product and quantity held in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price_cents: u64,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total_cents(&self) -> u64 {
        self.unit_price_cents * u64::from(self.quantity)
    }
}

/// Derived cart view handed to subscribers.
///
/// Totals and counts are never stored; they are recomputed from the lines on
/// every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    pub lines: Vec<CartLine>,
    pub total_cents: u64,
    pub item_count: u32,
}

impl CartState {
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let total_cents = lines.iter().map(CartLine::line_total_cents).sum();
        let item_count = lines.iter().map(|line| line.quantity).sum();
        Self {
            lines,
            total_cents,
            item_count,
        }
    }

    pub fn empty() -> Self {
        Self::from_lines(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: u64, unit_price_cents: u64, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(product_id),
            name: format!("product-{product_id}"),
            unit_price_cents,
            image: "https://example.com/p.jpg".to_string(),
            quantity,
        }
    }

    #[test]
    fn empty_state_has_zero_totals() {
        let state = CartState::empty();
        assert!(state.is_empty());
        assert_eq!(state.total_cents, 0);
        assert_eq!(state.item_count, 0);
    }

    #[test]
    fn totals_sum_over_lines() {
        let state = CartState::from_lines(vec![line(1, 19999, 2), line(2, 3999, 1)]);
        assert_eq!(state.total_cents, 19999 * 2 + 3999);
        assert_eq!(state.item_count, 3);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_line() -> impl Strategy<Value = CartLine> {
            (1u64..100, 1u64..100_000, 1u32..20).prop_map(|(id, price, quantity)| CartLine {
                product_id: ProductId::new(id),
                name: format!("product-{id}"),
                unit_price_cents: price,
                image: "https://example.com/p.jpg".to_string(),
                quantity,
            })
        }

        proptest! {
            /// Property: derived totals equal the sums over the lines.
            #[test]
            fn totals_match_line_sums(lines in proptest::collection::vec(arb_line(), 0..10)) {
                let expected_total: u64 = lines
                    .iter()
                    .map(|l| l.unit_price_cents * u64::from(l.quantity))
                    .sum();
                let expected_count: u32 = lines.iter().map(|l| l.quantity).sum();

                let state = CartState::from_lines(lines);
                prop_assert_eq!(state.total_cents, expected_total);
                prop_assert_eq!(state.item_count, expected_count);
            }
        }
    }
}
