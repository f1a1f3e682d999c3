//! Shopping cart aggregation.
//!
//! A [`Cart`] is a set of [`CartLine`]s keyed by (product id, size, color) that keeps
//! insertion order for display. Totals are derived from the current lines on every
//! read and never stored.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub selected_size: String,
    pub selected_color: String,
}

impl CartLine {
    fn matches(&self, product_id: &str, size: &str, color: &str) -> bool {
        self.product.id == product_id && self.selected_size == size && self.selected_color == color
    }

    pub fn subtotal(&self) -> Decimal {
        self.product
            .price
            .saturating_mul(Decimal::from(self.quantity))
    }
}

/// Confirmation shown to the shopper after an item lands in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CartNotice {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product` in the given size and color.
    ///
    /// An existing line for the same selection is incremented; otherwise a new line
    /// with quantity 1 is appended.
    pub fn add_item(&mut self, product: &Product, size: &str, color: &str) -> CartNotice {
        match self
            .lines
            .iter_mut()
            .find(|line| line.matches(&product.id, size, color))
        {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
                selected_size: size.to_string(),
                selected_color: color.to_string(),
            }),
        }

        let notice = CartNotice {
            title: "Adicionado ao carrinho".to_string(),
            description: format!("{} - {} - {}", product.name, size, color),
        };
        tracing::debug!(product_id = %product.id, size, color, "cart item added");
        notice
    }

    pub fn remove_item(&mut self, product_id: &str, size: &str, color: &str) {
        self.lines
            .retain(|line| !line.matches(product_id, size, color));
    }

    /// Sets the absolute quantity of a line. Zero or negative removes it.
    pub fn update_quantity(&mut self, product_id: &str, size: &str, color: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id, size, color);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(product_id, size, color))
        {
            line.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Takes the lines of an order placed from a snapshot of this cart out of it.
    /// Quantities added since the snapshot stay; lines that drop to zero go.
    pub fn subtract(&mut self, placed: &Cart) {
        for sent in &placed.lines {
            if let Some(line) = self.lines.iter_mut().find(|line| {
                line.matches(&sent.product.id, &sent.selected_size, &sent.selected_color)
            }) {
                line.quantity = line.quantity.saturating_sub(sent.quantity);
            }
        }
        self.lines.retain(|line| line.quantity > 0);
    }

    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |sum, line| sum.saturating_add(line.subtotal()))
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn view(&self) -> CartView {
        CartView {
            lines: self
                .lines
                .iter()
                .map(|line| CartLineView {
                    product_id: line.product.id.clone(),
                    name: line.product.name.clone(),
                    image: line.product.image.clone(),
                    price: line.product.price,
                    size: line.selected_size.clone(),
                    color: line.selected_color.clone(),
                    quantity: line.quantity,
                    subtotal: line.subtotal(),
                })
                .collect(),
            total: self.total(),
            item_count: self.item_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub image: String,
    pub price: Decimal,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: Decimal,
    pub item_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Produto {id}"),
            price: Decimal::from(price),
            category_id: String::new(),
            subcategory_id: String::new(),
            sizes: vec!["P".into(), "M".into(), "G".into()],
            colors: Vec::new(),
            description: String::new(),
            image: String::new(),
            featured: None,
            is_new: None,
        }
    }

    #[test]
    fn repeated_adds_collapse_into_one_line() {
        let mut cart = Cart::new();
        let shirt = product("1", 100);
        for _ in 0..3 {
            cart.add_item(&shirt, "M", "Preto");
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.total(), Decimal::from(300));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn different_size_or_color_is_a_separate_line() {
        let mut cart = Cart::new();
        let shirt = product("1", 100);
        cart.add_item(&shirt, "M", "Preto");
        cart.add_item(&shirt, "G", "Preto");
        cart.add_item(&shirt, "M", "Branco");

        assert_eq!(cart.len(), 3);
        let sizes: Vec<_> = cart.lines().iter().map(|l| l.selected_size.as_str()).collect();
        assert_eq!(sizes, ["M", "G", "M"]);
    }

    #[test]
    fn add_item_returns_confirmation() {
        let mut cart = Cart::new();
        let notice = cart.add_item(&product("7", 50), "P", "Azul");

        assert_eq!(notice.title, "Adicionado ao carrinho");
        assert_eq!(notice.description, "Produto 7 - P - Azul");
    }

    #[test]
    fn update_quantity_sets_absolute_value() {
        let mut cart = Cart::new();
        let shirt = product("1", 100);
        cart.add_item(&shirt, "M", "Preto");
        cart.add_item(&shirt, "M", "Preto");
        cart.update_quantity("1", "M", "Preto", 1);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.total(), Decimal::from(100));
    }

    #[test]
    fn non_positive_quantity_removes_line() {
        for quantity in [0, -1, -40] {
            let mut cart = Cart::new();
            cart.add_item(&product("1", 100), "M", "Preto");
            cart.add_item(&product("2", 80), "M", "Preto");
            cart.update_quantity("1", "M", "Preto", quantity);

            let mut expected = Cart::new();
            expected.add_item(&product("1", 100), "M", "Preto");
            expected.add_item(&product("2", 80), "M", "Preto");
            expected.remove_item("1", "M", "Preto");

            assert_eq!(cart, expected, "quantity {quantity}");
        }
    }

    #[test]
    fn update_on_missing_line_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 100), "M", "Preto");
        cart.update_quantity("9", "M", "Preto", 4);
        cart.remove_item("9", "M", "Preto");

        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 100), "M", "Preto");
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn subtract_keeps_what_was_added_after_the_snapshot() {
        let mut cart = Cart::new();
        let dress = product("1", 100);
        let shirt = product("2", 80);
        cart.add_item(&dress, "M", "Preto");
        cart.add_item(&shirt, "M", "Preto");
        let placed = cart.clone();

        cart.add_item(&dress, "M", "Preto");
        cart.add_item(&product("3", 40), "P", "Azul");
        cart.subtract(&placed);

        let left: Vec<_> = cart
            .lines()
            .iter()
            .map(|l| (l.product.id.as_str(), l.quantity))
            .collect();
        assert_eq!(left, [("1", 1), ("3", 1)]);
        assert_eq!(cart.total(), Decimal::from(140));
    }

    #[test]
    fn subtract_of_an_unchanged_snapshot_empties_the_cart() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 100), "M", "Preto");
        cart.update_quantity("1", "M", "Preto", 3);
        let placed = cart.clone();

        cart.update_quantity("1", "M", "Preto", 2);
        cart.subtract(&placed);

        assert!(cart.is_empty());
    }

    #[test]
    fn decimal_prices_sum_exactly() {
        let mut cart = Cart::new();
        let mut tee = product("1", 0);
        tee.price = Decimal::new(1999, 2);
        cart.add_item(&tee, "M", "Preto");
        cart.update_quantity("1", "M", "Preto", 3);

        assert_eq!(cart.total(), Decimal::new(5997, 2));
        let view = cart.view();
        assert_eq!(view.lines[0].subtotal, Decimal::new(5997, 2));
        assert_eq!(view.item_count, 3);
    }
}
