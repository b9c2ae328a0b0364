//! Cart handlers.
//!
//! ## Commands
//! - Add a line / increment an existing one
//! - Set a line's quantity (zero removes)
//! - Clear the cart
//!
//! ## Queries
//! - Get the current cart

mod add_line;
mod clear_cart;
mod get_cart;
mod set_line_quantity;

pub use add_line::{AddCartLineCommand, AddCartLineHandler, AddCartLineResult};
pub use clear_cart::{ClearCartCommand, ClearCartHandler};
pub use get_cart::{GetCartHandler, GetCartQuery};
pub use set_line_quantity::{SetLineQuantityCommand, SetLineQuantityHandler, SetLineQuantityResult};
