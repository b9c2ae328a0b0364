//! Courtpass - Cart fulfillment and pass-based tournament registration.
//!
//! Shoppers build a cart of product variants and check out through a hosted
//! payment session. Players spend units of a prepaid pass to enter
//! tournaments; each entry decrements the pass atomically and announces the
//! registration on a chat channel.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
