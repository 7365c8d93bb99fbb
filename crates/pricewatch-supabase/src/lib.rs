//! Typed client for the hosted Supabase (PostgREST) tables.
//!
//! All access goes through the REST surface with the service-role key;
//! this crate never speaks raw SQL.

pub mod client;
pub mod error;
pub mod types;

pub use client::SupabaseClient;
pub use error::SupabaseError;
pub use types::{InventoryPriceUpdate, MarketDataRow};
