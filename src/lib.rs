//! Filter-expression building and table sorting for a packet-capture web UI.
//!
//! [`filter::builder`] renders endpoint descriptions as libpcap capture
//! filters or Wireshark display filters. [`table::sorter`] reorders table rows
//! by a column with numeric, IPv4-aware or case-insensitive comparison. The
//! [`api`] module serves both over HTTP.

pub mod api;
pub mod filter;
pub mod models;
pub mod table;
pub mod utils;
