// ==========================================
// Customer Analytics - ingestion layer
// ==========================================
// Turns external files into raw record sequences. No validation
// happens here beyond well-formedness of the container format; the
// canonicalizer owns record-level judgment.
// ==========================================

pub mod customers_csv;
pub mod error;
pub mod orders_xml;

pub use customers_csv::parse_customers_csv;
pub use error::{IngestError, IngestResult};
pub use orders_xml::{parse_orders_xml, parse_orders_xml_str};
