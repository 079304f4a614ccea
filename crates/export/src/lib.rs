//! `sandalia-export` — dataset bundles on disk.
//!
//! Serializes a store snapshot to a JSON bundle inside the export
//! directory and verifies the written file with a SHA-256 checksum.

pub mod bundle;

pub use bundle::{compute_checksum, BundleInfo, ChecksumInfo, ExportService, BUNDLE_FILE};
