//! Top-level facade crate for pagemeter.
//!
//! Re-exports the metrics core and the web server so users can depend on a single crate.

pub mod core {
    pub use pagemeter_core::*;
}

pub mod server {
    pub use pagemeter_server::*;
}
