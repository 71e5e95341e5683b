//! Music Embedding WASM Module
//!
//! Interval embeddings of pianorolls: melodic, harmonic and barwise interval
//! sequences, the inverse transforms back to pianorolls, chunking and
//! run-length compression of interval sequences.
//!
//! The pure transforms live in [`transducer`] and [`compression`];
//! [`embedder::Embedder`] layers an operand cache on top of them and
//! [`api`] exposes that session to JavaScript.

pub mod api;
pub mod compression;
pub mod config;
pub mod embedder;
pub mod error;
pub mod models;
pub mod transducer;

// Re-export commonly used types
pub use config::EmbedderConfig;
pub use embedder::Embedder;
pub use error::{EmbeddingError, ErrorKind, Result};
pub use models::*;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        // Fails only when a logger is already installed
        let _ = console_log::init_with_level(log::Level::Debug);
    }

    log::info!("Music Embedding WASM module initialized");
}
