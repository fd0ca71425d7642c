//! Request handlers.

pub mod gallery;
pub mod health;
pub mod proxy;
pub mod uploader;

pub use gallery::*;
pub use health::*;
pub use proxy::*;
pub use uploader::*;
