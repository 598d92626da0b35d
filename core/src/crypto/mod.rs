pub mod types;
pub mod traits;
pub mod aead;
pub mod digest;
pub mod kdf;
pub mod aad;
pub mod nonce;

pub use types::*;
pub use traits::*;
pub use aead::*;
pub use digest::*;
pub use kdf::*;
pub use aad::*;
pub use nonce::*;
