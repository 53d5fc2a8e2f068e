pub mod html;
pub mod time_parser;

pub use time_parser::TimeParser;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Random URL-safe token built from `byte_len` random bytes (base64, no
/// padding). 32 bytes gives a 43 character token.
pub fn generate_token(byte_len: usize) -> String {
    let bytes: Vec<u8> = std::iter::repeat_with(rand::random::<u8>)
        .take(byte_len.max(1))
        .collect();
    URL_SAFE_NO_PAD.encode(bytes)
}
