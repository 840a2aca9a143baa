/*
[INPUT]:  Encoded query strings and the account secret key
[OUTPUT]: Hex HMAC-SHA256 signatures for authenticated requests
[POS]:    HTTP layer - request signing for signed endpoints
[UPDATE]: When changing signing algorithm or signature placement
*/

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Sign an encoded query string with the account secret key.
///
/// The signature must be computed over exactly the bytes that precede it
/// on the wire and appended as the final `signature` parameter; any
/// reordering invalidates it server-side.
pub fn sign_query(secret_key: &str, encoded_query: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(encoded_query.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
