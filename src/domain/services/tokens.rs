use rand::Rng;

/// URL-safe, 64 symbols. Every token minted here is a bearer credential or
/// an opaque identifier, so the source must be a CSPRNG (`thread_rng` is
/// ChaCha-based).
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

pub fn generate(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
