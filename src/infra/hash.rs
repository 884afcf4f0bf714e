use std::hash::Hasher;

use twox_hash::XxHash64;

/// Content fingerprint used to tie a rendered comparison to its inputs.
pub fn hash64(text: &str) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(text.as_bytes());
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable_and_content_sensitive() {
        assert_eq!(hash64("MOVE A TO B."), hash64("MOVE A TO B."));
        assert_ne!(hash64("a\nb"), hash64("a\nb\n"));
    }
}
