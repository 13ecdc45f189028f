//! Password hashing.
//!
//! bcrypt is CPU-bound, so both operations run on the blocking pool.

/// Compute a salted bcrypt hash of `password` with the given work factor
pub async fn hash_password(password: String, cost: u32) -> crate::Result<String> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Check a plaintext guess against a stored bcrypt hash
///
/// A malformed stored hash is an error, not a mismatch.
pub async fn verify_password(password: String, hash: String) -> crate::Result<bool> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("Abcdef1!".to_string(), TEST_COST).await.unwrap();

        assert_ne!(hash, "Abcdef1!");
        assert!(verify_password("Abcdef1!".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("abcdef1!".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hash_is_salted() {
        let first = hash_password("Str0ng!pass".to_string(), TEST_COST).await.unwrap();
        let second = hash_password("Str0ng!pass".to_string(), TEST_COST).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_hash_records_cost() {
        let hash = hash_password("Str0ng!pass".to_string(), 10).await.unwrap();
        assert!(hash.starts_with("$2b$10$"));
    }

    #[tokio::test]
    async fn test_verify_malformed_hash_is_error() {
        let result = verify_password("whatever".to_string(), "not-a-hash".to_string()).await;
        assert!(result.is_err());
    }
}
