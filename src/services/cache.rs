//! Result Cache
//!
//! Bounded FIFO map from request fingerprint to a completed
//! `GenerationResult`. Insertion order is tracked by `IndexMap`; when the
//! cache is full the oldest entry is evicted. Writes are last-write-wins.

use std::sync::{Mutex, MutexGuard};

use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::models::{GenerationRequest, GenerationResult};

/// Unit separator between normalized fields
const FIELD_SEPARATOR: char = '\u{1f}';

/// Cache key for a request: SHA-256 hex over its normalized fields.
///
/// The description is trimmed, lowercased and whitespace-collapsed, so
/// requests that differ only in case or spacing share a key.
pub fn fingerprint(request: &GenerationRequest) -> String {
    let normalize = |text: &str| {
        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    };
    let optional = |text: Option<&str>| text.map(normalize).unwrap_or_default();

    let fields = [
        normalize(&request.description),
        optional(request.domain_hint.as_deref()),
        optional(request.requirements.as_deref()),
        request.options.kind.to_string(),
        optional(request.options.style.as_deref()),
        request.options.strictness.to_string(),
    ];

    let mut hasher = Sha256::new();
    for field in &fields {
        hasher.update(field.as_bytes());
        hasher.update([FIELD_SEPARATOR as u8]);
    }
    hex_encode(&hasher.finalize())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Process-wide result cache, shared across concurrent runs.
#[derive(Debug)]
pub struct ResultCache {
    capacity: usize,
    entries: Mutex<IndexMap<String, GenerationResult>>,
}

impl ResultCache {
    /// Create a cache holding at most `capacity` results; 0 disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(IndexMap::with_capacity(capacity)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<String, GenerationResult>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, key: &str) -> Option<GenerationResult> {
        self.lock().get(key).cloned()
    }

    /// Store a result, replacing any previous value for the key.
    pub fn insert(&self, key: String, result: GenerationResult) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.lock();
        // Re-inserting moves the key to the newest position
        entries.shift_remove(&key);
        while entries.len() >= self.capacity {
            match entries.shift_remove_index(0) {
                Some((evicted, _)) => debug!(key = %evicted, "cache entry evicted"),
                None => break,
            }
        }
        entries.insert(key, result);
    }

    pub fn invalidate(&self, key: &str) -> Option<GenerationResult> {
        self.lock().shift_remove(key)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ArtifactSource, ContentArtifact, DomainCategory, GenerationMetadata, Outcome,
    };
    use concept_forge_quality_gates::{AggregatedValidation, ArtifactKind, QualityStatus, Strictness};

    fn result(id: &str) -> GenerationResult {
        let artifact = ContentArtifact::new(
            ArtifactKind::Document,
            "raw".to_string(),
            "# Doc".to_string(),
            ArtifactSource::Generated,
        );
        GenerationResult {
            run_id: id.to_string(),
            content: artifact.enhanced_content.clone(),
            metadata: GenerationMetadata {
                size_bytes: artifact.size_bytes,
                duration_ms: 1,
                attempt_count: 1,
                generator_calls: 1,
                domain_category: DomainCategory::Generic,
                kind: ArtifactKind::Document,
                cache_hit: false,
                generated_at: artifact.generated_at,
            },
            artifact,
            validation: AggregatedValidation {
                confidence: 90,
                status: QualityStatus::Excellent,
                verified: true,
                issues: Vec::new(),
                recommendations: Vec::new(),
            },
            outcome: Outcome::Accepted,
        }
    }

    #[test]
    fn test_fingerprint_normalizes_description() {
        let a = GenerationRequest::new("  A Farm   Marketplace ");
        let b = GenerationRequest::new("a farm marketplace");
        assert_eq!(fingerprint(&a), fingerprint(&b));
        assert_eq!(fingerprint(&a).len(), 64);
    }

    #[test]
    fn test_fingerprint_distinguishes_fields() {
        let base = GenerationRequest::new("a farm marketplace");
        let keys = [
            fingerprint(&base),
            fingerprint(&base.clone().with_domain_hint("marketplace")),
            fingerprint(&base.clone().with_requirements("payments")),
            fingerprint(&base.clone().with_kind(ArtifactKind::Prototype)),
            fingerprint(&{
                let mut r = base.clone();
                r.options.strictness = Strictness::Strict;
                r
            }),
            fingerprint(&{
                let mut r = base.clone();
                r.options.style = Some("playful".to_string());
                r
            }),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_fifo_eviction() {
        let cache = ResultCache::new(2);
        cache.insert("a".to_string(), result("1"));
        cache.insert("b".to_string(), result("2"));
        cache.insert("c".to_string(), result("3"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_none());
        assert_eq!(cache.get("c").map(|r| r.run_id), Some("3".to_string()));
    }

    #[test]
    fn test_reinsert_is_last_write_wins() {
        let cache = ResultCache::new(2);
        cache.insert("a".to_string(), result("1"));
        cache.insert("b".to_string(), result("2"));
        cache.insert("a".to_string(), result("3"));
        cache.insert("c".to_string(), result("4"));
        // "b" was oldest after "a" was rewritten
        assert!(cache.get("b").is_none());
        assert_eq!(cache.get("a").map(|r| r.run_id), Some("3".to_string()));
    }

    #[test]
    fn test_zero_capacity_disables_cache() {
        let cache = ResultCache::new(0);
        cache.insert("a".to_string(), result("1"));
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = ResultCache::new(4);
        cache.insert("a".to_string(), result("1"));
        cache.insert("b".to_string(), result("2"));
        assert!(cache.invalidate("a").is_some());
        assert!(cache.invalidate("a").is_none());
        cache.clear();
        assert!(cache.is_empty());
    }
}
