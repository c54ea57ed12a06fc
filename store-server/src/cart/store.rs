//! Session cart store
//!
//! Carts are ephemeral: keyed by the opaque cart token the calling layer
//! supplies, held in memory, and destroyed on explicit clear or after the
//! idle timeout. The store is an explicit capability on the server state;
//! nothing reaches into ambient session state.

use dashmap::DashMap;
use shared::models::CartLine;
use shared::util::now_millis;

/// Idle timeout after which a cart expires (30 minutes)
pub const CART_IDLE_TIMEOUT_MS: i64 = 30 * 60 * 1000;

#[derive(Debug)]
struct CartEntry {
    lines: Vec<CartLine>,
    touched_at: i64,
}

/// Concurrent map of session carts with idle expiry.
///
/// `get`/`save` refresh the idle clock; a periodic background task calls
/// [`CartStore::sweep_expired`] to drop abandoned carts.
#[derive(Debug, Default)]
pub struct CartStore {
    carts: DashMap<String, CartEntry>,
}

impl CartStore {
    pub fn new() -> Self {
        Self {
            carts: DashMap::new(),
        }
    }

    /// Current lines for a cart; an expired or unknown cart reads as empty.
    pub fn get(&self, cart_id: &str) -> Vec<CartLine> {
        let now = now_millis();
        if let Some(mut entry) = self.carts.get_mut(cart_id) {
            if is_expired(entry.touched_at, now) {
                drop(entry);
                self.carts.remove(cart_id);
                return Vec::new();
            }
            entry.touched_at = now;
            return entry.lines.clone();
        }
        Vec::new()
    }

    /// Replace a cart's lines. Saving an empty sequence removes the entry.
    pub fn save(&self, cart_id: &str, lines: Vec<CartLine>) {
        if lines.is_empty() {
            self.carts.remove(cart_id);
            return;
        }
        self.carts.insert(
            cart_id.to_string(),
            CartEntry {
                lines,
                touched_at: now_millis(),
            },
        );
    }

    /// Destroy a cart outright.
    pub fn clear(&self, cart_id: &str) {
        self.carts.remove(cart_id);
    }

    /// Drop every cart idle past the timeout; returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let now = now_millis();
        let before = self.carts.len();
        self.carts.retain(|_, entry| !is_expired(entry.touched_at, now));
        before - self.carts.len()
    }

    pub fn len(&self) -> usize {
        self.carts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }
}

fn is_expired(touched_at: i64, now: i64) -> bool {
    now - touched_at > CART_IDLE_TIMEOUT_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i64) -> CartLine {
        CartLine {
            id,
            product_id: 10,
            product_name: "Dress".into(),
            unit_price: 49.90,
            quantity: 1,
            added_at: now_millis(),
        }
    }

    #[test]
    fn save_get_clear_round_trip() {
        let store = CartStore::new();
        store.save("s1", vec![line(1), line(2)]);
        assert_eq!(store.get("s1").len(), 2);

        store.clear("s1");
        assert!(store.get("s1").is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn carts_are_isolated_by_token() {
        let store = CartStore::new();
        store.save("s1", vec![line(1)]);
        store.save("s2", vec![line(1), line(2)]);
        assert_eq!(store.get("s1").len(), 1);
        assert_eq!(store.get("s2").len(), 2);
    }

    #[test]
    fn saving_empty_removes_entry() {
        let store = CartStore::new();
        store.save("s1", vec![line(1)]);
        store.save("s1", Vec::new());
        assert!(store.is_empty());
    }

    #[test]
    fn idle_carts_expire_on_read_and_sweep() {
        let store = CartStore::new();
        store.save("stale", vec![line(1)]);
        store.save("fresh", vec![line(1)]);

        // Backdate one entry past the idle timeout
        store
            .carts
            .get_mut("stale")
            .map(|mut e| e.touched_at -= CART_IDLE_TIMEOUT_MS + 1)
            .unwrap();

        assert!(store.get("stale").is_empty());
        assert_eq!(store.get("fresh").len(), 1);

        store.save("stale2", vec![line(1)]);
        store
            .carts
            .get_mut("stale2")
            .map(|mut e| e.touched_at -= CART_IDLE_TIMEOUT_MS + 1)
            .unwrap();
        assert_eq!(store.sweep_expired(), 1);
        assert_eq!(store.len(), 1);
    }
}
