use crate::element::ItemId;

/// Hands out item ids for a single store.
///
/// Ids start at 1 and only ever grow, so they never collide within a session
/// even after the store is cleared.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGenerator {
    pub fn generate_id(&mut self) -> ItemId {
        let id = ItemId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let mut ids = IdGenerator::default();
        let a = ids.generate_id();
        let b = ids.generate_id();
        assert_eq!(a, ItemId(1));
        assert!(b > a);
    }
}
