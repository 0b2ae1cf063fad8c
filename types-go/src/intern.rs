use ahash::RandomState;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

const HASH_KEY1: u64 = 0x243f_6a88_85a3_08d3;
const HASH_KEY2: u64 = 0x1319_8a2e_0370_7344;
const HASH_KEY3: u64 = 0xa409_3822_299f_31d0;
const HASH_KEY4: u64 = 0x082e_fa98_ec4e_6c89;
const STRING_DOMAIN: u64 = 0x7374_7269;

// Seeded so map iteration and hashing are identical across processes.
fn stable_state() -> RandomState {
  RandomState::with_seeds(
    HASH_KEY1 ^ STRING_DOMAIN,
    HASH_KEY2.wrapping_add(STRING_DOMAIN),
    HASH_KEY3 ^ (STRING_DOMAIN << 1),
    HASH_KEY4.wrapping_sub(STRING_DOMAIN),
  )
}

/// Concurrent dedup cache for rendered strings. Repeated renderings of the
/// same type return clones of one shared `Arc<str>`.
#[derive(Debug)]
pub(crate) struct StrInterner {
  map: DashMap<Arc<str>, (), RandomState>,
}

impl StrInterner {
  pub fn new() -> Self {
    Self { map: DashMap::with_hasher(stable_state()) }
  }

  pub fn intern(&self, s: &str) -> Arc<str> {
    if let Some(existing) = self.map.get(s) {
      return Arc::clone(existing.key());
    }
    let owned: Arc<str> = Arc::from(s);
    match self.map.entry(Arc::clone(&owned)) {
      Entry::Occupied(ent) => Arc::clone(ent.key()),
      Entry::Vacant(ent) => {
        ent.insert(());
        owned
      }
    }
  }

  pub fn len(&self) -> usize {
    self.map.len()
  }
}
