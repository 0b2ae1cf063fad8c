use crate::ids::TypeId;
use crate::store::TypeStore;
use sha2::Digest;
use sha2::Sha256;

impl TypeStore {
  /// Hash a type for switch dispatch and itab layout. The digest runs over
  /// the name-string rendering, so structurally identical types hash
  /// identically across compilation units regardless of allocation order.
  pub fn type_hash(&self, t: TypeId) -> u32 {
    let name = self.name_string(t);
    let digest = Sha256::digest(name.as_bytes());
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
  }
}
