macro_rules! id_newtype {
  ($name:ident, $doc:literal) => {
    #[doc = $doc]
    #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
    pub struct $name(pub u32);

    impl $name {
      pub fn index(self) -> usize {
        self.0 as usize
      }
    }

    impl From<u32> for $name {
      fn from(raw: u32) -> Self {
        Self(raw)
      }
    }
  };
}

id_newtype!(TypeId, "Handle into the type arena. Identity, not structure: two structurally identical types may have distinct ids.");
id_newtype!(SymId, "Handle to an interned symbol (package, name) pair.");
id_newtype!(PkgId, "Handle to a declared package.");
