use crate::ids::PkgId;
use crate::ids::SymId;
use crate::ids::TypeId;
use crate::intern::StrInterner;
use crate::kind::BasicKind;
use crate::kind::TypeKind;
use crate::pool::BufGuard;
use crate::pool::BufPool;
use crate::sym::link_prefix;
use crate::sym::Pkg;
use crate::sym::Sym;
use crate::sym::LOCAL_LINK_PREFIX;
use ahash::AHashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// One type arena entry. `vargen` disambiguates identically named
/// function-scope types; zero means package scope.
#[derive(Clone, Debug)]
pub(crate) struct TypeData {
  pub kind: TypeKind,
  pub sym: Option<SymId>,
  pub vargen: u32,
}

/// Ids of the predeclared types, allocated once at store construction.
#[derive(Clone, Copy, Debug)]
pub struct BasicIds {
  pub int: TypeId,
  pub uint: TypeId,
  pub int8: TypeId,
  pub uint8: TypeId,
  pub int16: TypeId,
  pub uint16: TypeId,
  pub int32: TypeId,
  pub uint32: TypeId,
  pub int64: TypeId,
  pub uint64: TypeId,
  pub uintptr: TypeId,
  pub float32: TypeId,
  pub float64: TypeId,
  pub complex64: TypeId,
  pub complex128: TypeId,
  pub boolean: TypeId,
  pub string: TypeId,
  pub nil: TypeId,
  pub blank: TypeId,
  pub untyped_bool: TypeId,
  pub untyped_string: TypeId,
  pub untyped_int: TypeId,
  pub untyped_rune: TypeId,
  pub untyped_float: TypeId,
  pub untyped_complex: TypeId,
  pub byte: TypeId,
  pub rune: TypeId,
  pub error: TypeId,
  pub unsafe_pointer: TypeId,
}

#[derive(Debug, Default)]
struct PkgRegistry {
  items: Vec<Pkg>,
  by_path: AHashMap<String, PkgId>,
  // Import count per package NAME, not path; two paths sharing a name force
  // quoted-path qualification in user-facing output.
  num_import: AHashMap<String, u32>,
}

#[derive(Debug, Default)]
struct SymInterner {
  items: Vec<Sym>,
  by_key: AHashMap<(Option<PkgId>, String), SymId>,
}

/// Arena of types, symbols, and packages for one compilation, plus the
/// rendering caches. Wrap in [`Arc`] and share freely; all methods take
/// `&self`.
#[derive(Debug)]
pub struct TypeStore {
  pkgs: RwLock<PkgRegistry>,
  syms: RwLock<SymInterner>,
  types: RwLock<Vec<TypeData>>,
  interner: StrInterner,
  bufs: BufPool,
  local: PkgId,
  basics: BasicIds,
}

impl TypeStore {
  /// Create a store for a compilation of the package named `local_name`.
  /// The predeclared types are allocated eagerly so their ids are stable
  /// across runs.
  pub fn new(local_name: impl Into<String>) -> Arc<Self> {
    let mut pkgs = PkgRegistry::default();
    let local = PkgId(0);
    pkgs.items.push(Pkg {
      name: local_name.into(),
      path: String::new(),
      prefix: LOCAL_LINK_PREFIX.to_string(),
    });
    pkgs.by_path.insert(String::new(), local);

    let placeholder = TypeId(0);
    let mut store = Self {
      pkgs: RwLock::new(pkgs),
      syms: RwLock::new(SymInterner::default()),
      types: RwLock::new(Vec::new()),
      interner: StrInterner::new(),
      bufs: BufPool::default(),
      local,
      basics: BasicIds {
        int: placeholder,
        uint: placeholder,
        int8: placeholder,
        uint8: placeholder,
        int16: placeholder,
        uint16: placeholder,
        int32: placeholder,
        uint32: placeholder,
        int64: placeholder,
        uint64: placeholder,
        uintptr: placeholder,
        float32: placeholder,
        float64: placeholder,
        complex64: placeholder,
        complex128: placeholder,
        boolean: placeholder,
        string: placeholder,
        nil: placeholder,
        blank: placeholder,
        untyped_bool: placeholder,
        untyped_string: placeholder,
        untyped_int: placeholder,
        untyped_rune: placeholder,
        untyped_float: placeholder,
        untyped_complex: placeholder,
        byte: placeholder,
        rune: placeholder,
        error: placeholder,
        unsafe_pointer: placeholder,
      },
    };
    store.basics = Self::install_basics(&store);
    Arc::new(store)
  }

  fn install_basics(store: &Self) -> BasicIds {
    let b = |kind: BasicKind| store.alloc(TypeKind::Basic(kind));
    let byte_sym = store.intern_sym(None, "byte");
    let rune_sym = store.intern_sym(None, "rune");
    let error_sym = store.intern_sym(None, "error");
    BasicIds {
      int: b(BasicKind::Int),
      uint: b(BasicKind::Uint),
      int8: b(BasicKind::Int8),
      uint8: b(BasicKind::Uint8),
      int16: b(BasicKind::Int16),
      uint16: b(BasicKind::Uint16),
      int32: b(BasicKind::Int32),
      uint32: b(BasicKind::Uint32),
      int64: b(BasicKind::Int64),
      uint64: b(BasicKind::Uint64),
      uintptr: b(BasicKind::Uintptr),
      float32: b(BasicKind::Float32),
      float64: b(BasicKind::Float64),
      complex64: b(BasicKind::Complex64),
      complex128: b(BasicKind::Complex128),
      boolean: b(BasicKind::Bool),
      string: b(BasicKind::String),
      nil: b(BasicKind::Nil),
      blank: b(BasicKind::Blank),
      untyped_bool: b(BasicKind::Bool),
      untyped_string: b(BasicKind::String),
      untyped_int: b(BasicKind::UntypedNumber),
      untyped_rune: b(BasicKind::UntypedNumber),
      untyped_float: b(BasicKind::UntypedNumber),
      untyped_complex: b(BasicKind::UntypedNumber),
      byte: store.alloc_named(byte_sym, TypeKind::Basic(BasicKind::Uint8)),
      rune: store.alloc_named(rune_sym, TypeKind::Basic(BasicKind::Int32)),
      error: store.alloc_named(error_sym, TypeKind::Interface { methods: Vec::new() }),
      unsafe_pointer: store.alloc(TypeKind::UnsafePtr),
    }
  }

  pub fn local_pkg(&self) -> PkgId {
    self.local
  }

  pub fn basic_ids(&self) -> BasicIds {
    self.basics
  }

  /// Register an imported package. Re-declaring a path returns the original
  /// id without bumping the name's import count.
  pub fn declare_pkg(&self, name: impl Into<String>, path: impl Into<String>) -> PkgId {
    let name = name.into();
    let path = path.into();
    let mut pkgs = self.pkgs.write();
    if let Some(id) = pkgs.by_path.get(&path) {
      return *id;
    }
    let id = PkgId(pkgs.items.len() as u32);
    pkgs.items.push(Pkg { name: name.clone(), path: path.clone(), prefix: link_prefix(&path) });
    pkgs.by_path.insert(path, id);
    *pkgs.num_import.entry(name).or_insert(0) += 1;
    id
  }

  pub fn pkg(&self, id: PkgId) -> Pkg {
    self.pkgs.read().items.get(id.index()).cloned().expect("PkgId not declared")
  }

  pub(crate) fn import_count(&self, name: &str) -> u32 {
    self.pkgs.read().num_import.get(name).copied().unwrap_or(0)
  }

  pub fn intern_sym(&self, pkg: Option<PkgId>, name: impl Into<String>) -> SymId {
    let name = name.into();
    let mut syms = self.syms.write();
    if let Some(id) = syms.by_key.get(&(pkg, name.clone())) {
      return *id;
    }
    let id = SymId(syms.items.len() as u32);
    syms.items.push(Sym { pkg, name: name.clone() });
    syms.by_key.insert((pkg, name), id);
    id
  }

  pub fn sym(&self, id: SymId) -> Sym {
    self.syms.read().items.get(id.index()).cloned().expect("SymId not interned")
  }

  pub fn alloc(&self, kind: TypeKind) -> TypeId {
    self.insert(TypeData { kind, sym: None, vargen: 0 })
  }

  pub fn alloc_named(&self, sym: SymId, kind: TypeKind) -> TypeId {
    self.insert(TypeData { kind, sym: Some(sym), vargen: 0 })
  }

  /// Allocate a forward declaration to be filled in by [`Self::define`].
  /// This is how cyclic types are built.
  pub fn reserve(&self, sym: Option<SymId>) -> TypeId {
    self.insert(TypeData { kind: TypeKind::Forward, sym, vargen: 0 })
  }

  pub fn define(&self, id: TypeId, kind: TypeKind) {
    let mut types = self.types.write();
    let data = types.get_mut(id.index()).expect("TypeId not allocated");
    match data.kind {
      TypeKind::Forward => data.kind = kind,
      _ => panic!("define on already defined type #{}", id.0),
    }
  }

  pub fn set_vargen(&self, id: TypeId, vargen: u32) {
    let mut types = self.types.write();
    types.get_mut(id.index()).expect("TypeId not allocated").vargen = vargen;
  }

  /// Attach the runtime-internal structs lowered for `map`. The three struct
  /// types must carry a `map` back-pointer naming this map.
  pub fn set_map_structs(&self, map: TypeId, bucket: TypeId, hdr: TypeId, iter: TypeId) {
    let mut types = self.types.write();
    let data = types.get_mut(map.index()).expect("TypeId not allocated");
    match &mut data.kind {
      TypeKind::Map(mt) => {
        mt.bucket = Some(bucket);
        mt.hdr = Some(hdr);
        mt.iter = Some(iter);
      }
      _ => panic!("set_map_structs on non-map type #{}", map.0),
    }
  }

  pub fn type_kind(&self, id: TypeId) -> TypeKind {
    self.data(id).kind
  }

  pub fn type_sym(&self, id: TypeId) -> Option<SymId> {
    self.data(id).sym
  }

  pub fn vargen(&self, id: TypeId) -> u32 {
    self.data(id).vargen
  }

  /// Number of distinct strings produced by the rendering caches so far.
  pub fn interned_strings(&self) -> usize {
    self.interner.len()
  }

  pub(crate) fn data(&self, id: TypeId) -> TypeData {
    self.types.read().get(id.index()).cloned().expect("TypeId not allocated")
  }

  pub(crate) fn intern(&self, s: &str) -> Arc<str> {
    self.interner.intern(s)
  }

  pub(crate) fn render_buf(&self) -> BufGuard<'_> {
    self.bufs.get()
  }

  fn insert(&self, data: TypeData) -> TypeId {
    let mut types = self.types.write();
    let id = TypeId(types.len() as u32);
    types.push(data);
    id
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pkg_declaration_dedups_by_path() {
    let store = TypeStore::new("main");
    let a = store.declare_pkg("rand", "math/rand");
    let b = store.declare_pkg("rand", "math/rand");
    assert_eq!(a, b);
    assert_eq!(store.import_count("rand"), 1);
    let c = store.declare_pkg("rand", "crypto/rand");
    assert_ne!(a, c);
    assert_eq!(store.import_count("rand"), 2);
  }

  #[test]
  fn sym_interning_is_per_pkg() {
    let store = TypeStore::new("main");
    let fmt = store.declare_pkg("fmt", "fmt");
    let a = store.intern_sym(Some(fmt), "Println");
    let b = store.intern_sym(Some(fmt), "Println");
    let c = store.intern_sym(None, "Println");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(store.sym(a).name, "Println");
  }

  #[test]
  #[should_panic(expected = "define on already defined type")]
  fn define_rejects_non_forward() {
    let store = TypeStore::new("main");
    let b = store.basic_ids();
    let t = store.alloc(TypeKind::Ptr(b.int));
    store.define(t, TypeKind::Slice(b.int));
  }
}
