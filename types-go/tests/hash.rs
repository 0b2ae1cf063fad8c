use types_go::MapType;
use types_go::StructType;
use types_go::TypeKind;
use types_go::TypeStore;

// Digest values pinned so hashes stay stable across releases; they are the
// first four bytes of SHA-256 over the name-string, little-endian.
#[test]
fn hash_values_are_pinned() {
  let store = TypeStore::new("main");
  let b = store.basic_ids();

  assert_eq!(&*store.name_string(b.int), "int");
  assert_eq!(store.type_hash(b.int), 0x348c_a86d);

  let m = store.alloc(TypeKind::Map(MapType::new(b.string, b.int)));
  assert_eq!(store.type_hash(m), 0x31e0_0ec2);

  let pb = store.alloc(TypeKind::Ptr(b.byte));
  assert_eq!(&*store.name_string(pb), "*uint8");
  assert_eq!(store.type_hash(pb), 0x0c4a_f21f);
}

#[test]
fn hash_ignores_allocation_order() {
  let a = TypeStore::new("main");
  let b = TypeStore::new("main");
  // Burn some ids in the second store so equal shapes get different ids.
  let bb = b.basic_ids();
  for _ in 0..17 {
    b.alloc(TypeKind::Ptr(bb.int));
  }

  let build = |store: &TypeStore| {
    let basics = store.basic_ids();
    let sym = store.intern_sym(Some(store.local_pkg()), "T");
    let named = store.alloc_named(sym, TypeKind::Struct(StructType::plain(vec![])));
    store.alloc(TypeKind::Map(MapType::new(basics.string, named)))
  };
  let ta = build(&a);
  let tb = build(&b);
  assert_ne!(ta, tb);
  assert_eq!(a.name_string(ta), b.name_string(tb));
  assert_eq!(a.type_hash(ta), b.type_hash(tb));
}

#[test]
fn distinct_shapes_hash_apart() {
  let store = TypeStore::new("main");
  let b = store.basic_ids();
  assert_ne!(store.type_hash(b.int), store.type_hash(b.uint));

  let si = store.alloc(TypeKind::Slice(b.int));
  let ss = store.alloc(TypeKind::Slice(b.string));
  assert_ne!(store.type_hash(si), store.type_hash(ss));
}
