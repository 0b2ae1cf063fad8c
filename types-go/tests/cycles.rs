use types_go::Field;
use types_go::MapType;
use types_go::StructType;
use types_go::TypeKind;
use types_go::TypeStore;

#[test]
fn self_referential_struct_back_references_once() {
  let store = TypeStore::new("main");
  let local = store.local_pkg();

  let node = store.reserve(None);
  let ptr = store.alloc(TypeKind::Ptr(node));
  let next = store.intern_sym(Some(local), "next");
  store.define(node, TypeKind::Struct(StructType::plain(vec![Field::named(next, ptr)])));

  let s = store.type_string(node);
  assert_eq!(&*s, "struct { next *@0 }");
  assert_eq!(s.matches('@').count(), 1);
}

#[test]
fn direct_cycles_reference_their_own_start() {
  let store = TypeStore::new("main");

  let p = store.reserve(None);
  store.define(p, TypeKind::Ptr(p));
  assert_eq!(&*store.type_string(p), "*@0");

  let s = store.reserve(None);
  store.define(s, TypeKind::Slice(s));
  assert_eq!(&*store.type_string(s), "[]@0");

  let b = store.basic_ids();
  let m = store.reserve(None);
  store.define(m, TypeKind::Map(MapType::new(b.string, m)));
  assert_eq!(&*store.type_string(m), "map[string]@0");
}

#[test]
fn back_reference_offsets_point_into_the_buffer() {
  let store = TypeStore::new("main");
  let local = store.local_pkg();

  let a = store.reserve(None);
  let b = store.reserve(None);
  let pa = store.alloc(TypeKind::Ptr(a));
  let pb = store.alloc(TypeKind::Ptr(b));
  let fa = store.intern_sym(Some(local), "a");
  let fb = store.intern_sym(Some(local), "b");
  store.define(a, TypeKind::Struct(StructType::plain(vec![Field::named(fb, pb)])));
  store.define(b, TypeKind::Struct(StructType::plain(vec![Field::named(fa, pa)])));

  // The inner struct starts where the outer pointer ends, so the inner
  // back-reference names offset 0, the rendering of `a` itself.
  assert_eq!(&*store.type_string(a), "struct { b *struct { a *@0 } }");
}

#[test]
fn shared_siblings_expand_in_full() {
  let store = TypeStore::new("main");
  let b = store.basic_ids();

  let ptr = store.alloc(TypeKind::Ptr(b.int));
  let m = store.alloc(TypeKind::Map(MapType::new(ptr, ptr)));
  let s = store.type_string(m);
  assert_eq!(&*s, "map[*int]*int");
  assert!(!s.contains('@'));
}

#[test]
fn named_cycles_print_as_their_name() {
  let store = TypeStore::new("main");
  let local = store.local_pkg();

  let node_sym = store.intern_sym(Some(local), "Node");
  let node = store.reserve(Some(node_sym));
  let ptr = store.alloc(TypeKind::Ptr(node));
  let next = store.intern_sym(Some(local), "next");
  store.define(node, TypeKind::Struct(StructType::plain(vec![Field::named(next, ptr)])));

  assert_eq!(&*store.type_string(node), "Node");
  // Inside its own underlying form the in-progress entry wins over the name.
  assert_eq!(&*store.format_type(node, 'L', false, false), "struct { next *@0 }");
  // Reached from elsewhere, the name short-circuits as usual.
  let list = store.alloc(TypeKind::Slice(node));
  assert_eq!(&*store.type_string(list), "[]Node");
}
