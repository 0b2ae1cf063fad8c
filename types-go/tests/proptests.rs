use proptest::prelude::*;
use std::sync::Arc;
use types_go::ChanDir;
use types_go::Field;
use types_go::Funarg;
use types_go::MapType;
use types_go::StructType;
use types_go::TypeId;
use types_go::TypeKind;
use types_go::TypeStore;
use types_go::UnionTerm;

/// A store-independent recipe for a type, so the same shape can be
/// materialized into several stores (or twice into one).
#[derive(Clone, Debug)]
enum Plan {
  Basic(usize),
  Ptr(Box<Plan>),
  Slice(Box<Plan>),
  Array(u8, Box<Plan>),
  Chan(u8, Box<Plan>),
  Map(Box<Plan>, Box<Plan>),
  Struct(Vec<(String, Plan)>),
  Func(Vec<Plan>, Vec<Plan>),
  Union(Vec<(bool, Plan)>),
}

fn leaves(store: &TypeStore) -> Vec<TypeId> {
  let b = store.basic_ids();
  vec![b.int, b.uint8, b.string, b.boolean, b.float64, b.byte, b.rune, b.error]
}

fn materialize(store: &TypeStore, plan: &Plan) -> TypeId {
  match plan {
    Plan::Basic(i) => {
      let ls = leaves(store);
      ls[i % ls.len()]
    }
    Plan::Ptr(p) => store.alloc(TypeKind::Ptr(materialize(store, p))),
    Plan::Slice(p) => store.alloc(TypeKind::Slice(materialize(store, p))),
    Plan::Array(n, p) => {
      store.alloc(TypeKind::Array { elem: materialize(store, p), len: *n as i64 })
    }
    Plan::Chan(d, p) => {
      let dir = match d % 3 {
        0 => ChanDir::Send,
        1 => ChanDir::Recv,
        _ => ChanDir::Both,
      };
      store.alloc(TypeKind::Chan { elem: materialize(store, p), dir })
    }
    Plan::Map(k, v) => {
      store.alloc(TypeKind::Map(MapType::new(materialize(store, k), materialize(store, v))))
    }
    Plan::Struct(fields) => {
      let fields = fields
        .iter()
        .map(|(name, p)| {
          let sym = store.intern_sym(Some(store.local_pkg()), name.clone());
          Field::named(sym, materialize(store, p))
        })
        .collect();
      store.alloc(TypeKind::Struct(StructType::plain(fields)))
    }
    Plan::Func(params, results) => {
      let tuple = |funarg: Funarg, plans: &[Plan]| {
        let fields = plans.iter().map(|p| Field::unnamed(materialize(store, p))).collect();
        store.alloc(TypeKind::Struct(StructType::funarg(funarg, fields)))
      };
      let params = tuple(Funarg::Params, params);
      let results = tuple(Funarg::Results, results);
      store.alloc(TypeKind::Func { recv: None, tparams: None, params, results })
    }
    Plan::Union(terms) => {
      let terms = terms
        .iter()
        .map(|(tilde, p)| UnionTerm { ty: materialize(store, p), tilde: *tilde })
        .collect();
      store.alloc(TypeKind::Union { terms })
    }
  }
}

fn plan_strategy() -> impl Strategy<Value = Plan> {
  let leaf = (0usize..8).prop_map(Plan::Basic);
  leaf.prop_recursive(4, 24, 4, |inner| {
    prop_oneof![
      inner.clone().prop_map(|p| Plan::Ptr(Box::new(p))),
      inner.clone().prop_map(|p| Plan::Slice(Box::new(p))),
      (0u8..16, inner.clone()).prop_map(|(n, p)| Plan::Array(n, Box::new(p))),
      (0u8..3, inner.clone()).prop_map(|(d, p)| Plan::Chan(d, Box::new(p))),
      (inner.clone(), inner.clone()).prop_map(|(k, v)| Plan::Map(Box::new(k), Box::new(v))),
      proptest::collection::vec(("[a-z]{1,4}", inner.clone()), 0..4).prop_map(Plan::Struct),
      (
        proptest::collection::vec(inner.clone(), 0..3),
        proptest::collection::vec(inner.clone(), 0..3)
      )
        .prop_map(|(p, r)| Plan::Func(p, r)),
      proptest::collection::vec((any::<bool>(), inner), 1..3).prop_map(Plan::Union),
    ]
  })
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(64))]

  #[test]
  fn rendering_is_deterministic(plan in plan_strategy()) {
    let store = TypeStore::new("main");
    let t = materialize(&store, &plan);
    let first = store.type_string(t);
    let second = store.type_string(t);
    prop_assert_eq!(&first, &second);
    prop_assert!(Arc::ptr_eq(&first, &second));
    prop_assert_eq!(store.debug_string(t), store.debug_string(t));
    prop_assert_eq!(store.link_string(t), store.link_string(t));
    prop_assert_eq!(store.name_string(t), store.name_string(t));
    // Plans are trees, so nothing should print as a back-reference.
    prop_assert!(!first.contains('@'));
  }

  #[test]
  fn identical_shapes_share_identity_strings(plan in plan_strategy()) {
    let store = TypeStore::new("main");
    let t1 = materialize(&store, &plan);
    let t2 = materialize(&store, &plan);
    prop_assert_eq!(store.link_string(t1), store.link_string(t2));
    prop_assert_eq!(store.name_string(t1), store.name_string(t2));
    prop_assert_eq!(store.type_hash(t1), store.type_hash(t2));
  }

  #[test]
  fn identity_strings_are_store_independent(plan in plan_strategy()) {
    let s1 = TypeStore::new("main");
    let s2 = TypeStore::new("main");
    // Perturb allocation order in the second store.
    let b2 = s2.basic_ids();
    s2.alloc(TypeKind::Ptr(b2.int));
    s2.alloc(TypeKind::Slice(b2.string));
    let t1 = materialize(&s1, &plan);
    let t2 = materialize(&s2, &plan);
    prop_assert_eq!(s1.name_string(t1), s2.name_string(t2));
    prop_assert_eq!(s1.type_hash(t1), s2.type_hash(t2));
  }
}
