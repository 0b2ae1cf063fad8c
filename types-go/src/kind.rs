use crate::field::StructType;
use crate::ids::SymId;
use crate::ids::TypeId;

/// Predeclared scalar kinds. `Nil` and `Blank` are the pseudo-types of the
/// untyped nil and the blank identifier; `UntypedNumber` backs the shared
/// representation of untyped numeric constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BasicKind {
  Int,
  Uint,
  Int8,
  Uint8,
  Int16,
  Uint16,
  Int32,
  Uint32,
  Int64,
  Uint64,
  Uintptr,
  Float32,
  Float64,
  Complex64,
  Complex128,
  Bool,
  String,
  Nil,
  Blank,
  UntypedNumber,
}

impl BasicKind {
  pub fn name(self) -> &'static str {
    match self {
      BasicKind::Int => "int",
      BasicKind::Uint => "uint",
      BasicKind::Int8 => "int8",
      BasicKind::Uint8 => "uint8",
      BasicKind::Int16 => "int16",
      BasicKind::Uint16 => "uint16",
      BasicKind::Int32 => "int32",
      BasicKind::Uint32 => "uint32",
      BasicKind::Int64 => "int64",
      BasicKind::Uint64 => "uint64",
      BasicKind::Uintptr => "uintptr",
      BasicKind::Float32 => "float32",
      BasicKind::Float64 => "float64",
      BasicKind::Complex64 => "complex64",
      BasicKind::Complex128 => "complex128",
      BasicKind::Bool => "bool",
      BasicKind::String => "string",
      BasicKind::Nil => "nil",
      BasicKind::Blank => "blank",
      BasicKind::UntypedNumber => "untyped number",
    }
  }
}

/// Direction of a channel type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChanDir {
  Send,
  Recv,
  Both,
}

/// An interface method. `sym` may be absent on interfaces recovered from
/// erroneous source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Method {
  pub sym: Option<SymId>,
  pub ty: TypeId,
}

/// One term of a type-set union, e.g. `~string`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnionTerm {
  pub ty: TypeId,
  pub tilde: bool,
}

/// A map type plus the runtime-internal structs the backend attaches to it.
/// The internal structs are absent until lowering assigns them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapType {
  pub key: TypeId,
  pub elem: TypeId,
  pub bucket: Option<TypeId>,
  pub hdr: Option<TypeId>,
  pub iter: Option<TypeId>,
}

impl MapType {
  pub fn new(key: TypeId, elem: TypeId) -> Self {
    Self { key, elem, bucket: None, hdr: None, iter: None }
  }
}

/// Structural payload of a type arena entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeKind {
  Basic(BasicKind),
  Ptr(TypeId),
  Array { elem: TypeId, len: i64 },
  Slice(TypeId),
  Chan { elem: TypeId, dir: ChanDir },
  Map(MapType),
  Interface { methods: Vec<Method> },
  /// A signature. `params`, `results`, and `tparams` point at funarg struct
  /// tuples; `recv` at a one-field receiver tuple.
  Func {
    recv: Option<TypeId>,
    tparams: Option<TypeId>,
    params: TypeId,
    results: TypeId,
  },
  Struct(StructType),
  /// A forward declaration whose definition has not been installed yet.
  Forward,
  UnsafePtr,
  TypeParam,
  Union { terms: Vec<UnionTerm> },
  /// Backend-synthesized type carrying a literal rendering (e.g. SSA
  /// memory/flags pseudo-types).
  Raw(String),
  /// Backend-synthesized multi-value aggregate.
  Results(Vec<TypeId>),
}

impl TypeKind {
  /// Upper-case tag used as the prefix in debug renderings.
  pub(crate) fn kind_name(&self) -> &'static str {
    match self {
      TypeKind::Basic(_) => "BASIC",
      TypeKind::Ptr(_) => "PTR",
      TypeKind::Array { .. } => "ARRAY",
      TypeKind::Slice(_) => "SLICE",
      TypeKind::Chan { .. } => "CHAN",
      TypeKind::Map(_) => "MAP",
      TypeKind::Interface { .. } => "INTER",
      TypeKind::Func { .. } => "FUNC",
      TypeKind::Struct(_) => "STRUCT",
      TypeKind::Forward => "FORW",
      TypeKind::UnsafePtr => "UNSAFEPTR",
      TypeKind::TypeParam => "TYPEPARAM",
      TypeKind::Union { .. } => "UNION",
      TypeKind::Raw(_) => "RAW",
      TypeKind::Results(_) => "RESULTS",
    }
  }
}
