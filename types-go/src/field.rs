use crate::ids::SymId;
use crate::ids::TypeId;

/// Role of a struct acting as a function argument tuple. `None` marks an
/// ordinary user struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Funarg {
  None,
  Recv,
  Params,
  Results,
  TParams,
}

/// A struct field or tuple slot. `ty` is absent on fields recovered from
/// erroneous source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
  pub sym: Option<SymId>,
  pub ty: Option<TypeId>,
  pub embedded: bool,
  pub note: Option<String>,
  pub variadic: bool,
}

impl Field {
  pub fn unnamed(ty: TypeId) -> Self {
    Self { sym: None, ty: Some(ty), embedded: false, note: None, variadic: false }
  }

  pub fn named(sym: SymId, ty: TypeId) -> Self {
    Self { sym: Some(sym), ty: Some(ty), embedded: false, note: None, variadic: false }
  }
}

/// Payload of a struct type. `map` back-points at the owning map type when
/// this struct is one of the runtime-internal map structs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructType {
  pub fields: Vec<Field>,
  pub funarg: Funarg,
  pub map: Option<TypeId>,
}

impl StructType {
  pub fn plain(fields: Vec<Field>) -> Self {
    Self { fields, funarg: Funarg::None, map: None }
  }

  pub fn funarg(funarg: Funarg, fields: Vec<Field>) -> Self {
    Self { fields, funarg, map: None }
  }
}
