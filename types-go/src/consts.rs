use num_bigint::BigInt;
use ordered_float::OrderedFloat;
use std::fmt;

/// A folded constant value. Floats use [`OrderedFloat`] so values hash and
/// compare reliably inside caches.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstValue {
  Bool(bool),
  Str(String),
  Int(BigInt),
  Float(OrderedFloat<f64>),
  Complex { re: OrderedFloat<f64>, im: OrderedFloat<f64> },
}

impl fmt::Display for ConstValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConstValue::Bool(v) => write!(f, "{v}"),
      ConstValue::Str(s) => write!(f, "{s:?}"),
      ConstValue::Int(v) => write!(f, "{v}"),
      ConstValue::Float(v) => write!(f, "{v}"),
      ConstValue::Complex { re, im } => write!(f, "({re} + {im}i)"),
    }
  }
}

/// Render a constant for diagnostics. `sharp` selects the uniform
/// machine-oriented form; otherwise complex values decompose into minimal
/// sign-aware notation (`0`, `3i`, `2`, `(2+3i)`, `(2-3i)`).
pub fn fmt_const(v: &ConstValue, sharp: bool) -> String {
  if !sharp {
    if let ConstValue::Complex { re, im } = v {
      let has_re = re.0 != 0.0;
      let has_im = im.0 != 0.0;
      return match (has_re, has_im) {
        (false, false) => "0".to_string(),
        (false, true) => format!("{im}i"),
        (true, false) => re.to_string(),
        // The imaginary part prints its own minus sign.
        (true, true) if im.0 < 0.0 => format!("({re}{im}i)"),
        (true, true) => format!("({re}+{im}i)"),
      };
    }
  }
  v.to_string()
}
