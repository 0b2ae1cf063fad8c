use crate::ids::PkgId;

/// A declared package. The `prefix` is the link-symbol escaping of `path`,
/// computed once at declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pkg {
  pub name: String,
  pub path: String,
  pub prefix: String,
}

/// A (package, name) pair. `pkg` is `None` for universe-scope identifiers
/// such as `byte` or `error`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sym {
  pub pkg: Option<PkgId>,
  pub name: String,
}

impl Sym {
  pub fn new(pkg: Option<PkgId>, name: impl Into<String>) -> Self {
    Self { pkg, name: name.into() }
  }
}

/// The blank (`_`) identifier.
pub fn blank_sym() -> Sym {
  Sym::new(None, "_")
}

/// The unexpanded qualifier the linker substitutes with the real import path
/// of the package being compiled.
pub const LOCAL_LINK_PREFIX: &str = "\"\"";

/// Recover the name the user wrote for a compiler-synthesized symbol.
/// Returns `None` when the binding had no user-visible name at all.
pub fn orig_sym(s: &Sym) -> Option<Sym> {
  if s.name.len() > 1 && s.name.starts_with('~') {
    return match s.name.as_bytes()[1] {
      // Originally an unnamed result.
      b'r' => None,
      // Originally the blank identifier.
      b'b' => Some(blank_sym()),
      _ => Some(s.clone()),
    };
  }
  if s.name.starts_with(".anon") {
    // Originally an unnamed or _ name.
    return None;
  }
  Some(s.clone())
}

/// Whether `name` is exported per Go's capitalization rule.
pub fn is_exported(name: &str) -> bool {
  name.chars().next().map_or(false, char::is_uppercase)
}

/// Escape an import path into a form safe for linker symbol tables. Control
/// bytes, spaces, non-ASCII bytes, `%`, `"`, and any `.` after the final
/// slash become `%xx` with lowercase hex.
pub fn link_prefix(path: &str) -> String {
  let slash = path.rfind('/').map_or(-1, |i| i as i64);
  let mut out = String::with_capacity(path.len());
  for (i, c) in path.bytes().enumerate() {
    let escape =
      c <= b' ' || (i as i64 > slash && c == b'.') || c == b'%' || c == b'"' || c >= 0x7f;
    if escape {
      out.push_str(&format!("%{c:02x}"));
    } else {
      out.push(c as char);
    }
  }
  out
}

/// Strip a trailing `·N` disambiguation suffix from a function-scope type
/// name. Returns `None` when the name carries no suffix.
pub(crate) fn trim_local_suffix(name: &str) -> Option<&str> {
  let bytes = name.as_bytes();
  let mut i = bytes.len();
  while i > 0 && bytes[i - 1].is_ascii_digit() {
    i -= 1;
  }
  let dot = "·".as_bytes();
  if i >= dot.len() && i < bytes.len() && &bytes[i - dot.len()..i] == dot {
    Some(&name[..i - dot.len()])
  } else {
    None
  }
}
