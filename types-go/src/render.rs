use crate::field::Field;
use crate::field::Funarg;
use crate::ids::PkgId;
use crate::ids::SymId;
use crate::ids::TypeId;
use crate::kind::ChanDir;
use crate::kind::TypeKind;
use crate::store::TypeData;
use crate::store::TypeStore;
use crate::sym::is_exported;
use crate::sym::orig_sym;
use crate::sym::trim_local_suffix;
use crate::sym::Sym;
use ahash::AHashMap;
use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

/// The kind of string being produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
  /// Regular syntax for user-facing messages.
  Display,
  /// Display syntax with a `KIND-` prefix on the outermost type, for
  /// compiler dumps.
  Debug,
  /// Unexpanded link symbol identity. The local package qualifies as the
  /// literal `""`, substituted by the linker.
  LinkId,
  /// Package-name-qualified identity, stable across compilation units.
  NameString,
}

/// Variant of a rendering within one mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
  Default,
  /// Drop leading keywords and qualifiers, for receiver positions.
  Short,
  /// Print the underlying structural form of a named type.
  Underlying,
}

/// Adapter so a type id formats with `{}` in display mode.
#[derive(Debug)]
pub struct TypeDisplay<'a> {
  store: &'a TypeStore,
  ty: TypeId,
}

impl<'a> TypeDisplay<'a> {
  pub fn new(store: &'a TypeStore, ty: TypeId) -> Self {
    Self { store, ty }
  }
}

impl fmt::Display for TypeDisplay<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.store.type_string(self.ty))
  }
}

impl TypeStore {
  /// Regular syntax, e.g. `map[string]*pkg.T`.
  pub fn type_string(&self, t: TypeId) -> Arc<str> {
    self.type_string_mode(t, Verb::Default, Mode::Display)
  }

  /// Dump syntax with a kind prefix, e.g. `PTR-*T`.
  pub fn debug_string(&self, t: TypeId) -> Arc<str> {
    self.type_string_mode(t, Verb::Default, Mode::Debug)
  }

  /// Link symbol identity. Stable for a fixed set of declarations; callers
  /// building object files must have finished declaring function-scope
  /// types first.
  pub fn link_string(&self, t: TypeId) -> Arc<str> {
    self.type_string_mode(t, Verb::Default, Mode::LinkId)
  }

  /// Cross-unit identity string keyed by package names. Input to
  /// [`Self::type_hash`].
  pub fn name_string(&self, t: TypeId) -> Arc<str> {
    self.type_string_mode(t, Verb::Default, Mode::NameString)
  }

  pub fn type_string_mode(&self, t: TypeId, verb: Verb, mode: Mode) -> Arc<str> {
    let mut buf = self.render_buf();
    let mut visited = AHashMap::new();
    self.tconv2(&mut buf, Some(t), verb, mode, &mut visited);
    self.intern(&buf)
  }

  pub fn display(&self, ty: TypeId) -> TypeDisplay<'_> {
    TypeDisplay::new(self, ty)
  }

  pub fn sym_string(&self, s: SymId) -> Arc<str> {
    self.sym_string_mode(Some(s), Verb::Default, Mode::Display)
  }

  pub fn sym_string_mode(&self, s: Option<SymId>, verb: Verb, mode: Mode) -> Arc<str> {
    match s {
      None => self.intern("<S>"),
      Some(id) => {
        let sym = self.sym(id);
        self.sconv(&sym, verb, mode)
      }
    }
  }

  /// Printf-style entry for types. `v` renders display syntax (`plus` turns
  /// it into a dump), `S` the short form (`minus` switches it to link
  /// identity), `L` the underlying form. Unknown verbs degrade to a
  /// placeholder instead of failing.
  pub fn format_type(&self, t: TypeId, verb: char, plus: bool, minus: bool) -> Arc<str> {
    match verb {
      'v' if plus => self.type_string_mode(t, Verb::Default, Mode::Debug),
      'v' => self.type_string_mode(t, Verb::Default, Mode::Display),
      'S' if minus => self.type_string_mode(t, Verb::Short, Mode::LinkId),
      'S' => self.type_string_mode(t, Verb::Short, Mode::Display),
      'L' => self.type_string_mode(t, Verb::Underlying, Mode::Display),
      _ => self.intern(&format!("%!{verb}(Type=#{})", t.0)),
    }
  }

  /// Printf-style entry for symbols. `v` qualifies per display rules
  /// (`plus` per dump rules), `S` is the bare name.
  pub fn format_sym(&self, s: SymId, verb: char, plus: bool) -> Arc<str> {
    match verb {
      'v' if plus => self.sym_string_mode(Some(s), Verb::Default, Mode::Debug),
      'v' => self.sym_string_mode(Some(s), Verb::Default, Mode::Display),
      'S' => self.sym_string_mode(Some(s), Verb::Short, Mode::Display),
      _ => self.intern(&format!("%!{verb}(Sym=#{})", s.0)),
    }
  }

  /// Qualifier written before a dot-separated symbol name in the given mode;
  /// empty means the name prints bare.
  pub fn pkg_qualifier(&self, pkg: Option<PkgId>, verb: Verb, mode: Mode) -> String {
    if verb == Verb::Short {
      return String::new();
    }
    let Some(pkg) = pkg else {
      // Universe scope is never qualified.
      return String::new();
    };
    match mode {
      Mode::Display => {
        if pkg == self.local_pkg() {
          return String::new();
        }
        let p = self.pkg(pkg);
        if !p.name.is_empty() && self.import_count(&p.name) > 1 {
          // Ambiguous name; fall back to the quoted import path.
          return format!("{:?}", p.path);
        }
        p.name
      }
      Mode::Debug | Mode::NameString => self.pkg(pkg).name,
      Mode::LinkId => self.pkg(pkg).prefix,
    }
  }

  fn sconv(&self, s: &Sym, verb: Verb, mode: Mode) -> Arc<str> {
    if verb == Verb::Underlying {
      panic!("underlying format verb on a symbol");
    }
    let q = self.pkg_qualifier(s.pkg, verb, mode);
    if q.is_empty() {
      return self.intern(&s.name);
    }
    let mut buf = self.render_buf();
    buf.push_str(&q);
    buf.push('.');
    buf.push_str(&s.name);
    self.intern(&buf)
  }

  fn sconv2(&self, b: &mut String, s: Option<&Sym>, verb: Verb, mode: Mode) {
    if verb == Verb::Underlying {
      panic!("underlying format verb on a symbol");
    }
    let Some(s) = s else {
      b.push_str("<S>");
      return;
    };
    let q = self.pkg_qualifier(s.pkg, verb, mode);
    if !q.is_empty() {
      b.push_str(&q);
      b.push('.');
    }
    b.push_str(&s.name);
  }

  fn tconv2(
    &self,
    b: &mut String,
    t: Option<TypeId>,
    verb: Verb,
    mode: Mode,
    visited: &mut AHashMap<TypeId, usize>,
  ) {
    let Some(mut t) = t else {
      b.push_str("<T>");
      return;
    };
    if let Some(off) = visited.get(&t) {
      // An ancestor in the current rendering; emit a back-reference to its
      // start offset instead of recursing forever.
      let _ = write!(b, "@{off}");
      return;
    }

    let mut data = self.data(t);
    match &data.kind {
      TypeKind::Raw(text) => {
        b.push_str(text);
        return;
      }
      TypeKind::Results(members) => {
        for (i, et) in members.iter().enumerate() {
          if i > 0 {
            b.push(',');
          }
          b.push_str(&self.type_string(*et));
        }
        return;
      }
      _ => {}
    }

    let basics = self.basic_ids();
    if t == basics.byte || t == basics.rune {
      match mode {
        Mode::LinkId | Mode::NameString => {
          // Identity strings collapse the alias onto its underlying type.
          t = if t == basics.byte { basics.uint8 } else { basics.int32 };
          data = self.data(t);
        }
        _ => {
          let sym = data.sym.map(|id| self.sym(id));
          self.sconv2(b, sym.as_ref(), Verb::Short, mode);
          return;
        }
      }
    }
    if t == basics.error {
      b.push_str("error");
      return;
    }

    // A named type prints as its name unless the underlying form was asked
    // for.
    if verb != Verb::Underlying {
      if let Some(sym_id) = data.sym {
        let name_verb = if verb == Verb::Short { Verb::Short } else { Verb::Default };
        let mut sym = self.sym(sym_id);
        if mode != Mode::LinkId {
          if let Some(base) = trim_local_suffix(&sym.name) {
            sym.name = base.to_string();
          }
        }
        self.sconv2(b, Some(&sym), name_verb, mode);
        if mode == Mode::LinkId && data.vargen != 0 {
          let _ = write!(b, "·{}", data.vargen);
        }
        return;
      }
    }

    if let TypeKind::Basic(kind) = &data.kind {
      let name = if t == basics.untyped_bool {
        "untyped bool"
      } else if t == basics.untyped_string {
        "untyped string"
      } else if t == basics.untyped_int {
        "untyped int"
      } else if t == basics.untyped_rune {
        "untyped rune"
      } else if t == basics.untyped_float {
        "untyped float"
      } else if t == basics.untyped_complex {
        "untyped complex"
      } else {
        kind.name()
      };
      b.push_str(name);
      return;
    }

    if mode == Mode::Debug {
      b.push_str(data.kind.kind_name());
      b.push('-');
      self.tconv2(b, Some(t), Verb::Default, Mode::Display, visited);
      return;
    }

    // Mark in-progress at the current offset so descendants can
    // back-reference it, then unmark so sibling occurrences expand in full.
    visited.insert(t, b.len());
    self.tconv_structural(b, t, &data, verb, mode, visited);
    visited.remove(&t);
  }

  fn tconv_structural(
    &self,
    b: &mut String,
    t: TypeId,
    data: &TypeData,
    verb: Verb,
    mode: Mode,
    visited: &mut AHashMap<TypeId, usize>,
  ) {
    match &data.kind {
      TypeKind::Ptr(elem) => {
        b.push('*');
        let elem_verb = match mode {
          Mode::LinkId | Mode::NameString if verb == Verb::Short => Verb::Short,
          _ => Verb::Default,
        };
        self.tconv2(b, Some(*elem), elem_verb, mode, visited);
      }
      TypeKind::Array { elem, len } => {
        let _ = write!(b, "[{len}]");
        self.tconv2(b, Some(*elem), Verb::Default, mode, visited);
      }
      TypeKind::Slice(elem) => {
        b.push_str("[]");
        self.tconv2(b, Some(*elem), Verb::Default, mode, visited);
      }
      TypeKind::Chan { elem, dir } => match dir {
        ChanDir::Recv => {
          b.push_str("<-chan ");
          self.tconv2(b, Some(*elem), Verb::Default, mode, visited);
        }
        ChanDir::Send => {
          b.push_str("chan<- ");
          self.tconv2(b, Some(*elem), Verb::Default, mode, visited);
        }
        ChanDir::Both => {
          b.push_str("chan ");
          // `chan <-chan T` parses as a send direction; parenthesize.
          let parens = {
            let elem_data = self.data(*elem);
            elem_data.sym.is_none()
              && matches!(elem_data.kind, TypeKind::Chan { dir: ChanDir::Recv, .. })
          };
          if parens {
            b.push('(');
            self.tconv2(b, Some(*elem), Verb::Default, mode, visited);
            b.push(')');
          } else {
            self.tconv2(b, Some(*elem), Verb::Default, mode, visited);
          }
        }
      },
      TypeKind::Map(map) => {
        b.push_str("map[");
        self.tconv2(b, Some(map.key), Verb::Default, mode, visited);
        b.push(']');
        self.tconv2(b, Some(map.elem), Verb::Default, mode, visited);
      }
      TypeKind::Interface { methods } => {
        if methods.is_empty() {
          b.push_str("interface {}");
          return;
        }
        b.push_str("interface {");
        let mut mode = mode;
        for (i, m) in methods.iter().enumerate() {
          if i != 0 {
            b.push(';');
          }
          b.push(' ');
          match m.sym {
            // Interfaces from erroneous source may lack method symbols.
            None => {}
            Some(sym_id) => {
              let sym = self.sym(sym_id);
              if is_exported(&sym.name) {
                self.sconv2(b, Some(&sym), Verb::Short, mode);
              } else {
                // Unexported methods match only within their package, so
                // the name must stay qualified in identity strings.
                if mode != Mode::NameString {
                  mode = Mode::LinkId;
                }
                self.sconv2(b, Some(&sym), Verb::Default, mode);
              }
            }
          }
          self.tconv2(b, Some(m.ty), Verb::Short, mode, visited);
        }
        b.push_str(" }");
      }
      TypeKind::Func { recv, tparams, params, results } => {
        if verb != Verb::Short {
          if let Some(recv) = recv {
            b.push_str("method");
            self.tconv2(b, Some(*recv), Verb::Default, mode, visited);
            b.push(' ');
          }
          b.push_str("func");
        }
        if let Some(tparams) = tparams {
          self.tconv2(b, Some(*tparams), Verb::Default, mode, visited);
        }
        self.tconv2(b, Some(*params), Verb::Default, mode, visited);
        match self.tuple_fields(*results).as_slice() {
          [] => {}
          [single] => {
            b.push(' ');
            self.tconv2(b, single.ty, Verb::Default, mode, visited);
          }
          _ => {
            b.push(' ');
            self.tconv2(b, Some(*results), Verb::Default, mode, visited);
          }
        }
      }
      TypeKind::Struct(st) => {
        if let Some(map_id) = st.map {
          let TypeKind::Map(map) = self.type_kind(map_id) else {
            panic!("map-internal struct not attached to a map type");
          };
          if Some(t) == map.bucket {
            b.push_str("map.bucket[");
          } else if Some(t) == map.hdr {
            b.push_str("map.hdr[");
          } else if Some(t) == map.iter {
            b.push_str("map.iter[");
          } else {
            panic!("unknown internal map type");
          }
          self.tconv2(b, Some(map.key), Verb::Default, mode, visited);
          b.push(']');
          self.tconv2(b, Some(map.elem), Verb::Default, mode, visited);
          return;
        }

        if st.funarg != Funarg::None {
          let (open, close) = match st.funarg {
            Funarg::TParams => ('[', ']'),
            _ => ('(', ')'),
          };
          // Drop argument names everywhere except dumps.
          let field_verb = match mode {
            Mode::Debug => Verb::Default,
            _ => Verb::Short,
          };
          b.push(open);
          for (i, f) in st.fields.iter().enumerate() {
            if i != 0 {
              b.push_str(", ");
            }
            self.fldconv(b, f, field_verb, mode, visited, st.funarg);
          }
          b.push(close);
        } else {
          b.push_str("struct {");
          for (i, f) in st.fields.iter().enumerate() {
            if i != 0 {
              b.push(';');
            }
            b.push(' ');
            self.fldconv(b, f, Verb::Underlying, mode, visited, st.funarg);
          }
          if !st.fields.is_empty() {
            b.push(' ');
          }
          b.push('}');
        }
      }
      TypeKind::Forward => {
        b.push_str("undefined");
        if let Some(sym_id) = data.sym {
          b.push(' ');
          let sym = self.sym(sym_id);
          self.sconv2(b, Some(&sym), Verb::Default, mode);
        }
      }
      TypeKind::UnsafePtr => b.push_str("unsafe.Pointer"),
      TypeKind::TypeParam => match data.sym {
        Some(sym_id) => {
          let sym = self.sym(sym_id);
          self.sconv2(b, Some(&sym), Verb::Default, mode);
        }
        None => {
          // Placeholder for dumps of incomplete instantiations.
          let _ = write!(b, "tp#{}", t.0);
        }
      },
      TypeKind::Union { terms } => {
        for (i, term) in terms.iter().enumerate() {
          if i > 0 {
            b.push('|');
          }
          if term.tilde {
            b.push('~');
          }
          self.tconv2(b, Some(term.ty), Verb::Default, mode, visited);
        }
      }
      TypeKind::Basic(_) | TypeKind::Raw(_) | TypeKind::Results(_) => {
        // Unreachable for graphs built through the public API; degrade to a
        // detailed print rather than crashing on unexpected input.
        b.push_str(data.kind.kind_name());
        b.push_str(" <");
        let sym = data.sym.map(|id| self.sym(id));
        self.sconv2(b, sym.as_ref(), Verb::Default, mode);
        b.push('>');
      }
    }
  }

  fn fldconv(
    &self,
    b: &mut String,
    f: &Field,
    verb: Verb,
    mode: Mode,
    visited: &mut AHashMap<TypeId, usize>,
    funarg: Funarg,
  ) {
    let mut name = String::new();
    if verb != Verb::Short {
      let mut s = f.sym.map(|id| self.sym(id));
      // Take the name the user wrote, not the compiler-synthesized one.
      if mode == Mode::Display {
        s = s.as_ref().and_then(orig_sym);
      }
      if let Some(s) = s {
        if !f.embedded {
          if funarg != Funarg::None {
            name = self.sconv(&s, Verb::Default, Mode::Display).to_string();
          } else if verb == Verb::Underlying {
            name = s.name.clone();
            if !is_exported(&name) && mode != Mode::NameString {
              // Qualify non-exported field names to avoid ambiguity.
              name = self.sconv(&s, Verb::Default, mode).to_string();
            }
          } else {
            name = self.sconv(&s, Verb::Default, mode).to_string();
          }
        }
      }
    }

    if !name.is_empty() {
      b.push_str(&name);
      b.push(' ');
    }

    if f.variadic {
      let elem = f.ty.and_then(|ty| match self.type_kind(ty) {
        TypeKind::Slice(elem) => Some(elem),
        _ => None,
      });
      b.push_str("...");
      self.tconv2(b, elem, Verb::Default, mode, visited);
    } else {
      self.tconv2(b, f.ty, Verb::Default, mode, visited);
    }

    if verb != Verb::Short && funarg == Funarg::None {
      if let Some(note) = &f.note {
        let _ = write!(b, " {note:?}");
      }
    }
  }

  fn tuple_fields(&self, tuple: TypeId) -> Vec<Field> {
    match self.type_kind(tuple) {
      TypeKind::Struct(st) => st.fields,
      _ => Vec::new(),
    }
  }
}
