#![deny(missing_debug_implementations)]

//! Type, symbol, and package representation for a Go compiler frontend,
//! with canonical stringification.
//!
//! [`TypeStore`] arena-allocates type graphs (cycles included, via
//! [`TypeStore::reserve`] and [`TypeStore::define`]) and renders them in four
//! modes: display syntax for diagnostics, debug dumps, link symbol
//! identities, and cross-unit name-strings that feed [`TypeStore::type_hash`].
//! Renderings are deterministic and interned, so repeated requests return
//! clones of one shared `Arc<str>`.
//!
//! ```
//! use types_go::TypeKind;
//! use types_go::TypeStore;
//!
//! let store = TypeStore::new("main");
//! let basics = store.basic_ids();
//! let ptr = store.alloc(TypeKind::Ptr(basics.int));
//! assert_eq!(&*store.type_string(ptr), "*int");
//! ```

mod consts;
mod field;
mod hash;
mod ids;
mod intern;
mod kind;
mod pool;
mod render;
mod store;
mod sym;

pub use consts::fmt_const;
pub use consts::ConstValue;
pub use field::Field;
pub use field::Funarg;
pub use field::StructType;
pub use ids::PkgId;
pub use ids::SymId;
pub use ids::TypeId;
pub use kind::BasicKind;
pub use kind::ChanDir;
pub use kind::MapType;
pub use kind::Method;
pub use kind::TypeKind;
pub use kind::UnionTerm;
pub use render::Mode;
pub use render::TypeDisplay;
pub use render::Verb;
pub use store::BasicIds;
pub use store::TypeStore;
pub use sym::blank_sym;
pub use sym::is_exported;
pub use sym::link_prefix;
pub use sym::orig_sym;
pub use sym::Pkg;
pub use sym::Sym;
pub use sym::LOCAL_LINK_PREFIX;
