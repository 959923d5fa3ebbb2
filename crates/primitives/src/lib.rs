//! Path-addressed tree model shared by cfgtree clients.
//!
//! A configuration store exposes a tree of named nodes. Every location in the
//! tree is addressed by a [`Path`], written externally as space-delimited
//! segments (`"service ssh port"`). Values are one of three shapes, see
//! [`ConfigValue`], and any tree can be [flattened](value::flatten_tree) into
//! an ordered list of `(path, value)` pairs that map one-to-one onto the
//! elementary [`Operation`]s understood by the store.

pub mod operation;
pub mod path;
pub mod value;

pub use operation::{Batch, Endpoint, Operation, Payload};
pub use path::{InvalidPath, Path};
pub use value::{
    flatten, flatten_tree, ConfigValue, FlatEntry, FlattenError, Shape, Tree, ValueError,
};
