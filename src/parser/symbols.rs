//! Interning tables for file and function names.
//!
//! Ids are dense and assigned in first-seen order starting at 1, so an id is
//! simply its index in the name list plus one. Id 0 is reserved for the
//! synthetic tree root and never handed out.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Conversion between a typed id and its slot in an [`Interner`]
pub trait SymbolId: Copy {
    fn from_index(index: usize) -> Self;
    fn index(self) -> Option<usize>;
}

macro_rules! symbol_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Sentinel used by the synthetic root node
            pub const ROOT: $name = $name(0);

            pub fn is_root(self) -> bool {
                self.0 == 0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ROOT
            }
        }

        impl SymbolId for $name {
            fn from_index(index: usize) -> Self {
                $name(index as u32 + 1)
            }

            fn index(self) -> Option<usize> {
                (self.0 as usize).checked_sub(1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

symbol_id!(
    /// Interned source file name (`fl=` lines)
    FileId
);
symbol_id!(
    /// Interned function name (`fn=` and `cfn=` lines)
    FunctionId
);

/// Append-only string table handing out typed ids
#[derive(Debug, Clone)]
pub struct Interner<I> {
    names: Vec<String>,
    ids: HashMap<String, I>,
}

impl<I: SymbolId> Interner<I> {
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            ids: HashMap::new(),
        }
    }

    /// Return the id of `name`, assigning the next one if it is new
    pub fn intern(&mut self, name: &str) -> I {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = I::from_index(self.names.len());
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    pub fn get(&self, name: &str) -> Option<I> {
        self.ids.get(name).copied()
    }

    pub fn resolve(&self, id: I) -> Option<&str> {
        id.index()
            .and_then(|index| self.names.get(index))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Drop every name assigned after the table held `len` names
    fn truncate(&mut self, len: usize) {
        for name in self.names.drain(len.min(self.names.len())..) {
            self.ids.remove(&name);
        }
    }
}

impl<I: SymbolId> Default for Interner<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Size of both tables at some point in time, see [`Symbols::checkpoint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    files: usize,
    functions: usize,
}

/// The pair of tables shared by every file of one run
///
/// Sharing the tables is what makes `(function, file)` identity comparable
/// across input files during aggregation.
#[derive(Debug, Clone, Default)]
pub struct Symbols {
    pub files: Interner<FileId>,
    pub functions: Interner<FunctionId>,
}

impl Symbols {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_name(&self, id: FileId) -> Option<&str> {
        self.files.resolve(id)
    }

    pub fn function_name(&self, id: FunctionId) -> Option<&str> {
        self.functions.resolve(id)
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            files: self.files.len(),
            functions: self.functions.len(),
        }
    }

    /// Forget names interned since `checkpoint`.
    ///
    /// Used when a file fails to parse and is skipped; ids handed out before
    /// the checkpoint keep their meaning.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.files.truncate(checkpoint.files);
        self.functions.truncate(checkpoint.functions);
    }
}
