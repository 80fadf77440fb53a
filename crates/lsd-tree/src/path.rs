//! Path-based navigation over parsed LSD trees.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use lsd_parse::{Level, List, Lsd, Value};

/// One step of a lookup: a level key or a list index.
///
/// Textual segments classify themselves by signed-integer parse, so `"3"`
/// and `"-1"` become indices and everything else a key. A negative index
/// never matches a list element, and level lookups go through the segment's
/// string form, so an index segment still finds a level key that happens to
/// look like a number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    /// Addresses an entry of a level.
    Key(String),
    /// Addresses an element of a list.
    Index(i64),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

macro_rules! impl_segment_from_text {
    ($($type:ty),* $(,)?) => {
        $(
            impl From<$type> for PathSegment {
                fn from(text: $type) -> Self {
                    text.parse()
                        .map(PathSegment::Index)
                        .unwrap_or_else(|_| PathSegment::Key(text.into()))
                }
            }
        )*
    };
}

impl_segment_from_text!(&str, String);

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index as i64)
    }
}

/// A borrowed sequence of lookup steps.
pub type KeyPath = [PathSegment];

/// Build a lookup path (a `Vec<PathSegment>`) from its pieces.
///
/// Pieces are identifiers or literals, separated by whitespace, `.`, `,`
/// or `;` as you prefer:
///
/// ```
/// use lsd_tree::{PathSegment, path};
///
/// let id = 1;
/// assert_eq!(
///     path!["servers" id "host"],
///     vec![
///         PathSegment::Key("servers".into()),
///         PathSegment::Index(1),
///         PathSegment::Key("host".into()),
///     ],
/// );
/// ```
#[macro_export]
macro_rules! path {
    (@$($collected:expr),*;) => { vec![$($collected),*] };
    (@$($collected:expr),*; . $($rest:tt)*) => {
        $crate::path!(@$($collected),*; $($rest)*)
    };
    (@$($collected:expr),*; , $($rest:tt)*) => {
        $crate::path!(@$($collected),*; $($rest)*)
    };
    (@$($collected:expr),*; ; $($rest:tt)*) => {
        $crate::path!(@$($collected),*; $($rest)*)
    };
    (@$($collected:expr),*; $part:ident $($rest:tt)*) => {
        $crate::path!(
            @$($collected,)* $crate::PathSegment::from($part);
            $($rest)*
        )
    };
    (@$($collected:expr),*; $part:literal $($rest:tt)*) => {
        $crate::path!(
            @$($collected,)* $crate::PathSegment::from($part);
            $($rest)*
        )
    };
    (@$($collected:expr),*; $($rest:tt)*) => {
        compile_error!(concat!("unsupported path piece: ", stringify!($($rest)*)))
    };

    () => { ::std::vec::Vec::<$crate::PathSegment>::new() };
    ($($rest:tt)*) => { $crate::path!(@; $($rest)*) };
}

/// Lookup operations shared by trees, levels and lists.
///
/// A missing segment is a plain `None`, never an error; the typed lookups
/// only report (through the caller's thunk) when the path *resolves* but
/// the node has the wrong shape.
pub trait Navigate {
    /// Resolve `path` to a subtree.
    ///
    /// On an [`Lsd`] node an empty path resolves to the node itself; the
    /// [`Level`] and [`List`] implementations exist to start a lookup from
    /// a borrowed container and need at least one segment.
    fn inner(&self, path: impl Borrow<KeyPath>) -> Option<&Lsd>;

    /// Mutable version of [`Navigate::inner`].
    fn inner_mut(&mut self, path: impl Borrow<KeyPath>) -> Option<&mut Lsd>;

    /// Resolve `path` and require a value.
    fn value<E>(
        &self,
        type_error: impl FnOnce() -> E,
        path: impl Borrow<KeyPath>,
    ) -> Result<Option<&Value>, E> {
        self.inner(path)
            .map(|node| node.as_value().ok_or_else(type_error))
            .transpose()
    }

    /// Mutable version of [`Navigate::value`].
    fn value_mut<E>(
        &mut self,
        type_error: impl FnOnce() -> E,
        path: impl Borrow<KeyPath>,
    ) -> Result<Option<&mut Value>, E> {
        self.inner_mut(path)
            .map(|node| node.as_value_mut().ok_or_else(type_error))
            .transpose()
    }

    /// Resolve `path` to a value and parse its text.
    ///
    /// A wrong node shape and a failed parse both report through
    /// `type_error`.
    fn parsed<T: FromStr, E>(
        &self,
        type_error: impl FnOnce() -> E + Clone,
        path: impl Borrow<KeyPath>,
    ) -> Result<Option<T>, E> {
        self.value(type_error.clone(), path)?
            .map(|text| text.parse().map_err(|_| type_error()))
            .transpose()
    }

    /// Resolve `path` and require a list.
    fn list<E>(
        &self,
        type_error: impl FnOnce() -> E,
        path: impl Borrow<KeyPath>,
    ) -> Result<Option<&List>, E> {
        self.inner(path)
            .map(|node| node.as_list().ok_or_else(type_error))
            .transpose()
    }

    /// Mutable version of [`Navigate::list`].
    fn list_mut<E>(
        &mut self,
        type_error: impl FnOnce() -> E,
        path: impl Borrow<KeyPath>,
    ) -> Result<Option<&mut List>, E> {
        self.inner_mut(path)
            .map(|node| node.as_list_mut().ok_or_else(type_error))
            .transpose()
    }

    /// Resolve `path` and require a level.
    fn level<E>(
        &self,
        type_error: impl FnOnce() -> E,
        path: impl Borrow<KeyPath>,
    ) -> Result<Option<&Level>, E> {
        self.inner(path)
            .map(|node| node.as_level().ok_or_else(type_error))
            .transpose()
    }

    /// Mutable version of [`Navigate::level`].
    fn level_mut<E>(
        &mut self,
        type_error: impl FnOnce() -> E,
        path: impl Borrow<KeyPath>,
    ) -> Result<Option<&mut Level>, E> {
        self.inner_mut(path)
            .map(|node| node.as_level_mut().ok_or_else(type_error))
            .transpose()
    }
}

impl Navigate for Lsd {
    fn inner(&self, path: impl Borrow<KeyPath>) -> Option<&Lsd> {
        let path = path.borrow();
        if path.is_empty() {
            return Some(self);
        }
        match self {
            Lsd::Value(_) => None,
            Lsd::List(list) => list.inner(path),
            Lsd::Level(level) => level.inner(path),
        }
    }

    fn inner_mut(&mut self, path: impl Borrow<KeyPath>) -> Option<&mut Lsd> {
        let path = path.borrow();
        if path.is_empty() {
            return Some(self);
        }
        match self {
            Lsd::Value(_) => None,
            Lsd::List(list) => list.inner_mut(path),
            Lsd::Level(level) => level.inner_mut(path),
        }
    }
}

impl Navigate for Level {
    fn inner(&self, path: impl Borrow<KeyPath>) -> Option<&Lsd> {
        let (segment, rest) = path.borrow().split_first()?;
        // every segment addresses a level by its string form
        self.get(segment.to_string().as_str())?.inner(rest)
    }

    fn inner_mut(&mut self, path: impl Borrow<KeyPath>) -> Option<&mut Lsd> {
        let (segment, rest) = path.borrow().split_first()?;
        self.get_mut(segment.to_string().as_str())?.inner_mut(rest)
    }
}

impl Navigate for List {
    fn inner(&self, path: impl Borrow<KeyPath>) -> Option<&Lsd> {
        let (segment, rest) = path.borrow().split_first()?;
        match segment {
            PathSegment::Index(index) => {
                let index = usize::try_from(*index).ok()?;
                self.get(index)?.inner(rest)
            }
            PathSegment::Key(_) => None,
        }
    }

    fn inner_mut(&mut self, path: impl Borrow<KeyPath>) -> Option<&mut Lsd> {
        let (segment, rest) = path.borrow().split_first()?;
        match segment {
            PathSegment::Index(index) => {
                let index = usize::try_from(*index).ok()?;
                self.get_mut(index)?.inner_mut(rest)
            }
            PathSegment::Key(_) => None,
        }
    }
}
