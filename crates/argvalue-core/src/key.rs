//! Type identities and their shapes.
//!
//! A [`TypeKey`] identifies the type a caller wants to parse into. Besides the
//! [`TypeId`] used for equality, each key carries a [`TypeShape`] computed
//! once when the key is built. Resolution in the registry is a `match` on the
//! shape instead of runtime type inspection:
//!
//! ```text
//! TypeShape::Primitive(kind)   built-in scalar, always registered up front
//! TypeShape::Enum(descriptor)  parseable without registration
//! TypeShape::Nullable(inner)   parseable when `inner` is registered
//! TypeShape::Unknown           parseable only when registered
//! ```
//!
//! Keys are obtained through [`ArgType::type_key`].

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::parser::ParsedValue;

// =============================================================================
// Primitive kinds
// =============================================================================

/// The built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
}

impl PrimitiveKind {
    /// Returns the display name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Enumeration metadata
// =============================================================================

/// A named member of an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumMember {
    /// Name matched against user input.
    pub name: &'static str,
    /// Underlying discriminant.
    pub value: i64,
}

impl EnumMember {
    /// Creates a member entry.
    pub const fn new(name: &'static str, value: i64) -> Self {
        Self { name, value }
    }
}

/// Enumerations that can be parsed from their member names.
///
/// Usually derived with `#[derive(ArgEnum)]`, which also implements
/// [`ArgType`]. `MEMBERS` is in declaration order and `from_index` must accept
/// every index into it.
pub trait ArgEnum: Sized + Send + 'static {
    /// Display name of the enumeration.
    const NAME: &'static str;

    /// Members in declaration order.
    const MEMBERS: &'static [EnumMember];

    /// Returns the member at `index` in [`MEMBERS`](Self::MEMBERS).
    fn from_index(index: usize) -> Option<Self>;
}

fn construct_member<E: ArgEnum>(index: usize) -> Option<ParsedValue> {
    E::from_index(index).map(|member| Box::new(member) as ParsedValue)
}

/// Type-erased view of an [`ArgEnum`] implementation.
#[derive(Clone, Copy)]
pub struct EnumDescriptor {
    name: &'static str,
    members: &'static [EnumMember],
    construct: fn(usize) -> Option<ParsedValue>,
}

impl EnumDescriptor {
    /// Captures the metadata of `E`.
    pub fn of<E: ArgEnum>() -> Self {
        Self {
            name: E::NAME,
            members: E::MEMBERS,
            construct: construct_member::<E>,
        }
    }

    /// Display name of the enumeration.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Members in declaration order.
    pub fn members(&self) -> &'static [EnumMember] {
        self.members
    }

    /// Member names in declaration order.
    pub fn member_names(&self) -> Vec<&'static str> {
        self.members.iter().map(|m| m.name).collect()
    }

    /// Finds the first member whose name matches `text`, ignoring case.
    pub fn position(&self, text: &str) -> Option<usize> {
        let wanted = text.to_lowercase();
        self.members
            .iter()
            .position(|m| m.name.to_lowercase() == wanted)
    }

    /// Builds the member at `index` as an erased value.
    pub fn construct(&self, index: usize) -> Option<ParsedValue> {
        (self.construct)(index)
    }
}

impl fmt::Debug for EnumDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumDescriptor")
            .field("name", &self.name)
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Nullable wrapping
// =============================================================================

/// Wraps an erased inner value (or its absence) into the erased `Option`.
pub type WrapFn = fn(Option<ParsedValue>) -> Option<ParsedValue>;

fn wrap_optional<T: Send + 'static>(value: Option<ParsedValue>) -> Option<ParsedValue> {
    match value {
        None => Some(Box::new(None::<T>)),
        Some(inner) => inner
            .downcast::<T>()
            .ok()
            .map(|inner| Box::new(Some(*inner)) as ParsedValue),
    }
}

/// Shape data for `Option<T>`.
#[derive(Clone)]
pub struct NullableShape {
    inner: Box<TypeKey>,
    wrap: WrapFn,
}

impl NullableShape {
    /// The key of the wrapped type.
    pub fn inner(&self) -> &TypeKey {
        &self.inner
    }

    /// Wraps a parsed inner value. `None` means the value was absent.
    ///
    /// Returns `None` if the inner value is not of the wrapped type.
    pub fn wrap(&self, value: Option<ParsedValue>) -> Option<ParsedValue> {
        (self.wrap)(value)
    }
}

impl fmt::Debug for NullableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullableShape")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TypeKey
// =============================================================================

/// Classification of a type identity.
#[derive(Debug, Clone)]
pub enum TypeShape {
    /// A built-in scalar.
    Primitive(PrimitiveKind),
    /// An enumeration with known members.
    Enum(EnumDescriptor),
    /// `Option<T>` of some inner type.
    Nullable(NullableShape),
    /// Anything else.
    Unknown,
}

/// Identity of a concrete type, used as the registry key.
///
/// Equality and hashing only consider the underlying [`TypeId`].
#[derive(Clone)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
    shape: TypeShape,
}

impl TypeKey {
    /// Key for a type with no special resolution rules.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            shape: TypeShape::Unknown,
        }
    }

    /// Key for a built-in scalar.
    pub(crate) fn primitive<T: 'static>(kind: PrimitiveKind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: kind.name(),
            shape: TypeShape::Primitive(kind),
        }
    }

    /// Key for an enumeration.
    pub fn enumeration<E: ArgEnum>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: E::NAME,
            shape: TypeShape::Enum(EnumDescriptor::of::<E>()),
        }
    }

    /// Key for `Option<T>`.
    pub fn nullable<T: ArgType>() -> Self {
        Self {
            id: TypeId::of::<Option<T>>(),
            name: type_name::<Option<T>>(),
            shape: TypeShape::Nullable(NullableShape {
                inner: Box::new(T::type_key()),
                wrap: wrap_optional::<T>,
            }),
        }
    }

    /// The underlying type id.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Display name of the type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The shape computed when the key was built.
    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// Returns `true` if the key denotes an enumeration.
    pub fn is_enum(&self) -> bool {
        matches!(self.shape, TypeShape::Enum(_))
    }

    /// Returns `true` if the key denotes `Option<T>`.
    pub fn is_nullable(&self) -> bool {
        matches!(self.shape, TypeShape::Nullable(_))
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeKey")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// =============================================================================
// ArgType
// =============================================================================

/// Types that can be requested from a registry.
///
/// Implemented for the built-in scalars and `Option<T>`. Enumerations get it
/// from `#[derive(ArgEnum)]`; other types either derive `ArgType` or write the
/// one-line impl:
///
/// ```rust,ignore
/// impl ArgType for DateOffset {
///     fn type_key() -> TypeKey {
///         TypeKey::of::<Self>()
///     }
/// }
/// ```
pub trait ArgType: Send + 'static {
    /// Returns the key identifying this type.
    fn type_key() -> TypeKey;
}

macro_rules! impl_primitive_arg_type {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl ArgType for $ty {
                fn type_key() -> TypeKey {
                    TypeKey::primitive::<$ty>(PrimitiveKind::$kind)
                }
            }
        )*
    };
}

impl_primitive_arg_type! {
    String => String,
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl<T: ArgType> ArgType for Option<T> {
    fn type_key() -> TypeKey {
        TypeKey::nullable::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Color {
        Red,
        Green,
    }

    impl ArgEnum for Color {
        const NAME: &'static str = "Color";
        const MEMBERS: &'static [EnumMember] =
            &[EnumMember::new("Red", 0), EnumMember::new("Green", 1)];

        fn from_index(index: usize) -> Option<Self> {
            match index {
                0 => Some(Self::Red),
                1 => Some(Self::Green),
                _ => None,
            }
        }
    }

    #[test]
    fn test_keys_compare_by_type() {
        assert_eq!(i32::type_key(), i32::type_key());
        assert_ne!(i32::type_key(), i64::type_key());
        assert_ne!(i32::type_key(), Option::<i32>::type_key());
        assert_eq!(TypeKey::of::<i32>(), i32::type_key());
    }

    #[test]
    fn test_primitive_shape() {
        let key = u16::type_key();
        assert!(matches!(key.shape(), TypeShape::Primitive(PrimitiveKind::U16)));
        assert_eq!(key.name(), "u16");
        assert_eq!(String::type_key().to_string(), "String");
    }

    #[test]
    fn test_nullable_shape_points_at_inner() {
        let key = Option::<bool>::type_key();
        assert!(key.is_nullable());
        let TypeShape::Nullable(shape) = key.shape() else {
            panic!("expected nullable shape");
        };
        assert_eq!(shape.inner(), &bool::type_key());
    }

    #[test]
    fn test_nullable_wrap() {
        let key = Option::<u8>::type_key();
        let TypeShape::Nullable(shape) = key.shape() else {
            panic!("expected nullable shape");
        };

        let present = shape.wrap(Some(Box::new(7u8))).unwrap();
        assert_eq!(*present.downcast::<Option<u8>>().unwrap(), Some(7));

        let absent = shape.wrap(None).unwrap();
        assert_eq!(*absent.downcast::<Option<u8>>().unwrap(), None);

        assert!(shape.wrap(Some(Box::new("wrong"))).is_none());
    }

    #[test]
    fn test_enum_descriptor() {
        let key = TypeKey::enumeration::<Color>();
        assert!(key.is_enum());
        assert_eq!(key.name(), "Color");

        let TypeShape::Enum(descriptor) = key.shape() else {
            panic!("expected enum shape");
        };
        assert_eq!(descriptor.member_names(), vec!["Red", "Green"]);
        assert_eq!(descriptor.position("gReEn"), Some(1));
        assert_eq!(descriptor.position("blue"), None);

        let member = descriptor.construct(0).unwrap();
        assert_eq!(*member.downcast::<Color>().unwrap(), Color::Red);
        assert!(descriptor.construct(5).is_none());
    }
}
