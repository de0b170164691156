//! Strategy for enumerations, matched by member name.

use std::any::TypeId;

use crate::error::{ParseError, ParseFailure, ParseResult, RegistryError, RegistryResult};
use crate::key::{ArgEnum, EnumDescriptor, TypeKey, TypeShape};
use crate::parser::{ErasedParser, ParsedValue};

/// Parses one enumeration type by case-insensitive member name.
///
/// Member metadata is captured once at construction.
pub struct EnumParser {
    key: TypeKey,
    descriptor: EnumDescriptor,
    list_choices: bool,
}

impl EnumParser {
    /// Creates a parser for the enumeration denoted by `key`.
    ///
    /// Fails with [`RegistryError::NotAnEnum`] for any other shape.
    pub fn new(key: &TypeKey) -> RegistryResult<Self> {
        match key.shape() {
            TypeShape::Enum(descriptor) => Ok(Self {
                key: key.clone(),
                descriptor: *descriptor,
                list_choices: true,
            }),
            _ => Err(RegistryError::NotAnEnum {
                type_name: key.name(),
            }),
        }
    }

    /// Creates a parser for `E`.
    pub fn of<E: ArgEnum>() -> Self {
        let key = TypeKey::enumeration::<E>();
        Self {
            descriptor: EnumDescriptor::of::<E>(),
            key,
            list_choices: true,
        }
    }

    /// Whether rejections list the valid member names (default: `true`).
    pub fn list_choices(mut self, enabled: bool) -> Self {
        self.list_choices = enabled;
        self
    }

    /// The captured enumeration metadata.
    pub fn descriptor(&self) -> &EnumDescriptor {
        &self.descriptor
    }
}

impl ErasedParser for EnumParser {
    fn output_type(&self) -> TypeId {
        self.key.id()
    }

    fn output_name(&self) -> &'static str {
        self.key.name()
    }

    fn parse_erased(&self, arg_name: &str, value: &str) -> ParseResult<ParsedValue> {
        let Some(index) = self.descriptor.position(value) else {
            let choices = if self.list_choices {
                self.descriptor.member_names()
            } else {
                Vec::new()
            };
            return Err(ParseError::new(
                arg_name,
                value,
                self.descriptor.name(),
                ParseFailure::UnknownMember { choices },
            ));
        };

        self.descriptor.construct(index).ok_or_else(|| {
            ParseError::custom(
                arg_name,
                value,
                self.descriptor.name(),
                format!("member #{index} cannot be constructed"),
            )
        })
    }
}
