use std::str::FromStr;

use argvalue::core::{ArgValueError, ParseFailure, RegistryError, TypeKey};
use argvalue::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ArgEnum)]
#[arg(crate = "::argvalue::core", display = "color")]
enum Color {
    Red,
    Green,
    #[arg(name = "sky-blue")]
    SkyBlue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ArgEnum)]
#[arg(crate = "::argvalue::core")]
enum Priority {
    Low = 1,
    High = 10,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ArgEnum)]
#[arg(crate = "::argvalue::core")]
#[repr(u64)]
enum Width {
    Narrow = 8,
    Wide = 1 << 40,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ArgType)]
#[arg(crate = "::argvalue::core")]
struct Port(u16);

fn parse_port(arg_name: &str, value: &str) -> ParseResult<Port> {
    match value.strip_prefix(':').and_then(|port| port.parse::<u16>().ok()) {
        Some(port) if port != 0 => Ok(Port(port)),
        _ => Err(ParseError::custom(
            arg_name,
            value,
            "Port",
            "expected ':<1-65535>'",
        )),
    }
}

#[register_parser(crate = "::argvalue::core")]
fn port_parser() -> impl ValueParser<Output = Port> {
    FnParser::new(parse_port)
}

#[derive(Debug, Clone, Copy, PartialEq, ArgType)]
#[arg(crate = "::argvalue::core")]
struct Percent(f32);

impl FromStr for Percent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s.strip_suffix('%').ok_or("missing '%'")?;
        number
            .parse::<f32>()
            .map(|n| Percent(n / 100.0))
            .map_err(|e| e.to_string())
    }
}

#[register_parser(crate = "::argvalue::core")]
fn percent_parser() -> FromStrParser<Percent> {
    FromStrParser::new()
}

#[test]
fn test_builtins_end_to_end() {
    let registry = ParserRegistry::global();

    assert_eq!(registry.parse::<i32>("count", "42").unwrap(), 42);
    assert!(registry.parse::<bool>("flag", "true").unwrap());

    let err = registry.get::<i32>().unwrap().parse("count", "abc").unwrap_err();
    assert_eq!(err.arg_name, "count");
    assert_eq!(err.value, "abc");
}

#[test]
fn test_linked_parsers_in_global_registry() {
    let registry = ParserRegistry::global();

    assert_eq!(registry.parse::<Port>("port", ":8080").unwrap(), Port(8080));
    assert_eq!(
        registry.parse::<Percent>("ratio", "50%").unwrap(),
        Percent(0.5)
    );

    match registry.parse::<Port>("port", "8080") {
        Err(ArgValueError::Parse(err)) => {
            assert_eq!(err.arg_name, "port");
            assert!(matches!(err.reason, ParseFailure::Custom(_)));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_nullable_over_linked_parser() {
    let registry = ParserRegistry::global();

    assert_eq!(registry.parse::<Option<Port>>("port", "").unwrap(), None);
    assert_eq!(
        registry.parse::<Option<Port>>("port", ":1").unwrap(),
        Some(Port(1))
    );
    assert!(registry.parse::<Option<Port>>("port", ":0").is_err());
}

#[test]
fn test_fresh_registry_applies_linked_on_request() {
    let registry = ParserRegistry::new();
    assert!(registry.get::<Port>().is_none());

    assert_eq!(registry.register_linked(), 2);
    assert!(registry.get::<Port>().is_some());

    // Already present, so skipped.
    assert_eq!(registry.register_linked(), 0);
}

#[test]
fn test_derived_enum() {
    let registry = ParserRegistry::global();

    assert_eq!(registry.parse::<Color>("color", "GREEN").unwrap(), Color::Green);
    assert_eq!(
        registry.parse::<Color>("color", "Sky-Blue").unwrap(),
        Color::SkyBlue
    );

    match registry.parse::<Color>("color", "purple") {
        Err(ArgValueError::Parse(err)) => {
            assert_eq!(err.target, "color");
            assert_eq!(
                err.reason,
                ParseFailure::UnknownMember {
                    choices: vec!["Red", "Green", "sky-blue"]
                }
            );
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_derived_enum_members() {
    assert_eq!(Priority::NAME, "Priority");
    let values: Vec<_> = Priority::MEMBERS.iter().map(|m| (m.name, m.value)).collect();
    assert_eq!(values, vec![("Low", 1), ("High", 10)]);
    assert_eq!(Priority::from_index(1), Some(Priority::High));
    assert_eq!(Priority::from_index(2), None);
    assert!(Priority::type_key().is_enum());
    assert_eq!(Priority::type_key(), TypeKey::of::<Priority>());
}

#[test]
fn test_wide_repr_enum_in_range() {
    let values: Vec<_> = Width::MEMBERS.iter().map(|m| m.value).collect();
    assert_eq!(values, vec![8, 1 << 40]);
    assert_eq!(
        ParserRegistry::global().parse::<Width>("width", "wide").unwrap(),
        Width::Wide
    );
}

#[test]
fn test_nullable_enum_not_synthesized() {
    let registry = ParserRegistry::new();

    assert!(registry.get::<Option<Color>>().is_none());
    assert!(matches!(
        registry.parse::<Option<Color>>("color", "red"),
        Err(ArgValueError::Registry(RegistryError::NotFound { .. }))
    ));
}

#[test]
fn test_custom_strategy_wins_over_fallback() {
    let registry = ParserRegistry::new();
    registry
        .register(FnParser::new(|arg_name: &str, value: &str| match value {
            "r" => Ok(Color::Red),
            _ => Err(ParseError::custom(arg_name, value, "color", "only 'r'")),
        }))
        .unwrap();

    assert_eq!(registry.parse::<Color>("color", "r").unwrap(), Color::Red);
    assert!(registry.parse::<Color>("color", "red").is_err());

    let first = registry.get::<Color>().unwrap();
    let second = registry.get::<Color>().unwrap();
    assert!(first.ptr_eq(&second));
}

#[test]
fn test_duplicate_registration_keeps_first() {
    let registry = ParserRegistry::new();
    registry.register(FnParser::new(parse_port)).unwrap();

    let err = registry
        .register(FnParser::new(|_: &str, _: &str| Ok(Port(1))))
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateRegistration { .. }));
    assert_eq!(registry.parse::<Port>("port", ":7").unwrap(), Port(7));
}
