//! Request-scoped faults: classification, detail and where they were raised.
//!
//! Raise with [`fault!`](crate::fault!) to record file, line and enclosing function.
//! The `#[track_caller]` constructors and `From` conversions record file and line only.

use crate::error::DbError;
use std::borrow::Cow;
use std::cell::RefCell;
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use thiserror::Error;

/// Classification label reported to clients as `[<ClassName>]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaultKind {
    /// Bad value reached domain logic.
    Value,
    Runtime,
    Lookup,
    Io,
    Database,
    Serialization,
    Panic,
    Named(&'static str),
}

impl FaultKind {
    pub fn class_name(&self) -> &'static str {
        match self {
            FaultKind::Value => "ValueError",
            FaultKind::Runtime => "RuntimeError",
            FaultKind::Lookup => "LookupError",
            FaultKind::Io => "IoError",
            FaultKind::Database => "DatabaseError",
            FaultKind::Serialization => "SerializationError",
            FaultKind::Panic => "Panic",
            FaultKind::Named(name) => name,
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: Cow<'static, str>,
    pub line: u32,
    pub function: Option<&'static str>,
}

impl SourceLocation {
    pub fn from_caller(caller: &'static Location<'static>) -> Self {
        SourceLocation {
            file: Cow::Borrowed(caller.file()),
            line: caller.line(),
            function: None,
        }
    }
}

thread_local! {
    static PANIC_LOCATION: RefCell<Option<(String, u32)>> = const { RefCell::new(None) };
}

/// Chain a panic hook that remembers where the current thread last panicked.
/// The previous hook still runs.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if let Some(location) = info.location() {
            let record = (location.file().to_string(), location.line());
            PANIC_LOCATION.with(|slot| *slot.borrow_mut() = Some(record));
        }
        previous(info);
    }));
}

/// Where this thread last panicked, if the hook saw it. Cleared on read.
pub fn take_panic_location() -> Option<SourceLocation> {
    PANIC_LOCATION
        .with(|slot| slot.borrow_mut().take())
        .map(|(file, line)| SourceLocation {
            file: Cow::Owned(file),
            line,
            function: None,
        })
}

/// Last path segment of a function's type name, skipping closure and async block frames.
#[doc(hidden)]
pub fn function_name(type_name: &'static str) -> &'static str {
    let mut path = type_name.strip_suffix("::__here").unwrap_or(type_name);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    path.rsplit("::").next().unwrap_or(path)
}

/// Location of the enclosing function at the call site.
#[macro_export]
macro_rules! here {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::fault::SourceLocation {
            file: ::std::borrow::Cow::Borrowed(file!()),
            line: line!(),
            function: Some($crate::fault::function_name(__type_name_of(__here))),
        }
    }};
}

/// Build a [`DomainFault`](crate::fault::DomainFault) located at the call site.
///
/// ```ignore
/// return Err(fault!(FaultKind::Value, "specific try error"));
/// return Err(fault!(FaultKind::Lookup, "no row for {}", key));
/// ```
#[macro_export]
macro_rules! fault {
    ($kind:expr) => {
        $crate::fault::DomainFault::bare($kind).at($crate::here!())
    };
    ($kind:expr, $($arg:tt)+) => {
        $crate::fault::DomainFault::bare($kind)
            .with_detail(format!($($arg)+))
            .at($crate::here!())
    };
}

/// Something went wrong while handling a request. Never persisted.
#[derive(Debug, Error)]
#[error("{}", self.describe())]
pub struct DomainFault {
    kind: FaultKind,
    detail: Option<String>,
    location: Option<SourceLocation>,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl DomainFault {
    /// Fault without any location.
    pub fn bare(kind: FaultKind) -> Self {
        DomainFault {
            kind,
            detail: None,
            location: None,
            source: None,
        }
    }

    #[track_caller]
    pub fn new(kind: FaultKind, detail: impl Into<String>) -> Self {
        Self::bare(kind)
            .with_detail(detail)
            .at(SourceLocation::from_caller(Location::caller()))
    }

    #[track_caller]
    pub fn value(detail: impl Into<String>) -> Self {
        Self::new(FaultKind::Value, detail)
    }

    #[track_caller]
    pub fn runtime(detail: impl Into<String>) -> Self {
        Self::new(FaultKind::Runtime, detail)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach the error this fault was raised from.
    pub fn caused_by(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// Client-facing message:
    /// `File "<file>", line <line>, in <function>: [<ClassName>] <detail>`,
    /// or `[<ClassName>] <detail>` when no location was captured.
    pub fn describe(&self) -> String {
        let body = format!("[{}] {}", self.kind.class_name(), self.detail.as_deref().unwrap_or(""));
        match &self.location {
            Some(SourceLocation {
                file,
                line,
                function: Some(function),
            }) => format!("File \"{}\", line {}, in {}: {}", file, line, function, body),
            Some(SourceLocation {
                file,
                line,
                function: None,
            }) => format!("File \"{}\", line {}: {}", file, line, body),
            None => body,
        }
    }

    /// Source chain rendered for server-side logs.
    pub fn chain(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut next = StdError::source(self);
        while let Some(e) = next {
            out.push(e.to_string());
            next = e.source();
        }
        out
    }
}

impl From<DbError> for DomainFault {
    #[track_caller]
    fn from(e: DbError) -> Self {
        DomainFault::new(FaultKind::Database, e.to_string()).caused_by(e)
    }
}

impl From<serde_json::Error> for DomainFault {
    #[track_caller]
    fn from(e: serde_json::Error) -> Self {
        DomainFault::new(FaultKind::Serialization, e.to_string()).caused_by(e)
    }
}

impl From<std::io::Error> for DomainFault {
    #[track_caller]
    fn from(e: std::io::Error) -> Self {
        DomainFault::new(FaultKind::Io, e.to_string()).caused_by(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_with_full_location() {
        let f = DomainFault::bare(FaultKind::Value)
            .with_detail("specific try error")
            .at(SourceLocation {
                file: "src/services/router1.rs".into(),
                line: 42,
                function: Some("function1"),
            });
        assert_eq!(
            f.describe(),
            r#"File "src/services/router1.rs", line 42, in function1: [ValueError] specific try error"#
        );
    }

    #[test]
    fn describe_without_location() {
        let f = DomainFault::bare(FaultKind::Runtime).with_detail("boom");
        assert_eq!(f.describe(), "[RuntimeError] boom");
        assert_eq!(DomainFault::bare(FaultKind::Named("KeyError")).describe(), "[KeyError] ");
    }

    #[test]
    fn macro_captures_enclosing_function() {
        let f = crate::fault!(FaultKind::Value, "bad {}", 7);
        let loc = f.location().unwrap();
        assert_eq!(loc.file, file!());
        assert_eq!(loc.function, Some("macro_captures_enclosing_function"));
        assert_eq!(f.detail(), Some("bad 7"));
    }

    #[test]
    fn macro_inside_closure_reports_outer_function() {
        let raise = || crate::fault!(FaultKind::Runtime);
        let f = raise();
        assert_eq!(f.location().unwrap().function, Some("macro_inside_closure_reports_outer_function"));
    }

    #[test]
    fn track_caller_records_file_and_line() {
        let line = line!() + 1;
        let f = DomainFault::value("x");
        let loc = f.location().unwrap();
        assert_eq!(loc.line, line);
        assert_eq!(loc.function, None);
        assert!(f.describe().starts_with(&format!("File \"{}\", line {}: [ValueError] x", file!(), line)));
    }

    #[test]
    fn chain_lists_sources() {
        let f: DomainFault = DbError::Query("timeout".into()).into();
        assert_eq!(f.kind(), FaultKind::Database);
        assert_eq!(f.chain(), vec!["query: timeout".to_string()]);
        assert_eq!(StdError::source(&f).map(ToString::to_string).as_deref(), Some("query: timeout"));
        assert!(StdError::source(&DomainFault::bare(FaultKind::Runtime)).is_none());
    }

    #[test]
    fn display_is_the_client_message() {
        let f = DomainFault::bare(FaultKind::Lookup).with_detail("no row");
        assert_eq!(f.to_string(), f.describe());
    }

    #[test]
    fn function_name_strips_paths_and_closures() {
        assert_eq!(function_name("app::svc::function1::__here"), "function1");
        assert_eq!(function_name("app::svc::handle::{{closure}}::{{closure}}::__here"), "handle");
    }
}
