use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all failure modes of member resolution, accessor compilation, dynamic
/// invocation, value conversion and mapper registration. Each variant carries enough context
/// for a caller to distinguish "member absent" (expected, recoverable) from "internal
/// accessor failure" (unexpected, should propagate).
///
/// # Error Categories
///
/// ## Member Resolution Errors
/// - [`Error::PropertyNotFound`] - No property with the requested name
/// - [`Error::ReadOnlyProperty`] - A setter was requested for a read-only property
/// - [`Error::MethodNotFound`] - No method with the requested name and signature
/// - [`Error::KeyNotFound`] - A dynamic-object indexer access missed both the bag and the instance
///
/// ## Invocation Errors
/// - [`Error::NoMatchingOverload`] - Several method candidates exist, none matches the arguments
/// - [`Error::NoMatchingConstructor`] - No parameterized constructor matches the arguments
/// - [`Error::ArgumentCount`] - Wrong number of arguments for a resolved member
///
/// ## Value Errors
/// - [`Error::ConversionFailed`] - A value could not be converted to a target type
/// - [`Error::TypeMismatch`] - An accessor was applied to an instance of the wrong class
///
/// ## Registry Errors
/// - [`Error::DuplicateMapping`] - Two mapper implementations claim the same type pair
/// - [`Error::MapperNotFound`] - No mapper is registered for the requested type pair
#[derive(Error, Debug, Clone)]
pub enum Error {
    // Member resolution errors
    /// No property with the requested name exists on the class.
    ///
    /// Property lookup is case-insensitive and walks the full base chain, so this
    /// error means the name genuinely does not resolve anywhere on the type.
    #[error("No property named '{name}' on class '{class}'")]
    PropertyNotFound {
        /// Name of the class that was probed
        class: &'static str,
        /// The requested property name
        name: String,
    },

    /// A setter was requested for a property that has no setter.
    ///
    /// Signaled at the point of first use, not silently ignored: asking to write a
    /// read-only property is a programming mistake rather than a data-shape mismatch.
    #[error("Property '{name}' on class '{class}' is read-only")]
    ReadOnlyProperty {
        /// Name of the owning class
        class: &'static str,
        /// The read-only property name
        name: String,
    },

    /// No method with the requested name (and signature, where one was supplied) exists.
    ///
    /// Method lookup is case-sensitive, unlike property lookup.
    #[error("No method named '{name}' on class '{class}'")]
    MethodNotFound {
        /// Name of the class that was probed
        class: &'static str,
        /// The requested method name
        name: String,
    },

    /// A dynamic-object indexer access found the name in neither the bag nor the
    /// backing instance.
    ///
    /// The non-throwing `try_get` variant reports the same condition as `None`.
    #[error("Key '{0}' was not found")]
    KeyNotFound(String),

    // Invocation errors
    /// Several same-named method candidates exist and none matches the supplied
    /// argument types exactly.
    #[error("No overload of '{name}' on class '{class}' matches the supplied arguments")]
    NoMatchingOverload {
        /// Name of the owning class
        class: &'static str,
        /// The ambiguous method name
        name: String,
    },

    /// No parameterized constructor of the class matches the supplied arguments.
    ///
    /// Raised both when the class declares no parameterized constructors at all and
    /// when several candidates exist but none matches the argument types exactly.
    #[error("No constructor of class '{class}' accepts {argc} argument(s)")]
    NoMatchingConstructor {
        /// Name of the class being constructed
        class: &'static str,
        /// Number of arguments that were supplied
        argc: usize,
    },

    /// A resolved member was invoked with the wrong number of arguments.
    #[error("Expected {expected} argument(s), got {actual}")]
    ArgumentCount {
        /// Number of declared parameters
        expected: usize,
        /// Number of arguments supplied
        actual: usize,
    },

    // Value errors
    /// A value could not be converted to the requested target type.
    ///
    /// During mapping this is recovered locally (the property is left at its prior
    /// value); it only propagates when a caller converts explicitly.
    #[error("Cannot convert a '{from}' value to '{to}'")]
    ConversionFailed {
        /// Kind of the source value
        from: &'static str,
        /// Description of the target type
        to: String,
    },

    /// A compiled accessor was applied to an instance of a different class than the
    /// one it was compiled for.
    ///
    /// This indicates an internal invariant violation, not a data-shape mismatch, and
    /// is deliberately never swallowed by the soft-fail resolution paths.
    #[error("Accessor applied to an instance that is not a '{expected}'")]
    TypeMismatch {
        /// Name of the class the accessor was compiled for
        expected: &'static str,
    },

    // Registry errors
    /// Two mapper implementations claim the same (from, to) type pair.
    ///
    /// Reported at registry build time, not at first resolve: duplicate registrations
    /// are a configuration error and fail fast.
    #[error("Duplicate mapper registration for '{from}' -> '{to}'")]
    DuplicateMapping {
        /// Source type of the conflicting pair
        from: &'static str,
        /// Destination type of the conflicting pair
        to: &'static str,
    },

    /// No mapper is registered for the requested (from, to) type pair.
    #[error("No mapper registered for '{from}' -> '{to}'")]
    MapperNotFound {
        /// Requested source type
        from: &'static str,
        /// Requested destination type
        to: &'static str,
    },
}
