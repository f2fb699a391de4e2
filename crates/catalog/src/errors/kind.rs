/// Tagged classification of a catalog failure.
///
/// Callers switch on this instead of inspecting the concrete error type.
///
/// | Kind | Meaning | Typical user message |
/// |------|---------|----------------------|
/// | `Transport` | server unreachable or non-2xx status | "server unreachable" |
/// | `MalformedJson` | body is not JSON at all | "data shape mismatch" |
/// | `Shape` | JSON parsed but failed schema validation | "data shape mismatch" |
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The request failed before a usable body was received.
    Transport,

    /// The response body could not be parsed as JSON.
    MalformedJson,

    /// The response parsed but does not match the listing contract.
    Shape,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::MalformedJson => "malformed_json",
            ErrorKind::Shape => "shape",
        }
    }

    /// Whether the failure is a data-shape mismatch (malformed JSON included).
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, ErrorKind::MalformedJson | ErrorKind::Shape)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
