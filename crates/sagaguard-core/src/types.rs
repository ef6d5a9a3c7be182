use serde::{Deserialize, Serialize};

/// A source region reported by the host. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub file: String,
    pub line: u32,
    pub column: u32,
    #[serde(default)]
    pub len: u32,
}

impl Span {
    pub fn new(file: &str, line: u32, column: u32, len: u32) -> Self {
        Self {
            file: file.to_string(),
            line,
            column,
            len,
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Declaration kinds. Marker rules only apply to classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Struct,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Struct => "struct",
        }
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to a declared type, e.g. the `typeof(OrderCreated)` inside a marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl TypeRef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            span: None,
        }
    }

    pub fn with_span(name: &str, span: Span) -> Self {
        Self {
            name: name.to_string(),
            span: Some(span),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Primitive {
    Bool(bool),
    Int(i64),
    Str(String),
}

/// Value of a marker argument as the host resolved it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ArgValue {
    Type(TypeRef),
    /// Elements that are not `Type` are ignored by every rule.
    TypeArray(Vec<ArgValue>),
    Primitive(Primitive),
    #[default]
    Missing,
}

impl ArgValue {
    pub fn as_type(&self) -> Option<&TypeRef> {
        match self {
            ArgValue::Type(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_type_array(&self) -> Option<&[ArgValue]> {
        match self {
            ArgValue::TypeArray(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Primitive(Primitive::Bool(b)) => Some(*b),
            _ => None,
        }
    }
}

/// A positional marker argument. `span` covers the whole argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    #[serde(default)]
    pub value: ArgValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

/// A named marker argument (`RetryOnExceptions = new[] { ... }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedArgument {
    pub name: String,
    #[serde(default)]
    pub value: ArgValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Step,
    RetryPolicy,
    Other,
}

/// Name and positional slot of the step pivot flag.
pub const STEP_FLAG_PIVOT: (&str, usize) = ("isPivot", 3);

/// A marker applied to a type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeInstance {
    pub kind: AttributeKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub positional: Vec<Argument>,
    #[serde(default)]
    pub named: Vec<NamedArgument>,
    /// Span of the whole attribute application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl AttributeInstance {
    pub fn new(kind: AttributeKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            positional: Vec::new(),
            named: Vec::new(),
            span: None,
        }
    }

    pub fn named_argument(&self, name: &str) -> Option<&NamedArgument> {
        self.named.iter().find(|a| a.name == name)
    }

    /// Read a boolean flag, named form first, then its positional slot.
    pub fn flag(&self, (name, position): (&str, usize)) -> bool {
        if let Some(arg) = self.named_argument(name) {
            return arg.value.as_bool().unwrap_or(false);
        }
        self.positional
            .get(position)
            .and_then(|a| a.value.as_bool())
            .unwrap_or(false)
    }

    pub fn is_pivot(&self) -> bool {
        self.kind == AttributeKind::Step && self.flag(STEP_FLAG_PIVOT)
    }
}

/// A declared type together with its markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// Qualified name, unique within a graph.
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    /// Directly declared capabilities (implemented or extended interfaces), in order.
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeInstance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_span: Option<Span>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl TypeDeclaration {
    pub fn new(name: &str, kind: TypeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            capabilities: Vec::new(),
            base: None,
            attributes: Vec::new(),
            name_span: None,
            span: None,
        }
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    pub fn steps(&self) -> impl Iterator<Item = &AttributeInstance> {
        self.attributes
            .iter()
            .filter(|a| a.kind == AttributeKind::Step)
    }

    /// True if `capability` appears in the directly declared list (simple-name match).
    pub fn declares_capability(&self, capability: &str) -> bool {
        let wanted = simple_name(capability);
        self.capabilities.iter().any(|c| simple_name(c) == wanted)
    }
}

/// Last segment of a qualified name, splitting on `.` and `::`.
pub fn simple_name(qualified: &str) -> &str {
    let tail = qualified.rsplit("::").next().unwrap_or(qualified);
    tail.rsplit('.').next().unwrap_or(tail)
}

/// Errors that can occur while building or loading a type graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Duplicate type declaration: {0}")]
    DuplicateType(String),

    #[error("Type not found: {0}")]
    TypeNotFound(String),

    #[error("Invalid graph document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
