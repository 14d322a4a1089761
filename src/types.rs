use std::fmt;

use crate::typechecker::type_eq;

/// Represents a type in the checked language
///
/// Types are purely structural: two types are the same when their shapes
/// are the same, never because they share a declared name.
#[derive(Debug, Clone)]
pub enum Type {
    Boolean,
    Number,
    /// Function type; parameters are positional, their names are informational
    Func {
        params: Vec<Param>,
        ret_type: Box<Type>,
    },
    /// Structural object type; property names are unique, order is insignificant
    Object { props: Vec<PropertyType> },
}

/// A named, typed function parameter
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

impl Param {
    pub fn new(name: &str, ty: Type) -> Self {
        Param {
            name: name.to_string(),
            ty,
        }
    }
}

/// A property of an object type
#[derive(Debug, Clone)]
pub struct PropertyType {
    pub name: String,
    pub ty: Type,
}

impl PropertyType {
    pub fn new(name: &str, ty: Type) -> Self {
        PropertyType {
            name: name.to_string(),
            ty,
        }
    }
}

impl Type {
    /// Create a function type
    pub fn func(params: Vec<Param>, ret_type: Type) -> Self {
        Type::Func {
            params,
            ret_type: Box::new(ret_type),
        }
    }

    /// Create an object type from `(name, type)` pairs
    pub fn object<S: AsRef<str>>(props: Vec<(S, Type)>) -> Self {
        Type::Object {
            props: props
                .into_iter()
                .map(|(name, ty)| PropertyType::new(name.as_ref(), ty))
                .collect(),
        }
    }

    /// Short lowercase name of the type's tag, used in diagnostics
    pub fn tag(&self) -> &'static str {
        match self {
            Type::Boolean => "boolean",
            Type::Number => "number",
            Type::Func { .. } => "function",
            Type::Object { .. } => "object",
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Type::Boolean)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Type::Number)
    }

    /// Look up a property of an object type by name
    ///
    /// Returns `None` for non-object types as well as for missing properties.
    pub fn get_property(&self, name: &str) -> Option<&Type> {
        match self {
            Type::Object { props } => props.iter().find(|p| p.name == name).map(|p| &p.ty),
            _ => None,
        }
    }
}

// Equality is structural: parameter names and property order are ignored.
impl PartialEq for Type {
    fn eq(&self, other: &Type) -> bool {
        type_eq(self, other)
    }
}

impl Eq for Type {}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Boolean => write!(f, "boolean"),
            Type::Number => write!(f, "number"),
            Type::Func { params, ret_type } => {
                write!(f, "(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") => {}", ret_type)
            }
            Type::Object { props } => {
                if props.is_empty() {
                    return write!(f, "{{}}");
                }
                write!(f, "{{ ")?;
                for (i, prop) in props.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", prop)?;
                }
                write!(f, " }}")
            }
        }
    }
}
