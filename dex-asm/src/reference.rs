use std::fmt;
use std::sync::Arc;

use dex_types::TypeDescriptor;

/// A method signature: parameter types plus return type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prototype {
    /// Declared parameter types, in order.
    pub parameters: Vec<TypeDescriptor>,
    /// Declared return type; `V` for void.
    pub return_type: TypeDescriptor,
}

impl Prototype {
    /// A signature taking `parameters` and returning `return_type`.
    pub fn new(parameters: Vec<TypeDescriptor>, return_type: TypeDescriptor) -> Self {
        Self {
            parameters,
            return_type,
        }
    }

    /// Number of registers the declared parameters occupy; wide parameters
    /// count twice.
    pub fn parameter_register_count(&self) -> usize {
        self.parameters.iter().map(TypeDescriptor::register_width).sum()
    }
}

impl fmt::Display for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for parameter in &self.parameters {
            write!(f, "{parameter}")?;
        }
        write!(f, "){}", self.return_type)
    }
}

/// A resolved reference to a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    /// The class declaring the field.
    pub class: TypeDescriptor,
    /// Field name.
    pub name: Arc<str>,
    /// Declared field type.
    pub field_type: TypeDescriptor,
}

impl FieldRef {
    /// A reference to `class.name` of type `field_type`.
    pub fn new(
        class: TypeDescriptor,
        name: impl AsRef<str>,
        field_type: TypeDescriptor,
    ) -> Self {
        Self {
            class,
            name: Arc::from(name.as_ref()),
            field_type,
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}:{}", self.class, self.name, self.field_type)
    }
}

/// A resolved reference to a method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
    /// The class declaring the method.
    pub class: TypeDescriptor,
    /// Method name.
    pub name: Arc<str>,
    /// Method signature.
    pub proto: Prototype,
}

impl MethodRef {
    /// A reference to `class.name` with signature `proto`.
    pub fn new(class: TypeDescriptor, name: impl AsRef<str>, proto: Prototype) -> Self {
        Self {
            class,
            name: Arc::from(name.as_ref()),
            proto,
        }
    }

    /// Whether the name uses the reserved `<…>` form (`<init>`, `<clinit>`).
    pub fn has_special_name(&self) -> bool {
        self.name.starts_with('<')
    }

    /// Whether this references an instance initializer.
    pub fn is_instance_initializer(&self) -> bool {
        &*self.name == "<init>"
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}{}", self.class, self.name, self.proto)
    }
}
