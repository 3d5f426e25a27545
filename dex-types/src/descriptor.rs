use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

/// Errors produced while parsing a type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The descriptor string is empty.
    #[error("empty type descriptor")]
    Empty,
    /// The descriptor doesn't follow the single-character grammar.
    #[error("malformed type descriptor {0:?}")]
    Malformed(String),
    /// More than 255 array dimensions.
    #[error("type descriptor {0:?} exceeds 255 array dimensions")]
    TooManyDimensions(String),
}

/// A validated Dalvik type descriptor.
///
/// Descriptors follow the standard grammar: the primitives `Z B S C I J F D`,
/// `V` for void, classes as `Lpkg/Name;` and arrays as `[` prefixes over any
/// non-void element type. The backing string is reference-counted, so clones
/// are cheap and equality is plain string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDescriptor(Arc<str>);

impl TypeDescriptor {
    /// Parse and validate a descriptor string.
    pub fn new(descriptor: impl AsRef<str>) -> Result<Self, DescriptorError> {
        let descriptor = descriptor.as_ref();
        Self::validate(descriptor)?;

        Ok(Self(Arc::from(descriptor)))
    }

    fn validate(descriptor: &str) -> Result<(), DescriptorError> {
        let mut rest = descriptor;
        let mut dimensions = 0usize;

        while let Some(stripped) = rest.strip_prefix('[') {
            rest = stripped;
            dimensions += 1;
        }

        if dimensions > 255 {
            return Err(DescriptorError::TooManyDimensions(descriptor.to_owned()));
        }

        match rest.as_bytes() {
            [] => Err(DescriptorError::Empty),
            [b'Z' | b'B' | b'S' | b'C' | b'I' | b'J' | b'F' | b'D'] => Ok(()),
            // `V` is a valid return type but not a valid array element
            [b'V'] if dimensions == 0 => Ok(()),
            [b'L', .., b';'] if rest.len() > 2 => Ok(()),
            _ => Err(DescriptorError::Malformed(descriptor.to_owned())),
        }
    }

    /// The raw descriptor string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the primitive types `Z B S C I J F D`.
    pub fn is_primitive(&self) -> bool {
        self.0.len() == 1 && !self.is_void()
    }

    /// Whether this is the void pseudo-type `V`.
    pub fn is_void(&self) -> bool {
        &*self.0 == "V"
    }

    /// Whether this is a class (`L…;`) or array (`[…`) type.
    pub fn is_reference(&self) -> bool {
        matches!(self.0.as_bytes().first(), Some(b'L' | b'['))
    }

    /// Whether this is a class type `L…;`.
    pub fn is_class(&self) -> bool {
        self.0.starts_with('L')
    }

    /// Whether this is an array type `[…`.
    pub fn is_array(&self) -> bool {
        self.0.starts_with('[')
    }

    /// Whether values of this type occupy a register pair (`J` or `D`).
    pub fn is_wide(&self) -> bool {
        matches!(&*self.0, "J" | "D")
    }

    /// Number of registers a value of this type occupies: 0 for void, 2 for
    /// the wide primitives, 1 otherwise.
    pub fn register_width(&self) -> usize {
        if self.is_void() {
            0
        } else if self.is_wide() {
            2
        } else {
            1
        }
    }

    /// Number of leading `[` dimensions; 0 for non-arrays.
    pub fn array_dimensions(&self) -> usize {
        self.0.bytes().take_while(|b| *b == b'[').count()
    }

    /// The element type one array level down, if this is an array.
    pub fn element_type(&self) -> Option<Self> {
        self.0.strip_prefix('[').map(|rest| Self(Arc::from(rest)))
    }

    /// The element type with all array levels stripped; `self` for
    /// non-arrays.
    pub fn base_element_type(&self) -> Self {
        Self(Arc::from(self.0.trim_start_matches('[')))
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TypeDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TypeDescriptor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("I", true, false, 1)]
    #[case("Z", true, false, 1)]
    #[case("J", true, false, 2)]
    #[case("D", true, false, 2)]
    #[case("Ljava/lang/Object;", false, true, 1)]
    #[case("[I", false, true, 1)]
    #[case("[[Ljava/lang/String;", false, true, 1)]
    fn classifies_descriptors(
        #[case] raw: &str,
        #[case] primitive: bool,
        #[case] reference: bool,
        #[case] width: usize,
    ) {
        let descriptor = TypeDescriptor::new(raw).expect("valid descriptor");

        assert_eq!(descriptor.is_primitive(), primitive);
        assert_eq!(descriptor.is_reference(), reference);
        assert_eq!(descriptor.register_width(), width);
    }

    #[rstest]
    #[case("")]
    #[case("X")]
    #[case("L;")]
    #[case("Ljava/lang/Object")]
    #[case("[V")]
    #[case("II")]
    fn rejects_malformed(#[case] raw: &str) {
        assert!(TypeDescriptor::new(raw).is_err());
    }

    #[test]
    fn array_structure() {
        let descriptor = TypeDescriptor::new("[[I").expect("valid descriptor");

        assert_eq!(descriptor.array_dimensions(), 2);
        assert_eq!(descriptor.element_type().expect("array").as_str(), "[I");
        assert_eq!(descriptor.base_element_type().as_str(), "I");
    }

    #[test]
    fn void_is_not_primitive() {
        let void = TypeDescriptor::new("V").expect("valid descriptor");

        assert!(void.is_void());
        assert!(!void.is_primitive());
        assert_eq!(void.register_width(), 0);
    }

    #[test]
    fn deep_arrays_are_rejected() {
        let raw: String = std::iter::repeat('[').take(256).chain("I".chars()).collect();

        assert_eq!(
            TypeDescriptor::new(&raw),
            Err(DescriptorError::TooManyDimensions(raw))
        );
    }
}
