//! The abstract register-type lattice.

use std::fmt;

use bitflags::bitflags;
use dex_types::{CodeAddress, Literal, TypeDescriptor};

use crate::classpath::ClassPath;
use crate::error::VerifyError;

/// The category of an abstract register type.
///
/// The sub-integer categories form a chain ordered by the value ranges they
/// can hold; `Char` sits beside the signed chain and only reconciles with it
/// at `Integer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[repr(u8)]
pub enum Category {
    /// Nothing is known; the bottom of the lattice.
    Unknown,
    /// An uninitialized register slot.
    Uninit,
    /// The literal zero: merges with both integers and references.
    Null,
    /// The literal one.
    One,
    /// 0 or 1.
    Boolean,
    /// 0 to 127.
    PosByte,
    /// -128 to 127.
    Byte,
    /// 0 to 32767.
    PosShort,
    /// -32768 to 32767.
    Short,
    /// 0 to 65535.
    Char,
    /// Any 32-bit integer.
    Integer,
    /// A 32-bit float.
    Float,
    /// Low half of a long pair.
    LongLo,
    /// High half of a long pair.
    LongHi,
    /// Low half of a double pair.
    DoubleLo,
    /// High half of a double pair.
    DoubleHi,
    /// An allocated but not yet initialized instance.
    UninitRef,
    /// An initialized object reference.
    Reference,
    /// An irreconcilable merge; the top of the lattice.
    Conflict,
}

bitflags! {
    /// A set of [`Category`] values, used as the "allowed categories"
    /// argument of operand checks.
    pub struct CategorySet: u32 {
        /// [`Category::Unknown`]
        const UNKNOWN = 1 << Category::Unknown as u32;
        /// [`Category::Uninit`]
        const UNINIT = 1 << Category::Uninit as u32;
        /// [`Category::Null`]
        const NULL = 1 << Category::Null as u32;
        /// [`Category::One`]
        const ONE = 1 << Category::One as u32;
        /// [`Category::Boolean`]
        const BOOLEAN = 1 << Category::Boolean as u32;
        /// [`Category::PosByte`]
        const POS_BYTE = 1 << Category::PosByte as u32;
        /// [`Category::Byte`]
        const BYTE = 1 << Category::Byte as u32;
        /// [`Category::PosShort`]
        const POS_SHORT = 1 << Category::PosShort as u32;
        /// [`Category::Short`]
        const SHORT = 1 << Category::Short as u32;
        /// [`Category::Char`]
        const CHAR = 1 << Category::Char as u32;
        /// [`Category::Integer`]
        const INTEGER = 1 << Category::Integer as u32;
        /// [`Category::Float`]
        const FLOAT = 1 << Category::Float as u32;
        /// [`Category::LongLo`]
        const LONG_LO = 1 << Category::LongLo as u32;
        /// [`Category::LongHi`]
        const LONG_HI = 1 << Category::LongHi as u32;
        /// [`Category::DoubleLo`]
        const DOUBLE_LO = 1 << Category::DoubleLo as u32;
        /// [`Category::DoubleHi`]
        const DOUBLE_HI = 1 << Category::DoubleHi as u32;
        /// [`Category::UninitRef`]
        const UNINIT_REF = 1 << Category::UninitRef as u32;
        /// [`Category::Reference`]
        const REFERENCE = 1 << Category::Reference as u32;
        /// [`Category::Conflict`]
        const CONFLICT = 1 << Category::Conflict as u32;

        /// Everything a 32-bit primitive operand accepts; int and float are
        /// interchangeable at this level.
        const PRIMITIVE_32 = Self::NULL.bits | Self::ONE.bits | Self::BOOLEAN.bits
            | Self::POS_BYTE.bits | Self::BYTE.bits | Self::POS_SHORT.bits | Self::SHORT.bits
            | Self::CHAR.bits | Self::INTEGER.bits | Self::FLOAT.bits;
        /// The low halves of wide pairs.
        const WIDE_LO = Self::LONG_LO.bits | Self::DOUBLE_LO.bits;
        /// The high halves of wide pairs.
        const WIDE_HI = Self::LONG_HI.bits | Self::DOUBLE_HI.bits;
        /// An initialized reference operand, including null.
        const ANY_REFERENCE = Self::NULL.bits | Self::REFERENCE.bits;
        /// A reference operand that may still be uninitialized.
        const ANY_REFERENCE_OR_UNINIT =
            Self::ANY_REFERENCE.bits | Self::UNINIT_REF.bits;
        /// Values storable in a `Z` location.
        const BOOLEAN_VALUES = Self::NULL.bits | Self::ONE.bits | Self::BOOLEAN.bits;
        /// Values storable in a `B` location.
        const BYTE_VALUES =
            Self::BOOLEAN_VALUES.bits | Self::POS_BYTE.bits | Self::BYTE.bits;
        /// Values storable in an `S` location.
        const SHORT_VALUES =
            Self::BYTE_VALUES.bits | Self::POS_SHORT.bits | Self::SHORT.bits;
        /// Values storable in a `C` location.
        const CHAR_VALUES = Self::NULL.bits | Self::ONE.bits | Self::BOOLEAN.bits
            | Self::POS_BYTE.bits | Self::POS_SHORT.bits | Self::CHAR.bits;
    }
}

impl CategorySet {
    /// The singleton set holding `category`.
    pub fn of(category: Category) -> Self {
        Self::from_bits_truncate(1 << category as u32)
    }

    /// Whether `category` is a member.
    pub fn contains_category(self, category: Category) -> bool {
        self.bits() & (1 << category as u32) != 0
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use strum::IntoEnumIterator;

        let mut first = true;
        for category in Category::iter().filter(|c| self.contains_category(*c)) {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{category}")?;
            first = false;
        }
        Ok(())
    }
}

/// An abstract register type: a [`Category`] plus, for the reference
/// categories, the class it refers to.
///
/// Values are interned by construction: descriptors are reference-counted
/// strings and equality of the whole value is equality of (category, class,
/// allocation site). An uninitialized reference with `site == None` is the
/// `this` register of a constructor before the chained `<init>` call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegisterType {
    /// Nothing is known; the bottom of the lattice.
    Unknown,
    /// An uninitialized register slot.
    Uninit,
    /// The literal zero.
    Null,
    /// The literal one.
    One,
    /// 0 or 1.
    Boolean,
    /// 0 to 127.
    PosByte,
    /// -128 to 127.
    Byte,
    /// 0 to 32767.
    PosShort,
    /// -32768 to 32767.
    Short,
    /// 0 to 65535.
    Char,
    /// Any 32-bit integer.
    Integer,
    /// A 32-bit float.
    Float,
    /// Low half of a long pair.
    LongLo,
    /// High half of a long pair.
    LongHi,
    /// Low half of a double pair.
    DoubleLo,
    /// High half of a double pair.
    DoubleHi,
    /// An allocated but not yet initialized instance of `class`.
    UninitRef {
        /// The instantiated class.
        class: TypeDescriptor,
        /// Address of the allocating `new-instance`; `None` for the `this`
        /// register of a constructor.
        site: Option<CodeAddress>,
    },
    /// An initialized reference to an instance of the given type.
    Reference(TypeDescriptor),
    /// An irreconcilable merge; the top of the lattice.
    Conflict,
}

impl RegisterType {
    /// The category of this type.
    pub fn category(&self) -> Category {
        match self {
            Self::Unknown => Category::Unknown,
            Self::Uninit => Category::Uninit,
            Self::Null => Category::Null,
            Self::One => Category::One,
            Self::Boolean => Category::Boolean,
            Self::PosByte => Category::PosByte,
            Self::Byte => Category::Byte,
            Self::PosShort => Category::PosShort,
            Self::Short => Category::Short,
            Self::Char => Category::Char,
            Self::Integer => Category::Integer,
            Self::Float => Category::Float,
            Self::LongLo => Category::LongLo,
            Self::LongHi => Category::LongHi,
            Self::DoubleLo => Category::DoubleLo,
            Self::DoubleHi => Category::DoubleHi,
            Self::UninitRef { .. } => Category::UninitRef,
            Self::Reference(_) => Category::Reference,
            Self::Conflict => Category::Conflict,
        }
    }

    /// Whether the category is a member of `set`.
    pub fn is(&self, set: CategorySet) -> bool {
        set.contains_category(self.category())
    }

    /// Classify a 32-bit-range literal into the narrowest category able to
    /// hold it. Zero classifies as [`RegisterType::Null`] so it can merge
    /// with reference registers.
    pub fn for_literal(value: Literal) -> Self {
        match value {
            0 => Self::Null,
            1 => Self::One,
            _ => Self::narrowest_integer(value, value),
        }
    }

    /// The register type of a value of the given declared type.
    pub fn for_descriptor(descriptor: &TypeDescriptor) -> Result<Self, VerifyError> {
        Ok(match descriptor.as_str() {
            "Z" => Self::Boolean,
            "B" => Self::Byte,
            "S" => Self::Short,
            "C" => Self::Char,
            "I" => Self::Integer,
            "F" => Self::Float,
            "J" => Self::LongLo,
            "D" => Self::DoubleLo,
            "V" => {
                return Err(VerifyError::Malformed(
                    "the void type cannot be held in a register".to_owned(),
                ))
            }
            _ => Self::Reference(descriptor.clone()),
        })
    }

    /// The matching high half for a wide low half.
    pub fn wide_high(&self) -> Option<Self> {
        match self {
            Self::LongLo => Some(Self::LongHi),
            Self::DoubleLo => Some(Self::DoubleHi),
            _ => None,
        }
    }

    /// Whether this is the referenced type of an object register, i.e. an
    /// initialized reference.
    pub fn reference_type(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Reference(descriptor) => Some(descriptor),
            _ => None,
        }
    }

    /// The least upper bound of `self` and `other`.
    ///
    /// Reference merges consult the class path for the most specific common
    /// superclass. Uninitialized references only merge with themselves;
    /// anything else degrades to [`RegisterType::Conflict`].
    pub fn join(&self, other: &Self, classpath: &ClassPath) -> Result<Self, VerifyError> {
        if self == other {
            return Ok(self.clone());
        }

        match (self, other) {
            (Self::Unknown, x) | (x, Self::Unknown) => Ok(x.clone()),
            (Self::Conflict, _) | (_, Self::Conflict) => Ok(Self::Conflict),
            (Self::Null, Self::Reference(t)) | (Self::Reference(t), Self::Null) => {
                Ok(Self::Reference(t.clone()))
            }
            (Self::Reference(a), Self::Reference(b)) => {
                Ok(Self::Reference(classpath.common_superclass(a, b)?))
            }
            (a, b) if a.is(CategorySet::PRIMITIVE_32) && b.is(CategorySet::PRIMITIVE_32) => {
                // int and float reconcile towards float
                if matches!(a, Self::Float) || matches!(b, Self::Float) {
                    return Ok(Self::Float);
                }
                let (a_lo, a_hi) = a.value_range();
                let (b_lo, b_hi) = b.value_range();

                Ok(Self::narrowest_integer(a_lo.min(b_lo), a_hi.max(b_hi)))
            }
            _ => Ok(Self::Conflict),
        }
    }

    /// Whether a value of this type may be stored into a location declared
    /// as `target`.
    pub fn can_be_assigned_to(
        &self,
        target: &TypeDescriptor,
        classpath: &ClassPath,
    ) -> Result<bool, VerifyError> {
        match target.as_str() {
            "Z" => Ok(self.is(CategorySet::BOOLEAN_VALUES)),
            "B" => Ok(self.is(CategorySet::BYTE_VALUES)),
            "S" => Ok(self.is(CategorySet::SHORT_VALUES)),
            "C" => Ok(self.is(CategorySet::CHAR_VALUES)),
            "I" | "F" => Ok(self.is(CategorySet::PRIMITIVE_32)),
            "J" => Ok(matches!(self, Self::LongLo)),
            "D" => Ok(matches!(self, Self::DoubleLo)),
            "V" => Ok(false),
            _ => match self {
                Self::Null => Ok(true),
                Self::Reference(source) => classpath.is_assignable(source, target),
                _ => Ok(false),
            },
        }
    }

    /// The value range of a sub-integer category; `Float` is not a member.
    fn value_range(&self) -> (i64, i64) {
        match self {
            Self::Null => (0, 0),
            Self::One => (1, 1),
            Self::Boolean => (0, 1),
            Self::PosByte => (0, 127),
            Self::Byte => (-128, 127),
            Self::PosShort => (0, 32767),
            Self::Short => (-32768, 32767),
            Self::Char => (0, 65535),
            _ => (i64::from(i32::MIN), i64::from(i32::MAX)),
        }
    }

    /// The narrowest sub-integer category whose range covers `[lo, hi]`.
    fn narrowest_integer(lo: i64, hi: i64) -> Self {
        if lo >= 0 && hi <= 1 {
            Self::Boolean
        } else if lo >= 0 && hi <= 127 {
            Self::PosByte
        } else if lo >= -128 && hi <= 127 {
            Self::Byte
        } else if lo >= 0 && hi <= 32767 {
            Self::PosShort
        } else if lo >= -32768 && hi <= 32767 {
            Self::Short
        } else if lo >= 0 && hi <= 65535 {
            Self::Char
        } else {
            Self::Integer
        }
    }
}

impl fmt::Display for RegisterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference(descriptor) => write!(f, "{descriptor}"),
            Self::UninitRef { class, .. } => write!(f, "uninitialized {class}"),
            other => write!(f, "{}", other.category()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    fn classpath() -> ClassPath {
        ClassPath::new()
    }

    #[rstest]
    #[case(0, RegisterType::Null)]
    #[case(1, RegisterType::One)]
    #[case(2, RegisterType::PosByte)]
    #[case(127, RegisterType::PosByte)]
    #[case(-1, RegisterType::Byte)]
    #[case(-128, RegisterType::Byte)]
    #[case(128, RegisterType::PosShort)]
    #[case(32767, RegisterType::PosShort)]
    #[case(-129, RegisterType::Short)]
    #[case(-32768, RegisterType::Short)]
    #[case(32768, RegisterType::Char)]
    #[case(65535, RegisterType::Char)]
    #[case(65536, RegisterType::Integer)]
    #[case(-32769, RegisterType::Integer)]
    fn literal_classification(#[case] value: i64, #[case] expected: RegisterType) {
        assert_eq!(RegisterType::for_literal(value), expected);
    }

    #[quickcheck]
    fn literal_category_covers_its_value(value: i32) -> bool {
        let value = i64::from(value);
        let (lo, hi) = RegisterType::for_literal(value).value_range();

        lo <= value && value <= hi
    }

    #[quickcheck]
    fn joined_literals_cover_both_values(a: i32, b: i32) -> bool {
        let classpath = classpath();
        let (a, b) = (i64::from(a), i64::from(b));
        let joined = RegisterType::for_literal(a)
            .join(&RegisterType::for_literal(b), &classpath)
            .expect("primitive joins cannot fail");
        let (lo, hi) = joined.value_range();

        lo <= a.min(b) && a.max(b) <= hi
    }

    #[test]
    fn sub_integer_lattice_follows_the_value_ranges() {
        let classpath = classpath();
        let join = |a: &RegisterType, b: &RegisterType| {
            a.join(b, &classpath).expect("primitive joins cannot fail")
        };

        assert_eq!(join(&RegisterType::Null, &RegisterType::One), RegisterType::Boolean);
        assert_eq!(
            join(&RegisterType::Byte, &RegisterType::PosShort),
            RegisterType::Short
        );
        assert_eq!(
            join(&RegisterType::Byte, &RegisterType::Char),
            RegisterType::Integer
        );
        assert_eq!(
            join(&RegisterType::PosShort, &RegisterType::Char),
            RegisterType::Char
        );
        assert_eq!(
            join(&RegisterType::Boolean, &RegisterType::Integer),
            RegisterType::Integer
        );
        assert_eq!(
            join(&RegisterType::Integer, &RegisterType::Float),
            RegisterType::Float
        );
    }

    #[test]
    fn primitive_joins_are_commutative() {
        let classpath = classpath();
        let members = [
            RegisterType::Unknown,
            RegisterType::Null,
            RegisterType::One,
            RegisterType::Boolean,
            RegisterType::PosByte,
            RegisterType::Byte,
            RegisterType::PosShort,
            RegisterType::Short,
            RegisterType::Char,
            RegisterType::Integer,
            RegisterType::Float,
            RegisterType::LongLo,
            RegisterType::LongHi,
            RegisterType::DoubleLo,
            RegisterType::DoubleHi,
            RegisterType::Conflict,
        ];

        for a in &members {
            for b in &members {
                let ab = a.join(b, &classpath).expect("primitive join");
                let ba = b.join(a, &classpath).expect("primitive join");
                assert_eq!(ab, ba, "join of {a} and {b}");

                // idempotence through the already-joined value
                assert_eq!(ab.join(&ab, &classpath).expect("primitive join"), ab);
            }
        }
    }

    #[test]
    fn wide_halves_do_not_mix() {
        let classpath = classpath();

        assert_eq!(
            RegisterType::LongLo
                .join(&RegisterType::DoubleLo, &classpath)
                .expect("join"),
            RegisterType::Conflict
        );
        assert_eq!(
            RegisterType::LongHi
                .join(&RegisterType::DoubleHi, &classpath)
                .expect("join"),
            RegisterType::Conflict
        );
        assert_eq!(
            RegisterType::LongLo
                .join(&RegisterType::Integer, &classpath)
                .expect("join"),
            RegisterType::Conflict
        );
    }

    #[test]
    fn null_merges_with_references() {
        let classpath = classpath();
        let string = RegisterType::Reference(classpath.string().clone());

        assert_eq!(
            RegisterType::Null.join(&string, &classpath).expect("join"),
            string
        );
    }

    #[test]
    fn uninit_refs_only_merge_with_themselves() {
        let classpath = classpath();
        let uninit = RegisterType::UninitRef {
            class: classpath.string().clone(),
            site: Some(4),
        };
        let other_site = RegisterType::UninitRef {
            class: classpath.string().clone(),
            site: Some(8),
        };

        assert_eq!(uninit.join(&uninit, &classpath).expect("join"), uninit);
        assert_eq!(
            uninit.join(&other_site, &classpath).expect("join"),
            RegisterType::Conflict
        );
        assert_eq!(
            uninit
                .join(&RegisterType::Reference(classpath.string().clone()), &classpath)
                .expect("join"),
            RegisterType::Conflict
        );
    }

    #[test]
    fn assignability_of_primitives() {
        let classpath = classpath();
        let boolean: TypeDescriptor = "Z".parse().expect("descriptor");
        let byte: TypeDescriptor = "B".parse().expect("descriptor");
        let int: TypeDescriptor = "I".parse().expect("descriptor");
        let float: TypeDescriptor = "F".parse().expect("descriptor");

        assert!(RegisterType::One.can_be_assigned_to(&boolean, &classpath).expect("check"));
        assert!(!RegisterType::Byte.can_be_assigned_to(&boolean, &classpath).expect("check"));
        assert!(RegisterType::Byte.can_be_assigned_to(&byte, &classpath).expect("check"));
        assert!(RegisterType::Char.can_be_assigned_to(&int, &classpath).expect("check"));
        assert!(RegisterType::Integer.can_be_assigned_to(&float, &classpath).expect("check"));
        assert!(!RegisterType::LongLo.can_be_assigned_to(&int, &classpath).expect("check"));
    }
}
