use bitflags::bitflags;

bitflags! {
    /// Attribute flags describing what an opcode may do at runtime.
    pub struct OpcodeFlags: u8 {
        /// The instruction can raise an exception.
        const CAN_THROW = 0x01;
        /// Execution can fall through to the next instruction.
        const CAN_CONTINUE = 0x02;
        /// The instruction stores a result readable by `move-result*`.
        const SETS_RESULT = 0x04;
        /// The instruction writes a destination register.
        const SETS_REGISTER = 0x08;
        /// The written destination occupies a register pair.
        const SETS_WIDE_REGISTER = 0x10;
        /// The instruction carries one or more branch targets.
        const BRANCHES = 0x20;
    }
}

/// The standard (non-odex) Dalvik opcode set.
///
/// Values match the encoding byte of each instruction; the three payload
/// pseudo-opcodes use their conventional identifiers above 0xff. `Display`
/// renders the canonical mnemonic (`const/4`, `move-wide/from16`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "kebab-case")]
#[repr(u16)]
pub enum Opcode {
    /// Waste a cycle.
    Nop = 0x00,
    /// Copy a 32-bit non-object register.
    Move = 0x01,
    /// `move` with a 16-bit source register.
    #[strum(serialize = "move/from16")]
    MoveFrom16 = 0x02,
    /// `move` with 16-bit source and destination registers.
    #[strum(serialize = "move/16")]
    Move16 = 0x03,
    /// Copy a register pair.
    MoveWide = 0x04,
    /// `move-wide` with a 16-bit source register.
    #[strum(serialize = "move-wide/from16")]
    MoveWideFrom16 = 0x05,
    /// `move-wide` with 16-bit source and destination registers.
    #[strum(serialize = "move-wide/16")]
    MoveWide16 = 0x06,
    /// Copy an object-bearing register.
    MoveObject = 0x07,
    /// `move-object` with a 16-bit source register.
    #[strum(serialize = "move-object/from16")]
    MoveObjectFrom16 = 0x08,
    /// `move-object` with 16-bit source and destination registers.
    #[strum(serialize = "move-object/16")]
    MoveObject16 = 0x09,
    /// Read the 32-bit result of the most recent invoke.
    MoveResult = 0x0a,
    /// Read the wide result of the most recent invoke.
    MoveResultWide = 0x0b,
    /// Read the object result of the most recent invoke.
    MoveResultObject = 0x0c,
    /// Read the caught exception at a handler entry.
    MoveException = 0x0d,
    /// Return from a `void` method.
    ReturnVoid = 0x0e,
    /// Return a 32-bit value.
    Return = 0x0f,
    /// Return a register pair.
    ReturnWide = 0x10,
    /// Return an object reference.
    ReturnObject = 0x11,
    /// Load a 4-bit literal.
    #[strum(serialize = "const/4")]
    Const4 = 0x12,
    /// Load a 16-bit literal, sign-extended.
    #[strum(serialize = "const/16")]
    Const16 = 0x13,
    /// Load a 32-bit literal.
    Const = 0x14,
    /// Load a 16-bit literal into the high half-word.
    #[strum(serialize = "const/high16")]
    ConstHigh16 = 0x15,
    /// Load a 16-bit literal into a register pair, sign-extended.
    #[strum(serialize = "const-wide/16")]
    ConstWide16 = 0x16,
    /// Load a 32-bit literal into a register pair, sign-extended.
    #[strum(serialize = "const-wide/32")]
    ConstWide32 = 0x17,
    /// Load a 64-bit literal.
    ConstWide = 0x18,
    /// Load a 16-bit literal into the high word of a register pair.
    #[strum(serialize = "const-wide/high16")]
    ConstWideHigh16 = 0x19,
    /// Load a reference to a string constant.
    ConstString = 0x1a,
    /// `const-string` with a 32-bit string index.
    #[strum(serialize = "const-string/jumbo")]
    ConstStringJumbo = 0x1b,
    /// Load a reference to a class object.
    ConstClass = 0x1c,
    /// Acquire the monitor of an object.
    MonitorEnter = 0x1d,
    /// Release the monitor of an object.
    MonitorExit = 0x1e,
    /// Throw unless the reference can be cast to the given type.
    CheckCast = 0x1f,
    /// Test whether a reference is an instance of the given type.
    InstanceOf = 0x20,
    /// Read the length of an array.
    ArrayLength = 0x21,
    /// Allocate an uninitialized instance of a class.
    NewInstance = 0x22,
    /// Allocate an array with a runtime length.
    NewArray = 0x23,
    /// Allocate and fill an array from up to five registers.
    FilledNewArray = 0x24,
    /// `filled-new-array` over a register range.
    #[strum(serialize = "filled-new-array/range")]
    FilledNewArrayRange = 0x25,
    /// Fill a primitive array from an inline data payload.
    FillArrayData = 0x26,
    /// Throw the referenced exception object.
    Throw = 0x27,
    /// Unconditional branch, 8-bit offset.
    Goto = 0x28,
    /// Unconditional branch, 16-bit offset.
    #[strum(serialize = "goto/16")]
    Goto16 = 0x29,
    /// Unconditional branch, 32-bit offset.
    #[strum(serialize = "goto/32")]
    Goto32 = 0x2a,
    /// Jump table over consecutive keys.
    PackedSwitch = 0x2b,
    /// Jump table over sorted sparse keys.
    SparseSwitch = 0x2c,
    /// Compare floats, NaN biased towards -1.
    CmplFloat = 0x2d,
    /// Compare floats, NaN biased towards 1.
    CmpgFloat = 0x2e,
    /// Compare doubles, NaN biased towards -1.
    CmplDouble = 0x2f,
    /// Compare doubles, NaN biased towards 1.
    CmpgDouble = 0x30,
    /// Compare longs.
    CmpLong = 0x31,
    /// Branch if the registers compare equal.
    IfEq = 0x32,
    /// Branch if the registers compare unequal.
    IfNe = 0x33,
    /// Branch if less-than.
    IfLt = 0x34,
    /// Branch if greater-or-equal.
    IfGe = 0x35,
    /// Branch if greater-than.
    IfGt = 0x36,
    /// Branch if less-or-equal.
    IfLe = 0x37,
    /// Branch if the register is zero or null.
    IfEqz = 0x38,
    /// Branch if the register is non-zero.
    IfNez = 0x39,
    /// Branch if the register is negative.
    IfLtz = 0x3a,
    /// Branch if the register is non-negative.
    IfGez = 0x3b,
    /// Branch if the register is positive.
    IfGtz = 0x3c,
    /// Branch if the register is zero or negative.
    IfLez = 0x3d,
    /// Read a 32-bit array element.
    Aget = 0x44,
    /// Read a wide array element.
    AgetWide = 0x45,
    /// Read an object array element.
    AgetObject = 0x46,
    /// Read a boolean array element.
    AgetBoolean = 0x47,
    /// Read a byte array element.
    AgetByte = 0x48,
    /// Read a char array element.
    AgetChar = 0x49,
    /// Read a short array element.
    AgetShort = 0x4a,
    /// Write a 32-bit array element.
    Aput = 0x4b,
    /// Write a wide array element.
    AputWide = 0x4c,
    /// Write an object array element.
    AputObject = 0x4d,
    /// Write a boolean array element.
    AputBoolean = 0x4e,
    /// Write a byte array element.
    AputByte = 0x4f,
    /// Write a char array element.
    AputChar = 0x50,
    /// Write a short array element.
    AputShort = 0x51,
    /// Read a 32-bit instance field.
    Iget = 0x52,
    /// Read a wide instance field.
    IgetWide = 0x53,
    /// Read an object instance field.
    IgetObject = 0x54,
    /// Read a boolean instance field.
    IgetBoolean = 0x55,
    /// Read a byte instance field.
    IgetByte = 0x56,
    /// Read a char instance field.
    IgetChar = 0x57,
    /// Read a short instance field.
    IgetShort = 0x58,
    /// Write a 32-bit instance field.
    Iput = 0x59,
    /// Write a wide instance field.
    IputWide = 0x5a,
    /// Write an object instance field.
    IputObject = 0x5b,
    /// Write a boolean instance field.
    IputBoolean = 0x5c,
    /// Write a byte instance field.
    IputByte = 0x5d,
    /// Write a char instance field.
    IputChar = 0x5e,
    /// Write a short instance field.
    IputShort = 0x5f,
    /// Read a 32-bit static field.
    Sget = 0x60,
    /// Read a wide static field.
    SgetWide = 0x61,
    /// Read an object static field.
    SgetObject = 0x62,
    /// Read a boolean static field.
    SgetBoolean = 0x63,
    /// Read a byte static field.
    SgetByte = 0x64,
    /// Read a char static field.
    SgetChar = 0x65,
    /// Read a short static field.
    SgetShort = 0x66,
    /// Write a 32-bit static field.
    Sput = 0x67,
    /// Write a wide static field.
    SputWide = 0x68,
    /// Write an object static field.
    SputObject = 0x69,
    /// Write a boolean static field.
    SputBoolean = 0x6a,
    /// Write a byte static field.
    SputByte = 0x6b,
    /// Write a char static field.
    SputChar = 0x6c,
    /// Write a short static field.
    SputShort = 0x6d,
    /// Call a virtual method.
    InvokeVirtual = 0x6e,
    /// Call the superclass implementation of a virtual method.
    InvokeSuper = 0x6f,
    /// Call a constructor or private method.
    InvokeDirect = 0x70,
    /// Call a static method.
    InvokeStatic = 0x71,
    /// Call an interface method.
    InvokeInterface = 0x72,
    /// `invoke-virtual` over a register range.
    #[strum(serialize = "invoke-virtual/range")]
    InvokeVirtualRange = 0x74,
    /// `invoke-super` over a register range.
    #[strum(serialize = "invoke-super/range")]
    InvokeSuperRange = 0x75,
    /// `invoke-direct` over a register range.
    #[strum(serialize = "invoke-direct/range")]
    InvokeDirectRange = 0x76,
    /// `invoke-static` over a register range.
    #[strum(serialize = "invoke-static/range")]
    InvokeStaticRange = 0x77,
    /// `invoke-interface` over a register range.
    #[strum(serialize = "invoke-interface/range")]
    InvokeInterfaceRange = 0x78,
    /// Arithmetic negation of an int.
    NegInt = 0x7b,
    /// Bitwise complement of an int.
    NotInt = 0x7c,
    /// Arithmetic negation of a long.
    NegLong = 0x7d,
    /// Bitwise complement of a long.
    NotLong = 0x7e,
    /// Arithmetic negation of a float.
    NegFloat = 0x7f,
    /// Arithmetic negation of a double.
    NegDouble = 0x80,
    /// Widen int to long.
    IntToLong = 0x81,
    /// Convert int to float.
    IntToFloat = 0x82,
    /// Convert int to double.
    IntToDouble = 0x83,
    /// Truncate long to int.
    LongToInt = 0x84,
    /// Convert long to float.
    LongToFloat = 0x85,
    /// Convert long to double.
    LongToDouble = 0x86,
    /// Convert float to int.
    FloatToInt = 0x87,
    /// Convert float to long.
    FloatToLong = 0x88,
    /// Widen float to double.
    FloatToDouble = 0x89,
    /// Convert double to int.
    DoubleToInt = 0x8a,
    /// Convert double to long.
    DoubleToLong = 0x8b,
    /// Narrow double to float.
    DoubleToFloat = 0x8c,
    /// Truncate int to byte.
    IntToByte = 0x8d,
    /// Truncate int to char.
    IntToChar = 0x8e,
    /// Truncate int to short.
    IntToShort = 0x8f,
    /// Integer addition.
    AddInt = 0x90,
    /// Integer subtraction.
    SubInt = 0x91,
    /// Integer multiplication.
    MulInt = 0x92,
    /// Integer division.
    DivInt = 0x93,
    /// Integer remainder.
    RemInt = 0x94,
    /// Bitwise AND of ints.
    AndInt = 0x95,
    /// Bitwise OR of ints.
    OrInt = 0x96,
    /// Bitwise XOR of ints.
    XorInt = 0x97,
    /// Left shift of an int.
    ShlInt = 0x98,
    /// Arithmetic right shift of an int.
    ShrInt = 0x99,
    /// Logical right shift of an int.
    UshrInt = 0x9a,
    /// Long addition.
    AddLong = 0x9b,
    /// Long subtraction.
    SubLong = 0x9c,
    /// Long multiplication.
    MulLong = 0x9d,
    /// Long division.
    DivLong = 0x9e,
    /// Long remainder.
    RemLong = 0x9f,
    /// Bitwise AND of longs.
    AndLong = 0xa0,
    /// Bitwise OR of longs.
    OrLong = 0xa1,
    /// Bitwise XOR of longs.
    XorLong = 0xa2,
    /// Left shift of a long.
    ShlLong = 0xa3,
    /// Arithmetic right shift of a long.
    ShrLong = 0xa4,
    /// Logical right shift of a long.
    UshrLong = 0xa5,
    /// Float addition.
    AddFloat = 0xa6,
    /// Float subtraction.
    SubFloat = 0xa7,
    /// Float multiplication.
    MulFloat = 0xa8,
    /// Float division.
    DivFloat = 0xa9,
    /// Float remainder.
    RemFloat = 0xaa,
    /// Double addition.
    AddDouble = 0xab,
    /// Double subtraction.
    SubDouble = 0xac,
    /// Double multiplication.
    MulDouble = 0xad,
    /// Double division.
    DivDouble = 0xae,
    /// Double remainder.
    RemDouble = 0xaf,
    /// In-place integer addition.
    #[strum(serialize = "add-int/2addr")]
    AddInt2addr = 0xb0,
    /// In-place integer subtraction.
    #[strum(serialize = "sub-int/2addr")]
    SubInt2addr = 0xb1,
    /// In-place integer multiplication.
    #[strum(serialize = "mul-int/2addr")]
    MulInt2addr = 0xb2,
    /// In-place integer division.
    #[strum(serialize = "div-int/2addr")]
    DivInt2addr = 0xb3,
    /// In-place integer remainder.
    #[strum(serialize = "rem-int/2addr")]
    RemInt2addr = 0xb4,
    /// In-place bitwise AND of ints.
    #[strum(serialize = "and-int/2addr")]
    AndInt2addr = 0xb5,
    /// In-place bitwise OR of ints.
    #[strum(serialize = "or-int/2addr")]
    OrInt2addr = 0xb6,
    /// In-place bitwise XOR of ints.
    #[strum(serialize = "xor-int/2addr")]
    XorInt2addr = 0xb7,
    /// In-place left shift of an int.
    #[strum(serialize = "shl-int/2addr")]
    ShlInt2addr = 0xb8,
    /// In-place arithmetic right shift of an int.
    #[strum(serialize = "shr-int/2addr")]
    ShrInt2addr = 0xb9,
    /// In-place logical right shift of an int.
    #[strum(serialize = "ushr-int/2addr")]
    UshrInt2addr = 0xba,
    /// In-place long addition.
    #[strum(serialize = "add-long/2addr")]
    AddLong2addr = 0xbb,
    /// In-place long subtraction.
    #[strum(serialize = "sub-long/2addr")]
    SubLong2addr = 0xbc,
    /// In-place long multiplication.
    #[strum(serialize = "mul-long/2addr")]
    MulLong2addr = 0xbd,
    /// In-place long division.
    #[strum(serialize = "div-long/2addr")]
    DivLong2addr = 0xbe,
    /// In-place long remainder.
    #[strum(serialize = "rem-long/2addr")]
    RemLong2addr = 0xbf,
    /// In-place bitwise AND of longs.
    #[strum(serialize = "and-long/2addr")]
    AndLong2addr = 0xc0,
    /// In-place bitwise OR of longs.
    #[strum(serialize = "or-long/2addr")]
    OrLong2addr = 0xc1,
    /// In-place bitwise XOR of longs.
    #[strum(serialize = "xor-long/2addr")]
    XorLong2addr = 0xc2,
    /// In-place left shift of a long.
    #[strum(serialize = "shl-long/2addr")]
    ShlLong2addr = 0xc3,
    /// In-place arithmetic right shift of a long.
    #[strum(serialize = "shr-long/2addr")]
    ShrLong2addr = 0xc4,
    /// In-place logical right shift of a long.
    #[strum(serialize = "ushr-long/2addr")]
    UshrLong2addr = 0xc5,
    /// In-place float addition.
    #[strum(serialize = "add-float/2addr")]
    AddFloat2addr = 0xc6,
    /// In-place float subtraction.
    #[strum(serialize = "sub-float/2addr")]
    SubFloat2addr = 0xc7,
    /// In-place float multiplication.
    #[strum(serialize = "mul-float/2addr")]
    MulFloat2addr = 0xc8,
    /// In-place float division.
    #[strum(serialize = "div-float/2addr")]
    DivFloat2addr = 0xc9,
    /// In-place float remainder.
    #[strum(serialize = "rem-float/2addr")]
    RemFloat2addr = 0xca,
    /// In-place double addition.
    #[strum(serialize = "add-double/2addr")]
    AddDouble2addr = 0xcb,
    /// In-place double subtraction.
    #[strum(serialize = "sub-double/2addr")]
    SubDouble2addr = 0xcc,
    /// In-place double multiplication.
    #[strum(serialize = "mul-double/2addr")]
    MulDouble2addr = 0xcd,
    /// In-place double division.
    #[strum(serialize = "div-double/2addr")]
    DivDouble2addr = 0xce,
    /// In-place double remainder.
    #[strum(serialize = "rem-double/2addr")]
    RemDouble2addr = 0xcf,
    /// Integer addition with a 16-bit literal.
    #[strum(serialize = "add-int/lit16")]
    AddIntLit16 = 0xd0,
    /// Reverse subtraction from a 16-bit literal.
    RsubInt = 0xd1,
    /// Integer multiplication with a 16-bit literal.
    #[strum(serialize = "mul-int/lit16")]
    MulIntLit16 = 0xd2,
    /// Integer division by a 16-bit literal.
    #[strum(serialize = "div-int/lit16")]
    DivIntLit16 = 0xd3,
    /// Integer remainder by a 16-bit literal.
    #[strum(serialize = "rem-int/lit16")]
    RemIntLit16 = 0xd4,
    /// Bitwise AND with a 16-bit literal.
    #[strum(serialize = "and-int/lit16")]
    AndIntLit16 = 0xd5,
    /// Bitwise OR with a 16-bit literal.
    #[strum(serialize = "or-int/lit16")]
    OrIntLit16 = 0xd6,
    /// Bitwise XOR with a 16-bit literal.
    #[strum(serialize = "xor-int/lit16")]
    XorIntLit16 = 0xd7,
    /// Integer addition with an 8-bit literal.
    #[strum(serialize = "add-int/lit8")]
    AddIntLit8 = 0xd8,
    /// Reverse subtraction from an 8-bit literal.
    #[strum(serialize = "rsub-int/lit8")]
    RsubIntLit8 = 0xd9,
    /// Integer multiplication with an 8-bit literal.
    #[strum(serialize = "mul-int/lit8")]
    MulIntLit8 = 0xda,
    /// Integer division by an 8-bit literal.
    #[strum(serialize = "div-int/lit8")]
    DivIntLit8 = 0xdb,
    /// Integer remainder by an 8-bit literal.
    #[strum(serialize = "rem-int/lit8")]
    RemIntLit8 = 0xdc,
    /// Bitwise AND with an 8-bit literal.
    #[strum(serialize = "and-int/lit8")]
    AndIntLit8 = 0xdd,
    /// Bitwise OR with an 8-bit literal.
    #[strum(serialize = "or-int/lit8")]
    OrIntLit8 = 0xde,
    /// Bitwise XOR with an 8-bit literal.
    #[strum(serialize = "xor-int/lit8")]
    XorIntLit8 = 0xdf,
    /// Left shift by an 8-bit literal.
    #[strum(serialize = "shl-int/lit8")]
    ShlIntLit8 = 0xe0,
    /// Arithmetic right shift by an 8-bit literal.
    #[strum(serialize = "shr-int/lit8")]
    ShrIntLit8 = 0xe1,
    /// Logical right shift by an 8-bit literal.
    #[strum(serialize = "ushr-int/lit8")]
    UshrIntLit8 = 0xe2,
    /// Jump table data for `packed-switch`.
    PackedSwitchPayload = 0x100,
    /// Jump table data for `sparse-switch`.
    SparseSwitchPayload = 0x200,
    /// Element data for `fill-array-data`.
    ArrayPayload = 0x300,
}

impl Opcode {
    /// Attribute flags for this opcode.
    pub fn flags(self) -> OpcodeFlags {
        use Opcode::*;
        use OpcodeFlags as F;

        match self {
            Nop => F::CAN_CONTINUE,

            Move | MoveFrom16 | Move16 | MoveObject | MoveObjectFrom16 | MoveObject16
            | MoveResult | MoveResultObject | MoveException | Const4 | Const16 | Const
            | ConstHigh16 | NegInt | NotInt | NegFloat | IntToFloat | LongToInt | LongToFloat
            | FloatToInt | DoubleToInt | DoubleToFloat | IntToByte | IntToChar | IntToShort
            | CmplFloat | CmpgFloat | CmplDouble | CmpgDouble | CmpLong | AddInt | SubInt
            | MulInt | AndInt | OrInt | XorInt | ShlInt | ShrInt | UshrInt | AddFloat
            | SubFloat | MulFloat | DivFloat | RemFloat | AddInt2addr | SubInt2addr
            | MulInt2addr | AndInt2addr | OrInt2addr | XorInt2addr | ShlInt2addr
            | ShrInt2addr | UshrInt2addr | AddFloat2addr | SubFloat2addr | MulFloat2addr
            | DivFloat2addr | RemFloat2addr | AddIntLit16 | RsubInt | MulIntLit16
            | AndIntLit16 | OrIntLit16 | XorIntLit16 | AddIntLit8 | RsubIntLit8 | MulIntLit8
            | AndIntLit8 | OrIntLit8 | XorIntLit8 | ShlIntLit8 | ShrIntLit8 | UshrIntLit8 => {
                F::CAN_CONTINUE | F::SETS_REGISTER
            }

            MoveWide | MoveWideFrom16 | MoveWide16 | MoveResultWide | ConstWide16
            | ConstWide32 | ConstWide | ConstWideHigh16 | NegLong | NotLong | NegDouble
            | IntToLong | IntToDouble | LongToDouble | FloatToLong | FloatToDouble
            | DoubleToLong | AddLong | SubLong | MulLong | AndLong | OrLong | XorLong
            | ShlLong | ShrLong | UshrLong | AddDouble | SubDouble | MulDouble | DivDouble
            | RemDouble | AddLong2addr | SubLong2addr | MulLong2addr | AndLong2addr
            | OrLong2addr | XorLong2addr | ShlLong2addr | ShrLong2addr | UshrLong2addr
            | AddDouble2addr | SubDouble2addr | MulDouble2addr | DivDouble2addr
            | RemDouble2addr => F::CAN_CONTINUE | F::SETS_REGISTER | F::SETS_WIDE_REGISTER,

            ReturnVoid | Return | ReturnWide | ReturnObject => F::empty(),

            ConstString | ConstStringJumbo | ConstClass | CheckCast | InstanceOf
            | ArrayLength | NewInstance | NewArray | Aget | AgetObject | AgetBoolean
            | AgetByte | AgetChar | AgetShort | Iget | IgetObject | IgetBoolean | IgetByte
            | IgetChar | IgetShort | Sget | SgetObject | SgetBoolean | SgetByte | SgetChar
            | SgetShort => F::CAN_THROW | F::CAN_CONTINUE | F::SETS_REGISTER,

            AgetWide | IgetWide | SgetWide => {
                F::CAN_THROW | F::CAN_CONTINUE | F::SETS_REGISTER | F::SETS_WIDE_REGISTER
            }

            MonitorEnter | MonitorExit | FillArrayData | Aput | AputWide | AputObject | AputBoolean
            | AputByte | AputChar | AputShort | Iput | IputWide | IputObject | IputBoolean
            | IputByte | IputChar | IputShort | Sput | SputWide | SputObject | SputBoolean
            | SputByte | SputChar | SputShort => F::CAN_THROW | F::CAN_CONTINUE,

            FilledNewArray | FilledNewArrayRange | InvokeVirtual | InvokeSuper
            | InvokeDirect | InvokeStatic | InvokeInterface | InvokeVirtualRange
            | InvokeSuperRange | InvokeDirectRange | InvokeStaticRange
            | InvokeInterfaceRange => F::CAN_THROW | F::CAN_CONTINUE | F::SETS_RESULT,

            Throw => F::CAN_THROW,

            Goto | Goto16 | Goto32 => F::BRANCHES,

            PackedSwitch | SparseSwitch | IfEq | IfNe | IfLt | IfGe | IfGt | IfLe | IfEqz
            | IfNez | IfLtz | IfGez | IfGtz | IfLez => F::CAN_CONTINUE | F::BRANCHES,

            DivInt | RemInt | DivInt2addr | RemInt2addr | DivIntLit16 | RemIntLit16
            | DivIntLit8 | RemIntLit8 => F::CAN_THROW | F::CAN_CONTINUE | F::SETS_REGISTER,

            DivLong | RemLong | DivLong2addr | RemLong2addr => {
                F::CAN_THROW | F::CAN_CONTINUE | F::SETS_REGISTER | F::SETS_WIDE_REGISTER
            }

            PackedSwitchPayload | SparseSwitchPayload | ArrayPayload => F::empty(),
        }
    }

    /// Whether the instruction can raise an exception.
    pub fn can_throw(self) -> bool {
        self.flags().contains(OpcodeFlags::CAN_THROW)
    }

    /// Whether execution can fall through to the next instruction.
    pub fn can_continue(self) -> bool {
        self.flags().contains(OpcodeFlags::CAN_CONTINUE)
    }

    /// Whether the instruction stores a result readable by `move-result*`.
    pub fn sets_result(self) -> bool {
        self.flags().contains(OpcodeFlags::SETS_RESULT)
    }

    /// Whether the instruction writes a destination register.
    pub fn sets_register(self) -> bool {
        self.flags().contains(OpcodeFlags::SETS_REGISTER)
    }

    /// Whether the written destination occupies a register pair.
    pub fn sets_wide_register(self) -> bool {
        self.flags().contains(OpcodeFlags::SETS_WIDE_REGISTER)
    }

    /// Whether the instruction carries one or more branch targets.
    pub fn branches(self) -> bool {
        self.flags().contains(OpcodeFlags::BRANCHES)
    }

    /// Whether this is one of the payload pseudo-opcodes.
    pub const fn is_payload(self) -> bool {
        matches!(
            self,
            Self::PackedSwitchPayload | Self::SparseSwitchPayload | Self::ArrayPayload
        )
    }

    /// The encoding format of this opcode.
    pub fn format(self) -> Format {
        use Opcode::*;

        match self {
            Nop => Format::Format10x,
            Move | MoveWide | MoveObject | ArrayLength | NegInt | NotInt | NegLong
            | NotLong | NegFloat | NegDouble | IntToLong | IntToFloat | IntToDouble
            | LongToInt | LongToFloat | LongToDouble | FloatToInt | FloatToLong
            | FloatToDouble | DoubleToInt | DoubleToLong | DoubleToFloat | IntToByte
            | IntToChar | IntToShort | AddInt2addr | SubInt2addr | MulInt2addr
            | DivInt2addr | RemInt2addr | AndInt2addr | OrInt2addr | XorInt2addr
            | ShlInt2addr | ShrInt2addr | UshrInt2addr | AddLong2addr | SubLong2addr
            | MulLong2addr | DivLong2addr | RemLong2addr | AndLong2addr | OrLong2addr
            | XorLong2addr | ShlLong2addr | ShrLong2addr | UshrLong2addr | AddFloat2addr
            | SubFloat2addr | MulFloat2addr | DivFloat2addr | RemFloat2addr
            | AddDouble2addr | SubDouble2addr | MulDouble2addr | DivDouble2addr
            | RemDouble2addr => Format::Format12x,
            Const4 => Format::Format11n,
            MoveResult | MoveResultWide | MoveResultObject | MoveException | Return
            | ReturnWide | ReturnObject | MonitorEnter | MonitorExit | Throw => {
                Format::Format11x
            }
            ReturnVoid => Format::Format10x,
            Goto => Format::Format10t,
            Goto16 => Format::Format20t,
            Goto32 => Format::Format30t,
            MoveFrom16 | MoveWideFrom16 | MoveObjectFrom16 => Format::Format22x,
            Move16 | MoveWide16 | MoveObject16 => Format::Format32x,
            IfEqz | IfNez | IfLtz | IfGez | IfGtz | IfLez => Format::Format21t,
            Const16 | ConstWide16 => Format::Format21s,
            ConstHigh16 | ConstWideHigh16 => Format::Format21h,
            Const | ConstWide32 => Format::Format31i,
            ConstWide => Format::Format51l,
            ConstString | ConstClass | CheckCast | NewInstance | Sget | SgetWide
            | SgetObject | SgetBoolean | SgetByte | SgetChar | SgetShort | Sput | SputWide
            | SputObject | SputBoolean | SputByte | SputChar | SputShort => Format::Format21c,
            ConstStringJumbo => Format::Format31c,
            InstanceOf | NewArray | Iget | IgetWide | IgetObject | IgetBoolean | IgetByte
            | IgetChar | IgetShort | Iput | IputWide | IputObject | IputBoolean | IputByte
            | IputChar | IputShort => Format::Format22c,
            FillArrayData | PackedSwitch | SparseSwitch => Format::Format31t,
            CmplFloat | CmpgFloat | CmplDouble | CmpgDouble | CmpLong | Aget | AgetWide
            | AgetObject | AgetBoolean | AgetByte | AgetChar | AgetShort | Aput | AputWide
            | AputObject | AputBoolean | AputByte | AputChar | AputShort | AddInt | SubInt
            | MulInt | DivInt | RemInt | AndInt | OrInt | XorInt | ShlInt | ShrInt
            | UshrInt | AddLong | SubLong | MulLong | DivLong | RemLong | AndLong | OrLong
            | XorLong | ShlLong | ShrLong | UshrLong | AddFloat | SubFloat | MulFloat
            | DivFloat | RemFloat | AddDouble | SubDouble | MulDouble | DivDouble
            | RemDouble => Format::Format23x,
            IfEq | IfNe | IfLt | IfGe | IfGt | IfLe => Format::Format22t,
            AddIntLit16 | RsubInt | MulIntLit16 | DivIntLit16 | RemIntLit16 | AndIntLit16
            | OrIntLit16 | XorIntLit16 => Format::Format22s,
            AddIntLit8 | RsubIntLit8 | MulIntLit8 | DivIntLit8 | RemIntLit8 | AndIntLit8
            | OrIntLit8 | XorIntLit8 | ShlIntLit8 | ShrIntLit8 | UshrIntLit8 => {
                Format::Format22b
            }
            FilledNewArray | InvokeVirtual | InvokeSuper | InvokeDirect | InvokeStatic
            | InvokeInterface => Format::Format35c,
            FilledNewArrayRange | InvokeVirtualRange | InvokeSuperRange
            | InvokeDirectRange | InvokeStaticRange | InvokeInterfaceRange => {
                Format::Format3rc
            }
            PackedSwitchPayload => Format::PackedSwitchPayload,
            SparseSwitchPayload => Format::SparseSwitchPayload,
            ArrayPayload => Format::ArrayDataPayload,
        }
    }
}

/// Dalvik instruction encoding formats.
///
/// The name encodes code-unit count, register count and extra operand kind,
/// per the bytecode reference (`21c` = 2 units, 1 register, constant-pool
/// reference, and so on). Payload formats have data-dependent sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// No operands.
    Format10x,
    /// Two 4-bit registers.
    Format12x,
    /// 4-bit register, 4-bit literal.
    Format11n,
    /// One 8-bit register.
    Format11x,
    /// 8-bit branch offset.
    Format10t,
    /// 16-bit branch offset.
    Format20t,
    /// 8-bit and 16-bit registers.
    Format22x,
    /// 8-bit register, 16-bit branch offset.
    Format21t,
    /// 8-bit register, 16-bit literal.
    Format21s,
    /// 8-bit register, 16-bit literal shifted into the high bits.
    Format21h,
    /// 8-bit register, 16-bit pool reference.
    Format21c,
    /// Three 8-bit registers.
    Format23x,
    /// Two 8-bit registers, 8-bit literal.
    Format22b,
    /// Two 4-bit registers, 16-bit branch offset.
    Format22t,
    /// Two 4-bit registers, 16-bit literal.
    Format22s,
    /// Two 4-bit registers, 16-bit pool reference.
    Format22c,
    /// Two 16-bit registers.
    Format32x,
    /// 32-bit branch offset.
    Format30t,
    /// 8-bit register, 32-bit payload offset.
    Format31t,
    /// 8-bit register, 32-bit literal.
    Format31i,
    /// 8-bit register, 32-bit pool reference.
    Format31c,
    /// Up to five 4-bit registers, 16-bit pool reference.
    Format35c,
    /// 16-bit register range, 16-bit pool reference.
    Format3rc,
    /// 8-bit register, 64-bit literal.
    Format51l,
    /// `packed-switch` jump table.
    PackedSwitchPayload,
    /// `sparse-switch` jump table.
    SparseSwitchPayload,
    /// `fill-array-data` element data.
    ArrayDataPayload,
}

impl Format {
    /// Encoded size in 16-bit code units; `None` for the data-dependent
    /// payload formats.
    pub const fn code_units(self) -> Option<usize> {
        match self {
            Self::Format10x
            | Self::Format12x
            | Self::Format11n
            | Self::Format11x
            | Self::Format10t => Some(1),
            Self::Format20t
            | Self::Format22x
            | Self::Format21t
            | Self::Format21s
            | Self::Format21h
            | Self::Format21c
            | Self::Format23x
            | Self::Format22b
            | Self::Format22t
            | Self::Format22s
            | Self::Format22c => Some(2),
            Self::Format32x
            | Self::Format30t
            | Self::Format31t
            | Self::Format31i
            | Self::Format31c
            | Self::Format35c
            | Self::Format3rc => Some(3),
            Self::Format51l => Some(5),
            Self::PackedSwitchPayload | Self::SparseSwitchPayload | Self::ArrayDataPayload => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn mnemonics_use_canonical_spelling() {
        assert_eq!(Opcode::Const4.to_string(), "const/4");
        assert_eq!(Opcode::MoveWideFrom16.to_string(), "move-wide/from16");
        assert_eq!(Opcode::AgetWide.to_string(), "aget-wide");
        assert_eq!(Opcode::AddInt2addr.to_string(), "add-int/2addr");
        assert_eq!(Opcode::InvokeVirtualRange.to_string(), "invoke-virtual/range");
        assert_eq!(Opcode::ArrayPayload.to_string(), "array-payload");
    }

    #[test]
    fn flag_combinations_are_consistent() {
        for opcode in Opcode::iter() {
            let flags = opcode.flags();

            // a wide write is always a write
            if flags.contains(OpcodeFlags::SETS_WIDE_REGISTER) {
                assert!(flags.contains(OpcodeFlags::SETS_REGISTER), "{opcode}");
            }
            // results and register writes are mutually exclusive
            if flags.contains(OpcodeFlags::SETS_RESULT) {
                assert!(!flags.contains(OpcodeFlags::SETS_REGISTER), "{opcode}");
            }
            // payloads are inert
            if opcode.is_payload() {
                assert!(flags.is_empty(), "{opcode}");
            }
        }
    }

    #[test]
    fn terminal_opcodes_do_not_continue() {
        for opcode in [
            Opcode::ReturnVoid,
            Opcode::Return,
            Opcode::ReturnWide,
            Opcode::ReturnObject,
            Opcode::Throw,
            Opcode::Goto,
            Opcode::Goto32,
        ] {
            assert!(!opcode.can_continue(), "{opcode}");
        }
        assert!(Opcode::PackedSwitch.can_continue());
        assert!(Opcode::IfEq.can_continue());
    }

    #[rstest::rstest]
    #[case(Opcode::Nop, Some(1))]
    #[case(Opcode::Move, Some(1))]
    #[case(Opcode::ConstString, Some(2))]
    #[case(Opcode::IfEq, Some(2))]
    #[case(Opcode::InvokeStatic, Some(3))]
    #[case(Opcode::Move16, Some(3))]
    #[case(Opcode::ConstWide, Some(5))]
    #[case(Opcode::ArrayPayload, None)]
    fn format_sizes(#[case] opcode: Opcode, #[case] code_units: Option<usize>) {
        assert_eq!(opcode.format().code_units(), code_units);
    }
}
