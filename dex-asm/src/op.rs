//! Shorthand constructors producing a well-formed [`Instruction`] for each
//! opcode, one free function per mnemonic.

use std::sync::Arc;

use dex_types::{Literal, RegisterId, TypeDescriptor};

use crate::instruction::{Instruction, Operands, Payload};
use crate::opcode::Opcode;
use crate::reference::{FieldRef, MethodRef};

macro_rules! op_none {
    ($($(#[$docs:meta])* $fn_name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$docs])*
            pub fn $fn_name() -> Instruction {
                Instruction::new(Opcode::$variant, Operands::None)
            }
        )*
    };
}

macro_rules! op_reg {
    ($($(#[$docs:meta])* $fn_name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$docs])*
            pub fn $fn_name(a: RegisterId) -> Instruction {
                Instruction::new(Opcode::$variant, Operands::Reg { a })
            }
        )*
    };
}

macro_rules! op_reg_pair {
    ($($(#[$docs:meta])* $fn_name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$docs])*
            pub fn $fn_name(a: RegisterId, b: RegisterId) -> Instruction {
                Instruction::new(Opcode::$variant, Operands::RegPair { a, b })
            }
        )*
    };
}

macro_rules! op_reg_triple {
    ($($(#[$docs:meta])* $fn_name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$docs])*
            pub fn $fn_name(a: RegisterId, b: RegisterId, c: RegisterId) -> Instruction {
                Instruction::new(Opcode::$variant, Operands::RegTriple { a, b, c })
            }
        )*
    };
}

macro_rules! op_reg_literal {
    ($($(#[$docs:meta])* $fn_name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$docs])*
            pub fn $fn_name(a: RegisterId, literal: Literal) -> Instruction {
                Instruction::new(Opcode::$variant, Operands::RegLiteral { a, literal })
            }
        )*
    };
}

macro_rules! op_reg_pair_literal {
    ($($(#[$docs:meta])* $fn_name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$docs])*
            pub fn $fn_name(a: RegisterId, b: RegisterId, literal: Literal) -> Instruction {
                Instruction::new(Opcode::$variant, Operands::RegPairLiteral { a, b, literal })
            }
        )*
    };
}

macro_rules! op_reg_branch {
    ($($(#[$docs:meta])* $fn_name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$docs])*
            pub fn $fn_name(a: RegisterId, offset: i32) -> Instruction {
                Instruction::new(Opcode::$variant, Operands::RegBranch { a, offset })
            }
        )*
    };
}

macro_rules! op_reg_pair_branch {
    ($($(#[$docs:meta])* $fn_name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$docs])*
            pub fn $fn_name(a: RegisterId, b: RegisterId, offset: i32) -> Instruction {
                Instruction::new(Opcode::$variant, Operands::RegPairBranch { a, b, offset })
            }
        )*
    };
}

macro_rules! op_reg_field {
    ($($(#[$docs:meta])* $fn_name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$docs])*
            pub fn $fn_name(a: RegisterId, field: FieldRef) -> Instruction {
                Instruction::new(Opcode::$variant, Operands::RegField { a, field })
            }
        )*
    };
}

macro_rules! op_reg_pair_field {
    ($($(#[$docs:meta])* $fn_name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$docs])*
            pub fn $fn_name(a: RegisterId, b: RegisterId, field: FieldRef) -> Instruction {
                Instruction::new(Opcode::$variant, Operands::RegPairField { a, b, field })
            }
        )*
    };
}

macro_rules! op_invoke {
    ($($(#[$docs:meta])* $fn_name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$docs])*
            pub fn $fn_name(registers: Vec<RegisterId>, method: MethodRef) -> Instruction {
                Instruction::new(Opcode::$variant, Operands::RegListMethod { registers, method })
            }
        )*
    };
}

macro_rules! op_invoke_range {
    ($($(#[$docs:meta])* $fn_name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$docs])*
            pub fn $fn_name(start: RegisterId, count: u16, method: MethodRef) -> Instruction {
                Instruction::new(Opcode::$variant, Operands::RegRangeMethod { start, count, method })
            }
        )*
    };
}

op_none! {
    /// `nop`
    nop => Nop,
    /// `return-void`
    return_void => ReturnVoid,
}

op_reg! {
    /// `move-result vA`
    move_result => MoveResult,
    /// `move-result-wide vA`
    move_result_wide => MoveResultWide,
    /// `move-result-object vA`
    move_result_object => MoveResultObject,
    /// `move-exception vA`
    move_exception => MoveException,
    /// `return vA`
    return_value => Return,
    /// `return-wide vA`
    return_wide => ReturnWide,
    /// `return-object vA`
    return_object => ReturnObject,
    /// `monitor-enter vA`
    monitor_enter => MonitorEnter,
    /// `monitor-exit vA`
    monitor_exit => MonitorExit,
    /// `throw vA`
    throw => Throw,
}

op_reg_pair! {
    /// `move vA, vB`
    mov => Move,
    /// `move/from16 vA, vB`
    move_from16 => MoveFrom16,
    /// `move/16 vA, vB`
    move_16 => Move16,
    /// `move-wide vA, vB`
    move_wide => MoveWide,
    /// `move-wide/from16 vA, vB`
    move_wide_from16 => MoveWideFrom16,
    /// `move-wide/16 vA, vB`
    move_wide_16 => MoveWide16,
    /// `move-object vA, vB`
    move_object => MoveObject,
    /// `move-object/from16 vA, vB`
    move_object_from16 => MoveObjectFrom16,
    /// `move-object/16 vA, vB`
    move_object_16 => MoveObject16,
    /// `array-length vA, vB`
    array_length => ArrayLength,
    /// `neg-int vA, vB`
    neg_int => NegInt,
    /// `not-int vA, vB`
    not_int => NotInt,
    /// `neg-long vA, vB`
    neg_long => NegLong,
    /// `not-long vA, vB`
    not_long => NotLong,
    /// `neg-float vA, vB`
    neg_float => NegFloat,
    /// `neg-double vA, vB`
    neg_double => NegDouble,
    /// `int-to-long vA, vB`
    int_to_long => IntToLong,
    /// `int-to-float vA, vB`
    int_to_float => IntToFloat,
    /// `int-to-double vA, vB`
    int_to_double => IntToDouble,
    /// `long-to-int vA, vB`
    long_to_int => LongToInt,
    /// `long-to-float vA, vB`
    long_to_float => LongToFloat,
    /// `long-to-double vA, vB`
    long_to_double => LongToDouble,
    /// `float-to-int vA, vB`
    float_to_int => FloatToInt,
    /// `float-to-long vA, vB`
    float_to_long => FloatToLong,
    /// `float-to-double vA, vB`
    float_to_double => FloatToDouble,
    /// `double-to-int vA, vB`
    double_to_int => DoubleToInt,
    /// `double-to-long vA, vB`
    double_to_long => DoubleToLong,
    /// `double-to-float vA, vB`
    double_to_float => DoubleToFloat,
    /// `int-to-byte vA, vB`
    int_to_byte => IntToByte,
    /// `int-to-char vA, vB`
    int_to_char => IntToChar,
    /// `int-to-short vA, vB`
    int_to_short => IntToShort,
    /// `add-int/2addr vA, vB`
    add_int_2addr => AddInt2addr,
    /// `sub-int/2addr vA, vB`
    sub_int_2addr => SubInt2addr,
    /// `mul-int/2addr vA, vB`
    mul_int_2addr => MulInt2addr,
    /// `div-int/2addr vA, vB`
    div_int_2addr => DivInt2addr,
    /// `rem-int/2addr vA, vB`
    rem_int_2addr => RemInt2addr,
    /// `and-int/2addr vA, vB`
    and_int_2addr => AndInt2addr,
    /// `or-int/2addr vA, vB`
    or_int_2addr => OrInt2addr,
    /// `xor-int/2addr vA, vB`
    xor_int_2addr => XorInt2addr,
    /// `shl-int/2addr vA, vB`
    shl_int_2addr => ShlInt2addr,
    /// `shr-int/2addr vA, vB`
    shr_int_2addr => ShrInt2addr,
    /// `ushr-int/2addr vA, vB`
    ushr_int_2addr => UshrInt2addr,
    /// `add-long/2addr vA, vB`
    add_long_2addr => AddLong2addr,
    /// `sub-long/2addr vA, vB`
    sub_long_2addr => SubLong2addr,
    /// `mul-long/2addr vA, vB`
    mul_long_2addr => MulLong2addr,
    /// `div-long/2addr vA, vB`
    div_long_2addr => DivLong2addr,
    /// `rem-long/2addr vA, vB`
    rem_long_2addr => RemLong2addr,
    /// `and-long/2addr vA, vB`
    and_long_2addr => AndLong2addr,
    /// `or-long/2addr vA, vB`
    or_long_2addr => OrLong2addr,
    /// `xor-long/2addr vA, vB`
    xor_long_2addr => XorLong2addr,
    /// `shl-long/2addr vA, vB`
    shl_long_2addr => ShlLong2addr,
    /// `shr-long/2addr vA, vB`
    shr_long_2addr => ShrLong2addr,
    /// `ushr-long/2addr vA, vB`
    ushr_long_2addr => UshrLong2addr,
    /// `add-float/2addr vA, vB`
    add_float_2addr => AddFloat2addr,
    /// `sub-float/2addr vA, vB`
    sub_float_2addr => SubFloat2addr,
    /// `mul-float/2addr vA, vB`
    mul_float_2addr => MulFloat2addr,
    /// `div-float/2addr vA, vB`
    div_float_2addr => DivFloat2addr,
    /// `rem-float/2addr vA, vB`
    rem_float_2addr => RemFloat2addr,
    /// `add-double/2addr vA, vB`
    add_double_2addr => AddDouble2addr,
    /// `sub-double/2addr vA, vB`
    sub_double_2addr => SubDouble2addr,
    /// `mul-double/2addr vA, vB`
    mul_double_2addr => MulDouble2addr,
    /// `div-double/2addr vA, vB`
    div_double_2addr => DivDouble2addr,
    /// `rem-double/2addr vA, vB`
    rem_double_2addr => RemDouble2addr,
}

op_reg_triple! {
    /// `cmpl-float vA, vB, vC`
    cmpl_float => CmplFloat,
    /// `cmpg-float vA, vB, vC`
    cmpg_float => CmpgFloat,
    /// `cmpl-double vA, vB, vC`
    cmpl_double => CmplDouble,
    /// `cmpg-double vA, vB, vC`
    cmpg_double => CmpgDouble,
    /// `cmp-long vA, vB, vC`
    cmp_long => CmpLong,
    /// `aget vA, vB, vC`
    aget => Aget,
    /// `aget-wide vA, vB, vC`
    aget_wide => AgetWide,
    /// `aget-object vA, vB, vC`
    aget_object => AgetObject,
    /// `aget-boolean vA, vB, vC`
    aget_boolean => AgetBoolean,
    /// `aget-byte vA, vB, vC`
    aget_byte => AgetByte,
    /// `aget-char vA, vB, vC`
    aget_char => AgetChar,
    /// `aget-short vA, vB, vC`
    aget_short => AgetShort,
    /// `aput vA, vB, vC`
    aput => Aput,
    /// `aput-wide vA, vB, vC`
    aput_wide => AputWide,
    /// `aput-object vA, vB, vC`
    aput_object => AputObject,
    /// `aput-boolean vA, vB, vC`
    aput_boolean => AputBoolean,
    /// `aput-byte vA, vB, vC`
    aput_byte => AputByte,
    /// `aput-char vA, vB, vC`
    aput_char => AputChar,
    /// `aput-short vA, vB, vC`
    aput_short => AputShort,
    /// `add-int vA, vB, vC`
    add_int => AddInt,
    /// `sub-int vA, vB, vC`
    sub_int => SubInt,
    /// `mul-int vA, vB, vC`
    mul_int => MulInt,
    /// `div-int vA, vB, vC`
    div_int => DivInt,
    /// `rem-int vA, vB, vC`
    rem_int => RemInt,
    /// `and-int vA, vB, vC`
    and_int => AndInt,
    /// `or-int vA, vB, vC`
    or_int => OrInt,
    /// `xor-int vA, vB, vC`
    xor_int => XorInt,
    /// `shl-int vA, vB, vC`
    shl_int => ShlInt,
    /// `shr-int vA, vB, vC`
    shr_int => ShrInt,
    /// `ushr-int vA, vB, vC`
    ushr_int => UshrInt,
    /// `add-long vA, vB, vC`
    add_long => AddLong,
    /// `sub-long vA, vB, vC`
    sub_long => SubLong,
    /// `mul-long vA, vB, vC`
    mul_long => MulLong,
    /// `div-long vA, vB, vC`
    div_long => DivLong,
    /// `rem-long vA, vB, vC`
    rem_long => RemLong,
    /// `and-long vA, vB, vC`
    and_long => AndLong,
    /// `or-long vA, vB, vC`
    or_long => OrLong,
    /// `xor-long vA, vB, vC`
    xor_long => XorLong,
    /// `shl-long vA, vB, vC`
    shl_long => ShlLong,
    /// `shr-long vA, vB, vC`
    shr_long => ShrLong,
    /// `ushr-long vA, vB, vC`
    ushr_long => UshrLong,
    /// `add-float vA, vB, vC`
    add_float => AddFloat,
    /// `sub-float vA, vB, vC`
    sub_float => SubFloat,
    /// `mul-float vA, vB, vC`
    mul_float => MulFloat,
    /// `div-float vA, vB, vC`
    div_float => DivFloat,
    /// `rem-float vA, vB, vC`
    rem_float => RemFloat,
    /// `add-double vA, vB, vC`
    add_double => AddDouble,
    /// `sub-double vA, vB, vC`
    sub_double => SubDouble,
    /// `mul-double vA, vB, vC`
    mul_double => MulDouble,
    /// `div-double vA, vB, vC`
    div_double => DivDouble,
    /// `rem-double vA, vB, vC`
    rem_double => RemDouble,
}

op_reg_literal! {
    /// `const/4 vA, #lit`
    const4 => Const4,
    /// `const/16 vA, #lit`
    const16 => Const16,
    /// `const vA, #lit`
    const32 => Const,
    /// `const/high16 vA, #lit`; the literal is stored already shifted.
    const_high16 => ConstHigh16,
    /// `const-wide/16 vA, #lit`
    const_wide16 => ConstWide16,
    /// `const-wide/32 vA, #lit`
    const_wide32 => ConstWide32,
    /// `const-wide vA, #lit`
    const_wide => ConstWide,
    /// `const-wide/high16 vA, #lit`; the literal is stored already shifted.
    const_wide_high16 => ConstWideHigh16,
}

op_reg_pair_literal! {
    /// `add-int/lit16 vA, vB, #lit`
    add_int_lit16 => AddIntLit16,
    /// `rsub-int vA, vB, #lit`
    rsub_int => RsubInt,
    /// `mul-int/lit16 vA, vB, #lit`
    mul_int_lit16 => MulIntLit16,
    /// `div-int/lit16 vA, vB, #lit`
    div_int_lit16 => DivIntLit16,
    /// `rem-int/lit16 vA, vB, #lit`
    rem_int_lit16 => RemIntLit16,
    /// `and-int/lit16 vA, vB, #lit`
    and_int_lit16 => AndIntLit16,
    /// `or-int/lit16 vA, vB, #lit`
    or_int_lit16 => OrIntLit16,
    /// `xor-int/lit16 vA, vB, #lit`
    xor_int_lit16 => XorIntLit16,
    /// `add-int/lit8 vA, vB, #lit`
    add_int_lit8 => AddIntLit8,
    /// `rsub-int/lit8 vA, vB, #lit`
    rsub_int_lit8 => RsubIntLit8,
    /// `mul-int/lit8 vA, vB, #lit`
    mul_int_lit8 => MulIntLit8,
    /// `div-int/lit8 vA, vB, #lit`
    div_int_lit8 => DivIntLit8,
    /// `rem-int/lit8 vA, vB, #lit`
    rem_int_lit8 => RemIntLit8,
    /// `and-int/lit8 vA, vB, #lit`
    and_int_lit8 => AndIntLit8,
    /// `or-int/lit8 vA, vB, #lit`
    or_int_lit8 => OrIntLit8,
    /// `xor-int/lit8 vA, vB, #lit`
    xor_int_lit8 => XorIntLit8,
    /// `shl-int/lit8 vA, vB, #lit`
    shl_int_lit8 => ShlIntLit8,
    /// `shr-int/lit8 vA, vB, #lit`
    shr_int_lit8 => ShrIntLit8,
    /// `ushr-int/lit8 vA, vB, #lit`
    ushr_int_lit8 => UshrIntLit8,
}

op_reg_branch! {
    /// `if-eqz vA, +off`
    if_eqz => IfEqz,
    /// `if-nez vA, +off`
    if_nez => IfNez,
    /// `if-ltz vA, +off`
    if_ltz => IfLtz,
    /// `if-gez vA, +off`
    if_gez => IfGez,
    /// `if-gtz vA, +off`
    if_gtz => IfGtz,
    /// `if-lez vA, +off`
    if_lez => IfLez,
}

op_reg_pair_branch! {
    /// `if-eq vA, vB, +off`
    if_eq => IfEq,
    /// `if-ne vA, vB, +off`
    if_ne => IfNe,
    /// `if-lt vA, vB, +off`
    if_lt => IfLt,
    /// `if-ge vA, vB, +off`
    if_ge => IfGe,
    /// `if-gt vA, vB, +off`
    if_gt => IfGt,
    /// `if-le vA, vB, +off`
    if_le => IfLe,
}

op_reg_field! {
    /// `sget vA, field`
    sget => Sget,
    /// `sget-wide vA, field`
    sget_wide => SgetWide,
    /// `sget-object vA, field`
    sget_object => SgetObject,
    /// `sget-boolean vA, field`
    sget_boolean => SgetBoolean,
    /// `sget-byte vA, field`
    sget_byte => SgetByte,
    /// `sget-char vA, field`
    sget_char => SgetChar,
    /// `sget-short vA, field`
    sget_short => SgetShort,
    /// `sput vA, field`
    sput => Sput,
    /// `sput-wide vA, field`
    sput_wide => SputWide,
    /// `sput-object vA, field`
    sput_object => SputObject,
    /// `sput-boolean vA, field`
    sput_boolean => SputBoolean,
    /// `sput-byte vA, field`
    sput_byte => SputByte,
    /// `sput-char vA, field`
    sput_char => SputChar,
    /// `sput-short vA, field`
    sput_short => SputShort,
}

op_reg_pair_field! {
    /// `iget vA, vB, field`
    iget => Iget,
    /// `iget-wide vA, vB, field`
    iget_wide => IgetWide,
    /// `iget-object vA, vB, field`
    iget_object => IgetObject,
    /// `iget-boolean vA, vB, field`
    iget_boolean => IgetBoolean,
    /// `iget-byte vA, vB, field`
    iget_byte => IgetByte,
    /// `iget-char vA, vB, field`
    iget_char => IgetChar,
    /// `iget-short vA, vB, field`
    iget_short => IgetShort,
    /// `iput vA, vB, field`
    iput => Iput,
    /// `iput-wide vA, vB, field`
    iput_wide => IputWide,
    /// `iput-object vA, vB, field`
    iput_object => IputObject,
    /// `iput-boolean vA, vB, field`
    iput_boolean => IputBoolean,
    /// `iput-byte vA, vB, field`
    iput_byte => IputByte,
    /// `iput-char vA, vB, field`
    iput_char => IputChar,
    /// `iput-short vA, vB, field`
    iput_short => IputShort,
}

op_invoke! {
    /// `invoke-virtual {…}, method`
    invoke_virtual => InvokeVirtual,
    /// `invoke-super {…}, method`
    invoke_super => InvokeSuper,
    /// `invoke-direct {…}, method`
    invoke_direct => InvokeDirect,
    /// `invoke-static {…}, method`
    invoke_static => InvokeStatic,
    /// `invoke-interface {…}, method`
    invoke_interface => InvokeInterface,
}

op_invoke_range! {
    /// `invoke-virtual/range {vN .. vN+count-1}, method`
    invoke_virtual_range => InvokeVirtualRange,
    /// `invoke-super/range {vN .. vN+count-1}, method`
    invoke_super_range => InvokeSuperRange,
    /// `invoke-direct/range {vN .. vN+count-1}, method`
    invoke_direct_range => InvokeDirectRange,
    /// `invoke-static/range {vN .. vN+count-1}, method`
    invoke_static_range => InvokeStaticRange,
    /// `invoke-interface/range {vN .. vN+count-1}, method`
    invoke_interface_range => InvokeInterfaceRange,
}

/// `const-string vA, "…"`
pub fn const_string(a: RegisterId, string: impl AsRef<str>) -> Instruction {
    Instruction::new(
        Opcode::ConstString,
        Operands::RegString {
            a,
            string: Arc::from(string.as_ref()),
        },
    )
}

/// `const-string/jumbo vA, "…"`
pub fn const_string_jumbo(a: RegisterId, string: impl AsRef<str>) -> Instruction {
    Instruction::new(
        Opcode::ConstStringJumbo,
        Operands::RegString {
            a,
            string: Arc::from(string.as_ref()),
        },
    )
}

/// `const-class vA, type`
pub fn const_class(a: RegisterId, ty: TypeDescriptor) -> Instruction {
    Instruction::new(Opcode::ConstClass, Operands::RegType { a, ty })
}

/// `check-cast vA, type`
pub fn check_cast(a: RegisterId, ty: TypeDescriptor) -> Instruction {
    Instruction::new(Opcode::CheckCast, Operands::RegType { a, ty })
}

/// `new-instance vA, type`
pub fn new_instance(a: RegisterId, ty: TypeDescriptor) -> Instruction {
    Instruction::new(Opcode::NewInstance, Operands::RegType { a, ty })
}

/// `instance-of vA, vB, type`
pub fn instance_of(a: RegisterId, b: RegisterId, ty: TypeDescriptor) -> Instruction {
    Instruction::new(Opcode::InstanceOf, Operands::RegPairType { a, b, ty })
}

/// `new-array vA, vB, type`
pub fn new_array(a: RegisterId, b: RegisterId, ty: TypeDescriptor) -> Instruction {
    Instruction::new(Opcode::NewArray, Operands::RegPairType { a, b, ty })
}

/// `filled-new-array {…}, type`
pub fn filled_new_array(registers: Vec<RegisterId>, ty: TypeDescriptor) -> Instruction {
    Instruction::new(Opcode::FilledNewArray, Operands::RegListType { registers, ty })
}

/// `filled-new-array/range {vN .. vN+count-1}, type`
pub fn filled_new_array_range(start: RegisterId, count: u16, ty: TypeDescriptor) -> Instruction {
    Instruction::new(
        Opcode::FilledNewArrayRange,
        Operands::RegRangeType { start, count, ty },
    )
}

/// `fill-array-data vA, +off`
pub fn fill_array_data(a: RegisterId, offset: i32) -> Instruction {
    Instruction::new(Opcode::FillArrayData, Operands::RegPayload { a, offset })
}

/// `goto +off`
pub fn goto(offset: i32) -> Instruction {
    Instruction::new(Opcode::Goto, Operands::Branch { offset })
}

/// `goto/16 +off`
pub fn goto16(offset: i32) -> Instruction {
    Instruction::new(Opcode::Goto16, Operands::Branch { offset })
}

/// `goto/32 +off`
pub fn goto32(offset: i32) -> Instruction {
    Instruction::new(Opcode::Goto32, Operands::Branch { offset })
}

/// `packed-switch vA, +off`
pub fn packed_switch(a: RegisterId, offset: i32) -> Instruction {
    Instruction::new(Opcode::PackedSwitch, Operands::RegPayload { a, offset })
}

/// `sparse-switch vA, +off`
pub fn sparse_switch(a: RegisterId, offset: i32) -> Instruction {
    Instruction::new(Opcode::SparseSwitch, Operands::RegPayload { a, offset })
}

/// `packed-switch-payload`
pub fn packed_switch_payload(first_key: i32, targets: Vec<i32>) -> Instruction {
    Instruction::new(
        Opcode::PackedSwitchPayload,
        Operands::Payload(Payload::PackedSwitch { first_key, targets }),
    )
}

/// `sparse-switch-payload`
pub fn sparse_switch_payload(keys: Vec<i32>, targets: Vec<i32>) -> Instruction {
    Instruction::new(
        Opcode::SparseSwitchPayload,
        Operands::Payload(Payload::SparseSwitch { keys, targets }),
    )
}

/// `array-payload`
pub fn array_payload(element_width: u16, element_count: u32) -> Instruction {
    Instruction::new(
        Opcode::ArrayPayload,
        Operands::Payload(Payload::ArrayData {
            element_width,
            element_count,
        }),
    )
}
