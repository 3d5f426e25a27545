//! Per-instruction dispatch into the family verification routines.

use dex_asm::Opcode;
use tracing::trace;

use super::MethodAnalyzer;
use crate::error::VerifyError;
use crate::regtype::{CategorySet, RegisterType};

impl<'a> MethodAnalyzer<'a> {
    pub(super) fn verify_instruction(&mut self, node: usize) -> Result<(), VerifyError> {
        let Some(instruction) = self.nodes[node].instruction else {
            return Ok(());
        };
        trace!(address = self.address(node), op = %instruction, "verifying");

        use Opcode::*;
        match instruction.opcode {
            Nop => Ok(()),

            Move | MoveFrom16 | Move16 => self.verify_move(node, CategorySet::PRIMITIVE_32),
            MoveWide | MoveWideFrom16 | MoveWide16 => self.verify_move_wide(node),
            MoveObject | MoveObjectFrom16 | MoveObject16 => {
                self.verify_move(node, CategorySet::ANY_REFERENCE_OR_UNINIT)
            }

            MoveResult => self.verify_move_result(node, CategorySet::PRIMITIVE_32),
            MoveResultWide => self.verify_move_result(node, CategorySet::WIDE_LO),
            MoveResultObject => self.verify_move_result(node, CategorySet::ANY_REFERENCE),
            MoveException => self.verify_move_exception(node),

            ReturnVoid => self.verify_return_void(node),
            Return => self.verify_return(node),
            ReturnWide => self.verify_return_wide(node),
            ReturnObject => self.verify_return_object(node),

            Const4 | Const16 | Const | ConstHigh16 => self.verify_const(node),
            ConstWide16 | ConstWide32 | ConstWide | ConstWideHigh16 => {
                self.verify_const_wide(node)
            }
            ConstString | ConstStringJumbo => self.verify_const_string(node),
            ConstClass => self.verify_const_class(node),

            MonitorEnter | MonitorExit => self.verify_monitor(node),
            CheckCast => self.verify_check_cast(node),
            InstanceOf => self.verify_instance_of(node),
            ArrayLength => self.verify_array_length(node),
            NewInstance => self.verify_new_instance(node),
            NewArray => self.verify_new_array(node),
            FilledNewArray | FilledNewArrayRange => self.verify_filled_new_array(node),
            FillArrayData => self.verify_fill_array_data(node),
            Throw => self.verify_throw(node),

            Goto | Goto16 | Goto32 => Ok(()),
            PackedSwitch | SparseSwitch => self.verify_switch(node),

            CmplFloat | CmpgFloat => self.verify_cmp(node, false),
            CmplDouble | CmpgDouble | CmpLong => self.verify_cmp(node, true),

            IfEq | IfNe => self.verify_if_eq_ne(node),
            IfLt | IfGe | IfGt | IfLe => self.verify_if_cmp(node),
            IfEqz | IfNez => self.verify_if_zero(node, true),
            IfLtz | IfGez | IfGtz | IfLez => self.verify_if_zero(node, false),

            Aget | AgetWide | AgetObject | AgetBoolean | AgetByte | AgetChar | AgetShort => {
                self.verify_aget(node)
            }
            Aput | AputWide | AputObject | AputBoolean | AputByte | AputChar | AputShort => {
                self.verify_aput(node)
            }

            Iget | IgetWide | IgetObject | IgetBoolean | IgetByte | IgetChar | IgetShort => {
                self.verify_instance_field_get(node)
            }
            Iput | IputWide | IputObject | IputBoolean | IputByte | IputChar | IputShort => {
                self.verify_instance_field_put(node)
            }
            Sget | SgetWide | SgetObject | SgetBoolean | SgetByte | SgetChar | SgetShort => {
                self.verify_static_field_get(node)
            }
            Sput | SputWide | SputObject | SputBoolean | SputByte | SputChar | SputShort => {
                self.verify_static_field_put(node)
            }

            InvokeVirtual | InvokeSuper | InvokeDirect | InvokeStatic | InvokeInterface
            | InvokeVirtualRange | InvokeSuperRange | InvokeDirectRange | InvokeStaticRange
            | InvokeInterfaceRange => self.verify_invoke(node),

            NegInt | NotInt | FloatToInt => self.verify_unary(node, RegisterType::Integer),
            NegFloat => self.verify_unary(node, RegisterType::Float),
            IntToFloat => self.verify_unary(node, RegisterType::Float),
            IntToByte => self.verify_unary(node, RegisterType::Byte),
            IntToChar => self.verify_unary(node, RegisterType::Char),
            IntToShort => self.verify_unary(node, RegisterType::Short),
            IntToLong | FloatToLong => self.verify_unary(node, RegisterType::LongLo),
            IntToDouble | FloatToDouble => self.verify_unary(node, RegisterType::DoubleLo),
            LongToInt | DoubleToInt => self.verify_unary_wide(node, RegisterType::Integer),
            LongToFloat | DoubleToFloat => self.verify_unary_wide(node, RegisterType::Float),
            LongToDouble => self.verify_unary_wide(node, RegisterType::DoubleLo),
            DoubleToLong => self.verify_unary_wide(node, RegisterType::LongLo),
            NegLong | NotLong => self.verify_unary_wide(node, RegisterType::LongLo),
            NegDouble => self.verify_unary_wide(node, RegisterType::DoubleLo),

            AddInt | SubInt | MulInt | DivInt | RemInt | ShlInt | ShrInt | UshrInt => {
                self.verify_binary(node, RegisterType::Integer, false)
            }
            AndInt | OrInt | XorInt => self.verify_binary(node, RegisterType::Integer, true),
            AddFloat | SubFloat | MulFloat | DivFloat | RemFloat => {
                self.verify_binary(node, RegisterType::Float, false)
            }
            AddLong | SubLong | MulLong | DivLong | RemLong | AndLong | OrLong | XorLong => {
                self.verify_binary_wide(node, RegisterType::LongLo)
            }
            ShlLong | ShrLong | UshrLong => self.verify_shift_wide(node),
            AddDouble | SubDouble | MulDouble | DivDouble | RemDouble => {
                self.verify_binary_wide(node, RegisterType::DoubleLo)
            }

            AddInt2addr | SubInt2addr | MulInt2addr | DivInt2addr | RemInt2addr
            | ShlInt2addr | ShrInt2addr | UshrInt2addr => {
                self.verify_binary_2addr(node, RegisterType::Integer, false)
            }
            AndInt2addr | OrInt2addr | XorInt2addr => {
                self.verify_binary_2addr(node, RegisterType::Integer, true)
            }
            AddFloat2addr | SubFloat2addr | MulFloat2addr | DivFloat2addr | RemFloat2addr => {
                self.verify_binary_2addr(node, RegisterType::Float, false)
            }
            AddLong2addr | SubLong2addr | MulLong2addr | DivLong2addr | RemLong2addr
            | AndLong2addr | OrLong2addr | XorLong2addr => {
                self.verify_binary_wide_2addr(node, RegisterType::LongLo)
            }
            ShlLong2addr | ShrLong2addr | UshrLong2addr => self.verify_shift_wide_2addr(node),
            AddDouble2addr | SubDouble2addr | MulDouble2addr | DivDouble2addr
            | RemDouble2addr => self.verify_binary_wide_2addr(node, RegisterType::DoubleLo),

            AddIntLit16 | RsubInt | MulIntLit16 | DivIntLit16 | RemIntLit16 | AddIntLit8
            | RsubIntLit8 | MulIntLit8 | DivIntLit8 | RemIntLit8 | ShlIntLit8 | ShrIntLit8
            | UshrIntLit8 => self.verify_binary_literal(node, false),
            AndIntLit16 | OrIntLit16 | XorIntLit16 | AndIntLit8 | OrIntLit8 | XorIntLit8 => {
                self.verify_binary_literal(node, true)
            }

            PackedSwitchPayload | SparseSwitchPayload | ArrayPayload => {
                Err(VerifyError::validation(
                    self.address(node),
                    "payload pseudo-instructions are not executable",
                ))
            }
        }
    }
}
