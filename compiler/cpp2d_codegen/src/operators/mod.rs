//! Operator overload renaming and derived member synthesis.
//!
//! C++ operators become named methods. While the methods of an aggregate
//! are rendered, the facts needed to derive `opCmp` and `opCast!bool`
//! accumulate in a [`ClassInfo`]; the aggregate takes them back when its
//! body closes.

use cpp2d_ir::{DeclId, OverloadedOperator, QualType};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::output::OutputStack;


/// One side of a binary operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// The implicit object of a member operator.
    This(DeclId),
    /// A parameter of the given type.
    Type(QualType),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RelationInfo {
    pub has_op_less: bool,
    pub has_op_equal: bool,
}

/// Operator facts about one aggregate.
#[derive(Clone, Debug, Default)]
pub struct ClassInfo {
    /// Relations keyed by the other operand, in discovery order.
    pub relations: SmallVec<[(Operand, RelationInfo); 2]>,
    pub has_op_exclaim: bool,
    pub has_bool_conv: bool,
}

impl ClassInfo {
    pub fn relation_mut(&mut self, other: Operand) -> &mut RelationInfo {
        let index = match self.relations.iter().position(|(key, _)| *key == other) {
            Some(index) => index,
            None => {
                self.relations.push((other, RelationInfo::default()));
                self.relations.len() - 1
            }
        };
        &mut self.relations[index].1
    }

    /// Operands with both `<` and `==`, each getting one `opCmp`.
    pub fn comparisons(&self) -> impl Iterator<Item = Operand> + '_ {
        self.relations
            .iter()
            .filter(|(_, info)| info.has_op_less && info.has_op_equal)
            .map(|(other, _)| *other)
    }

    pub fn needs_bool_cast(&self) -> bool {
        self.has_op_exclaim && !self.has_bool_conv
    }
}

/// What an operator declaration tells about one of its operands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OperatorSide {
    /// Aggregate the operand names, if any.
    pub record: Option<DeclId>,
    pub operand: Option<Operand>,
}

#[derive(Clone, Debug, Default)]
pub struct ClassInfoMap {
    map: FxHashMap<DeclId, ClassInfo>,
}

impl ClassInfoMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&mut self, record: DeclId) -> &mut ClassInfo {
        self.map.entry(record).or_default()
    }

    /// Remove the facts of `record` for synthesis.
    pub fn take(&mut self, record: DeclId) -> Option<ClassInfo> {
        self.map.remove(&record)
    }

    /// Record what declaring `op` with these operands implies.
    pub fn record_operator(&mut self, op: OverloadedOperator, lhs: OperatorSide, rhs: OperatorSide) {
        match op {
            OverloadedOperator::EqualEqual => {
                if let (Some(record), Some(other)) = (lhs.record, rhs.operand) {
                    self.entry(record).relation_mut(other).has_op_equal = true;
                }
                if let (Some(record), Some(other)) = (rhs.record, lhs.operand) {
                    self.entry(record).relation_mut(other).has_op_equal = true;
                }
            }
            OverloadedOperator::Less => {
                if let (Some(record), Some(other)) = (lhs.record, rhs.operand) {
                    self.entry(record).relation_mut(other).has_op_less = true;
                }
            }
            OverloadedOperator::Exclaim => {
                if let Some(record) = lhs.record {
                    self.entry(record).has_op_exclaim = true;
                }
            }
            _ => {}
        }
    }
}

/// Target name for an operator method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorMethod {
    pub name: String,
    /// `string op: "+"` for the generic families.
    pub template_param: Option<String>,
}

/// Name of the method implementing `op` with `arity` operands (the
/// implicit object included). `right` selects the variant emitted in the
/// right operand's aggregate.
pub fn operator_method(op: OverloadedOperator, arity: usize, right: bool) -> OperatorMethod {
    let suffix = if right { "Right" } else { "" };
    let named = |base: &str| OperatorMethod {
        name: format!("{base}{suffix}"),
        template_param: None,
    };
    match op {
        OverloadedOperator::EqualEqual => named("opEquals"),
        OverloadedOperator::Exclaim => named("_opExclaim"),
        OverloadedOperator::Call => named("opCall"),
        OverloadedOperator::Subscript => named("opIndex"),
        OverloadedOperator::Equal => named("opAssign"),
        OverloadedOperator::Less => named("_opLess"),
        OverloadedOperator::LessEqual => named("_opLessEqual"),
        OverloadedOperator::Greater => named("_opGreater"),
        OverloadedOperator::GreaterEqual => named("_opGreaterEqual"),
        OverloadedOperator::PlusPlus if arity == 2 => named("_opPostPlusplus"),
        OverloadedOperator::MinusMinus if arity == 2 => named("_opPostMinusMinus"),
        _ => {
            let spelling = op.spelling();
            let (name, spelling) = if arity == 1 {
                (format!("opUnary{suffix}"), spelling)
            } else if let Some(stripped) = spelling.strip_suffix('=') {
                ("opOpAssign".to_owned(), stripped)
            } else {
                (format!("opBinary{suffix}"), spelling)
            };
            OperatorMethod {
                name,
                template_param: Some(format!("string op: \"{spelling}\"")),
            }
        }
    }
}

/// Three-way comparison derived from `_opLess` and `==`.
pub fn write_op_cmp(out: &mut OutputStack, other: &str, port_const: bool) {
    out.write_indent();
    out.write("int opCmp(ref in ");
    out.write(other);
    out.write(" other)");
    if port_const {
        out.write(" const");
    }
    out.newline();
    out.write_indent();
    out.write("{\n");
    out.indent();
    out.write_indent();
    out.write("return _opLess(other) ? -1: ((this == other)? 0: 1);\n");
    out.dedent();
    out.write_indent();
    out.write("}\n");
}

/// Boolean conversion derived from `_opExclaim`.
pub fn write_bool_cast(out: &mut OutputStack, port_const: bool) {
    out.write_indent();
    out.write("bool opCast(T : bool)()");
    if port_const {
        out.write(" const");
    }
    out.newline();
    out.write_indent();
    out.write("{\n");
    out.indent();
    out.write_indent();
    out.write("return !_opExclaim();\n");
    out.dedent();
    out.write_indent();
    out.write("}\n");
}
