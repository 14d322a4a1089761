use std::fmt;

use crate::types::{Param, Type};

/// A syntax-tree node together with the source position it was parsed from
///
/// Positions are 1-based; terms built directly through the constructors below
/// sit at `0:0` until [`Term::at`] places them.
#[derive(Debug, Clone)]
pub struct Term {
    pub kind: TermKind,
    pub line: usize,
    pub column: usize,
}

/// The closed set of term shapes the checker consumes
#[derive(Debug, Clone)]
pub enum TermKind {
    True,
    False,
    If {
        cond: Box<Term>,
        thn: Box<Term>,
        els: Box<Term>,
    },
    Number(f64),
    Add {
        left: Box<Term>,
        right: Box<Term>,
    },
    Var(String),
    Func {
        params: Vec<Param>,
        ret_type: Option<Type>,
        body: Box<Term>,
    },
    RecFunc {
        func_name: String,
        params: Vec<Param>,
        ret_type: Type,
        body: Box<Term>,
        rest: Box<Term>,
    },
    Call {
        func: Box<Term>,
        args: Vec<Term>,
    },
    Seq {
        body: Box<Term>,
        rest: Box<Term>,
    },
    Const {
        name: String,
        init: Box<Term>,
        rest: Box<Term>,
    },
    ObjectNew {
        props: Vec<PropertyTerm>,
    },
    ObjectGet {
        obj: Box<Term>,
        prop_name: String,
    },
}

/// A `name: term` entry of an object literal
#[derive(Debug, Clone)]
pub struct PropertyTerm {
    pub name: String,
    pub term: Term,
}

impl PropertyTerm {
    pub fn new(name: &str, term: Term) -> Self {
        PropertyTerm {
            name: name.to_string(),
            term,
        }
    }
}

impl Term {
    pub fn new(kind: TermKind) -> Self {
        Term {
            kind,
            line: 0,
            column: 0,
        }
    }

    /// Place the term at a source position
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn boolean(value: bool) -> Self {
        Term::new(if value { TermKind::True } else { TermKind::False })
    }

    pub fn number(n: f64) -> Self {
        Term::new(TermKind::Number(n))
    }

    pub fn var(name: &str) -> Self {
        Term::new(TermKind::Var(name.to_string()))
    }

    pub fn cond(cond: Term, thn: Term, els: Term) -> Self {
        Term::new(TermKind::If {
            cond: Box::new(cond),
            thn: Box::new(thn),
            els: Box::new(els),
        })
    }

    pub fn add(left: Term, right: Term) -> Self {
        Term::new(TermKind::Add {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn func(params: Vec<Param>, ret_type: Option<Type>, body: Term) -> Self {
        Term::new(TermKind::Func {
            params,
            ret_type,
            body: Box::new(body),
        })
    }

    pub fn rec_func(
        func_name: &str,
        params: Vec<Param>,
        ret_type: Type,
        body: Term,
        rest: Term,
    ) -> Self {
        Term::new(TermKind::RecFunc {
            func_name: func_name.to_string(),
            params,
            ret_type,
            body: Box::new(body),
            rest: Box::new(rest),
        })
    }

    pub fn call(func: Term, args: Vec<Term>) -> Self {
        Term::new(TermKind::Call {
            func: Box::new(func),
            args,
        })
    }

    pub fn seq(body: Term, rest: Term) -> Self {
        Term::new(TermKind::Seq {
            body: Box::new(body),
            rest: Box::new(rest),
        })
    }

    pub fn constant(name: &str, init: Term, rest: Term) -> Self {
        Term::new(TermKind::Const {
            name: name.to_string(),
            init: Box::new(init),
            rest: Box::new(rest),
        })
    }

    /// Create an object literal from `(name, term)` pairs
    pub fn object<S: AsRef<str>>(props: Vec<(S, Term)>) -> Self {
        Term::new(TermKind::ObjectNew {
            props: props
                .into_iter()
                .map(|(name, term)| PropertyTerm::new(name.as_ref(), term))
                .collect(),
        })
    }

    pub fn get(obj: Term, prop_name: &str) -> Self {
        Term::new(TermKind::ObjectGet {
            obj: Box::new(obj),
            prop_name: prop_name.to_string(),
        })
    }
}

impl TermKind {
    /// Tag name of the term shape, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            TermKind::True => "true",
            TermKind::False => "false",
            TermKind::If { .. } => "if",
            TermKind::Number(_) => "number",
            TermKind::Add { .. } => "add",
            TermKind::Var(_) => "var",
            TermKind::Func { .. } => "func",
            TermKind::RecFunc { .. } => "recFunc",
            TermKind::Call { .. } => "call",
            TermKind::Seq { .. } => "seq",
            TermKind::Const { .. } => "const",
            TermKind::ObjectNew { .. } => "objectNew",
            TermKind::ObjectGet { .. } => "objectGet",
        }
    }
}

// Binding strength of each printed form, weakest first.
const PREC_SEQUENCE: u8 = 0;
const PREC_ARROW: u8 = 1;
const PREC_COND: u8 = 2;
const PREC_ADD: u8 = 3;
const PREC_POSTFIX: u8 = 4;
const PREC_PRIMARY: u8 = 5;

impl Term {
    fn precedence(&self) -> u8 {
        match &self.kind {
            TermKind::Seq { .. } | TermKind::Const { .. } | TermKind::RecFunc { .. } => {
                PREC_SEQUENCE
            }
            TermKind::Func { .. } => PREC_ARROW,
            TermKind::If { .. } => PREC_COND,
            TermKind::Add { .. } => PREC_ADD,
            TermKind::Call { .. } | TermKind::ObjectGet { .. } => PREC_POSTFIX,
            TermKind::True
            | TermKind::False
            | TermKind::Number(_)
            | TermKind::Var(_)
            | TermKind::ObjectNew { .. } => PREC_PRIMARY,
        }
    }

    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, min_prec: u8) -> fmt::Result {
        if self.precedence() < min_prec {
            write!(f, "(")?;
            self.fmt_term(f)?;
            write!(f, ")")
        } else {
            self.fmt_term(f)
        }
    }

    fn fmt_term(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TermKind::True => write!(f, "true"),
            TermKind::False => write!(f, "false"),
            TermKind::Number(n) => write!(f, "{}", format_number(*n)),
            TermKind::Var(name) => write!(f, "{}", name),
            TermKind::If { cond, thn, els } => {
                cond.fmt_at(f, PREC_ADD)?;
                write!(f, " ? ")?;
                thn.fmt_at(f, PREC_ARROW)?;
                write!(f, " : ")?;
                els.fmt_at(f, PREC_ARROW)
            }
            TermKind::Add { left, right } => {
                left.fmt_at(f, PREC_ADD)?;
                write!(f, " + ")?;
                right.fmt_at(f, PREC_POSTFIX)
            }
            TermKind::Func {
                params,
                ret_type,
                body,
            } => {
                write_params(f, params)?;
                if let Some(ret_type) = ret_type {
                    write!(f, ": {}", ret_type)?;
                }
                write!(f, " => ")?;
                match body.kind {
                    TermKind::Seq { .. } | TermKind::Const { .. } | TermKind::RecFunc { .. } => {
                        write!(f, "{{ {} }}", body)
                    }
                    // A brace right after `=>` opens a block.
                    TermKind::ObjectNew { .. } => write!(f, "({})", body),
                    _ => body.fmt_at(f, PREC_ARROW),
                }
            }
            TermKind::RecFunc {
                func_name,
                params,
                ret_type,
                body,
                rest,
            } => {
                write!(f, "function {}", func_name)?;
                write_params(f, params)?;
                write!(f, ": {} {{ {} }}\n{}", ret_type, body, rest)
            }
            TermKind::Call { func, args } => {
                func.fmt_at(f, PREC_POSTFIX)?;
                write!(f, "(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.fmt_at(f, PREC_ARROW)?;
                }
                write!(f, ")")
            }
            TermKind::Seq { body, rest } => {
                body.fmt_at(f, PREC_ARROW)?;
                write!(f, ";\n{}", rest)
            }
            TermKind::Const { name, init, rest } => {
                write!(f, "const {} = ", name)?;
                init.fmt_at(f, PREC_ARROW)?;
                write!(f, ";\n{}", rest)
            }
            TermKind::ObjectNew { props } => {
                if props.is_empty() {
                    return write!(f, "{{}}");
                }
                write!(f, "{{ ")?;
                for (i, prop) in props.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: ", prop.name)?;
                    prop.term.fmt_at(f, PREC_ARROW)?;
                }
                write!(f, " }}")
            }
            TermKind::ObjectGet { obj, prop_name } => {
                obj.fmt_at(f, PREC_POSTFIX)?;
                write!(f, ".{}", prop_name)
            }
        }
    }
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &[Param]) -> fmt::Result {
    write!(f, "(")?;
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", param)?;
    }
    write!(f, ")")
}

/// Integral values print without a fractional part
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        let mut buffer = itoa::Buffer::new();
        buffer.format(n as i64).to_string()
    } else {
        let mut buffer = ryu::Buffer::new();
        buffer.format(n).to_string()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, PREC_SEQUENCE)
    }
}
